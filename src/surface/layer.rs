use uuid::Uuid;

use crate::marker::Marker;

use super::Surface;

/// In-memory surface keeping markers in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: Uuid) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id() == id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }
}

impl Surface for MarkerLayer {
    fn add_marker(&mut self, marker: Marker) -> Uuid {
        let id = marker.id();
        match self.markers.iter_mut().find(|existing| existing.id() == id) {
            Some(existing) => {
                log::debug!("marker {} already on layer, replacing", id);
                *existing = marker;
            }
            None => self.markers.push(marker),
        }
        id
    }

    fn remove_marker(&mut self, id: Uuid) -> Option<Marker> {
        let index = self.markers.iter().position(|marker| marker.id() == id)?;
        Some(self.markers.remove(index))
    }

    fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::build_marker;

    #[test]
    fn test_add_and_remove() {
        let mut layer = MarkerLayer::new();
        let first = layer.add_marker(build_marker(10.0, 10.0, "red", "1").unwrap());
        let second = layer.add_marker(build_marker(20.0, 20.0, "blue", "2").unwrap());
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.get(second).unwrap().label().content, "2");

        let removed = layer.remove_marker(first).unwrap();
        assert_eq!(removed.id(), first);
        assert_eq!(layer.len(), 1);
        assert!(layer.remove_marker(first).is_none());
        assert_eq!(layer.markers()[0].id(), second);
    }

    #[test]
    fn test_identical_markers_are_tracked_separately() {
        let mut layer = MarkerLayer::new();
        let a = layer.add_marker(build_marker(0.0, 0.0, "white", "same").unwrap());
        let b = layer.add_marker(build_marker(0.0, 0.0, "white", "same").unwrap());
        assert_ne!(a, b);
        layer.remove_marker(a);
        assert!(layer.get(b).is_some());
    }

    #[test]
    fn test_clone_replaces_instead_of_duplicating() {
        let mut layer = MarkerLayer::new();
        let marker = build_marker(5.0, 5.0, "red", "dup").unwrap();
        let other = layer.add_marker(build_marker(9.0, 9.0, "blue", "other").unwrap());
        let id = layer.add_marker(marker.clone());
        assert_eq!(layer.add_marker(marker), id);
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.markers()[1].id(), id);

        assert!(layer.remove_marker(id).is_some());
        assert!(layer.get(id).is_none());
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.markers()[0].id(), other);
    }

    #[test]
    fn test_clear() {
        let mut layer = MarkerLayer::new();
        layer.add_marker(build_marker(0.0, 0.0, "white", "").unwrap());
        layer.clear();
        assert!(layer.is_empty());
    }
}
