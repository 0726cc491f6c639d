//! Drawing surfaces that accept finished markers.
//!
//! Markers are built independently of any surface; adding one transfers
//! ownership and removing it hands the marker back.

mod layer;
mod raster;

use uuid::Uuid;

use crate::marker::Marker;

pub use layer::MarkerLayer;
pub use raster::RasterSurface;

/// A place markers can be added to and removed from.
pub trait Surface {
    /// Take ownership of `marker`, returning its id for later removal.
    ///
    /// Ids are unique per surface: a marker whose id is already present (a clone,
    /// or the same marker restored from JSON) replaces the stored one in place.
    fn add_marker(&mut self, marker: Marker) -> Uuid;

    /// Remove a marker by id, returning it if it was present.
    fn remove_marker(&mut self, id: Uuid) -> Option<Marker>;

    /// Markers in the order they were added (drawn bottom to top).
    fn markers(&self) -> &[Marker];
}
