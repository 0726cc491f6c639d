use image::imageops::{blur, overlay};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, Blend};
use uuid::Uuid;

use crate::color::Color;
use crate::marker::{Bounds, Marker};

use super::layer::MarkerLayer;
use super::Surface;

/// Extra pixels around a sprite so the blurred shadow tail is not clipped.
const SPRITE_MARGIN: f64 = 2.0;

/// Centers and radii are clamped to this before handing them to imageproc's `i32` math.
const MAX_DRAW_EXTENT: f64 = (1 << 24) as f64;

/// A fixed-size canvas that rasterizes its markers into an RGBA image.
///
/// Circles, strokes, and shadows are drawn; label text is not, since no font is bundled.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    background: Color,
    layer: MarkerLayer,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Color::WHITE,
            layer: MarkerLayer::new(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn layer(&self) -> &MarkerLayer {
        &self.layer
    }

    pub fn clear(&mut self) {
        self.layer.clear();
    }

    fn canvas_bounds(&self) -> Bounds {
        Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: self.width as f64,
            max_y: self.height as f64,
        }
    }

    /// Composite every marker over the background, in insertion order.
    pub fn render(&self) -> RgbaImage {
        let mut canvas = RgbaImage::from_pixel(self.width, self.height, to_pixel(self.background));
        let visible = self.canvas_bounds();

        for marker in self.layer.markers() {
            if !marker.bounds().intersects(&visible) {
                log::trace!("marker {} is off canvas, skipping", marker.id());
                continue;
            }
            if let Some((sprite, x, y)) = render_sprite(marker, &visible) {
                overlay(&mut canvas, &sprite, x, y);
            }
        }

        canvas
    }
}

impl Surface for RasterSurface {
    fn add_marker(&mut self, marker: Marker) -> Uuid {
        self.layer.add_marker(marker)
    }

    fn remove_marker(&mut self, id: Uuid) -> Option<Marker> {
        self.layer.remove_marker(id)
    }

    fn markers(&self) -> &[Marker] {
        self.layer.markers()
    }
}

fn to_pixel(color: Color) -> Rgba<u8> {
    Rgba(color.into_rgba())
}

/// Draw the visible part of one marker into its own transparent sprite.
///
/// The sprite never extends past `visible`, however large the marker is.
/// Returns the sprite and the canvas position of its top-left corner, or `None`
/// when nothing of the marker lands on the canvas.
fn render_sprite(marker: &Marker, visible: &Bounds) -> Option<(RgbaImage, i64, i64)> {
    let bounds = marker.bounds();
    let left = (bounds.min_x.floor() - SPRITE_MARGIN).max(visible.min_x);
    let top = (bounds.min_y.floor() - SPRITE_MARGIN).max(visible.min_y);
    let right = (bounds.max_x.ceil() + SPRITE_MARGIN).min(visible.max_x);
    let bottom = (bounds.max_y.ceil() + SPRITE_MARGIN).min(visible.max_y);
    if !(right > left && bottom > top) {
        return None;
    }
    let origin_x = left as i64;
    let origin_y = top as i64;
    let width = (right - left) as u32;
    let height = (bottom - top) as u32;

    let circle = marker.circle();
    let position = marker.position();
    let center_x = position.x - left;
    let center_y = position.y - top;
    let center = (to_draw_coord(center_x), to_draw_coord(center_y));
    let radius = to_draw_coord(circle.radius);

    let shadow = circle.shadow;
    let mut sprite = RgbaImage::new(width, height);
    let shadow_center = (
        to_draw_coord(center_x + shadow.offset_x),
        to_draw_coord(center_y + shadow.offset_y),
    );
    draw_filled_circle_mut(&mut sprite, shadow_center, radius, to_pixel(shadow.color));
    if shadow.blur > 0.0 {
        // CSS blur radius is roughly two standard deviations
        sprite = blur(&sprite, (shadow.blur / 2.0) as f32);
    }

    let mut body = Blend(sprite);
    draw_filled_circle_mut(&mut body, center, radius, to_pixel(circle.fill));
    let rings = to_draw_coord(circle.stroke_width).max(0);
    let first_ring = radius - (rings - 1).max(0) / 2;
    for ring in 0..rings {
        draw_hollow_circle_mut(&mut body, center, first_ring + ring, to_pixel(circle.stroke));
    }

    Some((body.0, origin_x, origin_y))
}

fn to_draw_coord(value: f64) -> i32 {
    value.round().clamp(-MAX_DRAW_EXTENT, MAX_DRAW_EXTENT) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{build_marker, MarkerBuilder, MarkerStyle};

    fn giant_marker(x: f64, y: f64) -> Marker {
        let style = MarkerStyle {
            radius: 2000.0,
            ..MarkerStyle::default()
        };
        MarkerBuilder::with_style(style)
            .unwrap()
            .build(x, y, "#ffff00", "big")
            .unwrap()
    }

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_empty_surface_is_background() {
        let surface = RasterSurface::new(16, 8).with_background(Color::rgb(10, 20, 30));
        let image = surface.render();
        assert_eq!(image.dimensions(), (16, 8));
        assert!(image.pixels().all(|pixel| *pixel == Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn test_renders_fill_and_stroke() {
        let mut surface = RasterSurface::new(40, 40);
        surface.add_marker(build_marker(20.0, 20.0, "#ffff00", "A").unwrap());
        let image = surface.render();

        assert_eq!(*image.get_pixel(20, 20), Rgba([255, 255, 0, 255]));
        assert_eq!(*image.get_pixel(26, 20), Rgba([0, 0, 0, 255]));
        assert_eq!(*image.get_pixel(2, 2), WHITE);
    }

    #[test]
    fn test_renders_shadow() {
        let mut surface = RasterSurface::new(40, 40);
        surface.add_marker(build_marker(20.0, 20.0, "#ffff00", "A").unwrap());
        let image = surface.render();

        // right edge of the shadow circle, outside the marker body
        let shade = image.get_pixel(28, 22);
        assert!(shade[0] < 250 && shade[0] > 100, "unexpected shadow {:?}", shade);
        assert_eq!(shade[0], shade[1]);
    }

    #[test]
    fn test_off_canvas_markers_are_skipped() {
        let mut surface = RasterSurface::new(20, 20);
        surface.add_marker(build_marker(-100.0, -100.0, "red", "gone").unwrap());
        let image = surface.render();
        assert!(image.pixels().all(|pixel| *pixel == WHITE));
    }

    #[test]
    fn test_removed_markers_are_not_drawn() {
        let mut surface = RasterSurface::new(40, 40);
        let id = surface.add_marker(build_marker(20.0, 20.0, "red", "A").unwrap());
        assert!(surface.remove_marker(id).is_some());
        assert!(surface.markers().is_empty());
        assert_eq!(*surface.render().get_pixel(20, 20), WHITE);
    }

    #[test]
    fn test_later_markers_draw_on_top() {
        let mut surface = RasterSurface::new(40, 40);
        surface.add_marker(build_marker(20.0, 20.0, "red", "under").unwrap());
        surface.add_marker(build_marker(20.0, 20.0, "blue", "over").unwrap());
        assert_eq!(*surface.render().get_pixel(20, 20), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_sprite_is_clipped_to_canvas() {
        let surface = RasterSurface::new(40, 30);
        let visible = surface.canvas_bounds();
        let (sprite, x, y) = render_sprite(&giant_marker(20.0, 15.0), &visible).unwrap();
        assert_eq!((x, y), (0, 0));
        assert_eq!(sprite.dimensions(), (40, 30));

        let small = build_marker(20.0, 15.0, "red", "A").unwrap();
        let (sprite, x, y) = render_sprite(&small, &visible).unwrap();
        assert_eq!((x, y), (11, 6));
        assert!(sprite.width() < 40 && sprite.height() < 30);
    }

    #[test]
    fn test_huge_marker_fills_visible_area() {
        let mut surface = RasterSurface::new(40, 40);
        surface.add_marker(giant_marker(-1000.0, 20.0));
        let image = surface.render();
        assert_eq!(image.dimensions(), (40, 40));
        assert_eq!(*image.get_pixel(0, 0), Rgba([255, 255, 0, 255]));
        assert_eq!(*image.get_pixel(39, 39), Rgba([255, 255, 0, 255]));
    }

    #[test]
    fn test_marker_straddling_edge_is_partially_drawn() {
        let mut surface = RasterSurface::new(40, 40);
        surface.add_marker(build_marker(0.0, 20.0, "#0000ff", "edge").unwrap());
        let image = surface.render();
        assert_eq!(*image.get_pixel(0, 20), Rgba([0, 0, 255, 255]));
        assert_eq!(*image.get_pixel(30, 20), WHITE);
    }
}
