use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::rect::Rect;

use crate::{
    error::{LocatorError, Result},
    traits::RegionAnnotator,
    types::{BoundingBox, Contour, Point},
};

/// Renders accepted regions onto fresh copies of the source photograph.
/// Regions are drawn in sequence order, later ones painting over earlier
/// ones where they overlap.
#[derive(Debug, Clone)]
pub struct OverlayAnnotator {
    pub fill_color: Rgb<u8>,
    pub box_color: Rgb<u8>,
    pub box_thickness: u32,
}

impl Default for OverlayAnnotator {
    fn default() -> Self {
        Self {
            fill_color: Rgb([0, 0, 255]),
            box_color: Rgb([0, 0, 255]),
            box_thickness: 5,
        }
    }
}

impl RegionAnnotator for OverlayAnnotator {
    fn render_filled(&self, base: &RgbImage, accepted: &[Contour]) -> Result<RgbImage> {
        let mut canvas = base.clone();
        for contour in accepted {
            draw_filled_contour(&mut canvas, contour, self.fill_color);
        }
        Ok(canvas)
    }

    fn render_bounding_boxes(&self, base: &RgbImage, accepted: &[Contour]) -> Result<RgbImage> {
        if self.box_thickness == 0 {
            return Err(LocatorError::ZeroThickness);
        }
        let mut canvas = base.clone();
        for contour in accepted {
            if let Some(bounding_box) = contour.bounding_box() {
                draw_thick_rect(&mut canvas, &bounding_box, self.box_color, self.box_thickness);
            }
        }
        Ok(canvas)
    }
}

fn draw_filled_contour(canvas: &mut RgbImage, contour: &Contour, color: Rgb<u8>) {
    let points = &contour.points;
    match points.len() {
        0 => {}
        1 => {
            let p = points[0];
            if p.x < canvas.width() && p.y < canvas.height() {
                canvas.put_pixel(p.x, p.y, color);
            }
        }
        2 => {
            draw_line_segment_mut(canvas, to_f32(points[0]), to_f32(points[1]), color);
        }
        _ => {
            let mut polygon: Vec<imageproc::point::Point<i32>> = points
                .iter()
                .map(|p| imageproc::point::Point::new(p.x as i32, p.y as i32))
                .collect();
            if polygon.first() == polygon.last() {
                polygon.pop();
            }
            draw_polygon_mut(canvas, &polygon, color);

            // the explicit outline on top of the fill
            for pair in points.windows(2) {
                draw_line_segment_mut(canvas, to_f32(pair[0]), to_f32(pair[1]), color);
            }
            draw_line_segment_mut(
                canvas,
                to_f32(points[points.len() - 1]),
                to_f32(points[0]),
                color,
            );
        }
    }
}

/// Draw the rectangle corner-to-corner inclusive, so a box at (x, y, w, h)
/// passes through (x, y) and (x + w, y + h). Thickness rings grow outward
/// from that rectangle, leaving the region interior untouched.
fn draw_thick_rect(canvas: &mut RgbImage, bounding_box: &BoundingBox, color: Rgb<u8>, thickness: u32) {
    for ring in 0..thickness {
        let rect = Rect::at(
            bounding_box.x as i32 - ring as i32,
            bounding_box.y as i32 - ring as i32,
        )
        .of_size(
            bounding_box.width + 1 + 2 * ring,
            bounding_box.height + 1 + 2 * ring,
        );
        draw_hollow_rect_mut(canvas, rect, color);
    }
}

fn to_f32(p: Point) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}
