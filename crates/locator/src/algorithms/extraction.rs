use std::collections::{HashSet, VecDeque};

use image::GrayImage;

use crate::{
    error::{LocatorError, Result},
    traits::ContourTracer,
    types::{Contour, Point},
};

/// Offsets of the 8 neighbours in clockwise order, starting east.
const NEIGHBOURS: [(i64, i64); 8] = [
    (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1),
];

/// Border-following tracer over a strict 0/255 mask.
///
/// Foreground is 8-connected. A region is traced only when it is externally
/// visible, meaning its boundary touches background reachable from the image
/// border; regions nested inside another region's hole are not emitted.
/// Regions are emitted in the row-major order of their topmost-leftmost
/// pixel, so the same mask always produces the same contour sequence.
#[derive(Debug, Clone, Default)]
pub struct BorderFollowingTracer;

impl ContourTracer for BorderFollowingTracer {
    fn trace(&self, mask: &GrayImage) -> Result<Vec<Contour>> {
        for (x, y, pixel) in mask.enumerate_pixels() {
            let value = pixel.0[0];
            if value != 0 && value != 255 {
                return Err(LocatorError::NonBinaryMask { value, x, y });
            }
        }

        let (width, height) = mask.dimensions();
        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        let grid = MaskGrid::new(mask);
        let outside = grid.flood_outside_background();
        let mut visited = vec![false; width as usize * height as usize];
        let mut contours = Vec::new();

        for y in 0..height {
            for x in 0..width {
                let index = y as usize * width as usize + x as usize;
                if visited[index] || !grid.foreground(x as i64, y as i64) {
                    continue;
                }
                let external = grid.fill_component(x, y, &outside, &mut visited);
                if external {
                    let boundary = grid.follow_border(x, y);
                    contours.push(Contour::new(compress_collinear(boundary)));
                }
            }
        }
        Ok(contours)
    }
}

struct MaskGrid<'a> {
    mask: &'a GrayImage,
    width: i64,
    height: i64,
}

impl<'a> MaskGrid<'a> {
    fn new(mask: &'a GrayImage) -> Self {
        Self {
            mask,
            width: mask.width() as i64,
            height: mask.height() as i64,
        }
    }

    fn foreground(&self, x: i64, y: i64) -> bool {
        x >= 0
            && x < self.width
            && y >= 0
            && y < self.height
            && self.mask.get_pixel(x as u32, y as u32).0[0] != 0
    }

    fn index(&self, x: i64, y: i64) -> usize {
        (y * self.width + x) as usize
    }

    /// Background cells reachable from the image border without crossing
    /// foreground. Background connectivity is 4-connected, the complement of
    /// the 8-connected foreground.
    fn flood_outside_background(&self) -> Vec<bool> {
        let mut outside = vec![false; (self.width * self.height) as usize];
        let mut queue = VecDeque::new();

        for x in 0..self.width {
            for y in [0, self.height - 1] {
                self.seed_outside(x, y, &mut outside, &mut queue);
            }
        }
        for y in 0..self.height {
            for x in [0, self.width - 1] {
                self.seed_outside(x, y, &mut outside, &mut queue);
            }
        }

        while let Some((x, y)) = queue.pop_front() {
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let (nx, ny) = (x + dx, y + dy);
                if nx >= 0 && nx < self.width && ny >= 0 && ny < self.height {
                    self.seed_outside(nx, ny, &mut outside, &mut queue);
                }
            }
        }
        outside
    }

    fn seed_outside(
        &self,
        x: i64,
        y: i64,
        outside: &mut [bool],
        queue: &mut VecDeque<(i64, i64)>,
    ) {
        let index = self.index(x, y);
        if !outside[index] && !self.foreground(x, y) {
            outside[index] = true;
            queue.push_back((x, y));
        }
    }

    /// Flood-fill one 8-connected component, marking every pixel visited.
    /// Returns whether the component touches outside background or the image
    /// border, which is what makes it externally visible.
    fn fill_component(
        &self,
        start_x: u32,
        start_y: u32,
        outside: &[bool],
        visited: &mut [bool],
    ) -> bool {
        let mut external = false;
        let mut stack = vec![(start_x as i64, start_y as i64)];
        visited[self.index(start_x as i64, start_y as i64)] = true;

        while let Some((x, y)) = stack.pop() {
            for (dx, dy) in NEIGHBOURS {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || nx >= self.width || ny < 0 || ny >= self.height {
                    external = true;
                    continue;
                }
                let index = self.index(nx, ny);
                if self.foreground(nx, ny) {
                    if !visited[index] {
                        visited[index] = true;
                        stack.push((nx, ny));
                    }
                } else if outside[index] {
                    external = true;
                }
            }
        }
        external
    }

    /// Moore-neighbour walk around one component's outer boundary, starting
    /// from its topmost-leftmost pixel. The walk is clockwise in screen
    /// coordinates and stops when its state repeats, so one-pixel-wide spurs
    /// are traversed on both sides exactly once.
    fn follow_border(&self, start_x: u32, start_y: u32) -> Vec<Point> {
        let start = (start_x as i64, start_y as i64);
        // The cell west of the start is background or out of bounds, because
        // the start is the first component pixel in row-major order.
        let mut current = start;
        let mut backtrack = (start.0 - 1, start.1);
        let mut seen = HashSet::new();
        let mut boundary = Vec::new();

        loop {
            if !seen.insert((current, backtrack)) {
                break;
            }
            boundary.push(Point::new(current.0 as u32, current.1 as u32));

            let entry = direction_of((backtrack.0 - current.0, backtrack.1 - current.1));
            let mut previous = backtrack;
            let mut moved = false;
            for step in 1..=8 {
                let (dx, dy) = NEIGHBOURS[(entry + step) % 8];
                let candidate = (current.0 + dx, current.1 + dy);
                if self.foreground(candidate.0, candidate.1) {
                    backtrack = previous;
                    current = candidate;
                    moved = true;
                    break;
                }
                previous = candidate;
            }
            if !moved {
                // isolated single pixel
                break;
            }
        }

        if boundary.len() > 1 && boundary.last() == boundary.first() {
            boundary.pop();
        }
        boundary
    }
}

fn direction_of(delta: (i64, i64)) -> usize {
    match delta {
        (1, 0) => 0,
        (1, 1) => 1,
        (0, 1) => 2,
        (-1, 1) => 3,
        (-1, 0) => 4,
        (-1, -1) => 5,
        (0, -1) => 6,
        _ => 7,
    }
}

/// Drop interior points of straight runs, keeping every direction change.
/// The input is a closed pixel chain, so the wrap-around segment between the
/// last and first point takes part in the comparison.
fn compress_collinear(boundary: Vec<Point>) -> Vec<Point> {
    let n = boundary.len();
    if n < 3 {
        return boundary;
    }

    let mut compressed = Vec::new();
    for i in 0..n {
        let prev = boundary[(i + n - 1) % n];
        let here = boundary[i];
        let next = boundary[(i + 1) % n];
        let incoming = (here.x as i64 - prev.x as i64, here.y as i64 - prev.y as i64);
        let outgoing = (next.x as i64 - here.x as i64, next.y as i64 - here.y as i64);
        if incoming != outgoing {
            compressed.push(here);
        }
    }
    compressed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;
    use image::Luma;

    fn fill_rect(mask: &mut GrayImage, x0: u32, y0: u32, width: u32, height: u32, value: u8) {
        for y in y0..y0 + height {
            for x in x0..x0 + width {
                mask.put_pixel(x, y, Luma([value]));
            }
        }
    }

    #[test]
    fn rectangle_blob_has_exact_bounding_box() {
        let mut mask = GrayImage::new(100, 100);
        fill_rect(&mut mask, 25, 30, 30, 40, 255);

        let contours = BorderFollowingTracer.trace(&mask).expect("Should trace");
        assert_eq!(contours.len(), 1, "Should find exactly one contour");

        let bb = contours[0].bounding_box().expect("Should have a bounding box");
        assert_eq!(bb, BoundingBox { x: 25, y: 30, width: 30, height: 40 });
    }

    #[test]
    fn rectangle_contour_compresses_to_corners() {
        let mut mask = GrayImage::new(100, 100);
        fill_rect(&mut mask, 25, 30, 30, 40, 255);

        let contours = BorderFollowingTracer.trace(&mask).expect("Should trace");
        assert_eq!(contours[0].len(), 4, "Axis-aligned edges should reduce to corners");
    }

    #[test]
    fn empty_mask_yields_no_contours() {
        let mask = GrayImage::new(64, 64);
        let contours = BorderFollowingTracer.trace(&mask).expect("Should trace");
        assert!(contours.is_empty());
    }

    #[test]
    fn single_pixel_island_is_reported() {
        let mut mask = GrayImage::new(10, 10);
        mask.put_pixel(4, 7, Luma([255]));

        let contours = BorderFollowingTracer.trace(&mask).expect("Should trace");
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].points, vec![Point::new(4, 7)]);

        let bb = contours[0].bounding_box().expect("Should have a bounding box");
        assert_eq!(bb, BoundingBox { x: 4, y: 7, width: 1, height: 1 });
    }

    #[test]
    fn nested_region_is_suppressed() {
        let mut mask = GrayImage::new(40, 40);
        // a ring with a hole, and a separate blob inside the hole
        fill_rect(&mut mask, 10, 10, 20, 20, 255);
        fill_rect(&mut mask, 14, 14, 12, 12, 0);
        fill_rect(&mut mask, 18, 18, 4, 4, 255);

        let contours = BorderFollowingTracer.trace(&mask).expect("Should trace");
        assert_eq!(contours.len(), 1, "Only the outer ring should be emitted");

        let bb = contours[0].bounding_box().expect("Should have a bounding box");
        assert_eq!(bb, BoundingBox { x: 10, y: 10, width: 20, height: 20 });
    }

    #[test]
    fn contours_are_emitted_in_row_major_order() {
        let mut mask = GrayImage::new(100, 100);
        fill_rect(&mut mask, 50, 5, 10, 10, 255);
        fill_rect(&mut mask, 5, 40, 20, 20, 255);

        let tracer = BorderFollowingTracer;
        let contours = tracer.trace(&mask).expect("Should trace");
        assert_eq!(contours.len(), 2);

        let first = contours[0].bounding_box().expect("Should have a bounding box");
        assert_eq!((first.x, first.y), (50, 5), "Topmost region should come first");

        let again = tracer.trace(&mask).expect("Should trace again");
        assert_eq!(contours, again, "Same mask should give the same contours");
    }

    #[test]
    fn diagonal_pixels_form_one_region() {
        let mut mask = GrayImage::new(10, 10);
        mask.put_pixel(3, 3, Luma([255]));
        mask.put_pixel(4, 4, Luma([255]));

        let contours = BorderFollowingTracer.trace(&mask).expect("Should trace");
        assert_eq!(contours.len(), 1, "Diagonal neighbours are 8-connected");

        let bb = contours[0].bounding_box().expect("Should have a bounding box");
        assert_eq!(bb, BoundingBox { x: 3, y: 3, width: 2, height: 2 });
    }

    #[test]
    fn one_pixel_wide_line_is_traced_once() {
        let mut mask = GrayImage::new(20, 20);
        fill_rect(&mut mask, 5, 9, 8, 1, 255);

        let contours = BorderFollowingTracer.trace(&mask).expect("Should trace");
        assert_eq!(contours.len(), 1);

        let bb = contours[0].bounding_box().expect("Should have a bounding box");
        assert_eq!(bb, BoundingBox { x: 5, y: 9, width: 8, height: 1 });
        assert_eq!(contours[0].len(), 2, "A straight line should reduce to its endpoints");
    }

    #[test]
    fn region_touching_the_border_is_traced() {
        let mut mask = GrayImage::new(30, 30);
        fill_rect(&mut mask, 0, 0, 30, 5, 255);

        let contours = BorderFollowingTracer.trace(&mask).expect("Should trace");
        assert_eq!(contours.len(), 1);

        let bb = contours[0].bounding_box().expect("Should have a bounding box");
        assert_eq!(bb, BoundingBox { x: 0, y: 0, width: 30, height: 5 });
    }

    #[test]
    fn non_binary_mask_fails() {
        let mut mask = GrayImage::new(8, 8);
        mask.put_pixel(2, 5, Luma([128]));

        let result = BorderFollowingTracer.trace(&mask);
        assert!(matches!(
            result,
            Err(LocatorError::NonBinaryMask { value: 128, x: 2, y: 5 })
        ));
    }
}
