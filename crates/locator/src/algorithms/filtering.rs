use crate::{
    error::{LocatorError, Result},
    traits::RegionFilter,
    types::{Contour, RegionDecision},
};

/// Hard accept/reject cutoff on bounding-box side lengths. Both bounds are
/// inclusive; there is no scoring or ranking.
#[derive(Debug, Clone)]
pub struct SizeBandFilter {
    pub min_side: u32,
    pub max_side: u32,
}

impl Default for SizeBandFilter {
    fn default() -> Self {
        Self { min_side: 20, max_side: 100 }
    }
}

impl SizeBandFilter {
    fn side_in_band(&self, side: u32) -> bool {
        side >= self.min_side && side <= self.max_side
    }
}

impl RegionFilter for SizeBandFilter {
    fn filter(&self, contours: Vec<Contour>) -> Result<Vec<RegionDecision>> {
        if self.min_side > self.max_side {
            return Err(LocatorError::InvalidSizeBounds {
                min_side: self.min_side,
                max_side: self.max_side,
            });
        }

        let decisions = contours
            .into_iter()
            .map(|contour| {
                let bounding_box = contour.bounding_box().unwrap_or_default();
                let accepted = !contour.is_empty()
                    && self.side_in_band(bounding_box.width)
                    && self.side_in_band(bounding_box.height);
                RegionDecision { contour, bounding_box, accepted }
            })
            .collect();
        Ok(decisions)
    }
}
