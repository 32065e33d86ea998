use image::{GrayImage, RgbImage};

use crate::{
    error::Result,
    types::{Contour, RegionDecision},
};

/// Trait for mask preprocessing stages (threshold, denoise, re-binarize)
pub trait MaskPreprocessor: Send + Sync {
    /// Transform one single-channel image into a new single-channel image
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage>;
}

/// Trait for boundary tracing over a strict 0/255 mask
pub trait ContourTracer: Send + Sync {
    /// Trace the outer boundary of every externally visible foreground region
    fn trace(&self, mask: &GrayImage) -> Result<Vec<Contour>>;
}

/// Trait for accept/reject policies over traced regions
pub trait RegionFilter: Send + Sync {
    /// Tag every contour with a decision, preserving input order
    fn filter(&self, contours: Vec<Contour>) -> Result<Vec<RegionDecision>>;
}

/// Trait for rendering accepted regions onto copies of the source image
pub trait RegionAnnotator: Send + Sync {
    /// Draw each contour filled and outlined on a fresh copy of `base`
    fn render_filled(&self, base: &RgbImage, accepted: &[Contour]) -> Result<RgbImage>;

    /// Draw each contour's bounding rectangle on a fresh copy of `base`
    fn render_bounding_boxes(&self, base: &RgbImage, accepted: &[Contour]) -> Result<RgbImage>;
}
