pub mod builder;

use image::{GrayImage, RgbImage};
use tracing::debug;

use crate::{
    config::OverlayKind,
    error::Result,
    traits::{ContourTracer, MaskPreprocessor, RegionAnnotator, RegionFilter},
    types::{Contour, RegionDecision},
};

/// Everything one pipeline run produces. An empty region set is a valid
/// outcome; the overlays then equal unmodified copies of the source image.
#[derive(Debug, Clone)]
pub struct LocatedParts {
    /// The strict 0/255 mask the contours were traced from
    pub mask: GrayImage,
    /// One decision per traced region, in tracing order
    pub regions: Vec<RegionDecision>,
    /// Accepted regions filled and outlined on a copy of the source
    pub filled_overlay: RgbImage,
    /// Accepted bounding rectangles on a separate copy of the source
    pub box_overlay: RgbImage,
    pub image_width: u32,
    pub image_height: u32,
}

impl LocatedParts {
    /// Regions that passed the size filter, in tracing order.
    pub fn accepted(&self) -> impl Iterator<Item = &RegionDecision> {
        self.regions.iter().filter(|decision| decision.accepted)
    }

    pub fn overlay(&self, kind: OverlayKind) -> &RgbImage {
        match kind {
            OverlayKind::Filled => &self.filled_overlay,
            OverlayKind::BoundingBoxes => &self.box_overlay,
        }
    }
}

/// The part localization pipeline: grayscale conversion, mask preprocessing,
/// contour tracing, size filtering and annotation. Every stage consumes its
/// whole input and returns a freshly owned buffer; no state survives a run.
pub struct Pipeline {
    preprocessors: Vec<Box<dyn MaskPreprocessor>>,
    tracer: Box<dyn ContourTracer>,
    filter: Box<dyn RegionFilter>,
    annotator: Box<dyn RegionAnnotator>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    pub fn new(
        preprocessors: Vec<Box<dyn MaskPreprocessor>>,
        tracer: Box<dyn ContourTracer>,
        filter: Box<dyn RegionFilter>,
        annotator: Box<dyn RegionAnnotator>,
    ) -> Self {
        Self { preprocessors, tracer, filter, annotator }
    }

    /// Run the full pipeline over a photographed board image.
    pub fn process(&self, image: &RgbImage) -> Result<LocatedParts> {
        let mut mask: GrayImage = image::imageops::grayscale(image);
        for preprocessor in &self.preprocessors {
            mask = preprocessor.preprocess(&mask)?;
        }

        let contours = self.tracer.trace(&mask)?;
        debug!(count = contours.len(), "traced external contours");

        let regions = self.filter.filter(contours)?;
        let accepted: Vec<Contour> = regions
            .iter()
            .filter(|decision| decision.accepted)
            .map(|decision| decision.contour.clone())
            .collect();
        debug!(accepted = accepted.len(), total = regions.len(), "applied size filter");

        let filled_overlay = self.annotator.render_filled(image, &accepted)?;
        let box_overlay = self.annotator.render_bounding_boxes(image, &accepted)?;

        Ok(LocatedParts {
            mask,
            regions,
            filled_overlay,
            box_overlay,
            image_width: image.width(),
            image_height: image.height(),
        })
    }
}
