use image::Rgb;

use crate::{
    algorithms::{
        BinaryThresholder, BorderFollowingTracer, MedianDenoiser, OverlayAnnotator, RangeMasker,
        SizeBandFilter,
    },
    config::LocatorConfig,
    error::Result,
    pipeline::Pipeline,
    traits::{ContourTracer, MaskPreprocessor, RegionAnnotator, RegionFilter},
};

/// Builder for localization pipelines with a fluent API
pub struct PipelineBuilder {
    preprocessors: Vec<Box<dyn MaskPreprocessor>>,
    tracer: Option<Box<dyn ContourTracer>>,
    filter: Option<Box<dyn RegionFilter>>,
    annotator: Option<Box<dyn RegionAnnotator>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            preprocessors: Vec::new(),
            tracer: None,
            filter: None,
            annotator: None,
        }
    }

    /// Append a preprocessing stage; stages run in insertion order
    pub fn add_preprocessor<P>(mut self, preprocessor: P) -> Self
    where
        P: MaskPreprocessor + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    /// Set the contour tracer (replaces any existing one)
    pub fn set_tracer<T>(mut self, tracer: T) -> Self
    where
        T: ContourTracer + 'static,
    {
        self.tracer = Some(Box::new(tracer));
        self
    }

    /// Set the region filter (replaces any existing one)
    pub fn set_filter<F>(mut self, filter: F) -> Self
    where
        F: RegionFilter + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Set the annotator (replaces any existing one)
    pub fn set_annotator<A>(mut self, annotator: A) -> Self
    where
        A: RegionAnnotator + 'static,
    {
        self.annotator = Some(Box::new(annotator));
        self
    }

    /// Build the pipeline with default components where none were given
    pub fn build(self) -> Pipeline {
        let tracer = self.tracer.unwrap_or_else(|| Box::new(BorderFollowingTracer));
        let filter = self.filter.unwrap_or_else(|| Box::new(SizeBandFilter::default()));
        let annotator = self
            .annotator
            .unwrap_or_else(|| Box::new(OverlayAnnotator::default()));

        Pipeline::new(self.preprocessors, tracer, filter, annotator)
    }

    /// Assemble the reference chain for a parameter set, validating it first.
    pub fn from_config(config: &LocatorConfig) -> Result<Pipeline> {
        config.validate()?;
        Ok(Self::new()
            .add_preprocessor(BinaryThresholder { level: config.threshold_level })
            .add_preprocessor(MedianDenoiser { kernel_size: config.denoise_kernel_size })
            .add_preprocessor(RangeMasker { low: config.range_low, high: config.range_high })
            .set_tracer(BorderFollowingTracer)
            .set_filter(SizeBandFilter { min_side: config.min_side, max_side: config.max_side })
            .set_annotator(OverlayAnnotator {
                fill_color: Rgb(config.fill_color),
                box_color: Rgb(config.box_color),
                box_thickness: config.box_thickness,
            })
            .build())
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
