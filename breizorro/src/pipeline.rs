//! Mask construction pipeline
//!
//! Runs the stages in a fixed order:
//! noise map, threshold, border suppression, then optional dilation and
//! hole filling. Progress is reported through a [`PipelineObserver`]
//! instead of logging from inside the stages.

use breizorro_core::{ConnectivityType, FPix, Mask};
use breizorro_filter::{FilterError, NoiseEstimate, estimate_noise, threshold_mask};
use breizorro_morph::{MorphError, Sel, dilate_iterations, suppress_border};
use breizorro_region::fill_holes;
use thiserror::Error;

/// Errors from a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Rejected option value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A stage produced an array of the wrong shape
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Noise estimation or thresholding failed
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// Morphological post-processing failed
    #[error("morphology error: {0}")]
    Morph(#[from] MorphError),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Options for [`MaskPipeline`]
#[derive(Debug, Clone, PartialEq)]
pub struct MaskOptions {
    /// Detection threshold in units of local noise
    pub threshold: f32,
    /// Side of the square noise window in pixels
    pub boxsize: u32,
    /// Number of dilation passes (0 disables dilation)
    pub dilate: u32,
    /// Structuring element used for dilation
    pub dilate_connectivity: ConnectivityType,
    /// Fill enclosed background regions
    pub fill_holes: bool,
    /// Adjacency used to walk background when filling holes
    pub fill_connectivity: ConnectivityType,
    /// Return the noise map with the mask
    pub keep_noise: bool,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            threshold: 6.5,
            boxsize: 50,
            dilate: 0,
            dilate_connectivity: ConnectivityType::FourWay,
            fill_holes: false,
            fill_connectivity: ConnectivityType::FourWay,
            keep_noise: false,
        }
    }
}

impl MaskOptions {
    /// Set the detection threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the noise window size
    pub fn with_boxsize(mut self, boxsize: u32) -> Self {
        self.boxsize = boxsize;
        self
    }

    /// Set the number of dilation passes
    pub fn with_dilate(mut self, iterations: u32) -> Self {
        self.dilate = iterations;
        self
    }

    /// Set the dilation structuring element
    pub fn with_dilate_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.dilate_connectivity = connectivity;
        self
    }

    /// Enable or disable hole filling
    pub fn with_fill_holes(mut self, fill: bool) -> Self {
        self.fill_holes = fill;
        self
    }

    /// Set the hole filling connectivity
    pub fn with_fill_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.fill_connectivity = connectivity;
        self
    }

    /// Keep the noise map in the output
    pub fn with_keep_noise(mut self, keep: bool) -> Self {
        self.keep_noise = keep;
        self
    }

    /// Check option values before any computation.
    ///
    /// # Errors
    ///
    /// `PipelineError::InvalidParameter` if `threshold` is not a positive
    /// finite number or `boxsize < 2`.
    pub fn validate(&self) -> PipelineResult<()> {
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(PipelineError::InvalidParameter(format!(
                "threshold must be positive, got {}",
                self.threshold
            )));
        }
        if self.boxsize < 2 {
            return Err(PipelineError::InvalidParameter(format!(
                "boxsize must be at least 2, got {}",
                self.boxsize
            )));
        }
        Ok(())
    }
}

/// Progress report from a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// Noise map computed
    NoiseMap { median_noise: f32 },
    /// Raw mask computed
    Threshold { threshold: f32, detected: usize },
    /// Dilation applied
    Dilation { iterations: u32 },
    /// Holes filled
    FillHoles,
    /// Final mask ready
    Done { masked: usize },
}

/// Receiver of [`PipelineEvent`]s
pub trait PipelineObserver {
    /// Called once per event, in pipeline order
    fn on_event(&mut self, event: &PipelineEvent);
}

/// Forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl PipelineObserver for LogObserver {
    fn on_event(&mut self, event: &PipelineEvent) {
        match *event {
            PipelineEvent::NoiseMap { median_noise } => {
                log::info!("Median noise value is {:e}", median_noise);
            }
            PipelineEvent::Threshold {
                threshold,
                detected,
            } => {
                log::info!(
                    "{} pixels above {} times the local noise",
                    detected,
                    threshold
                );
            }
            PipelineEvent::Dilation { iterations } => {
                log::info!("Dilated mask with {} iterations", iterations);
            }
            PipelineEvent::FillHoles => log::info!("Filled closed regions"),
            PipelineEvent::Done { masked } => {
                log::info!("Final mask has {} pixels", masked);
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl PipelineObserver for NullObserver {
    fn on_event(&mut self, _event: &PipelineEvent) {}
}

/// Result of a pipeline run
#[derive(Debug, Clone)]
pub struct MaskOutput {
    /// Final mask
    pub mask: Mask,
    /// Noise map, present when `keep_noise` was set
    pub noise: Option<FPix>,
    /// Median of the floored noise values
    pub median_noise: f32,
}

/// Image-to-mask pipeline with validated options
#[derive(Debug, Clone)]
pub struct MaskPipeline {
    options: MaskOptions,
}

fn ensure_shape(expected: (u32, u32), actual: (u32, u32)) -> PipelineResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(PipelineError::ShapeMismatch { expected, actual })
    }
}

impl MaskPipeline {
    /// Create a pipeline, rejecting invalid options
    pub fn new(options: MaskOptions) -> PipelineResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The options this pipeline runs with
    pub fn options(&self) -> &MaskOptions {
        &self.options
    }

    /// Build the mask for `image`.
    ///
    /// Same as [`MaskPipeline::noise_map`] followed by
    /// [`MaskPipeline::mask_from_noise`]. The image is not modified.
    /// Running twice on the same image gives identical output.
    pub fn run(
        &self,
        image: &FPix,
        observer: &mut dyn PipelineObserver,
    ) -> PipelineResult<MaskOutput> {
        let estimate = self.noise_map(image, observer)?;
        let mask = self.mask_from_noise(image, &estimate, observer)?;
        let NoiseEstimate {
            noise,
            median_noise,
        } = estimate;

        Ok(MaskOutput {
            mask,
            noise: self.options.keep_noise.then_some(noise),
            median_noise,
        })
    }

    /// First stage: the local noise map of `image`.
    pub fn noise_map(
        &self,
        image: &FPix,
        observer: &mut dyn PipelineObserver,
    ) -> PipelineResult<NoiseEstimate> {
        let estimate = estimate_noise(image, self.options.boxsize)?;
        ensure_shape(image.dimensions(), estimate.noise.dimensions())?;
        observer.on_event(&PipelineEvent::NoiseMap {
            median_noise: estimate.median_noise,
        });
        Ok(estimate)
    }

    /// Remaining stages: threshold, border suppression, dilation and hole
    /// filling against a noise map from [`MaskPipeline::noise_map`].
    pub fn mask_from_noise(
        &self,
        image: &FPix,
        estimate: &NoiseEstimate,
        observer: &mut dyn PipelineObserver,
    ) -> PipelineResult<Mask> {
        let opts = &self.options;
        let shape = image.dimensions();
        ensure_shape(shape, estimate.noise.dimensions())?;

        let mut mask = threshold_mask(image, &estimate.noise, opts.threshold)?;
        observer.on_event(&PipelineEvent::Threshold {
            threshold: opts.threshold,
            detected: mask.count(),
        });

        suppress_border(&mut mask);

        if opts.dilate > 0 {
            let sel = Sel::for_connectivity(opts.dilate_connectivity);
            mask = dilate_iterations(&mask, &sel, opts.dilate)?;
            observer.on_event(&PipelineEvent::Dilation {
                iterations: opts.dilate,
            });
        }

        if opts.fill_holes {
            mask = fill_holes(&mask, opts.fill_connectivity);
            observer.on_event(&PipelineEvent::FillHoles);
        }

        ensure_shape(shape, mask.dimensions())?;
        observer.on_event(&PipelineEvent::Done {
            masked: mask.count(),
        });
        Ok(mask)
    }
}
