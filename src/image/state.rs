use serde::Serialize;

use crate::error::{FusionError, FusionResult};
use crate::image::acquire::{ImageResult, ImageSource};

/// Where one generation cycle stands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ImagePhase {
    Idle,
    RequestingPrimary,
    RequestingFallback { reason: String },
    Ready { image: ImageResult },
    Failed { message: String },
}

impl ImagePhase {
    pub fn label(&self) -> &'static str {
        match self {
            ImagePhase::Idle => "idle",
            ImagePhase::RequestingPrimary => "requesting primary image",
            ImagePhase::RequestingFallback { .. } => "requesting fallback image",
            ImagePhase::Ready { .. } => "ready",
            ImagePhase::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageCycle {
    phase: ImagePhase,
}

impl Default for ImageCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCycle {
    pub fn new() -> Self {
        Self { phase: ImagePhase::Idle }
    }

    pub fn phase(&self) -> &ImagePhase {
        &self.phase
    }

    pub fn image(&self) -> Option<&ImageResult> {
        match &self.phase {
            ImagePhase::Ready { image } => Some(image),
            _ => None,
        }
    }

    /// Drops whatever the previous cycle left behind.
    pub fn reset(&mut self) {
        self.phase = ImagePhase::Idle;
    }

    pub fn begin(&mut self) -> FusionResult<()> {
        match self.phase {
            ImagePhase::Idle => {
                self.phase = ImagePhase::RequestingPrimary;
                Ok(())
            }
            _ => Err(self.invalid("begin a request")),
        }
    }

    pub fn primary_succeeded(&mut self, image: ImageResult) -> FusionResult<()> {
        match self.phase {
            ImagePhase::RequestingPrimary => {
                self.phase = ImagePhase::Ready { image };
                Ok(())
            }
            _ => Err(self.invalid("accept a primary image")),
        }
    }

    pub fn primary_failed(&mut self, reason: impl Into<String>) -> FusionResult<()> {
        match self.phase {
            ImagePhase::RequestingPrimary => {
                self.phase = ImagePhase::RequestingFallback { reason: reason.into() };
                Ok(())
            }
            _ => Err(self.invalid("fall back")),
        }
    }

    pub fn fallback_ready(&mut self, image: ImageResult) -> FusionResult<()> {
        match self.phase {
            ImagePhase::RequestingFallback { .. } => {
                self.phase = ImagePhase::Ready { image };
                Ok(())
            }
            _ => Err(self.invalid("accept a fallback image")),
        }
    }

    /// The display layer could not load the ready image.
    ///
    /// A primary image gets the cycle's one fallback attempt (`Ok`, now
    /// `RequestingFallback`). A fallback image ends the cycle in `Failed` and
    /// returns `ImageTotalFailure`.
    pub fn load_failed(&mut self, reason: impl Into<String>) -> FusionResult<()> {
        let reason = reason.into();
        let source = match &self.phase {
            ImagePhase::Ready { image } => image.source,
            _ => return Err(self.invalid("report a load error")),
        };

        match source {
            ImageSource::Primary => {
                self.phase = ImagePhase::RequestingFallback { reason };
                Ok(())
            }
            ImageSource::Fallback => {
                self.phase = ImagePhase::Failed { message: reason.clone() };
                Err(FusionError::ImageTotalFailure(reason))
            }
        }
    }

    fn invalid(&self, event: &'static str) -> FusionError {
        FusionError::InvalidTransition {
            from: self.phase.label().to_string(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(source: ImageSource) -> ImageResult {
        ImageResult {
            url: "https://img.example/1".to_string(),
            source,
            seed: 1,
            prompt: "miso".to_string(),
            primary_error: None,
        }
    }

    #[test]
    fn test_primary_path() {
        let mut cycle = ImageCycle::new();
        assert_eq!(cycle.phase(), &ImagePhase::Idle);
        cycle.begin().unwrap();
        assert_eq!(cycle.phase(), &ImagePhase::RequestingPrimary);
        cycle.primary_succeeded(image(ImageSource::Primary)).unwrap();
        assert_eq!(cycle.image().map(|i| i.source), Some(ImageSource::Primary));
        assert_eq!(cycle.phase().label(), "ready");
    }

    #[test]
    fn test_fallback_path() {
        let mut cycle = ImageCycle::new();
        cycle.begin().unwrap();
        cycle.primary_failed("timeout").unwrap();
        assert_eq!(cycle.phase(), &ImagePhase::RequestingFallback { reason: "timeout".to_string() });
        cycle.fallback_ready(image(ImageSource::Fallback)).unwrap();
        assert_eq!(cycle.phase().label(), "ready");
    }

    #[test]
    fn test_fallback_load_error_is_total_failure() {
        let mut cycle = ImageCycle::new();
        cycle.begin().unwrap();
        cycle.primary_failed("500").unwrap();
        cycle.fallback_ready(image(ImageSource::Fallback)).unwrap();

        let err = cycle.load_failed("404 from fallback").unwrap_err();
        assert!(matches!(err, FusionError::ImageTotalFailure(_)));
        assert_eq!(cycle.phase(), &ImagePhase::Failed { message: "404 from fallback".to_string() });

        // No automatic retry out of Failed.
        assert!(cycle.load_failed("again").is_err());
        assert!(cycle.fallback_ready(image(ImageSource::Fallback)).is_err());
    }

    #[test]
    fn test_primary_load_error_takes_the_fallback_step() {
        let mut cycle = ImageCycle::new();
        cycle.begin().unwrap();
        cycle.primary_succeeded(image(ImageSource::Primary)).unwrap();
        cycle.load_failed("expired link").unwrap();
        assert!(matches!(cycle.phase(), ImagePhase::RequestingFallback { .. }));
        cycle.fallback_ready(image(ImageSource::Fallback)).unwrap();
        assert!(matches!(cycle.load_failed("dead"), Err(FusionError::ImageTotalFailure(_))));
    }

    #[test]
    fn test_invalid_transitions() {
        let mut cycle = ImageCycle::new();
        assert!(matches!(
            cycle.primary_succeeded(image(ImageSource::Primary)),
            Err(FusionError::InvalidTransition { .. })
        ));
        cycle.begin().unwrap();
        let err = cycle.begin().unwrap_err();
        assert_eq!(err.to_string(), "Cannot begin a request while requesting primary image");
        assert!(cycle.fallback_ready(image(ImageSource::Fallback)).is_err());
    }

    #[test]
    fn test_reset_starts_a_new_cycle() {
        let mut cycle = ImageCycle::new();
        cycle.begin().unwrap();
        cycle.primary_failed("x").unwrap();
        cycle.reset();
        assert_eq!(cycle.phase(), &ImagePhase::Idle);
        assert!(cycle.begin().is_ok());
    }

    #[test]
    fn test_phase_serializes_with_tag() {
        let json = serde_json::to_value(ImagePhase::Failed { message: "gone".to_string() }).unwrap();
        assert_eq!(json["phase"], "failed");
        assert_eq!(json["message"], "gone");
    }
}
