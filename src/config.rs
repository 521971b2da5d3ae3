//! Runtime options. Every field has a serde default so partial JSON documents are accepted.

use crate::foundation::core::PixelSize;
use crate::foundation::error::{SlideShowError, SlideShowResult};

/// Options for the layer compositor.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompositorOpts {
    /// Delay before a request queued behind a busy one is issued.
    pub debounce_ms: u64,
    /// Fetch the following slide once a slide is ready.
    pub prefetch: bool,
    /// Candidate render resolutions, smallest first.
    pub resolutions: Vec<PixelSize>,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            prefetch: true,
            resolutions: vec![
                PixelSize {
                    width: 960,
                    height: 540,
                },
                PixelSize {
                    width: 1280,
                    height: 720,
                },
                PixelSize {
                    width: 1920,
                    height: 1080,
                },
                PixelSize {
                    width: 3840,
                    height: 2160,
                },
            ],
        }
    }
}

/// Options for the animation engine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOpts {
    /// Play slide transitions; when `false` slides switch instantly.
    pub transitions: bool,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self { transitions: true }
    }
}

/// Options for the playback navigator.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigatorOpts {
    /// Honour per-slide auto-advance durations.
    pub auto_advance: bool,
}

impl Default for NavigatorOpts {
    fn default() -> Self {
        Self { auto_advance: true }
    }
}

/// Aggregated options for a [`crate::Presenter`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SlideShowOpts {
    /// Compositor options.
    pub compositor: CompositorOpts,
    /// Animation engine options.
    pub engine: EngineOpts,
    /// Navigator options.
    pub navigator: NavigatorOpts,
}

impl SlideShowOpts {
    /// Parse options from JSON and validate them.
    pub fn from_json_str(s: &str) -> SlideShowResult<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Reject option combinations the engine cannot work with.
    pub fn validate(&self) -> SlideShowResult<()> {
        let res = &self.compositor.resolutions;
        if res.is_empty() {
            return Err(SlideShowError::validation(
                "compositor.resolutions must not be empty",
            ));
        }
        if res.iter().any(|r| r.width == 0 || r.height == 0) {
            return Err(SlideShowError::validation(
                "compositor.resolutions entries must be non-zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
