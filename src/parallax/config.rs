use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// Which way the background travels across the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum ScrollDirection {
    #[default]
    Down,
    Up,
}

impl ScrollDirection {
    /// Sign applied to every movement, boundary and offset.
    ///
    /// `Down` is the reference orientation (+1); `Up` mirrors it (-1).
    pub fn sign(self) -> f32 {
        match self {
            ScrollDirection::Down => 1.0,
            ScrollDirection::Up => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum SegmentKind {
    /// Holds its position unless allowed to scroll past.
    Static,
    /// Wraps back by its own height indefinitely.
    #[default]
    Loopable,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentDef {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub kind: SegmentKind,
    /// Only meaningful for `Static` segments.
    #[serde(default)]
    pub scroll_past: bool,
    /// Overrides the rendered size of every piece instead of using the image size.
    #[serde(default)]
    pub size: Option<[f32; 2]>,
}

/// Authoring-time description of a segmented background.
///
/// This is an immutable snapshot: the runtime controller is built from it and
/// never edits it back.
#[derive(Resource, Debug, Clone)]
pub struct SegmentedParallaxDef {
    pub scroll_speed: f32,
    pub direction: ScrollDirection,
    pub z_order: f32,
    pub segments: Vec<SegmentDef>,
}

#[derive(Debug, Error, PartialEq)]
pub enum SegmentConfigError {
    #[error("scroll speed must be finite and non-negative, got {0}")]
    InvalidScrollSpeed(f32),
    #[error("segment '{segment}' has no image")]
    EmptyImage { segment: String },
    #[error("segment '{segment}' is loopable and cannot scroll past")]
    ScrollPastOnLoopable { segment: String },
    #[error("segment '{segment}' has no repeatable body")]
    MissingBody { segment: String },
    #[error("segment '{segment}' has invalid bounds height {height}")]
    InvalidBoundsHeight { segment: String, height: f32 },
    #[error("expected {expected} bounds heights, got {found}")]
    BoundsCountMismatch { expected: usize, found: usize },
}

impl SegmentedParallaxDef {
    pub fn validate(&self) -> Result<(), SegmentConfigError> {
        if !self.scroll_speed.is_finite() || self.scroll_speed < 0.0 {
            return Err(SegmentConfigError::InvalidScrollSpeed(self.scroll_speed));
        }
        for segment in &self.segments {
            if segment.image.trim().is_empty() {
                return Err(SegmentConfigError::EmptyImage {
                    segment: segment.name.clone(),
                });
            }
            if segment.kind == SegmentKind::Loopable && segment.scroll_past {
                return Err(SegmentConfigError::ScrollPastOnLoopable {
                    segment: segment.name.clone(),
                });
            }
        }
        Ok(())
    }
}
