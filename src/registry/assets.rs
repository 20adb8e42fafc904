use bevy::prelude::*;
use bevy::reflect::TypePath;
use serde::Deserialize;

use super::loader::ValidatedAsset;
use crate::parallax::config::{
    ScrollDirection, SegmentConfigError, SegmentDef, SegmentedParallaxDef,
};

/// Asset loaded from *.segments.ron
#[derive(Asset, TypePath, Debug, Deserialize)]
pub struct SegmentedParallaxAsset {
    pub scroll_speed: f32,
    #[serde(default)]
    pub direction: ScrollDirection,
    #[serde(default)]
    pub z_order: f32,
    pub segments: Vec<SegmentDef>,
}

impl SegmentedParallaxAsset {
    pub fn to_def(&self) -> SegmentedParallaxDef {
        SegmentedParallaxDef {
            scroll_speed: self.scroll_speed,
            direction: self.direction,
            z_order: self.z_order,
            segments: self.segments.clone(),
        }
    }
}

impl ValidatedAsset for SegmentedParallaxAsset {
    fn validate(&self) -> Result<(), SegmentConfigError> {
        self.to_def().validate()
    }
}
