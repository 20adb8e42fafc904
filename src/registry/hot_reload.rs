//! Hot-reload systems for registry assets.

use bevy::asset::AssetEvent;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::RegistryHandles;
use super::assets::SegmentedParallaxAsset;
use crate::parallax::config::SegmentedParallaxDef;

pub(crate) fn hot_reload_background(
    mut events: MessageReader<AssetEvent<SegmentedParallaxAsset>>,
    handles: Res<RegistryHandles>,
    assets: Res<Assets<SegmentedParallaxAsset>>,
    mut def: ResMut<SegmentedParallaxDef>,
) {
    for event in events.read() {
        if let AssetEvent::Modified { id } = event
            && *id == handles.background.id()
            && let Some(asset) = assets.get(&handles.background)
        {
            *def = asset.to_def();
            info!(
                "Hot-reloaded background definition ({} segments)",
                def.segments.len()
            );
        }
    }
}
