//! Asset loading pipeline: background definition → InGame.

use bevy::asset::LoadState;
use bevy::prelude::*;

use super::assets::SegmentedParallaxAsset;
use super::{AppState, RegistryHandles};

pub(crate) const BACKGROUND_PATH: &str = "data/background.segments.ron";

/// Handles for assets being loaded.
#[derive(Resource)]
pub(crate) struct LoadingAssets {
    background: Handle<SegmentedParallaxAsset>,
    failed: bool,
}

pub(crate) fn start_loading(mut commands: Commands, asset_server: Res<AssetServer>) {
    let background = asset_server.load::<SegmentedParallaxAsset>(BACKGROUND_PATH);
    commands.insert_resource(LoadingAssets {
        background,
        failed: false,
    });
}

pub(crate) fn check_loading(
    mut commands: Commands,
    mut loading: ResMut<LoadingAssets>,
    asset_server: Res<AssetServer>,
    background_assets: Res<Assets<SegmentedParallaxAsset>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    // The resource stays in place so the app idles in Loading after a failure.
    if let LoadState::Failed(err) = asset_server.load_state(&loading.background) {
        if !loading.failed {
            error!("Failed to load {BACKGROUND_PATH}: {err}");
            loading.failed = true;
        }
        return;
    }

    let Some(background) = background_assets.get(&loading.background) else {
        return; // not loaded yet
    };

    commands.insert_resource(background.to_def());

    // Keep handles alive for hot-reload
    commands.insert_resource(RegistryHandles {
        background: loading.background.clone(),
    });

    commands.remove_resource::<LoadingAssets>();
    next_state.set(AppState::InGame);
    info!(
        "Background definition loaded ({} segments), entering InGame state",
        background.segments.len()
    );
}
