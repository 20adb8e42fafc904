pub mod assets;
pub(crate) mod hot_reload;
pub mod loader;
pub(crate) mod loading;

use bevy::prelude::*;

use assets::SegmentedParallaxAsset;
use loader::RonLoader;

/// Application state: Loading waits for assets, InGame runs the background.
#[derive(States, Default, Debug, Clone, Eq, PartialEq, Hash)]
pub enum AppState {
    #[default]
    Loading,
    InGame,
}

/// Keeps loaded asset handles alive for hot-reload detection.
#[derive(Resource)]
pub(crate) struct RegistryHandles {
    pub(crate) background: Handle<SegmentedParallaxAsset>,
}

pub struct RegistryPlugin;

impl Plugin for RegistryPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .init_asset::<SegmentedParallaxAsset>()
            .register_asset_loader(RonLoader::<SegmentedParallaxAsset>::new(&["segments.ron"]))
            .add_systems(Startup, loading::start_loading)
            .add_systems(
                Update,
                loading::check_loading.run_if(in_state(AppState::Loading)),
            )
            .add_systems(
                Update,
                hot_reload::hot_reload_background.run_if(in_state(AppState::InGame)),
            );
    }
}
