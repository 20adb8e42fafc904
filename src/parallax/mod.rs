pub mod config;
pub mod controller;
pub mod scroll;
pub mod segment;
pub mod spawn;
pub mod speed;

use bevy::prelude::*;

use crate::registry::AppState;
use crate::sets::GameSet;

use config::SegmentedParallaxDef;
use scroll::ParallaxCommand;

pub struct ParallaxPlugin;

impl Plugin for ParallaxPlugin {
    fn build(&self, app: &mut App) {
        add_segment_pipeline(app);
        app.add_systems(OnEnter(AppState::InGame), spawn::spawn_background)
            .add_systems(
                Update,
                (
                    scroll::advance_on_key.in_set(GameSet::Input),
                    spawn::respawn_on_definition_change
                        .before(spawn::resolve_segment_bounds)
                        .in_set(GameSet::Parallax),
                )
                    .run_if(in_state(AppState::InGame))
                    .run_if(resource_exists::<SegmentedParallaxDef>),
            );
    }
}

/// Per-frame segment systems: measure, apply requests, scroll, then mirror
/// the result onto entities.
pub(crate) fn add_segment_pipeline(app: &mut App) {
    app.add_message::<ParallaxCommand>().add_systems(
        Update,
        (
            spawn::resolve_segment_bounds,
            scroll::apply_parallax_commands,
            scroll::scroll_segments,
            scroll::sync_segment_nodes,
            scroll::sync_segment_pieces,
        )
            .chain()
            .in_set(GameSet::Parallax),
    );
}
