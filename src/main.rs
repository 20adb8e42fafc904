mod parallax;
mod registry;
mod sets;
mod ui;

#[cfg(test)]
mod test_helpers;

use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use sets::GameSet;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(ImagePlugin::default_nearest())
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Segmax".into(),
                        resolution: (720, 1280).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .configure_sets(
            Update,
            (GameSet::Input, GameSet::Parallax, GameSet::Ui).chain(),
        )
        .add_plugins(registry::RegistryPlugin)
        .add_plugins(parallax::ParallaxPlugin)
        .add_plugins(ui::UiPlugin)
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}
