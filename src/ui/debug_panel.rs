use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::parallax::controller::SegmentedParallaxController;
use crate::parallax::scroll::ParallaxCommand;
use crate::parallax::segment::SegmentState;

const SMOOTH_DURATION: f32 = 1.0;
/// Speeds are non-negative; the boundary rules only run along the direction sign.
const MAX_SPEED: f32 = 500.0;

/// Tracks debug panel visibility and the speed typed into it.
#[derive(Resource)]
pub struct DebugUiState {
    pub visible: bool,
    pub target_speed: f32,
}

impl Default for DebugUiState {
    fn default() -> Self {
        Self {
            visible: false,
            target_speed: 100.0,
        }
    }
}

/// Toggles debug panel visibility on F3 press.
pub fn toggle_debug_panel(keyboard: Res<ButtonInput<KeyCode>>, mut state: ResMut<DebugUiState>) {
    if keyboard.just_pressed(KeyCode::F3) {
        state.visible = !state.visible;
    }
}

fn state_color(state: SegmentState) -> egui::Color32 {
    match state {
        SegmentState::Idle => egui::Color32::GRAY,
        SegmentState::Scrolling => egui::Color32::LIGHT_GREEN,
        SegmentState::PendingDeactivation => egui::Color32::YELLOW,
        SegmentState::Deactivated => egui::Color32::LIGHT_RED,
    }
}

/// Draws the segment inspector with controls for speed and hand-off.
pub fn draw_debug_panel(
    mut contexts: EguiContexts,
    mut state: ResMut<DebugUiState>,
    diagnostics: Res<DiagnosticsStore>,
    controllers: Query<(Entity, &SegmentedParallaxController)>,
    mut writer: MessageWriter<ParallaxCommand>,
) -> Result {
    if !state.visible {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;

    let panel_frame = egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 30, 200))
        .inner_margin(egui::Margin::same(8))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(60)));

    egui::SidePanel::right("debug_panel")
        .default_width(300.0)
        .resizable(false)
        .frame(panel_frame)
        .show(ctx, |ui| {
            ui.heading("Segmented Parallax");
            let fps_text = diagnostics
                .get(&FrameTimeDiagnosticsPlugin::FPS)
                .and_then(|d| d.smoothed())
                .map(|v| format!("{v:.1}"))
                .unwrap_or_else(|| "...".to_string());
            ui.label(format!("FPS: {fps_text}"));
            ui.separator();

            // --- Controls ---
            ui.horizontal(|ui| {
                ui.label("Speed:");
                ui.add(egui::Slider::new(&mut state.target_speed, 0.0..=MAX_SPEED));
            });
            ui.horizontal(|ui| {
                if ui.button("Set").clicked() {
                    writer.write(ParallaxCommand::SetSpeed(state.target_speed));
                }
                if ui.button("Smooth set").clicked() {
                    writer.write(ParallaxCommand::SmoothSetSpeed {
                        target: state.target_speed,
                        duration: SMOOTH_DURATION,
                    });
                }
            });
            if ui.button("Move to Next Segment").clicked() {
                writer.write(ParallaxCommand::AdvanceSegment);
            }
            ui.separator();

            // --- Controllers ---
            for (entity, controller) in &controllers {
                egui::CollapsingHeader::new(
                    egui::RichText::new(format!("Background {entity}")).strong(),
                )
                .default_open(true)
                .show(ui, |ui| {
                    egui::Grid::new(format!("controller_{entity}"))
                        .num_columns(2)
                        .spacing([20.0, 4.0])
                        .show(ui, |ui| {
                            ui.label("Direction:");
                            ui.monospace(format!("{:?}", controller.direction()));
                            ui.end_row();

                            ui.label("Speed:");
                            ui.monospace(format!("{:.1}", controller.scroll_speed()));
                            ui.end_row();

                            ui.label("Transition:");
                            match controller.speed().transition() {
                                Some(t) => ui.monospace(format!(
                                    "{:.1} → {:.1} ({:.0}%)",
                                    t.from,
                                    t.to,
                                    t.progress() * 100.0
                                )),
                                _ => ui.label("none"),
                            };
                            ui.end_row();

                            ui.label("Active:");
                            match controller.active_segment() {
                                Some(segment) => ui.monospace(format!(
                                    "{} / {} ({})",
                                    controller.active_index() + 1,
                                    controller.segments().len(),
                                    segment.name()
                                )),
                                None => {
                                    ui.colored_label(egui::Color32::DARK_GRAY, "(exhausted)")
                                }
                            };
                            ui.end_row();
                        });

                    ui.separator();
                    egui::Grid::new(format!("segments_{entity}"))
                        .num_columns(4)
                        .spacing([12.0, 4.0])
                        .show(ui, |ui| {
                            for (index, segment) in controller.segments().iter().enumerate() {
                                let name = if index == controller.active_index() {
                                    egui::RichText::new(segment.name()).strong()
                                } else {
                                    egui::RichText::new(segment.name())
                                };
                                ui.label(name);
                                ui.monospace(format!("{:?}", segment.kind()));
                                ui.colored_label(
                                    state_color(segment.state()),
                                    format!("{:?}", segment.state()),
                                );
                                ui.monospace(format!("{:.1}", segment.translation().y));
                                ui.end_row();
                            }
                        });
                });
            }
        });

    Ok(())
}
