use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;

use super::controller::SegmentedParallaxController;
use super::spawn::{SegmentNode, SegmentPiece};

/// Requests for every segmented background in the world.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum ParallaxCommand {
    /// Move on from the active segment.
    AdvanceSegment,
    SetSpeed(f32),
    SmoothSetSpeed { target: f32, duration: f32 },
}

/// `N` moves every background on to its next segment.
pub fn advance_on_key(
    keys: Res<ButtonInput<KeyCode>>,
    mut writer: MessageWriter<ParallaxCommand>,
) {
    if keys.just_pressed(KeyCode::KeyN) {
        writer.write(ParallaxCommand::AdvanceSegment);
    }
}

pub fn apply_parallax_commands(
    mut messages: MessageReader<ParallaxCommand>,
    mut controllers: Query<&mut SegmentedParallaxController>,
) {
    for command in messages.read() {
        for mut controller in &mut controllers {
            match *command {
                ParallaxCommand::AdvanceSegment => controller.advance_manually(),
                ParallaxCommand::SetSpeed(speed) => {
                    if controller.is_transitioning() {
                        debug!("Speed transition cancelled by direct set");
                    }
                    controller.set_scroll_speed(speed)
                }
                ParallaxCommand::SmoothSetSpeed { target, duration } => {
                    controller.smooth_set_scroll_speed(target, duration)
                }
            }
        }
        debug!("Applied parallax command {:?}", command);
    }
}

/// Advance every controller by this frame's delta.
pub fn scroll_segments(
    time: Res<Time>,
    mut controllers: Query<(&mut SegmentedParallaxController, &GlobalTransform)>,
) {
    let dt = time.delta_secs();
    for (mut controller, origin) in &mut controllers {
        controller.tick(dt, origin.translation().y);
    }
}

fn visibility(visible: bool) -> Visibility {
    if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// Mirror segment positions and visibility onto their entities.
pub fn sync_segment_nodes(
    controllers: Query<&SegmentedParallaxController>,
    mut nodes: Query<(&SegmentNode, &mut Transform, &mut Visibility)>,
) {
    for (node, mut transform, mut vis) in &mut nodes {
        let Some(segment) = controllers
            .get(node.controller)
            .ok()
            .and_then(|controller| controller.segment(node.index))
        else {
            continue;
        };

        let translation = segment.translation();
        transform.translation.x = translation.x;
        transform.translation.y = translation.y;
        vis.set_if_neq(visibility(segment.is_visible()));
    }
}

/// Hide filler pieces the segment has dropped.
pub fn sync_segment_pieces(
    controllers: Query<&SegmentedParallaxController>,
    nodes: Query<&SegmentNode>,
    mut pieces: Query<(&SegmentPiece, &ChildOf, &mut Visibility)>,
) {
    for (piece, child_of, mut vis) in &mut pieces {
        let Some(segment) = nodes.get(child_of.parent()).ok().and_then(|node| {
            controllers
                .get(node.controller)
                .ok()
                .and_then(|controller| controller.segment(node.index))
        }) else {
            continue;
        };

        let visible = match piece {
            SegmentPiece::Leading => segment.leading_visible(),
            SegmentPiece::Body => true,
            SegmentPiece::Trailing => segment.trailing_visible(),
        };
        vis.set_if_neq(visibility(visible));
    }
}
