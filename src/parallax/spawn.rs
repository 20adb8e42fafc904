use bevy::asset::LoadState;
use bevy::prelude::*;

use super::config::{SegmentKind, SegmentedParallaxDef};
use super::controller::SegmentedParallaxController;

/// Local z step between consecutive segments; later segments draw on top.
pub(crate) const SEGMENT_Z_STEP: f32 = 0.01;

/// Root of a segmented background whose body sizes are not known yet.
///
/// Replaced by a `SegmentedParallaxController` once every body image is loaded.
#[derive(Component, Debug)]
pub struct PendingSegmentedParallax {
    pub def: SegmentedParallaxDef,
}

/// Lookup handle from a segment entity back to its controller.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentNode {
    pub controller: Entity,
    pub index: usize,
}

/// One of the three visual pieces under a segment entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentPiece {
    Leading,
    Body,
    Trailing,
}

/// Spawn the entity hierarchy for a background definition.
///
/// `load_image` resolves an image path to a handle; in the game this is the
/// asset server.
pub fn spawn_segmented_parallax(
    commands: &mut Commands,
    def: &SegmentedParallaxDef,
    mut load_image: impl FnMut(&str) -> Handle<Image>,
) -> Entity {
    let root = commands
        .spawn((
            Name::new("Segmented Parallax"),
            PendingSegmentedParallax { def: def.clone() },
            Transform::from_xyz(0.0, 0.0, def.z_order),
            Visibility::default(),
        ))
        .id();

    for (index, segment_def) in def.segments.iter().enumerate() {
        let image = load_image(&segment_def.image);
        // Hidden until the controller takes over and enables it.
        let node = commands
            .spawn((
                Name::new(segment_def.name.clone()),
                SegmentNode {
                    controller: root,
                    index,
                },
                Transform::from_xyz(0.0, 0.0, index as f32 * SEGMENT_Z_STEP),
                Visibility::Hidden,
                ChildOf(root),
            ))
            .id();

        let pieces: &[SegmentPiece] = match segment_def.kind {
            SegmentKind::Loopable => &[
                SegmentPiece::Leading,
                SegmentPiece::Body,
                SegmentPiece::Trailing,
            ],
            SegmentKind::Static => &[SegmentPiece::Body],
        };
        for &piece in pieces {
            commands.spawn((
                piece,
                Sprite {
                    image: image.clone(),
                    custom_size: segment_def.size.map(Vec2::from_array),
                    ..default()
                },
                Transform::default(),
                ChildOf(node),
            ));
        }
    }

    info!(
        "Spawned segmented parallax with {} segments",
        def.segments.len()
    );
    root
}

/// Spawn the loaded background when gameplay starts.
pub fn spawn_background(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    def: Res<SegmentedParallaxDef>,
) {
    spawn_segmented_parallax(&mut commands, &def, |path| asset_server.load(path.to_owned()));
}

/// Rebuild the background from scratch when its definition is hot-reloaded.
#[allow(clippy::type_complexity)]
pub fn respawn_on_definition_change(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    def: Res<SegmentedParallaxDef>,
    roots: Query<
        Entity,
        Or<(
            With<PendingSegmentedParallax>,
            With<SegmentedParallaxController>,
        )>,
    >,
) {
    if !def.is_changed() || def.is_added() {
        return;
    }

    for root in &roots {
        commands.entity(root).despawn();
    }
    spawn_segmented_parallax(&mut commands, &def, |path| asset_server.load(path.to_owned()));
    info!("Respawned segmented parallax after definition change");
}

fn entities(children: Option<&Children>) -> &[Entity] {
    match children {
        Some(children) => children,
        None => &[],
    }
}

/// Rendered height of a piece, or `None` while its image is still loading.
fn rendered_height(sprite: &Sprite, transform: &Transform, images: &Assets<Image>) -> Option<f32> {
    let size = match sprite.custom_size {
        Some(size) => size,
        None => images.get(&sprite.image)?.size_f32(),
    };
    Some(size.y * transform.scale.y.abs())
}

/// Measure every segment body once and hand the background to its controller.
///
/// Waits until all body images are available. A segment without a body, or an
/// image that failed to load, is a configuration error: the background is
/// dropped and never scrolls.
pub fn resolve_segment_bounds(
    mut commands: Commands,
    images: Res<Assets<Image>>,
    asset_server: Option<Res<AssetServer>>,
    pending: Query<(Entity, &PendingSegmentedParallax, Option<&Children>)>,
    nodes: Query<(&SegmentNode, &Children)>,
    mut pieces: Query<(&SegmentPiece, &Sprite, &mut Transform)>,
) {
    for (root, pending, children) in &pending {
        let def = &pending.def;
        let mut heights: Vec<Option<f32>> = vec![None; def.segments.len()];
        let mut waiting = false;
        let mut failed = false;

        for (node, node_children) in entities(children)
            .iter()
            .filter_map(|child| nodes.get(*child).ok())
        {
            let body = entities(Some(node_children)).iter().find_map(|piece_entity| {
                pieces
                    .get(*piece_entity)
                    .ok()
                    .filter(|(piece, _, _)| **piece == SegmentPiece::Body)
            });
            let Some((_, sprite, transform)) = body else {
                continue;
            };

            match rendered_height(sprite, transform, &images) {
                Some(height) => heights[node.index] = Some(height),
                None => {
                    if let Some(server) = &asset_server
                        && matches!(server.load_state(&sprite.image), LoadState::Failed(_))
                    {
                        failed = true;
                    }
                    waiting = true;
                }
            }
        }

        if failed {
            error!("Segmented parallax image failed to load, background disabled");
            commands.entity(root).despawn();
            continue;
        }
        if waiting {
            continue; // images not loaded yet
        }

        let controller = match SegmentedParallaxController::from_def(def, &heights) {
            Ok(controller) => controller,
            Err(err) => {
                error!("Invalid segmented parallax: {err}");
                commands.entity(root).despawn();
                continue;
            }
        };

        // Leading filler sits where the next segment will be handed off to.
        let sign = controller.direction().sign();
        for (node, node_children) in entities(children)
            .iter()
            .filter_map(|child| nodes.get(*child).ok())
        {
            let height = controller.segments()[node.index].bounds_height();
            for piece_entity in entities(Some(node_children)) {
                let Ok((piece, _, mut transform)) = pieces.get_mut(*piece_entity) else {
                    continue;
                };
                transform.translation.y = match piece {
                    SegmentPiece::Leading => sign * height,
                    SegmentPiece::Body => 0.0,
                    SegmentPiece::Trailing => -sign * height,
                };
            }
        }

        info!(
            "Segmented parallax ready: {} segments, direction {:?}, speed {}",
            controller.segments().len(),
            controller.direction(),
            controller.scroll_speed()
        );
        commands
            .entity(root)
            .remove::<PendingSegmentedParallax>()
            .insert(controller);
    }
}
