pub mod fixtures {
    use std::time::Duration;

    use bevy::ecs::message::Messages;
    use bevy::prelude::*;

    use crate::parallax::add_segment_pipeline;
    use crate::parallax::config::{
        ScrollDirection, SegmentDef, SegmentKind, SegmentedParallaxDef,
    };
    use crate::parallax::controller::SegmentedParallaxController;
    use crate::parallax::scroll::ParallaxCommand;
    use crate::parallax::segment::Segment;
    use crate::parallax::spawn::spawn_segmented_parallax;

    pub const SEGMENT_WIDTH: f32 = 16.0;
    pub const SEGMENT_HEIGHT: f32 = 10.0;

    /// `count` loopable segments of fixed size, scrolling down at 20 units/s.
    pub fn test_def(count: usize) -> SegmentedParallaxDef {
        SegmentedParallaxDef {
            scroll_speed: 20.0,
            direction: ScrollDirection::Down,
            z_order: -10.0,
            segments: (0..count)
                .map(|i| SegmentDef {
                    name: format!("segment_{i}"),
                    image: format!("backgrounds/segment_{i}.png"),
                    kind: SegmentKind::Loopable,
                    scroll_past: false,
                    size: Some([SEGMENT_WIDTH, SEGMENT_HEIGHT]),
                })
                .collect(),
        }
    }

    pub fn loopable_controller(
        count: usize,
        height: f32,
        speed: f32,
    ) -> SegmentedParallaxController {
        let segments = (0..count)
            .map(|i| Segment::new(format!("segment_{i}"), SegmentKind::Loopable, height))
            .collect();
        SegmentedParallaxController::new(segments, ScrollDirection::Down, speed)
    }

    /// Create a minimal Bevy App running the segment pipeline with a manual clock.
    pub fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.init_resource::<Assets<Image>>();
        add_segment_pipeline(&mut app);
        app
    }

    /// Spawn a background hierarchy with placeholder image handles.
    pub fn spawn_background(app: &mut App, def: &SegmentedParallaxDef) -> Entity {
        let world = app.world_mut();
        let root = {
            let mut commands = world.commands();
            spawn_segmented_parallax(&mut commands, def, |_| Handle::default())
        };
        world.flush();
        root
    }

    /// Set the delta seen by the next `app.update()`.
    pub fn advance_time(app: &mut App, secs: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
    }

    pub fn send_command(app: &mut App, command: ParallaxCommand) {
        app.world_mut()
            .resource_mut::<Messages<ParallaxCommand>>()
            .write(command);
    }
}
