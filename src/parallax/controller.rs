use bevy::prelude::*;

use super::config::{ScrollDirection, SegmentConfigError, SegmentKind, SegmentedParallaxDef};
use super::segment::{Segment, SegmentState};
use super::speed::ScrollSpeed;

/// Runtime owner of an ordered segment chain.
///
/// Lives on the root entity of a segmented background. `active_index` only
/// ever grows; once it reaches `segments.len()` the background is exhausted
/// and further hand-offs are no-ops.
#[derive(Component, Debug)]
pub struct SegmentedParallaxController {
    segments: Vec<Segment>,
    active_index: usize,
    direction: ScrollDirection,
    speed: ScrollSpeed,
}

impl SegmentedParallaxController {
    /// The first segment starts scrolling, the others wait idle.
    pub fn new(segments: Vec<Segment>, direction: ScrollDirection, scroll_speed: f32) -> Self {
        let segments = segments
            .into_iter()
            .enumerate()
            .map(|(index, segment)| {
                if index == 0 {
                    segment.with_state(SegmentState::Scrolling)
                } else {
                    segment.with_state(SegmentState::Idle)
                }
            })
            .collect();

        Self {
            segments,
            active_index: 0,
            direction,
            speed: ScrollSpeed::new(scroll_speed),
        }
    }

    /// Build the runtime chain from a definition and the body height of each segment.
    ///
    /// `heights[i]` is `None` when segment `i` has no repeatable body.
    pub fn from_def(
        def: &SegmentedParallaxDef,
        heights: &[Option<f32>],
    ) -> Result<Self, SegmentConfigError> {
        def.validate()?;
        if heights.len() != def.segments.len() {
            return Err(SegmentConfigError::BoundsCountMismatch {
                expected: def.segments.len(),
                found: heights.len(),
            });
        }

        let segments = def
            .segments
            .iter()
            .zip(heights)
            .map(|(segment_def, height)| {
                let height = height.ok_or_else(|| SegmentConfigError::MissingBody {
                    segment: segment_def.name.clone(),
                })?;
                if !height.is_finite() || height <= 0.0 {
                    return Err(SegmentConfigError::InvalidBoundsHeight {
                        segment: segment_def.name.clone(),
                        height,
                    });
                }
                Ok(Segment::new(&segment_def.name, segment_def.kind, height)
                    .with_scroll_past(segment_def.scroll_past))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(segments, def.direction, def.scroll_speed))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_segment(&self) -> Option<&Segment> {
        self.segments.get(self.active_index)
    }

    pub fn is_exhausted(&self) -> bool {
        self.active_index >= self.segments.len()
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn scroll_speed(&self) -> f32 {
        self.speed.current()
    }

    pub fn speed(&self) -> &ScrollSpeed {
        &self.speed
    }

    pub fn is_transitioning(&self) -> bool {
        self.speed.is_transitioning()
    }

    pub fn set_scroll_speed(&mut self, value: f32) {
        self.speed.set(value);
    }

    pub fn smooth_set_scroll_speed(&mut self, target: f32, duration: f32) {
        self.speed.smooth_set(target, duration);
    }

    /// Advance one frame: scroll every non-idle segment in list order, then
    /// step the speed transition.
    ///
    /// A segment enabled by a hand-off later in the list is scrolled in the
    /// same pass.
    pub fn tick(&mut self, dt: f32, origin_y: f32) {
        let delta = dt * self.speed.current();
        let direction = self.direction;

        for index in 0..self.segments.len() {
            let segment = &mut self.segments[index];
            if segment.state() == SegmentState::Idle {
                continue;
            }

            let outcome = segment.scroll(delta, origin_y, direction);
            if outcome.retired {
                debug!("Segment '{}' scrolled off and was hidden", segment.name());
            }
            if outcome.hand_off {
                self.enable_next_segment(index);
            }
        }

        self.speed.tick(dt);
    }

    /// Activate the segment after `requester`, placed one body height beyond it.
    ///
    /// Only the active segment may hand off; stale or repeated requests are
    /// ignored. Returns the index of the newly enabled segment, if any.
    pub fn enable_next_segment(&mut self, requester: usize) -> Option<usize> {
        if requester != self.active_index {
            debug!(
                "Ignoring hand-off from segment {} (active is {})",
                requester, self.active_index
            );
            return None;
        }
        let from = self.segments.get(requester)?;
        let offset = self.direction.sign() * from.bounds_height();
        let anchor = from.translation();

        self.active_index += 1;
        let Some(next) = self.segments.get_mut(self.active_index) else {
            info!(
                "Segmented background exhausted after {} segments",
                self.segments.len()
            );
            return None;
        };

        next.activate_at(Vec2::new(anchor.x, anchor.y + offset));
        info!("Hand-off to segment {} '{}'", self.active_index, next.name());
        Some(self.active_index)
    }

    /// Move on from the active segment.
    ///
    /// A pinned static segment is released at once; any other segment is
    /// marked pending and hands off when it next crosses its boundary.
    pub fn advance_manually(&mut self) {
        let index = self.active_index;
        let Some(segment) = self.segments.get_mut(index) else {
            debug!("Advance requested on an exhausted background");
            return;
        };

        match (segment.kind(), segment.state()) {
            (_, SegmentState::Deactivated) => {
                warn!(
                    "Segment '{}' is already deactivated, ignoring advance",
                    segment.name()
                );
            }
            (SegmentKind::Static, _) if !segment.scroll_past() => {
                segment.allow_scroll_past();
                segment.set_state(SegmentState::Deactivated);
                self.enable_next_segment(index);
            }
            _ => {
                segment.set_state(SegmentState::PendingDeactivation);
                debug!("Segment '{}' pending deactivation", segment.name());
            }
        }
    }
}
