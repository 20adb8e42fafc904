use bevy::prelude::*;

use super::config::{ScrollDirection, SegmentKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SegmentState {
    #[default]
    Idle,
    Scrolling,
    PendingDeactivation,
    Deactivated,
}

/// Side effects of a single `Segment::scroll` call that the controller must act on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOutcome {
    /// The segment committed its hand-off; the next segment should be enabled.
    pub hand_off: bool,
    /// The segment went fully off-screen and is now hidden.
    pub retired: bool,
}

/// One scrolling unit: leading filler, repeatable body and trailing filler.
///
/// `translation` is relative to the controller origin. Loopable wrapping and
/// the final retire check compare the world position (`origin_y + translation.y`)
/// against the body height; the static pin check uses the local position.
#[derive(Debug, Clone)]
pub struct Segment {
    name: String,
    kind: SegmentKind,
    state: SegmentState,
    scroll_past: bool,
    bounds_height: f32,
    translation: Vec2,
    visible: bool,
    leading_visible: bool,
    trailing_visible: bool,
}

impl Segment {
    /// Loopable segments get both filler pieces, static segments get neither.
    pub fn new(name: impl Into<String>, kind: SegmentKind, bounds_height: f32) -> Self {
        let has_fillers = kind == SegmentKind::Loopable;
        Self {
            name: name.into(),
            kind,
            state: SegmentState::Idle,
            scroll_past: false,
            bounds_height,
            translation: Vec2::ZERO,
            visible: false,
            leading_visible: has_fillers,
            trailing_visible: has_fillers,
        }
    }

    pub fn with_scroll_past(mut self, scroll_past: bool) -> Self {
        self.scroll_past = scroll_past && self.kind == SegmentKind::Static;
        self
    }

    pub fn with_state(mut self, state: SegmentState) -> Self {
        self.state = state;
        self.visible = state != SegmentState::Idle;
        self
    }

    #[cfg(test)]
    pub fn with_translation(mut self, translation: Vec2) -> Self {
        self.translation = translation;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn state(&self) -> SegmentState {
        self.state
    }

    pub fn scroll_past(&self) -> bool {
        self.scroll_past
    }

    pub fn bounds_height(&self) -> f32 {
        self.bounds_height
    }

    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn leading_visible(&self) -> bool {
        self.leading_visible
    }

    pub fn trailing_visible(&self) -> bool {
        self.trailing_visible
    }

    pub(super) fn set_state(&mut self, state: SegmentState) {
        self.state = state;
    }

    pub(super) fn allow_scroll_past(&mut self) {
        self.scroll_past = true;
    }

    /// Place the segment and start it scrolling.
    pub(super) fn activate_at(&mut self, translation: Vec2) {
        self.translation = translation;
        self.state = SegmentState::Scrolling;
        self.visible = true;
    }

    /// Move by `delta` units along the scroll axis, then apply the boundary rules.
    pub fn scroll(
        &mut self,
        delta: f32,
        origin_y: f32,
        direction: ScrollDirection,
    ) -> ScrollOutcome {
        let sign = direction.sign();
        self.translation.y -= sign * delta;

        match self.kind {
            SegmentKind::Loopable => self.process_loopable(origin_y, sign),
            SegmentKind::Static => self.process_static(origin_y, sign),
        }
    }

    fn process_loopable(&mut self, origin_y: f32, sign: f32) -> ScrollOutcome {
        let mut outcome = ScrollOutcome::default();
        if !self.past_boundary(origin_y, sign) {
            return outcome;
        }

        match self.state {
            SegmentState::Scrolling => {
                self.translation.y += sign * self.bounds_height;
            }
            SegmentState::PendingDeactivation => {
                self.translation.y += sign * self.bounds_height;
                self.commit_hand_off();
                outcome.hand_off = true;
            }
            SegmentState::Deactivated => {
                self.retire();
                outcome.retired = true;
            }
            SegmentState::Idle => {}
        }
        outcome
    }

    fn process_static(&mut self, origin_y: f32, sign: f32) -> ScrollOutcome {
        let mut outcome = ScrollOutcome::default();

        if sign * self.translation.y < 0.0 {
            if !self.scroll_past {
                self.state = SegmentState::Idle;
                self.translation.y = 0.0;
            } else if self.state != SegmentState::Deactivated {
                self.commit_hand_off();
                outcome.hand_off = true;
            }
        }

        if self.state == SegmentState::Deactivated && self.past_boundary(origin_y, sign) {
            self.retire();
            outcome.retired = true;
        }
        outcome
    }

    fn past_boundary(&self, origin_y: f32, sign: f32) -> bool {
        sign * (origin_y + self.translation.y) <= -self.bounds_height
    }

    fn commit_hand_off(&mut self) {
        self.leading_visible = false;
        self.state = SegmentState::Deactivated;
    }

    fn retire(&mut self) {
        self.state = SegmentState::Idle;
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: f32 = 10.0;

    fn scrolling(kind: SegmentKind) -> Segment {
        Segment::new("test", kind, H).with_state(SegmentState::Scrolling)
    }

    #[test]
    fn loop_closure_all_directions_and_kinds() {
        for direction in [ScrollDirection::Down, ScrollDirection::Up] {
            for kind in [SegmentKind::Loopable, SegmentKind::Static] {
                let mut segment = scrolling(kind);
                for _ in 0..5 {
                    let before = segment.translation();
                    segment.scroll(H, 0.0, direction);
                    assert_eq!(
                        segment.translation(),
                        before,
                        "{kind:?} scrolling {direction:?} did not close its loop"
                    );
                }
            }
        }
    }

    #[test]
    fn loopable_moves_against_direction_sign() {
        let mut down = scrolling(SegmentKind::Loopable);
        down.scroll(3.0, 0.0, ScrollDirection::Down);
        assert_eq!(down.translation().y, -3.0);

        let mut up = scrolling(SegmentKind::Loopable);
        up.scroll(3.0, 0.0, ScrollDirection::Up);
        assert_eq!(up.translation().y, 3.0);
    }

    #[test]
    fn loopable_wraps_and_keeps_scrolling() {
        let mut segment = scrolling(SegmentKind::Loopable);
        let outcome = segment.scroll(12.0, 0.0, ScrollDirection::Down);
        assert_eq!(outcome, ScrollOutcome::default());
        assert_eq!(segment.translation().y, -2.0);
        assert_eq!(segment.state(), SegmentState::Scrolling);
        assert!(segment.leading_visible());
    }

    #[test]
    fn loopable_wrap_uses_world_position() {
        let mut segment = scrolling(SegmentKind::Loopable);
        // Origin 5 above zero: world reaches -10 only after moving 15.
        segment.scroll(12.0, 5.0, ScrollDirection::Down);
        assert_eq!(segment.translation().y, -12.0);
        segment.scroll(3.0, 5.0, ScrollDirection::Down);
        assert_eq!(segment.translation().y, -5.0);
    }

    #[test]
    fn pending_loopable_hands_off_then_retires() {
        let mut segment = Segment::new("sky", SegmentKind::Loopable, H)
            .with_state(SegmentState::PendingDeactivation);

        let outcome = segment.scroll(4.0, 0.0, ScrollDirection::Down);
        assert!(!outcome.hand_off);

        let outcome = segment.scroll(6.0, 0.0, ScrollDirection::Down);
        assert!(outcome.hand_off);
        assert!(!outcome.retired);
        assert_eq!(segment.state(), SegmentState::Deactivated);
        assert_eq!(segment.translation().y, 0.0);
        assert!(!segment.leading_visible());
        assert!(segment.trailing_visible());
        assert!(segment.is_visible());

        let outcome = segment.scroll(H, 0.0, ScrollDirection::Down);
        assert!(outcome.retired);
        assert!(!outcome.hand_off);
        assert_eq!(segment.state(), SegmentState::Idle);
        assert!(!segment.is_visible());
    }

    #[test]
    fn pending_loopable_mirrors_when_scrolling_up() {
        let mut segment = Segment::new("sky", SegmentKind::Loopable, H)
            .with_state(SegmentState::PendingDeactivation);
        let outcome = segment.scroll(H, 0.0, ScrollDirection::Up);
        assert!(outcome.hand_off);
        assert_eq!(segment.translation().y, 0.0);
        assert_eq!(segment.state(), SegmentState::Deactivated);
    }

    #[test]
    fn pinned_static_settles_at_origin_every_crossing() {
        let mut segment = Segment::new("gate", SegmentKind::Static, H)
            .with_state(SegmentState::Scrolling)
            .with_translation(Vec2::new(0.0, H));

        for _ in 0..3 {
            let outcome = segment.scroll(H + 2.5, 0.0, ScrollDirection::Down);
            assert_eq!(outcome, ScrollOutcome::default());
            assert_eq!(segment.translation().y, 0.0);
            assert_eq!(segment.state(), SegmentState::Idle);
            assert!(segment.is_visible());

            segment.set_state(SegmentState::Scrolling);
            segment.translation.y = H;
        }
        assert_ne!(segment.state(), SegmentState::Deactivated);
    }

    #[test]
    fn pinned_static_keeps_x_and_snaps_y() {
        let mut segment = Segment::new("gate", SegmentKind::Static, H)
            .with_state(SegmentState::Scrolling)
            .with_translation(Vec2::new(7.0, 1.0));
        segment.scroll(2.0, 0.0, ScrollDirection::Down);
        assert_eq!(segment.translation(), Vec2::new(7.0, 0.0));
    }

    #[test]
    fn scroll_past_static_hands_off_once_then_retires() {
        let mut segment = Segment::new("gate", SegmentKind::Static, H)
            .with_scroll_past(true)
            .with_state(SegmentState::Scrolling)
            .with_translation(Vec2::new(0.0, 1.0));

        let mut hand_offs = 0;
        let mut retired_at = None;
        for step in 0..20 {
            let outcome = segment.scroll(1.0, 0.0, ScrollDirection::Down);
            if outcome.hand_off {
                hand_offs += 1;
                assert_eq!(segment.state(), SegmentState::Deactivated);
            }
            if outcome.retired {
                retired_at = Some(step);
                break;
            }
        }

        assert_eq!(hand_offs, 1);
        assert_eq!(retired_at, Some(10));
        assert_eq!(segment.state(), SegmentState::Idle);
        assert!(!segment.is_visible());
    }

    #[test]
    fn pinned_static_settles_at_origin_when_scrolling_up() {
        let mut segment = Segment::new("gate", SegmentKind::Static, H)
            .with_state(SegmentState::Scrolling)
            .with_translation(Vec2::new(0.0, -H));

        for _ in 0..3 {
            let outcome = segment.scroll(H + 2.5, 0.0, ScrollDirection::Up);
            assert_eq!(outcome, ScrollOutcome::default());
            assert_eq!(segment.translation().y, 0.0);
            assert_eq!(segment.state(), SegmentState::Idle);
            assert!(segment.is_visible());

            segment.set_state(SegmentState::Scrolling);
            segment.translation.y = -H;
        }
    }

    #[test]
    fn scroll_past_static_hands_off_once_when_scrolling_up() {
        let mut segment = Segment::new("gate", SegmentKind::Static, H)
            .with_scroll_past(true)
            .with_state(SegmentState::Scrolling)
            .with_translation(Vec2::new(0.0, -1.0));

        let mut hand_off_at = Vec::new();
        let mut retired_at = None;
        for step in 0..20 {
            let outcome = segment.scroll(1.0, 0.0, ScrollDirection::Up);
            if outcome.hand_off {
                hand_off_at.push((step, segment.translation().y));
            }
            if outcome.retired {
                retired_at = Some((step, segment.translation().y));
                break;
            }
        }

        assert_eq!(hand_off_at, vec![(1, 1.0)]);
        assert_eq!(retired_at, Some((10, H)));
        assert_eq!(segment.state(), SegmentState::Idle);
        assert!(!segment.is_visible());
    }

    #[test]
    fn scrolling_up_retires_against_world_position() {
        let mut segment = Segment::new("gate", SegmentKind::Static, H)
            .with_scroll_past(true)
            .with_state(SegmentState::Scrolling);

        // Origin 4 above zero: world reaches +10 once local y is 6.
        let outcome = segment.scroll(1.0, 4.0, ScrollDirection::Up);
        assert!(outcome.hand_off);
        assert!(!outcome.retired);

        let outcome = segment.scroll(4.0, 4.0, ScrollDirection::Up);
        assert!(!outcome.retired);
        assert!(segment.is_visible());

        let outcome = segment.scroll(1.0, 4.0, ScrollDirection::Up);
        assert!(outcome.retired);
        assert_eq!(segment.translation().y, 6.0);
        assert!(!segment.is_visible());
    }

    #[test]
    fn static_can_hand_off_and_retire_in_one_large_step() {
        let mut segment = Segment::new("gate", SegmentKind::Static, H)
            .with_scroll_past(true)
            .with_state(SegmentState::Scrolling);
        let outcome = segment.scroll(H * 2.0, 0.0, ScrollDirection::Down);
        assert!(outcome.hand_off);
        assert!(outcome.retired);
    }

    #[test]
    fn scroll_past_is_ignored_for_loopable() {
        let segment = Segment::new("sky", SegmentKind::Loopable, H).with_scroll_past(true);
        assert!(!segment.scroll_past());
    }

    #[test]
    fn static_has_no_fillers() {
        let segment = Segment::new("gate", SegmentKind::Static, H);
        assert!(!segment.leading_visible());
        assert!(!segment.trailing_visible());
    }
}
