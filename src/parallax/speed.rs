/// In-flight linear interpolation between two scroll speeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedTransition {
    pub from: f32,
    pub to: f32,
    pub elapsed: f32,
    pub duration: f32,
}

impl SpeedTransition {
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).min(1.0)
    }
}

/// Scroll speed in units per second, with an optional smooth transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSpeed {
    current: f32,
    transition: Option<SpeedTransition>,
}

impl ScrollSpeed {
    pub fn new(current: f32) -> Self {
        Self {
            current,
            transition: None,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn transition(&self) -> Option<&SpeedTransition> {
        self.transition.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Jump to `value`, cancelling any transition.
    pub fn set(&mut self, value: f32) {
        self.transition = None;
        self.current = value;
    }

    /// Start interpolating from the current speed to `target` over `duration` seconds.
    pub fn smooth_set(&mut self, target: f32, duration: f32) {
        if duration <= 0.0 {
            self.set(target);
            return;
        }
        self.transition = Some(SpeedTransition {
            from: self.current,
            to: target,
            elapsed: 0.0,
            duration,
        });
    }

    pub fn tick(&mut self, dt: f32) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };

        transition.elapsed += dt;
        if transition.elapsed >= transition.duration {
            self.current = transition.to;
            self.transition = None;
            return;
        }

        let t = transition.progress();
        self.current = transition.from + (transition.to - transition.from) * t;
    }
}
