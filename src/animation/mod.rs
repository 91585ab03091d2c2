mod camera;
mod path_animator;

pub use camera::{PerspectiveCamera, Viewport};
pub use path_animator::{CameraPose, PathAnimator, DEFAULT_LOOK_AHEAD};

/// Default duration of one full loop along the path, in seconds.
pub const DEFAULT_LOOP_PERIOD: f64 = 20.0;

/// Time-derived curve parameter.
///
/// `phase` accumulates scaled time modulo the loop period, so changing the
/// speed factor never makes `t` jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    phase: f64,
    speed_factor: f64,
    loop_period: f64,
}

impl AnimationState {
    /// Creates a state at `t = 0`. A non-positive or non-finite period falls
    /// back to [`DEFAULT_LOOP_PERIOD`].
    #[must_use]
    pub fn new(loop_period: f64) -> Self {
        let loop_period = if loop_period.is_finite() && loop_period > 0.0 {
            loop_period
        } else {
            DEFAULT_LOOP_PERIOD
        };
        Self {
            phase: 0.0,
            speed_factor: 1.0,
            loop_period,
        }
    }

    /// Advances by `dt` seconds of wall time and returns the new `t`.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if dt.is_finite() && dt > 0.0 {
            self.phase = (self.phase + dt * self.speed_factor).rem_euclid(self.loop_period);
        }
        self.t()
    }

    /// Current curve parameter in `[0, 1)`.
    #[must_use]
    pub fn t(&self) -> f64 {
        // rem_euclid can round up to the period itself.
        let t = self.phase / self.loop_period;
        if t >= 1.0 {
            0.0
        } else {
            t
        }
    }

    #[must_use]
    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }

    pub fn set_speed_factor(&mut self, speed_factor: f64) {
        if speed_factor.is_finite() {
            self.speed_factor = speed_factor.max(0.0);
        }
    }

    #[must_use]
    pub fn loop_period(&self) -> f64 {
        self.loop_period
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(DEFAULT_LOOP_PERIOD)
    }
}
