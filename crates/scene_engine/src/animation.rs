//! Bézier curve animation with a ping-pong time parameter
//!
//! Drives a displacement back and forth along a cubic Bézier curve. The
//! parameter is wall-clock derived, so the traversal speed is independent
//! of frame rate.

use crate::foundation::math::Vec3;

/// A cubic Bézier curve over four control points
#[derive(Debug, Clone, Copy)]
pub struct CubicBezier {
    /// Control points P0..P3
    pub points: [Vec3; 4],
}

impl CubicBezier {
    /// Creates a curve from its four control points
    pub fn new(points: [Vec3; 4]) -> Self {
        Self { points }
    }

    /// Bernstein-basis evaluation at parameter `t`.
    ///
    /// Exact at the endpoints: `eval(0.0)` returns P0 and `eval(1.0)`
    /// returns P3 with no rounding.
    pub fn eval(&self, t: f32) -> Vec3 {
        let mt = 1.0 - t;
        self.points[0] * (mt * mt * mt)
            + self.points[1] * (3.0 * t * mt * mt)
            + self.points[2] * (3.0 * t * t * mt)
            + self.points[3] * (t * t * t)
    }
}

/// Traversal direction of the ping-pong clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    /// Parameter increasing toward 1
    Forward,
    /// Parameter decreasing toward 0
    Backward,
}

/// Forward/backward looping time parameter.
///
/// Seconds are divided by `period`, and the epoch is reset at every bound
/// so each traversal takes one period. The parameter is confined to
/// `[0, 1]`: the bound value itself is emitted on the flip frame.
#[derive(Debug, Clone)]
pub struct PingPong {
    direction: SweepDirection,
    epoch: f64,
    period: f64,
}

impl PingPong {
    /// Creates a clock starting a forward sweep at `now` seconds
    pub fn new(period: f64, now: f64) -> Self {
        Self {
            direction: SweepDirection::Forward,
            epoch: now / period,
            period,
        }
    }

    /// Current traversal direction
    pub fn direction(&self) -> SweepDirection {
        self.direction
    }

    /// Parameter at `now` seconds, flipping direction at the bounds
    pub fn param(&mut self, now: f64) -> f32 {
        let elapsed = now / self.period - self.epoch;
        match self.direction {
            SweepDirection::Forward => {
                if elapsed >= 1.0 {
                    self.direction = SweepDirection::Backward;
                    self.epoch = now / self.period;
                    1.0
                } else {
                    elapsed as f32
                }
            }
            SweepDirection::Backward => {
                let t = 1.0 - elapsed;
                if t <= 0.0 {
                    self.direction = SweepDirection::Forward;
                    self.epoch = now / self.period;
                    0.0
                } else {
                    t as f32
                }
            }
        }
    }
}

/// A Bézier curve traversed back and forth in wall-clock time
#[derive(Debug, Clone)]
pub struct BezierTrack {
    curve: CubicBezier,
    clock: PingPong,
}

impl BezierTrack {
    /// Creates a track over the given control points, starting its forward
    /// sweep at `now` seconds
    pub fn new(points: [Vec3; 4], period: f64, now: f64) -> Self {
        Self {
            curve: CubicBezier::new(points),
            clock: PingPong::new(period, now),
        }
    }

    /// Displacement along the curve at `now` seconds
    pub fn displacement(&mut self, now: f64) -> Vec3 {
        let t = self.clock.param(now);
        self.curve.eval(t)
    }

    /// Current traversal direction
    pub fn direction(&self) -> SweepDirection {
        self.clock.direction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn curve() -> CubicBezier {
        CubicBezier::new([
            Vec3::new(111.1, 210.4, 111.0),
            Vec3::new(211.56, 112.25, 111.0),
            Vec3::new(-50.33, 50.99, 51.0),
            Vec3::new(40.78, 92.85, 31.0),
        ])
    }

    #[test]
    fn eval_is_exact_at_the_endpoints() {
        let curve = curve();
        assert_eq!(curve.eval(0.0), curve.points[0]);
        assert_eq!(curve.eval(1.0), curve.points[3]);
    }

    #[test]
    fn eval_midpoint_matches_bernstein_sum() {
        let curve = curve();
        let mid = curve.eval(0.5);
        let expected = (curve.points[0] + curve.points[3]) * 0.125
            + (curve.points[1] + curve.points[2]) * 0.375;
        assert_relative_eq!((mid - expected).norm(), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn param_stays_in_unit_interval() {
        let mut clock = PingPong::new(25.0, 0.0);
        let mut now = 0.0;
        while now < 120.0 {
            let t = clock.param(now);
            assert!((0.0..=1.0).contains(&t), "t = {t} out of range at {now}");
            now += 0.37;
        }
    }

    #[test]
    fn direction_flips_once_per_traversal() {
        let mut clock = PingPong::new(25.0, 0.0);
        assert_eq!(clock.direction(), SweepDirection::Forward);

        // Step past one full forward traversal
        let mut now = 0.0;
        while clock.direction() == SweepDirection::Forward {
            now += 0.25;
            clock.param(now);
            assert!(now < 30.0, "forward sweep never completed");
        }
        let flipped_at = now;
        assert_relative_eq!(clock.param(flipped_at), 1.0, epsilon = 1e-4);

        // And past the backward traversal
        while clock.direction() == SweepDirection::Backward {
            now += 0.25;
            clock.param(now);
            assert!(now < flipped_at + 30.0, "backward sweep never completed");
        }
    }

    #[test]
    fn flip_frames_emit_the_exact_bound() {
        let mut clock = PingPong::new(25.0, 0.0);
        assert_eq!(clock.param(26.0), 1.0);
        assert_eq!(clock.direction(), SweepDirection::Backward);
        assert_eq!(clock.param(52.0), 0.0);
        assert_eq!(clock.direction(), SweepDirection::Forward);
    }

    #[test]
    fn track_endpoints_equal_the_outer_control_points() {
        let mut track = BezierTrack::new(curve().points, 25.0, 0.0);
        assert_eq!(track.displacement(0.0), curve().points[0]);
        // One full period later the parameter reaches 1 exactly
        assert_eq!(track.displacement(25.0), curve().points[3]);
    }

    #[test]
    fn speed_is_wall_clock_driven() {
        // Two clocks sampled at different rates agree at the same instant
        let mut coarse = PingPong::new(25.0, 0.0);
        let mut fine = PingPong::new(25.0, 0.0);

        for i in 1..=10 {
            fine.param(f64::from(i) * 0.5);
        }
        let a = fine.param(5.5);
        let b = coarse.param(5.5);
        assert_relative_eq!(a, b, epsilon = 1e-6);
    }

    #[test]
    fn flip_frame_at_the_bound_checks_direction() {
        let mut clock = PingPong::new(25.0, 0.0);
        // Arriving exactly at the bound flips and emits it
        assert_eq!(clock.param(25.0), 1.0);
        assert_eq!(clock.direction(), SweepDirection::Backward);
    }
}
