use serde::Serialize;

use crate::constants::{EASE_OUT, EPSILON};
use crate::orientation::Orientation;

/// CSS-style cubic Bézier timing curve through (0,0), (x1,y1), (x2,y2), (1,1).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::ease_out()
    }
}

impl CubicBezier {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The strong ease-out used for spins and snaps.
    pub fn ease_out() -> Self {
        let [x1, y1, x2, y2] = EASE_OUT;
        Self::new(x1, y1, x2, y2)
    }

    /// Eased progress for linear time `progress` in [0, 1].
    pub fn sample(&self, progress: f64) -> f64 {
        if progress <= 0.0 {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }
        let t = self.solve_t(progress);
        bezier(t, self.y1, self.y2)
    }

    /// Curve parameter whose x equals `x`: Newton first, bisection fallback.
    fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..8 {
            let err = bezier(t, self.x1, self.x2) - x;
            if err.abs() < 1e-10 {
                return t;
            }
            let slope = bezier_slope(t, self.x1, self.x2);
            if slope.abs() < EPSILON {
                break;
            }
            t -= err / slope;
            if !(0.0..=1.0).contains(&t) {
                break;
            }
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..64 {
            let value = bezier(t, self.x1, self.x2);
            if (value - x).abs() < 1e-10 {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }

    /// CSS notation, e.g. `cubic-bezier(0.25, 1, 0.5, 1)`.
    pub fn css(&self) -> String {
        format!(
            "cubic-bezier({}, {}, {}, {})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

fn bezier(t: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// An animated move of the cube from one orientation to another.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transition {
    pub duration_secs: f64,
    pub curve: CubicBezier,
}

impl Transition {
    pub fn ease_out(duration_secs: f64) -> Self {
        Self {
            duration_secs,
            curve: CubicBezier::ease_out(),
        }
    }

    /// Orientation `elapsed_secs` into the move from `from` to `to`.
    pub fn sample(&self, from: Orientation, to: Orientation, elapsed_secs: f64) -> Orientation {
        if self.duration_secs <= 0.0 {
            return to;
        }
        let progress = elapsed_secs / self.duration_secs;
        from.lerp(to, self.curve.sample(progress))
    }

    /// CSS notation, e.g. `transform 0.6s cubic-bezier(0.25, 1, 0.5, 1)`.
    pub fn css(&self) -> String {
        format!("transform {}s {}", self.duration_secs, self.curve.css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_endpoints() {
        let c = CubicBezier::ease_out();
        assert_eq!(c.sample(0.0), 0.0);
        assert_eq!(c.sample(1.0), 1.0);
        assert_eq!(c.sample(-3.0), 0.0);
        assert_eq!(c.sample(7.0), 1.0);
    }

    #[test]
    fn test_linear_curve_is_identity() {
        let linear = CubicBezier::new(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        for p in [0.1, 0.25, 0.5, 0.9] {
            assert_abs_diff_eq!(linear.sample(p), p, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_ease_out_front_loaded() {
        let c = CubicBezier::ease_out();
        // Most of the travel happens early.
        assert!(c.sample(0.25) > 0.5, "got {}", c.sample(0.25));
        assert!(c.sample(0.5) > 0.85, "got {}", c.sample(0.5));
    }

    #[test]
    fn test_ease_out_monotonic() {
        let c = CubicBezier::ease_out();
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = c.sample(i as f64 / 100.0);
            assert!(v + 1e-7 >= prev, "not monotonic at {i}: {v} < {prev}");
            prev = v;
        }
    }

    #[test]
    fn test_transition_sample() {
        let tr = Transition::ease_out(0.6);
        let from = Orientation::new(0.0, 0.0);
        let to = Orientation::new(0.0, 180.0);
        assert_eq!(tr.sample(from, to, 0.0), from);
        assert_eq!(tr.sample(from, to, 0.6), to);
        assert_eq!(tr.sample(from, to, 5.0), to);
        let mid = tr.sample(from, to, 0.3);
        assert!(mid.y > 90.0 && mid.y < 180.0);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let tr = Transition::ease_out(0.0);
        let to = Orientation::new(1.0, 2.0);
        assert_eq!(tr.sample(Orientation::default(), to, 0.0), to);
    }

    #[test]
    fn test_css() {
        assert_eq!(
            Transition::ease_out(0.6).css(),
            "transform 0.6s cubic-bezier(0.25, 1, 0.5, 1)"
        );
    }
}
