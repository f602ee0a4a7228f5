//! Cube orientation and the three engine operations on it: drag rotation,
//! nearest-face snapping, and randomized spin planning.
//!
//! Angles are degrees and are never wrapped. Every planned target is a
//! congruent-mod-360 copy of a face's home angle chosen close to (snap) or
//! ahead of (spin) the current angle, so animated paths stay short and
//! continuous however many turns have accumulated. The accumulated value is
//! not a turn counter; use [`Orientation::reduced`] before exporting it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_PITCH, DEFAULT_YAW, EPSILON, FULL_TURN, SPIN_BASE_SECS, SPIN_MAX_SECS, SPIN_MIN_SECS,
    SPIN_SECS_PER_ROTATION,
};
use crate::face::Face;

/// Cube rotation: pitch `x` around the horizontal axis, then yaw `y` around
/// the vertical axis, both in degrees.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Orientation {
    pub x: f64,
    pub y: f64,
}

impl PartialEq for Orientation {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::new(DEFAULT_PITCH, DEFAULT_YAW)
    }
}

/// How visible each face is, indexed in catalogue order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceScores([f64; 6]);

impl FaceScores {
    pub fn get(&self, face: Face) -> f64 {
        self.0[face.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Face, f64)> + '_ {
        Face::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Highest-scoring face. Ties go to the face earliest in catalogue order.
    pub fn best(&self) -> (Face, f64) {
        let mut best = (Face::Front, f64::NEG_INFINITY);
        for (face, score) in self.iter() {
            if score > best.1 {
                best = (face, score);
            }
        }
        best
    }
}

/// Result of settling to the most visible face.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SnapTarget {
    pub face: Face,
    pub target: Orientation,
}

/// Spin duration shaping: `clamp(base + per_rotation * rotations, min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinTiming {
    pub base_secs: f64,
    pub secs_per_rotation: f64,
    pub min_secs: f64,
    pub max_secs: f64,
}

impl Default for SpinTiming {
    fn default() -> Self {
        Self {
            base_secs: SPIN_BASE_SECS,
            secs_per_rotation: SPIN_SECS_PER_ROTATION,
            min_secs: SPIN_MIN_SECS,
            max_secs: SPIN_MAX_SECS,
        }
    }
}

impl SpinTiming {
    /// Duration for a spin covering `rotations` full turns of summed travel.
    pub fn duration(&self, rotations: f64) -> f64 {
        (self.base_secs + self.secs_per_rotation * rotations)
            .max(self.min_secs)
            .min(self.max_secs)
    }
}

/// A planned spin to a chosen face.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpinPlan {
    pub face: Face,
    pub target: Orientation,
    pub extra_turns_x: u32,
    pub extra_turns_y: u32,
    pub duration_secs: f64,
}

impl Orientation {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate by a pointer delta. Vertical travel tilts pitch, horizontal
    /// travel turns yaw.
    pub fn apply_drag(&mut self, delta_x: f64, delta_y: f64, sensitivity: f64) {
        self.x -= delta_y * sensitivity;
        self.y += delta_x * sensitivity;
    }

    /// View-space Z component of each face's outward normal.
    ///
    /// The cube turns by pitch then yaw; a score of 1 means the face points
    /// straight out of the screen.
    pub fn score_faces(self) -> FaceScores {
        let (sx, cx) = self.x.to_radians().sin_cos();
        let (sy, cy) = self.y.to_radians().sin_cos();

        let front = cx * cy;
        let right = -cx * sy;
        let top = -sx;
        FaceScores([front, -front, right, -right, top, -top])
    }

    /// Most visible face and the nearest orientation that shows it squarely.
    pub fn nearest_face_snap_target(self) -> SnapTarget {
        let (face, _) = self.score_faces().best();
        let home = face.home();
        SnapTarget {
            face,
            target: Orientation::new(snap_angle(self.x, home.x), snap_angle(self.y, home.y)),
        }
    }

    /// Plan a forward spin to `face` with at least the given extra turns per axis.
    pub fn plan_spin_to(
        self,
        face: Face,
        extra_turns_x: u32,
        extra_turns_y: u32,
        timing: &SpinTiming,
    ) -> SpinPlan {
        let home = face.home();
        let target = Orientation::new(
            advance_angle(self.x, home.x, extra_turns_x),
            advance_angle(self.y, home.y, extra_turns_y),
        );
        let rotations = ((target.x - self.x).abs() + (target.y - self.y).abs()) / FULL_TURN;

        SpinPlan {
            face,
            target,
            extra_turns_x,
            extra_turns_y,
            duration_secs: timing.duration(rotations),
        }
    }

    /// Pick a face uniformly (repeats allowed) and plan a spin to it with
    /// 0–1 extra pitch turns and 1–2 extra yaw turns.
    pub fn plan_random_spin(self, timing: &SpinTiming, rng: &mut impl Rng) -> SpinPlan {
        let face = Face::ALL[rng.random_range(0..Face::ALL.len())];
        let extra_x = u32::from(rng.random_bool(0.5));
        let extra_y = rng.random_range(1..=2);
        self.plan_spin_to(face, extra_x, extra_y, timing)
    }

    /// Both axes reduced to (-180, 180]. For display and export only.
    pub fn reduced(self) -> Self {
        Self::new(reduce_angle(self.x), reduce_angle(self.y))
    }

    /// Linear interpolation per axis. `t` is clamped to [0, 1].
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.x + t * (other.x - self.x),
            self.y + t * (other.y - self.y),
        )
    }

    /// CSS-style cube transform, e.g. `rotateX(-15deg) rotateY(-25deg)`.
    pub fn css(self) -> String {
        format!("rotateX({}deg) rotateY({}deg)", self.x, self.y)
    }
}

/// `home + 360k` closest to `current`. Exact half-turn ties round toward +∞.
pub fn snap_angle(current: f64, home: f64) -> f64 {
    let turns = ((current - home) / FULL_TURN + 0.5).floor();
    home + turns * FULL_TURN
}

/// Smallest `home + 360k` that is `>= current + extra_turns * 360`.
pub fn advance_angle(current: f64, home: f64, extra_turns: u32) -> f64 {
    let floor = current + f64::from(extra_turns) * FULL_TURN;
    let turns = ((floor - home) / FULL_TURN).ceil();
    home + turns * FULL_TURN
}

fn reduce_angle(deg: f64) -> f64 {
    let r = deg.rem_euclid(FULL_TURN);
    if r > FULL_TURN / 2.0 { r - FULL_TURN } else { r }
}
