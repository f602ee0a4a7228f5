/// Degrees of rotation per pixel of pointer travel while dragging.
pub const DRAG_SENSITIVITY: f64 = 0.6;

/// Release distance (device-independent pixels) below which a press is a click.
pub const CLICK_THRESHOLD_PX: f64 = 5.0;

/// Fixed settle time for a snap after drag release, in seconds.
pub const SNAP_DURATION_SECS: f64 = 0.6;

/// Transition duration before any flow has run, in seconds.
pub const DEFAULT_TRANSITION_SECS: f64 = 1.2;

/// Spin duration: base seconds before per-rotation scaling.
pub const SPIN_BASE_SECS: f64 = 0.8;

/// Spin duration: added seconds per full rotation of travel.
pub const SPIN_SECS_PER_ROTATION: f64 = 0.25;

/// Spin duration floor, in seconds.
pub const SPIN_MIN_SECS: f64 = 0.8;

/// Spin duration ceiling, in seconds.
pub const SPIN_MAX_SECS: f64 = 1.5;

/// Resting orientation (pitch, yaw) before the first interaction.
pub const DEFAULT_PITCH: f64 = -15.0;
pub const DEFAULT_YAW: f64 = -25.0;

/// Cube edge length in pixels.
pub const CUBE_SIZE_PX: f64 = 200.0;

/// Perspective distance of the viewing container in pixels.
pub const PERSPECTIVE_PX: f64 = 1000.0;

/// Control points of the ease-out curve used for spins and snaps.
pub const EASE_OUT: [f64; 4] = [0.25, 1.0, 0.5, 1.0];

/// Degrees in one full turn.
pub const FULL_TURN: f64 = 360.0;

/// Numerical epsilon for near-zero comparisons
pub const EPSILON: f64 = 1e-10;
