//! Wisdom cube orientation engine.
//!
//! A cube of six wisdom cards turned by pitch and yaw. The engine maps drag
//! gestures onto the orientation, scores which face is most visible, snaps
//! to the nearest face, and plans randomized forward spins with shaped
//! durations. The controller runs the press/move/release lifecycle on top.
//!
//! Zero I/O. Completions are returned as tickets for the caller to schedule.

pub mod catalogue;
pub mod constants;
pub mod controller;
pub mod easing;
pub mod face;
pub mod frame;
pub mod orientation;

pub use catalogue::{Catalogue, CatalogueError, Wisdom, default_gradient};
pub use constants::{
    CLICK_THRESHOLD_PX, CUBE_SIZE_PX, DRAG_SENSITIVITY, PERSPECTIVE_PX, SNAP_DURATION_SECS,
};
pub use controller::{
    CubeState, FlowKind, InteractionController, InteractionState, Point, PointerCapture, Settle,
    Tuning,
};
pub use easing::{CubicBezier, Transition};
pub use face::{Axis, Face, FacePlacement, ParseFaceError};
pub use frame::{RenderFrame, SpinButton};
pub use orientation::{FaceScores, Orientation, SnapTarget, SpinPlan, SpinTiming};
