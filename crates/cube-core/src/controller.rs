//! Gesture lifecycle and the spin/snap flows.
//!
//! The controller is the only writer of [`CubeState`]. It never sleeps or
//! schedules anything itself: each flow returns a [`Settle`] describing the
//! completion that must run once its animation has played, and the owner
//! hands the ticket back through [`InteractionController::complete`]. A
//! ticket that no longer matches the pending flow (revoked by teardown, or
//! already completed) is ignored, so every flow commits at most once.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalogue::{Catalogue, Wisdom};
use crate::constants::{
    CLICK_THRESHOLD_PX, DEFAULT_TRANSITION_SECS, DRAG_SENSITIVITY, SNAP_DURATION_SECS,
};
use crate::easing::Transition;
use crate::face::Face;
use crate::frame::RenderFrame;
use crate::orientation::{Orientation, SpinTiming};

/// Pointer position in device-independent pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Interaction constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub drag_sensitivity: f64,
    /// Releases closer than this to the press point count as clicks.
    pub click_threshold_px: f64,
    pub snap_duration_secs: f64,
    pub spin: SpinTiming,
    pub initial_orientation: Orientation,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            drag_sensitivity: DRAG_SENSITIVITY,
            click_threshold_px: CLICK_THRESHOLD_PX,
            snap_duration_secs: SNAP_DURATION_SECS,
            spin: SpinTiming::default(),
            initial_orientation: Orientation::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    Spin,
    Snap,
}

/// A flow waiting for its animation to finish.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Settle {
    pub ticket: u64,
    pub kind: FlowKind,
    pub face: Face,
    pub from: Orientation,
    pub target: Orientation,
    pub duration_secs: f64,
}

/// Pointer tracking held for exactly one drag. Dropping it ends the drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerCapture {
    start: Point,
    last: Point,
}

impl PointerCapture {
    fn new(at: Point) -> Self {
        Self { start: at, last: at }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn last(&self) -> Point {
        self.last
    }
}

/// Transient gesture/animation state.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionState {
    capture: Option<PointerCapture>,
    spinning: bool,
    transition_secs: f64,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            capture: None,
            spinning: false,
            transition_secs: DEFAULT_TRANSITION_SECS,
        }
    }
}

impl InteractionState {
    pub fn is_dragging(&self) -> bool {
        self.capture.is_some()
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn capture(&self) -> Option<&PointerCapture> {
        self.capture.as_ref()
    }

    /// Duration of the most recent spin or snap animation.
    pub fn transition_secs(&self) -> f64 {
        self.transition_secs
    }
}

/// Everything the presentation layer reads.
#[derive(Clone, Debug, PartialEq)]
pub struct CubeState {
    orientation: Orientation,
    interaction: InteractionState,
    active: Option<Face>,
    pending: Option<Settle>,
}

impl CubeState {
    fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            interaction: InteractionState::default(),
            active: None,
            pending: None,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Face whose wisdom is on display. Lags the orientation until a flow settles.
    pub fn active_face(&self) -> Option<Face> {
        self.active
    }

    pub fn pending(&self) -> Option<&Settle> {
        self.pending.as_ref()
    }
}

pub struct InteractionController<R> {
    state: CubeState,
    catalogue: Catalogue,
    tuning: Tuning,
    rng: R,
    next_ticket: u64,
}

impl<R: Rng> InteractionController<R> {
    pub fn new(catalogue: Catalogue, tuning: Tuning, rng: R) -> Self {
        Self {
            state: CubeState::new(tuning.initial_orientation),
            catalogue,
            tuning,
            rng,
            next_ticket: 1,
        }
    }

    pub fn state(&self) -> &CubeState {
        &self.state
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn orientation(&self) -> Orientation {
        self.state.orientation
    }

    pub fn is_dragging(&self) -> bool {
        self.state.interaction.is_dragging()
    }

    pub fn is_spinning(&self) -> bool {
        self.state.interaction.spinning
    }

    pub fn active_wisdom(&self) -> Option<&Wisdom> {
        self.state.active.map(|face| self.catalogue.get(face))
    }

    pub fn frame(&self) -> RenderFrame {
        let transition = self
            .is_spinning()
            .then(|| Transition::ease_out(self.state.interaction.transition_secs));
        RenderFrame {
            orientation: self.state.orientation,
            spinning: self.is_spinning(),
            dragging: self.is_dragging(),
            transition,
        }
    }

    /// Show the first catalogue entry without animating. Only applies
    /// before anything has been selected.
    pub fn present_initial(&mut self) -> Option<Face> {
        if self.state.active.is_some() {
            return None;
        }
        let face = self.catalogue.first().face;
        self.state.active = Some(face);
        Some(face)
    }

    /// Begin a drag. Refused while a spin or snap is playing.
    pub fn press_start(&mut self, at: Point) -> bool {
        if self.state.interaction.spinning {
            return false;
        }
        self.state.interaction.capture = Some(PointerCapture::new(at));
        true
    }

    /// Rotate by the travel since the previous sample. Ignored unless dragging.
    pub fn press_move(&mut self, at: Point) -> bool {
        let Some(capture) = self.state.interaction.capture.as_mut() else {
            return false;
        };
        let dx = at.x - capture.last.x;
        let dy = at.y - capture.last.y;
        capture.last = at;
        self.state
            .orientation
            .apply_drag(dx, dy, self.tuning.drag_sensitivity);
        true
    }

    /// End a drag. Short travel is a click and spins; anything else snaps.
    pub fn press_end(&mut self, at: Point) -> Option<Settle> {
        let capture = self.state.interaction.capture.take()?;
        if at.distance(capture.start) < self.tuning.click_threshold_px {
            self.request_spin()
        } else {
            Some(self.snap())
        }
    }

    /// Spin to a random face. Refused while already spinning. A drag in
    /// progress is cut short: the spin owns the orientation from here on.
    pub fn request_spin(&mut self) -> Option<Settle> {
        if self.state.interaction.spinning {
            return None;
        }
        let from = self.state.orientation;
        let plan = from.plan_random_spin(&self.tuning.spin, &mut self.rng);
        Some(self.begin(FlowKind::Spin, plan.face, plan.target, plan.duration_secs))
    }

    fn snap(&mut self) -> Settle {
        let snap = self.state.orientation.nearest_face_snap_target();
        let duration = self.tuning.snap_duration_secs;
        self.begin(FlowKind::Snap, snap.face, snap.target, duration)
    }

    fn begin(&mut self, kind: FlowKind, face: Face, target: Orientation, duration_secs: f64) -> Settle {
        let settle = Settle {
            ticket: self.next_ticket,
            kind,
            face,
            from: self.state.orientation,
            target,
            duration_secs,
        };
        self.next_ticket += 1;

        let interaction = &mut self.state.interaction;
        interaction.capture = None;
        interaction.spinning = true;
        interaction.transition_secs = duration_secs;
        self.state.orientation = target;
        self.state.pending = Some(settle);
        settle
    }

    /// Finish the flow that issued `ticket`: commit its face and go idle.
    /// Stale or unknown tickets do nothing.
    pub fn complete(&mut self, ticket: u64) -> Option<Face> {
        match self.state.pending {
            Some(settle) if settle.ticket == ticket => {
                self.state.pending = None;
                self.state.active = Some(settle.face);
                self.state.interaction.spinning = false;
                Some(settle.face)
            }
            _ => None,
        }
    }

    /// Release the pointer capture and revoke any pending completion.
    /// Returns the revoked flow, if there was one.
    pub fn teardown(&mut self) -> Option<Settle> {
        self.state.interaction.capture = None;
        self.state.interaction.spinning = false;
        self.state.pending.take()
    }
}
