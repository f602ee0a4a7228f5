//! Engine properties over arbitrary orientations, plus the controller
//! driven end to end through whole gestures.

use cube_core::constants::{FULL_TURN, SPIN_MAX_SECS, SPIN_MIN_SECS};
use cube_core::{
    Catalogue, Face, FlowKind, InteractionController, Orientation, Point, SpinTiming, Tuning,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn angle() -> impl Strategy<Value = f64> {
    -5000.0..5000.0f64
}

fn face() -> impl Strategy<Value = Face> {
    (0usize..6).prop_map(|i| Face::ALL[i])
}

proptest! {
    #[test]
    fn argmax_dominates_every_score(x in angle(), y in angle()) {
        let scores = Orientation::new(x, y).score_faces();
        prop_assert_eq!(scores.iter().count(), 6);
        let (best, top) = scores.best();
        prop_assert_eq!(scores.get(best), top);
        for (_, s) in scores.iter() {
            prop_assert!(top >= s);
        }
    }

    #[test]
    fn opposite_faces_cancel(x in angle(), y in angle()) {
        let s = Orientation::new(x, y).score_faces();
        prop_assert!((s.get(Face::Front) + s.get(Face::Back)).abs() < 1e-12);
        prop_assert!((s.get(Face::Right) + s.get(Face::Left)).abs() < 1e-12);
        prop_assert!((s.get(Face::Top) + s.get(Face::Bottom)).abs() < 1e-12);
    }

    #[test]
    fn snap_is_nearest_congruent_copy(x in angle(), y in angle()) {
        let current = Orientation::new(x, y);
        let snap = current.nearest_face_snap_target();
        let home = snap.face.home();

        for (cur, tgt, h) in [(x, snap.target.x, home.x), (y, snap.target.y, home.y)] {
            let turns = (tgt - h) / FULL_TURN;
            prop_assert!((turns - turns.round()).abs() < 1e-9, "not congruent to home");
            prop_assert!((tgt - cur).abs() <= 180.0 + 1e-9);
            for k in [-1.0, 1.0] {
                let other = tgt + k * FULL_TURN;
                prop_assert!((tgt - cur).abs() <= (other - cur).abs() + 1e-9);
            }
        }
    }

    #[test]
    fn snap_is_idempotent_at_rest(f in face(), kx in -5i32..5, ky in -5i32..5) {
        let home = f.home();
        let at_rest = Orientation::new(
            home.x + f64::from(kx) * FULL_TURN,
            home.y + f64::from(ky) * FULL_TURN,
        );
        let snap = at_rest.nearest_face_snap_target();
        prop_assert_eq!(snap.face, f);
        prop_assert_eq!(snap.target, at_rest);
    }

    #[test]
    fn spin_moves_forward_by_at_least_extra_turns(
        x in angle(),
        y in angle(),
        f in face(),
        ex in 0u32..=1,
        ey in 1u32..=2,
    ) {
        let timing = SpinTiming::default();
        let plan = Orientation::new(x, y).plan_spin_to(f, ex, ey, &timing);
        let home = f.home();

        let floor_x = x + f64::from(ex) * FULL_TURN;
        let floor_y = y + f64::from(ey) * FULL_TURN;
        prop_assert!(plan.target.x >= floor_x - 1e-9);
        prop_assert!(plan.target.y >= floor_y - 1e-9);
        // Smallest such copy: one turn less would fall short.
        prop_assert!(plan.target.x - FULL_TURN < floor_x);
        prop_assert!(plan.target.y - FULL_TURN < floor_y);

        let turns_x = (plan.target.x - home.x) / FULL_TURN;
        prop_assert!((turns_x - turns_x.round()).abs() < 1e-9);
        prop_assert!(plan.duration_secs >= SPIN_MIN_SECS && plan.duration_secs <= SPIN_MAX_SECS);
    }

    #[test]
    fn random_spin_duration_in_range(x in angle(), y in angle(), seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let plan = Orientation::new(x, y).plan_random_spin(&SpinTiming::default(), &mut rng);
        prop_assert!(plan.duration_secs >= 0.8 && plan.duration_secs <= 1.5);
        prop_assert!(plan.target.y >= y + FULL_TURN - 1e-9);
        prop_assert!(plan.target.x >= x - 1e-9);
    }
}

#[test]
fn default_tilt_snaps_to_front() {
    let snap = Orientation::new(-15.0, -25.0).nearest_face_snap_target();
    assert_eq!(snap.face, Face::Front);
    assert!(snap.target.x.abs() <= FULL_TURN);
    assert!(snap.target.y.abs() <= FULL_TURN);
    assert_eq!(snap.target, Orientation::new(0.0, 0.0));
}

#[test]
fn repeated_spins_to_same_face_keep_moving_forward() {
    let timing = SpinTiming::default();
    let mut at = Orientation::new(0.0, 0.0);
    for _ in 0..10 {
        let plan = at.plan_spin_to(Face::Left, 0, 1, &timing);
        assert!(plan.target.x >= at.x);
        assert!(plan.target.y > at.y);
        assert!((0.8..=1.5).contains(&plan.duration_secs));
        at = plan.target;
    }
    // Ten yaw turns accumulated, still squarely on the left face.
    assert_eq!(at.reduced(), Face::Left.home());
}

#[test]
fn click_then_drag_session() {
    let mut c = InteractionController::new(
        Catalogue::builtin(),
        Tuning::default(),
        SmallRng::seed_from_u64(7),
    );
    c.present_initial();

    // Click: spin to a random face.
    assert!(c.press_start(Point::new(200.0, 200.0)));
    let spin = c.press_end(Point::new(202.0, 201.0)).unwrap();
    assert_eq!(spin.kind, FlowKind::Spin);
    assert!(!c.press_start(Point::new(0.0, 0.0)), "busy while spinning");
    assert_eq!(c.complete(spin.ticket), Some(spin.face));

    // Drag a quarter turn of pitch upward, then release: top or bottom.
    let start = c.orientation();
    assert!(c.press_start(Point::new(0.0, 0.0)));
    for step in 1..=15 {
        c.press_move(Point::new(0.0, f64::from(step) * 10.0));
    }
    assert!((c.orientation().x - (start.x - 90.0)).abs() < 1e-9);
    let snap = c.press_end(Point::new(0.0, 150.0)).unwrap();
    assert_eq!(snap.kind, FlowKind::Snap);
    assert_eq!(c.orientation(), snap.target);
    assert_eq!(c.complete(snap.ticket), Some(snap.face));
    assert_eq!(
        c.active_wisdom().map(|w| w.face),
        Some(snap.face),
        "panel shows the snapped face"
    );
}
