//! Property tests: arbitrary interleavings of taps, dismissals and frames
//! keep the transition state consistent.

use std::time::Duration;

use hero_core::geometry::{Rect, Size};
use hero_widgets::HeroDialogConfig;
use hero_widgets::hero::{HeroConfirmationDialog, MorphInputs, MorphVisuals};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Activate,
    Dismiss(bool),
    Tick(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::Activate),
        1 => any::<bool>().prop_map(Op::Dismiss),
        4 => (1u64..120).prop_map(Op::Tick),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn lifecycle_invariants_hold(ops in prop::collection::vec(op(), 1..60)) {
        let mut dialog = HeroConfirmationDialog::new();
        dialog.layout(Size::new(390.0, 844.0));
        let mut pending: Option<bool> = None;

        for op in ops {
            match op {
                Op::Activate => {
                    let was_visible = dialog.state().overlay_visible();
                    let accepted = dialog.activate();
                    prop_assert_eq!(accepted, !was_visible);
                }
                Op::Dismiss(choice) => {
                    if dialog.dismiss(choice) {
                        prop_assert!(pending.is_none(), "dismiss accepted twice in one lifecycle");
                        pending = Some(choice);
                    }
                }
                Op::Tick(ms) => {
                    if let Some(outcome) = dialog.tick(Duration::from_millis(ms)) {
                        prop_assert_eq!(Some(outcome.user_confirmed), pending.take());
                        prop_assert!(!dialog.state().overlay_visible());
                    }
                }
            }

            let state = dialog.state();
            prop_assert_eq!(dialog.phase().is_visible(), state.overlay_visible());
            if state.snapshot().is_some() {
                prop_assert!(state.overlay_visible());
            }
            if state.overlay_visible() {
                prop_assert!(state.snapshot().is_some());
            }
            if state.morphed() {
                prop_assert!(state.overlay_visible());
            }

            let visuals = dialog.visuals();
            prop_assert!((0.0..=1.0).contains(&visuals.scrim_opacity));
            prop_assert!((0.0..=1.0).contains(&visuals.content_opacity));
            prop_assert!((0.0..=1.0).contains(&visuals.stand_in_opacity));
            prop_assert!(visuals.content_blur >= 0.0 && visuals.stand_in_blur >= 0.0);
        }
    }

    #[test]
    fn in_range_progress_stays_between_endpoints(
        p in 0.0f64..=1.0,
        q in 0.0f64..=1.0,
        x in 0.0f64..300.0,
        y in 0.0f64..700.0,
        w in 1.0f64..300.0,
        h in 1.0f64..100.0,
    ) {
        let config = HeroDialogConfig::default();
        let source = Rect::new(x, y, w, h);
        let visuals = MorphVisuals::compute(
            &MorphInputs {
                morph: p,
                cross_fade: q,
                source,
                container: Size::new(400.0, 800.0),
                sheet_height: 280.0,
            },
            &config,
        );
        let radius = visuals.clip.radius();
        prop_assert!((30.0..=45.0).contains(&radius));
        prop_assert!(visuals.frame.width >= w.min(384.0) - 1e-9);
        prop_assert!(visuals.frame.width <= w.max(384.0) + 1e-9);
        prop_assert!(visuals.frame.height >= h.min(280.0) - 1e-9);
        prop_assert!(visuals.frame.height <= h.max(280.0) + 1e-9);
        prop_assert!((visuals.stand_in_opacity + q as f32 - 1.0).abs() < 1e-6);
    }
}
