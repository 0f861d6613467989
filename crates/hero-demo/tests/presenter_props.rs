//! Property tests for the half-block presenter.

use hero_demo::presenter::AnsiPresenter;
use hero_render::{Pixmap, Rgba};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_pixel_pair_becomes_one_cell(w in 1u32..24, h in 1u32..24, shade in any::<u8>()) {
        let mut pixmap = Pixmap::new(w, h, 1.0).expect("pixmap");
        pixmap.fill(Rgba::rgb(shade, shade, shade));
        let mut presenter = AnsiPresenter::new(Vec::new(), Rgba::WHITE);
        presenter.present(&pixmap).expect("present");
        let text = String::from_utf8(presenter.into_inner().expect("writer")).expect("utf8");

        let rows = h.div_ceil(2) as usize;
        prop_assert_eq!(text.matches('\u{2580}').count(), w as usize * rows);
        prop_assert_eq!(text.matches("\r\n").count(), rows);
        prop_assert_eq!(text.matches("\x1b[38;2;").count(), rows);
    }
}
