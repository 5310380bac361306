//! Property-based invariant tests for `IndexResolver` and `AutoscrollEngine`.
//!
//! 1. Resolved index always within `[0, row_count - 1]`
//! 2. Resolution is stable: re-resolving from the result yields the result
//! 3. Target is monotone in the item center
//! 4. Boundary jitter inside the dead band never moves the item
//! 5. Autoscroll is active iff the item is inside the edge zone
//! 6. Autoscroll rate is non-increasing in distance and capped

use proptest::prelude::*;
use reorder_list::{
    AutoscrollConfig, AutoscrollEngine, IndexResolver, Point, Rect, RowLayout,
};

#[derive(Debug)]
struct Uniform {
    rows: usize,
    height: f32,
}

impl RowLayout for Uniform {
    fn row_count(&self) -> usize {
        self.rows
    }

    fn frame_of(&self, index: usize) -> Rect {
        Rect::new(0.0, index as f32 * self.height, 320.0, self.height)
    }

    fn viewport_bounds(&self) -> Rect {
        Rect::from_size(320.0, 480.0)
    }

    fn content_offset(&self) -> Point {
        Point::ZERO
    }

    fn scroll_by(&mut self, _delta: f32) -> f32 {
        0.0
    }
}

fn layout_strategy() -> impl Strategy<Value = Uniform> {
    (1usize..40, 8.0f32..120.0).prop_map(|(rows, height)| Uniform { rows, height })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn target_in_bounds(layout in layout_strategy(), center in -5_000.0f32..5_000.0, dragged in 0usize..64) {
        let target = IndexResolver::target_index(center, dragged, &layout);
        prop_assert!(target < layout.rows);
    }

    #[test]
    fn resolution_is_stable(layout in layout_strategy(), center in -500.0f32..5_000.0, dragged in 0usize..40) {
        let dragged = dragged % layout.rows;
        let target = IndexResolver::target_index(center, dragged, &layout);
        prop_assert_eq!(IndexResolver::target_index(center, target, &layout), target);
    }

    #[test]
    fn target_is_monotone_in_center(
        layout in layout_strategy(),
        a in -500.0f32..5_000.0,
        b in -500.0f32..5_000.0,
        dragged in 0usize..40,
    ) {
        let dragged = dragged % layout.rows;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            IndexResolver::target_index(lo, dragged, &layout)
                <= IndexResolver::target_index(hi, dragged, &layout)
        );
    }

    #[test]
    fn no_flutter_inside_dead_band(rows in 3usize..30, i in 0usize..28, frac in 0.01f32..0.99) {
        // After moving i -> i+1 the item rests in row i+1; any center strictly
        // between the midpoints of rows i and i+2 keeps it there.
        let layout = Uniform { rows, height: 44.0 };
        let i = i % (rows - 2);
        let low = layout.frame_of(i).mid_y();
        let high = layout.frame_of(i + 2).mid_y();
        let center = low + (high - low) * frac;
        prop_assert_eq!(IndexResolver::target_index(center, i + 1, &layout), i + 1);
    }

    #[test]
    fn autoscroll_active_iff_inside_edge_zone(top in -100.0f32..1_000.0) {
        let engine = AutoscrollEngine::new(AutoscrollConfig::default());
        let state = engine.evaluate(Rect::new(0.0, top, 320.0, 44.0), 10_000.0);
        prop_assert_eq!(state.active, top < 44.0);
    }

    #[test]
    fn autoscroll_rate_monotone_and_capped(a in -200.0f32..200.0, b in -200.0f32..200.0) {
        let config = AutoscrollConfig::default();
        let engine = AutoscrollEngine::new(config);
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        let near_rate = engine.rate_for_distance(near);
        let far_rate = engine.rate_for_distance(far);
        prop_assert!(near_rate >= far_rate);
        prop_assert!(near_rate <= config.max_rate);
        prop_assert!(far_rate >= 0.0);
    }
}
