//! Property checks for ranges and box drawing.

use proptest::prelude::*;

use spark_settings::{CharGrid, Join, Range, Weight};

const WEIGHTS: [Weight; 5] = [Weight::None, Weight::Light, Weight::Heavy, Weight::Double, Weight::Ascii];

fn weight() -> impl Strategy<Value = Weight> {
    prop::sample::select(WEIGHTS.to_vec())
}

/// A range with optional bounds, minimum never above maximum.
fn range() -> impl Strategy<Value = Range> {
    (
        prop::option::of(-1000.0f32..1000.0),
        prop::option::of(-1000.0f32..1000.0),
        0u32..4,
    )
        .prop_map(|(a, b, decimals)| {
            let (minimum, maximum) = match (a, b) {
                (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
                other => other,
            };
            Range::new(minimum, maximum, decimals).unwrap()
        })
}

/// A closed range with whole-number bounds.
fn closed_range() -> impl Strategy<Value = Range> {
    (-1000i32..=0, 0i32..1000, 0u32..4).prop_map(|(minimum, maximum, decimals)| {
        Range::closed(minimum as f32, maximum as f32, decimals).unwrap()
    })
}

/// Top-left corner, width and height of a box that fits a 16x16 grid.
fn rect() -> impl Strategy<Value = (i32, i32, i32, i32)> {
    (0i32..8, 0i32..8, 2i32..=8, 2i32..=8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn clamp_is_idempotent(range in range(), value in -5000.0f32..5000.0) {
        let once = range.clamp(value);
        prop_assert_eq!(range.clamp(once), once);
    }

    #[test]
    fn clamp_int_is_idempotent(range in range(), value in -5000i32..5000) {
        let once = range.clamp_int(value);
        prop_assert_eq!(range.clamp_int(once), once);
    }

    #[test]
    fn format_width_is_stable(range in closed_range(), value in -5000.0f32..5000.0) {
        let sign = usize::from(range.has_negative());
        let text = range.format(value);
        prop_assert_eq!(text.chars().count(), range.width() + sign, "{:?} formatted as {}", range, text);
    }

    #[test]
    fn join_lookup_is_symmetric(up in weight(), down in weight(), left in weight(), right in weight()) {
        if let Some(join) = Join::find(up, down, left, right) {
            prop_assert_eq!((join.up, join.down, join.left, join.right), (up, down, left, right));
        }
    }

    #[test]
    fn healing_overlapping_boxes_settles(a in rect(), b in rect()) {
        let mut grid = CharGrid::new(16, 16);
        grid.move_to(a.0, a.1).draw_box(a.2, a.3);
        grid.move_to(b.0, b.1).draw_box(b.2, b.3);

        let (top, left) = (a.0.min(b.0), a.1.min(b.1));
        let (bottom, right) = ((a.0 + a.3).max(b.0 + b.3), (a.1 + a.2).max(b.1 + b.2));
        grid.heal(top, left, bottom, right);
        let settled = grid.rows();

        grid.heal(top, left, bottom, right);
        prop_assert_eq!(grid.rows(), settled);
    }

    #[test]
    fn fresh_box_is_already_healed((row, column, width, height) in rect()) {
        let mut grid = CharGrid::new(16, 16);
        grid.move_to(row, column).draw_box(width, height);
        let drawn = grid.rows();

        grid.heal(row, column, row + height, column + width);
        prop_assert_eq!(grid.rows(), drawn);

        let (bottom, right) = (row + height - 1, column + width - 1);
        prop_assert_eq!(grid.get(row, column), Some('┌'));
        prop_assert_eq!(grid.get(row, right), Some('┐'));
        prop_assert_eq!(grid.get(bottom, column), Some('└'));
        prop_assert_eq!(grid.get(bottom, right), Some('┘'));
    }
}

#[test]
fn test_every_join_is_found_by_its_arms() {
    for join in Join::all() {
        let found = Join::find(join.up, join.down, join.left, join.right).unwrap();
        assert_eq!(
            (found.up, found.down, found.left, found.right),
            (join.up, join.down, join.left, join.right)
        );
    }
}
