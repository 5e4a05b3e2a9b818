use scrolly_charts::charts::TooltipPosition;
use scrolly_charts::core::{bisect_left_by, nearest_by};

#[test]
fn bisect_left_returns_first_not_less_index() {
    let items = [1.0, 2.0, 2.0, 5.0];
    assert_eq!(bisect_left_by(&items, 0.0, |v| *v), 0);
    assert_eq!(bisect_left_by(&items, 2.0, |v| *v), 1);
    assert_eq!(bisect_left_by(&items, 3.0, |v| *v), 3);
    assert_eq!(bisect_left_by(&items, 9.0, |v| *v), 4);
}

#[test]
fn nearest_picks_closest_and_prefers_earlier_on_ties() {
    let items = [10.0, 20.0, 40.0];
    assert_eq!(nearest_by(&items, 14.0, |v| *v), Some(&10.0));
    assert_eq!(nearest_by(&items, 16.0, |v| *v), Some(&20.0));
    assert_eq!(nearest_by(&items, 15.0, |v| *v), Some(&10.0));
    assert_eq!(nearest_by(&items, 30.0, |v| *v), Some(&20.0));
    assert_eq!(nearest_by(&items, 20.0, |v| *v), Some(&20.0));
}

#[test]
fn nearest_clamps_to_ends() {
    let items = [10.0, 20.0];
    assert_eq!(nearest_by(&items, -100.0, |v| *v), Some(&10.0));
    assert_eq!(nearest_by(&items, 100.0, |v| *v), Some(&20.0));
    assert_eq!(nearest_by::<f64, _>(&[], 1.0, |v| *v), None);
}

#[test]
fn tooltip_flips_left_past_threshold() {
    let left = TooltipPosition::beside(300.0, 40.0, 200.0, 500.0, 260.0);
    assert!(!left.flipped);
    assert_eq!(left.left, 300.0);
    assert_eq!(left.top, 40.0);

    let right = TooltipPosition::beside(800.0, 40.0, 650.0, 500.0, 260.0);
    assert!(right.flipped);
    assert_eq!(right.left, 540.0);
}
