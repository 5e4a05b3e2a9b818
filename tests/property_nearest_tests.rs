use proptest::prelude::*;
use scrolly_charts::core::nearest_by;

proptest! {
    #[test]
    fn nearest_minimizes_distance_and_prefers_earlier(
        mut values in prop::collection::vec(-1_000i32..1_000, 1..40),
        query in -1_200i32..1_200
    ) {
        values.sort_unstable();
        let items: Vec<f64> = values.iter().map(|v| f64::from(*v)).collect();
        let query = f64::from(query);

        let picked = *nearest_by(&items, query, |v| *v).expect("non-empty");
        let best = items
            .iter()
            .map(|v| (v - query).abs())
            .fold(f64::INFINITY, f64::min);
        prop_assert_eq!((picked - query).abs(), best);

        // Ties resolve to the earlier value.
        let first_best = items
            .iter()
            .copied()
            .find(|v| (v - query).abs() == best)
            .expect("some best");
        prop_assert_eq!(picked, first_best);
    }
}
