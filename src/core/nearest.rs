/// Index of the first item whose key is not less than `query`.
///
/// `items` must be sorted ascending by `key`.
pub fn bisect_left_by<T, K>(items: &[T], query: f64, key: K) -> usize
where
    K: Fn(&T) -> f64,
{
    items.partition_point(|item| key(item) < query)
}

/// Item whose key is closest to `query` in an ascending slice.
///
/// On an exact tie the earlier item wins.
pub fn nearest_by<T, K>(items: &[T], query: f64, key: K) -> Option<&T>
where
    K: Fn(&T) -> f64,
{
    let index = bisect_left_by(items, query, &key);
    let before = index.checked_sub(1).and_then(|i| items.get(i));
    let after = items.get(index);
    match (before, after) {
        (None, after) => after,
        (before, None) => before,
        (Some(before), Some(after)) => {
            if query - key(before) > key(after) - query {
                Some(after)
            } else {
                Some(before)
            }
        }
    }
}
