//! Page selection over ranked lists.

/// Selects one page of `count` items.
///
/// # Edge Cases
/// - `count == 0`: empty page
/// - `count < 0`: all items
/// - `page < 1`: treated as the first page
/// - Page beyond the end: empty page
pub fn select<T: Clone>(items: &[T], count: i64, page: i64) -> Vec<T> {
    if count == 0 {
        return Vec::new();
    }
    if count < 0 {
        return items.to_vec();
    }
    let page = page.max(1) as usize;
    let count = count as usize;
    let start = (page - 1).saturating_mul(count);
    if start >= items.len() {
        return Vec::new();
    }
    let end = start.saturating_add(count).min(items.len());
    items[start..end].to_vec()
}
