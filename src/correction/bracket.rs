/// Position of a query value within a sorted table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// The query equals the entry at this index.
    Exact(usize),
    /// The query lies within `[key(i), key(i + 1)]`.
    Between(usize, usize),
    /// The query lies outside the column's range (or is NaN).
    OutOfRange,
}

impl Bracket {
    /// Index pair of the bracket. Out-of-range queries collapse onto the first entry.
    pub fn indices(self) -> (usize, usize) {
        match self {
            Bracket::Exact(i) => (i, i),
            Bracket::Between(lo, hi) => (lo, hi),
            Bracket::OutOfRange => (0, 0),
        }
    }

    pub fn is_degenerate(self) -> bool {
        let (lo, hi) = self.indices();
        lo == hi
    }
}

/// Locate `query` in a column sorted ascending by `key`.
///
/// An exact match anywhere wins; otherwise the first adjacent pair whose inclusive
/// range contains the query is returned.
pub fn find_bracket<T, F>(items: &[T], query: f64, key: F) -> Bracket
where
    F: Fn(&T) -> f64,
{
    if let Some(i) = items.iter().position(|item| key(item) == query) {
        return Bracket::Exact(i);
    }
    items
        .windows(2)
        .position(|pair| query >= key(&pair[0]) && query <= key(&pair[1]))
        .map(|i| Bracket::Between(i, i + 1))
        .unwrap_or(Bracket::OutOfRange)
}
