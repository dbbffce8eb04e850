//! Sortable, filterable table view model.
//!
//! A [`TableView`] owns the source records of one table screen together with
//! the free-text query, the discrete filters and the sort spec. Every change
//! recomputes the derived row order, so readers always see a consistent view.
//!
//! The derived view is stored as indices into the source list; no record is
//! cloned by filtering or sorting.

use std::cmp::Ordering;

/// Direction of a column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Header indicator glyph.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Active sort: which column, which way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<C> {
    pub column: C,
    pub direction: SortDirection,
}

/// A record that can be listed in a [`TableView`].
pub trait TableRecord {
    /// Column identifier used for sorting.
    type Column: Copy + Eq + std::fmt::Debug;

    /// Whether any searchable field contains `query`.
    ///
    /// `query` is already lowercased and non-empty.
    fn matches_query(&self, query: &str) -> bool;

    /// Natural three-way order of two records on `column`.
    fn compare_by(&self, other: &Self, column: Self::Column) -> Ordering;
}

/// Exact-match discrete filters applied on top of the text query.
pub trait RecordFilter<R> {
    fn admits(&self, record: &R) -> bool;
}

/// No discrete filters.
impl<R> RecordFilter<R> for () {
    fn admits(&self, _record: &R) -> bool {
        true
    }
}

/// View model for one table screen.
#[derive(Debug, Clone)]
pub struct TableView<R: TableRecord, F = ()> {
    records: Vec<R>,
    query: String,
    filters: F,
    sort: Option<SortSpec<R::Column>>,
    /// Indices into `records`, in display order.
    view: Vec<usize>,
}

impl<R: TableRecord, F: RecordFilter<R> + Default> TableView<R, F> {
    pub fn new(records: Vec<R>) -> Self {
        Self::with_filters(records, F::default())
    }
}

impl<R: TableRecord, F: RecordFilter<R>> TableView<R, F> {
    pub fn with_filters(records: Vec<R>, filters: F) -> Self {
        let mut table = Self {
            records,
            query: String::new(),
            filters,
            sort: None,
            view: Vec::new(),
        };
        table.recompute();
        table
    }

    // ── Reads ──────────────────────────────────────────────────────────

    /// Source records in their original order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Derived rows in display order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &R> + '_ {
        self.view.iter().map(move |&i| &self.records[i])
    }

    /// Row at display position `index`.
    pub fn row(&self, index: usize) -> Option<&R> {
        self.view.get(index).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    pub fn source_len(&self) -> usize {
        self.records.len()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> &F {
        &self.filters
    }

    pub fn sort(&self) -> Option<SortSpec<R::Column>> {
        self.sort
    }

    /// Direction of the active sort if it is on `column`.
    pub fn sort_direction(&self, column: R::Column) -> Option<SortDirection> {
        self.sort
            .filter(|spec| spec.column == column)
            .map(|spec| spec.direction)
    }

    // ── Updates ────────────────────────────────────────────────────────

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.recompute();
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.recompute();
    }

    pub fn pop_query_char(&mut self) {
        if self.query.pop().is_some() {
            self.recompute();
        }
    }

    pub fn clear_query(&mut self) {
        if !self.query.is_empty() {
            self.query.clear();
            self.recompute();
        }
    }

    /// Modify the discrete filters and recompute.
    pub fn filters_mut(&mut self, change: impl FnOnce(&mut F)) {
        change(&mut self.filters);
        self.recompute();
    }

    /// Request a sort on `column`.
    ///
    /// The same column while ascending flips to descending; anything else
    /// (a new column, or the same column while descending) sorts ascending.
    pub fn request_sort(&mut self, column: R::Column) {
        let direction = match self.sort {
            Some(spec)
                if spec.column == column && spec.direction == SortDirection::Ascending =>
            {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortSpec { column, direction });
        self.recompute();
    }

    /// Drop the sort spec, restoring source order.
    pub fn clear_sort(&mut self) {
        if self.sort.take().is_some() {
            self.recompute();
        }
    }

    /// Mutate every source record matching `predicate`. Returns how many changed.
    pub fn update_where(
        &mut self,
        predicate: impl Fn(&R) -> bool,
        mut change: impl FnMut(&mut R),
    ) -> usize {
        let mut touched = 0;
        for record in self.records.iter_mut().filter(|r| predicate(r)) {
            change(record);
            touched += 1;
        }
        if touched > 0 {
            self.recompute();
        }
        touched
    }

    fn recompute(&mut self) {
        let query = self.query.to_lowercase();
        let records = &self.records;
        let filters = &self.filters;

        self.view.clear();
        self.view.extend(
            records
                .iter()
                .enumerate()
                .filter(|(_, r)| filters.admits(r))
                .filter(|(_, r)| query.is_empty() || r.matches_query(&query))
                .map(|(i, _)| i),
        );

        // `sort_by` is stable: ties keep source order.
        if let Some(spec) = self.sort {
            self.view.sort_by(|&a, &b| {
                spec.direction
                    .apply(records[a].compare_by(&records[b], spec.column))
            });
        }
    }
}
