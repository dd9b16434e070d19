//! Ledger read filters.

use crate::entry::Entry;

/// Filter for `Ledger::get`.
///
/// Entries are matched on `kind` equality and `exclude_kind` inequality
/// first; `limit` then keeps only the most recent matches. A limit of zero
/// means no limit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pub kind: Option<String>,
    pub exclude_kind: Option<String>,
    pub limit: Option<usize>,
}

impl Query {
    /// Match every entry.
    pub fn all() -> Self {
        Self::default()
    }

    /// Match entries of one kind.
    pub fn by_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Skip entries of one kind.
    pub fn without_kind(mut self, kind: impl Into<String>) -> Self {
        self.exclude_kind = Some(kind.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The limit to apply, if any.
    pub fn effective_limit(&self) -> Option<usize> {
        self.limit.filter(|&limit| limit > 0)
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        self.kind.as_deref().map_or(true, |kind| entry.is_kind(kind))
            && self
                .exclude_kind
                .as_deref()
                .map_or(true, |kind| !entry.is_kind(kind))
    }

    /// Copy out matching entries, oldest first.
    pub(crate) fn select<'a, I>(&self, entries: I) -> Vec<Entry>
    where
        I: DoubleEndedIterator<Item = &'a Entry>,
    {
        let matching = entries.rev().filter(|entry| self.matches(entry));
        let mut selected: Vec<Entry> = match self.effective_limit() {
            Some(limit) => matching.take(limit).cloned().collect(),
            None => matching.cloned().collect(),
        };
        selected.reverse();
        selected
    }
}
