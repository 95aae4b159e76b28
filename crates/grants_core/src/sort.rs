use std::cmp::Ordering;

use crate::model::Grant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Affinity,
    Deadline,
    Title,
}

impl SortField {
    pub fn label(self) -> &'static str {
        match self {
            SortField::Affinity => "affinity",
            SortField::Deadline => "deadline",
            SortField::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "Ascending",
            SortDirection::Descending => "Descending",
        }
    }
}

/// Current sort selection. Defaults to highest affinity first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn compare(&self, a: &Grant, b: &Grant) -> Ordering {
        let ordering = match self.field {
            SortField::Affinity => a.company_affinity.total_cmp(&b.company_affinity),
            SortField::Deadline => a.deadline.cmp(&b.deadline),
            SortField::Title => compare_titles(&a.title, &b.title),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Stable sort of any slice whose elements expose a grant.
    pub fn sort_by_grant<T>(&self, items: &mut [T], grant: impl Fn(&T) -> &Grant) {
        items.sort_by(|a, b| self.compare(grant(a), grant(b)));
    }
}

/// Case-folded comparison; titles differing only in case put lowercase first.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
