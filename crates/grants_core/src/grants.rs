use crate::model::Grant;
use crate::sort::SortSpec;

/// Client-assigned identity of a cached grant. Stable across sorting and deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GrantKey(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct LocalGrant {
    pub key: GrantKey,
    pub grant: Grant,
}

/// Local mirror of the backend grant list plus the grant page's UI state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GrantsState {
    items: Vec<LocalGrant>,
    next_key: u64,
    expanded: Option<GrantKey>,
    sort: SortSpec,
    add_form_open: bool,
}

impl GrantsState {
    pub fn items(&self) -> &[LocalGrant] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.sort
    }

    pub fn add_form_open(&self) -> bool {
        self.add_form_open
    }

    pub(crate) fn set_add_form_open(&mut self, open: bool) {
        self.add_form_open = open;
    }

    pub fn key_at(&self, index: usize) -> Option<GrantKey> {
        self.items.get(index).map(|item| item.key)
    }

    pub fn position_of(&self, key: GrantKey) -> Option<usize> {
        self.items.iter().position(|item| item.key == key)
    }

    pub fn get(&self, key: GrantKey) -> Option<&Grant> {
        self.items
            .iter()
            .find(|item| item.key == key)
            .map(|item| &item.grant)
    }

    pub fn expanded_key(&self) -> Option<GrantKey> {
        self.expanded
    }

    /// Local index of the expanded card, if any.
    pub fn expanded_index(&self) -> Option<usize> {
        self.expanded.and_then(|key| self.position_of(key))
    }

    /// Replaces the whole cache with a fresh backend listing.
    ///
    /// A listed record matching a cached one on `(title, url)` keeps the cached
    /// key (first unused match), so results and confirmations issued before the
    /// reload still find their card.
    pub(crate) fn replace_all(&mut self, grants: Vec<Grant>) {
        let mut previous = std::mem::take(&mut self.items);
        let mut items = Vec::with_capacity(grants.len());
        for grant in grants {
            let reused = previous
                .iter()
                .position(|old| old.grant.same_record(&grant))
                .map(|index| previous.remove(index).key);
            let key = match reused {
                Some(key) => key,
                None => self.allocate_key(),
            };
            items.push(LocalGrant { key, grant });
        }
        self.items = items;
        if let Some(key) = self.expanded {
            if self.position_of(key).is_none() {
                self.expanded = None;
            }
        }
        self.apply_sort();
    }

    /// Appends a server-confirmed record and re-sorts.
    pub(crate) fn insert(&mut self, grant: Grant) -> GrantKey {
        let key = self.allocate_key();
        self.items.push(LocalGrant { key, grant });
        self.apply_sort();
        key
    }

    pub(crate) fn remove(&mut self, key: GrantKey) -> Option<Grant> {
        let index = self.position_of(key)?;
        if self.expanded == Some(key) {
            self.expanded = None;
        }
        Some(self.items.remove(index).grant)
    }

    /// Overwrites the record in place, keeping its position and key.
    pub(crate) fn replace(&mut self, key: GrantKey, grant: Grant) -> bool {
        match self.items.iter_mut().find(|item| item.key == key) {
            Some(item) => {
                item.grant = grant;
                true
            }
            None => false,
        }
    }

    /// Single-selection toggle. Returns false if the index is out of range.
    pub(crate) fn toggle_expanded(&mut self, index: usize) -> bool {
        let Some(key) = self.key_at(index) else {
            return false;
        };
        self.expanded = if self.expanded == Some(key) {
            None
        } else {
            Some(key)
        };
        true
    }

    pub(crate) fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        self.apply_sort();
    }

    fn apply_sort(&mut self) {
        let sort = self.sort;
        sort.sort_by_grant(&mut self.items, |item| &item.grant);
    }

    fn allocate_key(&mut self) -> GrantKey {
        self.next_key += 1;
        GrantKey(self.next_key)
    }
}

/// Position of `target` in a backend listing, matched on `(title, url)`. First match wins.
pub fn find_backend_position(backend: &[Grant], target: &Grant) -> Option<usize> {
    backend.iter().position(|candidate| candidate.same_record(target))
}
