use crate::grants::{GrantKey, GrantsState};
use crate::model::ReportId;
use crate::notify::Notifications;
use crate::profile::ProfileState;
use crate::reports::ReportsState;
use crate::view_model::{self, AppViewModel, NotificationView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Grants,
    Profile,
    Reports,
}

/// A destructive action waiting for the user's yes/no.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    DeleteGrant { key: GrantKey },
    DeleteReport { id: ReportId },
}

impl Confirmation {
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirmation::DeleteGrant { .. } => "Are you sure you want to delete this grant?",
            Confirmation::DeleteReport { .. } => "Are you sure you want to delete this report?",
        }
    }
}

/// Session store for all three pages. Owned by the front end and threaded through `update`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    page: Page,
    pub(crate) grants: GrantsState,
    pub(crate) profile: ProfileState,
    pub(crate) reports: ReportsState,
    pub(crate) notifications: Notifications,
    pub(crate) confirmation: Option<Confirmation>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn grants(&self) -> &GrantsState {
        &self.grants
    }

    pub fn profile(&self) -> &ProfileState {
        &self.profile
    }

    pub fn reports(&self) -> &ReportsState {
        &self.reports
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn confirmation(&self) -> Option<Confirmation> {
        self.confirmation
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            page: self.page,
            grants: view_model::grants_view(&self.grants),
            profile: view_model::profile_view(&self.profile),
            reports: view_model::reports_view(&self.reports),
            notifications: self
                .notifications
                .active()
                .iter()
                .map(|toast| NotificationView {
                    id: toast.id,
                    kind: toast.kind,
                    message: toast.message.clone(),
                })
                .collect(),
            confirmation: self.confirmation.map(|c| c.prompt().to_string()),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn open_page(&mut self, page: Page) {
        self.page = page;
        self.confirmation = None;
        self.dirty = true;
    }
}
