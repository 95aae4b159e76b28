use std::path::PathBuf;
use std::time::Duration;

use crate::{
    CompanyProfile, DocumentUpload, Grant, GrantKey, Page, Report, ReportId, ReportMode,
    SortDirection, SortField,
};

/// Why a backend call failed, as far as the UI is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestFailure {
    /// Message supplied by the backend, shown verbatim where the flow allows it.
    pub detail: Option<String>,
}

impl RequestFailure {
    pub fn with_detail(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User navigated to a page; the page reloads its data.
    PageOpened(Page),
    /// Time passed since the previous tick.
    Tick { elapsed: Duration },
    /// User answered yes to the pending confirmation.
    ConfirmAccepted,
    /// User answered no to the pending confirmation.
    ConfirmDismissed,

    GrantsLoaded(Result<Vec<Grant>, RequestFailure>),
    AddGrantOpened,
    AddGrantClosed,
    /// User submitted the add form.
    AddGrantSubmitted(Grant),
    GrantCreated(Result<Grant, RequestFailure>),
    /// Delete button on the card at this local index.
    DeleteGrantClicked(usize),
    GrantDeleted {
        key: GrantKey,
        result: Result<(), RequestFailure>,
    },
    /// Won badge on the card at this local index.
    ToggleWonClicked(usize),
    WonToggled {
        key: GrantKey,
        result: Result<Grant, RequestFailure>,
    },
    /// Chevron on the card at this local index.
    ExpandToggled(usize),
    SortChanged {
        field: SortField,
        direction: SortDirection,
    },
    SortFieldSelected(SortField),
    SortOrderToggled,

    ProfileLoaded(Result<Option<CompanyProfile>, RequestFailure>),
    EditProfileClicked,
    EditProfileCancelled,
    /// Current contents of the edit form.
    ProfileFormEdited(CompanyProfile),
    ProfileSubmitted,
    ProfileSaved(Result<CompanyProfile, RequestFailure>),
    UploadDialogOpened,
    UploadDialogClosed,
    /// `None` when no file was chosen.
    DocumentSubmitted(Option<DocumentUpload>),
    DocumentImported(Result<CompanyProfile, RequestFailure>),

    ReportsLoaded(Result<Vec<Report>, RequestFailure>),
    GenerateDialogOpened,
    GenerateDialogClosed,
    ReportModeChanged(ReportMode),
    ReportContentChanged(String),
    GenerateSubmitted,
    ReportGenerated(Result<Report, RequestFailure>),
    DeleteReportClicked(ReportId),
    ReportDeleted {
        id: ReportId,
        result: Result<(), RequestFailure>,
    },
    DownloadReportClicked(ReportId),
    ReportDownloaded {
        id: ReportId,
        result: Result<PathBuf, RequestFailure>,
    },

    /// Fallback for unrecognised input.
    NoOp,
}
