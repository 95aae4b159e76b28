//! Grants core: pure state machine and view-model helpers for the grant tracker client.
mod effect;
mod format;
mod grants;
mod model;
mod msg;
mod notify;
mod profile;
mod reports;
mod sort;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use format::{
    format_deadline, format_file_size, format_timestamp, truncate_description, AffinityBand,
    DESCRIPTION_LIMIT,
};
pub use grants::{find_backend_position, GrantKey, GrantsState, LocalGrant};
pub use model::{
    CompanyProfile, GenerateReportRequest, Grant, GrantStatus, Report, ReportId, ReportKind,
    ReportMode,
};
pub use msg::{Msg, RequestFailure};
pub use notify::{Notification, NotificationKind, Notifications, NOTIFICATION_TTL};
pub use profile::{DocumentUpload, ProfileState, UploadDialog, PDF_MEDIA_TYPE};
pub use reports::{GenerateForm, ReportsState};
pub use sort::{SortDirection, SortField, SortSpec};
pub use state::{AppState, Confirmation, Page};
pub use update::update;
pub use view_model::{
    download_path, AppViewModel, DescriptionView, GenerateDialogView, GrantCardView,
    GrantDetailsView, GrantsView, NotificationView, ProfileView, ReportRowView, ReportsView,
    EMPTY_FIELD, EMPTY_PROFILE_NAME,
};
