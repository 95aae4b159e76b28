use crate::format::{
    format_deadline, format_file_size, format_timestamp, truncate_description, AffinityBand,
};
use crate::grants::GrantsState;
use crate::model::{CompanyProfile, ReportId, ReportKind, ReportMode};
use crate::notify::NotificationKind;
use crate::profile::ProfileState;
use crate::reports::ReportsState;
use crate::sort::SortSpec;
use crate::Page;

pub const EMPTY_PROFILE_NAME: &str = "No company profile set";
pub const EMPTY_FIELD: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub page: Page,
    pub grants: GrantsView,
    pub profile: ProfileView,
    pub reports: ReportsView,
    pub notifications: Vec<NotificationView>,
    /// Prompt of the pending confirmation, if any.
    pub confirmation: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrantsView {
    pub cards: Vec<GrantCardView>,
    pub sort: SortSpec,
    pub add_form_open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantCardView {
    pub index: usize,
    pub title: String,
    pub summary: String,
    /// `85% Match`
    pub affinity_label: String,
    pub affinity_band: AffinityBand,
    pub won: bool,
    pub expanded: bool,
    /// Only filled in for the expanded card.
    pub details: Option<GrantDetailsView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantDetailsView {
    pub deadline: String,
    pub status: String,
    pub budget: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileView {
    pub name: String,
    pub url: String,
    pub scope: String,
    pub has_profile: bool,
    /// False until the first load attempt finishes.
    pub loaded: bool,
    pub editing: Option<CompanyProfile>,
    pub upload_open: bool,
    pub upload_busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportsView {
    pub rows: Vec<ReportRowView>,
    pub generate: Option<GenerateDialogView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRowView {
    pub id: ReportId,
    pub name: String,
    pub description: Option<DescriptionView>,
    pub type_label: &'static str,
    pub generated_at: String,
    pub file_size: String,
    pub filename: String,
    /// Path relative to the backend base URL.
    pub download_path: String,
}

/// Truncated text for the table plus the full text for hover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionView {
    pub short: String,
    pub full: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateDialogView {
    pub mode: ReportMode,
    pub content: String,
    pub content_visible: bool,
    pub info_text: &'static str,
}

pub(crate) fn grants_view(grants: &GrantsState) -> GrantsView {
    let expanded = grants.expanded_key();
    let cards = grants
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let grant = &item.grant;
            let is_expanded = expanded == Some(item.key);
            GrantCardView {
                index,
                title: grant.title.clone(),
                summary: grant.summary.clone(),
                affinity_label: format!("{}% Match", grant.company_affinity),
                affinity_band: AffinityBand::for_affinity(grant.company_affinity),
                won: grant.won,
                expanded: is_expanded,
                details: is_expanded.then(|| GrantDetailsView {
                    deadline: format_deadline(grant.deadline),
                    status: grant.status.label().to_string(),
                    budget: grant.budget.clone(),
                    url: grant.url.clone(),
                }),
            }
        })
        .collect();
    GrantsView {
        cards,
        sort: grants.sort_spec(),
        add_form_open: grants.add_form_open(),
    }
}

pub(crate) fn profile_view(profile: &ProfileState) -> ProfileView {
    let upload = profile.upload();
    let mut view = match profile.profile() {
        Some(company) => ProfileView {
            name: company.name.clone(),
            url: company.url.clone(),
            scope: company.scope.clone(),
            has_profile: true,
            ..ProfileView::default()
        },
        None => ProfileView {
            name: EMPTY_PROFILE_NAME.to_string(),
            url: EMPTY_FIELD.to_string(),
            scope: EMPTY_FIELD.to_string(),
            has_profile: false,
            ..ProfileView::default()
        },
    };
    view.loaded = profile.is_loaded();
    view.editing = profile.editing().cloned();
    view.upload_open = upload.is_some();
    view.upload_busy = upload.is_some_and(|dialog| dialog.busy);
    view
}

pub(crate) fn reports_view(reports: &ReportsState) -> ReportsView {
    let rows = reports
        .reports()
        .iter()
        .map(|report| ReportRowView {
            id: report.id,
            name: report.name.clone(),
            description: report
                .description
                .as_deref()
                .filter(|text| !text.is_empty())
                .map(|text| DescriptionView {
                    short: truncate_description(text),
                    full: text.to_string(),
                }),
            type_label: type_label(report.kind),
            generated_at: format_timestamp(&report.generated_at),
            file_size: format_file_size(report.file_size),
            filename: report.filename.clone(),
            download_path: download_path(report.id),
        })
        .collect();
    ReportsView {
        rows,
        generate: reports.generate_form().map(|form| GenerateDialogView {
            mode: form.mode,
            content: form.content.clone(),
            content_visible: form.mode == ReportMode::Api,
            info_text: info_text(form.mode),
        }),
    }
}

pub fn download_path(id: ReportId) -> String {
    format!("/api/reports/{id}/download")
}

fn type_label(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Generated => "Generated",
        ReportKind::Api => "API",
        ReportKind::Unknown => "Unknown",
    }
}

fn info_text(mode: ReportMode) -> &'static str {
    match mode {
        ReportMode::Generated => {
            "The report will be generated using your company profile and won grants data to create a professional document suitable for funding applications."
        }
        ReportMode::Api => {
            "Enter the report content that will be converted to PDF. This is useful for LLM-generated reports."
        }
    }
}
