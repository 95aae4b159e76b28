use crate::profile::UploadDialog;
use crate::reports::GenerateForm;
use crate::{
    AppState, Confirmation, Effect, GenerateReportRequest, Msg, Page, ReportMode, SortSpec,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// Local caches only change on confirmed success; every failure leaves them as they were.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageOpened(page) => {
            state.open_page(page);
            vec![match page {
                Page::Grants => Effect::LoadGrants,
                Page::Profile => Effect::LoadProfile,
                Page::Reports => Effect::LoadReports,
            }]
        }
        Msg::Tick { elapsed } => {
            if state.notifications.advance(elapsed) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ConfirmAccepted => confirm(&mut state),
        Msg::ConfirmDismissed => {
            if state.confirmation.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
        msg @ (Msg::GrantsLoaded(_)
        | Msg::AddGrantOpened
        | Msg::AddGrantClosed
        | Msg::AddGrantSubmitted(_)
        | Msg::GrantCreated(_)
        | Msg::DeleteGrantClicked(_)
        | Msg::GrantDeleted { .. }
        | Msg::ToggleWonClicked(_)
        | Msg::WonToggled { .. }
        | Msg::ExpandToggled(_)
        | Msg::SortChanged { .. }
        | Msg::SortFieldSelected(_)
        | Msg::SortOrderToggled) => update_grants(&mut state, msg),
        msg @ (Msg::ProfileLoaded(_)
        | Msg::EditProfileClicked
        | Msg::EditProfileCancelled
        | Msg::ProfileFormEdited(_)
        | Msg::ProfileSubmitted
        | Msg::ProfileSaved(_)
        | Msg::UploadDialogOpened
        | Msg::UploadDialogClosed
        | Msg::DocumentSubmitted(_)
        | Msg::DocumentImported(_)) => update_profile(&mut state, msg),
        msg => update_reports(&mut state, msg),
    };

    (state, effects)
}

fn confirm(state: &mut AppState) -> Vec<Effect> {
    let Some(confirmation) = state.confirmation.take() else {
        return Vec::new();
    };
    state.mark_dirty();
    match confirmation {
        Confirmation::DeleteGrant { key } => match state.grants.get(key) {
            Some(grant) => vec![Effect::DeleteGrant {
                key,
                grant: grant.clone(),
            }],
            None => {
                state.notifications.error("Error deleting grant");
                Vec::new()
            }
        },
        Confirmation::DeleteReport { id } => vec![Effect::DeleteReport { id }],
    }
}

fn update_grants(state: &mut AppState, msg: Msg) -> Vec<Effect> {
    let effects = match msg {
        Msg::GrantsLoaded(Ok(grants)) => {
            state.grants.replace_all(grants);
            Vec::new()
        }
        Msg::GrantsLoaded(Err(_)) => {
            state.notifications.error("Error loading grants");
            Vec::new()
        }
        Msg::AddGrantOpened => {
            state.grants.set_add_form_open(true);
            Vec::new()
        }
        Msg::AddGrantClosed => {
            state.grants.set_add_form_open(false);
            Vec::new()
        }
        Msg::AddGrantSubmitted(mut grant) => match grant.validate() {
            Ok(()) => {
                grant.won = false;
                return vec![Effect::CreateGrant { grant }];
            }
            Err(message) => {
                state.notifications.error(message);
                Vec::new()
            }
        },
        Msg::GrantCreated(Ok(grant)) => {
            state.grants.insert(grant);
            state.grants.set_add_form_open(false);
            state.notifications.success("Grant added successfully");
            Vec::new()
        }
        Msg::GrantCreated(Err(_)) => {
            state.notifications.error("Error adding grant");
            Vec::new()
        }
        Msg::DeleteGrantClicked(index) => {
            match state.grants.key_at(index) {
                Some(key) => state.confirmation = Some(Confirmation::DeleteGrant { key }),
                None => state.notifications.error("Error deleting grant"),
            }
            Vec::new()
        }
        Msg::GrantDeleted { key, result } => {
            match result {
                Ok(()) => {
                    state.grants.remove(key);
                    state.notifications.success("Grant deleted successfully");
                }
                Err(_) => state.notifications.error("Error deleting grant"),
            }
            Vec::new()
        }
        Msg::ToggleWonClicked(index) => match state.grants.key_at(index) {
            Some(key) => {
                let grant = state.grants.items()[index].grant.clone();
                return vec![Effect::ToggleWon { key, grant }];
            }
            None => {
                state.notifications.error("Error updating won status");
                Vec::new()
            }
        },
        Msg::WonToggled { key, result } => {
            match result {
                Ok(updated) => {
                    // The card may have been deleted while the request was in flight.
                    if !state.grants.replace(key, updated) {
                        return Vec::new();
                    }
                }
                Err(_) => state.notifications.error("Error updating won status"),
            }
            Vec::new()
        }
        Msg::ExpandToggled(index) => {
            if !state.grants.toggle_expanded(index) {
                return Vec::new();
            }
            Vec::new()
        }
        Msg::SortChanged { field, direction } => {
            state.grants.set_sort(SortSpec::new(field, direction));
            Vec::new()
        }
        Msg::SortFieldSelected(field) => {
            let direction = state.grants.sort_spec().direction;
            state.grants.set_sort(SortSpec::new(field, direction));
            Vec::new()
        }
        Msg::SortOrderToggled => {
            let current = state.grants.sort_spec();
            state
                .grants
                .set_sort(SortSpec::new(current.field, current.direction.flipped()));
            Vec::new()
        }
        _ => return Vec::new(),
    };
    state.mark_dirty();
    effects
}

fn update_profile(state: &mut AppState, msg: Msg) -> Vec<Effect> {
    let profile = &mut state.profile;
    let effects = match msg {
        Msg::ProfileLoaded(Ok(loaded)) => {
            profile.profile = loaded;
            profile.loaded = true;
            Vec::new()
        }
        Msg::ProfileLoaded(Err(_)) => {
            profile.loaded = true;
            state.notifications.error("Error loading company profile");
            Vec::new()
        }
        Msg::EditProfileClicked => {
            profile.editing = Some(profile.profile.clone().unwrap_or_default());
            Vec::new()
        }
        Msg::EditProfileCancelled => {
            profile.editing = None;
            Vec::new()
        }
        Msg::ProfileFormEdited(values) => {
            let Some(form) = profile.editing.as_mut() else {
                return Vec::new();
            };
            *form = values;
            Vec::new()
        }
        Msg::ProfileSubmitted => {
            let Some(form) = profile.editing.as_ref() else {
                return Vec::new();
            };
            if form.name.trim().is_empty() {
                state.notifications.error("Please enter the company name");
                Vec::new()
            } else {
                // Form stays open until the backend confirms.
                return vec![Effect::SaveProfile {
                    profile: form.clone(),
                }];
            }
        }
        Msg::ProfileSaved(Ok(saved)) => {
            profile.profile = Some(saved);
            profile.editing = None;
            state
                .notifications
                .success("Company profile updated successfully");
            Vec::new()
        }
        Msg::ProfileSaved(Err(_)) => {
            state.notifications.error("Error updating company profile");
            Vec::new()
        }
        Msg::UploadDialogOpened => {
            if profile.upload.is_none() {
                profile.upload = Some(UploadDialog::default());
            }
            Vec::new()
        }
        Msg::UploadDialogClosed => {
            profile.upload = None;
            Vec::new()
        }
        Msg::DocumentSubmitted(document) => {
            if profile.upload.is_some_and(|dialog| dialog.busy) {
                return Vec::new();
            }
            match document {
                None => {
                    state.notifications.error("Please select a PDF file");
                    Vec::new()
                }
                Some(document) if !document.is_pdf() => {
                    state.notifications.error("Please select a valid PDF file");
                    Vec::new()
                }
                Some(document) => {
                    profile.upload = Some(UploadDialog { busy: true });
                    vec![Effect::ImportProfileDocument {
                        path: document.path,
                    }]
                }
            }
        }
        Msg::DocumentImported(Ok(extracted)) => {
            profile.profile = Some(extracted);
            profile.upload = None;
            state
                .notifications
                .success("Company profile extracted from PDF successfully");
            Vec::new()
        }
        Msg::DocumentImported(Err(failure)) => {
            if let Some(dialog) = profile.upload.as_mut() {
                dialog.busy = false;
            }
            let message = failure
                .detail
                .unwrap_or_else(|| "Error uploading PDF".to_string());
            state.notifications.error(message);
            Vec::new()
        }
        _ => return Vec::new(),
    };
    state.mark_dirty();
    effects
}

fn update_reports(state: &mut AppState, msg: Msg) -> Vec<Effect> {
    let reports = &mut state.reports;
    let effects = match msg {
        Msg::ReportsLoaded(Ok(loaded)) => {
            reports.reports = loaded;
            Vec::new()
        }
        Msg::ReportsLoaded(Err(_)) => {
            state.notifications.error("Error loading reports");
            Vec::new()
        }
        Msg::GenerateDialogOpened => {
            if reports.generate.is_none() {
                reports.generate = Some(GenerateForm::default());
            }
            Vec::new()
        }
        Msg::GenerateDialogClosed => {
            reports.generate = None;
            Vec::new()
        }
        Msg::ReportModeChanged(mode) => {
            let Some(form) = reports.generate.as_mut() else {
                return Vec::new();
            };
            form.mode = mode;
            Vec::new()
        }
        Msg::ReportContentChanged(content) => {
            let Some(form) = reports.generate.as_mut() else {
                return Vec::new();
            };
            form.content = content;
            Vec::new()
        }
        Msg::GenerateSubmitted => {
            let Some(form) = reports.generate.as_ref() else {
                return Vec::new();
            };
            if form.mode == ReportMode::Api && form.content.trim().is_empty() {
                state
                    .notifications
                    .error("Please provide content for API reports");
                Vec::new()
            } else {
                return vec![Effect::GenerateReport {
                    request: GenerateReportRequest {
                        mode: form.mode,
                        content: form.content.clone(),
                    },
                }];
            }
        }
        Msg::ReportGenerated(Ok(report)) => {
            reports.prepend(report);
            reports.generate = None;
            state.notifications.success("Report generated successfully!");
            Vec::new()
        }
        Msg::ReportGenerated(Err(_)) => {
            state.notifications.error("Error generating report");
            Vec::new()
        }
        Msg::DeleteReportClicked(id) => {
            if reports.get(id).is_some() {
                state.confirmation = Some(Confirmation::DeleteReport { id });
            } else {
                state.notifications.error("Error deleting report");
            }
            Vec::new()
        }
        Msg::ReportDeleted { id, result } => {
            match result {
                Ok(()) => {
                    reports.remove(id);
                    state.notifications.success("Report deleted successfully");
                }
                Err(_) => state.notifications.error("Error deleting report"),
            }
            Vec::new()
        }
        Msg::DownloadReportClicked(id) => match reports.get(id) {
            Some(report) => {
                return vec![Effect::DownloadReport {
                    id,
                    filename: report.filename.clone(),
                }];
            }
            None => {
                state.notifications.error("Error downloading report");
                Vec::new()
            }
        },
        Msg::ReportDownloaded { result, .. } => {
            match result {
                Ok(path) => state
                    .notifications
                    .success(format!("Report saved to {}", path.display())),
                Err(_) => state.notifications.error("Error downloading report"),
            }
            Vec::new()
        }
        _ => return Vec::new(),
    };
    state.mark_dirty();
    effects
}
