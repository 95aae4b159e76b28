use std::path::PathBuf;

use grants_core::{
    update, AppState, CompanyProfile, DocumentUpload, Effect, Msg, Page, RequestFailure,
    EMPTY_FIELD, EMPTY_PROFILE_NAME, PDF_MEDIA_TYPE,
};
use pretty_assertions::assert_eq;

fn acme() -> CompanyProfile {
    CompanyProfile {
        name: "Acme".to_string(),
        url: "https://acme.example.com".to_string(),
        scope: "Clean energy storage".to_string(),
    }
}

fn with_profile(profile: Option<CompanyProfile>) -> AppState {
    let (state, effects) = update(AppState::new(), Msg::PageOpened(Page::Profile));
    assert_eq!(effects, vec![Effect::LoadProfile]);
    update(state, Msg::ProfileLoaded(Ok(profile))).0
}

fn pdf(name: &str) -> DocumentUpload {
    DocumentUpload {
        path: PathBuf::from(format!("/tmp/{name}")),
        file_name: name.to_string(),
        media_type: PDF_MEDIA_TYPE.to_string(),
    }
}

#[test]
fn absent_profile_renders_empty_state() {
    let state = with_profile(None);
    let view = state.view().profile;
    assert!(!view.has_profile);
    assert_eq!(view.name, EMPTY_PROFILE_NAME);
    assert_eq!(view.url, EMPTY_FIELD);
    assert_eq!(view.scope, EMPTY_FIELD);
}

#[test]
fn present_profile_renders_fields() {
    let state = with_profile(Some(acme()));
    let view = state.view().profile;
    assert!(view.has_profile);
    assert_eq!(view.name, "Acme");
    assert_eq!(view.scope, "Clean energy storage");
}

#[test]
fn save_round_trip_replaces_profile_and_closes_form() {
    let state = with_profile(Some(acme()));
    let (state, _) = update(state, Msg::EditProfileClicked);
    assert_eq!(state.view().profile.editing, Some(acme()));

    let edited = CompanyProfile {
        scope: "Grid-scale batteries".to_string(),
        ..acme()
    };
    let (state, _) = update(state, Msg::ProfileFormEdited(edited.clone()));
    let (state, effects) = update(state, Msg::ProfileSubmitted);
    assert_eq!(
        effects,
        vec![Effect::SaveProfile {
            profile: edited.clone()
        }]
    );

    let (state, _) = update(state, Msg::ProfileSaved(Ok(edited.clone())));
    let view = state.view();
    assert_eq!(view.profile.scope, "Grid-scale batteries");
    assert!(view.profile.editing.is_none());
    assert_eq!(
        view.notifications.last().unwrap().message,
        "Company profile updated successfully"
    );
}

#[test]
fn failed_save_keeps_typed_values_and_displayed_profile() {
    let state = with_profile(Some(acme()));
    let (state, _) = update(state, Msg::EditProfileClicked);
    let typed = CompanyProfile {
        name: "Acme Renamed".to_string(),
        url: "https://renamed.example.com".to_string(),
        scope: "Something new".to_string(),
    };
    let (state, _) = update(state, Msg::ProfileFormEdited(typed.clone()));
    let (state, _) = update(state, Msg::ProfileSubmitted);
    let (state, effects) = update(state, Msg::ProfileSaved(Err(RequestFailure::default())));
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.profile.editing, Some(typed));
    assert_eq!(view.profile.name, "Acme");
    assert_eq!(state.profile().profile(), Some(&acme()));
    assert_eq!(
        view.notifications.last().unwrap().message,
        "Error updating company profile"
    );
}

#[test]
fn edit_without_profile_starts_blank_and_requires_name() {
    let state = with_profile(None);
    let (state, _) = update(state, Msg::EditProfileClicked);
    assert_eq!(state.view().profile.editing, Some(CompanyProfile::default()));
    let (state, effects) = update(state, Msg::ProfileSubmitted);
    assert!(effects.is_empty());
    assert_eq!(state.view().notifications.len(), 1);

    let (state, _) = update(state, Msg::EditProfileCancelled);
    assert!(state.view().profile.editing.is_none());
}

#[test]
fn form_edits_are_ignored_outside_edit_mode() {
    let state = with_profile(Some(acme()));
    let (state, effects) = update(state, Msg::ProfileFormEdited(CompanyProfile::default()));
    assert!(effects.is_empty());
    assert!(state.view().profile.editing.is_none());
    let (_, effects) = update(state, Msg::ProfileSubmitted);
    assert!(effects.is_empty());
}

#[test]
fn document_upload_validates_before_sending() {
    let state = with_profile(None);
    let (state, _) = update(state, Msg::UploadDialogOpened);

    let (state, effects) = update(state, Msg::DocumentSubmitted(None));
    assert!(effects.is_empty());
    assert_eq!(
        state.view().notifications.last().unwrap().message,
        "Please select a PDF file"
    );

    let not_pdf = DocumentUpload {
        media_type: "text/plain".to_string(),
        ..pdf("notes.txt")
    };
    let (state, effects) = update(state, Msg::DocumentSubmitted(Some(not_pdf)));
    assert!(effects.is_empty());
    assert_eq!(
        state.view().notifications.last().unwrap().message,
        "Please select a valid PDF file"
    );
    assert!(!state.view().profile.upload_busy);
}

#[test]
fn document_upload_shows_busy_and_ignores_resubmission() {
    let state = with_profile(None);
    let (state, _) = update(state, Msg::UploadDialogOpened);
    let (state, effects) = update(state, Msg::DocumentSubmitted(Some(pdf("deck.pdf"))));
    assert_eq!(
        effects,
        vec![Effect::ImportProfileDocument {
            path: PathBuf::from("/tmp/deck.pdf")
        }]
    );
    assert!(state.view().profile.upload_busy);

    let (state, effects) = update(state, Msg::DocumentSubmitted(Some(pdf("again.pdf"))));
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::DocumentImported(Ok(acme())));
    let view = state.view().profile;
    assert!(!view.upload_open);
    assert_eq!(view.name, "Acme");
}

#[test]
fn document_failure_surfaces_backend_detail_or_fallback() {
    let state = with_profile(None);
    let (state, _) = update(state, Msg::UploadDialogOpened);
    let (state, _) = update(state, Msg::DocumentSubmitted(Some(pdf("deck.pdf"))));
    let (state, _) = update(
        state,
        Msg::DocumentImported(Err(RequestFailure::with_detail(
            "Could not extract company information from PDF",
        ))),
    );
    let view = state.view();
    assert!(view.profile.upload_open);
    assert!(!view.profile.upload_busy);
    assert_eq!(
        view.notifications.last().unwrap().message,
        "Could not extract company information from PDF"
    );
    assert!(!view.profile.has_profile);

    let (state, _) = update(state, Msg::DocumentSubmitted(Some(pdf("deck.pdf"))));
    let (state, _) = update(state, Msg::DocumentImported(Err(RequestFailure::default())));
    assert_eq!(
        state.view().notifications.last().unwrap().message,
        "Error uploading PDF"
    );
}
