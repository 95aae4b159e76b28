use std::path::PathBuf;

use crate::model::CompanyProfile;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A file picked for profile extraction, with the media type it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub path: PathBuf,
    pub file_name: String,
    pub media_type: String,
}

impl DocumentUpload {
    pub fn is_pdf(&self) -> bool {
        self.media_type.eq_ignore_ascii_case(PDF_MEDIA_TYPE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileState {
    pub(crate) profile: Option<CompanyProfile>,
    pub(crate) loaded: bool,
    /// Form values while editing; kept verbatim across failed saves.
    pub(crate) editing: Option<CompanyProfile>,
    pub(crate) upload: Option<UploadDialog>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadDialog {
    pub busy: bool,
}

impl ProfileState {
    pub fn profile(&self) -> Option<&CompanyProfile> {
        self.profile.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn editing(&self) -> Option<&CompanyProfile> {
        self.editing.as_ref()
    }

    pub fn upload(&self) -> Option<UploadDialog> {
        self.upload
    }
}
