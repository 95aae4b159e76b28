use std::path::PathBuf;

use crate::{CompanyProfile, GenerateReportRequest, Grant, GrantKey, ReportId};

/// Backend work requested by `update`. Results come back as `Msg`s.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadGrants,
    CreateGrant { grant: Grant },
    /// `grant` is the cached record, used to locate the backend position.
    DeleteGrant { key: GrantKey, grant: Grant },
    ToggleWon { key: GrantKey, grant: Grant },
    LoadProfile,
    SaveProfile { profile: CompanyProfile },
    ImportProfileDocument { path: PathBuf },
    LoadReports,
    GenerateReport { request: GenerateReportRequest },
    DeleteReport { id: ReportId },
    DownloadReport { id: ReportId, filename: String },
}
