//! Multi-request operations built on [`GrantsApi`].

use std::path::{Path, PathBuf};

use grants_core::{find_backend_position, CompanyProfile, Grant, ReportId};
use grants_logging::grants_debug;

use crate::filename::download_filename;
use crate::persist::DownloadWriter;
use crate::{ApiError, FailureKind, GrantsApi};

/// Re-reads the backend listing and finds where `grant` lives now.
///
/// The local order may differ from the backend order after a client-side
/// sort, so positional requests are always re-resolved by `(title, url)`.
pub async fn locate_grant(api: &dyn GrantsApi, grant: &Grant) -> Result<usize, ApiError> {
    let backend = api.list_grants().await?;
    let position = find_backend_position(&backend, grant)
        .ok_or_else(|| ApiError::new(FailureKind::NotFound, "Grant not found in backend"))?;
    grants_debug!("resolved '{}' to backend position {}", grant.title, position);
    Ok(position)
}

pub async fn toggle_won(api: &dyn GrantsApi, grant: &Grant) -> Result<Grant, ApiError> {
    let position = locate_grant(api, grant).await?;
    api.toggle_won(position).await
}

pub async fn delete_grant(api: &dyn GrantsApi, grant: &Grant) -> Result<(), ApiError> {
    let position = locate_grant(api, grant).await?;
    api.delete_grant(position).await
}

pub async fn import_document(api: &dyn GrantsApi, path: &Path) -> Result<CompanyProfile, ApiError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| ApiError::new(FailureKind::File, format!("{}: {err}", path.display())))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("document.pdf");
    api.upload_company_pdf(file_name, bytes).await
}

pub async fn download_report(
    api: &dyn GrantsApi,
    writer: &DownloadWriter,
    id: ReportId,
    filename: &str,
) -> Result<PathBuf, ApiError> {
    let bytes = api.download_report(id).await?;
    let target = download_filename(filename, id);
    Ok(writer.save(&target, &bytes)?)
}
