use std::time::Duration;

use bytes::BytesMut;
use futures_util::StreamExt;
use grants_core::{CompanyProfile, GenerateReportRequest, Grant, Report, ReportId, PDF_MEDIA_TYPE};
use grants_logging::grants_debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{ApiError, FailureKind};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Scheme, host and optional path prefix of the backend, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// `None` lets a request wait indefinitely.
    pub request_timeout: Option<Duration>,
    pub max_download_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Some(Duration::from_secs(30)),
            max_download_bytes: 50 * 1024 * 1024,
        }
    }
}

/// The backend's REST surface. Grant endpoints are positional.
#[async_trait::async_trait]
pub trait GrantsApi: Send + Sync {
    async fn list_grants(&self) -> Result<Vec<Grant>, ApiError>;
    async fn create_grant(&self, grant: &Grant) -> Result<Grant, ApiError>;
    async fn delete_grant(&self, position: usize) -> Result<(), ApiError>;
    async fn toggle_won(&self, position: usize) -> Result<Grant, ApiError>;

    async fn get_company(&self) -> Result<Option<CompanyProfile>, ApiError>;
    async fn save_company(&self, profile: &CompanyProfile) -> Result<CompanyProfile, ApiError>;
    async fn upload_company_pdf(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<CompanyProfile, ApiError>;

    async fn list_reports(&self) -> Result<Vec<Report>, ApiError>;
    async fn generate_report(&self, request: &GenerateReportRequest) -> Result<Report, ApiError>;
    async fn delete_report(&self, id: ReportId) -> Result<(), ApiError>;
    async fn download_report(&self, id: ReportId) -> Result<Vec<u8>, ApiError>;
}

#[derive(Debug, Deserialize)]
struct WonResponse {
    grant: Grant,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ApiSettings,
    base_url: String,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        reqwest::Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let base_url = settings.base_url.trim_end_matches('/').to_string();

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base_url,
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        grants_debug!("{} {}", status.as_u16(), response.url());
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .and_then(|detail| detail.as_str().map(str::to_owned));
        Err(ApiError {
            kind: FailureKind::HttpStatus(status.as_u16()),
            message: status.to_string(),
            detail,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.client.get(self.endpoint(path))).await?;
        decode(response).await
    }
}

#[async_trait::async_trait]
impl GrantsApi for ReqwestApi {
    async fn list_grants(&self) -> Result<Vec<Grant>, ApiError> {
        self.get_json("/api/grants").await
    }

    async fn create_grant(&self, grant: &Grant) -> Result<Grant, ApiError> {
        let request = self.client.post(self.endpoint("/api/grants")).json(grant);
        decode(self.send(request).await?).await
    }

    async fn delete_grant(&self, position: usize) -> Result<(), ApiError> {
        let request = self
            .client
            .delete(self.endpoint(&format!("/api/grants/{position}")));
        self.send(request).await.map(drop)
    }

    async fn toggle_won(&self, position: usize) -> Result<Grant, ApiError> {
        let request = self
            .client
            .patch(self.endpoint(&format!("/api/grants/{position}/won")));
        let body: WonResponse = decode(self.send(request).await?).await?;
        Ok(body.grant)
    }

    async fn get_company(&self) -> Result<Option<CompanyProfile>, ApiError> {
        self.get_json("/api/company").await
    }

    async fn save_company(&self, profile: &CompanyProfile) -> Result<CompanyProfile, ApiError> {
        let request = self.client.post(self.endpoint("/api/company")).json(profile);
        decode(self.send(request).await?).await
    }

    async fn upload_company_pdf(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<CompanyProfile, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(PDF_MEDIA_TYPE)
            .map_err(|err| ApiError::new(FailureKind::File, err.to_string()))?;
        let form = reqwest::multipart::Form::new().part("pdf_file", part);
        let request = self
            .client
            .post(self.endpoint("/api/company/upload-pdf"))
            .multipart(form);
        decode(self.send(request).await?).await
    }

    async fn list_reports(&self) -> Result<Vec<Report>, ApiError> {
        self.get_json("/api/reports").await
    }

    async fn generate_report(&self, request: &GenerateReportRequest) -> Result<Report, ApiError> {
        let request = self
            .client
            .post(self.endpoint("/api/reports/generate"))
            .json(request);
        decode(self.send(request).await?).await
    }

    async fn delete_report(&self, id: ReportId) -> Result<(), ApiError> {
        let request = self
            .client
            .delete(self.endpoint(&format!("/api/reports/{id}")));
        self.send(request).await.map(drop)
    }

    async fn download_report(&self, id: ReportId) -> Result<Vec<u8>, ApiError> {
        let max_bytes = self.settings.max_download_bytes;
        let request = self
            .client
            .get(self.endpoint(&format!("/api/reports/{id}/download")));
        let response = self.send(request).await?;

        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "download too large",
                ));
            }
        }

        let mut buffer = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = buffer.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "download too large",
                ));
            }
            buffer.extend_from_slice(&chunk);
        }
        Ok(buffer.to_vec())
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(map_reqwest_error)
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
