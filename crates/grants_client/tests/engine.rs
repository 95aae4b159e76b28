use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use chrono::NaiveDate;
use grants_client::{
    ApiCommand, ApiError, ApiEvent, ClientConfig, ClientHandle, FailureKind, GrantsApi,
};
use grants_core::{CompanyProfile, GenerateReportRequest, Grant, GrantStatus, Report, ReportId};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(grants_logging::initialize_for_tests);
}

const WAIT: Duration = Duration::from_secs(5);

fn grant(title: &str, url: &str, won: bool) -> Grant {
    Grant {
        title: title.to_string(),
        url: url.to_string(),
        summary: String::new(),
        deadline: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        status: GrantStatus::Upcoming,
        budget: "$10,000".to_string(),
        company_affinity: 40.0,
        won,
    }
}

/// In-memory backend that records the positional requests it receives.
#[derive(Default)]
struct FakeBackend {
    grants: Mutex<Vec<Grant>>,
    calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    fn with_grants(grants: Vec<Grant>) -> Self {
        Self {
            grants: Mutex::new(grants),
            calls: Mutex::default(),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

fn unsupported() -> ApiError {
    ApiError {
        kind: FailureKind::HttpStatus(501),
        message: "not implemented".to_string(),
        detail: None,
    }
}

#[async_trait::async_trait]
impl GrantsApi for FakeBackend {
    async fn list_grants(&self) -> Result<Vec<Grant>, ApiError> {
        self.calls.lock().unwrap().push("list".to_string());
        Ok(self.grants.lock().unwrap().clone())
    }

    async fn create_grant(&self, grant: &Grant) -> Result<Grant, ApiError> {
        self.grants.lock().unwrap().push(grant.clone());
        Ok(grant.clone())
    }

    async fn delete_grant(&self, position: usize) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(format!("delete {position}"));
        self.grants.lock().unwrap().remove(position);
        Ok(())
    }

    async fn toggle_won(&self, position: usize) -> Result<Grant, ApiError> {
        self.calls.lock().unwrap().push(format!("won {position}"));
        let mut grants = self.grants.lock().unwrap();
        grants[position].won = !grants[position].won;
        Ok(grants[position].clone())
    }

    async fn get_company(&self) -> Result<Option<CompanyProfile>, ApiError> {
        Ok(None)
    }

    async fn save_company(&self, profile: &CompanyProfile) -> Result<CompanyProfile, ApiError> {
        Ok(profile.clone())
    }

    async fn upload_company_pdf(
        &self,
        _file_name: &str,
        _bytes: Vec<u8>,
    ) -> Result<CompanyProfile, ApiError> {
        Err(unsupported())
    }

    async fn list_reports(&self) -> Result<Vec<Report>, ApiError> {
        Ok(Vec::new())
    }

    async fn generate_report(&self, _request: &GenerateReportRequest) -> Result<Report, ApiError> {
        Err(unsupported())
    }

    async fn delete_report(&self, _id: ReportId) -> Result<(), ApiError> {
        Ok(())
    }

    async fn download_report(&self, _id: ReportId) -> Result<Vec<u8>, ApiError> {
        Ok(b"%PDF-1.4".to_vec())
    }
}

#[test]
fn commands_resolve_positions_in_submission_order() {
    init_logging();
    let backend = Arc::new(FakeBackend::with_grants(vec![
        grant("A", "https://a.example", false),
        grant("B", "https://b.example", false),
        grant("C", "https://c.example", false),
    ]));
    let temp = TempDir::new().unwrap();
    let (handle, events) =
        ClientHandle::spawn_with(backend.clone(), temp.path().to_path_buf()).unwrap();

    assert!(handle.submit(ApiCommand::DeleteGrant {
        ticket: 1,
        grant: grant("A", "https://a.example", false),
    }));
    assert!(handle.submit(ApiCommand::ToggleWon {
        ticket: 2,
        grant: grant("C", "https://c.example", false),
    }));

    assert_eq!(
        events.recv_timeout(WAIT),
        Some(ApiEvent::GrantDeleted {
            ticket: 1,
            result: Ok(())
        })
    );
    assert_eq!(
        events.recv_timeout(WAIT),
        Some(ApiEvent::WonToggled {
            ticket: 2,
            result: Ok(grant("C", "https://c.example", true)),
        })
    );
    // C moved from position 2 to 1 once A was gone.
    assert_eq!(backend.calls(), vec!["list", "delete 0", "list", "won 1"]);
}

#[test]
fn missing_grant_reports_not_found_with_ticket() {
    init_logging();
    let backend = Arc::new(FakeBackend::default());
    let temp = TempDir::new().unwrap();
    let (handle, events) = ClientHandle::spawn_with(backend, temp.path().to_path_buf()).unwrap();

    handle.submit(ApiCommand::ToggleWon {
        ticket: 7,
        grant: grant("Gone", "https://gone.example", false),
    });

    match events.recv_timeout(WAIT) {
        Some(ApiEvent::WonToggled { ticket, result }) => {
            assert_eq!(ticket, 7);
            assert_eq!(result.unwrap_err().kind, FailureKind::NotFound);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn download_lands_in_configured_directory() {
    init_logging();
    let backend = Arc::new(FakeBackend::default());
    let temp = TempDir::new().unwrap();
    let downloads = temp.path().join("downloads");
    let (handle, events) = ClientHandle::spawn_with(backend, downloads.clone()).unwrap();

    handle.submit(ApiCommand::DownloadReport {
        id: 9,
        filename: String::new(),
    });

    let expected = downloads.join("report-9.pdf");
    assert_eq!(
        events.recv_timeout(WAIT),
        Some(ApiEvent::ReportDownloaded {
            id: 9,
            result: Ok(expected.clone()),
        })
    );
    assert_eq!(std::fs::read(expected).unwrap(), b"%PDF-1.4");
}

#[test]
fn missing_upload_file_is_a_file_failure() {
    init_logging();
    let backend = Arc::new(FakeBackend::default());
    let temp = TempDir::new().unwrap();
    let (handle, events) = ClientHandle::spawn_with(backend, temp.path().to_path_buf()).unwrap();

    handle.submit(ApiCommand::ImportCompanyDocument {
        path: temp.path().join("missing.pdf"),
    });

    match events.recv_timeout(WAIT) {
        Some(ApiEvent::CompanyImported(Err(err))) => assert_eq!(err.kind, FailureKind::File),
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn spawned_client_talks_http() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "name": "Q1 summary",
            "description": null,
            "type": "generated",
            "generated_at": "2024-03-15T14:30:00",
            "file_size": 1536,
            "filename": "q1.pdf"
        }])))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let mut config = ClientConfig::default_with_downloads(temp.path().to_path_buf());
    config.api.base_url = server.uri();
    let (handle, events) = ClientHandle::spawn(config).unwrap();
    handle.submit(ApiCommand::ListReports);

    let event = tokio::task::spawn_blocking(move || events.recv_timeout(WAIT))
        .await
        .unwrap();
    match event {
        Some(ApiEvent::ReportsListed(Ok(reports))) => {
            assert_eq!(reports.len(), 1);
            assert_eq!(reports[0].name, "Q1 summary");
        }
        other => panic!("unexpected event {other:?}"),
    }
}
