use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use grants_core::{CompanyProfile, GenerateReportRequest, Grant, Report, ReportId};
use grants_logging::grants_debug;

use crate::api::{ApiSettings, GrantsApi, ReqwestApi};
use crate::persist::DownloadWriter;
use crate::{workflow, ApiError, StartupError};

/// Opaque correlation value echoed back with grant results.
pub type Ticket = u64;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api: ApiSettings,
    pub download_dir: PathBuf,
}

impl ClientConfig {
    pub fn default_with_downloads(download_dir: PathBuf) -> Self {
        Self {
            api: ApiSettings::default(),
            download_dir,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCommand {
    ListGrants,
    CreateGrant(Grant),
    DeleteGrant { ticket: Ticket, grant: Grant },
    ToggleWon { ticket: Ticket, grant: Grant },
    GetCompany,
    SaveCompany(CompanyProfile),
    ImportCompanyDocument { path: PathBuf },
    ListReports,
    GenerateReport(GenerateReportRequest),
    DeleteReport(ReportId),
    DownloadReport { id: ReportId, filename: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    GrantsListed(Result<Vec<Grant>, ApiError>),
    GrantCreated(Result<Grant, ApiError>),
    GrantDeleted {
        ticket: Ticket,
        result: Result<(), ApiError>,
    },
    WonToggled {
        ticket: Ticket,
        result: Result<Grant, ApiError>,
    },
    CompanyLoaded(Result<Option<CompanyProfile>, ApiError>),
    CompanySaved(Result<CompanyProfile, ApiError>),
    CompanyImported(Result<CompanyProfile, ApiError>),
    ReportsListed(Result<Vec<Report>, ApiError>),
    ReportGenerated(Result<Report, ApiError>),
    ReportDeleted {
        id: ReportId,
        result: Result<(), ApiError>,
    },
    ReportDownloaded {
        id: ReportId,
        result: Result<PathBuf, ApiError>,
    },
}

/// Sender side of the client worker. Commands run one at a time, in order.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ApiCommand>,
}

/// Results of submitted commands, one event per command.
pub struct ClientEvents {
    event_rx: mpsc::Receiver<ApiEvent>,
}

impl ClientHandle {
    pub fn spawn(config: ClientConfig) -> Result<(Self, ClientEvents), StartupError> {
        let api = ReqwestApi::new(config.api)?;
        Self::spawn_with(Arc::new(api), config.download_dir)
    }

    pub fn spawn_with(
        api: Arc<dyn GrantsApi>,
        download_dir: PathBuf,
    ) -> Result<(Self, ClientEvents), StartupError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ApiCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let writer = DownloadWriter::new(download_dir);

        thread::Builder::new()
            .name("grants-client".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    grants_debug!("running {:?}", command);
                    let event = runtime.block_on(handle_command(api.as_ref(), &writer, command));
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
            })?;

        Ok((Self { cmd_tx }, ClientEvents { event_rx }))
    }

    /// Queues a command. Returns false once the worker has stopped.
    pub fn submit(&self, command: ApiCommand) -> bool {
        self.cmd_tx.send(command).is_ok()
    }
}

impl ClientEvents {
    /// Blocks until the next event; `None` once the worker is gone.
    pub fn recv(&self) -> Option<ApiEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ApiEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    api: &dyn GrantsApi,
    writer: &DownloadWriter,
    command: ApiCommand,
) -> ApiEvent {
    match command {
        ApiCommand::ListGrants => ApiEvent::GrantsListed(api.list_grants().await),
        ApiCommand::CreateGrant(grant) => ApiEvent::GrantCreated(api.create_grant(&grant).await),
        ApiCommand::DeleteGrant { ticket, grant } => ApiEvent::GrantDeleted {
            ticket,
            result: workflow::delete_grant(api, &grant).await,
        },
        ApiCommand::ToggleWon { ticket, grant } => ApiEvent::WonToggled {
            ticket,
            result: workflow::toggle_won(api, &grant).await,
        },
        ApiCommand::GetCompany => ApiEvent::CompanyLoaded(api.get_company().await),
        ApiCommand::SaveCompany(profile) => {
            ApiEvent::CompanySaved(api.save_company(&profile).await)
        }
        ApiCommand::ImportCompanyDocument { path } => {
            ApiEvent::CompanyImported(workflow::import_document(api, &path).await)
        }
        ApiCommand::ListReports => ApiEvent::ReportsListed(api.list_reports().await),
        ApiCommand::GenerateReport(request) => {
            ApiEvent::ReportGenerated(api.generate_report(&request).await)
        }
        ApiCommand::DeleteReport(id) => ApiEvent::ReportDeleted {
            id,
            result: api.delete_report(id).await,
        },
        ApiCommand::DownloadReport { id, filename } => ApiEvent::ReportDownloaded {
            id,
            result: workflow::download_report(api, writer, id, &filename).await,
        },
    }
}
