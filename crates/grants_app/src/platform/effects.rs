use std::sync::mpsc;
use std::thread;

use grants_client::{ApiCommand, ApiError, ApiEvent, ClientConfig, ClientEvents, ClientHandle};
use grants_core::{Effect, GrantKey, Msg, RequestFailure};
use grants_logging::{grants_error, grants_info, grants_warn};

/// Hands effects to the client worker and feeds its results back as messages.
pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new<E>(config: ClientConfig, msg_tx: mpsc::Sender<E>) -> anyhow::Result<Self>
    where
        E: From<Msg> + Send + 'static,
    {
        grants_info!(
            "Starting client base_url={} download_dir={:?}",
            config.api.base_url,
            config.download_dir
        );
        let (client, events) = ClientHandle::spawn(config)?;
        spawn_event_loop(events, msg_tx);
        Ok(Self { client })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            if !self.client.submit(to_command(effect)) {
                grants_error!("Client worker stopped; dropping remaining effects");
                return;
            }
        }
    }
}

fn spawn_event_loop<E>(events: ClientEvents, msg_tx: mpsc::Sender<E>)
where
    E: From<Msg> + Send + 'static,
{
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if msg_tx.send(E::from(to_msg(event))).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn to_command(effect: Effect) -> ApiCommand {
    match effect {
        Effect::LoadGrants => ApiCommand::ListGrants,
        Effect::CreateGrant { grant } => ApiCommand::CreateGrant(grant),
        Effect::DeleteGrant { key, grant } => ApiCommand::DeleteGrant {
            ticket: key.0,
            grant,
        },
        Effect::ToggleWon { key, grant } => ApiCommand::ToggleWon {
            ticket: key.0,
            grant,
        },
        Effect::LoadProfile => ApiCommand::GetCompany,
        Effect::SaveProfile { profile } => ApiCommand::SaveCompany(profile),
        Effect::ImportProfileDocument { path } => ApiCommand::ImportCompanyDocument { path },
        Effect::LoadReports => ApiCommand::ListReports,
        Effect::GenerateReport { request } => ApiCommand::GenerateReport(request),
        Effect::DeleteReport { id } => ApiCommand::DeleteReport(id),
        Effect::DownloadReport { id, filename } => ApiCommand::DownloadReport { id, filename },
    }
}

pub(crate) fn to_msg(event: ApiEvent) -> Msg {
    match event {
        ApiEvent::GrantsListed(result) => Msg::GrantsLoaded(failure("list grants", result)),
        ApiEvent::GrantCreated(result) => Msg::GrantCreated(failure("create grant", result)),
        ApiEvent::GrantDeleted { ticket, result } => Msg::GrantDeleted {
            key: GrantKey(ticket),
            result: failure("delete grant", result),
        },
        ApiEvent::WonToggled { ticket, result } => Msg::WonToggled {
            key: GrantKey(ticket),
            result: failure("toggle won", result),
        },
        ApiEvent::CompanyLoaded(result) => Msg::ProfileLoaded(failure("load company", result)),
        ApiEvent::CompanySaved(result) => Msg::ProfileSaved(failure("save company", result)),
        ApiEvent::CompanyImported(result) => {
            Msg::DocumentImported(failure("upload company pdf", result))
        }
        ApiEvent::ReportsListed(result) => Msg::ReportsLoaded(failure("list reports", result)),
        ApiEvent::ReportGenerated(result) => {
            Msg::ReportGenerated(failure("generate report", result))
        }
        ApiEvent::ReportDeleted { id, result } => Msg::ReportDeleted {
            id,
            result: failure("delete report", result),
        },
        ApiEvent::ReportDownloaded { id, result } => Msg::ReportDownloaded {
            id,
            result: failure("download report", result),
        },
    }
}

fn failure<T>(operation: &str, result: Result<T, ApiError>) -> Result<T, RequestFailure> {
    result.map_err(|err| {
        grants_warn!("{} failed: {} (detail: {:?})", operation, err, err.detail);
        RequestFailure { detail: err.detail }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use grants_client::FailureKind;
    use grants_core::ReportId;
    use pretty_assertions::assert_eq;

    #[test]
    fn grant_key_travels_as_ticket() {
        let grant = grants_core::Grant {
            title: "Clean Tech".into(),
            url: "https://example.com".into(),
            summary: String::new(),
            deadline: chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            status: grants_core::GrantStatus::Open,
            budget: String::new(),
            company_affinity: 90.0,
            won: false,
        };
        let command = to_command(Effect::ToggleWon {
            key: GrantKey(12),
            grant: grant.clone(),
        });
        assert_eq!(command, ApiCommand::ToggleWon { ticket: 12, grant });

        let msg = to_msg(ApiEvent::GrantDeleted {
            ticket: 12,
            result: Ok(()),
        });
        assert_eq!(
            msg,
            Msg::GrantDeleted {
                key: GrantKey(12),
                result: Ok(())
            }
        );
    }

    #[test]
    fn backend_detail_survives_the_mapping() {
        let id: ReportId = 4;
        let msg = to_msg(ApiEvent::ReportDeleted {
            id,
            result: Err(ApiError {
                kind: FailureKind::HttpStatus(404),
                message: "404 Not Found".into(),
                detail: Some("Report not found".into()),
            }),
        });
        assert_eq!(
            msg,
            Msg::ReportDeleted {
                id,
                result: Err(RequestFailure::with_detail("Report not found"))
            }
        );
    }
}
