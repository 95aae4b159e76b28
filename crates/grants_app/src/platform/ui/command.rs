//! Maps a line of user input to messages, given what is currently on screen.

use std::path::PathBuf;

use chrono::NaiveDate;
use grants_core::{
    AppViewModel, CompanyProfile, DocumentUpload, Grant, GrantStatus, Msg, Page, ReportId,
    ReportMode, SortDirection, SortField, PDF_MEDIA_TYPE,
};

pub const HELP: &str = "\
Pages:    grants | profile | reports | help | quit
Grants:   sort <affinity|deadline|title> [asc|desc] | order
          expand <n> | won <n> | delete <n>
          add | add <title> | <url> | <summary> | <YYYY-MM-DD> | <status> | <budget> | <affinity>
Profile:  edit | set <name|url|scope> <value> | save | upload | upload <file.pdf>
Reports:  generate | mode <generated|api> | content <text> | submit
          download <id> | delete <id>
Dialogs:  cancel | y / n to answer a confirmation";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    /// Text to print without touching state.
    Show(String),
    Dispatch(Vec<Msg>),
}

impl Command {
    fn one(msg: Msg) -> Self {
        Command::Dispatch(vec![msg])
    }

    fn hint(text: impl Into<String>) -> Self {
        Command::Show(text.into())
    }
}

pub fn parse_command(line: &str, view: &AppViewModel) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let word = word.to_ascii_lowercase();

    if view.confirmation.is_some() {
        match word.as_str() {
            "y" | "yes" => return Command::one(Msg::ConfirmAccepted),
            "n" | "no" => return Command::one(Msg::ConfirmDismissed),
            _ => {}
        }
    }

    match word.as_str() {
        "" => Command::Dispatch(Vec::new()),
        "quit" | "exit" => Command::Quit,
        "help" | "?" => Command::hint(HELP),
        "grants" => Command::one(Msg::PageOpened(Page::Grants)),
        "profile" => Command::one(Msg::PageOpened(Page::Profile)),
        "reports" => Command::one(Msg::PageOpened(Page::Reports)),
        "cancel" => cancel(view),
        _ => match view.page {
            Page::Grants => grants_command(&word, rest, view),
            Page::Profile => profile_command(&word, rest, view),
            Page::Reports => reports_command(&word, rest, view),
        },
    }
}

fn cancel(view: &AppViewModel) -> Command {
    if view.confirmation.is_some() {
        return Command::one(Msg::ConfirmDismissed);
    }
    let msg = match view.page {
        Page::Grants if view.grants.add_form_open => Msg::AddGrantClosed,
        Page::Profile if view.profile.upload_open => Msg::UploadDialogClosed,
        Page::Profile if view.profile.editing.is_some() => Msg::EditProfileCancelled,
        Page::Reports if view.reports.generate.is_some() => Msg::GenerateDialogClosed,
        _ => return Command::hint("Nothing to cancel"),
    };
    Command::one(msg)
}

fn grants_command(word: &str, rest: &str, view: &AppViewModel) -> Command {
    match word {
        "sort" => parse_sort(rest),
        "order" => Command::one(Msg::SortOrderToggled),
        "expand" => card_index(rest, view).map_or_else(Command::hint, |i| {
            Command::one(Msg::ExpandToggled(i))
        }),
        "won" => card_index(rest, view).map_or_else(Command::hint, |i| {
            Command::one(Msg::ToggleWonClicked(i))
        }),
        "delete" => card_index(rest, view).map_or_else(Command::hint, |i| {
            Command::one(Msg::DeleteGrantClicked(i))
        }),
        "add" if rest.is_empty() => Command::one(Msg::AddGrantOpened),
        "add" => match parse_grant(rest) {
            Ok(grant) => {
                let mut msgs = Vec::new();
                if !view.grants.add_form_open {
                    msgs.push(Msg::AddGrantOpened);
                }
                msgs.push(Msg::AddGrantSubmitted(grant));
                Command::Dispatch(msgs)
            }
            Err(hint) => Command::hint(hint),
        },
        _ => unknown(word),
    }
}

fn profile_command(word: &str, rest: &str, view: &AppViewModel) -> Command {
    match word {
        "edit" => Command::one(Msg::EditProfileClicked),
        "set" => {
            let Some(form) = view.profile.editing.as_ref() else {
                return Command::hint("Type `edit` before changing fields");
            };
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let mut values: CompanyProfile = form.clone();
            match field.to_ascii_lowercase().as_str() {
                "name" => values.name = value.trim().to_string(),
                "url" => values.url = value.trim().to_string(),
                "scope" => values.scope = value.trim().to_string(),
                _ => return Command::hint("Fields are name, url and scope"),
            }
            Command::one(Msg::ProfileFormEdited(values))
        }
        "save" | "submit" => Command::one(Msg::ProfileSubmitted),
        "upload" if rest.is_empty() && !view.profile.upload_open => {
            Command::one(Msg::UploadDialogOpened)
        }
        "upload" if rest.is_empty() => Command::one(Msg::DocumentSubmitted(None)),
        "upload" if !view.profile.upload_open => Command::Dispatch(vec![
            Msg::UploadDialogOpened,
            Msg::DocumentSubmitted(document(rest)),
        ]),
        "upload" => Command::one(Msg::DocumentSubmitted(document(rest))),
        _ => unknown(word),
    }
}

fn reports_command(word: &str, rest: &str, view: &AppViewModel) -> Command {
    match word {
        "generate" => Command::one(Msg::GenerateDialogOpened),
        "mode" => match rest.to_ascii_lowercase().as_str() {
            "generated" => Command::one(Msg::ReportModeChanged(ReportMode::Generated)),
            "api" => Command::one(Msg::ReportModeChanged(ReportMode::Api)),
            _ => Command::hint("Modes are generated and api"),
        },
        "content" => Command::one(Msg::ReportContentChanged(rest.replace("\\n", "\n"))),
        "submit" if view.reports.generate.is_some() => Command::one(Msg::GenerateSubmitted),
        "submit" => Command::hint("Type `generate` to open the report dialog"),
        "download" => report_id(rest, view).map_or_else(Command::hint, |id| {
            Command::one(Msg::DownloadReportClicked(id))
        }),
        "delete" => report_id(rest, view).map_or_else(Command::hint, |id| {
            Command::one(Msg::DeleteReportClicked(id))
        }),
        _ => unknown(word),
    }
}

fn unknown(word: &str) -> Command {
    Command::hint(format!("Unknown command `{word}`; type `help`"))
}

fn parse_sort(rest: &str) -> Command {
    let mut parts = rest.split_whitespace();
    let field = match parts.next().map(str::to_ascii_lowercase).as_deref() {
        Some("affinity") => SortField::Affinity,
        Some("deadline") => SortField::Deadline,
        Some("title") => SortField::Title,
        _ => return Command::hint("Sort by affinity, deadline or title"),
    };
    match parts.next().map(str::to_ascii_lowercase).as_deref() {
        None => Command::one(Msg::SortFieldSelected(field)),
        Some("asc") => Command::one(Msg::SortChanged {
            field,
            direction: SortDirection::Ascending,
        }),
        Some("desc") => Command::one(Msg::SortChanged {
            field,
            direction: SortDirection::Descending,
        }),
        Some(_) => Command::hint("Order is asc or desc"),
    }
}

/// 1-based card number to local index.
fn card_index(rest: &str, view: &AppViewModel) -> Result<usize, String> {
    let number: usize = rest
        .parse()
        .map_err(|_| "Give the card number shown in brackets".to_string())?;
    if number == 0 || number > view.grants.cards.len() {
        return Err(format!("No grant card #{number}"));
    }
    Ok(number - 1)
}

fn report_id(rest: &str, view: &AppViewModel) -> Result<ReportId, String> {
    let id: ReportId = rest
        .parse()
        .map_err(|_| "Give the report id shown in the table".to_string())?;
    if !view.reports.rows.iter().any(|row| row.id == id) {
        return Err(format!("No report with id {id}"));
    }
    Ok(id)
}

fn parse_grant(rest: &str) -> Result<Grant, String> {
    let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
    let &[title, url, summary, deadline, status, budget, affinity] = fields.as_slice() else {
        return Err("add needs 7 fields separated by |; type `help`".to_string());
    };
    let deadline = NaiveDate::parse_from_str(deadline, "%Y-%m-%d")
        .map_err(|_| format!("Deadline `{deadline}` is not YYYY-MM-DD"))?;
    let company_affinity: f64 = affinity
        .trim_end_matches('%')
        .parse()
        .map_err(|_| format!("Affinity `{affinity}` is not a number"))?;
    Ok(Grant {
        title: title.to_string(),
        url: url.to_string(),
        summary: summary.to_string(),
        deadline,
        status: GrantStatus::from(status.to_string()),
        budget: budget.to_string(),
        company_affinity,
        won: false,
    })
}

/// `None` when the file does not exist; the media type follows the extension.
fn document(raw: &str) -> Option<DocumentUpload> {
    let path = PathBuf::from(raw.trim_matches('"'));
    if !path.is_file() {
        return None;
    }
    let file_name = path.file_name()?.to_string_lossy().into_owned();
    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    let media_type = if is_pdf {
        PDF_MEDIA_TYPE
    } else {
        "application/octet-stream"
    };
    Some(DocumentUpload {
        path,
        file_name,
        media_type: media_type.to_string(),
    })
}
