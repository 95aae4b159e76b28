use std::fmt::Write;

use grants_core::{
    AffinityBand, AppViewModel, GrantCardView, GrantsView, NotificationKind, NotificationView,
    Page, ProfileView, ReportMode, ReportsView,
};

/// Turns view models into terminal output, printing only what changed.
pub struct Renderer {
    base_url: String,
    last_page: String,
    last_notification: u64,
}

impl Renderer {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            last_page: String::new(),
            last_notification: 0,
        }
    }

    /// Text to print for this view, or `None` when the screen is unchanged.
    pub fn frame(&mut self, view: &AppViewModel) -> Option<String> {
        let mut out = String::new();

        let page = render_page(view, &self.base_url);
        if page != self.last_page {
            out.push_str(&page);
            self.last_page = page;
        }

        for toast in view.notifications.iter() {
            if toast.id <= self.last_notification {
                continue;
            }
            out.push_str(&render_notification(toast));
            out.push('\n');
            self.last_notification = toast.id;
        }

        (!out.is_empty()).then_some(out)
    }
}

pub fn render_page(view: &AppViewModel, base_url: &str) -> String {
    let mut out = match view.page {
        Page::Grants => render_grants(&view.grants),
        Page::Profile => render_profile(&view.profile),
        Page::Reports => render_reports(&view.reports, base_url),
    };
    if let Some(prompt) = &view.confirmation {
        let _ = writeln!(out, "\n{prompt} [y/n]");
    }
    out
}

fn render_notification(toast: &NotificationView) -> String {
    match toast.kind {
        NotificationKind::Success => format!("[ok] {}", toast.message),
        NotificationKind::Error => format!("[error] {}", toast.message),
    }
}

fn render_grants(view: &GrantsView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "== Grants == sorted by {} ({})",
        view.sort.field.label(),
        view.sort.direction.label()
    );
    if view.cards.is_empty() {
        out.push_str("No grants yet.\n");
    }
    for card in &view.cards {
        render_card(&mut out, card);
    }
    if view.add_form_open {
        out.push_str(
            "\nNew grant: add <title> | <url> | <summary> | <YYYY-MM-DD> | <status> | <budget> | <affinity>\n",
        );
    }
    out
}

fn render_card(out: &mut String, card: &GrantCardView) {
    let marker = if card.expanded { "v" } else { ">" };
    let won = if card.won { "  [WON]" } else { "" };
    let _ = writeln!(
        out,
        "{marker} [{}] {}  {} ({}){won}",
        card.index + 1,
        card.title,
        card.affinity_label,
        band_label(card.affinity_band),
    );
    if !card.summary.is_empty() {
        let _ = writeln!(out, "      {}", card.summary);
    }
    if let Some(details) = &card.details {
        let _ = writeln!(out, "      Deadline: {}", details.deadline);
        let _ = writeln!(out, "      Status:   {}", details.status);
        let _ = writeln!(out, "      Budget:   {}", details.budget);
        let _ = writeln!(out, "      Link:     {}", details.url);
    }
}

fn band_label(band: AffinityBand) -> &'static str {
    match band {
        AffinityBand::High => "high",
        AffinityBand::Medium => "medium",
        AffinityBand::Low => "low",
        AffinityBand::Poor => "poor",
    }
}

fn render_profile(view: &ProfileView) -> String {
    let mut out = String::from("== Company profile ==\n");
    if !view.loaded {
        out.push_str("Loading...\n");
        return out;
    }
    let _ = writeln!(out, "Name:  {}", view.name);
    let _ = writeln!(out, "URL:   {}", view.url);
    let _ = writeln!(out, "Scope: {}", view.scope);

    if let Some(form) = &view.editing {
        out.push_str("\nEditing (set <field> <value>, save, cancel):\n");
        let _ = writeln!(out, "  name:  {}", form.name);
        let _ = writeln!(out, "  url:   {}", form.url);
        let _ = writeln!(out, "  scope: {}", form.scope);
    }
    if view.upload_open {
        if view.upload_busy {
            out.push_str("\nUploading and extracting...\n");
        } else {
            out.push_str("\nUpload company PDF: upload <file.pdf>, or cancel\n");
        }
    }
    out
}

fn render_reports(view: &ReportsView, base_url: &str) -> String {
    let mut out = String::from("== Reports ==\n");
    if view.rows.is_empty() {
        out.push_str("No reports yet.\n");
    }
    for row in &view.rows {
        let _ = writeln!(
            out,
            "#{} {}  [{}]  {}  {}",
            row.id, row.name, row.type_label, row.generated_at, row.file_size
        );
        if let Some(description) = &row.description {
            let _ = writeln!(out, "    {}", description.short);
        }
        let _ = writeln!(out, "    {}{}", base_url, row.download_path);
    }

    if let Some(dialog) = &view.generate {
        let mode = match dialog.mode {
            ReportMode::Generated => "generated",
            ReportMode::Api => "api",
        };
        let _ = writeln!(out, "\nGenerate report (mode {mode}): {}", dialog.info_text);
        if dialog.content_visible {
            let _ = writeln!(out, "Content:\n{}", dialog.content);
        }
        out.push_str("mode <generated|api>, content <text>, submit, cancel\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use grants_core::{update, AppState, Grant, GrantStatus, Msg, Report, ReportKind};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn grant(title: &str, affinity: f64) -> Grant {
        Grant {
            title: title.into(),
            url: format!("https://example.com/{title}"),
            summary: format!("{title} summary"),
            deadline: chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            status: GrantStatus::Open,
            budget: "$50,000".into(),
            company_affinity: affinity,
            won: false,
        }
    }

    fn apply(state: AppState, msg: Msg) -> AppState {
        update(state, msg).0
    }

    #[test]
    fn grant_cards_show_rank_badge_and_details() {
        let state = apply(
            AppState::new(),
            Msg::GrantsLoaded(Ok(vec![grant("Low", 45.0), grant("Top", 85.0)])),
        );
        let state = apply(state, Msg::ExpandToggled(0));
        let text = render_page(&state.view(), "http://localhost");

        assert_eq!(
            text,
            "== Grants == sorted by affinity (Descending)\n\
             v [1] Top  85% Match (high)\n      Top summary\n\
             \x20     Deadline: March 15, 2024\n\
             \x20     Status:   Open\n\
             \x20     Budget:   $50,000\n\
             \x20     Link:     https://example.com/Top\n\
             > [2] Low  45% Match (low)\n      Low summary\n"
        );
    }

    #[test]
    fn empty_profile_uses_placeholders() {
        let state = apply(AppState::new(), Msg::PageOpened(Page::Profile));
        let state = apply(state, Msg::ProfileLoaded(Ok(None)));
        let text = render_page(&state.view(), "");
        assert!(text.contains("Name:  No company profile set"));
        assert!(text.contains("URL:   -"));
    }

    #[test]
    fn report_rows_link_to_backend_download() {
        let state = apply(AppState::new(), Msg::PageOpened(Page::Reports));
        let state = apply(
            state,
            Msg::ReportsLoaded(Ok(vec![Report {
                id: 7,
                name: "Q1 summary".into(),
                description: None,
                kind: ReportKind::Generated,
                generated_at: "2024-03-15T14:30:00".into(),
                file_size: 1536,
                filename: "q1.pdf".into(),
            }])),
        );
        let text = render_page(&state.view(), "http://localhost:8000");
        assert!(text.contains("#7 Q1 summary  [Generated]"));
        assert!(text.contains("1.5 KB"));
        assert!(text.contains("http://localhost:8000/api/reports/7/download"));
    }

    #[test]
    fn renderer_prints_changes_and_each_toast_once() {
        let mut renderer = Renderer::new("http://localhost/");
        let state = AppState::new();
        assert!(renderer.frame(&state.view()).is_some());
        assert_eq!(renderer.frame(&state.view()), None);

        let state = apply(state, Msg::GrantsLoaded(Err(Default::default())));
        let frame = renderer.frame(&state.view()).unwrap();
        assert_eq!(frame, "[error] Error loading grants\n");
        assert_eq!(renderer.frame(&state.view()), None);

        let state = apply(state, Msg::Tick { elapsed: Duration::from_secs(4) });
        assert!(state.view().notifications.is_empty());
        assert_eq!(renderer.frame(&state.view()), None);
    }

    #[test]
    fn confirmation_prompt_is_appended() {
        let state = apply(
            AppState::new(),
            Msg::GrantsLoaded(Ok(vec![grant("Only", 70.0)])),
        );
        let state = apply(state, Msg::DeleteGrantClicked(0));
        let text = render_page(&state.view(), "");
        assert!(text.ends_with("Are you sure you want to delete this grant? [y/n]\n"));
    }
}
