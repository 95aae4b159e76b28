use crate::model::{Report, ReportId, ReportMode};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerateForm {
    pub mode: ReportMode,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportsState {
    pub(crate) reports: Vec<Report>,
    pub(crate) generate: Option<GenerateForm>,
}

impl ReportsState {
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn generate_form(&self) -> Option<&GenerateForm> {
        self.generate.as_ref()
    }

    pub fn get(&self, id: ReportId) -> Option<&Report> {
        self.reports.iter().find(|report| report.id == id)
    }

    /// Newest first: generated reports go to the front.
    pub(crate) fn prepend(&mut self, report: Report) {
        self.reports.insert(0, report);
    }

    pub(crate) fn remove(&mut self, id: ReportId) {
        self.reports.retain(|report| report.id != id);
    }
}
