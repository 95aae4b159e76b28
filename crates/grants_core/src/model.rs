//! Records exchanged with the backend.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type ReportId = u64;

/// A funding opportunity as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub deadline: NaiveDate,
    pub status: GrantStatus,
    pub budget: String,
    #[serde(default = "default_affinity")]
    pub company_affinity: f64,
    #[serde(default)]
    pub won: bool,
}

fn default_affinity() -> f64 {
    100.0
}

impl Grant {
    /// Backend records carry no id; `(title, url)` is what identifies them.
    pub fn same_record(&self, other: &Grant) -> bool {
        self.title == other.title && self.url == other.url
    }

    /// Checks the fields the add form requires before anything is sent.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Please enter a grant title".to_string());
        }
        if url::Url::parse(self.url.trim()).is_err() {
            return Err("Please enter a valid grant URL".to_string());
        }
        if !self.company_affinity.is_finite() || !(0.0..=100.0).contains(&self.company_affinity) {
            return Err("Company affinity must be between 0 and 100".to_string());
        }
        Ok(())
    }
}

/// Grant status. The wire form is the capitalised label; unknown labels are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GrantStatus {
    Open,
    Closed,
    Upcoming,
    Other(String),
}

impl GrantStatus {
    pub fn label(&self) -> &str {
        match self {
            GrantStatus::Open => "Open",
            GrantStatus::Closed => "Closed",
            GrantStatus::Upcoming => "Upcoming",
            GrantStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for GrantStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "open" => GrantStatus::Open,
            "closed" => GrantStatus::Closed,
            "upcoming" => GrantStatus::Upcoming,
            _ => GrantStatus::Other(raw),
        }
    }
}

impl From<GrantStatus> for String {
    fn from(status: GrantStatus) -> Self {
        match status {
            GrantStatus::Other(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for GrantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The company the grants are evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub url: String,
    pub scope: String,
}

/// How a report body is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// Backend builds the report from the profile and the won grants.
    #[default]
    Generated,
    /// Caller supplies the report text.
    Api,
}

/// Report type as listed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Generated,
    Api,
    #[serde(other)]
    Unknown,
}

/// Metadata of a generated PDF report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub generated_at: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub filename: String,
}

/// Body of `POST /api/reports/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateReportRequest {
    #[serde(rename = "type")]
    pub mode: ReportMode,
    pub content: String,
}
