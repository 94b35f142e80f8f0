//! Sighting report data model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Value of a field whose anchor never matched.
pub const NOT_FOUND: &str = "Not found";

/// Default urgency when a report does not state one.
pub const DEFAULT_URGENCY: &str = "Medium";

/// Urgency assigned to reports that failed with an unexpected error.
pub const ERROR_URGENCY: &str = "High";

/// Placeholder for descriptive fields of reports whose text was empty.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for descriptive fields of reports that hit an error.
pub const ERROR: &str = "Error";

/// Observer name assigned to free-form reports without any field anchors.
pub const AUTO_EXTRACTED_OBSERVER: &str = "Auto-extracted";

/// Species assigned to free-form reports without any field anchors.
pub const AUTO_EXTRACTED_SPECIES: &str = "Unknown species";

/// Descriptive fields extracted from the text of a sighting report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SightingFields {
    pub observer_name: String,
    pub species: String,
    pub city: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub urgency_level: String,
    pub weather: String,
    pub animal_behavior: String,
    pub description: String,
}

impl SightingFields {
    /// Fields as they stand before any anchor is matched.
    pub fn unparsed() -> Self {
        Self {
            observer_name: NOT_FOUND.to_string(),
            species: NOT_FOUND.to_string(),
            city: NOT_FOUND.to_string(),
            location: NOT_FOUND.to_string(),
            date: NOT_FOUND.to_string(),
            time: NOT_FOUND.to_string(),
            urgency_level: DEFAULT_URGENCY.to_string(),
            weather: NOT_FOUND.to_string(),
            animal_behavior: NOT_FOUND.to_string(),
            description: NOT_FOUND.to_string(),
        }
    }

    /// Fields for a report that could not be read: every descriptive field
    /// carries `placeholder`, date and time carry the processing moment.
    pub fn placeholder(
        placeholder: &str,
        urgency_level: &str,
        now: NaiveDateTime,
        description: String,
    ) -> Self {
        Self {
            observer_name: placeholder.to_string(),
            species: placeholder.to_string(),
            city: placeholder.to_string(),
            location: placeholder.to_string(),
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M").to_string(),
            urgency_level: urgency_level.to_string(),
            weather: placeholder.to_string(),
            animal_behavior: placeholder.to_string(),
            description,
        }
    }
}

impl Default for SightingFields {
    fn default() -> Self {
        Self::unparsed()
    }
}

/// Processing outcome of a single report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Text was extracted and parsed.
    Processed,
    /// The file yielded no text; needs manual review.
    ParsingFailed,
    /// An unexpected failure occurred while building the report.
    Error,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::ParsingFailed => "parsing_failed",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sighting report, built from one PDF file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// File name without the `.pdf` extension.
    pub id: String,

    /// File name including extension.
    pub filename: String,

    /// Moment this report was built.
    pub timestamp: NaiveDateTime,

    /// Parsed (or placeholder) descriptive fields.
    #[serde(flatten)]
    pub fields: SightingFields,

    /// Path of the source file.
    pub file_path: String,

    /// Size of the source file in bytes.
    pub file_size: u64,

    /// Modification time stored on the source file.
    pub last_modified: NaiveDateTime,

    /// Processing outcome.
    pub status: ReportStatus,

    /// Leading characters of the extracted text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text_preview: Option<String>,
}

impl Report {
    /// Whether the report needs human attention.
    pub fn needs_review(&self) -> bool {
        self.status != ReportStatus::Processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_placeholder_fields() {
        let fields = SightingFields::placeholder(UNKNOWN, DEFAULT_URGENCY, sample_time(), "x".into());
        assert_eq!(fields.observer_name, "Unknown");
        assert_eq!(fields.date, "2024-05-17");
        assert_eq!(fields.time, "09:05");
        assert_eq!(fields.urgency_level, "Medium");
    }

    #[test]
    fn test_report_serializes_flat_with_snake_case_status() {
        let report = Report {
            id: "sighting1".into(),
            filename: "sighting1.pdf".into(),
            timestamp: sample_time(),
            fields: SightingFields::unparsed(),
            file_path: "/reports/sighting1.pdf".into(),
            file_size: 1024,
            last_modified: sample_time(),
            status: ReportStatus::ParsingFailed,
            raw_text_preview: None,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["observer_name"], "Not found");
        assert_eq!(json["status"], "parsing_failed");
        assert_eq!(json["file_size"], 1024);
        assert_eq!(json["timestamp"], "2024-05-17T09:05:00");
        assert!(json.get("raw_text_preview").is_none());
        assert!(json.get("fields").is_none());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ReportStatus::Processed.to_string(), "processed");
        assert_eq!(ReportStatus::Error.as_str(), "error");
    }
}
