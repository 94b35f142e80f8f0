//! Report building and directory scanning.

mod builder;
mod processed;
mod scanner;

pub use builder::{report_id, ReportBuilder};
pub use processed::ProcessedFiles;
pub use scanner::{is_pdf, DirectoryScanner};

#[cfg(test)]
pub(crate) mod testing {
    use std::path::Path;

    use crate::pdf::TextExtractor;

    /// Reads report files as UTF-8 text; anything else counts as a failed
    /// extraction.
    #[derive(Debug, Default)]
    pub(crate) struct PlainTextExtractor;

    impl TextExtractor for PlainTextExtractor {
        fn extract_text(&self, path: &Path) -> String {
            std::fs::read(path)
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok())
                .unwrap_or_default()
        }
    }

    pub(crate) const SIGHTING_TEXT: &str = "Observer Name: Jane Doe
Date: 2024-05-17
Time: 14:30
Wildlife Species: Red Fox
City: Portland
Specific Location: Forest Park trailhead
Weather Conditions: Clear
Animal Behavior: Foraging
Urgency Level: Low
Description: Adult fox crossing the trail.
Generated on: 2024-05-17
";
}
