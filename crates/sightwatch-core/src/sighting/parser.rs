//! Line-anchored sighting report parser.

use tracing::{debug, trace};

use super::anchors::{Field, ValueSplit, ANCHORS};
use super::FieldParser;
use crate::models::report::{SightingFields, AUTO_EXTRACTED_OBSERVER, AUTO_EXTRACTED_SPECIES};

/// Marker introducing the free-text description block.
pub const DESCRIPTION_LABEL: &str = "Description:";

/// Markers ending the description block, applied in order.
pub const DESCRIPTION_END_MARKERS: [&str; 2] = ["Generated on:", "\n\n\n"];

/// Characters of free-form text kept as the description.
pub const FREE_FORM_LIMIT: usize = 500;

const ELLIPSIS: &str = "...";

/// Result of parsing one report text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    /// Parsed fields, sentinels where nothing matched.
    pub fields: SightingFields,
    /// Fields in the order their anchors matched. Repeats are kept.
    pub found: Vec<Field>,
    /// No anchor matched and the text was used whole as the description.
    pub free_form: bool,
}

/// Parser matching `Label: value` lines against [`ANCHORS`].
///
/// Quirk kept on purpose: `Date:` honors the first matching line only,
/// while every other field is overwritten by each later matching line.
#[derive(Debug, Clone)]
pub struct SightingParser {
    free_form_limit: usize,
}

impl SightingParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            free_form_limit: FREE_FORM_LIMIT,
        }
    }

    /// Set how many characters of free-form text become the description.
    pub fn with_free_form_limit(mut self, limit: usize) -> Self {
        self.free_form_limit = limit;
        self
    }
}

impl Default for SightingParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldParser for SightingParser {
    fn parse(&self, text: &str, filename: &str) -> ParseResult {
        debug!("Parsing report data for {}", filename);
        trace!("Text to parse: {}...", char_prefix(text, 1000));

        let mut fields = SightingFields::unparsed();
        let mut found: Vec<Field> = Vec::new();

        for line in text.split('\n') {
            let line = line.trim();
            let lowered = line.to_lowercase();

            let Some(anchor) = ANCHORS.iter().find(|a| {
                a.matches(line, &lowered) && !(a.first_match_only && found.contains(&a.field))
            }) else {
                continue;
            };

            let value = match anchor.split {
                ValueSplit::WholeText => match extract_description(text) {
                    Some(description) => description,
                    None => continue,
                },
                _ => anchor.value(line).to_string(),
            };

            *slot(&mut fields, anchor.field) = value;
            found.push(anchor.field);
        }

        let trimmed = text.trim();
        let free_form = found.is_empty() && !trimmed.is_empty();
        if free_form {
            fields.description = truncate_with_ellipsis(trimmed, self.free_form_limit);
            fields.observer_name = AUTO_EXTRACTED_OBSERVER.to_string();
            fields.species = AUTO_EXTRACTED_SPECIES.to_string();
        }

        debug!("Found fields: {:?}", found);
        trace!("Parsed data: {:?}", fields);

        ParseResult {
            fields,
            found,
            free_form,
        }
    }
}

/// Description block: from the first `Description:` in the whole text up
/// to the first end marker, trimmed.
pub fn extract_description(text: &str) -> Option<String> {
    let start = text.find(DESCRIPTION_LABEL)? + DESCRIPTION_LABEL.len();
    let mut description = text[start..].trim();

    for marker in DESCRIPTION_END_MARKERS {
        if let Some(end) = description.find(marker) {
            description = description[..end].trim();
        }
    }

    Some(description.to_string())
}

/// The first `n` characters of `text`.
pub fn char_prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    let prefix = char_prefix(text, limit);
    if prefix.len() < text.len() {
        format!("{}{}", prefix, ELLIPSIS)
    } else {
        prefix.to_string()
    }
}

fn slot(fields: &mut SightingFields, field: Field) -> &mut String {
    match field {
        Field::ObserverName => &mut fields.observer_name,
        Field::Date => &mut fields.date,
        Field::Time => &mut fields.time,
        Field::Species => &mut fields.species,
        Field::City => &mut fields.city,
        Field::Location => &mut fields.location,
        Field::Weather => &mut fields.weather,
        Field::AnimalBehavior => &mut fields.animal_behavior,
        Field::UrgencyLevel => &mut fields.urgency_level,
        Field::Description => &mut fields.description,
    }
}
