//! Line anchors recognized in sighting report text.

/// A descriptive report field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ObserverName,
    Date,
    Time,
    Species,
    City,
    Location,
    Weather,
    AnimalBehavior,
    UrgencyLevel,
    Description,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ObserverName => "observer_name",
            Self::Date => "date",
            Self::Time => "time",
            Self::Species => "species",
            Self::City => "city",
            Self::Location => "location",
            Self::Weather => "weather",
            Self::AnimalBehavior => "animal_behavior",
            Self::UrgencyLevel => "urgency_level",
            Self::Description => "description",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the value starts on a matching line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSplit {
    /// After the last `:` on the line.
    LastColon,
    /// After the last occurrence of the anchor label.
    AfterLabel,
    /// Not taken from the line: the value is cut from the whole text.
    WholeText,
}

/// A literal label locating a field value on a line.
#[derive(Debug, Clone, Copy)]
pub struct Anchor {
    /// Field filled by this anchor.
    pub field: Field,
    /// Case-sensitive label.
    pub label: &'static str,
    /// Lowercase label matched against the lowercased line.
    pub loose_label: Option<&'static str>,
    /// How the value is cut from the line.
    pub split: ValueSplit,
    /// Only the first matching line counts. Other anchors keep the last match.
    pub first_match_only: bool,
}

impl Anchor {
    const fn new(field: Field, label: &'static str, split: ValueSplit) -> Self {
        Self {
            field,
            label,
            loose_label: None,
            split,
            first_match_only: false,
        }
    }

    const fn loose(mut self, label: &'static str) -> Self {
        self.loose_label = Some(label);
        self
    }

    const fn first_only(mut self) -> Self {
        self.first_match_only = true;
        self
    }

    /// Whether `line` carries this anchor. `lowered` is `line` lowercased.
    pub fn matches(&self, line: &str, lowered: &str) -> bool {
        line.contains(self.label) || self.loose_label.is_some_and(|l| lowered.contains(l))
    }

    /// Cut the trimmed value out of a matching line.
    pub fn value<'a>(&self, line: &'a str) -> &'a str {
        let value = match self.split {
            ValueSplit::LastColon => line.rsplit(':').next().unwrap_or(line),
            ValueSplit::AfterLabel => line
                .rfind(self.label)
                .map(|i| &line[i + self.label.len()..])
                .unwrap_or(line),
            ValueSplit::WholeText => line,
        };
        value.trim()
    }
}

/// Anchors in priority order: a line is claimed by the first anchor that
/// matches it.
pub static ANCHORS: [Anchor; 10] = [
    Anchor::new(Field::ObserverName, "Observer Name:", ValueSplit::LastColon).loose("observer name:"),
    Anchor::new(Field::Date, "Date:", ValueSplit::AfterLabel).first_only(),
    Anchor::new(Field::Time, "Time:", ValueSplit::AfterLabel),
    Anchor::new(Field::Species, "Wildlife Species:", ValueSplit::LastColon).loose("species:"),
    Anchor::new(Field::City, "City:", ValueSplit::AfterLabel),
    Anchor::new(Field::Location, "Specific Location:", ValueSplit::LastColon).loose("location:"),
    Anchor::new(Field::Weather, "Weather Conditions:", ValueSplit::LastColon).loose("weather:"),
    Anchor::new(Field::AnimalBehavior, "Animal Behavior:", ValueSplit::LastColon).loose("behavior:"),
    Anchor::new(Field::UrgencyLevel, "Urgency Level:", ValueSplit::LastColon).loose("urgency:"),
    Anchor::new(Field::Description, "Description:", ValueSplit::WholeText),
];
