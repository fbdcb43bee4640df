//! Paper records and writing-phase status.

use super::record::{
    check_date, check_url, new_record_id, non_empty, null_as_default, require, timestamp_now,
    trimmed, Record, RecordId, ValidationError,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Writing phase of a paper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperStatus {
    #[default]
    Idea,
    Planning,
    Writing,
    Submitted,
}

impl PaperStatus {
    pub const ALL: [PaperStatus; 4] = [
        PaperStatus::Idea,
        PaperStatus::Planning,
        PaperStatus::Writing,
        PaperStatus::Submitted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idea => "idea",
            Self::Planning => "planning",
            Self::Writing => "writing",
            Self::Submitted => "submitted",
        }
    }

    /// Parses the exact lowercase status name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "idea" => Some(Self::Idea),
            "planning" => Some(Self::Planning),
            "writing" => Some(Self::Writing),
            "submitted" => Some(Self::Submitted),
            _ => None,
        }
    }

    /// Progress percentage shown for this phase.
    pub fn progress(self) -> u8 {
        match self {
            Self::Idea => 0,
            Self::Planning => 25,
            Self::Writing => 60,
            Self::Submitted => 100,
        }
    }

    /// Capitalized label, e.g. `Writing`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idea => "Idea",
            Self::Planning => "Planning",
            Self::Writing => "Writing",
            Self::Submitted => "Submitted",
        }
    }
}

/// Progress percentage for a raw status string. Unknown values map to `0`.
pub fn progress_from_status(status: &str) -> u8 {
    PaperStatus::parse(status).map_or(0, PaperStatus::progress)
}

/// A paper being planned, written or submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub id: RecordId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// ISO date string, `None` when no deadline is set.
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: PaperStatus,
    /// Journal ids in selection order. Dangling ids are allowed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub journal_ids: Vec<RecordId>,
    #[serde(default)]
    pub conference_link: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl Paper {
    /// Builds a new paper from form input with a fresh id and `created_at`.
    pub fn from_input(input: &PaperInput) -> Self {
        let mut paper = Self {
            id: new_record_id(),
            title: String::new(),
            description: String::new(),
            deadline: None,
            status: PaperStatus::default(),
            journal_ids: Vec::new(),
            conference_link: None,
            notes: None,
            created_at: timestamp_now(),
        };
        paper.apply(input);
        paper
    }

    /// Overwrites every mutable field from `input`; `id` and `created_at`
    /// are left untouched.
    pub fn apply(&mut self, input: &PaperInput) {
        self.title = trimmed(&input.title);
        self.description = trimmed(&input.description);
        self.deadline = non_empty(&input.deadline);
        self.status = PaperStatus::parse(input.status.trim()).unwrap_or_default();
        self.journal_ids = input
            .journal_ids
            .iter()
            .filter_map(|id| non_empty(id))
            .collect();
        self.conference_link = non_empty(&input.conference_link);
        self.notes = non_empty(&input.notes);
    }

    pub fn progress(&self) -> u8 {
        self.status.progress()
    }

    /// Active papers are those not yet submitted.
    pub fn is_active(&self) -> bool {
        self.status != PaperStatus::Submitted
    }
}

impl Record for Paper {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Raw paper form submission. Every field is an untrimmed string except the
/// repeatable journal selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperInput {
    pub title: String,
    pub description: String,
    pub deadline: String,
    /// Empty means `idea`.
    pub status: String,
    pub journal_ids: Vec<String>,
    pub conference_link: String,
    pub notes: String,
}

impl PaperInput {
    /// Shortcut for a form with only a title filled in.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Prefills a form from an existing paper, as the edit dialog does.
    pub fn from_paper(paper: &Paper) -> Self {
        Self {
            title: paper.title.clone(),
            description: paper.description.clone(),
            deadline: paper
                .deadline
                .as_deref()
                .map(super::date::date_input_value)
                .unwrap_or_default(),
            status: paper.status.as_str().to_string(),
            journal_ids: paper.journal_ids.clone(),
            conference_link: paper.conference_link.clone().unwrap_or_default(),
            notes: paper.notes.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        let status = self.status.trim();
        if !status.is_empty() && PaperStatus::parse(status).is_none() {
            return Err(ValidationError::InvalidStatus(status.to_string()));
        }
        check_date("deadline", &self.deadline)?;
        check_url("conferenceLink", &self.conference_link)?;
        Ok(())
    }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<PaperStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(PaperStatus::parse)
        .unwrap_or_default())
}
