//! Conference records.

use super::record::{
    check_date, check_url, new_record_id, null_as_default, require, timestamp_now, trimmed,
    Record, RecordId, ValidationError,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conference {
    pub id: RecordId,
    pub name: String,
    /// Date string, empty when unknown.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl Conference {
    pub fn from_input(input: &ConferenceInput) -> Self {
        let mut conference = Self {
            id: new_record_id(),
            name: String::new(),
            date: String::new(),
            link: String::new(),
            description: String::new(),
            created_at: timestamp_now(),
        };
        conference.apply(input);
        conference
    }

    pub fn apply(&mut self, input: &ConferenceInput) {
        self.name = trimmed(&input.name);
        self.date = trimmed(&input.date);
        self.link = trimmed(&input.link);
        self.description = trimmed(&input.description);
    }
}

impl Record for Conference {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConferenceInput {
    pub name: String,
    pub date: String,
    pub link: String,
    pub description: String,
}

impl ConferenceInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_conference(conference: &Conference) -> Self {
        Self {
            name: conference.name.clone(),
            date: super::date::date_input_value(&conference.date),
            link: conference.link.clone(),
            description: conference.description.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        check_date("date", &self.date)?;
        check_url("link", &self.link)?;
        Ok(())
    }
}
