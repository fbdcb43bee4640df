//! Journal records.

use super::record::{
    check_decimal, check_url, new_record_id, null_as_default, require, timestamp_now, trimmed,
    Record, RecordId, ValidationError,
};
use serde::{Deserialize, Serialize};

/// A journal papers can target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journal {
    pub id: RecordId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publisher: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    /// Impact factor kept as entered, e.g. `5.123`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub if_value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl Journal {
    pub fn from_input(input: &JournalInput) -> Self {
        let mut journal = Self {
            id: new_record_id(),
            name: String::new(),
            publisher: String::new(),
            category: String::new(),
            link: String::new(),
            if_value: String::new(),
            created_at: timestamp_now(),
        };
        journal.apply(input);
        journal
    }

    pub fn apply(&mut self, input: &JournalInput) {
        self.name = trimmed(&input.name);
        self.publisher = trimmed(&input.publisher);
        self.category = trimmed(&input.category);
        self.link = trimmed(&input.link);
        self.if_value = trimmed(&input.if_value);
    }
}

impl Record for Journal {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalInput {
    pub name: String,
    pub publisher: String,
    pub category: String,
    pub link: String,
    pub if_value: String,
}

impl JournalInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_journal(journal: &Journal) -> Self {
        Self {
            name: journal.name.clone(),
            publisher: journal.publisher.clone(),
            category: journal.category.clone(),
            link: journal.link.clone(),
            if_value: journal.if_value.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        check_url("link", &self.link)?;
        check_decimal(&self.if_value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Journal, JournalInput};
    use crate::model::record::ValidationError;

    #[test]
    fn from_input_trims_every_field() {
        let journal = Journal::from_input(&JournalInput {
            name: " Applied Energy ".to_string(),
            publisher: " Elsevier".to_string(),
            category: "".to_string(),
            link: "https://example.org/ae ".to_string(),
            if_value: " 11.2 ".to_string(),
        });
        assert_eq!(journal.name, "Applied Energy");
        assert_eq!(journal.publisher, "Elsevier");
        assert_eq!(journal.category, "");
        assert_eq!(journal.link, "https://example.org/ae");
        assert_eq!(journal.if_value, "11.2");
    }

    #[test]
    fn validate_checks_name_link_and_impact_factor() {
        assert_eq!(
            JournalInput::named("").validate(),
            Err(ValidationError::MissingField("name"))
        );
        let bad_if = JournalInput {
            if_value: "high".to_string(),
            ..JournalInput::named("J")
        };
        assert!(matches!(
            bad_if.validate(),
            Err(ValidationError::InvalidImpactFactor(_))
        ));
        assert!(JournalInput::named("J").validate().is_ok());
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let journal: Journal =
            serde_json::from_str(r#"{"id":"1","name":"Nature","createdAt":"x"}"#).unwrap();
        assert_eq!(journal.publisher, "");
        assert_eq!(journal.if_value, "");
        let encoded = serde_json::to_value(&journal).unwrap();
        assert!(encoded.get("ifValue").is_some());
    }

    #[test]
    fn null_fields_read_as_empty() {
        let journal: Journal = serde_json::from_str(
            r#"{"id":"1","name":"Nature","publisher":null,"category":null,"link":null,"ifValue":null,"createdAt":null}"#,
        )
        .unwrap();
        assert_eq!(journal.publisher, "");
        assert_eq!(journal.category, "");
        assert_eq!(journal.link, "");
        assert_eq!(journal.if_value, "");
        assert_eq!(journal.created_at, "");
    }
}
