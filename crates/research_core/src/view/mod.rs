//! Read-only projections over session collections.
//!
//! # Responsibility
//! - Compute the filtered, sorted and derived values a front end displays.
//! - Never mutate records or touch storage.

pub mod dashboard;

use crate::model::journal::Journal;
use crate::model::paper::{Paper, PaperStatus};

/// Paper list filter tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PaperStatus),
}

impl StatusFilter {
    /// Parses `all` or a status name. Unknown values give `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value == "all" {
            return Some(Self::All);
        }
        PaperStatus::parse(value).map(Self::Only)
    }

    pub fn matches(self, paper: &Paper) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => paper.status == status,
        }
    }
}

/// Papers passing `filter`, in insertion order.
pub fn filter_papers(papers: &[Paper], filter: StatusFilter) -> Vec<&Paper> {
    papers.iter().filter(|paper| filter.matches(paper)).collect()
}

/// Name of the journal with `id`, or `""` for dangling references.
pub fn journal_name<'a>(journals: &'a [Journal], id: &str) -> &'a str {
    journals
        .iter()
        .find(|journal| journal.id == id)
        .map_or("", |journal| journal.name.as_str())
}

/// Comma-joined journal names of `paper`, in selection order.
pub fn journal_names(journals: &[Journal], paper: &Paper) -> String {
    paper
        .journal_ids
        .iter()
        .map(|id| journal_name(journals, id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Upper-cases the first character.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
