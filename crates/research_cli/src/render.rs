//! Plain-text views.

use research_core::view::{capitalize, journal_names};
use research_core::{
    dashboard as build_dashboard, filter_papers, format_date, Conference, Journal, KeyValueStore,
    Paper, Session, StatusFilter,
};
use std::fmt::Write;

pub fn dashboard<S: KeyValueStore>(session: &Session<S>) -> String {
    let view = build_dashboard(session.papers());
    let mut out = String::new();
    let _ = writeln!(out, "Active papers: {}", view.active_count);
    let _ = writeln!(out, "Due this week: {}", view.due_this_week);

    let _ = writeln!(out, "\nUrgent deadlines:");
    if view.urgent.is_empty() {
        let _ = writeln!(out, "  No urgent deadlines");
    }
    for item in &view.urgent {
        let _ = writeln!(
            out,
            "  {} - due in {} day{} ({}) {}%",
            item.paper.title,
            item.days_left,
            if item.days_left == 1 { "" } else { "s" },
            format_date(item.paper.deadline.as_deref().unwrap_or_default()),
            item.paper.progress()
        );
    }

    let _ = writeln!(out, "\nRecent papers:");
    if view.recent.is_empty() {
        let _ = writeln!(out, "  No papers yet.");
    }
    for paper in &view.recent {
        out.push_str(&paper_line(paper, session.journals()));
    }
    out
}

pub fn paper_list<S: KeyValueStore>(session: &Session<S>, filter: StatusFilter) -> String {
    let papers = filter_papers(session.papers(), filter);
    if papers.is_empty() {
        return "No papers found.\n".to_string();
    }
    let mut out = String::new();
    for paper in papers {
        out.push_str(&paper_line(paper, session.journals()));
    }
    let _ = writeln!(out, "All papers: {}", session.papers().len());
    out
}

pub fn paper_detail(paper: &Paper, journals: &[Journal]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", paper.title);
    let _ = writeln!(out, "  id: {}", paper.id);
    let _ = writeln!(
        out,
        "  phase: {} Phase ({}%)",
        capitalize(paper.status.as_str()),
        paper.progress()
    );
    if !paper.description.is_empty() {
        let _ = writeln!(out, "  description: {}", paper.description);
    }
    if let Some(deadline) = &paper.deadline {
        let _ = writeln!(out, "  deadline: {}", format_date(deadline));
    }
    if !paper.journal_ids.is_empty() {
        let _ = writeln!(out, "  journals: {}", journal_names(journals, paper));
    }
    if let Some(link) = &paper.conference_link {
        let _ = writeln!(out, "  conference: {link}");
    }
    if let Some(notes) = &paper.notes {
        let _ = writeln!(out, "  notes: {notes}");
    }
    let _ = writeln!(out, "  created: {}", paper.created_at);
    out
}

pub fn journal_list(journals: &[Journal]) -> String {
    if journals.is_empty() {
        return "No journals added yet.\n".to_string();
    }
    let mut out = String::new();
    for journal in journals {
        let _ = write!(out, "[{}] {}", journal.id, journal.name);
        for extra in [&journal.publisher, &journal.category] {
            if !extra.is_empty() {
                let _ = write!(out, " | {extra}");
            }
        }
        if !journal.if_value.is_empty() {
            let _ = write!(out, " | IF: {}", journal.if_value);
        }
        if !journal.link.is_empty() {
            let _ = write!(out, " | {}", journal.link);
        }
        out.push('\n');
    }
    out
}

pub fn conference_list(conferences: &[Conference]) -> String {
    if conferences.is_empty() {
        return "No conferences added yet.\n".to_string();
    }
    let mut out = String::new();
    for conference in conferences {
        let _ = write!(out, "[{}] {}", conference.id, conference.name);
        if !conference.date.is_empty() {
            let _ = write!(out, " | {}", format_date(&conference.date));
        }
        if !conference.link.is_empty() {
            let _ = write!(out, " | {}", conference.link);
        }
        out.push('\n');
    }
    out
}

fn paper_line(paper: &Paper, journals: &[Journal]) -> String {
    let mut line = format!(
        "  [{}] {} - {} Phase {}%",
        paper.id,
        paper.title,
        paper.status.label(),
        paper.progress()
    );
    if !paper.journal_ids.is_empty() {
        let _ = write!(line, " | Journal: {}", journal_names(journals, paper));
    }
    if let Some(deadline) = &paper.deadline {
        let _ = write!(line, " | Deadline: {}", format_date(deadline));
    }
    line.push('\n');
    line
}
