//! Command-line front end for the research tracker.
//!
//! # Responsibility
//! - Act as the form boundary: collect raw field strings into core inputs.
//! - Print plain-text views of the active user's collections.

mod render;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::warn;
use research_core::db::open_db;
use research_core::{
    init_logging, ConferenceInput, JournalInput, KeyValueStore, PaperInput, PaperStatus, Session,
    SqliteKeyValueStore, StatusFilter, TrackerConfig,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "research")]
#[command(about = "Track papers, journals and conferences", version)]
struct Cli {
    /// SQLite file holding tracker data
    #[arg(long, env = "RESEARCH_TRACKER_DB_PATH")]
    db: Option<PathBuf>,

    /// Absolute directory for log files
    #[arg(long, env = "RESEARCH_TRACKER_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "RESEARCH_TRACKER_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a liveness probe
    Ping,
    /// Log in (or switch) to a user and remember it for next time
    Login { name: String },
    /// Show the active user
    Whoami,
    /// Counts, urgent deadlines and recent papers
    Dashboard,
    #[command(subcommand)]
    Paper(PaperCommand),
    #[command(subcommand)]
    Journal(JournalCommand),
    #[command(subcommand)]
    Conference(ConferenceCommand),
}

#[derive(Subcommand)]
enum PaperCommand {
    Add(PaperFields),
    Edit {
        id: String,
        #[command(flatten)]
        fields: PaperFields,
    },
    List {
        /// all|idea|planning|writing|submitted
        #[arg(long, default_value = "all")]
        status: String,
    },
    Show { id: String },
}

#[derive(Subcommand)]
enum JournalCommand {
    Add(JournalFields),
    Edit {
        id: String,
        #[command(flatten)]
        fields: JournalFields,
    },
    List,
}

#[derive(Subcommand)]
enum ConferenceCommand {
    Add(ConferenceFields),
    Edit {
        id: String,
        #[command(flatten)]
        fields: ConferenceFields,
    },
    List,
}

/// Unset flags keep the current value on `edit` and stay empty on `add`.
#[derive(Args)]
struct PaperFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// YYYY-MM-DD, empty to clear
    #[arg(long)]
    deadline: Option<String>,
    #[arg(long)]
    status: Option<String>,
    /// Journal id; repeat for several. Replaces the current selection.
    #[arg(long = "journal")]
    journal_ids: Vec<String>,
    /// Drop every linked journal
    #[arg(long, conflicts_with = "journal_ids")]
    clear_journals: bool,
    #[arg(long)]
    conference_link: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl PaperFields {
    fn merge_into(self, mut input: PaperInput) -> PaperInput {
        overwrite(&mut input.title, self.title);
        overwrite(&mut input.description, self.description);
        overwrite(&mut input.deadline, self.deadline);
        overwrite(&mut input.status, self.status);
        if self.clear_journals {
            input.journal_ids.clear();
        } else if !self.journal_ids.is_empty() {
            input.journal_ids = self.journal_ids;
        }
        overwrite(&mut input.conference_link, self.conference_link);
        overwrite(&mut input.notes, self.notes);
        input
    }
}

#[derive(Args)]
struct JournalFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    publisher: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    link: Option<String>,
    /// Impact factor, e.g. 5.123
    #[arg(long = "if")]
    if_value: Option<String>,
}

impl JournalFields {
    fn merge_into(self, mut input: JournalInput) -> JournalInput {
        overwrite(&mut input.name, self.name);
        overwrite(&mut input.publisher, self.publisher);
        overwrite(&mut input.category, self.category);
        overwrite(&mut input.link, self.link);
        overwrite(&mut input.if_value, self.if_value);
        input
    }
}

#[derive(Args)]
struct ConferenceFields {
    #[arg(long)]
    name: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    link: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl ConferenceFields {
    fn merge_into(self, mut input: ConferenceInput) -> ConferenceInput {
        overwrite(&mut input.name, self.name);
        overwrite(&mut input.date, self.date);
        overwrite(&mut input.link, self.link);
        overwrite(&mut input.description, self.description);
        input
    }
}

fn overwrite(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = TrackerConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(log_dir) = cli.log_dir {
        config.log_dir = log_dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    if let Command::Ping = cli.command {
        println!("research_core ping={}", research_core::ping());
        println!("research_core version={}", research_core::core_version());
        return Ok(());
    }

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let mut session = Session::resume(SqliteKeyValueStore::new(&conn));

    run(&mut session, cli.command)
}

fn run<S: KeyValueStore>(session: &mut Session<S>, command: Command) -> Result<()> {
    match command {
        Command::Ping => Ok(()),
        Command::Login { name } => {
            session.login(&name)?;
            println!(
                "Logged in as {} ({} papers, {} journals, {} conferences)",
                session.user_name().unwrap_or_default(),
                session.papers().len(),
                session.journals().len(),
                session.conferences().len()
            );
            Ok(())
        }
        Command::Whoami => {
            match session.user_name() {
                Some(name) => println!("{name}"),
                None => println!("Not logged in."),
            }
            Ok(())
        }
        Command::Dashboard => {
            require_user(session)?;
            print!("{}", render::dashboard(session));
            Ok(())
        }
        Command::Paper(command) => run_paper(session, command),
        Command::Journal(command) => run_journal(session, command),
        Command::Conference(command) => run_conference(session, command),
    }
}

fn run_paper<S: KeyValueStore>(session: &mut Session<S>, command: PaperCommand) -> Result<()> {
    require_user(session)?;
    match command {
        PaperCommand::Add(fields) => {
            let paper = session.add_paper(&fields.merge_into(PaperInput::default()))?;
            println!("Paper created: {}", paper.id);
        }
        PaperCommand::Edit { id, fields } => {
            let current = session
                .find_paper(&id)
                .ok_or_else(|| anyhow!("paper not found: {id}"))?;
            let input = fields.merge_into(PaperInput::from_paper(current));
            if session.update_paper(&id, &input)?.is_none() {
                bail!("paper not found: {id}");
            }
            println!("Paper updated: {id}");
        }
        PaperCommand::List { status } => {
            let filter = StatusFilter::parse(&status).ok_or_else(|| {
                anyhow!(
                    "unknown status filter `{status}`; expected {}",
                    status_filter_choices()
                )
            })?;
            print!("{}", render::paper_list(session, filter));
        }
        PaperCommand::Show { id } => {
            let paper = session
                .find_paper(&id)
                .ok_or_else(|| anyhow!("paper not found: {id}"))?;
            print!("{}", render::paper_detail(paper, session.journals()));
        }
    }
    Ok(())
}

fn run_journal<S: KeyValueStore>(
    session: &mut Session<S>,
    command: JournalCommand,
) -> Result<()> {
    require_user(session)?;
    match command {
        JournalCommand::Add(fields) => {
            let journal = session.add_journal(&fields.merge_into(JournalInput::default()))?;
            println!("Journal created: {}", journal.id);
        }
        JournalCommand::Edit { id, fields } => {
            let current = session
                .find_journal(&id)
                .ok_or_else(|| anyhow!("journal not found: {id}"))?;
            let input = fields.merge_into(JournalInput::from_journal(current));
            if session.update_journal(&id, &input)?.is_none() {
                bail!("journal not found: {id}");
            }
            println!("Journal updated: {id}");
        }
        JournalCommand::List => print!("{}", render::journal_list(session.journals())),
    }
    Ok(())
}

fn run_conference<S: KeyValueStore>(
    session: &mut Session<S>,
    command: ConferenceCommand,
) -> Result<()> {
    require_user(session)?;
    match command {
        ConferenceCommand::Add(fields) => {
            let conference =
                session.add_conference(&fields.merge_into(ConferenceInput::default()))?;
            println!("Conference created: {}", conference.id);
        }
        ConferenceCommand::Edit { id, fields } => {
            let current = session
                .find_conference(&id)
                .ok_or_else(|| anyhow!("conference not found: {id}"))?;
            let input = fields.merge_into(ConferenceInput::from_conference(current));
            if session.update_conference(&id, &input)?.is_none() {
                bail!("conference not found: {id}");
            }
            println!("Conference updated: {id}");
        }
        ConferenceCommand::List => print!("{}", render::conference_list(session.conferences())),
    }
    Ok(())
}

/// `all` followed by every paper status, e.g. `all|idea|...`.
fn status_filter_choices() -> String {
    std::iter::once("all")
        .chain(PaperStatus::ALL.iter().map(|status| status.as_str()))
        .collect::<Vec<_>>()
        .join("|")
}

fn require_user<S: KeyValueStore>(session: &Session<S>) -> Result<()> {
    if session.user_name().is_none() {
        warn!("event=cli_command module=cli status=rejected reason=no_active_user");
        bail!("not logged in; run `research login <name>` first");
    }
    Ok(())
}
