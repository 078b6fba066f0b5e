use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use log::debug;
use std::io::{self, IsTerminal};

use crate::cli::output::{
    format_cleanup_summary, format_task_detail, format_task_list, is_tty, Style, PRIORITY_FLAG,
};
use crate::cli::repl;
use crate::config::Config;
use crate::error::{join_text, require_text, TodoError};
use crate::filter::{parse_cleanup_filter, parse_filter, QUERIES};
use crate::models::{TaskMap, TaskState};
use crate::repo::TaskRepo;
use crate::store::TaskStore;
use crate::utils::DateResolver;

#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(about = "Todo list manager inspired by todo.txt, stored as JSON Lines")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(after_help = help_footer())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Add a new task (a due:<date> tag sets the due date)
    Add {
        /// Task title
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Mark task as started, or list started tasks
    Start {
        position: Option<usize>,
        /// Optional note
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        note: Vec<String>,
    },
    /// Mark task as completed, or list completed tasks
    Done {
        position: Option<usize>,
        /// Optional note
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        note: Vec<String>,
    },
    /// Mark task as blocked, or list blocked tasks
    Block {
        position: Option<usize>,
        /// Optional note
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        note: Vec<String>,
    },
    /// Mark task as waiting, or list waiting tasks
    Wait {
        position: Option<usize>,
        /// Optional note
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        note: Vec<String>,
    },
    /// Reset task to new, or list new tasks
    Reset {
        position: Option<usize>,
        /// Optional note
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        note: Vec<String>,
    },
    /// Toggle high priority flag
    Prio {
        position: usize,
        /// Optional note
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        note: Vec<String>,
    },
    /// Set due date, or clear it when no date is given
    Due {
        position: usize,
        /// YYYY-MM-DD, today, tomorrow or a weekday name
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        date: Vec<String>,
    },
    /// Append text to task title
    Append {
        position: usize,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Rename task
    Rename {
        position: usize,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Delete task
    #[command(visible_alias = "delete")]
    Del { position: usize },
    /// Add note to task
    Note {
        position: usize,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Delete one note (1-based index) or all notes from task
    Delnote {
        position: usize,
        index: Option<usize>,
    },
    /// List tasks (only active tasks by default)
    List {
        /// Regular expressions or named queries, all must match
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        patterns: Vec<String>,
    },
    /// Show all task details
    Show { position: usize },
    /// Delete completed tasks matching the patterns
    Cleanup {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        patterns: Vec<String>,
    },
    /// Enter read-eval-print loop mode
    Repl,
}

/// Named queries and the glyph legend, appended to the help screen
fn help_footer() -> String {
    let queries: Vec<String> = QUERIES
        .iter()
        .map(|q| format!("  {:<12} {}", q.name, q.description))
        .collect();
    format!(
        "With list the following named queries can also be used:\n{}\n\n\
         Legend:\n  new [ ], started [>], blocked [!], waiting [-], done [x], priority {}",
        queries.join("\n"),
        PRIORITY_FLAG
    )
}

/// What a parsed argument list asks for
#[derive(Debug, PartialEq)]
pub enum Invocation {
    Run(Commands),
    /// Help or version text, printed as is
    Output(String),
}

fn is_known_command(token: &str) -> bool {
    token == "help"
        || Cli::command()
            .get_subcommands()
            .any(|sub| sub.get_name() == token || sub.get_all_aliases().any(|alias| alias == token))
}

/// Route bare invocations and unknown first tokens to `list`
pub fn normalize_args(args: Vec<String>) -> Vec<String> {
    match args.first().map(String::as_str) {
        None => vec!["list".to_string()],
        Some("--help" | "-h" | "--version" | "-V") => args,
        Some(first) if is_known_command(first) => args,
        Some(_) => std::iter::once("list".to_string()).chain(args).collect(),
    }
}

fn usage_error(err: &clap::Error) -> TodoError {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    TodoError::BadArguments(first.trim_start_matches("error: ").to_string())
}

/// Parse command-line words (without the program name)
pub fn parse_args(args: &[String]) -> Result<Invocation, TodoError> {
    let argv = std::iter::once("todo".to_string()).chain(normalize_args(args.to_vec()));
    match Cli::try_parse_from(argv) {
        Ok(cli) => Ok(Invocation::Run(cli.command)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Ok(Invocation::Output(err.render().to_string().trim_end().to_string()))
            }
            _ => Err(usage_error(&err)),
        },
    }
}

/// Everything a command needs besides its arguments
pub struct AppContext {
    pub store: TaskStore,
    pub style: Style,
    /// Pinned reference date, the local date when unset
    pub today: Option<NaiveDate>,
}

impl AppContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            store: TaskStore::new(config.data_path.clone()),
            style: Style::new(config.color.enabled(is_tty())),
            today: config.today,
        }
    }

    /// Reference date for one command
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

fn default_listing(ctx: &AppContext, tasks: &TaskMap, today: NaiveDate) -> Result<String> {
    let filter = parse_filter::<&str>(&[])?;
    Ok(format_task_list(tasks, &filter, today, ctx.style))
}

fn query_listing(ctx: &AppContext, query: &str, today: NaiveDate) -> Result<String> {
    let filter = parse_filter(&[query])?;
    let tasks = ctx.store.load()?;
    Ok(format_task_list(&tasks, &filter, today, ctx.style))
}

fn detail(ctx: &AppContext, tasks: &TaskMap, position: usize) -> Result<String> {
    let task = tasks.get(&position).ok_or(TodoError::NotFound(position))?;
    Ok(format_task_detail(task, ctx.style))
}

fn change_state(
    ctx: &AppContext,
    today: NaiveDate,
    position: Option<usize>,
    note: &[String],
    state: TaskState,
    query: &str,
) -> Result<String> {
    match position {
        Some(position) => {
            let note = join_text(note);
            let tasks = TaskRepo::change_state(&ctx.store, today, position, state, note.as_deref())?;
            default_listing(ctx, &tasks, today)
        }
        None => query_listing(ctx, query, today),
    }
}

/// Execute one command and return the text to print
pub fn execute(ctx: &AppContext, command: Commands) -> Result<String> {
    let today = ctx.today();
    let resolver = DateResolver::new(today);
    debug!("executing {:?} (today {})", command, today);

    match command {
        Commands::Add { text } => {
            let text = require_text(&text, "add <text>")?;
            let tasks = TaskRepo::add(&ctx.store, &resolver, &text)?;
            default_listing(ctx, &tasks, today)
        }
        Commands::Start { position, note } => {
            change_state(ctx, today, position, &note, TaskState::Started, ":started")
        }
        Commands::Done { position, note } => {
            change_state(ctx, today, position, &note, TaskState::Done, ":done")
        }
        Commands::Block { position, note } => {
            change_state(ctx, today, position, &note, TaskState::Blocked, ":blocked")
        }
        Commands::Wait { position, note } => {
            change_state(ctx, today, position, &note, TaskState::Waiting, ":waiting")
        }
        Commands::Reset { position, note } => {
            change_state(ctx, today, position, &note, TaskState::New, ":new")
        }
        Commands::Prio { position, note } => {
            let note = join_text(&note);
            let tasks = TaskRepo::toggle_priority(&ctx.store, today, position, note.as_deref())?;
            default_listing(ctx, &tasks, today)
        }
        Commands::Due { position, date } => {
            let tasks = TaskRepo::set_due(&ctx.store, &resolver, position, date.join(" ").trim())?;
            default_listing(ctx, &tasks, today)
        }
        Commands::Append { position, text } => {
            let text = require_text(&text, "append <position> <text>")?;
            let tasks = TaskRepo::append(&ctx.store, &resolver, position, &text)?;
            default_listing(ctx, &tasks, today)
        }
        Commands::Rename { position, text } => {
            let text = require_text(&text, "rename <position> <text>")?;
            let tasks = TaskRepo::rename(&ctx.store, &resolver, position, &text)?;
            default_listing(ctx, &tasks, today)
        }
        Commands::Del { position } => {
            let tasks = TaskRepo::delete(&ctx.store, position)?;
            default_listing(ctx, &tasks, today)
        }
        Commands::Note { position, text } => {
            let text = require_text(&text, "note <position> <text>")?;
            let tasks = TaskRepo::add_note(&ctx.store, today, position, &text)?;
            detail(ctx, &tasks, position)
        }
        Commands::Delnote { position, index } => {
            let tasks = TaskRepo::delete_note(&ctx.store, today, position, index)?;
            detail(ctx, &tasks, position)
        }
        Commands::List { patterns } => {
            let filter = parse_filter(&patterns)?;
            let tasks = ctx.store.load()?;
            Ok(format_task_list(&tasks, &filter, today, ctx.style))
        }
        Commands::Show { position } => {
            let tasks = ctx.store.load_checked(position)?;
            detail(ctx, &tasks, position)
        }
        Commands::Cleanup { patterns } => {
            if patterns.is_empty() {
                return Err(TodoError::BadArguments("usage: todo cleanup <pattern...>".to_string()).into());
            }
            let filter = parse_cleanup_filter(&patterns)?;
            let count = TaskRepo::cleanup(&ctx.store, &filter, today)?;
            Ok(format_cleanup_summary(count))
        }
        Commands::Repl => Err(TodoError::BadArguments("repl: already running".to_string()).into()),
    }
}

/// Parse and execute command-line words, as typed in the REPL
pub fn execute_args(ctx: &AppContext, args: &[String]) -> Result<String> {
    match parse_args(args)? {
        Invocation::Output(text) => Ok(text),
        Invocation::Run(command) => execute(ctx, command),
    }
}

/// Style for error reports on stderr
pub fn error_style() -> Style {
    let enabled = Config::load()
        .map(|config| config.color.enabled(io::stderr().is_terminal()))
        .unwrap_or(false);
    Style::new(enabled)
}

pub fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args)? {
        Invocation::Output(text) => {
            println!("{}", text);
            return Ok(());
        }
        Invocation::Run(command) => command,
    };

    let config = Config::load()?;
    let ctx = AppContext::from_config(&config);
    match command {
        Commands::Repl => {
            let stdin = io::stdin();
            repl::start(&ctx, stdin.lock(), io::stdout(), io::stderr())
        }
        command => {
            println!("{}", execute(&ctx, command)?);
            Ok(())
        }
    }
}
