// Output formatting utilities

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt::Display;
use std::io::IsTerminal;

use crate::filter::{filter_tasks, Filter};
use crate::models::{Task, TaskMap, TaskState};
use crate::utils::{days_until, DATE_FORMAT};

// ANSI escape codes for terminal formatting
const ANSI_RESET: &str = "\x1b[0m";

// ANSI foreground colors (standard 8-color palette)
const ANSI_FG_RED: &str = "\x1b[31m";
const ANSI_FG_GREEN: &str = "\x1b[32m";
const ANSI_FG_YELLOW: &str = "\x1b[33m";
const ANSI_FG_BLUE: &str = "\x1b[34m";
const ANSI_FG_MAGENTA: &str = "\x1b[35m";
const ANSI_FG_CYAN: &str = "\x1b[36m";
const ANSI_FG_WHITE: &str = "\x1b[37m";

pub const PRIORITY_FLAG: &str = "*";
pub const EMPTY_LIST_MESSAGE: &str = "No todos found";
const MIN_POSITION_WIDTH: usize = 4;
const DETAIL_KEY_WIDTH: usize = 10;

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Color switch for rendered text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, ANSI_RESET)
        } else {
            text.to_string()
        }
    }
}

/// Glyph and color per state
fn state_glyph(state: Option<&TaskState>) -> (&'static str, &'static str) {
    match state {
        Some(TaskState::New) => ("[ ]", ANSI_FG_WHITE),
        Some(TaskState::Started) => ("[>]", ANSI_FG_GREEN),
        Some(TaskState::Blocked) => ("[!]", ANSI_FG_YELLOW),
        Some(TaskState::Waiting) => ("[-]", ANSI_FG_CYAN),
        Some(TaskState::Done) => ("[x]", ANSI_FG_BLUE),
        Some(TaskState::Other(_)) | None => ("[?]", ANSI_FG_MAGENTA),
    }
}

/// Display order of states; unknown states go last
pub fn state_sort_order(state: Option<&TaskState>) -> u8 {
    match state {
        Some(TaskState::Blocked) => 1,
        Some(TaskState::Started) => 2,
        Some(TaskState::New) => 3,
        Some(TaskState::Waiting) => 4,
        Some(TaskState::Done) => 5,
        Some(TaskState::Other(_)) | None => 100,
    }
}

/// Priority is shown (and sorted first) only for tasks that are not done
fn shows_priority(task: &Task) -> bool {
    task.priority && !task.is_done()
}

/// Dates ascending, missing dates after every present one
fn compare_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Listing order: priority bucket, state, due date (or modified date for
/// done tasks), then position
pub fn compare_tasks(a: (usize, &Task), b: (usize, &Task)) -> Ordering {
    let (pos_a, task_a) = a;
    let (pos_b, task_b) = b;

    let bucket = |t: &Task| if shows_priority(t) { 0 } else { 1 };
    let secondary = |t: &Task| if t.is_done() { t.modified } else { t.due };

    bucket(task_a)
        .cmp(&bucket(task_b))
        .then_with(|| state_sort_order(task_a.state.as_ref()).cmp(&state_sort_order(task_b.state.as_ref())))
        .then_with(|| compare_dates(secondary(task_a), secondary(task_b)))
        .then_with(|| pos_a.cmp(&pos_b))
}

pub fn sort_tasks(items: &mut [(usize, &Task)]) {
    items.sort_by(|a, b| compare_tasks(*a, *b));
}

/// Width of the position column for a store
pub fn position_width(tasks: &TaskMap) -> usize {
    tasks
        .keys()
        .next_back()
        .map(|last| last.to_string().len())
        .unwrap_or(0)
        .max(MIN_POSITION_WIDTH)
}

/// Relative due date annotation, without the leading space
pub fn format_due(due: NaiveDate, today: NaiveDate, style: Style) -> String {
    let diff = days_until(due, today);
    match diff {
        d if d < 0 => style.paint(&format!("({}d overdue)", d.abs()), ANSI_FG_RED),
        0 => style.paint("(today)", ANSI_FG_YELLOW),
        1 => style.paint("(tomorrow)", ANSI_FG_YELLOW),
        2..=6 => style.paint(
            &format!("({})", due.format("%A").to_string().to_lowercase()),
            ANSI_FG_MAGENTA,
        ),
        _ => style.paint(&format!("({})", due.format(DATE_FORMAT)), ANSI_FG_MAGENTA),
    }
}

/// Highlight `@context` and `+project` tags in a title
pub fn format_title(title: &str, style: Style) -> String {
    if !style.is_colored() {
        return title.to_string();
    }
    crate::utils::tags::highlight_tags(title, |tag| style.paint(tag, ANSI_FG_CYAN))
}

/// One listing line: `   1:*[ ] title (today)`
pub fn format_task_line(position: usize, task: &Task, width: usize, today: NaiveDate, style: Style) -> String {
    let flag = if shows_priority(task) {
        style.paint(PRIORITY_FLAG, ANSI_FG_RED)
    } else {
        " ".to_string()
    };
    let (glyph, color) = state_glyph(task.state.as_ref());
    let due = match task.due {
        Some(due) if !task.is_done() => format!(" {}", format_due(due, today, style)),
        _ => String::new(),
    };
    format!(
        "{:>width$}:{}{} {}{}",
        position,
        flag,
        style.paint(glyph, color),
        format_title(&task.title, style),
        due,
        width = width
    )
}

/// Filter, sort and render the task listing
pub fn format_task_list(tasks: &TaskMap, filter: &Filter, today: NaiveDate, style: Style) -> String {
    let mut matched = filter_tasks(tasks, filter, today);
    if matched.is_empty() {
        return EMPTY_LIST_MESSAGE.to_string();
    }
    sort_tasks(&mut matched);
    let width = position_width(tasks);
    matched
        .into_iter()
        .map(|(position, task)| format_task_line(position, task, width, today, style))
        .collect::<Vec<_>>()
        .join("\n")
}

/// All stored fields of one task, one per line
pub fn format_task_detail(task: &Task, style: Style) -> String {
    let mut fields: Vec<(&str, String)> = Vec::new();
    if let Some(state) = &task.state {
        fields.push(("state", state.to_string()));
    }
    fields.push(("title", task.title.clone()));
    if let Some(modified) = task.modified {
        fields.push(("modified", modified.format(DATE_FORMAT).to_string()));
    }
    if task.priority {
        fields.push(("priority", "true".to_string()));
    }
    if let Some(due) = task.due {
        fields.push(("due", due.format(DATE_FORMAT).to_string()));
    }
    if !task.note.is_empty() {
        fields.push(("note", format!("\n{}", task.note.join("\n"))));
    }

    fields
        .into_iter()
        .map(|(key, value)| {
            let label = format!("{:>width$}:", key, width = DETAIL_KEY_WIDTH);
            format!("{} {}", style.paint(&label, ANSI_FG_CYAN), value)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_cleanup_summary(count: usize) -> String {
    format!("Deleted {} todo(s)", count)
}

/// Single-line error report
pub fn format_error(error: &dyn Display, style: Style) -> String {
    format!("{} {}", style.paint("ERROR:", ANSI_FG_RED), error)
}
