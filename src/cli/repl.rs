// Interactive read-eval-print loop

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::cli::commands::{execute_args, AppContext};
use crate::cli::output::format_error;

pub const PROMPT: &str = "todo> ";
const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

/// Run commands read from `input` until `exit`, `quit` or end of input.
///
/// Each line is split on whitespace and handled like command-line
/// arguments. Errors are written to `errors` and the loop carries on.
pub fn start<R, W, E>(ctx: &AppContext, input: R, mut output: W, mut errors: E) -> Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut lines = input.lines();
    let mut words: Vec<String> = Vec::new();
    loop {
        match execute_args(ctx, &words) {
            Ok(text) => writeln!(output, "{}", text)?,
            Err(e) => writeln!(errors, "{}", format_error(&e, ctx.style))?,
        }

        loop {
            write!(output, "\n{}", PROMPT)?;
            output.flush()?;

            let line = match lines.next() {
                Some(line) => line.context("Failed to read command")?,
                None => {
                    writeln!(output)?;
                    return Ok(());
                }
            };
            words = line.split_whitespace().map(String::from).collect();
            match words.first().map(String::as_str) {
                None => continue,
                Some("exit" | "quit") => return Ok(()),
                Some("clear" | "cls") => write!(output, "{}", CLEAR_SCREEN)?,
                Some(_) => break,
            }
        }
    }
}
