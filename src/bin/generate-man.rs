// Render the todo(1) man page from the clap definition

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_mangen::Man;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use todo_jsonl::cli::Cli;

fn main() -> Result<()> {
    let cmd = Cli::command();
    let man = Man::new(cmd);
    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer).context("Failed to render man page")?;

    match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            let mut file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            file.write_all(&buffer)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => io::stdout().write_all(&buffer)?,
    }
    Ok(())
}
