// Runtime configuration: store location, color mode and reference date

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::utils::DATE_FORMAT;

pub const DEFAULT_FILE_NAME: &str = "todo.jsonl";
pub const RC_FILE_NAME: &str = ".todorc";

/// When to emit ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" | "on" => Some(ColorMode::Always),
            "never" | "off" => Some(ColorMode::Never),
            _ => None,
        }
    }

    pub fn enabled(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub color: ColorMode,
    /// Pinned reference date; the local date is used when unset
    pub today: Option<NaiveDate>,
}

/// Settings read from the rc file
#[derive(Debug, Default, PartialEq)]
struct RcSettings {
    data_location: Option<String>,
    color: Option<String>,
}

impl Config {
    /// Resolve configuration from the process environment and `~/.todorc`
    pub fn load() -> Result<Self> {
        let home = dirs::home_dir();
        let rc = match &home {
            Some(home) => {
                let rc_path = home.join(RC_FILE_NAME);
                if rc_path.exists() {
                    debug!("reading configuration from {}", rc_path.display());
                    Some(std::fs::read_to_string(&rc_path).with_context(|| {
                        format!("Failed to read configuration file: {}", rc_path.display())
                    })?)
                } else {
                    None
                }
            }
            None => None,
        };
        Self::resolve(home.as_deref(), rc.as_deref(), |key| std::env::var(key).ok())
    }

    /// Resolve configuration from explicit sources.
    ///
    /// Environment variables win over the rc file, which wins over defaults.
    pub fn resolve<E>(home: Option<&Path>, rc: Option<&str>, env: E) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let settings = rc.map(parse_rc).unwrap_or_default();

        let data_path = match env("TODO_FILE").filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => {
                let home = home.context("Failed to determine home directory; set TODO_FILE explicitly")?;
                match settings.data_location {
                    Some(location) => {
                        let path = PathBuf::from(location);
                        if path.is_relative() {
                            home.join(path)
                        } else {
                            path
                        }
                    }
                    None => home.join(DEFAULT_FILE_NAME),
                }
            }
        };

        let color = if let Some(value) = env("TODO_COLOR") {
            match ColorMode::parse(&value) {
                Some(mode) => mode,
                None => bail!("Invalid TODO_COLOR value '{}' (expected auto, always or never)", value),
            }
        } else if env("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            ColorMode::Never
        } else if let Some(value) = settings.color {
            match ColorMode::parse(&value) {
                Some(mode) => mode,
                None => bail!("Invalid color value '{}' in {} (expected auto, always or never)", value, RC_FILE_NAME),
            }
        } else {
            ColorMode::Auto
        };

        let today = match env("TODO_TODAY") {
            Some(value) => Some(
                NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
                    .with_context(|| format!("Invalid TODO_TODAY value '{}'", value))?,
            ),
            None => None,
        };

        debug!("task file: {}, color: {:?}", data_path.display(), color);
        Ok(Self { data_path, color, today })
    }
}

fn parse_rc(content: &str) -> RcSettings {
    let mut settings = RcSettings::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) => match key.trim() {
                "data.location" => settings.data_location = Some(value.trim().to_string()),
                "color" => settings.color = Some(value.trim().to_string()),
                other => warn!("ignoring unknown setting '{}' in {}", other, RC_FILE_NAME),
            },
            None => warn!("ignoring malformed line '{}' in {}", line, RC_FILE_NAME),
        }
    }
    settings
}
