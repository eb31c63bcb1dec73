use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_API_BASE;
use crate::error::{Error, Result};

#[derive(Debug, Parser)]
#[command(
    name = "clearhistory",
    version,
    about = "Delete watch history from Funimation"
)]
pub struct Cli {
    /// Delete every history item whose show title contains this text
    #[arg(short, long)]
    pub show: Option<String>,

    /// Delete this many of the most recent history items
    #[arg(short, long, allow_negative_numbers = true)]
    pub number: Option<i64>,

    /// Delete all history
    #[arg(short, long)]
    pub all: bool,

    /// List what would be deleted without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Load credentials from this dotenv file instead of ./.env
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    #[arg(long, env = "FUNAPIBASE", default_value = DEFAULT_API_BASE, hide = true)]
    pub api_base: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    ByTitle(String),
    ByCount(usize),
    All,
}

impl Cli {
    pub fn selection_mode(&self) -> Result<SelectionMode> {
        let show = self.show.as_deref().filter(|show| !show.is_empty());
        let selected = usize::from(show.is_some())
            + usize::from(self.number.is_some())
            + usize::from(self.all);

        if selected == 0 {
            return Err(Error::Config(
                "must specify one of --show, --number or --all".to_string(),
            ));
        }
        if selected > 1 {
            return Err(Error::Config(
                "only one of --show, --number or --all may be used".to_string(),
            ));
        }

        if let Some(show) = show {
            return Ok(SelectionMode::ByTitle(show.to_string()));
        }
        if let Some(number) = self.number {
            return match usize::try_from(number) {
                Ok(count) if count >= 1 => Ok(SelectionMode::ByCount(count)),
                _ => Err(Error::Config(
                    "--number must be greater than or equal to 1".to_string(),
                )),
            };
        }
        Ok(SelectionMode::All)
    }
}
