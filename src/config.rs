use std::env;
use std::fmt;
use std::io;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use crate::cli::{Cli, SelectionMode};
use crate::error::{Error, Result};

pub const DEFAULT_API_BASE: &str = "https://prod-api-funimationnow.dadcdigital.com/api";
pub const USERNAME_VAR: &str = "FUNUSERNAME";
pub const PASSWORD_VAR: &str = "FUNPASSWORD";
pub const DEFAULT_ENV_FILE: &str = ".env";

pub const PAGE_SIZE: usize = 25;
// Guard against a server that never returns an empty history page.
pub const MAX_HISTORY_PAGES: usize = 10_000;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const IO_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let username = lookup(USERNAME_VAR).unwrap_or_default();
        let password = lookup(PASSWORD_VAR).unwrap_or_default();
        if username.is_empty() || password.is_empty() {
            return Err(Error::Config(format!(
                "{USERNAME_VAR} and {PASSWORD_VAR} must be set (a .env file is preferable)"
            )));
        }
        Ok(Self { username, password })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub mode: SelectionMode,
    pub credentials: Credentials,
    pub dry_run: bool,
    pub page_size: usize,
    pub max_pages: usize,
    pub connect_timeout: Duration,
    pub io_timeout: Duration,
}

impl Config {
    pub fn load(cli: &Cli) -> Result<Self> {
        let mode = cli.selection_mode()?;
        validate_api_base(&cli.api_base)?;
        load_dotenv(cli.env_file.as_deref())?;
        let credentials = Credentials::from_env()?;
        Ok(Self::new(&cli.api_base, mode, credentials, cli.dry_run))
    }

    pub fn new(
        api_base: &str,
        mode: SelectionMode,
        credentials: Credentials,
        dry_run: bool,
    ) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            mode,
            credentials,
            dry_run,
            page_size: PAGE_SIZE,
            max_pages: MAX_HISTORY_PAGES,
            connect_timeout: CONNECT_TIMEOUT,
            io_timeout: IO_TIMEOUT,
        }
    }
}

fn load_dotenv(explicit: Option<&Path>) -> Result<()> {
    match explicit {
        Some(path) => {
            dotenvy::from_path(path).map_err(|err| {
                Error::Config(format!(
                    "failed to load env file {}: {err}",
                    path.display()
                ))
            })?;
            debug!(path = %path.display(), "loaded env file");
        }
        None => {
            load_local_dotenv(Path::new(DEFAULT_ENV_FILE));
        }
    }
    Ok(())
}

// Only the working directory is consulted, parent directories are not searched.
fn load_local_dotenv(path: &Path) -> bool {
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "loaded env file");
            true
        }
        Err(dotenvy::Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            info!("No .env file found");
            false
        }
        Err(err) => {
            warn!(path = %path.display(), "ignoring unreadable env file: {err}");
            false
        }
    }
}

fn validate_api_base(raw: &str) -> Result<()> {
    let url = Url::parse(raw)
        .map_err(|err| Error::Config(format!("invalid API base URL {raw}: {err}")))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!("invalid API base URL {raw}")));
    }
    Ok(())
}
