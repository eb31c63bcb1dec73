mod auth;
mod delete;
mod history;


use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::http::ApiClient;

use self::auth::authenticate;
use self::delete::{DeleteReport, delete_all};
use self::history::{fetch_history, select_targets};

pub(crate) fn run(config: &Config) -> Result<DeleteReport> {
    let client = ApiClient::new(config);

    let token = authenticate(&client, &config.credentials)?;
    let history = fetch_history(&client, config, &token)?;
    let targets = select_targets(&history, &config.mode);

    if targets.is_empty() {
        info!(mode = ?config.mode, "no history items matched");
        return Ok(DeleteReport::default());
    }

    if config.dry_run {
        for id in &targets {
            info!(id = %id, "would delete item");
        }
        info!(count = targets.len(), "dry run, nothing deleted");
        return Ok(DeleteReport::default());
    }

    info!(count = targets.len(), "deleting history items");
    delete_all(&client, &token, &targets)
}
