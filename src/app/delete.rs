use tracing::{error, info};

use super::history::HISTORY_PATH;
use crate::error::{EXIT_PARTIAL, Result};
use crate::http::ApiClient;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct DeleteReport {
    pub(crate) deleted: usize,
    pub(crate) failed: Vec<String>,
}

impl DeleteReport {
    pub(crate) fn attempted(&self) -> usize {
        self.deleted + self.failed.len()
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub(crate) fn exit_code(&self) -> u8 {
        if self.is_clean() { 0 } else { EXIT_PARTIAL }
    }
}

pub(crate) fn delete_all(client: &ApiClient, token: &str, ids: &[String]) -> Result<DeleteReport> {
    let mut report = DeleteReport::default();

    for id in ids {
        let response = client.delete_item(HISTORY_PATH, id, token)?;
        if response.status == 200 {
            info!(id = %id, "item deleted");
            report.deleted += 1;
        } else {
            error!(
                id = %id,
                status = response.status,
                body = %response.body.trim(),
                "error deleting item"
            );
            report.failed.push(id.clone());
        }
    }

    info!(
        deleted = report.deleted,
        failed = report.failed.len(),
        "finished deleting history"
    );
    Ok(report)
}
