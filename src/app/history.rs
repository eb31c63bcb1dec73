use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cli::SelectionMode;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::ApiClient;

pub(crate) const HISTORY_PATH: &str = "source/funimation/history/";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct HistoryRecord {
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub(crate) external_ver_id: String,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub(crate) show_title: String,
}

#[derive(Debug, Deserialize)]
struct HistoryPage {
    #[serde(default)]
    items: Vec<HistoryRecord>,
}

// The API hands out ids as strings on some records and numbers on others.
fn deserialize_string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

pub(crate) fn parse_history_page(raw: &str) -> serde_json::Result<Vec<HistoryRecord>> {
    serde_json::from_str::<HistoryPage>(raw).map(|page| page.items)
}

pub(crate) fn fetch_history(
    client: &ApiClient,
    config: &Config,
    token: &str,
) -> Result<Vec<HistoryRecord>> {
    let limit = config.page_size.to_string();
    let mut history = Vec::new();
    let mut offset = 0_usize;

    for _ in 0..config.max_pages {
        let offset_param = offset.to_string();
        let body = client.get(
            HISTORY_PATH,
            token,
            &[
                ("return_all", "true"),
                ("offset", offset_param.as_str()),
                ("limit", limit.as_str()),
            ],
        )?;
        let items = parse_history_page(&body).map_err(|err| Error::Decode {
            url: client.url(HISTORY_PATH),
            detail: format!("invalid history page at offset {offset}: {err}"),
        })?;
        debug!(offset, count = items.len(), "fetched history page");

        if items.is_empty() {
            info!(total = history.len(), "fetched watch history");
            return Ok(history);
        }
        history.extend(items);
        offset += config.page_size;
    }

    Err(Error::PaginationLimit(config.max_pages))
}

pub(crate) fn select_targets(history: &[HistoryRecord], mode: &SelectionMode) -> Vec<String> {
    let selected: Vec<&HistoryRecord> = match mode {
        SelectionMode::ByTitle(title) => history
            .iter()
            .filter(|record| record.show_title.contains(title.as_str()))
            .collect(),
        SelectionMode::ByCount(count) => {
            if *count > history.len() {
                warn!(
                    requested = count,
                    available = history.len(),
                    "fewer history items than requested, selecting all of them"
                );
            }
            history.iter().take(*count).collect()
        }
        SelectionMode::All => history.iter().collect(),
    };

    selected
        .into_iter()
        .filter_map(|record| {
            if record.external_ver_id.is_empty() {
                warn!(show = %record.show_title, "skipping history item without an id");
                None
            } else {
                Some(record.external_ver_id.clone())
            }
        })
        .collect()
}
