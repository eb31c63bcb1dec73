use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub(crate) struct ApiResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

impl ApiResponse {
    pub(crate) fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub(crate) struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    pub(crate) fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .timeout_read(config.io_timeout)
            .timeout_write(config.io_timeout)
            .build();
        Self {
            agent,
            base_url: config.api_base.clone(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<String> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = read_response(&url, self.agent.post(&url).send_form(form))?;
        expect_success(url, response)
    }

    pub(crate) fn get(&self, path: &str, token: &str, query: &[(&str, &str)]) -> Result<String> {
        let url = self.url(path);
        debug!(%url, ?query, "GET");
        let mut request = self.agent.get(&url).set("Authorization", &auth_header(token));
        for (key, value) in query {
            request = request.query(key, value);
        }
        let response = read_response(&url, request.call())?;
        expect_success(url, response)
    }

    // `id` becomes a single escaped path segment, keeping the trailing slash.
    pub(crate) fn item_url(&self, collection: &str, id: &str) -> Result<String> {
        let base = self.url(collection);
        let mut url = Url::parse(&base)
            .map_err(|err| Error::Config(format!("invalid API URL {base}: {err}")))?;
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("invalid API URL {base}")))?
            .pop_if_empty()
            .push(id)
            .push("");
        Ok(url.into())
    }

    // Non-2xx replies come back as Ok; the caller decides whether they are fatal.
    pub(crate) fn delete_item(
        &self,
        collection: &str,
        id: &str,
        token: &str,
    ) -> Result<ApiResponse> {
        let url = self.item_url(collection, id)?;
        debug!(%url, "DELETE");
        let request = self.agent.delete(&url).set("Authorization", &auth_header(token));
        read_response(&url, request.call())
    }
}

fn auth_header(token: &str) -> String {
    format!("Token {token}")
}

fn read_response(
    url: &str,
    outcome: std::result::Result<ureq::Response, ureq::Error>,
) -> Result<ApiResponse> {
    match outcome {
        Ok(response) => {
            let status = response.status();
            let body = response.into_string().map_err(|err| Error::Decode {
                url: url.to_string(),
                detail: format!("response decode failed: {err}"),
            })?;
            Ok(ApiResponse { status, body })
        }
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().ok().unwrap_or_default();
            Ok(ApiResponse { status, body })
        }
        Err(ureq::Error::Transport(err)) => Err(Error::Transport {
            url: url.to_string(),
            detail: err.to_string(),
        }),
    }
}

fn expect_success(url: String, response: ApiResponse) -> Result<String> {
    if response.is_success() {
        Ok(response.body)
    } else {
        Err(Error::Status {
            url,
            status: response.status,
            body: response.body,
        })
    }
}
