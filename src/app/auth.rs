use serde::Deserialize;
use tracing::debug;

use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::http::ApiClient;

pub(crate) const LOGIN_PATH: &str = "auth/login/";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: String,
}

pub(crate) fn authenticate(client: &ApiClient, credentials: &Credentials) -> Result<String> {
    let body = client
        .post_form(
            LOGIN_PATH,
            &[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ],
        )
        .map_err(|err| Error::Auth(err.to_string()))?;

    let token = parse_token(&body)?;
    debug!("obtained API token");
    Ok(token)
}

pub(crate) fn parse_token(raw: &str) -> Result<String> {
    let response: LoginResponse = serde_json::from_str(raw)
        .map_err(|err| Error::Auth(format!("invalid login response: {err}")))?;
    let token = response.token.trim();
    if token.is_empty() {
        return Err(Error::Auth("login response did not contain a token".to_string()));
    }
    Ok(token.to_string())
}
