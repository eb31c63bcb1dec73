use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Config(String),

    #[error("could not get token: {0}")]
    Auth(String),

    #[error("request to {url} failed: transport error: {detail}")]
    Transport { url: String, detail: String },

    #[error("request to {url} failed: HTTP status {status}{}", format_body(.body))]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("unexpected response from {url}: {detail}")]
    Decode { url: String, detail: String },

    #[error("history pagination exceeded {0} pages without an empty page")]
    PaginationLimit(usize),
}

pub type Result<T> = std::result::Result<T, Error>;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_AUTH: u8 = 3;
pub const EXIT_API: u8 = 4;
pub const EXIT_PARTIAL: u8 = 5;

impl Error {
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Config(_) => EXIT_CONFIG,
            Error::Auth(_) => EXIT_AUTH,
            Error::Transport { .. }
            | Error::Status { .. }
            | Error::Decode { .. }
            | Error::PaginationLimit(_) => EXIT_API,
        }
    }
}

fn format_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        let truncated = body.chars().take(240).collect::<String>();
        format!(" ({truncated})")
    }
}
