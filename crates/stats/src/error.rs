use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  #[error("player not found: {0}")]
  NotFound(String),
  #[error("unexpected status: {0}")]
  UnexpectedStatus(reqwest::StatusCode),
  #[error("invalid api base url {url}: {reason}")]
  InvalidBaseUrl { url: String, reason: String },
  #[error("http: {0}")]
  Http(#[from] reqwest::Error),
  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
