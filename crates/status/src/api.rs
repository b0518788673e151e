use async_trait::async_trait;
use mcfruit_config::SiteConfig;
use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
  #[serde(default, deserialize_with = "null_as_default")]
  pub online: bool,
  #[serde(default)]
  pub players: Option<Players>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players {
  #[serde(default, deserialize_with = "null_as_default")]
  pub online: u64,
  #[serde(default, deserialize_with = "null_as_default")]
  pub max: u64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[async_trait]
pub trait StatusApi: Send + Sync {
  async fn fetch_status(&self, address: &str) -> Result<ServerStatus>;
}

/// `GET {status_api_url}/{address}` against the public status service.
#[derive(Debug, Clone)]
pub struct HttpStatusApi {
  client: reqwest::Client,
  base_url: Url,
}

impl HttpStatusApi {
  pub fn new(config: &SiteConfig) -> Result<Self> {
    let invalid = |reason: String| Error::InvalidBaseUrl {
      url: config.status_api_url.clone(),
      reason,
    };
    let base_url = Url::parse(config.status_api_url.trim()).map_err(|err| invalid(err.to_string()))?;
    if base_url.cannot_be_a_base() {
      return Err(invalid("cannot be a base".to_string()));
    }

    let mut builder =
      reqwest::Client::builder().user_agent(concat!("mcfruit-status/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = config.request_timeout() {
      builder = builder.timeout(timeout);
    }
    Ok(HttpStatusApi {
      client: builder.build()?,
      base_url,
    })
  }

  pub fn status_url(&self, address: &str) -> Url {
    let mut url = self.base_url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
      segments.pop_if_empty().push(address);
    }
    url
  }
}

#[async_trait]
impl StatusApi for HttpStatusApi {
  async fn fetch_status(&self, address: &str) -> Result<ServerStatus> {
    let url = self.status_url(address);
    tracing::debug!("GET {}", url);

    let res = self.client.get(url).send().await?;
    if !res.status().is_success() {
      return Err(Error::UnexpectedStatus(res.status()));
    }
    let body = res.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::extract::Path;
  use axum::http::StatusCode;
  use axum::response::{IntoResponse, Response};
  use axum::routing::get;
  use axum::{Json, Router};

  async fn status(Path(address): Path<String>) -> Response {
    match address.as_str() {
      "mcfruit.club" => Json(serde_json::json!({
        "online": true,
        "players": { "online": 5, "max": 20 }
      }))
      .into_response(),
      "down.mcfruit.club" => Json(serde_json::json!({ "online": false })).into_response(),
      _ => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
  }

  async fn start() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/3/:address", get(status));
    let server = axum::Server::from_tcp(listener)
      .unwrap()
      .serve(app.into_make_service());
    tokio::spawn(server);
    format!("http://{}/3", addr)
  }

  fn api(base: String) -> HttpStatusApi {
    let mut config = SiteConfig::default();
    config.status_api_url = base;
    HttpStatusApi::new(&config).unwrap()
  }

  #[test]
  fn test_status_url() {
    let api = api("https://api.mcsrvstat.us/3".to_string());
    assert_eq!(
      api.status_url("mcfruit.club").as_str(),
      "https://api.mcsrvstat.us/3/mcfruit.club"
    );
  }

  #[test]
  fn test_null_counts_default_to_zero() {
    let status: ServerStatus =
      serde_json::from_str(r#"{ "online": true, "players": { "online": null, "max": 20 } }"#).unwrap();
    assert!(status.online);
    assert_eq!(status.players, Some(Players { online: 0, max: 20 }));

    let status: ServerStatus = serde_json::from_str(r#"{ "online": null, "players": {} }"#).unwrap();
    assert!(!status.online);
    assert_eq!(status.players, Some(Players { online: 0, max: 0 }));
  }

  #[tokio::test]
  async fn test_fetch_status() {
    let api = api(start().await);

    let status = api.fetch_status("mcfruit.club").await.unwrap();
    assert!(status.online);
    assert_eq!(status.players, Some(Players { online: 5, max: 20 }));

    let status = api.fetch_status("down.mcfruit.club").await.unwrap();
    assert!(!status.online);
    assert_eq!(status.players, None);

    assert!(matches!(
      api.fetch_status("elsewhere").await,
      Err(Error::UnexpectedStatus(StatusCode::SERVICE_UNAVAILABLE))
    ));
  }
}
