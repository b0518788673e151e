use async_trait::async_trait;
use mcfruit_config::SiteConfig;
use reqwest::{StatusCode, Url};

use crate::error::{Error, Result};
use crate::types::PlayerRecord;

#[async_trait]
pub trait StatsApi: Send + Sync {
  async fn fetch_player(&self, username: &str) -> Result<PlayerRecord>;
}

#[async_trait]
impl<A: StatsApi + ?Sized> StatsApi for std::sync::Arc<A> {
  async fn fetch_player(&self, username: &str) -> Result<PlayerRecord> {
    (**self).fetch_player(username).await
  }
}

/// `GET {api_base_url}/player/{username}` against the stats service.
#[derive(Debug, Clone)]
pub struct HttpStatsApi {
  client: reqwest::Client,
  base_url: Url,
}

impl HttpStatsApi {
  pub fn new(config: &SiteConfig) -> Result<Self> {
    let base_url = parse_base_url(&config.api_base_url)?;
    let mut builder =
      reqwest::Client::builder().user_agent(concat!("mcfruit-stats/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = config.request_timeout() {
      builder = builder.timeout(timeout);
    }
    Ok(HttpStatsApi {
      client: builder.build()?,
      base_url,
    })
  }

  pub fn player_url(&self, username: &str) -> Result<Url> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|_| Error::InvalidBaseUrl {
        url: self.base_url.to_string(),
        reason: "cannot be a base".to_string(),
      })?
      .pop_if_empty()
      .push("player")
      .push(username);
    Ok(url)
  }
}

#[async_trait]
impl StatsApi for HttpStatsApi {
  async fn fetch_player(&self, username: &str) -> Result<PlayerRecord> {
    let url = self.player_url(username)?;
    tracing::debug!("GET {}", url);

    let res = self.client.get(url).send().await?;
    let status = res.status();
    if status == StatusCode::NOT_FOUND {
      return Err(Error::NotFound(username.to_string()));
    }
    if !status.is_success() {
      return Err(Error::UnexpectedStatus(status));
    }

    let body = res.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
  }
}

fn parse_base_url(value: &str) -> Result<Url> {
  let url = Url::parse(value.trim()).map_err(|err| Error::InvalidBaseUrl {
    url: value.to_string(),
    reason: err.to_string(),
  })?;
  if url.cannot_be_a_base() {
    return Err(Error::InvalidBaseUrl {
      url: value.to_string(),
      reason: "cannot be a base".to_string(),
    });
  }
  Ok(url)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_server;

  fn api(base: &str) -> HttpStatsApi {
    let mut config = SiteConfig::default();
    config.api_base_url = base.to_string();
    HttpStatsApi::new(&config).unwrap()
  }

  #[test]
  fn test_player_url() {
    assert_eq!(
      api("http://localhost:8080/api").player_url("Alex").unwrap().as_str(),
      "http://localhost:8080/api/player/Alex"
    );
    assert_eq!(
      api("http://localhost:8080/api/").player_url("Alex").unwrap().as_str(),
      "http://localhost:8080/api/player/Alex"
    );
    assert_eq!(
      api("http://localhost:8080").player_url("a b/c").unwrap().as_str(),
      "http://localhost:8080/player/a%20b%2Fc"
    );
  }

  #[test]
  fn test_invalid_base_url() {
    let mut config = SiteConfig::default();
    config.api_base_url = "not a url".to_string();
    assert!(matches!(
      HttpStatsApi::new(&config),
      Err(Error::InvalidBaseUrl { .. })
    ));
    config.api_base_url = "mailto:admin@mcfruit.club".to_string();
    assert!(matches!(
      HttpStatsApi::new(&config),
      Err(Error::InvalidBaseUrl { .. })
    ));
  }

  #[tokio::test]
  async fn test_fetch_player() {
    let base = test_server::start().await;
    let record = api(&base).fetch_player("Alex").await.unwrap();
    assert_eq!(record.username, "Alex");
    assert_eq!(record.total_wins, 10);
    assert_eq!(record.game_modes[0].elo, Some(1200));
  }

  #[tokio::test]
  async fn test_fetch_errors() {
    let base = test_server::start().await;
    let api = api(&base);

    match api.fetch_player("Ghost").await {
      Err(Error::NotFound(name)) => assert_eq!(name, "Ghost"),
      other => panic!("unexpected: {:?}", other),
    }
    assert!(matches!(
      api.fetch_player("Crash").await,
      Err(Error::UnexpectedStatus(StatusCode::INTERNAL_SERVER_ERROR))
    ));
    assert!(matches!(api.fetch_player("Broken").await, Err(Error::Json(_))));
  }

  #[tokio::test]
  async fn test_fetch_connection_refused() {
    let addr = {
      let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
      listener.local_addr().unwrap()
    };
    let api = api(&format!("http://{}/api", addr));
    assert!(matches!(api.fetch_player("Alex").await, Err(Error::Http(_))));
  }
}
