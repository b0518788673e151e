use mcfruit_config::SiteConfig;
use parking_lot::Mutex;
use tracing_futures::Instrument;

use crate::api::{HttpStatsApi, StatsApi};
use crate::error::{Error, Result};
use crate::render::{show_error, show_loading, show_results, RenderTarget};
use crate::types::PlayerRecord;
use crate::view::PlayerView;

pub const EMPTY_INPUT_NOTICE: &str = "Please enter a player username";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch player stats";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
  /// Input was blank; nothing was requested.
  EmptyInput,
  Found(PlayerView),
  NotFound,
  Failed,
  /// A newer search started before this one completed; its response was
  /// dropped without touching the display.
  Superseded,
}

/// Fetches a player's stats and renders them into `target`.
///
/// Every search gets a sequence number. Only the response of the latest
/// search is rendered, so overlapping searches cannot leave stale data on
/// screen.
pub struct StatsPipeline<A, T> {
  config: SiteConfig,
  api: A,
  target: T,
  latest: Mutex<u64>,
}

impl<T: RenderTarget> StatsPipeline<HttpStatsApi, T> {
  pub fn from_config(config: SiteConfig, target: T) -> Result<Self> {
    let api = HttpStatsApi::new(&config)?;
    Ok(StatsPipeline::new(config, api, target))
  }
}

impl<A, T> StatsPipeline<A, T>
where
  A: StatsApi,
  T: RenderTarget,
{
  pub fn new(config: SiteConfig, api: A, target: T) -> Self {
    StatsPipeline {
      config,
      api,
      target,
      latest: Mutex::new(0),
    }
  }

  pub fn config(&self) -> &SiteConfig {
    &self.config
  }

  pub fn target(&self) -> &T {
    &self.target
  }

  pub async fn search(&self, raw_input: &str) -> SearchOutcome {
    let username = raw_input.trim();
    if username.is_empty() {
      self.target.notify(EMPTY_INPUT_NOTICE);
      return SearchOutcome::EmptyInput;
    }

    let seq = self.begin();
    let span = tracing::info_span!("search", seq, %username);
    let result = self
      .api
      .fetch_player(username)
      .instrument(span.clone())
      .await;
    span.in_scope(|| self.complete(seq, username, result))
  }

  pub fn not_found_message(&self, username: &str) -> String {
    format!(
      "Player \"{}\" not found or hasn't played on {}",
      username, self.config.server_name
    )
  }

  fn begin(&self) -> u64 {
    let mut latest = self.latest.lock();
    *latest += 1;
    show_loading(&self.target);
    *latest
  }

  fn complete(&self, seq: u64, username: &str, result: Result<PlayerRecord>) -> SearchOutcome {
    let latest = self.latest.lock();
    if *latest != seq {
      tracing::debug!("response dropped, superseded by search #{}", *latest);
      return SearchOutcome::Superseded;
    }

    match result {
      Ok(record) => {
        let view = PlayerView::from_record(&record, &self.config);
        show_results(&self.target, &view);
        tracing::info!("rendered {} game modes", view.modes.cards().len());
        SearchOutcome::Found(view)
      }
      Err(Error::NotFound(_)) => {
        tracing::info!("player not found");
        show_error(&self.target, &self.not_found_message(username));
        SearchOutcome::NotFound
      }
      Err(err) => {
        tracing::error!("error loading player stats: {}", err);
        show_error(&self.target, FETCH_FAILED_MESSAGE);
        SearchOutcome::Failed
      }
    }
  }
}
