use mcfruit_config::SiteConfig;
use std::future::Future;
use std::time::Duration;

use crate::api::StatusApi;
use crate::view::StatusView;

pub trait StatusTarget: Send + Sync {
  fn show_status(&self, view: &StatusView);
}

pub struct StatusPoller<A> {
  api: A,
  address: String,
  refresh: Duration,
}

impl<A: StatusApi> StatusPoller<A> {
  pub fn new(api: A, config: &SiteConfig) -> Self {
    StatusPoller {
      api,
      address: config.server_address.clone(),
      refresh: config.status_refresh(),
    }
  }

  pub async fn check<T: StatusTarget + ?Sized>(&self, target: &T) -> StatusView {
    let view = StatusView::from_result(&self.api.fetch_status(&self.address).await);
    tracing::debug!("{}: {} ({})", self.address, view.text, view.player_count);
    target.show_status(&view);
    view
  }

  /// Checks immediately, then once per refresh interval until `shutdown`
  /// resolves.
  pub async fn run<T, S>(&self, target: &T, shutdown: S)
  where
    T: StatusTarget + ?Sized,
    S: Future<Output = ()>,
  {
    let mut interval = tokio::time::interval(self.refresh);
    tokio::pin!(shutdown);

    loop {
      tokio::select! {
        _ = &mut shutdown => {
          tracing::debug!("status poller stopped");
          break;
        }
        _ = interval.tick() => {
          self.check(target).await;
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::{Players, ServerStatus};
  use crate::error::{Error, Result};
  use crate::view::StatusTone;
  use async_trait::async_trait;
  use parking_lot::Mutex;
  use std::sync::atomic::{AtomicUsize, Ordering};

  #[derive(Default)]
  struct FlakyApi {
    calls: AtomicUsize,
  }

  #[async_trait]
  impl StatusApi for FlakyApi {
    async fn fetch_status(&self, address: &str) -> Result<ServerStatus> {
      assert_eq!(address, "mcfruit.club");
      match self.calls.fetch_add(1, Ordering::SeqCst) {
        0 => Ok(ServerStatus {
          online: true,
          players: Some(Players { online: 7, max: 100 }),
        }),
        1 => Ok(ServerStatus {
          online: false,
          players: None,
        }),
        _ => Err(Error::UnexpectedStatus(reqwest::StatusCode::BAD_GATEWAY)),
      }
    }
  }

  #[derive(Default)]
  struct Recorder(Mutex<Vec<StatusView>>);

  impl StatusTarget for Recorder {
    fn show_status(&self, view: &StatusView) {
      self.0.lock().push(view.clone());
    }
  }

  #[tokio::test(start_paused = true)]
  async fn test_poller_refreshes_until_shutdown() {
    mcfruit_log_subscriber::try_init_test();
    let poller = StatusPoller::new(FlakyApi::default(), &SiteConfig::default());
    let target = Recorder::default();

    poller
      .run(&target, tokio::time::sleep(Duration::from_secs(65)))
      .await;

    let views = target.0.lock().clone();
    assert_eq!(views.len(), 3);
    assert_eq!(views[0].player_count, "7/100");
    assert_eq!(views[0].tone, StatusTone::Online);
    assert_eq!(views[1].tone, StatusTone::Offline);
    assert_eq!(views[2], StatusView::unknown());
  }

  #[tokio::test]
  async fn test_check_once() {
    let poller = StatusPoller::new(FlakyApi::default(), &SiteConfig::default());
    let target = Recorder::default();
    let view = poller.check(&target).await;
    assert_eq!(view.text, "Server Online");
    assert_eq!(target.0.lock().len(), 1);
  }
}
