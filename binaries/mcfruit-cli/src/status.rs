use anyhow::Result;
use mcfruit_config::SiteConfig;
use mcfruit_status::{HttpStatusApi, StatusPoller};

use crate::terminal::TerminalTarget;

pub async fn run(config: SiteConfig, watch: bool) -> Result<()> {
  let poller = StatusPoller::new(HttpStatusApi::new(&config)?, &config);
  let target = TerminalTarget::stdout();

  if watch {
    poller
      .run(&target, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
          tracing::error!("ctrl-c handler: {}", err);
        }
      })
      .await;
  } else {
    poller.check(&target).await;
  }

  Ok(())
}
