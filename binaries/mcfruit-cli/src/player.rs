use anyhow::Result;
use mcfruit_config::SiteConfig;
use mcfruit_stats::{SearchOutcome, StatsPipeline};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use crate::terminal::TerminalTarget;

pub async fn run_once(config: SiteConfig, username: &str) -> Result<()> {
  let pipeline = StatsPipeline::from_config(config, TerminalTarget::stdout())?;
  let outcome = pipeline.search(username).await;
  tracing::debug!("search finished: {}", describe(&outcome));
  Ok(())
}

/// Each line starts its own search. Lines may arrive faster than the API
/// answers; only the newest search's response is shown.
pub async fn run_interactive(config: SiteConfig) -> Result<()> {
  let pipeline = Arc::new(StatsPipeline::from_config(config, TerminalTarget::stdout())?);
  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  let mut tasks = vec![];

  while let Some(line) = lines.next_line().await? {
    prune_finished(&mut tasks);
    let pipeline = pipeline.clone();
    tasks.push(tokio::spawn(async move {
      let outcome = pipeline.search(&line).await;
      tracing::debug!("search for {:?} finished: {}", line.trim(), describe(&outcome));
    }));
  }

  for task in tasks {
    task.await?;
  }

  Ok(())
}

/// Drops handles of searches that already completed.
fn prune_finished(tasks: &mut Vec<JoinHandle<()>>) {
  tasks.retain(|task| !task.is_finished());
}

fn describe(outcome: &SearchOutcome) -> &'static str {
  match outcome {
    SearchOutcome::EmptyInput => "empty input",
    SearchOutcome::Found(_) => "found",
    SearchOutcome::NotFound => "not found",
    SearchOutcome::Failed => "failed",
    SearchOutcome::Superseded => "superseded",
  }
}
