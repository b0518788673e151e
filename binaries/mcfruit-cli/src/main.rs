use anyhow::Result;
use clap::{Parser, Subcommand};
use mcfruit_config::SiteConfig;
use std::path::PathBuf;

mod player;
mod status;
mod terminal;

#[derive(Parser, Debug)]
#[clap(version, about = "Player stats and server status for MCFruit")]
struct Opts {
  /// Config file, defaults to ./mcfruit.toml when present
  #[clap(long, global = true)]
  config: Option<PathBuf>,
  #[clap(subcommand)]
  cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Look up one player
  Player { username: String },
  /// Read usernames from stdin, one search per line
  Search,
  /// Check the server status
  Status {
    /// Keep polling until Ctrl-C
    #[clap(long)]
    watch: bool,
  },
  /// Print the server address
  Ip,
}

#[tokio::main]
async fn main() -> Result<()> {
  dotenv::dotenv().ok();
  mcfruit_log_subscriber::init_env_override("mcfruit=info,mcfruit_stats=warn,mcfruit_status=warn");

  let opts = Opts::parse();
  let config = match opts.config {
    Some(path) => SiteConfig::load_from(path)?,
    None => SiteConfig::load()?,
  };
  tracing::debug!(
    "version: {}, api: {}",
    mcfruit_constants::version::Version::current(),
    config.api_base_url
  );

  match opts.cmd {
    Command::Player { username } => player::run_once(config, &username).await?,
    Command::Search => player::run_interactive(config).await?,
    Command::Status { watch } => status::run(config, watch).await?,
    Command::Ip => println!("{}", config.server_address),
  }

  Ok(())
}
