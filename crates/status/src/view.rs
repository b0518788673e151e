use crate::api::ServerStatus;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
  Online,
  Offline,
  Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
  pub text: &'static str,
  pub player_count: String,
  pub tone: StatusTone,
}

impl StatusView {
  pub fn from_status(status: &ServerStatus) -> Self {
    if status.online {
      let player_count = status
        .players
        .as_ref()
        .map(|players| format!("{}/{}", players.online, players.max))
        .unwrap_or_else(|| "0/0".to_string());
      StatusView {
        text: "Server Online",
        player_count,
        tone: StatusTone::Online,
      }
    } else {
      StatusView {
        text: "Server Offline",
        player_count: "0/0".to_string(),
        tone: StatusTone::Offline,
      }
    }
  }

  pub fn unknown() -> Self {
    StatusView {
      text: "Status Unknown",
      player_count: "-".to_string(),
      tone: StatusTone::Unknown,
    }
  }

  pub fn from_result(result: &Result<ServerStatus>) -> Self {
    match result {
      Ok(status) => Self::from_status(status),
      Err(err) => {
        tracing::error!("error fetching server status: {}", err);
        Self::unknown()
      }
    }
  }
}
