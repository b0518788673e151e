use mcfruit_config::SiteConfig;

use crate::format::*;
use crate::types::{GameModeRecord, PlayerRecord};

pub const NO_DATA_TEXT: &str = "No game mode statistics available";

/// Everything the results panel shows for one player, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
  pub avatar_url: String,
  pub avatar_alt: String,
  pub name: String,
  pub rank: String,
  pub total_wins: String,
  pub total_losses: String,
  pub win_rate: String,
  pub streak: String,
  pub modes: ModeSection,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModeSection {
  Cards(Vec<GameModeCard>),
  NoData,
}

impl ModeSection {
  pub fn cards(&self) -> &[GameModeCard] {
    match self {
      ModeSection::Cards(cards) => cards,
      ModeSection::NoData => &[],
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameModeCard {
  pub name: String,
  pub elo: i64,
  pub wins: u64,
  pub losses: u64,
  pub win_rate: String,
  pub streak: String,
  pub streak_tone: StreakTone,
}

impl GameModeCard {
  pub fn from_record(mode: &GameModeRecord, config: &SiteConfig) -> Self {
    GameModeCard {
      name: config.mode_names.display_name(&mode.name).to_string(),
      elo: mode.elo_or_default(),
      wins: mode.wins,
      losses: mode.losses,
      win_rate: format_win_rate(mode.wins, mode.losses),
      streak: format_streak(mode.streak),
      streak_tone: StreakTone::of(mode.streak),
    }
  }

  pub fn elo_text(&self) -> String {
    format!("{} ELO", self.elo)
  }
}

impl PlayerView {
  pub fn from_record(record: &PlayerRecord, config: &SiteConfig) -> Self {
    let modes = if record.game_modes.is_empty() {
      ModeSection::NoData
    } else {
      ModeSection::Cards(
        record
          .game_modes
          .iter()
          .map(|mode| GameModeCard::from_record(mode, config))
          .collect(),
      )
    };

    PlayerView {
      avatar_url: avatar_url(&config.avatar_base_url, record.avatar_id()),
      avatar_alt: record.username.clone(),
      name: record.username.clone(),
      rank: format_rank(record.rank()),
      total_wins: format_count(record.total_wins),
      total_losses: format_count(record.total_losses),
      win_rate: format_win_rate(record.total_wins, record.total_losses),
      streak: format_streak(record.streak),
      modes,
    }
  }
}
