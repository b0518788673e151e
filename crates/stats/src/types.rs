use serde::{Deserialize, Deserializer, Serialize};

/// Per-player payload returned by the stats API.
///
/// Numeric fields the API omits (or sends as `null`) fall back to zero. The
/// upstream contract does not say whether omission is legal.
///
/// A zero `rank` or `elo` is read as "unset", like an absent one: see
/// [`PlayerRecord::rank()`] and [`GameModeRecord::elo_or_default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
  pub username: String,
  #[serde(default)]
  pub uuid: Option<String>,
  #[serde(default)]
  pub rank: Option<u64>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub total_wins: u64,
  #[serde(default, deserialize_with = "null_as_default")]
  pub total_losses: u64,
  #[serde(default, deserialize_with = "null_as_default")]
  pub streak: i64,
  #[serde(default, deserialize_with = "null_as_default")]
  pub game_modes: Vec<GameModeRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameModeRecord {
  pub name: String,
  #[serde(default)]
  pub elo: Option<i64>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub wins: u64,
  #[serde(default, deserialize_with = "null_as_default")]
  pub losses: u64,
  #[serde(default, deserialize_with = "null_as_default")]
  pub streak: i64,
}

impl PlayerRecord {
  pub fn new(username: impl Into<String>) -> Self {
    PlayerRecord {
      username: username.into(),
      uuid: None,
      rank: None,
      total_wins: 0,
      total_losses: 0,
      streak: 0,
      game_modes: vec![],
    }
  }

  /// Ranks are 1-based; 0 means unranked.
  pub fn rank(&self) -> Option<u64> {
    self.rank.filter(|rank| *rank > 0)
  }

  /// Identifier handed to the avatar service.
  pub fn avatar_id(&self) -> &str {
    self
      .uuid
      .as_deref()
      .filter(|uuid| !uuid.is_empty())
      .unwrap_or(&self.username)
  }
}

impl GameModeRecord {
  /// An ELO of 0 is unset and gets the default rating.
  pub fn elo_or_default(&self) -> i64 {
    self
      .elo
      .filter(|elo| *elo != 0)
      .unwrap_or(mcfruit_constants::DEFAULT_ELO)
  }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
