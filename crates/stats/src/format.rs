use reqwest::Url;

/// Percentage of decided games won, rounded half-up to one decimal.
/// Zero when no games were played.
pub fn win_rate(wins: u64, losses: u64) -> f64 {
  let total = wins as f64 + losses as f64;
  if total == 0.0 {
    return 0.0;
  }
  let rate = wins as f64 / total * 100.0;
  (rate * 10.0).round() / 10.0
}

pub fn format_win_rate(wins: u64, losses: u64) -> String {
  format!("{:.1}%", win_rate(wins, losses))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTone {
  Positive,
  Negative,
}

impl StreakTone {
  pub fn of(streak: i64) -> Self {
    if streak >= 0 {
      StreakTone::Positive
    } else {
      StreakTone::Negative
    }
  }

  pub fn class_name(&self) -> &'static str {
    match *self {
      StreakTone::Positive => "positive",
      StreakTone::Negative => "negative",
    }
  }
}

pub fn format_streak(streak: i64) -> String {
  if streak >= 0 {
    format!("+{}", streak)
  } else {
    streak.to_string()
  }
}

pub fn format_rank(rank: Option<u64>) -> String {
  match rank {
    Some(rank) => format!("Rank #{}", rank),
    None => "Rank #-".to_string(),
  }
}

/// Groups digits in threes: `1234567` -> `1,234,567`.
pub fn format_count(value: u64) -> String {
  let digits = value.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(c);
  }
  out
}

/// `{avatar_base_url}/avatar/{id}/128`, with `id` percent-encoded as one
/// path segment.
pub fn avatar_url(avatar_base_url: &str, id: &str) -> String {
  let size = mcfruit_constants::AVATAR_SIZE.to_string();
  match Url::parse(avatar_base_url.trim()) {
    Ok(mut url) if !url.cannot_be_a_base() => {
      if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("avatar").push(id).push(&size);
      }
      url.to_string()
    }
    _ => {
      tracing::warn!("invalid avatar base url: {}", avatar_base_url);
      String::new()
    }
  }
}
