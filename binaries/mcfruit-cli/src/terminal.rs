use mcfruit_stats::{ModeSection, Panel, RenderTarget, Slot, NO_DATA_TEXT};
use mcfruit_status::{StatusTarget, StatusView};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Prints panels to a writer as they become visible.
pub struct TerminalTarget<W> {
  state: Mutex<State<W>>,
}

struct State<W> {
  out: W,
  texts: BTreeMap<Slot, String>,
  modes: ModeSection,
}

impl TerminalTarget<io::Stdout> {
  pub fn stdout() -> Self {
    Self::new(io::stdout())
  }
}

impl<W: Write + Send> TerminalTarget<W> {
  pub fn new(out: W) -> Self {
    TerminalTarget {
      state: Mutex::new(State {
        out,
        texts: BTreeMap::new(),
        modes: ModeSection::NoData,
      }),
    }
  }

  #[cfg(test)]
  pub fn into_inner(self) -> W {
    self.state.into_inner().out
  }
}

impl<W: Write> State<W> {
  fn text(&self, slot: Slot) -> &str {
    self.texts.get(&slot).map(String::as_str).unwrap_or("")
  }

  fn render_player(&self) -> String {
    let mut lines = vec![
      format!("{}  {}", self.text(Slot::Name), self.text(Slot::Rank)),
      format!("  avatar    {}", self.text(Slot::AvatarSource)),
      format!("  wins      {}", self.text(Slot::TotalWins)),
      format!("  losses    {}", self.text(Slot::TotalLosses)),
      format!("  win rate  {}", self.text(Slot::WinRate)),
      format!("  streak    {}", self.text(Slot::Streak)),
      String::new(),
    ];
    match self.modes {
      ModeSection::Cards(ref cards) => {
        for card in cards {
          lines.push(format!("  {}  {}", card.name, card.elo_text()));
          lines.push(format!(
            "    wins {}  losses {}  win rate {}  streak {} ({})",
            card.wins,
            card.losses,
            card.win_rate,
            card.streak,
            card.streak_tone.class_name()
          ));
        }
      }
      ModeSection::NoData => lines.push(format!("  {}", NO_DATA_TEXT)),
    }
    lines.join("\n")
  }

  fn emit(&mut self, text: &str) {
    if let Err(err) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
      tracing::warn!("terminal write: {}", err);
    }
  }
}

impl<W: Write + Send> RenderTarget for TerminalTarget<W> {
  fn notify(&self, message: &str) {
    self.state.lock().emit(&format!("! {}", message));
  }

  fn set_visible(&self, panel: Panel, visible: bool) {
    if !visible {
      return;
    }
    let mut state = self.state.lock();
    let text = match panel {
      Panel::Loading => "Loading player stats...".to_string(),
      Panel::Error => format!("error: {}", state.text(Slot::ErrorMessage)),
      Panel::Results => state.render_player(),
    };
    state.emit(&text);
  }

  fn set_text(&self, slot: Slot, text: &str) {
    self.state.lock().texts.insert(slot, text.to_string());
  }

  fn replace_game_modes(&self, modes: &ModeSection) {
    self.state.lock().modes = modes.clone();
  }
}

impl<W: Write + Send> StatusTarget for TerminalTarget<W> {
  fn show_status(&self, view: &StatusView) {
    self
      .state
      .lock()
      .emit(&format!("{}  {}", view.text, view.player_count));
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use mcfruit_config::SiteConfig;
  use mcfruit_stats::render::{show_error, show_loading, show_results};
  use mcfruit_stats::{GameModeRecord, PlayerRecord, PlayerView};

  fn output(target: TerminalTarget<Vec<u8>>) -> String {
    String::from_utf8(target.into_inner()).unwrap()
  }

  #[test]
  fn test_render_player() {
    let record = PlayerRecord {
      total_wins: 10,
      total_losses: 5,
      streak: 2,
      game_modes: vec![GameModeRecord {
        name: "sumo".to_string(),
        elo: Some(1200),
        wins: 10,
        losses: 5,
        streak: 2,
      }],
      ..PlayerRecord::new("Alex")
    };
    let target = TerminalTarget::new(vec![]);
    show_loading(&target);
    show_results(&target, &PlayerView::from_record(&record, &SiteConfig::default()));

    let out = output(target);
    assert!(out.starts_with("Loading player stats...\n"));
    assert!(out.contains("Alex  Rank #-"));
    assert!(out.contains("win rate  66.7%"));
    assert!(out.contains("streak    +2"));
    assert!(out.contains("Sumo  1200 ELO"));
  }

  #[test]
  fn test_render_error_and_notice() {
    let target = TerminalTarget::new(vec![]);
    target.notify("Please enter a player username");
    show_error(&target, "Failed to fetch player stats");
    target.show_status(&StatusView::unknown());

    assert_eq!(
      output(target),
      "! Please enter a player username\nerror: Failed to fetch player stats\nStatus Unknown  -\n"
    );
  }

  #[test]
  fn test_render_no_modes() {
    let target = TerminalTarget::new(vec![]);
    show_results(
      &target,
      &PlayerView::from_record(&PlayerRecord::new("Steve"), &SiteConfig::default()),
    );
    assert!(output(target).contains(NO_DATA_TEXT));
  }
}
