use parking_lot::Mutex;
use std::collections::BTreeMap;

use crate::view::{ModeSection, PlayerView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Panel {
  Loading,
  Error,
  Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
  AvatarSource,
  AvatarAlt,
  Name,
  Rank,
  TotalWins,
  TotalLosses,
  WinRate,
  Streak,
  ErrorMessage,
}

/// The display slots a search writes into.
///
/// Implementations own the slots; the pipeline only changes their content
/// and visibility.
pub trait RenderTarget: Send + Sync {
  /// Blocking notice, shown without touching any panel.
  fn notify(&self, message: &str);
  fn set_visible(&self, panel: Panel, visible: bool);
  fn set_text(&self, slot: Slot, text: &str);
  /// Replaces the whole game mode container.
  fn replace_game_modes(&self, modes: &ModeSection);
}

impl<T: RenderTarget + ?Sized> RenderTarget for std::sync::Arc<T> {
  fn notify(&self, message: &str) {
    (**self).notify(message)
  }

  fn set_visible(&self, panel: Panel, visible: bool) {
    (**self).set_visible(panel, visible)
  }

  fn set_text(&self, slot: Slot, text: &str) {
    (**self).set_text(slot, text)
  }

  fn replace_game_modes(&self, modes: &ModeSection) {
    (**self).replace_game_modes(modes)
  }
}

pub fn show_loading<T: RenderTarget + ?Sized>(target: &T) {
  target.set_visible(Panel::Loading, true);
  target.set_visible(Panel::Error, false);
  target.set_visible(Panel::Results, false);
}

pub fn show_error<T: RenderTarget + ?Sized>(target: &T, message: &str) {
  target.set_visible(Panel::Loading, false);
  target.set_text(Slot::ErrorMessage, message);
  target.set_visible(Panel::Error, true);
}

pub fn show_results<T: RenderTarget + ?Sized>(target: &T, view: &PlayerView) {
  target.set_visible(Panel::Loading, false);
  display_player_stats(target, view);
  target.set_visible(Panel::Results, true);
}

/// Writes every slot of `view` into `target`. No network access.
pub fn display_player_stats<T: RenderTarget + ?Sized>(target: &T, view: &PlayerView) {
  target.set_text(Slot::AvatarSource, &view.avatar_url);
  target.set_text(Slot::AvatarAlt, &view.avatar_alt);
  target.set_text(Slot::Name, &view.name);
  target.set_text(Slot::Rank, &view.rank);
  target.set_text(Slot::TotalWins, &view.total_wins);
  target.set_text(Slot::TotalLosses, &view.total_losses);
  target.set_text(Slot::WinRate, &view.win_rate);
  target.set_text(Slot::Streak, &view.streak);
  target.replace_game_modes(&view.modes);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
  pub loading: bool,
  pub error: bool,
  pub results: bool,
  pub texts: BTreeMap<Slot, String>,
  pub modes: Option<ModeSection>,
  pub notices: Vec<String>,
  pub transitions: Vec<(Panel, bool)>,
}

impl BoardState {
  pub fn text(&self, slot: Slot) -> Option<&str> {
    self.texts.get(&slot).map(String::as_str)
  }

  pub fn is_visible(&self, panel: Panel) -> bool {
    match panel {
      Panel::Loading => self.loading,
      Panel::Error => self.error,
      Panel::Results => self.results,
    }
  }
}

/// In-memory slots. Records every write so the final display can be
/// inspected without a terminal.
#[derive(Debug, Default)]
pub struct SlotBoard {
  state: Mutex<BoardState>,
}

impl SlotBoard {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn snapshot(&self) -> BoardState {
    self.state.lock().clone()
  }
}

impl RenderTarget for SlotBoard {
  fn notify(&self, message: &str) {
    self.state.lock().notices.push(message.to_string());
  }

  fn set_visible(&self, panel: Panel, visible: bool) {
    let mut state = self.state.lock();
    match panel {
      Panel::Loading => state.loading = visible,
      Panel::Error => state.error = visible,
      Panel::Results => state.results = visible,
    }
    state.transitions.push((panel, visible));
  }

  fn set_text(&self, slot: Slot, text: &str) {
    self.state.lock().texts.insert(slot, text.to_string());
  }

  fn replace_game_modes(&self, modes: &ModeSection) {
    self.state.lock().modes.replace(modes.clone());
  }
}
