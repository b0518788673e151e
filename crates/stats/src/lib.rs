pub mod api;
pub mod error;
pub mod format;
mod pipeline;
pub mod render;
pub mod types;
pub mod view;

pub use api::{HttpStatsApi, StatsApi};
pub use pipeline::{SearchOutcome, StatsPipeline, EMPTY_INPUT_NOTICE, FETCH_FAILED_MESSAGE};
pub use render::{display_player_stats, Panel, RenderTarget, Slot, SlotBoard};
pub use types::{GameModeRecord, PlayerRecord};
pub use view::{GameModeCard, ModeSection, PlayerView, NO_DATA_TEXT};
