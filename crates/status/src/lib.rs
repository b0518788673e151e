pub mod api;
pub mod error;
pub mod poller;
pub mod view;

pub use api::{HttpStatusApi, Players, ServerStatus, StatusApi};
pub use poller::{StatusPoller, StatusTarget};
pub use view::{StatusTone, StatusView};
