pub mod controller;
pub mod events;
pub mod state;

pub use controller::Tracker;
pub use events::{Notice, NoticeLevel, TrackerEvent};
pub use state::DashboardState;
