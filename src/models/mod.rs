pub mod application;
pub mod status;
pub mod window;

pub use application::{AppliedOn, ApplicationInput, ApplicationRecord, RecordId};
pub use status::ApplicationStatus;
pub use window::DateWindow;
