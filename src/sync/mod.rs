pub mod client;
pub mod error;
pub mod http;
pub mod memory;
pub mod store;

pub use client::{MutationKind, MutationOutcome, SyncClient};
pub use error::SyncError;
pub use http::HttpRecordStore;
pub use memory::MemoryRecordStore;
pub use store::RecordStore;
