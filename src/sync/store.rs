use std::future::Future;

use crate::models::{ApplicationInput, ApplicationRecord, RecordId};

use super::SyncError;

/// Remote authoritative store of application records.
///
/// Implementations only move data; refetch-after-write and local collection
/// updates are the sync client's job.
pub trait RecordStore: Send + Sync {
    /// `GET {base}`
    fn list(&self) -> impl Future<Output = Result<Vec<ApplicationRecord>, SyncError>> + Send;

    /// `GET {base}/{id}`; a 404 is `Ok(None)`.
    fn get(
        &self,
        id: &RecordId,
    ) -> impl Future<Output = Result<Option<ApplicationRecord>, SyncError>> + Send;

    /// `POST {base}`
    fn create(&self, input: &ApplicationInput) -> impl Future<Output = Result<(), SyncError>> + Send;

    /// `PUT {base}/{id}`
    fn update(
        &self,
        id: &RecordId,
        input: &ApplicationInput,
    ) -> impl Future<Output = Result<(), SyncError>> + Send;

    /// `DELETE {base}/{id}`
    fn delete(&self, id: &RecordId) -> impl Future<Output = Result<(), SyncError>> + Send;
}
