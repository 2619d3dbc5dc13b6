use crate::collection::{ApplicationCollection, CollectionSnapshot};
use crate::models::{ApplicationInput, ApplicationRecord, RecordId};
use crate::{log_debug, log_error, log_info, log_warn};

use super::{RecordStore, SyncError};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
}

impl MutationKind {
    fn verb(&self) -> &'static str {
        match self {
            MutationKind::Create => "add",
            MutationKind::Update => "update",
        }
    }
}

/// Result of a create or update, which is a write followed by a mandatory
/// refetch. The two phases fail independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Write accepted and the collection reloaded.
    Written { kind: MutationKind },
    /// Write accepted, but the reload failed; the collection is stale.
    WrittenButRefreshFailed { kind: MutationKind, error: SyncError },
    /// Nothing was written; the collection is untouched.
    WriteFailed { kind: MutationKind, error: SyncError },
}

impl MutationOutcome {
    pub fn kind(&self) -> MutationKind {
        match self {
            MutationOutcome::Written { kind }
            | MutationOutcome::WrittenButRefreshFailed { kind, .. }
            | MutationOutcome::WriteFailed { kind, .. } => *kind,
        }
    }

    /// Whether the Record Store accepted the write.
    pub fn is_written(&self) -> bool {
        !matches!(self, MutationOutcome::WriteFailed { .. })
    }

    pub fn error(&self) -> Option<&SyncError> {
        match self {
            MutationOutcome::Written { .. } => None,
            MutationOutcome::WrittenButRefreshFailed { error, .. }
            | MutationOutcome::WriteFailed { error, .. } => Some(error),
        }
    }

    /// Text for the blocking notification shown to the user, if any.
    pub fn user_message(&self) -> Option<String> {
        match self {
            MutationOutcome::Written { .. } => None,
            MutationOutcome::WrittenButRefreshFailed { kind, error } => Some(format!(
                "Application {} likely succeeded, refresh failed: {error}",
                kind.verb()
            )),
            MutationOutcome::WriteFailed { kind, error } => {
                Some(format!("Failed to {} application: {error}", kind.verb()))
            }
        }
    }
}

/// Performs CRUD against the Record Store and keeps the shared collection
/// in step with it.
///
/// Create and update always reload the whole collection afterwards, since
/// the store assigns ids and timestamps. Delete removes the row locally
/// instead; its effect is fully known.
#[derive(Clone)]
pub struct SyncClient<S> {
    store: S,
    collection: ApplicationCollection,
}

impl<S: RecordStore> SyncClient<S> {
    pub fn new(store: S, collection: ApplicationCollection) -> Self {
        Self { store, collection }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn collection(&self) -> &ApplicationCollection {
        &self.collection
    }

    /// Reloads every record and replaces the collection with the result.
    ///
    /// Overlapping fetches are applied in completion order; whichever
    /// finishes last wins. No retry on failure.
    pub async fn fetch_all(&self) -> Result<CollectionSnapshot, SyncError> {
        match self.store.list().await {
            Ok(records) => Ok(self.collection.replace(records)),
            Err(err) => {
                log_error!("Error fetching applications: {err}");
                Err(err)
            }
        }
    }

    /// Reads one record straight from the store without touching the
    /// collection.
    pub async fn fetch_one(&self, id: &RecordId) -> Result<Option<ApplicationRecord>, SyncError> {
        let record = self.store.get(id).await?;
        log_debug!("Fetched application {id} (found: {})", record.is_some());
        Ok(record)
    }

    pub async fn create(&self, input: &ApplicationInput) -> MutationOutcome {
        let kind = MutationKind::Create;
        if let Err(reason) = input.validate() {
            return MutationOutcome::WriteFailed {
                kind,
                error: SyncError::Invalid(reason),
            };
        }

        if let Err(error) = self.store.create(input).await {
            log_error!("Error adding application: {error}");
            return MutationOutcome::WriteFailed { kind, error };
        }

        log_info!("Created application for {}", input.company);
        self.refresh_after(kind).await
    }

    pub async fn update(&self, id: &RecordId, input: &ApplicationInput) -> MutationOutcome {
        let kind = MutationKind::Update;
        if let Err(reason) = input.validate() {
            return MutationOutcome::WriteFailed {
                kind,
                error: SyncError::Invalid(reason),
            };
        }

        if let Err(error) = self.store.update(id, input).await {
            log_error!("Error updating application {id}: {error}");
            return MutationOutcome::WriteFailed { kind, error };
        }

        log_info!("Updated application {id}");
        self.refresh_after(kind).await
    }

    /// Deletes remotely, then drops the row from the local collection
    /// without a refetch.
    ///
    /// A fetch that was already in flight may still land afterwards and
    /// bring the row back until the next refresh.
    pub async fn remove(&self, id: &RecordId) -> Result<(), SyncError> {
        if let Err(err) = self.store.delete(id).await {
            log_error!("Error deleting application {id}: {err}");
            return Err(err);
        }

        if self.collection.remove(id).is_none() {
            log_warn!("Deleted application {id} was not in the local collection");
        }
        Ok(())
    }

    async fn refresh_after(&self, kind: MutationKind) -> MutationOutcome {
        match self.fetch_all().await {
            Ok(_) => MutationOutcome::Written { kind },
            Err(error) => {
                log_warn!("Application {} stored but refresh failed: {error}", kind.verb());
                MutationOutcome::WrittenButRefreshFailed { kind, error }
            }
        }
    }
}
