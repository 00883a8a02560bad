//! Submission workflow store.
//! 提交流程存储。
//!
//! Owns the draft accession, the uploaded-file ledger, the inventory rows and
//! the reference lists the form offers as choices. Every mutation takes the
//! state lock, changes it and lets go before any gateway call, so readers
//! always see a draft whose ledger total matches its file list.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use xfer_core::draft::InventoryRow;
use xfer_core::ports::{GatewayResult, ReferenceDataPort, SubmissionPort};
use xfer_core::submission::SubmissionPayload;
use xfer_core::{Draft, DraftField, FileRef, ReferenceData, SubmissionId, ValidationError};

use crate::error_channel::ErrorChannel;
use crate::sequence::{FetchOutcome, RequestSequence, Ticket};
use crate::stores::session::SessionStore;

/// Remote state of a file removed from the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDelete {
    Pending,
    Failed { reason: String },
}

/// Outcome of each list fetched by [`SubmissionStore::load_reference_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceLoadReport {
    pub genres: FetchOutcome,
    pub media_carriers: FetchOutcome,
    pub transfer_methods: FetchOutcome,
    pub record_types: FetchOutcome,
}

/// A remote delete and the removal that started it.
#[derive(Debug)]
struct TrackedDelete {
    ticket: Ticket,
    status: PendingDelete,
}

#[derive(Debug, Default)]
struct WorkflowState {
    draft: Draft,
    reference: ReferenceData,
    show_inventory: bool,
    pending_deletes: BTreeMap<String, TrackedDelete>,
}

#[derive(Debug, Default)]
struct Streams {
    genres: RequestSequence,
    media_carriers: RequestSequence,
    transfer_methods: RequestSequence,
    record_types: RequestSequence,
    identifier: RequestSequence,
    deletes: RequestSequence,
}

pub struct SubmissionStore {
    state: RwLock<WorkflowState>,
    streams: Streams,
    reference_port: Arc<dyn ReferenceDataPort>,
    submission_port: Arc<dyn SubmissionPort>,
    session: Arc<SessionStore>,
    errors: Arc<ErrorChannel>,
}

impl SubmissionStore {
    pub fn new(
        reference_port: Arc<dyn ReferenceDataPort>,
        submission_port: Arc<dyn SubmissionPort>,
        session: Arc<SessionStore>,
        errors: Arc<ErrorChannel>,
    ) -> Self {
        Self {
            state: RwLock::new(WorkflowState::default()),
            streams: Streams::default(),
            reference_port,
            submission_port,
            session,
            errors,
        }
    }

    // ---------------------------------------------------------------
    // Snapshots
    // ---------------------------------------------------------------

    pub async fn draft(&self) -> Draft {
        self.state.read().await.draft.clone()
    }

    pub async fn reference_data(&self) -> ReferenceData {
        self.state.read().await.reference.clone()
    }

    pub async fn submission_id(&self) -> Option<SubmissionId> {
        self.state.read().await.draft.identifier().cloned()
    }

    pub async fn digital_upload_size(&self) -> String {
        self.state.read().await.draft.digital_upload_size()
    }

    pub async fn pending_deletes(&self) -> BTreeMap<String, PendingDelete> {
        self.state
            .read()
            .await
            .pending_deletes
            .iter()
            .map(|(name, tracked)| (name.clone(), tracked.status.clone()))
            .collect()
    }

    // ---------------------------------------------------------------
    // Reference data
    // ---------------------------------------------------------------

    /// Fetch all four reference lists concurrently. Each list is emptied
    /// first and filled independently; one failure never blocks the others.
    #[tracing::instrument(name = "store.submission.load_reference_data", skip(self))]
    pub async fn load_reference_data(&self) -> ReferenceLoadReport {
        let (genres, media_carriers, transfer_methods, record_types) = tokio::join!(
            self.load_list(
                &self.streams.genres,
                self.reference_port.genres(),
                |r, v| r.genres = v,
                "Internal Error: Unable to get genres",
            ),
            self.load_list(
                &self.streams.media_carriers,
                self.reference_port.media_carriers(),
                |r, v| r.media_carriers = v,
                "Internal Error: Unable to get media carriers",
            ),
            self.load_list(
                &self.streams.transfer_methods,
                self.reference_port.transfer_methods(),
                |r, v| r.transfer_methods = v,
                "Internal Error: Unable to get transfer methods",
            ),
            self.load_list(
                &self.streams.record_types,
                self.reference_port.record_types(),
                |r, v| r.set_record_types(v),
                "Internal Error: Unable to get record types",
            ),
        );

        ReferenceLoadReport {
            genres,
            media_carriers,
            transfer_methods,
            record_types,
        }
    }

    async fn load_list<T, F>(
        &self,
        stream: &RequestSequence,
        fetch: F,
        store: fn(&mut ReferenceData, Vec<T>),
        failure: &str,
    ) -> FetchOutcome
    where
        F: Future<Output = GatewayResult<Vec<T>>>,
    {
        let ticket = stream.issue();
        store(&mut self.state.write().await.reference, Vec::new());

        let result = fetch.await;

        let mut state = self.state.write().await;
        if !stream.is_latest(ticket) {
            return FetchOutcome::Stale;
        }
        match result {
            Ok(items) => {
                debug!(count = items.len(), "reference list loaded");
                store(&mut state.reference, items);
                FetchOutcome::Applied
            }
            Err(err) => {
                drop(state);
                warn!(error = %err, "reference list fetch failed");
                self.errors.raise(failure).await;
                FetchOutcome::Failed
            }
        }
    }

    // ---------------------------------------------------------------
    // Identifier
    // ---------------------------------------------------------------

    /// Allocate a fresh submission identifier. Files can only be attached
    /// once it has arrived.
    #[tracing::instrument(name = "store.submission.request_identifier", skip(self))]
    pub async fn request_submission_identifier(&self) -> Result<FetchOutcome, ValidationError> {
        let ticket = {
            let mut state = self.state.write().await;
            if !state.draft.digital.uploaded_files().is_empty() {
                return Err(ValidationError::UploadsAttached);
            }
            state.draft.accession.identifier = None;
            self.streams.identifier.issue()
        };

        let result = self.submission_port.allocate_identifier().await;

        let mut state = self.state.write().await;
        if !self.streams.identifier.is_latest(ticket) {
            return Ok(FetchOutcome::Stale);
        }
        match result {
            Ok(id) => {
                info!(identifier = %id, "submission identifier allocated");
                state.draft.accession.identifier = Some(id);
                Ok(FetchOutcome::Applied)
            }
            Err(err) => {
                drop(state);
                warn!(error = %err, "identifier allocation failed");
                self.errors
                    .raise("Internal Error: Unable to get submission identifier")
                    .await;
                Ok(FetchOutcome::Failed)
            }
        }
    }

    // ---------------------------------------------------------------
    // Field access
    // ---------------------------------------------------------------

    pub async fn set_field(&self, field: DraftField) {
        self.state.write().await.draft.apply(field);
    }

    /// Write one nested field given as a dotted path such as `"physical.boxInfo"`.
    pub async fn set_field_by_path(&self, path: &str, value: Value) -> Result<(), ValidationError> {
        let field = DraftField::parse(path, value)?;
        self.set_field(field).await;
        Ok(())
    }

    pub async fn field_by_path(&self, path: &str) -> Result<Value, ValidationError> {
        self.state.read().await.draft.field_value(path)
    }

    pub async fn set_digital_transfer(&self, enabled: bool) {
        self.state.write().await.draft.digital_transfer = enabled;
    }

    pub async fn set_physical_transfer(&self, enabled: bool) {
        self.state.write().await.draft.physical_transfer = enabled;
    }

    /// Forget the media answers after "no digital copy" is chosen.
    pub async fn clear_physical_digital_info(&self) {
        self.state
            .write()
            .await
            .draft
            .physical
            .clear_digital_media_info();
    }

    // ---------------------------------------------------------------
    // Uploaded file ledger
    // ---------------------------------------------------------------

    pub async fn add_uploaded_file(&self, file: FileRef) -> Result<(), ValidationError> {
        let mut state = self.state.write().await;
        if state.draft.identifier().is_none() {
            return Err(ValidationError::MissingIdentifier);
        }
        let name = file.name.clone();
        state.draft.digital.add_file(file)?;
        state.pending_deletes.remove(&name);
        Ok(())
    }

    /// Remove a file from the ledger, then ask the server to drop the upload.
    ///
    /// The ledger change is final. A failed remote delete is only recorded
    /// in [`pending_deletes`](Self::pending_deletes). Only the removal that
    /// created an entry may resolve it.
    #[tracing::instrument(name = "store.submission.remove_uploaded_file", skip(self))]
    pub async fn remove_uploaded_file(&self, name: &str) -> Result<FileRef, ValidationError> {
        let (removed, key, ticket) = {
            let mut state = self.state.write().await;
            let key = state
                .draft
                .identifier()
                .cloned()
                .ok_or(ValidationError::MissingIdentifier)?;
            let removed = state.draft.digital.remove_file(name)?;
            let tracked = TrackedDelete {
                ticket: self.streams.deletes.issue(),
                status: PendingDelete::Pending,
            };
            let ticket = tracked.ticket;
            state.pending_deletes.insert(removed.name.clone(), tracked);
            (removed, key, ticket)
        };

        let result = self.submission_port.delete_upload(&removed.name, &key).await;

        let mut state = self.state.write().await;
        // The name may have been uploaded and removed again while this delete was in flight.
        let owned = state
            .pending_deletes
            .get(&removed.name)
            .is_some_and(|tracked| tracked.ticket == ticket);
        if !owned {
            debug!(file = %removed.name, "delete superseded, response ignored");
            return Ok(removed);
        }
        match result {
            Ok(()) => {
                state.pending_deletes.remove(&removed.name);
            }
            Err(err) => {
                warn!(file = %removed.name, error = %err, "remote delete failed, upload orphaned");
                if let Some(tracked) = state.pending_deletes.get_mut(&removed.name) {
                    tracked.status = PendingDelete::Failed {
                        reason: err.to_string(),
                    };
                }
            }
        }
        Ok(removed)
    }

    // ---------------------------------------------------------------
    // Inventory
    // ---------------------------------------------------------------

    pub async fn add_inventory_row(&self) -> usize {
        self.state.write().await.draft.physical.add_inventory_row()
    }

    pub async fn update_inventory_row(
        &self,
        index: usize,
        row: InventoryRow,
    ) -> Result<(), ValidationError> {
        self.state
            .write()
            .await
            .draft
            .physical
            .update_inventory_row(index, row)
    }

    pub async fn delete_inventory_row(&self, index: usize) -> Result<InventoryRow, ValidationError> {
        self.state
            .write()
            .await
            .draft
            .physical
            .delete_inventory_row(index)
    }

    pub async fn clear_inventory(&self) {
        self.state.write().await.draft.physical.clear_inventory();
    }

    pub async fn inventory_count(&self) -> usize {
        self.state.read().await.draft.physical.inventory().len()
    }

    pub async fn inventory_row(&self, index: usize) -> Option<InventoryRow> {
        self.state
            .read()
            .await
            .draft
            .physical
            .inventory_row(index)
            .cloned()
    }

    pub async fn toggle_inventory(&self) -> bool {
        let mut state = self.state.write().await;
        state.show_inventory = !state.show_inventory;
        state.show_inventory
    }

    pub async fn show_inventory(&self) -> bool {
        self.state.read().await.show_inventory
    }

    // ---------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------

    /// Back to an empty draft. Reference data is kept; delete records of the
    /// old draft are dropped and any delete still in flight is ignored.
    pub async fn reset_draft(&self) {
        let mut state = self.state.write().await;
        state.draft = Draft::default();
        state.show_inventory = false;
        state.pending_deletes.clear();
        debug!("draft reset");
    }

    /// Send the draft. Local checks fail the call before anything is sent; a
    /// server failure goes to the error channel and keeps the draft.
    #[tracing::instrument(name = "store.submission.submit", skip(self))]
    pub async fn submit(&self) -> Result<FetchOutcome, ValidationError> {
        let user = self
            .session
            .current_user()
            .await
            .ok_or(ValidationError::MissingUser)?;
        let payload = {
            let state = self.state.read().await;
            SubmissionPayload::from_draft(&state.draft, &user)?
        };

        self.session.set_loading(true);
        let result = self.submission_port.submit(&payload).await;
        self.session.set_loading(false);

        match result {
            Ok(()) => {
                info!(identifier = %payload.identifier, "accession submitted");
                self.reset_draft().await;
                Ok(FetchOutcome::Applied)
            }
            Err(err) => {
                self.errors
                    .raise(err.user_message("Internal Error: Unable to submit accession"))
                    .await;
                Ok(FetchOutcome::Failed)
            }
        }
    }
}
