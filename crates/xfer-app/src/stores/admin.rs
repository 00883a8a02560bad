//! Admin browse store: the paginated accession list, one accession detail and
//! its note thread.
//! 管理端浏览存储。

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use xfer_core::admin::{NewNote, PageWindow};
use xfer_core::ports::AdminAccessionPort;
use xfer_core::{AccessionDetail, AccessionId, AccessionSummary, Note, PageMove, ValidationError};

use crate::error_channel::ErrorChannel;
use crate::sequence::{FetchOutcome, RequestSequence};
use crate::stores::session::SessionStore;

/// A filter change for the accession list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFilter {
    Query(String),
    Genre(String),
}

#[derive(Debug, Default)]
struct BrowseState {
    window: PageWindow,
    accessions: Vec<AccessionSummary>,
    detail: Option<AccessionDetail>,
    notes: Vec<Note>,
    adding_note: bool,
    working: bool,
}

#[derive(Debug, Default)]
struct Streams {
    page: RequestSequence,
    detail: RequestSequence,
    notes: RequestSequence,
}

pub struct AdminStore {
    state: RwLock<BrowseState>,
    streams: Streams,
    port: Arc<dyn AdminAccessionPort>,
    session: Arc<SessionStore>,
    errors: Arc<ErrorChannel>,
}

impl AdminStore {
    pub fn new(
        port: Arc<dyn AdminAccessionPort>,
        session: Arc<SessionStore>,
        errors: Arc<ErrorChannel>,
    ) -> Self {
        Self {
            state: RwLock::new(BrowseState::default()),
            streams: Streams::default(),
            port,
            session,
            errors,
        }
    }

    pub async fn window(&self) -> PageWindow {
        self.state.read().await.window.clone()
    }

    pub async fn accessions(&self) -> Vec<AccessionSummary> {
        self.state.read().await.accessions.clone()
    }

    pub async fn detail(&self) -> Option<AccessionDetail> {
        self.state.read().await.detail.clone()
    }

    pub async fn notes(&self) -> Vec<Note> {
        self.state.read().await.notes.clone()
    }

    pub async fn has_notes(&self) -> bool {
        !self.state.read().await.notes.is_empty()
    }

    pub async fn is_working(&self) -> bool {
        self.state.read().await.working
    }

    pub async fn is_adding_note(&self) -> bool {
        self.state.read().await.adding_note
    }

    pub async fn set_adding_note(&self, adding: bool) {
        self.state.write().await.adding_note = adding;
    }

    // ---------------------------------------------------------------
    // Accession list
    // ---------------------------------------------------------------

    /// Fetch the window for the current page and filters. The response
    /// replaces the list; a failure leaves the previous list in place.
    pub async fn fetch_page(&self) -> FetchOutcome {
        self.fetch_with(|_| {}).await
    }

    /// Apply `change` to the window and fetch the result. The change, the
    /// ticket and the query snapshot share one write guard, so no response
    /// can land between them.
    #[tracing::instrument(name = "store.admin.fetch_page", skip_all)]
    async fn fetch_with(&self, change: impl FnOnce(&mut PageWindow)) -> FetchOutcome {
        let (ticket, query) = {
            let mut state = self.state.write().await;
            change(&mut state.window);
            (self.streams.page.issue(), state.window.to_query())
        };
        self.session.set_loading(true);

        let result = self.port.list_accessions(&query).await;

        let mut state = self.state.write().await;
        if !self.streams.page.is_latest(ticket) {
            debug!(page = query.page, "discarding stale page response");
            return FetchOutcome::Stale;
        }
        self.session.set_loading(false);
        match result {
            Ok(page) => {
                debug!(
                    page = page.page,
                    total = page.total,
                    filtered = page.filtered_total,
                    "accession page loaded"
                );
                state.window.absorb(&page);
                state.accessions = page.accessions;
                FetchOutcome::Applied
            }
            Err(err) => {
                drop(state);
                warn!(error = %err, "accession page fetch failed");
                self.errors
                    .raise("Internal Error: Unable to get accessions")
                    .await;
                FetchOutcome::Failed
            }
        }
    }

    /// Move the cursor (clamped to `[1, last_page]`) and fetch.
    pub async fn go_to(&self, movement: PageMove) -> FetchOutcome {
        self.fetch_with(|window| window.apply(movement)).await
    }

    pub async fn first_page(&self) -> FetchOutcome {
        self.go_to(PageMove::First).await
    }

    pub async fn prev_page(&self) -> FetchOutcome {
        self.go_to(PageMove::Prev).await
    }

    pub async fn next_page(&self) -> FetchOutcome {
        self.go_to(PageMove::Next).await
    }

    pub async fn last_page(&self) -> FetchOutcome {
        self.go_to(PageMove::Last).await
    }

    /// Change one filter, go back to page 1 and fetch.
    pub async fn set_filter(&self, filter: PageFilter) -> FetchOutcome {
        self.fetch_with(|window| match filter {
            PageFilter::Query(query) => window.set_query(query),
            PageFilter::Genre(genre) => window.set_genre(genre),
        })
        .await
    }

    pub async fn set_query(&self, query: impl Into<String>) -> FetchOutcome {
        self.set_filter(PageFilter::Query(query.into())).await
    }

    pub async fn set_genre_filter(&self, genre: impl Into<String>) -> FetchOutcome {
        self.set_filter(PageFilter::Genre(genre.into())).await
    }

    /// Drop both filters and fetch page 1.
    pub async fn reset_search(&self) -> FetchOutcome {
        self.fetch_with(PageWindow::reset_filters).await
    }

    // ---------------------------------------------------------------
    // Detail and notes
    // ---------------------------------------------------------------

    /// Load one accession, then its notes. The previous detail is cleared
    /// before the request goes out.
    #[tracing::instrument(name = "store.admin.fetch_detail", skip(self), fields(accession_id = %id))]
    pub async fn fetch_detail(&self, id: AccessionId) -> FetchOutcome {
        let ticket = {
            let mut state = self.state.write().await;
            state.detail = None;
            state.notes.clear();
            state.adding_note = false;
            // Any notes still in flight belong to the previous detail.
            self.streams.notes.issue();
            self.streams.detail.issue()
        };
        self.session.set_loading(true);

        let result = self.port.accession_detail(id).await;

        {
            let mut state = self.state.write().await;
            if !self.streams.detail.is_latest(ticket) {
                return FetchOutcome::Stale;
            }
            self.session.set_loading(false);
            match result {
                Ok(detail) => state.detail = Some(detail),
                Err(err) => {
                    drop(state);
                    warn!(error = %err, "accession detail fetch failed");
                    self.errors
                        .raise("Internal Error: Unable to get accession detail")
                        .await;
                    return FetchOutcome::Failed;
                }
            }
        }

        self.fetch_notes(id).await;
        FetchOutcome::Applied
    }

    /// Replace the notes of the loaded accession. Responses for any other
    /// accession, or superseded by a newer request, are dropped.
    #[tracing::instrument(name = "store.admin.fetch_notes", skip(self), fields(accession_id = %id))]
    pub async fn fetch_notes(&self, id: AccessionId) -> FetchOutcome {
        let ticket = self.streams.notes.issue();

        let result = self.port.accession_notes(id).await;

        let mut state = self.state.write().await;
        let loaded = state.detail.as_ref().map(|d| d.id);
        if !self.streams.notes.is_latest(ticket) || loaded != Some(id) {
            debug!("discarding stale notes response");
            return FetchOutcome::Stale;
        }
        match result {
            Ok(notes) => {
                state.notes = notes;
                FetchOutcome::Applied
            }
            Err(err) => {
                drop(state);
                warn!(error = %err, "accession notes fetch failed");
                self.errors
                    .raise("Internal Error: Unable to get accession notes")
                    .await;
                FetchOutcome::Failed
            }
        }
    }

    /// Attach a note to the loaded accession as the current user.
    ///
    /// Fails locally, before any call, without an authenticated user or a
    /// loaded accession, or while another note is being saved.
    #[tracing::instrument(name = "store.admin.add_note", skip_all)]
    pub async fn add_note(&self, body: &str) -> Result<FetchOutcome, ValidationError> {
        let user = self
            .session
            .current_user()
            .await
            .filter(|user| user.authenticated)
            .ok_or(ValidationError::NotAuthenticated)?;
        let user_id = user.id.ok_or(ValidationError::NotAuthenticated)?;
        let body = body.trim();
        if body.is_empty() {
            return Err(ValidationError::MissingField("note"));
        }

        let accession = {
            let mut state = self.state.write().await;
            let accession = state
                .detail
                .as_ref()
                .map(|d| d.id)
                .ok_or(ValidationError::NoAccessionLoaded)?;
            if state.working {
                return Err(ValidationError::Busy);
            }
            state.working = true;
            accession
        };

        let note = NewNote {
            body: body.to_string(),
            user_id,
        };
        let result = self.port.add_note(accession, &note).await;

        let mut state = self.state.write().await;
        state.working = false;
        match result {
            Ok(created) => {
                info!(accession_id = %accession, note_id = %created.id, "note added");
                state.adding_note = false;
                if state.detail.as_ref().map(|d| d.id) == Some(accession) {
                    state.notes.push(created);
                }
                Ok(FetchOutcome::Applied)
            }
            Err(err) => {
                drop(state);
                self.errors
                    .raise(err.user_message("Internal Error: Unable to add note"))
                    .await;
                Ok(FetchOutcome::Failed)
            }
        }
    }
}
