//! Shared mocks and fixtures for the store integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mockall::mock;
use xfer_app::{ErrorChannel, SessionStore};
use xfer_core::admin::{NewNote, PageQuery};
use xfer_core::ports::{
    AccountPort, AdminAccessionPort, AdminSessionPort, GatewayResult, ReferenceDataPort,
    SessionCredential, SessionCredentialPort, SubmissionPort,
};
use xfer_core::reference::{Genre, MediaCarrier, RecordType, TransferMethod};
use xfer_core::submission::SubmissionPayload;
use xfer_core::user::NewUser;
use xfer_core::{
    AccessionDetail, AccessionId, AccessionSummary, AccessionsPage, Note, NoteId, SubmissionId,
    User, UserId,
};

mock! {
    pub Reference {}

    #[async_trait]
    impl ReferenceDataPort for Reference {
        async fn genres(&self) -> GatewayResult<Vec<Genre>>;
        async fn media_carriers(&self) -> GatewayResult<Vec<MediaCarrier>>;
        async fn transfer_methods(&self) -> GatewayResult<Vec<TransferMethod>>;
        async fn record_types(&self) -> GatewayResult<Vec<RecordType>>;
    }
}

mock! {
    pub Submission {}

    #[async_trait]
    impl SubmissionPort for Submission {
        async fn allocate_identifier(&self) -> GatewayResult<SubmissionId>;
        async fn delete_upload(&self, filename: &str, key: &SubmissionId) -> GatewayResult<()>;
        async fn submit(&self, payload: &SubmissionPayload) -> GatewayResult<()>;
    }
}

mock! {
    pub Admin {}

    #[async_trait]
    impl AdminAccessionPort for Admin {
        async fn list_accessions(&self, query: &PageQuery) -> GatewayResult<AccessionsPage>;
        async fn accession_detail(&self, id: AccessionId) -> GatewayResult<AccessionDetail>;
        async fn accession_notes(&self, id: AccessionId) -> GatewayResult<Vec<Note>>;
        async fn add_note(&self, id: AccessionId, note: &NewNote) -> GatewayResult<Note>;
    }
}

mock! {
    pub Accounts {}

    #[async_trait]
    impl AccountPort for Accounts {
        async fn lookup_user(&self, email: &str) -> GatewayResult<User>;
        async fn register_user(&self, user: &NewUser) -> GatewayResult<User>;
        async fn verify_user(&self, token: &str) -> GatewayResult<User>;
        async fn resend_verification(&self, token: &str) -> GatewayResult<()>;
    }
}

/// Credential source that hands out its credential once.
#[derive(Default)]
pub struct OneShotCredential(pub Mutex<Option<SessionCredential>>);

#[async_trait]
impl SessionCredentialPort for OneShotCredential {
    async fn take(&self) -> anyhow::Result<Option<SessionCredential>> {
        Ok(self.0.lock().unwrap().take())
    }
}

#[derive(Default)]
pub struct RecordingAdminSession(pub Mutex<Option<String>>);

impl AdminSessionPort for RecordingAdminSession {
    fn set_admin_session(&self, session: Option<String>) {
        *self.0.lock().unwrap() = session;
    }

    fn has_admin_session(&self) -> bool {
        self.0.lock().unwrap().is_some()
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

pub fn errors() -> Arc<ErrorChannel> {
    Arc::new(ErrorChannel::new(Duration::from_secs(10)))
}

pub fn session(errors: &Arc<ErrorChannel>) -> Arc<SessionStore> {
    Arc::new(SessionStore::new(Arc::new(MockAccounts::new()), errors.clone()))
}

pub fn archivist() -> User {
    User {
        id: Some(UserId::new(3)),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@virginia.edu".into(),
        authenticated: true,
        ..User::default()
    }
}

pub fn summary(id: i64, submitter: &str) -> AccessionSummary {
    AccessionSummary {
        id: AccessionId::new(id),
        accession_id: SubmissionId::from(format!("sub{id}")),
        submitter: submitter.into(),
        description: "Papers".into(),
        accession_type: "new".into(),
        genres: "Letters".into(),
        digital: true,
        physical: false,
        submitted_at: None,
    }
}

pub fn page(total: u64, filtered: u64, page: u32, size: u32, rows: Vec<AccessionSummary>) -> AccessionsPage {
    AccessionsPage {
        total,
        filtered_total: filtered,
        page,
        page_size: size,
        accessions: rows,
    }
}

pub fn detail(id: i64) -> AccessionDetail {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "identifier": format!("sub{id}"),
        "summary": "Minutes of the board",
        "createdAt": null
    }))
    .unwrap()
}

pub fn note(id: i64, body: &str) -> Note {
    Note {
        id: NoteId::new(id),
        user_id: UserId::new(3),
        body: body.into(),
        title: String::new(),
        user_name: "Ada Lovelace".into(),
        created_at: Utc.with_ymd_and_hms(2019, 4, 10, 14, 0, 0).unwrap(),
    }
}
