//! Remote gateway ports - one best-effort round trip per call.
//!
//! Implementations must not retry or cache. The caller decides the fallback.

use async_trait::async_trait;
use thiserror::Error;

use crate::admin::{AccessionDetail, AccessionsPage, NewNote, Note, PageQuery};
use crate::ids::{AccessionId, SubmissionId};
use crate::reference::{Genre, MediaCarrier, RecordType, TransferMethod};
use crate::submission::SubmissionPayload;
use crate::user::{NewUser, User};

/// Typed failure of a gateway call.
/// 远程调用的类型化失败。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No response: connection refused, DNS, TLS, timeout.
    #[error("service unreachable: {0}")]
    Unreachable(String),

    /// A response arrived but it is not a usable success.
    ///
    /// Undecodable success bodies land here too, with the decode error as
    /// `body`.
    #[error("server error {status}: {body}")]
    ServerError { status: u16, body: String },
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::ServerError { status: 404, .. })
    }

    /// Message for the error banner: the server's own text when it sent one,
    /// `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            GatewayError::ServerError { body, .. } if !body.trim().is_empty() => {
                body.trim().to_string()
            }
            _ => fallback.to_string(),
        }
    }
}

/// Lookup lists used to populate form choices.
#[async_trait]
pub trait ReferenceDataPort: Send + Sync {
    /// `GET /api/genres`
    async fn genres(&self) -> GatewayResult<Vec<Genre>>;

    /// `GET /api/media-carriers`
    async fn media_carriers(&self) -> GatewayResult<Vec<MediaCarrier>>;

    /// `GET /api/transfer-methods`
    async fn transfer_methods(&self) -> GatewayResult<Vec<TransferMethod>>;

    /// `GET /api/types`
    async fn record_types(&self) -> GatewayResult<Vec<RecordType>>;
}

/// Submission lifecycle calls.
#[async_trait]
pub trait SubmissionPort: Send + Sync {
    /// `GET /api/identifier`
    async fn allocate_identifier(&self) -> GatewayResult<SubmissionId>;

    /// `DELETE /api/upload/{filename}?key={identifier}`
    async fn delete_upload(&self, filename: &str, key: &SubmissionId) -> GatewayResult<()>;

    /// `POST /api/submit`
    async fn submit(&self, payload: &SubmissionPayload) -> GatewayResult<()>;
}

/// Administrative browsing calls. All of them require the admin session.
#[async_trait]
pub trait AdminAccessionPort: Send + Sync {
    /// `GET /api/admin/accessions?page=&q=&g=`
    async fn list_accessions(&self, query: &PageQuery) -> GatewayResult<AccessionsPage>;

    /// `GET /api/admin/accessions/{id}`
    async fn accession_detail(&self, id: AccessionId) -> GatewayResult<AccessionDetail>;

    /// `GET /api/admin/accessions/{id}/notes`
    async fn accession_notes(&self, id: AccessionId) -> GatewayResult<Vec<Note>>;

    /// `POST /api/admin/accessions/{id}/notes`
    async fn add_note(&self, id: AccessionId, note: &NewNote) -> GatewayResult<Note>;
}

/// Submitter account calls.
#[async_trait]
pub trait AccountPort: Send + Sync {
    /// `GET /api/users/lookup?email=`; a 404 means no such user.
    async fn lookup_user(&self, email: &str) -> GatewayResult<User>;

    /// `POST /api/users`
    async fn register_user(&self, user: &NewUser) -> GatewayResult<User>;

    /// `POST /api/verify/{token}`
    async fn verify_user(&self, token: &str) -> GatewayResult<User>;

    /// `POST /api/resend/verification` with `{"token": ...}`; a 404 means the
    /// token belongs to nobody.
    async fn resend_verification(&self, token: &str) -> GatewayResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_body() {
        let err = GatewayError::ServerError {
            status: 400,
            body: "note body is required\n".into(),
        };
        assert_eq!(err.user_message("fallback"), "note body is required");
    }

    #[test]
    fn user_message_falls_back_when_unreachable_or_blank() {
        let unreachable = GatewayError::Unreachable("connection refused".into());
        assert_eq!(unreachable.user_message("fallback"), "fallback");

        let blank = GatewayError::ServerError {
            status: 500,
            body: " ".into(),
        };
        assert_eq!(blank.user_message("fallback"), "fallback");
    }

    #[test]
    fn not_found_is_a_404_server_error() {
        assert!(GatewayError::ServerError {
            status: 404,
            body: String::new()
        }
        .is_not_found());
        assert!(!GatewayError::Unreachable("x".into()).is_not_found());
    }
}
