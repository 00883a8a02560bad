use super::id_macro::impl_text_id;

/// Server-allocated identifier for an in-progress submission.
/// 服务端分配的提交标识符。
///
/// Uploaded files live in a server directory named after this identifier, so
/// every upload and upload deletion is keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionId(String);

impl_text_id!(SubmissionId);

impl SubmissionId {
    /// Parse the body of `GET /api/identifier`.
    ///
    /// The endpoint answers with plain text, but a JSON scalar (`"abc"` or
    /// `42`) is accepted as well. Returns `None` for a blank body.
    pub fn parse_response(body: &str) -> Option<Self> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(id) = serde_json::from_str::<SubmissionId>(trimmed) {
            return (!id.is_empty()).then_some(id);
        }
        Some(Self(trimmed.to_string()))
    }
}
