use super::id_macro::impl_text_id;

/// Identifier of a controlled vocabulary entry (genre, record type, media
/// carrier, transfer method).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VocabId(String);

impl_text_id!(VocabId);
