//! Server-owned lookup lists used to populate form choices.

use serde::{Deserialize, Serialize};

use crate::ids::VocabId;

/// A controlled vocabulary entry: genre, media carrier or transfer method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub id: VocabId,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl VocabEntry {
    pub fn new(id: impl Into<VocabId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
        }
    }
}

pub type Genre = VocabEntry;
pub type MediaCarrier = VocabEntry;
pub type TransferMethod = VocabEntry;

/// A record type. `digital_only` decides which transfer form offers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordType {
    pub id: VocabId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub digital_only: bool,
}

/// Every reference list the submission workflow needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    pub genres: Vec<Genre>,
    pub media_carriers: Vec<MediaCarrier>,
    pub transfer_methods: Vec<TransferMethod>,
    pub digital_record_types: Vec<RecordType>,
    pub physical_record_types: Vec<RecordType>,
}

impl ReferenceData {
    /// Replace both record type lists, bucketing by `digital_only`.
    pub fn set_record_types(&mut self, types: Vec<RecordType>) {
        let (digital, physical) = types.into_iter().partition(|rt| rt.digital_only);
        self.digital_record_types = digital;
        self.physical_record_types = physical;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_types_are_bucketed_by_digital_only() {
        let raw = r#"[
            {"id":"1","name":"Email","description":"","digitalOnly":true},
            {"id":"2","name":"Correspondence"},
            {"id":3,"name":"Websites","digitalOnly":true}
        ]"#;
        let types: Vec<RecordType> = serde_json::from_str(raw).unwrap();
        let mut data = ReferenceData::default();
        data.set_record_types(types);

        let digital: Vec<_> = data.digital_record_types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(digital, vec!["Email", "Websites"]);
        assert_eq!(data.physical_record_types.len(), 1);
        assert_eq!(data.physical_record_types[0].name, "Correspondence");
    }

    #[test]
    fn set_record_types_replaces_previous_lists() {
        let mut data = ReferenceData::default();
        let rt = RecordType {
            id: VocabId::from("9"),
            name: "Photographs".into(),
            description: String::new(),
            digital_only: false,
        };
        data.set_record_types(vec![rt.clone()]);
        data.set_record_types(vec![rt]);
        assert_eq!(data.physical_record_types.len(), 1);
    }

    #[test]
    fn vocab_entry_accepts_numeric_ids() {
        let genres: Vec<Genre> = serde_json::from_str(r#"[{"id":1,"name":"Letters"}]"#).unwrap();
        assert_eq!(genres, vec![VocabEntry::new("1", "Letters")]);
    }
}
