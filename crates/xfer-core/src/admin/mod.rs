//! Read-only records served to the administrative browsing view.

mod page;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::draft::InventoryRow;
use crate::ids::{AccessionId, NoteId, SubmissionId, UserId, VocabId};
use crate::user::User;

pub use page::{PageMove, PageQuery, PageWindow};

/// One row of the admin accession list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessionSummary {
    pub id: AccessionId,
    #[serde(rename = "accessionID")]
    pub accession_id: SubmissionId,
    #[serde(default)]
    pub submitter: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub accession_type: String,
    /// Comma separated genre names.
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub digital: bool,
    #[serde(default)]
    pub physical: bool,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// One page of the accession list as answered by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessionsPage {
    pub total: u64,
    #[serde(default)]
    pub filtered_total: u64,
    pub page: u32,
    pub page_size: u32,
    #[serde(default)]
    pub accessions: Vec<AccessionSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DigitalDetail {
    pub description: String,
    pub date_range: String,
    pub selected_types: Vec<String>,
    pub uploaded_files: Vec<String>,
    pub total_size_bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicalDetail {
    pub date_range: String,
    pub box_info: String,
    pub selected_types: Vec<String>,
    pub transfer_method: Option<VocabId>,
    pub has_digital: bool,
    pub tech_info: String,
    pub media_carriers: Vec<String>,
    pub media_count: String,
    pub has_software: bool,
    pub inventory: Vec<InventoryRow>,
}

/// Full accession record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessionDetail {
    pub id: AccessionId,
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub activities: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub accession_type: String,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub digital_transfer: bool,
    #[serde(default)]
    pub digital: DigitalDetail,
    #[serde(default)]
    pub physical_transfer: bool,
    #[serde(default)]
    pub physical: PhysicalDetail,
}

/// A note attached to an accession.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    #[serde(rename = "userID")]
    pub user_id: UserId,
    #[serde(alias = "note")]
    pub body: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    pub body: String,
    #[serde(rename = "userID")]
    pub user_id: UserId,
}
