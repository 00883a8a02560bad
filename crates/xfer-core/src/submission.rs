//! Wire body of `POST /api/submit`.

use serde::Serialize;

use crate::draft::{AccessionType, Draft, InventoryRow};
use crate::error::ValidationError;
use crate::ids::{SubmissionId, VocabId};
use crate::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalPayload {
    pub description: String,
    pub date_range: String,
    pub selected_types: Vec<VocabId>,
    pub uploaded_files: Vec<String>,
    pub total_size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalPayload {
    pub date_range: String,
    pub box_info: String,
    pub selected_types: Vec<VocabId>,
    pub transfer_method: i64,
    pub has_digital: bool,
    pub tech_info: String,
    pub media_carriers: Vec<VocabId>,
    pub media_count: String,
    pub has_software: bool,
    pub inventory: Vec<InventoryRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub identifier: SubmissionId,
    pub user: User,
    pub summary: String,
    pub activities: String,
    pub creator: String,
    pub genres: Vec<VocabId>,
    pub accession_type: AccessionType,
    pub digital_transfer: bool,
    pub digital: DigitalPayload,
    pub physical_transfer: bool,
    pub physical: PhysicalPayload,
}

impl SubmissionPayload {
    /// Snapshot the draft for submission.
    ///
    /// Requires an allocated identifier and a summary; the server rejects
    /// either one missing.
    pub fn from_draft(draft: &Draft, user: &User) -> Result<Self, ValidationError> {
        let identifier = draft
            .identifier()
            .cloned()
            .ok_or(ValidationError::MissingIdentifier)?;
        if draft.accession.summary.trim().is_empty() {
            return Err(ValidationError::MissingField("summary"));
        }

        let digital = &draft.digital;
        let physical = &draft.physical;
        Ok(Self {
            identifier,
            user: user.clone(),
            summary: draft.accession.summary.clone(),
            activities: draft.accession.activities.clone(),
            creator: draft.accession.creator.clone(),
            genres: draft.accession.selected_genres.iter().cloned().collect(),
            accession_type: draft.accession.accession_type,
            digital_transfer: draft.digital_transfer,
            digital: DigitalPayload {
                description: digital.description.clone(),
                date_range: digital.date_range.clone(),
                selected_types: digital.selected_types.iter().cloned().collect(),
                uploaded_files: digital.uploaded_files().iter().map(|f| f.name.clone()).collect(),
                total_size_bytes: digital.total_size_bytes(),
            },
            physical_transfer: draft.physical_transfer,
            physical: PhysicalPayload {
                date_range: physical.date_range.clone(),
                box_info: physical.box_info.clone(),
                selected_types: physical.selected_types.iter().cloned().collect(),
                transfer_method: physical
                    .transfer_method
                    .as_ref()
                    .and_then(|m| m.as_str().parse().ok())
                    .unwrap_or(0),
                has_digital: physical.has_digital_copy.as_bool(),
                tech_info: physical.tech_info.clone(),
                media_carriers: physical.media_carriers.iter().cloned().collect(),
                media_count: physical.media_count.clone(),
                has_software: physical.has_software.as_bool(),
                inventory: physical.inventory().to_vec(),
            },
        })
    }
}
