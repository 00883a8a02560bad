//! The in-progress accession record edited by the submission workflow.
//! 提交流程中正在编辑的移交记录。

mod digital;
mod field;
mod physical;
mod size;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::{SubmissionId, VocabId};

pub use digital::{DigitalTransferInfo, FileRef};
pub use field::{AccessionField, DigitalField, DraftField, PhysicalField};
pub use physical::{InventoryRow, PhysicalTransferInfo, YesNo};
pub use size::format_upload_size;

/// Whether the material extends an accession already held by the archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessionType {
    #[default]
    New,
    Existing,
}

/// General description of the material being transferred.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessionDraft {
    pub identifier: Option<SubmissionId>,
    pub summary: String,
    pub activities: String,
    pub creator: String,
    pub selected_genres: BTreeSet<VocabId>,
    pub accession_type: AccessionType,
}

/// Whole draft: the three sub-records plus the transfer-mode flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub accession: AccessionDraft,
    pub digital: DigitalTransferInfo,
    pub physical: PhysicalTransferInfo,
    pub digital_transfer: bool,
    pub physical_transfer: bool,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            accession: AccessionDraft::default(),
            digital: DigitalTransferInfo::default(),
            physical: PhysicalTransferInfo::default(),
            digital_transfer: true,
            physical_transfer: false,
        }
    }
}

impl Draft {
    pub fn identifier(&self) -> Option<&SubmissionId> {
        self.accession.identifier.as_ref()
    }

    /// Human readable size of everything uploaded so far.
    pub fn digital_upload_size(&self) -> String {
        format_upload_size(self.digital.total_size_bytes())
    }
}
