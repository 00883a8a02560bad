use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::ids::VocabId;

/// Yes/no answer from a radio group.
///
/// Forms post these as `"1"`/`"0"`; booleans and `"yes"`/`"no"` are accepted
/// too. It always serializes as a JSON boolean, which is what the server binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_bool(self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

impl Serialize for YesNo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.as_bool())
    }
}

impl<'de> Deserialize<'de> for YesNo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Int(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bool(b) => Ok(b.into()),
            Raw::Int(1) => Ok(YesNo::Yes),
            Raw::Int(0) => Ok(YesNo::No),
            Raw::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "yes" | "true" => Ok(YesNo::Yes),
                "0" | "no" | "false" => Ok(YesNo::No),
                other => Err(serde::de::Error::custom(format!("not a yes/no value: {other}"))),
            },
            Raw::Int(n) => Err(serde::de::Error::custom(format!("not a yes/no value: {n}"))),
        }
    }
}

/// One free-form row of the box inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryRow {
    pub box_num: String,
    pub record_group: String,
    pub title: String,
    pub description: String,
    pub dates: String,
}

/// Physical transfer metadata and the box inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalTransferInfo {
    pub date_range: String,
    pub box_info: String,
    pub selected_types: BTreeSet<VocabId>,
    pub transfer_method: Option<VocabId>,
    #[serde(rename = "hasDigital")]
    pub has_digital_copy: YesNo,
    pub tech_info: String,
    pub media_carriers: BTreeSet<VocabId>,
    pub media_count: String,
    pub has_software: YesNo,
    inventory: Vec<InventoryRow>,
}

impl Default for PhysicalTransferInfo {
    fn default() -> Self {
        Self {
            date_range: String::new(),
            box_info: String::new(),
            selected_types: BTreeSet::new(),
            transfer_method: None,
            has_digital_copy: YesNo::Yes,
            tech_info: String::new(),
            media_carriers: BTreeSet::new(),
            media_count: String::new(),
            has_software: YesNo::No,
            inventory: Vec::new(),
        }
    }
}

impl PhysicalTransferInfo {
    pub fn inventory(&self) -> &[InventoryRow] {
        &self.inventory
    }

    pub fn inventory_row(&self, index: usize) -> Option<&InventoryRow> {
        self.inventory.get(index)
    }

    /// Append an empty row and return its index.
    pub fn add_inventory_row(&mut self) -> usize {
        self.inventory.push(InventoryRow::default());
        self.inventory.len() - 1
    }

    pub fn update_inventory_row(
        &mut self,
        index: usize,
        row: InventoryRow,
    ) -> Result<(), ValidationError> {
        let len = self.inventory.len();
        let slot = self
            .inventory
            .get_mut(index)
            .ok_or(ValidationError::IndexOutOfRange { index, len })?;
        *slot = row;
        Ok(())
    }

    pub fn delete_inventory_row(&mut self, index: usize) -> Result<InventoryRow, ValidationError> {
        if index >= self.inventory.len() {
            return Err(ValidationError::IndexOutOfRange {
                index,
                len: self.inventory.len(),
            });
        }
        Ok(self.inventory.remove(index))
    }

    pub fn clear_inventory(&mut self) {
        self.inventory.clear();
    }

    /// Reset the answers that only matter when digital media is included.
    pub fn clear_digital_media_info(&mut self) {
        self.tech_info.clear();
        self.media_carriers.clear();
        self.media_count.clear();
        self.has_software = YesNo::No;
    }
}
