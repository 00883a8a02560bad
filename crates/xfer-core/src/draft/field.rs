//! Typed "set one nested field" writes against the draft.
//!
//! Views that only know a dotted path (`"physical.boxInfo"`) go through
//! [`DraftField::parse`], which rejects anything outside the three
//! sub-records. The ledger (`digital.uploadedFiles`, `digital.totalSizeBytes`),
//! `physical.inventory` and `accession.identifier` are readable by path but
//! never writable that way: each has dedicated operations that keep their
//! invariants.

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{AccessionType, Draft, YesNo};
use crate::error::ValidationError;
use crate::ids::VocabId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessionField {
    Summary(String),
    Activities(String),
    Creator(String),
    SelectedGenres(BTreeSet<VocabId>),
    AccessionType(AccessionType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigitalField {
    Description(String),
    DateRange(String),
    SelectedTypes(BTreeSet<VocabId>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhysicalField {
    DateRange(String),
    BoxInfo(String),
    SelectedTypes(BTreeSet<VocabId>),
    TransferMethod(Option<VocabId>),
    HasDigitalCopy(YesNo),
    TechInfo(String),
    MediaCarriers(BTreeSet<VocabId>),
    MediaCount(String),
    HasSoftware(YesNo),
}

/// A single field write, addressed by sub-record.
/// 按子记录寻址的单字段写入。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    Accession(AccessionField),
    Digital(DigitalField),
    Physical(PhysicalField),
}

fn split_path(path: &str) -> Result<(&str, &str), ValidationError> {
    match path.split('.').collect::<Vec<_>>().as_slice() {
        [section, key] if !key.is_empty() => Ok((*section, *key)),
        _ => Err(ValidationError::UnknownFieldPath(path.to_string())),
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, ValidationError> {
    serde_json::from_value(value).map_err(|e| ValidationError::InvalidFieldValue {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

impl DraftField {
    /// Resolve a dotted path and decode `value` into the field's type.
    pub fn parse(path: &str, value: Value) -> Result<Self, ValidationError> {
        let (section, key) = split_path(path)?;
        let field = match (section, key) {
            ("accession", "summary") => Self::Accession(AccessionField::Summary(decode(path, value)?)),
            ("accession", "activities") => {
                Self::Accession(AccessionField::Activities(decode(path, value)?))
            }
            ("accession", "creator") => Self::Accession(AccessionField::Creator(decode(path, value)?)),
            ("accession", "selectedGenres") => {
                Self::Accession(AccessionField::SelectedGenres(decode(path, value)?))
            }
            ("accession", "accessionType") => {
                Self::Accession(AccessionField::AccessionType(decode(path, value)?))
            }
            ("digital", "description") => Self::Digital(DigitalField::Description(decode(path, value)?)),
            ("digital", "dateRange") => Self::Digital(DigitalField::DateRange(decode(path, value)?)),
            ("digital", "selectedTypes") => {
                Self::Digital(DigitalField::SelectedTypes(decode(path, value)?))
            }
            ("physical", "dateRange") => Self::Physical(PhysicalField::DateRange(decode(path, value)?)),
            ("physical", "boxInfo") => Self::Physical(PhysicalField::BoxInfo(decode(path, value)?)),
            ("physical", "selectedTypes") => {
                Self::Physical(PhysicalField::SelectedTypes(decode(path, value)?))
            }
            ("physical", "transferMethod") => {
                Self::Physical(PhysicalField::TransferMethod(decode(path, value)?))
            }
            ("physical", "hasDigital") => {
                Self::Physical(PhysicalField::HasDigitalCopy(decode(path, value)?))
            }
            ("physical", "techInfo") => Self::Physical(PhysicalField::TechInfo(decode(path, value)?)),
            ("physical", "mediaCarriers") => {
                Self::Physical(PhysicalField::MediaCarriers(decode(path, value)?))
            }
            ("physical", "mediaCount") => Self::Physical(PhysicalField::MediaCount(decode(path, value)?)),
            ("physical", "hasSoftware") => {
                Self::Physical(PhysicalField::HasSoftware(decode(path, value)?))
            }
            _ => return Err(ValidationError::UnknownFieldPath(path.to_string())),
        };
        Ok(field)
    }
}

impl Draft {
    /// Apply one typed field write. Nothing else in the draft changes.
    pub fn apply(&mut self, field: DraftField) {
        match field {
            DraftField::Accession(f) => {
                let a = &mut self.accession;
                match f {
                    AccessionField::Summary(v) => a.summary = v,
                    AccessionField::Activities(v) => a.activities = v,
                    AccessionField::Creator(v) => a.creator = v,
                    AccessionField::SelectedGenres(v) => a.selected_genres = v,
                    AccessionField::AccessionType(v) => a.accession_type = v,
                }
            }
            DraftField::Digital(f) => {
                let d = &mut self.digital;
                match f {
                    DigitalField::Description(v) => d.description = v,
                    DigitalField::DateRange(v) => d.date_range = v,
                    DigitalField::SelectedTypes(v) => d.selected_types = v,
                }
            }
            DraftField::Physical(f) => {
                let p = &mut self.physical;
                match f {
                    PhysicalField::DateRange(v) => p.date_range = v,
                    PhysicalField::BoxInfo(v) => p.box_info = v,
                    PhysicalField::SelectedTypes(v) => p.selected_types = v,
                    PhysicalField::TransferMethod(v) => p.transfer_method = v,
                    PhysicalField::HasDigitalCopy(v) => p.has_digital_copy = v,
                    PhysicalField::TechInfo(v) => p.tech_info = v,
                    PhysicalField::MediaCarriers(v) => p.media_carriers = v,
                    PhysicalField::MediaCount(v) => p.media_count = v,
                    PhysicalField::HasSoftware(v) => p.has_software = v,
                }
            }
        }
    }

    /// Read any field of the three sub-records by dotted path.
    pub fn field_value(&self, path: &str) -> Result<Value, ValidationError> {
        let (section, key) = split_path(path)?;
        let record = match section {
            "accession" => serde_json::to_value(&self.accession),
            "digital" => serde_json::to_value(&self.digital),
            "physical" => serde_json::to_value(&self.physical),
            _ => return Err(ValidationError::UnknownFieldPath(path.to_string())),
        }
        .map_err(|e| ValidationError::InvalidFieldValue {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        match record {
            Value::Object(mut map) => map
                .remove(key)
                .ok_or_else(|| ValidationError::UnknownFieldPath(path.to_string())),
            _ => Err(ValidationError::UnknownFieldPath(path.to_string())),
        }
    }
}
