// crates/circledb-core/src/loader/raw.rs

// ---------------------------------------------------------------------------
// FILE GUARD: only compiled with the 'json' feature (see loader/mod.rs).
// ---------------------------------------------------------------------------

use crate::error::Result;
use crate::model::VillageRecord;
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

/// One row of a district file as published.
///
/// District files were produced by different tools over time, so each field
/// exists under several names. Values can be strings or numbers.
/// NOTE: This type mirrors the external dataset; it is turned into a
/// [`VillageRecord`] right away and never travels further.
#[derive(Debug, Default, Deserialize)]
pub struct VillageRaw {
    #[serde(default)]
    pub village_en: Option<Value>,
    #[serde(rename = "villageName", default)]
    pub village_name: Option<Value>,
    #[serde(rename = "THANA/VILLAGE_NAME ", default)]
    pub legacy_village_padded: Option<Value>,
    #[serde(rename = "THANA/VILLAGE_NAME", default)]
    pub legacy_village: Option<Value>,

    #[serde(default)]
    pub othana_no: Option<Value>,
    #[serde(rename = "thanaNo", default)]
    pub thana_no: Option<Value>,
    #[serde(rename = "THANA_NO", default)]
    pub legacy_thana: Option<Value>,

    #[serde(rename = "CIRCLE", default)]
    pub circle: Option<Value>,
    #[serde(rename = "circleName", default)]
    pub circle_name: Option<Value>,
    #[serde(rename = "CIRCLE_NAME ", default)]
    pub legacy_circle_padded: Option<Value>,
    #[serde(rename = "CIRCLE_NAME", default)]
    pub legacy_circle: Option<Value>,
}

impl VillageRaw {
    /// Picks the first non-blank variant of each field, trimmed.
    pub fn into_record(self) -> VillageRecord {
        VillageRecord {
            village_name: first_text([
                self.village_en,
                self.village_name,
                self.legacy_village_padded,
                self.legacy_village,
            ]),
            thana_no: first_text([self.othana_no, self.thana_no, self.legacy_thana]),
            circle_name: first_text([
                self.circle,
                self.circle_name,
                self.legacy_circle_padded,
                self.legacy_circle,
            ]),
        }
    }
}

fn first_text<const N: usize>(candidates: [Option<Value>; N]) -> String {
    candidates
        .iter()
        .flatten()
        .map(text_of)
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// Strings and numbers become trimmed text; anything else is blank.
fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Parses a district file: a JSON array of row objects.
///
/// Rows that are not objects are skipped with a warning; a document that is
/// not an array at all is an error.
pub fn parse_district<R: Read>(reader: R) -> Result<Vec<VillageRecord>> {
    let rows: Vec<Value> = serde_json::from_reader(reader)?;
    Ok(records_from_rows(rows))
}

/// [`parse_district`] over an in-memory document.
pub fn parse_district_slice(bytes: &[u8]) -> Result<Vec<VillageRecord>> {
    let rows: Vec<Value> = serde_json::from_slice(bytes)?;
    Ok(records_from_rows(rows))
}

fn records_from_rows(rows: Vec<Value>) -> Vec<VillageRecord> {
    let total = rows.len();
    let records: Vec<VillageRecord> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(i, row)| {
            if !row.is_object() {
                tracing::warn!(row = i, "skipping district row that is not an object");
                return None;
            }
            match VillageRaw::deserialize(row) {
                Ok(raw) => Some(raw.into_record()),
                Err(err) => {
                    tracing::warn!(row = i, error = %err, "skipping unreadable district row");
                    None
                }
            }
        })
        .collect();
    tracing::debug!(rows = total, records = records.len(), "parsed district rows");
    records
}
