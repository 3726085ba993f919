//! Worker record normalization
//!
//! Worker payloads differ between backend builds and endpoints: the same
//! field shows up under several names. Each output field is resolved from an
//! ordered list of candidate keys; the first key present with a non-null
//! value wins. Keys not consumed into an output field are carried in `extra`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::WorkerStatus;

const ID_KEYS: &[&str] = &["id", "workerId", "userId", "profileId", "idGuid", "_id"];
const NAME_KEYS: &[&str] = &["name", "fullName", "userName", "displayName", "firstName"];
const PHONE_KEYS: &[&str] = &[
    "phoneNumber",
    "phone",
    "phone_no",
    "contactNumber",
    "mobileNumber",
];
const IMAGE_KEYS: &[&str] = &["profileImageUrl", "profileImage", "imageURL"];
const ID_CARD_KEYS: &[&str] = &["idCardURL", "idCardUrl", "idCard"];
const POLICE_CLEARANCE_KEYS: &[&str] = &["policeClearanceURL", "policeClearance"];
const STATUS_KEYS: &[&str] = &["verificationStatusId", "statusId", "status", "statusKey"];

/// Output field names; dropped from `extra` so serialization has no duplicates.
const OUTPUT_KEYS: &[&str] = &[
    "id",
    "name",
    "phoneNumber",
    "imageURL",
    "idCardURL",
    "policeClearanceURL",
    "statusId",
];

/// A worker profile in canonical shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Worker {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
    #[serde(rename = "idCardURL")]
    pub id_card_url: Option<String>,
    #[serde(rename = "policeClearanceURL")]
    pub police_clearance_url: Option<String>,
    #[serde(rename = "statusId")]
    pub status_id: u8,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Worker {
    /// Status as a known code, if the backend sent one of the four.
    pub fn status(&self) -> Option<WorkerStatus> {
        WorkerStatus::from_code(self.status_id)
    }
}

/// Normalize one raw worker record.
///
/// `fallback_status` is used when the record carries no usable status (list
/// calls pass the status they filtered by); without it the status is
/// `Verified`. A non-object value yields an empty worker.
pub fn normalize_worker(raw: &Value, fallback_status: Option<WorkerStatus>) -> Worker {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);

    let status_id = STATUS_KEYS
        .iter()
        .filter_map(|key| present(fields, key))
        .find_map(status_code)
        .or(fallback_status.map(WorkerStatus::code))
        .unwrap_or(WorkerStatus::Verified.code());

    let extra = fields
        .iter()
        .filter(|(key, _)| !OUTPUT_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Worker {
        id: first_text(fields, ID_KEYS),
        name: first_text(fields, NAME_KEYS).unwrap_or_default(),
        phone_number: first_text(fields, PHONE_KEYS).unwrap_or_default(),
        image_url: first_text(fields, IMAGE_KEYS),
        id_card_url: first_text(fields, ID_CARD_KEYS),
        police_clearance_url: first_text(fields, POLICE_CLEARANCE_KEYS),
        status_id,
        extra,
    }
}

fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| present(fields, key))
        .map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

fn status_code(value: &Value) -> Option<u8> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u8::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
