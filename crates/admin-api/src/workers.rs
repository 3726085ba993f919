//! Worker profiles: listing, lookup, search and review

use admin_gateway::ApiRequest;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::client::{AdminApi, Page, PageRequest, unwrap_data};
use crate::error::{Error, Result};
use crate::normalize::{Worker, normalize_worker};
use crate::types::WorkerStatus;

const LIST_PATH: &str = "/AdminPrivileges/get-all-workers-profiles";
const GET_PATH: &str = "/AdminPrivileges/get-worker-profile-by-id";
const SEARCH_PATH: &str = "/AdminPrivileges/search-worker-profile";
const REVIEW_PATH: &str = "/AdminPrivileges/approve-worker-profile";

/// Page size the dashboard uses for each status column.
pub const WORKER_PAGE_SIZE: u32 = 15;

/// Suspension length the backend treats as permanent.
pub const PERMANENT_SUSPENSION_DAYS: u32 = 9999;

/// Search by display name or by worker id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerQuery {
    Name(String),
    Id(String),
}

/// Review decision on a worker profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerAction {
    Approve,
    Reject { reason: String },
    Suspend { days: u32, reason: String },
}

impl WorkerAction {
    /// Status the worker ends up in; its code is the review `key`.
    pub fn target_status(&self) -> WorkerStatus {
        match self {
            WorkerAction::Approve => WorkerStatus::Verified,
            WorkerAction::Reject { .. } => WorkerStatus::Rejected,
            WorkerAction::Suspend { .. } => WorkerStatus::Suspended,
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            WorkerAction::Approve => Ok(()),
            WorkerAction::Reject { reason } if reason.trim().is_empty() => Err(
                Error::Validation("a rejection reason is required".into()),
            ),
            WorkerAction::Reject { .. } => Ok(()),
            WorkerAction::Suspend { reason, .. } if reason.trim().is_empty() => Err(
                Error::Validation("a suspension reason is required".into()),
            ),
            WorkerAction::Suspend { days: 0, .. } => Err(Error::Validation(
                "suspension days must be greater than 0".into(),
            )),
            WorkerAction::Suspend { .. } => Ok(()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewBody<'a> {
    id: &'a str,
    key: u8,
    suspend_days: u32,
    reason: &'a str,
}

impl AdminApi {
    /// List workers, optionally filtered by status. Records without a status
    /// take the filter status.
    pub async fn list_workers(
        &self,
        page: PageRequest,
        status: Option<WorkerStatus>,
    ) -> Result<Page<Worker>> {
        let request = page
            .apply(ApiRequest::get(LIST_PATH))
            .query_opt("StatusKey", status.map(WorkerStatus::code));
        let body = self.fetch(request).await?;

        let total_pages = body
            .get("totalPages")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(1);
        let total_records = body.get("totalRecords").and_then(Value::as_u64);
        let page_number = body.get("pageNumber").and_then(Value::as_u64);
        let page_size = body.get("pageSize").and_then(Value::as_u64);

        let data: Vec<Worker> = worker_list(&body)
            .iter()
            .map(|raw| normalize_worker(raw, status))
            .collect();
        debug!(count = data.len(), ?status, "workers listed");

        Ok(Page {
            total_records: total_records.unwrap_or(data.len() as u64),
            data,
            page_number: page_number.and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
            page_size: page_size.and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
            total_pages,
        }
        .or_requested(page))
    }

    /// Fetch one worker profile.
    pub async fn get_worker(&self, id: &str) -> Result<Worker> {
        let body = self
            .fetch(ApiRequest::get(GET_PATH).query("Id", id))
            .await?;
        Ok(normalize_worker(&unwrap_data(body), None))
    }

    pub async fn search_workers(&self, query: &WorkerQuery) -> Result<Vec<Worker>> {
        let request = match query {
            WorkerQuery::Name(name) => ApiRequest::get(SEARCH_PATH).query("name", name),
            WorkerQuery::Id(id) => ApiRequest::get(SEARCH_PATH).query("workerId", id.trim()),
        };
        let body = self.fetch(request).await?;
        Ok(search_results(body)
            .iter()
            .map(|raw| normalize_worker(raw, None))
            .collect())
    }

    /// Approve, reject or suspend a worker. Input is validated before any
    /// request is sent.
    pub async fn review_worker(&self, id: &str, action: &WorkerAction) -> Result<Value> {
        action.validate()?;
        let (suspend_days, reason) = match action {
            WorkerAction::Approve => (0, ""),
            WorkerAction::Reject { reason } => (0, reason.as_str()),
            WorkerAction::Suspend { days, reason } => (*days, reason.as_str()),
        };
        let body = ReviewBody {
            id,
            key: action.target_status().code(),
            suspend_days,
            reason,
        };

        let response = self
            .fetch(ApiRequest::post(REVIEW_PATH).json(&body)?)
            .await?;
        info!(
            worker_id = id,
            status = %action.target_status(),
            permanent = suspend_days >= PERMANENT_SUSPENSION_DAYS,
            "worker reviewed"
        );
        Ok(response)
    }
}

/// Records from a list reply: `data`, `items`, or the body itself.
fn worker_list(body: &Value) -> &[Value] {
    if let Some(items) = body.get("data").and_then(Value::as_array) {
        return items;
    }
    if let Some(items) = body.get("items").and_then(Value::as_array) {
        return items;
    }
    body.as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// Records from a search reply: an array, a `data` array, a single `data`
/// object, or a single bare object.
fn search_results(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut fields) => match fields.remove("data") {
            Some(Value::Array(items)) => items,
            Some(data @ Value::Object(_)) => vec![data],
            Some(other) => {
                fields.insert("data".into(), other);
                vec![Value::Object(fields)]
            }
            None => vec![Value::Object(fields)],
        },
        Value::Null => Vec::new(),
        other => vec![other],
    }
}
