//! Job complaints

use admin_gateway::ApiRequest;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::client::{AdminApi, PageRequest};
use crate::error::{Error, Result};

const LIST_PATH: &str = "/job-complaints/get-all";
const APPROVE_PATH: &str = "/job-complaints/approve";

pub const COMPLAINT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApproveBody<'a> {
    complaint_id: &'a str,
    approve: bool,
    admin_remarks: &'a str,
}

impl AdminApi {
    /// List complaints. The reply must carry a `data` array.
    pub async fn list_complaints(&self, page: PageRequest) -> Result<Vec<Value>> {
        let body = self.fetch(page.apply(ApiRequest::get(LIST_PATH))).await?;
        match body {
            Value::Object(mut fields) => match fields.remove("data") {
                Some(Value::Array(items)) => Ok(items),
                _ => Err(Error::Format("Invalid response format".into())),
            },
            _ => Err(Error::Format("Invalid response format".into())),
        }
    }

    /// Approve a complaint. Returns the server's confirmation message.
    pub async fn approve_complaint(
        &self,
        complaint_id: &str,
        remarks: Option<&str>,
    ) -> Result<String> {
        let body = ApproveBody {
            complaint_id,
            approve: true,
            admin_remarks: remarks.unwrap_or_default(),
        };
        let envelope = self
            .command(
                ApiRequest::post(APPROVE_PATH).json(&body)?,
                "Approval failed.",
            )
            .await?;
        info!(complaint_id, "complaint approved");
        Ok(envelope
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "Complaint approved successfully.".to_owned()))
    }
}
