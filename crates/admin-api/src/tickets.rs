//! Customer support tickets

use admin_gateway::ApiRequest;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::client::{AdminApi, Page, PageRequest, decode_page};
use crate::error::{Error, Result};
use crate::types::{SupportCategory, SupportStatus};

const LIST_PATH: &str = "/customer-support/get-all-tickets";

pub const TICKET_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub status_id: u8,
    pub category_id: u8,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attachments: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ticket {
    pub fn status(&self) -> Option<SupportStatus> {
        SupportStatus::from_code(self.status_id)
    }

    pub fn category(&self) -> Option<SupportCategory> {
        SupportCategory::from_code(self.category_id)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl AdminApi {
    /// List open tickets, optionally narrowed to one category.
    pub async fn list_tickets(
        &self,
        page: PageRequest,
        category: Option<SupportCategory>,
    ) -> Result<Page<Ticket>> {
        let request = ApiRequest::get(LIST_PATH).query("StatusId", SupportStatus::Open.code());
        let request = page
            .apply(request)
            .query_opt("SupportCategory", category.map(SupportCategory::code));

        let raw = decode_page(self.fetch(request).await?, page)?;
        let data = raw
            .data
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Ticket>, _>>()
            .map_err(|e| Error::Format(format!("unexpected ticket shape: {e}")))?;

        Ok(Page {
            data,
            page_number: raw.page_number,
            page_size: raw.page_size,
            total_records: raw.total_records,
            total_pages: raw.total_pages,
        })
    }
}
