//! Resource client and shared response shapes

use std::sync::Arc;

use admin_gateway::header::{ACCEPT, HeaderValue};
use admin_gateway::{ApiRequest, Gateway};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Typed access to the admin backend. Every call goes through the gateway,
/// so all of them share one session and one refresh protocol.
#[derive(Clone)]
pub struct AdminApi {
    gateway: Arc<Gateway>,
}

impl AdminApi {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    /// Execute and decode the body as loose JSON.
    pub(crate) async fn fetch(&self, request: ApiRequest) -> Result<Value> {
        let request = request.header(ACCEPT, HeaderValue::from_static("application/json"));
        let response = self.gateway.execute(request).await?;
        Ok(response.json::<Value>()?)
    }

    /// Execute a call answered with an `{isSuccess, message, data}` envelope
    /// and fail with the server's message when `isSuccess` is not true.
    pub(crate) async fn command(&self, request: ApiRequest, failure: &str) -> Result<Envelope> {
        let envelope: Envelope = serde_json::from_value(self.fetch(request).await?)
            .map_err(|e| Error::Format(format!("unexpected response: {e}")))?;
        if envelope.is_success {
            Ok(envelope)
        } else {
            Err(Error::Rejected(envelope.failure_message(failure)))
        }
    }
}

/// Standard backend reply for commands.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(default)]
    pub is_success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Envelope {
    fn failure_message(&self, fallback: &str) -> String {
        [&self.message, &self.error]
            .into_iter()
            .flatten()
            .find(|m| !m.is_empty())
            .cloned()
            .unwrap_or_else(|| fallback.to_owned())
    }
}

/// Page selector sent as `PageNumber` / `PageSize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(number: u32, size: u32) -> Self {
        Self { number, size }
    }

    pub(crate) fn apply(self, request: ApiRequest) -> ApiRequest {
        request
            .query("PageNumber", self.number)
            .query("PageSize", self.size)
    }
}

/// One page of a paginated list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_records: u64,
    #[serde(default = "one")]
    pub total_pages: u32,
}

fn one() -> u32 {
    1
}

impl<T> Page<T> {
    /// Fill in page bookkeeping the backend left out from the request.
    pub(crate) fn or_requested(mut self, requested: PageRequest) -> Self {
        if self.page_number == 0 {
            self.page_number = requested.number;
        }
        if self.page_size == 0 {
            self.page_size = requested.size;
        }
        self
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }
}

/// Page members that fall back to their defaults when the backend sends null.
const PAGE_FIELDS: [&str; 5] = ["data", "pageNumber", "pageSize", "totalRecords", "totalPages"];

/// Decode a page of loose records. Null page members read as absent.
pub(crate) fn decode_page(mut value: Value, requested: PageRequest) -> Result<Page<Value>> {
    if let Some(fields) = value.as_object_mut() {
        fields.retain(|key, field| !(field.is_null() && PAGE_FIELDS.contains(&key.as_str())));
    }
    let page: Page<Value> = serde_json::from_value(value)
        .map_err(|e| Error::Format(format!("unexpected page shape: {e}")))?;
    Ok(page.or_requested(requested))
}

/// The `data` member of a lookup response, or the whole body when absent.
pub(crate) fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut fields) => match fields.remove("data") {
            Some(data) if !data.is_null() => data,
            _ => Value::Object(fields),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Captured, api_for};
    use axum::Json;
    use axum::http::HeaderMap;
    use axum::routing::get;
    use serde_json::json;

    #[tokio::test]
    async fn fetch_asks_for_json_with_bearer() {
        let seen = Captured::default();
        let record = seen.clone();
        let app = axum::Router::new().route(
            "/faq/get-all-faq-list",
            get(move |headers: HeaderMap| {
                let record = record.clone();
                async move {
                    let header = |name: &str| {
                        headers
                            .get(name)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_owned)
                    };
                    record.push(json!({
                        "accept": header("accept"),
                        "authorization": header("authorization"),
                    }));
                    Json(json!([]))
                }
            }),
        );
        let t = api_for(app).await;

        let body = t
            .api
            .fetch(ApiRequest::get("/faq/get-all-faq-list"))
            .await
            .unwrap();

        assert_eq!(body, json!([]));
        assert_eq!(
            seen.all(),
            vec![json!({"accept": "application/json", "authorization": "Bearer A1"})]
        );
    }

    #[test]
    fn envelope_failure_message_order() {
        let envelope: Envelope =
            serde_json::from_value(json!({"isSuccess": false, "error": "bad price"})).unwrap();
        assert_eq!(envelope.failure_message("fallback"), "bad price");

        let envelope: Envelope =
            serde_json::from_value(json!({"message": "", "error": null})).unwrap();
        assert!(!envelope.is_success);
        assert_eq!(envelope.failure_message("fallback"), "fallback");
    }

    #[test]
    fn page_defaults_and_requested_fill() {
        let page = decode_page(json!({"data": [1, 2]}), PageRequest::new(3, 10)).unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.page_number, 3);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());

        let page = decode_page(
            json!({"data": null, "pageNumber": 1, "pageSize": 12, "totalRecords": 30, "totalPages": 3}),
            PageRequest::new(1, 12),
        )
        .unwrap();
        assert!(page.data.is_empty());
        assert!(page.has_next());
    }

    #[test]
    fn null_page_fields_take_defaults() {
        let page = decode_page(
            json!({
                "data": [{"id": "t-1"}],
                "pageNumber": null,
                "pageSize": null,
                "totalRecords": null,
                "totalPages": null
            }),
            PageRequest::new(2, 10),
        )
        .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.page_number, 2);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.total_records, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn unwrap_data_prefers_data_member() {
        assert_eq!(unwrap_data(json!({"data": {"id": 1}})), json!({"id": 1}));
        assert_eq!(unwrap_data(json!({"id": 1})), json!({"id": 1}));
        assert_eq!(unwrap_data(json!({"data": null, "id": 2})), json!({"id": 2}));
    }
}
