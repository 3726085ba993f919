//! Customer profiles

use admin_gateway::ApiRequest;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::client::{AdminApi, Page, PageRequest, decode_page, unwrap_data};
use crate::error::{Error, Result};

const LIST_PATH: &str = "/AdminPrivileges/get-all-customer-profiles";
const GET_PATH: &str = "/AdminPrivileges/get-customer-profile-by-id";
const SEARCH_PATH: &str = "/AdminPrivileges/search-customer-profile";
const SUSPEND_PATH: &str = "/AdminPrivileges/suspend-customer-profile";

pub const CUSTOMER_PAGE_SIZE: u32 = 12;

/// Status filter the dashboard lists customers with.
pub const ACTIVE_CUSTOMER_STATUS: u8 = 1;

/// `key` the suspension endpoint expects.
const SUSPEND_KEY: u8 = 0;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SuspendBody<'a> {
    id: &'a str,
    key: u8,
    suspend_days: u32,
    reason: &'a str,
}

impl AdminApi {
    pub async fn list_customers(
        &self,
        page: PageRequest,
        status_key: Option<u8>,
    ) -> Result<Page<Value>> {
        let request = page
            .apply(ApiRequest::get(LIST_PATH))
            .query_opt("StatusKey", status_key.filter(|k| *k != 0));
        decode_page(self.fetch(request).await?, page)
    }

    pub async fn get_customer(&self, id: &str) -> Result<Value> {
        let body = self
            .fetch(ApiRequest::get(GET_PATH).query("Id", id))
            .await?;
        Ok(unwrap_data(body))
    }

    /// Search customers by id. Anything but a JSON array counts as no match.
    pub async fn search_customers(&self, id: &str) -> Result<Vec<Value>> {
        let body = self
            .fetch(ApiRequest::get(SEARCH_PATH).query("Id", id.trim()))
            .await?;
        Ok(match body {
            Value::Array(items) => items,
            _ => Vec::new(),
        })
    }

    pub async fn suspend_customer(&self, id: &str, days: u32, reason: &str) -> Result<Value> {
        if days == 0 {
            return Err(Error::Validation(
                "suspension days must be greater than 0".into(),
            ));
        }
        if reason.trim().is_empty() {
            return Err(Error::Validation("a suspension reason is required".into()));
        }

        let body = SuspendBody {
            id,
            key: SUSPEND_KEY,
            suspend_days: days,
            reason,
        };
        let response = self
            .fetch(ApiRequest::post(SUSPEND_PATH).json(&body)?)
            .await?;
        info!(customer_id = id, days, "customer suspended");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Captured, api_for};
    use axum::Json;
    use axum::extract::Query;
    use axum::routing::{get, post};
    use serde_json::json;
    use std::collections::HashMap;

    #[tokio::test]
    async fn list_customers_decodes_page() {
        let queries = Captured::default();
        let seen = queries.clone();
        let app = axum::Router::new().route(
            LIST_PATH,
            get(move |Query(q): Query<HashMap<String, String>>| {
                let seen = seen.clone();
                async move {
                    seen.push(json!(q));
                    Json(json!({
                        "data": [{"id": "c-1", "name": "Hina"}],
                        "pageNumber": 2,
                        "pageSize": 12,
                        "totalRecords": 13,
                        "totalPages": 2
                    }))
                }
            }),
        );
        let t = api_for(app).await;

        let page = t
            .api
            .list_customers(
                PageRequest::new(2, CUSTOMER_PAGE_SIZE),
                Some(ACTIVE_CUSTOMER_STATUS),
            )
            .await
            .unwrap();

        assert_eq!(
            queries.all(),
            vec![json!({"PageNumber": "2", "PageSize": "12", "StatusKey": "1"})]
        );
        assert_eq!(page.data[0]["name"], "Hina");
        assert_eq!(page.total_records, 13);
        assert!(!page.has_next());
    }

    #[tokio::test]
    async fn search_non_array_is_empty() {
        let app = axum::Router::new().route(
            SEARCH_PATH,
            get(|| async { Json(json!({"message": "not found"})) }),
        );
        let t = api_for(app).await;

        assert!(t.api.search_customers("c-9").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_customer_falls_back_to_body() {
        let app = axum::Router::new().route(
            GET_PATH,
            get(|| async { Json(json!({"id": "c-1", "suspendedUntilUtc": null})) }),
        );
        let t = api_for(app).await;

        let customer = t.api.get_customer("c-1").await.unwrap();
        assert_eq!(customer["id"], "c-1");
    }

    #[tokio::test]
    async fn suspend_sends_key_zero() {
        let bodies = Captured::default();
        let seen = bodies.clone();
        let app = axum::Router::new().route(
            SUSPEND_PATH,
            post(move |Json(body): Json<Value>| {
                let seen = seen.clone();
                async move {
                    seen.push(body);
                    Json(json!({"isSuccess": true}))
                }
            }),
        );
        let t = api_for(app).await;

        t.api
            .suspend_customer("c-1", 3, "Violation of terms")
            .await
            .unwrap();
        assert_eq!(
            bodies.all(),
            vec![json!({"id": "c-1", "key": 0, "suspendDays": 3, "reason": "Violation of terms"})]
        );
    }

    #[tokio::test]
    async fn suspend_requires_days_and_reason() {
        let app = axum::Router::new();
        let t = api_for(app).await;

        let err = t.api.suspend_customer("c-1", 0, "x").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        let err = t.api.suspend_customer("c-1", 2, " ").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
