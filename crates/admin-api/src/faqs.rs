//! Frequently asked questions

use admin_gateway::ApiRequest;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::client::{AdminApi, PageRequest};
use crate::error::{Error, Result};

const LIST_PATH: &str = "/faq/get-all-faq-list";
const CREATE_PATH: &str = "/faq/create-faq";

pub const FAQ_PAGE_SIZE: u32 = 18;

/// A FAQ to create. `category` 0 means uncategorized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFaq {
    pub question: String,
    pub answer: String,
    pub category: u32,
}

impl NewFaq {
    pub fn new(question: &str, answer: &str, category: Option<u32>) -> Result<Self> {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() || answer.is_empty() {
            return Err(Error::Validation(
                "both question and answer are required".into(),
            ));
        }
        Ok(Self {
            question: question.to_owned(),
            answer: answer.to_owned(),
            category: category.unwrap_or(0),
        })
    }
}

impl AdminApi {
    pub async fn list_faqs(&self, page: PageRequest) -> Result<Vec<Value>> {
        let body = self.fetch(page.apply(ApiRequest::get(LIST_PATH))).await?;
        Ok(faq_list(body))
    }

    /// Create a FAQ and return the created record when the server sends one.
    pub async fn create_faq(&self, faq: &NewFaq) -> Result<Option<Value>> {
        let envelope = self
            .command(
                ApiRequest::post(CREATE_PATH).json(faq)?,
                "Failed to create FAQ",
            )
            .await?;
        info!(category = faq.category, "faq created");
        Ok(envelope.data)
    }

    pub async fn delete_faq(&self, id: &str) -> Result<()> {
        self.fetch(ApiRequest::delete(format!("/faq/faqs/{id}")))
            .await?;
        info!(faq_id = id, "faq deleted");
        Ok(())
    }
}

/// Records from `data.data`, `data`, or the body itself; anything else is
/// an empty list.
fn faq_list(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut fields) => match fields.remove("data") {
            Some(Value::Array(items)) => items,
            Some(Value::Object(mut inner)) => match inner.remove("data") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Captured, api_for};
    use axum::Json;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{delete, get, post};
    use serde_json::json;

    #[test]
    fn faq_list_shapes() {
        assert_eq!(faq_list(json!({"data": {"data": [1, 2]}})).len(), 2);
        assert_eq!(faq_list(json!({"data": [1]})).len(), 1);
        assert_eq!(faq_list(json!([1, 2, 3])).len(), 3);
        assert!(faq_list(json!({"data": {"items": [1]}})).is_empty());
        assert!(faq_list(json!("nothing")).is_empty());
    }

    #[test]
    fn new_faq_trims_and_defaults_category() {
        let faq = NewFaq::new("  How do I pay? ", " Cash or card ", None).unwrap();
        assert_eq!(faq.question, "How do I pay?");
        assert_eq!(faq.answer, "Cash or card");
        assert_eq!(faq.category, 0);

        assert!(NewFaq::new("   ", "answer", Some(2)).is_err());
    }

    #[tokio::test]
    async fn create_posts_trimmed_body() {
        let bodies = Captured::default();
        let seen = bodies.clone();
        let app = axum::Router::new().route(
            CREATE_PATH,
            post(move |Json(body): Json<Value>| {
                let seen = seen.clone();
                async move {
                    seen.push(body);
                    Json(json!({"isSuccess": true, "data": {"id": "f-1"}}))
                }
            }),
        );
        let t = api_for(app).await;

        let created = t
            .api
            .create_faq(&NewFaq::new(" Q ", " A ", Some(3)).unwrap())
            .await
            .unwrap();
        assert_eq!(created, Some(json!({"id": "f-1"})));
        assert_eq!(
            bodies.all(),
            vec![json!({"question": "Q", "answer": "A", "category": 3})]
        );
    }

    #[tokio::test]
    async fn create_failure_uses_default_message() {
        let app = axum::Router::new().route(
            CREATE_PATH,
            post(|| async { Json(json!({"isSuccess": false})) }),
        );
        let t = api_for(app).await;

        let err = t
            .api
            .create_faq(&NewFaq::new("Q", "A", None).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to create FAQ");
    }

    #[tokio::test]
    async fn delete_hits_id_path() {
        let ids = Captured::default();
        let seen = ids.clone();
        let app = axum::Router::new()
            .route(
                "/faq/faqs/{id}",
                delete(move |Path(id): Path<String>| {
                    let seen = seen.clone();
                    async move {
                        seen.push(json!(id));
                        StatusCode::NO_CONTENT
                    }
                }),
            )
            .route(LIST_PATH, get(|| async { Json(json!([])) }));
        let t = api_for(app).await;

        t.api.delete_faq("f-9").await.unwrap();
        assert_eq!(ids.all(), vec![json!("f-9")]);
        assert!(t.api.list_faqs(PageRequest::new(1, FAQ_PAGE_SIZE)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_failure_is_gateway_status() {
        let app = axum::Router::new().route(
            "/faq/faqs/{id}",
            delete(|| async { StatusCode::NOT_FOUND }),
        );
        let t = api_for(app).await;

        let err = t.api.delete_faq("missing").await.unwrap_err();
        match err {
            Error::Gateway(e) => assert_eq!(e.status(), Some(StatusCode::NOT_FOUND)),
            other => panic!("expected gateway error, got {other:?}"),
        }
    }
}
