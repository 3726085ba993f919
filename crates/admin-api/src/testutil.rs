//! Mock backend wiring shared by the resource tests

use std::sync::{Arc, Mutex};
use std::time::Duration;

use admin_auth::CredentialStore;
use admin_gateway::{Gateway, GatewayConfig};
use serde_json::Value;
use tokio::net::TcpListener;

use crate::AdminApi;

pub(crate) struct TestApi {
    pub api: AdminApi,
    _dir: tempfile::TempDir,
}

/// Serve `app` on an ephemeral port and build a client logged in as `A1`.
pub(crate) async fn api_for(app: axum::Router) -> TestApi {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(
        CredentialStore::load(dir.path().join("session.json"))
            .await
            .unwrap(),
    );
    store
        .store_tokens("A1".into(), Some("R1".into()))
        .await
        .unwrap();

    let gateway = Gateway::new(
        reqwest::Client::new(),
        GatewayConfig {
            base_url: format!("http://{addr}"),
            timeout: Duration::from_secs(5),
            refresh_timeout: Duration::from_secs(5),
        },
        store,
        Arc::new(|_: &str| {}),
    );
    TestApi {
        api: AdminApi::new(Arc::new(gateway)),
        _dir: dir,
    }
}

/// Captured request bodies or query strings, in arrival order.
#[derive(Clone, Default)]
pub(crate) struct Captured(Arc<Mutex<Vec<Value>>>);

impl Captured {
    pub fn push(&self, value: Value) {
        self.0.lock().unwrap().push(value);
    }

    pub fn all(&self) -> Vec<Value> {
        self.0.lock().unwrap().clone()
    }
}
