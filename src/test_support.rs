//! In-process mock servers for adapter and service tests

use axum::Router;
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Serve `app` on an ephemeral localhost port and return its base URL.
pub async fn spawn_mock(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Requests seen by a mock handler, in arrival order.
#[derive(Clone, Default)]
pub struct RequestLog {
    seen: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl RequestLog {
    pub fn record(&self, request: impl Serialize) {
        let value = serde_json::to_value(request).unwrap();
        self.seen.lock().unwrap().push(value);
    }

    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn single(&self) -> serde_json::Value {
        let seen = self.seen.lock().unwrap();
        assert_eq!(seen.len(), 1, "expected exactly one request");
        seen[0].clone()
    }
}
