use axum::{routing::get, Router};

use crate::store::SharedStore;

pub mod advice;
pub mod calendar;
pub mod entries;
pub mod extract;
pub mod insights;
pub mod periods;
pub mod profile;

/// Every route, sharing one store.
pub fn app(store: SharedStore) -> Router {
    Router::new()
        .merge(entries::routes(store.clone()))
        .merge(profile::routes(store.clone()))
        .merge(calendar::routes(store.clone()))
        .merge(periods::routes(store.clone()))
        .merge(insights::routes(store))
        .merge(advice::routes())
        .route("/health", get(|| async { "✅ Backend up" }))
}


#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use super::test_support::{send, test_app};

    #[tokio::test]
    async fn health_is_up() {
        let app = test_app();
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_str(), Some("✅ Backend up"));
    }
}
