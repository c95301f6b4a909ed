use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::AppError;
use crate::models::{DeleteEntryRequest, EntriesResponse, NewEntry, SavedEntry, UserQuery};
use crate::store::SharedStore;

use super::extract::{ApiJson, ApiQuery};

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route(
            "/entries",
            get(list_entries).post(save_entry).delete(delete_entry),
        )
        .with_state(store)
}

async fn list_entries(
    State(store): State<SharedStore>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> Result<Json<EntriesResponse>, AppError> {
    let entries = store.list_entries(query.user_id).await?;
    let settings = store.cycle_config(query.user_id).await?;
    Ok(Json(EntriesResponse { entries, settings }))
}

async fn save_entry(
    State(store): State<SharedStore>,
    ApiJson(body): ApiJson<NewEntry>,
) -> Result<Json<SavedEntry>, AppError> {
    let user_id = body.user_id;
    let log = body.into_log().map_err(AppError::BadRequest)?;

    tracing::info!(%user_id, date = %log.date, blood = log.blood_level, "📝 Saving daily log");
    let entry = store.upsert_entry(user_id, log).await?;

    Ok(Json(SavedEntry { ok: true, entry }))
}

async fn delete_entry(
    State(store): State<SharedStore>,
    ApiJson(body): ApiJson<DeleteEntryRequest>,
) -> Result<StatusCode, AppError> {
    if store.delete_entry(body.user_id, body.date).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("no entry on {}", body.date)))
    }
}
