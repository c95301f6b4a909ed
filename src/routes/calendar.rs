use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::cycle::predictor::{classify_month, CalendarDay};
use crate::error::AppError;
use crate::store::SharedStore;

use super::extract::ApiQuery;

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub user_id: Uuid,
    pub year: i32,
    pub month: u32,
}

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/calendar", get(get_calendar))
        .with_state(store)
}

async fn get_calendar(
    State(store): State<SharedStore>,
    ApiQuery(query): ApiQuery<CalendarQuery>,
) -> Result<Json<Vec<CalendarDay>>, AppError> {
    let logs = store.list_entries(query.user_id).await?;
    let config = store.cycle_config(query.user_id).await?;

    let days = classify_month(query.year, query.month, &logs, &config)?;
    tracing::debug!(
        user_id = %query.user_id,
        year = query.year,
        month = query.month,
        "📅 Calendar rendered"
    );

    Ok(Json(days))
}
