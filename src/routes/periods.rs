use axum::{
    extract::State,
    routing::get,
    Json, Router,
};

use crate::cycle::history::bleeding_runs;
use crate::error::AppError;
use crate::models::{BleedingRun, UserQuery};
use crate::store::SharedStore;

use super::extract::ApiQuery;

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/period-history", get(get_period_history))
        .with_state(store)
}

pub async fn get_period_history(
    State(store): State<SharedStore>,
    ApiQuery(params): ApiQuery<UserQuery>,
) -> Result<Json<Vec<BleedingRun>>, AppError> {
    let logs = store.list_entries(params.user_id).await?;
    Ok(Json(bleeding_runs(&logs)))
}
