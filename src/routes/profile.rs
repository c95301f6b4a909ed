use std::ops::RangeInclusive;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};

use crate::error::AppError;
use crate::models::{CycleConfig, ProfileUpdate, UserQuery};
use crate::store::SharedStore;

use super::extract::{ApiJson, ApiQuery};

/// Ranges offered by the settings form.
const CYCLE_LENGTH_RANGE: RangeInclusive<i64> = 20..=60;
const PERIOD_LENGTH_RANGE: RangeInclusive<i64> = 1..=10;

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .with_state(store)
}

async fn get_profile(
    State(store): State<SharedStore>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> Result<Json<CycleConfig>, AppError> {
    Ok(Json(store.cycle_config(query.user_id).await?))
}

async fn update_profile(
    State(store): State<SharedStore>,
    ApiJson(body): ApiJson<ProfileUpdate>,
) -> Result<Json<CycleConfig>, AppError> {
    let current = store.cycle_config(body.user_id).await?;

    let cycle = body
        .cycle_length_days
        .unwrap_or(current.cycle_length_days());
    let period = body
        .period_length_days
        .unwrap_or(current.period_length_days());
    check_range("cycle_length_days", cycle, CYCLE_LENGTH_RANGE)?;
    check_range("period_length_days", period, PERIOD_LENGTH_RANGE)?;

    let config = CycleConfig::new(cycle, period)?;
    store.update_config(body.user_id, config).await?;
    tracing::info!(user_id = %body.user_id, cycle, period, "⚙️ Cycle settings updated");

    Ok(Json(config))
}

fn check_range(name: &str, value: i64, range: RangeInclusive<i64>) -> Result<(), AppError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "{name} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        )))
    }
}
