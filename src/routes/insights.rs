use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cycle::{analyze, summarize, IrregularityReport, WellnessSummary};
use crate::error::AppError;
use crate::store::SharedStore;

use super::extract::ApiQuery;

#[derive(Deserialize)]
pub struct InsightsQuery {
    pub user_id: Uuid,
    /// Reference day for the trailing window; defaults to the current UTC date.
    pub today: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct InsightsResponse {
    /// `null` until two period starts have been logged.
    pub irregularity: Option<IrregularityReport>,
    pub wellness: WellnessSummary,
}

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/insights", get(get_insights))
        .with_state(store)
}

async fn get_insights(
    State(store): State<SharedStore>,
    ApiQuery(query): ApiQuery<InsightsQuery>,
) -> Result<Json<InsightsResponse>, AppError> {
    let logs = store.list_entries(query.user_id).await?;
    let config = store.cycle_config(query.user_id).await?;
    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());

    let irregularity = analyze(&logs, &config);
    if let Some(report) = &irregularity {
        tracing::debug!(
            user_id = %query.user_id,
            last_cycle = report.last.days,
            severity = ?report.severity,
            "🔎 Irregularity computed"
        );
    }

    Ok(Json(InsightsResponse {
        irregularity,
        wellness: summarize(&logs, today),
    }))
}
