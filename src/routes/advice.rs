use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::cycle::advice::pain_advice;
use crate::error::AppError;
use crate::models::{level, MAX_BLOOD_LEVEL, MAX_PAIN_LEVEL};

use super::extract::ApiJson;

#[derive(Deserialize)]
pub struct PainAdviceRequest {
    #[serde(default)]
    pub pain: i64,
    #[serde(default)]
    pub blood: i64,
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize)]
pub struct PainAdviceResponse {
    pub tips: Vec<&'static str>,
}

pub fn routes() -> Router {
    Router::new().route("/pain-advice", post(get_pain_advice))
}

async fn get_pain_advice(
    ApiJson(body): ApiJson<PainAdviceRequest>,
) -> Result<Json<PainAdviceResponse>, AppError> {
    let pain = level("pain", body.pain, MAX_PAIN_LEVEL).map_err(AppError::BadRequest)?;
    let blood = level("blood", body.blood, MAX_BLOOD_LEVEL).map_err(AppError::BadRequest)?;

    Ok(Json(PainAdviceResponse {
        tips: pain_advice(pain, blood, &body.text),
    }))
}
