//! Wheel routes: spinning and checking the active grant.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use matera_core::{Money, PrizeKind, PromotionGrant};

use crate::error::ApiError;
use crate::services;
use crate::state::AppState;

/// An active discount grant as the UI sees it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantResponse {
    /// Promotion code to show the shopper.
    pub code: String,

    /// Discount amount before the subtotal clamp.
    pub amount: Money,

    /// Countdown for the UI timer.
    pub seconds_remaining: i64,
}

impl GrantResponse {
    fn from_grant(grant: &PromotionGrant) -> Self {
        GrantResponse {
            code: grant.code.clone(),
            amount: grant.amount,
            seconds_remaining: grant.seconds_remaining(Utc::now()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResponse {
    /// Label of the winning wedge.
    pub label: String,

    /// What the wedge awards.
    pub kind: PrizeKind,

    /// The granted discount, for discount wedges.
    pub grant: Option<GrantResponse>,
}

/// POST /api/wheel/spin
pub async fn spin_wheel(State(state): State<AppState>) -> Result<Json<SpinResponse>, ApiError> {
    let outcome = services::spin(&state)?;

    Ok(Json(SpinResponse {
        label: outcome.label,
        kind: outcome.kind,
        grant: outcome.grant.as_ref().map(GrantResponse::from_grant),
    }))
}

/// GET /api/wheel/grant
pub async fn get_grant(State(state): State<AppState>) -> Json<Option<GrantResponse>> {
    let grant = state.grants.active(Utc::now());
    Json(grant.as_ref().map(GrantResponse::from_grant))
}
