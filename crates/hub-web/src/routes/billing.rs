//! Billing summary.

use axum::extract::State;
use axum::Json;
use database::subscription;
use hub_core::Plan;
use serde::Serialize;

use crate::error::Result;
use crate::session::Session;
use crate::state::AppState;

/// What the billing page shows.
#[derive(Debug, Clone, Serialize)]
pub struct Billing {
    pub plan: String,
    pub plan_name: Option<&'static str>,
    /// Status of the latest subscription, if any.
    pub status: Option<String>,
    pub renewal_date: Option<String>,
    pub monthly_amount_cents: u32,
}

pub async fn billing_api(State(state): State<AppState>, session: Session) -> Result<Json<Billing>> {
    let profile = session.profile;
    let latest = subscription::latest_subscription(state.db.pool(), &session.user_id).await?;

    // The profile keeps the account label ("starter") until a plan is bought.
    let plan = profile.plan.parse::<Plan>().ok();

    Ok(Json(Billing {
        plan: profile.plan,
        plan_name: plan.map(|p| p.display_name()),
        status: latest.map(|s| s.status),
        renewal_date: profile.renewal_date,
        monthly_amount_cents: plan.map(|p| p.monthly_price_cents()).unwrap_or(0),
    }))
}
