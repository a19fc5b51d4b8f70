//! Public pricing and catalog options.

use axum::Json;
use hub_core::{Plan, PlanInfo, Urgency, REQUEST_CATEGORIES};
use serde::Serialize;

/// Every purchasable plan.
pub async fn pricing_api() -> Json<Vec<PlanInfo>> {
    Json(Plan::ALL.iter().map(Plan::info).collect())
}

/// An urgency choice on the request form.
#[derive(Debug, Clone, Serialize)]
pub struct UrgencyOption {
    pub value: Urgency,
    pub label: &'static str,
}

/// Choices offered by the custom request form.
#[derive(Debug, Clone, Serialize)]
pub struct RequestOptions {
    pub categories: Vec<&'static str>,
    pub urgencies: Vec<UrgencyOption>,
}

pub async fn request_options_api() -> Json<RequestOptions> {
    Json(RequestOptions {
        categories: REQUEST_CATEGORIES.to_vec(),
        urgencies: Urgency::ALL
            .into_iter()
            .map(|value| UrgencyOption {
                value,
                label: value.label(),
            })
            .collect(),
    })
}
