//! Plan purchase and channel setup.

use axum::extract::State;
use axum::Json;
use database::models::Subscription;
use database::{subscription, ChannelSetup};
use hub_core::Plan;
use serde::{Deserialize, Serialize};

use crate::error::{HubError, Result};
use crate::extract::JsonBody;
use crate::routes::Saved;
use crate::session::Session;
use crate::state::AppState;

/// Request to purchase a plan.
#[derive(Deserialize)]
pub struct PurchaseRequest {
    pub plan: String,
}

/// Record a plan purchase. The subscription starts in `pending_setup`.
pub async fn purchase_api(
    State(state): State<AppState>,
    session: Session,
    JsonBody(req): JsonBody<PurchaseRequest>,
) -> Result<Json<Saved<Subscription>>> {
    let plan: Plan = req
        .plan
        .parse()
        .map_err(|_| HubError::BadRequest(format!("Unknown plan: {}", req.plan)))?;

    let record = subscription::create_subscription(state.db.pool(), &session.user_id, plan).await?;

    Ok(Json(Saved::new(
        format!("Subscribed to {}. Finish setup to activate your agents.", plan.display_name()),
        record,
    )))
}

/// WhatsApp setup form.
#[derive(Deserialize)]
pub struct WhatsappSetupRequest {
    pub phone: String,
}

/// Social setup form.
#[derive(Deserialize)]
pub struct SocialSetupRequest {
    pub platform: String,
}

/// Result of a setup step.
#[derive(Debug, Serialize)]
pub struct SetupResult {
    pub channel: hub_core::Channel,
    pub updated: u64,
}

async fn connect(state: &AppState, session: &Session, setup: ChannelSetup) -> Result<Json<Saved<SetupResult>>> {
    let channel = setup.channel();
    let updated = subscription::mark_channel_connected(state.db.pool(), &session.user_id, &setup).await?;

    Ok(Json(Saved::new(
        format!("{} connected", channel.agent_name()),
        SetupResult { channel, updated },
    )))
}

pub async fn setup_email_api(State(state): State<AppState>, session: Session) -> Result<Json<Saved<SetupResult>>> {
    connect(&state, &session, ChannelSetup::Email).await
}

pub async fn setup_whatsapp_api(
    State(state): State<AppState>,
    session: Session,
    JsonBody(req): JsonBody<WhatsappSetupRequest>,
) -> Result<Json<Saved<SetupResult>>> {
    connect(&state, &session, ChannelSetup::Whatsapp { phone: req.phone }).await
}

pub async fn setup_social_api(
    State(state): State<AppState>,
    session: Session,
    JsonBody(req): JsonBody<SocialSetupRequest>,
) -> Result<Json<Saved<SetupResult>>> {
    connect(&state, &session, ChannelSetup::Social { platform: req.platform }).await
}
