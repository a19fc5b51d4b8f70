//! Dashboard routes.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use database::models::Subscription;
use database::{custom_request, subscription};
use hub_core::{resolve_all, AgentStatus, Channel, ChannelStatuses};
use serde::Serialize;

use crate::error::Result;
use crate::routes::me::CurrentUser;
use crate::session::Session;
use crate::state::AppState;

/// One channel card on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelView {
    pub channel: Channel,
    pub agent_name: &'static str,
    pub status: AgentStatus,
}

/// Custom request totals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RequestTotals {
    pub total: i64,
    pub by_status: BTreeMap<String, i64>,
}

/// Everything the dashboard home screen shows.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub user: CurrentUser,
    pub channels: Vec<ChannelView>,
    pub active_count: usize,
    pub subscription: Option<Subscription>,
    pub requests: RequestTotals,
}

fn channel_views(statuses: &ChannelStatuses) -> Vec<ChannelView> {
    Channel::ALL
        .into_iter()
        .map(|channel| ChannelView {
            channel,
            agent_name: channel.agent_name(),
            status: statuses.get(channel),
        })
        .collect()
}

/// Resolve the user's channels from their latest subscription.
async fn load_statuses(
    state: &AppState,
    user_id: &str,
) -> Result<(Option<Subscription>, ChannelStatuses)> {
    let latest = subscription::latest_subscription(state.db.pool(), user_id).await?;
    let statuses = resolve_all(latest.as_ref().map(Subscription::snapshot).as_ref());
    Ok((latest, statuses))
}

/// Get the dashboard summary.
pub async fn dashboard_api(State(state): State<AppState>, session: Session) -> Result<Json<Dashboard>> {
    let (latest, statuses) = load_statuses(&state, &session.user_id).await?;

    let counts = custom_request::count_requests_by_status(state.db.pool(), &session.user_id).await?;
    let requests = RequestTotals {
        total: counts.iter().map(|(_, count)| *count).sum(),
        by_status: counts.into_iter().collect(),
    };

    Ok(Json(Dashboard {
        user: session.profile.into(),
        channels: channel_views(&statuses),
        active_count: statuses.count(AgentStatus::Active),
        subscription: latest,
        requests,
    }))
}

/// Get the three channel statuses.
pub async fn channels_api(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<ChannelView>>> {
    let (_, statuses) = load_statuses(&state, &session.user_id).await?;
    Ok(Json(channel_views(&statuses)))
}
