//! FAQ routes: manual entries, website imports and CSV uploads.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use database::faq;
use database::models::Faq;
use hub_core::{parse_faq_csv, FaqDraft};
use serde::{Deserialize, Serialize};

use crate::error::{HubError, Result};
use crate::extract::JsonBody;
use crate::routes::Saved;
use crate::session::Session;
use crate::state::AppState;

/// List the user's FAQs, newest first.
pub async fn list_api(State(state): State<AppState>, session: Session) -> Result<Json<Vec<Faq>>> {
    let faqs = faq::list_faqs(state.db.pool(), &session.user_id).await?;
    Ok(Json(faqs))
}

/// Manual FAQ form.
#[derive(Deserialize)]
pub struct ManualFaq {
    pub question: String,
    pub answer: String,
}

/// Add a manual FAQ.
pub async fn create_api(
    State(state): State<AppState>,
    session: Session,
    JsonBody(req): JsonBody<ManualFaq>,
) -> Result<Json<Saved<Faq>>> {
    let draft = FaqDraft::manual(req.question, req.answer);
    let record = faq::create_faq(state.db.pool(), &session.user_id, &draft).await?;
    Ok(Json(Saved::new("FAQ added", record)))
}

/// Website import form.
#[derive(Deserialize)]
pub struct WebsiteFaq {
    pub url: String,
}

/// Record a website to import FAQs from.
pub async fn website_api(
    State(state): State<AppState>,
    session: Session,
    JsonBody(req): JsonBody<WebsiteFaq>,
) -> Result<Json<Saved<Faq>>> {
    let draft = FaqDraft::website(req.url);
    let record = faq::create_faq(state.db.pool(), &session.user_id, &draft).await?;
    Ok(Json(Saved::new("Website added. FAQs will be imported shortly.", record)))
}

/// Outcome of a CSV upload.
#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub imported: usize,
}

/// Import FAQs from an uploaded CSV file. The body is the file text.
pub async fn import_api(
    State(state): State<AppState>,
    session: Session,
    body: Bytes,
) -> Result<Json<Saved<ImportResult>>> {
    let text = std::str::from_utf8(&body)
        .map_err(|_| HubError::BadRequest("CSV file must be UTF-8 text".to_string()))?;
    let drafts = parse_faq_csv(text)?;
    let imported = faq::insert_faqs(state.db.pool(), &session.user_id, &drafts).await?;

    Ok(Json(Saved::new(
        format!("Imported {} FAQs from CSV", imported),
        ImportResult { imported },
    )))
}

/// Delete one of the user's FAQs.
pub async fn delete_api(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Saved<serde_json::Value>>> {
    faq::delete_faq(state.db.pool(), &session.user_id, &id).await?;
    Ok(Json(Saved::new("FAQ deleted", serde_json::json!({ "id": id }))))
}
