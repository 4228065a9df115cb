use axum::{http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::contact::validation::ContactRequest;
use crate::errors::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: Uuid,
    pub status: &'static str,
    pub received_at: DateTime<Utc>,
}

/// POST /api/v1/contact
///
/// There is no mail transport; accepted submissions are logged.
pub async fn handle_contact(
    Json(request): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    request.validate()?;

    let response = ContactResponse {
        id: Uuid::new_v4(),
        status: "received",
        received_at: Utc::now(),
    };

    info!(
        id = %response.id,
        name = %request.name.trim(),
        email = %request.email.trim(),
        message_chars = request.message.chars().count(),
        "Contact form submitted"
    );

    Ok((StatusCode::ACCEPTED, Json(response)))
}
