//! Contact form handlers: submit and list.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ContactCreatedResponse, ContactRequest, MessageListResponse};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse, ValidationError};

const SUBMIT_FAILED: &str = "Something went wrong. Please try again later.";
const LIST_FAILED: &str = "Failed to retrieve messages.";
const THANK_YOU: &str = "Thank you! Your message has been received.";

/// `POST /contact` — Submit a contact form message.
///
/// # Errors
///
/// Returns [`ApiError`] with 400 on invalid input and 500 when the
/// message cannot be stored.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contact",
    summary = "Submit a contact message",
    description = "Validates name, email and message, then stores the trimmed message.",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message stored", body = ContactCreatedResponse),
        (status = 400, description = "Missing field or invalid email", body = ErrorResponse),
        (status = 500, description = "Message could not be stored", body = ErrorResponse),
    )
)]
pub async fn create_message(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        state.errors.reject(
            ValidationError::MalformedBody(rejection.body_text()).into(),
            SUBMIT_FAILED,
        )
    })?;

    let receipt = state
        .contacts
        .submit(
            req.name.as_deref(),
            req.email.as_deref(),
            req.message.as_deref(),
        )
        .await
        .map_err(|e| state.errors.reject(e, SUBMIT_FAILED))?;

    Ok((
        StatusCode::CREATED,
        Json(ContactCreatedResponse {
            success: true,
            message: THANK_YOU.to_string(),
            id: receipt.id,
            created_at: receipt.created_at,
        }),
    ))
}

/// `GET /messages` — List all contact messages, newest first.
///
/// # Errors
///
/// Returns [`ApiError`] with 500 when the store cannot be read.
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "Contact",
    summary = "List contact messages",
    description = "Returns every stored contact message ordered by creation time, newest first.",
    responses(
        (status = 200, description = "All messages", body = MessageListResponse),
        (status = 500, description = "Messages could not be read", body = ErrorResponse),
    )
)]
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = state
        .contacts
        .list()
        .await
        .map_err(|e| state.errors.reject(e, LIST_FAILED))?;

    Ok(Json(MessageListResponse {
        total: messages.len(),
        messages,
    }))
}

/// Contact routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(create_message))
        .route("/messages", get(list_messages))
}
