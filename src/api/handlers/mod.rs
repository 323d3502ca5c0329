//! REST endpoint handlers organized by resource.

pub mod contact;
pub mod system;
pub mod visitor;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(system::routes())
        .merge(contact::routes())
        .merge(visitor::routes())
}
