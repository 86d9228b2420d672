//! User route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use electron_core::{Collection, document_to_json};

use super::resources::render;
use crate::db::{CollectionRepository, UserRepository};
use crate::error::Result;
use crate::state::AppState;

/// User listing query parameters.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub email: Option<String>,
}

/// List users, or fetch one by email.
///
/// With `email`, responds with the matching user or `null`. Without it,
/// responds with every user.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Value>> {
    if let Some(email) = query.email.as_deref().filter(|email| !email.is_empty()) {
        let user = UserRepository::new(state.store())
            .get_by_email(email)
            .await?;
        return Ok(Json(user.map_or(Value::Null, document_to_json)));
    }

    let users = CollectionRepository::new(state.store(), Collection::Users)
        .list()
        .await?;
    Ok(Json(Value::Array(render(users))))
}
