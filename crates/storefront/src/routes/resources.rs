//! Generic CRUD handlers shared by every collection.
//!
//! [`collection_routes`] mounts the operations a [`Collection`] supports.
//! Listing is the only operation with per-collection behaviour: products
//! are filtered and paginated, users can be looked up by email.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::MethodRouter,
};
use bson::Document;
use serde_json::{Map, Value};
use tracing::instrument;

use electron_core::{
    Collection, DeleteAck, DocumentId, InsertAck, Operation, UpdateAck, document_from_json,
    document_to_json,
};

use super::{products, users};
use crate::db::CollectionRepository;
use crate::error::Result;
use crate::state::AppState;

/// JSON object body accepted by create and update.
type Body = Json<Map<String, Value>>;

/// Mount the supported operations of `collection` at its path.
pub fn collection_routes(collection: Collection) -> Router<AppState> {
    let mut index = MethodRouter::<AppState>::new();
    if collection.supports(Operation::List) {
        index = match collection {
            Collection::Products => index.get(products::index),
            Collection::Users => index.get(users::index),
            _ => index.get(move |State(state): State<AppState>| list(state, collection)),
        };
    }
    if collection.supports(Operation::Create) {
        index = index.post(move |State(state): State<AppState>, Json(body): Body| {
            create(state, collection, body)
        });
    }

    let mut item = MethodRouter::<AppState>::new();
    if collection.supports(Operation::Update) {
        item = item.put(
            move |State(state): State<AppState>, Path(id): Path<String>, Json(body): Body| {
                update(state, collection, id, body)
            },
        );
    }
    if collection.supports(Operation::Delete) {
        item = item.delete(move |State(state): State<AppState>, Path(id): Path<String>| {
            delete(state, collection, id)
        });
    }

    let router = Router::new().route(collection.path(), index);
    if collection.supports(Operation::Update) || collection.supports(Operation::Delete) {
        router.route(&format!("{}/{{id}}", collection.path()), item)
    } else {
        router
    }
}

/// Render store documents as a JSON array body.
pub fn render(documents: Vec<Document>) -> Vec<Value> {
    documents.into_iter().map(document_to_json).collect()
}

/// List every document in the collection.
#[instrument(skip(state))]
pub async fn list(state: AppState, collection: Collection) -> Result<Json<Vec<Value>>> {
    let documents = CollectionRepository::new(state.store(), collection)
        .list()
        .await?;
    Ok(Json(render(documents)))
}

/// Insert the request body as a new document.
#[instrument(skip(state, body))]
pub async fn create(
    state: AppState,
    collection: Collection,
    body: Map<String, Value>,
) -> Result<Json<InsertAck>> {
    let document = document_from_json(&body)?;
    let ack = CollectionRepository::new(state.store(), collection)
        .create(document)
        .await?;

    tracing::info!(%collection, inserted_id = %ack.inserted_id, "Document created");
    Ok(Json(ack))
}

/// Merge the request body into the document with `id`.
#[instrument(skip(state, body))]
pub async fn update(
    state: AppState,
    collection: Collection,
    id: String,
    body: Map<String, Value>,
) -> Result<Json<UpdateAck>> {
    let id = DocumentId::parse(&id)?;
    let patch = document_from_json(&body)?;
    let ack = CollectionRepository::new(state.store(), collection)
        .update(id, patch)
        .await?;

    tracing::info!(
        %collection,
        %id,
        matched = ack.matched_count,
        modified = ack.modified_count,
        "Document updated"
    );
    Ok(Json(ack))
}

/// Delete the document with `id`.
#[instrument(skip(state))]
pub async fn delete(state: AppState, collection: Collection, id: String) -> Result<Json<DeleteAck>> {
    let id = DocumentId::parse(&id)?;
    let ack = CollectionRepository::new(state.store(), collection)
        .delete(id)
        .await?;

    tracing::info!(%collection, %id, deleted = ack.deleted_count, "Document deleted");
    Ok(Json(ack))
}
