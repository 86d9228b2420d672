//! `MongoDB`-backed document store.

use std::time::Duration;

use async_trait::async_trait;
use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{
    Client, Database,
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{ClientOptions, ServerApi, ServerApiVersion},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use electron_core::{Collection, DeleteAck, InsertAck, Pagination, UpdateAck, bson_to_json};

use super::{DocumentStore, StoreError};

/// Server error code for unique index violations.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Fail fast instead of hanging on an unreachable cluster.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const APP_NAME: &str = "electron-storefront";

impl From<MongoError> for StoreError {
    fn from(err: MongoError) -> Self {
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. } => Self::Unavailable(err.to_string()),
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY_CODE =>
            {
                Self::DuplicateKey(write_error.message.clone())
            }
            _ => Self::Database(err),
        }
    }
}

/// Document store over a single `MongoDB` database.
///
/// The driver's client is internally pooled and cheap to clone; one
/// instance is created at startup and shared by every request.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Connect to the cluster at `database_url` and ping it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the connection string cannot be parsed or
    /// the ping fails.
    pub async fn connect(database_url: &SecretString, database: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(database_url.expose_secret()).await?;
        options.app_name = Some(APP_NAME.to_owned());
        options
            .server_selection_timeout
            .get_or_insert(SERVER_SELECTION_TIMEOUT);
        options.connect_timeout.get_or_insert(CONNECT_TIMEOUT);
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());

        let client = Client::with_options(options)?;
        let store = Self {
            database: client.database(database),
            client,
        };

        store.ping().await?;
        info!(database, "Connected to MongoDB");

        Ok(store)
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.database.collection(collection.store_name())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(
        &self,
        collection: Collection,
        filter: Document,
        page: Option<Pagination>,
    ) -> Result<Vec<Document>, StoreError> {
        debug!(%collection, ?filter, ?page, "find");

        let coll = self.collection(collection);
        let mut find = coll.find(filter);
        if let Some(page) = page {
            find = find
                .skip(page.skip)
                .limit(i64::try_from(page.limit).unwrap_or(i64::MAX));
        }

        let cursor = find.await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        debug!(%collection, ?filter, "find_one");
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertAck, StoreError> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(InsertAck::new(bson_to_json(result.inserted_id)))
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        patch: Document,
    ) -> Result<UpdateAck, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": patch })
            .await?;
        Ok(UpdateAck::new(result.matched_count, result.modified_count))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<DeleteAck, StoreError> {
        let result = self.collection(collection).delete_one(filter).await?;
        Ok(DeleteAck::new(result.deleted_count))
    }

    async fn delete_many(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<DeleteAck, StoreError> {
        let result = self.collection(collection).delete_many(filter).await?;
        Ok(DeleteAck::new(result.deleted_count))
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        Ok(self.collection(collection).count_documents(doc! {}).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
