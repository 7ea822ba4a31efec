use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::transport::Request;
use crate::types::{AsyncUpdateId, DocumentsQuery};

use super::Index;

impl Index {
    /// Queue documents for addition. Existing documents with the same primary
    /// key are replaced. Creates the index if it does not exist.
    pub async fn add_documents<T: Serialize + Sync>(
        &self,
        documents: &[T],
    ) -> Result<AsyncUpdateId> {
        self.push_documents(Method::POST, documents, None, "AddDocuments")
            .await
    }

    pub async fn add_documents_with_primary_key<T: Serialize + Sync>(
        &self,
        documents: &[T],
        primary_key: &str,
    ) -> Result<AsyncUpdateId> {
        self.push_documents(
            Method::POST,
            documents,
            Some(primary_key),
            "AddDocumentsWithPrimaryKey",
        )
        .await
    }

    /// Queue a partial update: fields present in `documents` overwrite, the
    /// rest of each stored document is kept.
    pub async fn update_documents<T: Serialize + Sync>(
        &self,
        documents: &[T],
    ) -> Result<AsyncUpdateId> {
        self.push_documents(Method::PUT, documents, None, "UpdateDocuments")
            .await
    }

    pub async fn update_documents_with_primary_key<T: Serialize + Sync>(
        &self,
        documents: &[T],
        primary_key: &str,
    ) -> Result<AsyncUpdateId> {
        self.push_documents(
            Method::PUT,
            documents,
            Some(primary_key),
            "UpdateDocumentsWithPrimaryKey",
        )
        .await
    }

    #[instrument(skip(self, documents), fields(index = %self.uid, count = documents.len()))]
    async fn push_documents<T: Serialize + Sync>(
        &self,
        method: Method,
        documents: &[T],
        primary_key: Option<&str>,
        function: &'static str,
    ) -> Result<AsyncUpdateId> {
        let mut request = Request::new(method, self.path(&["documents"]), &[202], function)
            .with_json(documents)?;
        if let Some(pk) = primary_key {
            request = request.with_query(vec![("primaryKey", pk.to_string())]);
        }

        let update: AsyncUpdateId = self.transport().execute(request).await?;
        debug!(update_id = update.update_id, "documents enqueued");
        Ok(update)
    }

    #[instrument(skip(self), fields(index = %self.uid))]
    pub async fn get_document<T: DeserializeOwned>(&self, document_id: &str) -> Result<T> {
        let request = Request::get(self.path(&["documents", document_id]), "GetDocument");
        self.transport().execute(request).await
    }

    #[instrument(skip(self, query), fields(index = %self.uid))]
    pub async fn get_documents<T: DeserializeOwned>(
        &self,
        query: &DocumentsQuery,
    ) -> Result<Vec<T>> {
        let mut params = Vec::new();
        if let Some(offset) = query.offset {
            params.push(("offset", offset.to_string()));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        if !query.attributes_to_retrieve.is_empty() {
            params.push((
                "attributesToRetrieve",
                query.attributes_to_retrieve.join(","),
            ));
        }

        let request = Request::get(self.path(&["documents"]), "GetDocuments").with_query(params);
        self.transport().execute(request).await
    }

    #[instrument(skip(self), fields(index = %self.uid))]
    pub async fn delete_document(&self, document_id: &str) -> Result<AsyncUpdateId> {
        let request = Request::new(
            Method::DELETE,
            self.path(&["documents", document_id]),
            &[202],
            "DeleteDocument",
        );
        self.transport().execute(request).await
    }

    #[instrument(skip(self, document_ids), fields(index = %self.uid, count = document_ids.len()))]
    pub async fn delete_documents(&self, document_ids: &[String]) -> Result<AsyncUpdateId> {
        let request = Request::new(
            Method::POST,
            self.path(&["documents", "delete-batch"]),
            &[202],
            "DeleteDocuments",
        )
        .with_json(document_ids)?;
        self.transport().execute(request).await
    }

    #[instrument(skip(self), fields(index = %self.uid))]
    pub async fn delete_all_documents(&self) -> Result<AsyncUpdateId> {
        let request = Request::new(
            Method::DELETE,
            self.path(&["documents"]),
            &[202],
            "DeleteAllDocuments",
        );
        self.transport().execute(request).await
    }
}
