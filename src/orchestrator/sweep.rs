use crate::framework::StoreError;
use crate::model::{AuxiliaryCollection, FieldQuery, UserId, WriteBatch, USER_ID_FIELD};
use crate::orchestrator::{DeletionError, DeletionOrchestrator};
use tracing::{debug, info, warn};

impl DeletionOrchestrator {
    /// Deletes every document of `collection` owned by `uid` and returns how many.
    ///
    /// All pages are gathered before anything is deleted, so the cursor never
    /// points at a document removed by this sweep. Nothing is committed when the
    /// collection holds no match.
    pub(super) async fn sweep(
        &self,
        uid: &UserId,
        collection: AuxiliaryCollection,
    ) -> Result<usize, DeletionError> {
        let fail = |source: StoreError| {
            warn!(%collection, error = %source, "Sweep failed");
            DeletionError::CollectionSweep { collection, source }
        };

        let mut batch = WriteBatch::new();
        let mut cursor = None;
        loop {
            let query = FieldQuery::eq(collection.as_str(), USER_ID_FIELD, uid.as_str())
                .limit(self.page_size)
                .start_after(cursor.take());
            let page = self.documents.query(query).await.map_err(fail)?;
            debug!(%collection, matched = page.refs.len(), "Fetched page");
            batch.extend(page.refs);
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        if batch.is_empty() {
            debug!(%collection, "Nothing to delete");
            return Ok(0);
        }

        let deleted = batch.len();
        self.documents.commit(batch).await.map_err(fail)?;
        info!(%collection, deleted, "Swept collection");
        Ok(deleted)
    }
}
