use async_trait::async_trait;
use domain::{BoardList, Card, CommentRecord, RemoteId};

use crate::error::StoreError;

/// Card-level operations of the remote board.
#[async_trait]
pub trait CardStore: Send + Sync {
    async fn board_lists(&self) -> Result<Vec<BoardList>, StoreError>;
    async fn cards_in_list(&self, list_id: &RemoteId) -> Result<Vec<Card>, StoreError>;
    async fn create_card(
        &self,
        name: &str,
        list_id: &RemoteId,
        desc: &str,
    ) -> Result<Card, StoreError>;
    async fn move_card(&self, card_id: &RemoteId, list_id: &RemoteId) -> Result<(), StoreError>;
    async fn set_description(&self, card_id: &RemoteId, text: &str) -> Result<(), StoreError>;
}

/// Comment-thread operations of the remote board. The reconciliation applier
/// only talks to this seam, so tests can run against an in-memory store.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn list_comments(&self, card_id: &RemoteId) -> Result<Vec<CommentRecord>, StoreError>;
    async fn create_comment(&self, card_id: &RemoteId, text: &str) -> Result<(), StoreError>;
    async fn edit_comment(&self, comment_id: &RemoteId, text: &str) -> Result<(), StoreError>;
    async fn delete_comment(&self, comment_id: &RemoteId) -> Result<(), StoreError>;
}
