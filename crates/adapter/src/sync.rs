use anyhow::Context;
use chrono::Local;
use domain::{normalize_block, plan, Operation, RemoteId};
use serde::Serialize;
use tracing::{debug, info};

use crate::traits::CommentStore;

/// How many operations of each kind a reconciliation applied.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconcileOutcome {
    pub deleted: usize,
    pub edited: usize,
    pub created: usize,
}

/// Brings a card's remote comment thread into agreement with the submitted
/// text block.
///
/// Reads the thread fresh, normalizes the block with a single wall-clock
/// read (so every new line and edit marker of one call carries the same
/// stamp), then applies the planned operations in order: deletes, edits,
/// creates. The batch is not transactional: the first remote failure aborts
/// the remaining operations and already-applied ones stay applied; the error
/// context records how far the batch got. A resubmission starts from a fresh
/// read and picks up the rest.
pub async fn reconcile_thread<S: CommentStore + ?Sized>(
    store: &S,
    card_id: &RemoteId,
    raw_block: &str,
) -> anyhow::Result<ReconcileOutcome> {
    let existing = store
        .list_comments(card_id)
        .await
        .with_context(|| format!("listing comments of card {card_id}"))?;

    let now = Local::now().naive_local();
    let desired = normalize_block(raw_block, now);
    let ops = plan(&existing, &desired, now);
    let total = ops.len();
    debug!(card = %card_id, existing = existing.len(), desired = desired.len(), ops = total, "comment thread planned");

    let mut outcome = ReconcileOutcome::default();
    for (applied, op) in ops.into_iter().enumerate() {
        match op {
            Operation::Delete { id } => {
                store.delete_comment(&id).await.with_context(|| {
                    format!("deleting comment {id}; batch aborted after {applied}/{total} operations")
                })?;
                outcome.deleted += 1;
            }
            Operation::Edit { id, text } => {
                store.edit_comment(&id, &text).await.with_context(|| {
                    format!("editing comment {id}; batch aborted after {applied}/{total} operations")
                })?;
                outcome.edited += 1;
            }
            Operation::Create { text } => {
                store.create_comment(card_id, &text).await.with_context(|| {
                    format!("creating comment; batch aborted after {applied}/{total} operations")
                })?;
                outcome.created += 1;
            }
        }
    }

    info!(
        card = %card_id,
        deleted = outcome.deleted,
        edited = outcome.edited,
        created = outcome.created,
        "comment thread reconciled"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use async_trait::async_trait;
    use domain::CommentRecord;
    use std::sync::Mutex;

    /// In-memory thread that records the order of calls it receives.
    #[derive(Default)]
    struct MemStore {
        comments: Mutex<Vec<CommentRecord>>,
        calls: Mutex<Vec<String>>,
        fail_on: Option<&'static str>,
        next_id: Mutex<u32>,
    }

    impl MemStore {
        fn seeded(texts: &[(&str, &str)]) -> Self {
            let comments = texts
                .iter()
                .map(|(id, text)| CommentRecord {
                    id: RemoteId::new_unchecked(id.to_string()),
                    text: text.to_string(),
                })
                .collect();
            Self {
                comments: Mutex::new(comments),
                ..Default::default()
            }
        }

        fn texts(&self) -> Vec<String> {
            self.comments
                .lock()
                .unwrap()
                .iter()
                .map(|c| c.text.clone())
                .collect()
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn fail_if(&self, kind: &str) -> Result<(), StoreError> {
            if self.fail_on == Some(kind) {
                return Err(StoreError::Api {
                    status: 503,
                    body: "unavailable".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CommentStore for MemStore {
        async fn list_comments(&self, _card: &RemoteId) -> Result<Vec<CommentRecord>, StoreError> {
            Ok(self.comments.lock().unwrap().clone())
        }

        async fn create_comment(&self, _card: &RemoteId, text: &str) -> Result<(), StoreError> {
            self.calls.lock().unwrap().push(format!("create {text}"));
            self.fail_if("create")?;
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            self.comments.lock().unwrap().push(CommentRecord {
                id: RemoteId::new_unchecked(format!("new{next}")),
                text: text.to_string(),
            });
            Ok(())
        }

        async fn edit_comment(&self, id: &RemoteId, text: &str) -> Result<(), StoreError> {
            self.calls.lock().unwrap().push(format!("edit {id}"));
            self.fail_if("edit")?;
            let mut comments = self.comments.lock().unwrap();
            if let Some(c) = comments.iter_mut().find(|c| &c.id == id) {
                c.text = text.to_string();
            }
            Ok(())
        }

        async fn delete_comment(&self, id: &RemoteId) -> Result<(), StoreError> {
            self.calls.lock().unwrap().push(format!("delete {id}"));
            self.fail_if("delete")?;
            self.comments.lock().unwrap().retain(|c| &c.id != id);
            Ok(())
        }
    }

    fn card() -> RemoteId {
        RemoteId::new_unchecked("card1".to_string())
    }

    #[tokio::test]
    async fn resubmitting_the_current_thread_applies_nothing() {
        let store = MemStore::seeded(&[("a", "2024-01-01 10:00 — A"), ("b", "2024-01-01 11:00 — B")]);
        let outcome = reconcile_thread(&store, &card(), "2024-01-01 10:00 — A\n2024-01-01 11:00 — B")
            .await
            .unwrap();
        assert_eq!(outcome, ReconcileOutcome::default());
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn applies_deletes_then_edits_then_creates() {
        let store = MemStore::seeded(&[
            ("old", "2024-01-01 09:00 — Old news"),
            ("keep", "2024-01-01 10:00 — Keep me"),
            ("fix", "2024-01-01 11:00 — Fix me (editado em 2024-01-02 08:00)"),
        ]);
        let block = "2024-01-01 10:00 — Keep me\n2024-01-01 11:00 — Fix me\nBrand new";
        let outcome = reconcile_thread(&store, &card(), block).await.unwrap();

        assert_eq!(outcome.deleted, 1);
        assert_eq!(outcome.edited, 1);
        assert_eq!(outcome.created, 1);

        let calls = store.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], "delete old");
        assert_eq!(calls[1], "edit fix");
        assert!(calls[2].starts_with("create "));
        assert!(calls[2].ends_with("— Brand new"));

        let texts = store.texts();
        assert_eq!(texts.len(), 3);
        assert!(texts.contains(&"2024-01-01 10:00 — Keep me".to_string()));
        assert!(texts
            .iter()
            .any(|t| t.starts_with("2024-01-01 11:00 — Fix me (editado em ")));
    }

    #[tokio::test]
    async fn failure_aborts_the_rest_without_rolling_back() {
        let mut store = MemStore::seeded(&[("old", "2024-01-01 09:00 — Old news")]);
        store.fail_on = Some("edit");
        store.comments.lock().unwrap().push(CommentRecord {
            id: RemoteId::new_unchecked("fix".to_string()),
            text: "2024-01-01 11:00 — Fix me (editado em 2024-01-02 08:00)".to_string(),
        });

        let block = "2024-01-01 11:00 — Fix me\nBrand new";
        let err = reconcile_thread(&store, &card(), block).await.unwrap_err();
        assert!(err.to_string().contains("batch aborted after 1/3"));

        // The delete stayed applied, the create was never attempted.
        let calls = store.calls();
        assert_eq!(calls, vec!["delete old".to_string(), "edit fix".to_string()]);
        assert!(!store.texts().contains(&"2024-01-01 09:00 — Old news".to_string()));
    }
}
