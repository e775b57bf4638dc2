use async_trait::async_trait;
use domain::{BoardList, Card, CommentRecord, RemoteId};
use serde::Deserialize;
use tracing::debug;

use crate::error::StoreError;
use crate::traits::{CardStore, CommentStore};

const API_BASE: &str = "https://api.trello.com/1";

#[derive(Clone)]
pub struct TrelloConfig {
    pub api_key: String,
    pub token: String,
    /// Board short link or full id; every call is scoped to this board.
    pub board: String,
}

/// Thin client over the hosted board's REST API. Authentication rides as
/// `key`/`token` query parameters on every request.
pub struct TrelloClient {
    http: reqwest::Client,
    config: TrelloConfig,
}

/// Comments arrive as card "actions"; only `data.text` matters here.
#[derive(Deserialize)]
struct CommentAction {
    id: RemoteId,
    data: CommentActionData,
}

#[derive(Deserialize)]
struct CommentActionData {
    text: String,
}

impl TrelloClient {
    pub fn new(config: TrelloConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{API_BASE}{path}")
    }

    fn auth(&self) -> [(&str, &str); 2] {
        [
            ("key", self.config.api_key.as_str()),
            ("token", self.config.token.as_str()),
        ]
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(StoreError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, StoreError> {
        let resp = self
            .http
            .get(self.url(path))
            .query(&self.auth())
            .query(params)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json::<T>().await?)
    }

    async fn put(&self, path: &str, params: &[(&str, &str)]) -> Result<(), StoreError> {
        let resp = self
            .http
            .put(self.url(path))
            .query(&self.auth())
            .query(params)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}

#[async_trait]
impl CardStore for TrelloClient {
    async fn board_lists(&self) -> Result<Vec<BoardList>, StoreError> {
        self.get_json(&format!("/boards/{}/lists", self.config.board), &[])
            .await
    }

    async fn cards_in_list(&self, list_id: &RemoteId) -> Result<Vec<Card>, StoreError> {
        self.get_json(&format!("/lists/{list_id}/cards"), &[]).await
    }

    async fn create_card(
        &self,
        name: &str,
        list_id: &RemoteId,
        desc: &str,
    ) -> Result<Card, StoreError> {
        let resp = self
            .http
            .post(self.url("/cards"))
            .query(&self.auth())
            .query(&[("name", name), ("idList", list_id.as_str()), ("desc", desc)])
            .send()
            .await?;
        let card: Card = Self::check(resp).await?.json().await?;
        debug!(card = %card.id, "card created");
        Ok(card)
    }

    async fn move_card(&self, card_id: &RemoteId, list_id: &RemoteId) -> Result<(), StoreError> {
        self.put(&format!("/cards/{card_id}"), &[("idList", list_id.as_str())])
            .await
    }

    async fn set_description(&self, card_id: &RemoteId, text: &str) -> Result<(), StoreError> {
        self.put(&format!("/cards/{card_id}/desc"), &[("value", text)])
            .await
    }
}

#[async_trait]
impl CommentStore for TrelloClient {
    async fn list_comments(&self, card_id: &RemoteId) -> Result<Vec<CommentRecord>, StoreError> {
        let actions: Vec<CommentAction> = self
            .get_json(
                &format!("/cards/{card_id}/actions"),
                &[("filter", "commentCard")],
            )
            .await?;
        Ok(actions
            .into_iter()
            .map(|a| CommentRecord {
                id: a.id,
                text: a.data.text,
            })
            .collect())
    }

    async fn create_comment(&self, card_id: &RemoteId, text: &str) -> Result<(), StoreError> {
        let resp = self
            .http
            .post(self.url(&format!("/cards/{card_id}/actions/comments")))
            .query(&self.auth())
            .query(&[("text", text)])
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn edit_comment(&self, comment_id: &RemoteId, text: &str) -> Result<(), StoreError> {
        self.put(&format!("/actions/{comment_id}/text"), &[("value", text)])
            .await
    }

    async fn delete_comment(&self, comment_id: &RemoteId) -> Result<(), StoreError> {
        let resp = self
            .http
            .delete(self.url(&format!("/actions/{comment_id}")))
            .query(&self.auth())
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}
