use adapter::TrelloClient;
use search::DocSources;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub trello: Arc<TrelloClient>,
    pub sources: Arc<DocSources>,
}
