mod client;
mod error;
mod sync;
mod traits;

pub use client::{TrelloClient, TrelloConfig};
pub use error::StoreError;
pub use sync::{reconcile_thread, ReconcileOutcome};
pub use traits::{CardStore, CommentStore};
