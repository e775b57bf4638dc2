mod models;
pub mod normalize;
pub mod reconcile;

pub use models::{BoardList, Card, CommentRecord, Operation, RemoteId};
pub use normalize::{base_text, is_stamped, normalize_block, STAMP_FORMAT};
pub use reconcile::plan;
