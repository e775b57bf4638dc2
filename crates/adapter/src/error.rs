/// Failure of a single call against the remote board API. The caller decides
/// whether to abort a batch; nothing here retries.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("transport error talking to the board API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("board API rejected the call (HTTP {status}): {body}")]
    Api { status: u16, body: String },
}
