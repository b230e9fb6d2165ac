/// Error type shared across the workspace.
///
/// Adapter crates map their library errors into this enum so callers can tell
/// fatal startup problems (`Config`) from recoverable downstream ones
/// (`StoreUnavailable`, `SendFailure`), which the dispatcher inspects and
/// discards instead of propagating.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("counter store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("send failure: {0}")]
    SendFailure(String),
}

pub type Result<T> = std::result::Result<T, Error>;
