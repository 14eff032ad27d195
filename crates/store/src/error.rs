use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no stored file matches the identifier")]
    NotFound,

    #[error("{count} stored files match the identifier")]
    Ambiguous { count: usize },

    #[error("failed to read the upload listing")]
    Io(#[from] std::io::Error),
}
