use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("reaction catalog is empty")]
    Empty,

    /// A reaction must be a single symbol (one extended grapheme cluster).
    #[error("reaction {0:?} is not a single symbol")]
    NotASingleSymbol(String),
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("an overlay host is already installed on this thread")]
    AlreadyInstalled,
}
