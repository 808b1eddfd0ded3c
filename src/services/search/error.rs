#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The trimmed query is shorter than two characters.
    #[error("Query too short")]
    EmptyQuery,
    /// The catalog client could not be created at startup.
    #[error("YTMusic API not initialized")]
    ProviderUnavailable,
}
