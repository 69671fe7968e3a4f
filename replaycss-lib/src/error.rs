use thiserror::Error;

/// Errors produced while rewriting references in captured CSS.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    /// Either the base address or a resolved reference is not a valid URL.
    #[error("invalid address `{address}`")]
    InvalidAddress {
        address: String,
        #[source]
        source: url::ParseError,
    },
}

impl RewriteError {
    pub(crate) fn invalid_address(address: &str, source: url::ParseError) -> Self {
        RewriteError::InvalidAddress {
            address: address.to_string(),
            source,
        }
    }
}
