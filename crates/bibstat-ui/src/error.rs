//! Error types
//!
//! Only binding construction can fail. Page operations degrade to
//! no-ops instead of returning errors.

use bibstat_dom::SelectorError;

/// Errors raised while building widget bindings
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("invalid selector {selector:?}: {source}")]
    Selector {
        selector: String,
        #[source]
        source: SelectorError,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, UiError>;
