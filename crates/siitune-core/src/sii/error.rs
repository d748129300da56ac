//! Error types for field extraction

use thiserror::Error;

/// Errors that can occur while extracting fields from a document
///
/// Individual missing or malformed fields are never errors; they degrade to
/// absent values so a best-effort edit of a human-authored file still
/// produces a usable result.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The block keyword for the requested kind is absent from the document
    #[error("no `{keyword}` block found in document")]
    BlockNotFound {
        /// Keyword that was searched for
        keyword: &'static str,
    },
}
