pub mod discovery;
pub mod error;
pub mod resolve;
pub mod search;

// Re-export commonly used utilities
pub use discovery::scan_markdown_files;
pub use error::{ResolutionError, SearchError};
pub use resolve::{ResolvedDocument, resolve_document, sanitize_path};
pub use search::{FileMatches, SearchMatch, search_documents};
