pub mod document_loaders;
pub mod error;
pub mod llms;
pub mod prompts;
pub mod resolver;
pub mod schema;
pub mod summarize;
pub mod text_splitters;
pub mod traits;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Re-exports for common types
pub mod prelude {
    pub use crate::document_loaders::*;
    pub use crate::error::Error;
    pub use crate::llms::*;
    pub use crate::resolver::{resolve, validate_url};
    pub use crate::schema::*;
    pub use crate::summarize::{Summarizer, SummaryChain};
    pub use crate::text_splitters::*;
    pub use crate::traits::*;
    pub use crate::Result;
}
