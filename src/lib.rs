// Reusable library API — visible to both CLI and WASM builds
pub mod constraints;
pub mod corpus;
pub mod errors;
pub mod filter;
pub mod log;
pub mod parser;
pub mod request;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use constraints::{ConstraintSet, LettersAtPositions, PositionalRule};
pub use corpus::{Corpus, CorpusError};
#[cfg(not(target_arch = "wasm32"))]
pub use corpus::CorpusCache;
pub use errors::ParseError;
#[cfg(not(target_arch = "wasm32"))]
pub use filter::search;
pub use filter::{filter_words, search_corpus, SearchResult, WordFilter};
pub use request::SearchRequest;
