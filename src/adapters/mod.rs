//! Concrete collaborators: filesystem storage, HTTP page fetch, HTML parsing
//! and description generation.

pub mod describe;
pub mod html;
pub mod http;
pub mod storage;

pub use describe::{ChatDescriptionGenerator, StaticDescription};
pub use html::{parser_for, DatedTableParser, ListModeParser};
pub use http::HttpFetcher;
pub use storage::LocalStorage;
