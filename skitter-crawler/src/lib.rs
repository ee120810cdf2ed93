pub mod crawler;
pub mod error;
pub mod parser;
pub mod result;

pub use crawler::{Crawler, ResultCallback};
pub use error::CrawlError;
pub use result::CrawlResult;
