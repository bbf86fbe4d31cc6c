//! HTTP access to registered pages.
//!
//! - [`fetcher`] - [`PageFetcher`](crate::domain::page_fetcher::PageFetcher) over `reqwest`
//! - [`html`] - Extraction of page metadata with `scraper`

pub mod fetcher;
pub mod html;

pub use fetcher::ReqwestPageFetcher;
pub use html::extract_page_summary;
