//! HTML page handlers and the health endpoint.

mod checks;
mod health;
mod index;
mod urls;

pub use checks::create_check_handler;
pub use health::health_handler;
pub use index::{IndexTemplate, index_handler};
pub use urls::{create_url_handler, list_urls_handler, show_url_handler};
