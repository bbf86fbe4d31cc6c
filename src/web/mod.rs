//! Web layer: server-rendered pages for registering and checking Urls.
//!
//! Uses Askama templates for server-side rendering and a signed cookie for
//! one-shot flash messages.
//!
//! # Modules
//!
//! - [`handlers`] - Page handlers and the health endpoint
//! - [`dto`] - Form and JSON payloads
//! - [`extract`] - Path extractors
//! - [`flash`] - Signed flash-message cookie
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod extract;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod routes;
