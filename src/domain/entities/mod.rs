//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Url`] - A registered site origin
//! - [`Check`] - One check of a Url
//! - [`UrlListing`] - A Url paired with its most recent check
//!
//! Input structs (`NewCheck`, `PageSummary`) carry data for records that do
//! not exist yet.

pub mod check;
pub mod url;

pub use check::{Check, NewCheck, PageSummary};
pub use url::{Url, UrlListing};
