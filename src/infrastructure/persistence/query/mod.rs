//! Injection-safe query construction for the page analyzer schema.
//!
//! Queries are assembled from small clause builders ([`clause`]) into a token
//! [`Fragment`], then rendered once into a parameterized
//! [`sqlx::QueryBuilder`]. Identifiers come from a closed set ([`ident`]) and
//! are quoted into the SQL text; values ([`SqlValue`]) are always bound as
//! `$n` parameters.
//!
//! - [`SelectQuery`] - `SELECT [DISTINCT ON] ... [LEFT JOIN] [WHERE] [ORDER BY]`
//! - [`InsertQuery`] - `INSERT ... VALUES ... [RETURNING]` with a server timestamp

pub mod clause;
pub mod fragment;
pub mod ident;
pub mod insert;
pub mod select;
pub mod value;

pub use fragment::{Direction, Fragment};
pub use ident::{Column, ColumnRef, Table, url_checks, urls};
pub use insert::InsertQuery;
pub use select::SelectQuery;
pub use value::SqlValue;
