//! Clause builders.
//!
//! Each function produces exactly one clause as a [`Fragment`]. They are pure
//! and independent of each other; [`super::SelectQuery`] decides which ones are
//! used and in what order.

use super::fragment::{Direction, Fragment};
use super::ident::{ColumnRef, Table};
use super::value::SqlValue;

/// `SELECT [DISTINCT ON ("t"."c")] "t"."c", ... FROM "table"`
///
/// Columns are listed in the given order; callers decode rows by position.
pub fn selection(table: Table, fields: &[ColumnRef], distinct: Option<ColumnRef>) -> Fragment {
    let mut fragment = Fragment::new().keyword("SELECT ");

    if let Some(column) = distinct {
        fragment = fragment
            .keyword("DISTINCT ON (")
            .column(column)
            .keyword(") ");
    }

    fragment
        .join(", ", fields.iter().map(|c| Fragment::new().column(*c)))
        .keyword(" FROM ")
        .table(table)
}

/// `LEFT JOIN "joined" ON "base"."base_column" = "joined"."joined_column"`
pub fn left_join(base: Table, joined: ColumnRef, base_column: ColumnRef) -> Fragment {
    debug_assert_eq!(base_column.table(), base);

    Fragment::new()
        .keyword("LEFT JOIN ")
        .table(joined.table())
        .keyword(" ON ")
        .column(base_column)
        .keyword(" = ")
        .column(joined)
}

/// `WHERE "t"."c" = $n`
pub fn filter(column: ColumnRef, value: SqlValue) -> Fragment {
    Fragment::new()
        .keyword("WHERE ")
        .column(column)
        .keyword(" = ")
        .value(value)
}

/// `ORDER BY "t"."c" ASC, "t"."c" DESC, ...`
///
/// Keys keep their order; later keys break ties of earlier ones.
pub fn sort(keys: &[(ColumnRef, Direction)]) -> Fragment {
    Fragment::new().keyword("ORDER BY ").join(
        ", ",
        keys.iter().map(|(column, direction)| {
            Fragment::new()
                .column(*column)
                .keyword(" ")
                .direction(*direction)
        }),
    )
}
