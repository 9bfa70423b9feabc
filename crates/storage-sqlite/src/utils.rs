//! Helpers shared by the repositories.

use std::fmt::Display;
use std::str::FromStr;

use crate::errors::StorageError;

/// Rows per multi-row INSERT.
///
/// Keeps statements well under SQLite's bound-parameter limit for the widest
/// table.
pub const INSERT_CHUNK_ROWS: usize = 50;

/// Chunk a slice for batch inserts.
pub fn chunk_for_insert<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(INSERT_CHUNK_ROWS)
}

/// Parses a TEXT column back into its domain type.
pub fn parse_stored<T>(column: &str, value: &str) -> Result<T, StorageError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse::<T>()
        .map_err(|e| StorageError::InvalidData(format!("{} = '{}': {}", column, value, e)))
}

/// Maps `(stored value, count)` rows from a GROUP BY back into domain keys.
pub fn parse_counts<T>(
    column: &str,
    rows: Vec<(String, i64)>,
) -> Result<Vec<(T, i64)>, StorageError>
where
    T: FromStr,
    T::Err: Display,
{
    rows.into_iter()
        .map(|(value, count)| Ok((parse_stored(column, &value)?, count)))
        .collect()
}
