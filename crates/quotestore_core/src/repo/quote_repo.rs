//! Quote repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist, soft-delete and load rows of the `quotes` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `NewQuote::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Rows are never physically removed here.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::quote::{NewQuote, Quote, QuoteId, QuoteValidationError};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const QUOTES_TABLE: &str = "quotes";
const QUOTE_COLUMNS: [&str; 5] = ["qid", "quote", "attrib_name", "attrib_date", "deleted"];
const QUOTE_DATE_FORMAT: &str = "%Y-%m-%d";

const QUOTE_SELECT_SQL: &str = "SELECT
    qid,
    quote,
    attrib_name,
    attrib_date,
    deleted
FROM quotes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from quote persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Input rejected before reaching storage.
    Validation(QuoteValidationError),
    /// Storage refused a write that breaks a column constraint.
    ConstraintViolation(DbError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// No row carries this id.
    NotFound(QuoteId),
    /// Persisted data cannot be converted into a valid `Quote`.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ConstraintViolation(err) => write!(f, "constraint violation: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "quote not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted quote data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "quote repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "quote repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "quote repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::ConstraintViolation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<QuoteValidationError> for RepoError {
    fn from(value: QuoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        if value.is_constraint_violation() {
            Self::ConstraintViolation(value)
        } else {
            Self::Db(value)
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::from(DbError::Sqlite(value))
    }
}

/// Repository interface for quote storage.
pub trait QuoteRepository {
    /// Inserts a new active quote and returns the row as stored.
    fn create_quote(&self, quote: &NewQuote) -> RepoResult<Quote>;
    /// Loads one quote. Tombstoned rows are only returned when
    /// `include_deleted` is set.
    fn get_quote(&self, id: QuoteId, include_deleted: bool) -> RepoResult<Option<Quote>>;
    /// Flags one quote as deleted. Already tombstoned rows stay tombstoned.
    fn soft_delete_quote(&self, id: QuoteId) -> RepoResult<()>;
    /// Counts stored rows, optionally including tombstones.
    fn count_quotes(&self, include_deleted: bool) -> RepoResult<u64>;
}

/// SQLite-backed quote repository.
pub struct SqliteQuoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuoteRepository<'conn> {
    /// Creates a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not current.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the `quotes`
    ///   table does not have the expected shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_quote_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl QuoteRepository for SqliteQuoteRepository<'_> {
    fn create_quote(&self, quote: &NewQuote) -> RepoResult<Quote> {
        quote.validate()?;

        let mut stmt = self.conn.prepare(
            "INSERT INTO quotes (quote, attrib_name, attrib_date)
             VALUES (?1, ?2, ?3)
             RETURNING qid, quote, attrib_name, attrib_date, deleted;",
        )?;
        let mut rows = stmt.query(params![
            quote.text.as_str(),
            quote.attributed_name.as_deref(),
            quote.attributed_date,
        ])?;

        let created = match rows.next()? {
            Some(row) => parse_quote_row(row)?,
            None => {
                return Err(RepoError::InvalidData(
                    "insert into quotes returned no row".to_string(),
                ));
            }
        };
        Ok(created)
    }

    fn get_quote(&self, id: QuoteId, include_deleted: bool) -> RepoResult<Option<Quote>> {
        let mut stmt = self.conn.prepare(&format!(
            "{QUOTE_SELECT_SQL}
             WHERE qid = ?1
               AND (?2 = 1 OR deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id, bool_to_int(include_deleted)])?;
        let loaded = match rows.next()? {
            Some(row) => Some(parse_quote_row(row)?),
            None => None,
        };
        Ok(loaded)
    }

    fn soft_delete_quote(&self, id: QuoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("UPDATE quotes SET deleted = 1 WHERE qid = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn count_quotes(&self, include_deleted: bool) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM quotes WHERE (?1 = 1 OR deleted = 0);",
            [bool_to_int(include_deleted)],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative quote count `{count}`")))
    }
}

fn parse_quote_row(row: &Row<'_>) -> RepoResult<Quote> {
    let attributed_date = match row.get::<_, Option<String>>("attrib_date")? {
        Some(value) => Some(parse_quote_date(&value)?),
        None => None,
    };

    let deleted = match row.get::<_, i64>("deleted")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid deleted value `{other}` in quotes.deleted"
            )));
        }
    };

    let quote = Quote {
        id: row.get("qid")?,
        text: row.get("quote")?,
        attributed_name: row.get("attrib_name")?,
        attributed_date,
        deleted,
    };
    quote.validate()?;
    Ok(quote)
}

fn parse_quote_date(value: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, QUOTE_DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{value}` in quotes.attrib_date"))
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn ensure_quote_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, QUOTES_TABLE)? {
        return Err(RepoError::MissingRequiredTable(QUOTES_TABLE));
    }

    for column in QUOTE_COLUMNS {
        if !table_has_column(conn, QUOTES_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: QUOTES_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::{parse_quote_date, RepoError};
    use crate::db::DbError;
    use rusqlite::ffi;

    #[test]
    fn parse_quote_date_accepts_iso_dates() {
        let date = parse_quote_date("1999-12-31").expect("ISO date should parse");
        assert_eq!(date.to_string(), "1999-12-31");
    }

    #[test]
    fn parse_quote_date_rejects_other_formats() {
        let err = parse_quote_date("31/12/1999").expect_err("non-ISO date must be rejected");
        assert!(matches!(err, RepoError::InvalidData(message) if message.contains("attrib_date")));
    }

    #[test]
    fn constraint_failures_map_to_constraint_violation() {
        let failure = rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_CONSTRAINT_NOTNULL),
            Some("NOT NULL constraint failed: quotes.quote".to_string()),
        );
        assert!(matches!(
            RepoError::from(failure),
            RepoError::ConstraintViolation(DbError::Sqlite(_))
        ));

        let other = rusqlite::Error::QueryReturnedNoRows;
        assert!(matches!(RepoError::from(other), RepoError::Db(_)));
    }
}
