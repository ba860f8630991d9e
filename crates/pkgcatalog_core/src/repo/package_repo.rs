//! Package repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable lookup/insert/backfill APIs over the `packages` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Candidate selection treats `''` and the sentinel summary identically.
//! - `list_needing_summary` orders by name so backfill processing (and its
//!   quota cutoff) is deterministic.

use crate::db::DbError;
use crate::model::package::{Package, NO_SUMMARY_SENTINEL};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for package persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(name) => write!(f, "package not found: {name}"),
            Self::InvalidData(message) => write!(f, "invalid persisted package data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is not migrated to {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table is missing: {table}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for catalog reconciliation.
pub trait PackageRepository {
    /// Looks up one package by exact name. `Ok(None)` means not cataloged.
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Package>>;
    /// Inserts a new package row.
    fn insert(&self, package: &Package) -> RepoResult<()>;
    /// Lists backfill candidates (summary `''` or sentinel), ordered by name.
    fn list_needing_summary(&self) -> RepoResult<Vec<Package>>;
    /// Replaces the summary of an existing package.
    fn set_summary(&self, name: &str, summary: &str) -> RepoResult<()>;
    /// Counts all cataloged packages.
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed package repository.
///
/// Built over a borrowed connection so the run controller can hand it a
/// transaction: all mutations stay staged until the controller commits.
pub struct SqlitePackageRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePackageRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PackageRepository for SqlitePackageRepository<'_> {
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Package>> {
        let package = self
            .conn
            .query_row(
                "SELECT name, summary FROM packages WHERE name = ?1;",
                [name],
                parse_package_row,
            )
            .optional()?;
        Ok(package)
    }

    fn insert(&self, package: &Package) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO packages (name, summary) VALUES (?1, ?2);",
            params![package.name.as_str(), package.summary.as_str()],
        )?;
        Ok(())
    }

    fn list_needing_summary(&self) -> RepoResult<Vec<Package>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, summary FROM packages
             WHERE summary IN ('', ?1)
             ORDER BY name ASC;",
        )?;

        let mut rows = stmt.query([NO_SUMMARY_SENTINEL])?;
        let mut packages = Vec::new();
        while let Some(row) = rows.next()? {
            packages.push(parse_package_row(row)?);
        }

        Ok(packages)
    }

    fn set_summary(&self, name: &str, summary: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE packages SET summary = ?1 WHERE name = ?2;",
            params![summary, name],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(name.to_string()));
        }

        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM packages;", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn parse_package_row(row: &Row<'_>) -> Result<Package, rusqlite::Error> {
    Ok(Package {
        name: row.get("name")?,
        summary: row.get("summary")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = crate::db::migrations::latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_present: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'packages';",
            [],
            |row| row.get(0),
        )
        .optional()?;
    if table_present.is_none() {
        return Err(RepoError::MissingRequiredTable("packages"));
    }

    Ok(())
}
