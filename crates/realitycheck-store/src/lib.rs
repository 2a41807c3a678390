//! Reality Check Storage Layer
//!
//! Implements the `RecordStore` trait on SQLite. Validators open stores
//! read-only; the write helpers exist to create and seed stores.
//!
//! # Examples
//!
//! ```no_run
//! use realitycheck_domain::RecordStore;
//! use realitycheck_store::SqliteRecordStore;
//!
//! let store = SqliteRecordStore::open_read_only("data/realitycheck.db").unwrap();
//! let tables = store.table_names().unwrap();
//! ```

#![warn(missing_docs)]

pub mod codec;
pub mod location;

pub use location::{resolve_from_env, resolve_location, LocationOrigin, StoreLocation};

use codec::{decode_embedding, decode_id_list, encode_embedding, encode_id_list};
use realitycheck_domain::{AnalysisLog, Chain, Claim, Numeric, Prediction, RecordStore, Source};
use rusqlite::types::{Type, Value};
use rusqlite::{params, Connection, OpenFlags, Row};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// List column could not be encoded or decoded
    #[error("Invalid list column: {0}")]
    ListColumn(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of `RecordStore`
///
/// SQLite connections are not thread-safe. Each validation run opens its own.
pub struct SqliteRecordStore {
    conn: Connection,
}

impl SqliteRecordStore {
    /// Open an existing store without write access
    ///
    /// Fails if the file does not exist or is not an SQLite database.
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        // SQLite opens lazily; touch the schema so a non-database file fails here
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))?;
        debug!(path = %path.display(), "Opened record store read-only");
        Ok(Self { conn })
    }

    /// Create (or open) a store at `path` with the full schema
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Create an in-memory store with the full schema (useful for testing)
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::create(":memory:")
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Insert or replace a claim
    pub fn insert_claim(&mut self, claim: &Claim) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO claims (id, text, type, domain, evidence_level, credence,
                source_ids, supports, contradicts, depends_on, modified_by, part_of_chain,
                version, last_updated, embedding)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                &claim.id,
                &claim.text,
                &claim.claim_type,
                &claim.domain,
                &claim.evidence_level,
                numeric_value(&claim.credence),
                encode_id_list(&claim.source_ids)?,
                encode_id_list(&claim.supports)?,
                encode_id_list(&claim.contradicts)?,
                encode_id_list(&claim.depends_on)?,
                encode_id_list(&claim.modified_by)?,
                &claim.part_of_chain,
                claim.version,
                &claim.last_updated,
                claim.embedding.as_deref().map(encode_embedding),
            ],
        )?;
        Ok(())
    }

    /// Insert or replace a source
    pub fn insert_source(&mut self, source: &Source) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO sources (id, type, title, reliability, claims_extracted)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &source.id,
                &source.source_type,
                &source.title,
                numeric_value(&source.reliability),
                encode_id_list(&source.claims_extracted)?,
            ],
        )?;
        Ok(())
    }

    /// Insert or replace a chain
    pub fn insert_chain(&mut self, chain: &Chain) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO chains (id, thesis, credence, claims, scoring_method)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &chain.id,
                &chain.thesis,
                numeric_value(&chain.credence),
                encode_id_list(&chain.claims)?,
                &chain.scoring_method,
            ],
        )?;
        Ok(())
    }

    /// Insert or replace a prediction record
    pub fn insert_prediction(&mut self, prediction: &Prediction) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO predictions (claim_id, source_id, status) VALUES (?1, ?2, ?3)",
            params![&prediction.claim_id, &prediction.source_id, &prediction.status],
        )?;
        Ok(())
    }

    /// Insert or replace an analysis log
    pub fn insert_analysis_log(&mut self, log: &AnalysisLog) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO analysis_logs (id, source_id, status, tool, claims_extracted,
                claims_updated, stages_json, duration_seconds, cost_usd)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                &log.id,
                &log.source_id,
                &log.status,
                &log.tool,
                encode_id_list(&log.claims_extracted)?,
                encode_id_list(&log.claims_updated)?,
                &log.stages_json,
                log.duration_seconds,
                log.cost_usd,
            ],
        )?;
        Ok(())
    }

    fn list<T>(
        &self,
        sql: &str,
        limit: usize,
        map: impl Fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params![limit], |row| map(row))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

/// Numeric column; text or blob values read as `None`
fn number(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<f64>> {
    Ok(match row.get::<_, Value>(idx)? {
        Value::Real(v) => Some(v),
        Value::Integer(v) => Some(v as f64),
        _ => None,
    })
}

/// Probability column; non-numeric text is kept for reporting
fn numeric(row: &Row<'_>, idx: usize) -> rusqlite::Result<Numeric> {
    Ok(match row.get::<_, Value>(idx)? {
        Value::Real(v) => Numeric::Number(v),
        Value::Integer(v) => Numeric::Number(v as f64),
        Value::Text(s) => Numeric::Text(s),
        Value::Null | Value::Blob(_) => Numeric::Null,
    })
}

fn numeric_value(value: &Numeric) -> Value {
    match value {
        Numeric::Null => Value::Null,
        Numeric::Number(v) => Value::Real(*v),
        Numeric::Text(s) => Value::Text(s.clone()),
    }
}

/// Text column; numbers are rendered, blobs read as `None`
fn text(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get::<_, Value>(idx)? {
        Value::Text(s) => Some(s),
        Value::Integer(v) => Some(v.to_string()),
        Value::Real(v) => Some(v.to_string()),
        Value::Null | Value::Blob(_) => None,
    })
}

fn id_list(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<String>> {
    let raw = text(row, idx)?;
    decode_id_list(raw.as_deref())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn embedding(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Vec<f32>>> {
    match row.get::<_, Option<Vec<u8>>>(idx)? {
        Some(bytes) => decode_embedding(&bytes)
            .map(Some)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Blob, Box::new(e))),
        None => Ok(None),
    }
}

impl RecordStore for SqliteRecordStore {
    type Error = StoreError;

    fn table_names(&self) -> Result<Vec<String>, Self::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn list_claims(&self, limit: usize) -> Result<Vec<Claim>, Self::Error> {
        self.list(
            "SELECT id, text, type, domain, evidence_level, credence, source_ids, supports,
                    contradicts, depends_on, modified_by, part_of_chain, version, last_updated,
                    embedding
             FROM claims ORDER BY id LIMIT ?1",
            limit,
            |row| {
                Ok(Claim {
                    id: text(row, 0)?.unwrap_or_default(),
                    text: text(row, 1)?.unwrap_or_default(),
                    claim_type: text(row, 2)?.unwrap_or_default(),
                    domain: text(row, 3)?.unwrap_or_default(),
                    evidence_level: text(row, 4)?.unwrap_or_default(),
                    credence: numeric(row, 5)?,
                    source_ids: id_list(row, 6)?,
                    supports: id_list(row, 7)?,
                    contradicts: id_list(row, 8)?,
                    depends_on: id_list(row, 9)?,
                    modified_by: id_list(row, 10)?,
                    part_of_chain: text(row, 11)?.filter(|s| !s.is_empty()),
                    version: number(row, 12)?.map(|v| v as i64).unwrap_or(1),
                    last_updated: text(row, 13)?,
                    embedding: embedding(row, 14)?,
                })
            },
        )
    }

    fn list_sources(&self, limit: usize) -> Result<Vec<Source>, Self::Error> {
        self.list(
            "SELECT id, type, title, reliability, claims_extracted
             FROM sources ORDER BY id LIMIT ?1",
            limit,
            |row| {
                Ok(Source {
                    id: text(row, 0)?.unwrap_or_default(),
                    source_type: text(row, 1)?.unwrap_or_default(),
                    title: text(row, 2)?.unwrap_or_default(),
                    reliability: numeric(row, 3)?,
                    claims_extracted: id_list(row, 4)?,
                })
            },
        )
    }

    fn list_chains(&self, limit: usize) -> Result<Vec<Chain>, Self::Error> {
        self.list(
            "SELECT id, thesis, credence, claims, scoring_method
             FROM chains ORDER BY id LIMIT ?1",
            limit,
            |row| {
                Ok(Chain {
                    id: text(row, 0)?.unwrap_or_default(),
                    thesis: text(row, 1)?.unwrap_or_default(),
                    credence: numeric(row, 2)?,
                    claims: id_list(row, 3)?,
                    scoring_method: text(row, 4)?,
                })
            },
        )
    }

    fn list_predictions(&self, limit: usize) -> Result<Vec<Prediction>, Self::Error> {
        self.list(
            "SELECT claim_id, source_id, status FROM predictions ORDER BY claim_id LIMIT ?1",
            limit,
            |row| {
                Ok(Prediction {
                    claim_id: text(row, 0)?.unwrap_or_default(),
                    source_id: text(row, 1)?.filter(|s| !s.is_empty()),
                    status: text(row, 2)?.unwrap_or_default(),
                })
            },
        )
    }

    fn list_analysis_logs(&self, limit: usize) -> Result<Vec<AnalysisLog>, Self::Error> {
        self.list(
            "SELECT id, source_id, status, tool, claims_extracted, claims_updated, stages_json,
                    duration_seconds, cost_usd
             FROM analysis_logs ORDER BY id LIMIT ?1",
            limit,
            |row| {
                Ok(AnalysisLog {
                    id: text(row, 0)?.unwrap_or_else(|| "UNKNOWN".to_string()),
                    source_id: text(row, 1)?.filter(|s| !s.is_empty()),
                    status: text(row, 2)?.unwrap_or_default(),
                    tool: text(row, 3)?.unwrap_or_default(),
                    claims_extracted: id_list(row, 4)?,
                    claims_updated: id_list(row, 5)?,
                    stages_json: text(row, 6)?,
                    duration_seconds: number(row, 7)?,
                    cost_usd: number(row, 8)?,
                })
            },
        )
    }
}
