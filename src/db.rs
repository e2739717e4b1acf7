use anyhow::Result;
use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::model::{Amenities, Campground, Capacity, Contact, Location, Pricing, TrailAccess};

pub fn connect(path: &str) -> Result<Connection> {
    if let Some(dir) = std::path::Path::new(path).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS campgrounds (
            id           TEXT PRIMARY KEY,
            name         TEXT NOT NULL,
            description  TEXT,
            latitude     REAL NOT NULL,
            longitude    REAL NOT NULL,
            address      TEXT NOT NULL,
            city         TEXT NOT NULL,
            state        TEXT NOT NULL,
            zip_code     TEXT,
            phone        TEXT,
            email        TEXT,
            website      TEXT,
            amenities    TEXT NOT NULL,
            trail_access TEXT NOT NULL,
            pricing      TEXT NOT NULL,
            capacity     TEXT NOT NULL,
            images       TEXT,
            last_updated TEXT NOT NULL,
            created_at   TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_campgrounds_state ON campgrounds(state);
        CREATE INDEX IF NOT EXISTS idx_campgrounds_name ON campgrounds(name);
        ",
    )?;
    Ok(())
}

/// Upsert one batch of records inside a single transaction. Same id
/// replaces prior content. A record that fails to serialize or execute is
/// warned about and skipped, never fatal to the batch; the count of rows
/// actually written is returned.
pub fn upsert_batch(conn: &Connection, records: &[Campground]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut written = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO campgrounds
             (id, name, description, latitude, longitude, address, city, state, zip_code,
              phone, email, website, amenities, trail_access, pricing, capacity, images,
              last_updated)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18)",
        )?;
        for r in records {
            let result = stmt.execute(rusqlite::params![
                r.id,
                r.name,
                r.description,
                r.location.latitude,
                r.location.longitude,
                r.location.address,
                r.location.city,
                r.location.state,
                r.location.zip_code,
                r.contact.phone,
                r.contact.email,
                r.contact.website,
                to_json(&r.amenities)?,
                to_json(&r.trail_access)?,
                to_json(&r.pricing)?,
                to_json(&r.capacity)?,
                to_json(&r.images)?,
                r.last_updated,
            ]);
            match result {
                Ok(_) => written += 1,
                Err(e) => warn!("failed to upsert {}: {}", r.id, e),
            }
        }
    }
    tx.commit()?;
    Ok(written)
}

pub fn get_by_id(conn: &Connection, id: &str) -> Result<Option<Campground>> {
    let mut stmt = conn.prepare("SELECT * FROM campgrounds WHERE id = ?1")?;
    let mut rows = stmt.query_map([id], map_row)?;
    Ok(rows.next().transpose()?)
}

/// Filtered, paginated read path. Non-empty `query` requires a substring
/// match (case-insensitive LIKE) on name, description, or city; non-empty
/// `state` requires an exact match on the normalized state name. Ordered
/// by name ascending, id as the stable tie-break.
pub fn search(
    conn: &Connection,
    query: &str,
    state: &str,
    limit: usize,
    offset: usize,
) -> Result<Vec<Campground>> {
    let (where_clause, params) = build_filter(query, state);
    let sql = format!(
        "SELECT * FROM campgrounds{} ORDER BY name ASC, id ASC LIMIT {} OFFSET {}",
        where_clause, limit, offset
    );

    let mut stmt = conn.prepare(&sql)?;
    let param_refs: Vec<&dyn rusqlite::types::ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let rows = stmt
        .query_map(param_refs.as_slice(), map_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Total rows matching the same predicates as `search`. A dedicated count
/// instead of re-running the search with an oversized limit.
pub fn count(conn: &Connection, query: &str, state: &str) -> Result<usize> {
    let (where_clause, params) = build_filter(query, state);
    let sql = format!("SELECT COUNT(*) FROM campgrounds{}", where_clause);
    let param_refs: Vec<&dyn rusqlite::types::ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let n: usize = conn.query_row(&sql, param_refs.as_slice(), |r| r.get(0))?;
    Ok(n)
}

fn build_filter(query: &str, state: &str) -> (String, Vec<Box<dyn rusqlite::types::ToSql>>) {
    let mut conditions = Vec::new();
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    let query = query.trim();
    if !query.is_empty() {
        let pattern = format!("%{}%", query);
        conditions.push(format!(
            "(name LIKE ?{n} OR description LIKE ?{n2} OR city LIKE ?{n3})",
            n = params.len() + 1,
            n2 = params.len() + 2,
            n3 = params.len() + 3,
        ));
        params.push(Box::new(pattern.clone()));
        params.push(Box::new(pattern.clone()));
        params.push(Box::new(pattern));
    }

    let state = state.trim();
    if !state.is_empty() {
        conditions.push(format!("state = ?{}", params.len() + 1));
        params.push(Box::new(state.to_string()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };
    (where_clause, params)
}

pub fn delete(conn: &Connection, id: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM campgrounds WHERE id = ?1", [id])?;
    Ok(n > 0)
}

/// Delete only the rows of one import generation, identified by id
/// prefix. Prefix comparison avoids LIKE so underscores in the prefix
/// aren't treated as wildcards. The empty prefix means the curated
/// generation: only rows carrying no known provenance prefix.
pub fn clear_generation(conn: &Connection, prefix: &str) -> Result<usize> {
    if prefix.is_empty() {
        let n = conn.execute(
            "DELETE FROM campgrounds
             WHERE substr(id, 1, 4) <> 'pdf_' AND substr(id, 1, 5) <> 'real_'",
            [],
        )?;
        return Ok(n);
    }
    let n = conn.execute(
        "DELETE FROM campgrounds WHERE substr(id, 1, length(?1)) = ?1",
        [prefix],
    )?;
    Ok(n)
}

pub fn clear_all(conn: &Connection) -> Result<usize> {
    Ok(conn.execute("DELETE FROM campgrounds", [])?)
}

pub struct StoreStats {
    pub total: usize,
    pub pdf: usize,
    pub real: usize,
    pub curated: usize,
    pub states: usize,
}

pub fn stats(conn: &Connection) -> Result<StoreStats> {
    let total: usize = conn.query_row("SELECT COUNT(*) FROM campgrounds", [], |r| r.get(0))?;
    let pdf: usize = conn.query_row(
        "SELECT COUNT(*) FROM campgrounds WHERE substr(id, 1, 4) = 'pdf_'",
        [],
        |r| r.get(0),
    )?;
    let real: usize = conn.query_row(
        "SELECT COUNT(*) FROM campgrounds WHERE substr(id, 1, 5) = 'real_'",
        [],
        |r| r.get(0),
    )?;
    let states: usize =
        conn.query_row("SELECT COUNT(DISTINCT state) FROM campgrounds", [], |r| {
            r.get(0)
        })?;
    Ok(StoreStats {
        total,
        pdf,
        real,
        curated: total - pdf - real,
        states,
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

fn from_json_column<T: DeserializeOwned>(
    row: &Row,
    idx: usize,
) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    serde_json::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn map_row(row: &Row) -> rusqlite::Result<Campground> {
    let amenities: Amenities = from_json_column(row, 12)?;
    let trail_access: TrailAccess = from_json_column(row, 13)?;
    let pricing: Pricing = from_json_column(row, 14)?;
    let capacity: Capacity = from_json_column(row, 15)?;
    let images: Option<String> = row.get(16)?;
    let images: Vec<String> = match images {
        Some(text) => serde_json::from_str(&text)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(16, Type::Text, Box::new(e)))?,
        None => Vec::new(),
    };

    Ok(Campground {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        location: Location {
            latitude: row.get(3)?,
            longitude: row.get(4)?,
            address: row.get(5)?,
            city: row.get(6)?,
            state: row.get(7)?,
            zip_code: row.get(8)?,
        },
        contact: Contact {
            phone: row.get(9)?,
            email: row.get(10)?,
            website: row.get(11)?,
        },
        amenities,
        trail_access,
        pricing,
        capacity,
        images,
        last_updated: row.get(17)?,
    })
}
