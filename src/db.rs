use anyhow::{Context, Result, anyhow};
use chrono::DateTime;
use rusqlite::{Connection, params};
use std::path::{Path, PathBuf};

use crate::models::Listing;
use crate::roles::RoleCategory;

pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    pub fn open() -> Result<Self> {
        let path = Self::default_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path)?;
        Ok(Self { conn, path })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            path: PathBuf::from(":memory:"),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn default_path() -> Result<PathBuf> {
        // Use XDG data directory or fallback
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "fracboard") {
            Ok(proj_dirs.data_dir().join("fracboard.db"))
        } else {
            Ok(PathBuf::from("fracboard.db"))
        }
    }

    pub fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id TEXT PRIMARY KEY,
                slug TEXT UNIQUE,
                title TEXT NOT NULL,
                company_name TEXT NOT NULL DEFAULT '',
                location TEXT,
                country TEXT,
                is_remote INTEGER NOT NULL DEFAULT 0,
                workplace_type TEXT,
                compensation TEXT,
                role_category TEXT,
                skills_required TEXT NOT NULL DEFAULT '[]',
                hours_per_week INTEGER,
                is_active INTEGER NOT NULL DEFAULT 1,
                is_fractional INTEGER NOT NULL DEFAULT 1,
                posted_date TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_jobs_active ON jobs(is_active);
            CREATE INDEX IF NOT EXISTS idx_jobs_role ON jobs(role_category);
            CREATE INDEX IF NOT EXISTS idx_jobs_posted ON jobs(posted_date);
            "#,
        )?;
        Ok(())
    }

    pub fn ensure_initialized(&self) -> Result<()> {
        let tables: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='jobs'",
            [],
            |row| row.get(0),
        )?;
        if tables == 0 {
            return Err(anyhow!(
                "Database not initialized. Run 'fracboard init' first."
            ));
        }
        Ok(())
    }

    /// Bulk-load listings from a JSON array file. With `replace`, existing
    /// rows are wiped first; otherwise matching ids are upserted.
    pub fn import(&mut self, path: &Path, replace: bool) -> Result<usize> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read listings file: {}", path.display()))?;
        let listings: Vec<Listing> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse listings JSON: {}", path.display()))?;

        let tx = self.conn.transaction()?;
        if replace {
            tx.execute("DELETE FROM jobs", [])?;
        }
        for listing in &listings {
            tx.execute(
                "INSERT OR REPLACE INTO jobs
                 (id, slug, title, company_name, location, country, is_remote,
                  workplace_type, compensation, role_category, skills_required,
                  hours_per_week, is_active, is_fractional, posted_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                params![
                    listing.id,
                    listing.slug,
                    listing.title,
                    listing.company_name,
                    listing.location,
                    listing.country,
                    listing.is_remote,
                    listing.workplace_type.map(|wt| wt.as_str()),
                    listing.compensation,
                    listing.role_category.map(|cat| cat.as_str()),
                    serde_json::to_string(&listing.skills_required)?,
                    listing.hours_per_week,
                    listing.is_active,
                    listing.is_fractional,
                    listing.posted_date.map(|d| d.to_rfc3339()),
                ],
            )?;
        }
        tx.commit()?;
        Ok(listings.len())
    }

    /// Active fractional listings, optionally narrowed by role category or
    /// a location substring. This is a push-down optimization only - the
    /// search engine re-applies every predicate on what comes back.
    pub fn fetch_active(
        &self,
        role: Option<RoleCategory>,
        location: Option<&str>,
    ) -> Result<Vec<Listing>> {
        let mut sql = String::from(
            "SELECT id, slug, title, company_name, location, country, is_remote,
                    workplace_type, compensation, role_category, skills_required,
                    hours_per_week, is_active, is_fractional, posted_date
             FROM jobs
             WHERE is_active = 1 AND is_fractional = 1",
        );

        let mut params: Vec<String> = vec![];

        if let Some(cat) = role {
            sql.push_str(&format!(" AND role_category = ?{}", params.len() + 1));
            params.push(cat.as_str().to_string());
        }

        if let Some(loc) = location {
            sql.push_str(&format!(
                " AND LOWER(COALESCE(location, '')) LIKE ?{}",
                params.len() + 1
            ));
            params.push(format!("%{}%", loc.to_lowercase()));
        }

        sql.push_str(" ORDER BY posted_date DESC");

        let mut stmt = self.conn.prepare(&sql)?;

        let rows = match params.len() {
            0 => stmt.query_map([], Self::row_to_listing)?,
            1 => stmt.query_map([&params[0]], Self::row_to_listing)?,
            2 => stmt.query_map([&params[0], &params[1]], Self::row_to_listing)?,
            _ => return Err(anyhow!("Too many parameters")),
        };

        rows.collect::<Result<Vec<_>, _>>()
            .context("Failed to fetch listings")
    }

    pub fn get_by_slug(&self, slug: &str) -> Result<Option<Listing>> {
        let result = self.conn.query_row(
            "SELECT id, slug, title, company_name, location, country, is_remote,
                    workplace_type, compensation, role_category, skills_required,
                    hours_per_week, is_active, is_fractional, posted_date
             FROM jobs WHERE slug = ?1",
            [slug],
            Self::row_to_listing,
        );
        match result {
            Ok(listing) => Ok(Some(listing)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM jobs", [], |row| row.get(0))?;
        Ok(count)
    }

    fn row_to_listing(row: &rusqlite::Row) -> rusqlite::Result<Listing> {
        let workplace_type: Option<String> = row.get(7)?;
        let role_category: Option<String> = row.get(9)?;
        let skills_raw: String = row.get(10)?;
        let posted_raw: Option<String> = row.get(14)?;

        Ok(Listing {
            id: row.get(0)?,
            slug: row.get(1)?,
            title: row.get(2)?,
            company_name: row.get(3)?,
            location: row.get(4)?,
            country: row.get(5)?,
            is_remote: row.get(6)?,
            workplace_type: workplace_type
                .as_deref()
                .and_then(crate::models::WorkplaceType::parse),
            compensation: row.get(8)?,
            role_category: role_category.as_deref().and_then(RoleCategory::parse),
            skills_required: serde_json::from_str(&skills_raw).unwrap_or_default(),
            hours_per_week: row.get(11)?,
            is_active: row.get(12)?,
            is_fractional: row.get(13)?,
            // Malformed dates degrade to undated, which sorts last
            posted_date: posted_raw
                .as_deref()
                .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
                .map(|d| d.to_utc()),
        })
    }
}
