//! SQLite output backend (feature `sqlite`).
//!
//! Appends to a single `output.db` file in the configured output directory
//! with two tables: `hourly_reports` (partitioned by `model`) and `run_log`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::ReportWriter;
use crate::{OutputResult, ReportKind, ReportRow, RunLogRow};

/// Writes reports for one [`ReportKind`] to an SQLite database.
pub struct SqliteReportWriter {
    conn:     Connection,
    kind:     ReportKind,
    finished: bool,
}

impl SqliteReportWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path, kind: ReportKind) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS hourly_reports (
                 model                  TEXT    NOT NULL,
                 hour                   INTEGER NOT NULL,
                 type                   TEXT    NOT NULL,
                 count                  INTEGER NOT NULL,
                 ave_wait               REAL    NOT NULL,
                 max_wait               REAL    NOT NULL,
                 ave_server_utilization REAL    NOT NULL,
                 num_servers            INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS run_log (
                 unix_time       INTEGER NOT NULL,
                 num_simulations INTEGER NOT NULL,
                 elapsed_secs    REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, kind, finished: false })
    }
}

impl ReportWriter for SqliteReportWriter {
    fn write_report(&mut self, rows: &[ReportRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO hourly_reports \
                 (model, hour, type, count, ave_wait, max_wait, ave_server_utilization, num_servers) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    self.kind.as_str(),
                    row.hour,
                    row.category.as_str(),
                    row.count,
                    row.ave_wait,
                    row.max_wait,
                    row.ave_server_utilization,
                    row.num_servers,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_run_log(&mut self, row: &RunLogRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO run_log (unix_time, num_simulations, elapsed_secs) VALUES (?1, ?2, ?3)",
            rusqlite::params![row.unix_time, row.num_simulations as i64, row.elapsed_secs],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
