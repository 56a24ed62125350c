//! CSV loaders for the three boundary files.
//!
//! # Arrivals manifest
//!
//! One row per passenger.  `service_secs` is optional; when the column is
//! missing or a cell is empty, the duration is sampled later by
//! [`ArrivalTable::build`](crate::ArrivalTable::build).
//!
//! ```csv
//! passenger_id,flight,category,arrival_time,service_secs
//! 1,AA100,domestic,06:15:00,
//! 2,AA100,foreign,06:15:00,95
//! ```
//!
//! # Server schedule
//!
//! One row per booth.  Every header after `id` and `subsection` is an hour
//! window; the windows must tile the day.  Flags are `0` or `1`.
//!
//! ```csv
//! id,subsection,0-6,6-12,12-18,18-24
//! 0,domestic,0,1,1,0
//! 1,foreign,1,1,1,1
//! ```
//!
//! # Staffing plan
//!
//! One row per subsection with its maximum and 24 hourly counts.
//!
//! ```csv
//! subsection,max,0,1,2,...,23
//! domestic,4,1,1,1,...,2
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cs_core::{Category, ClockTime, HOURS_PER_DAY, PassengerId, ServerId};

use crate::arrivals::ManifestEntry;
use crate::roster::Roster;
use crate::staffing::{StaffingPlan, SubsectionStaffing};
use crate::window::{HourWindow, WindowSchedule};
use crate::{ScheduleError, ScheduleResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ManifestRecord {
    passenger_id: u64,
    flight:       String,
    category:     String,
    arrival_time: String,
    #[serde(default)]
    service_secs: Option<u32>,
}

// ── Arrivals ──────────────────────────────────────────────────────────────────

/// Load the arrivals manifest from a CSV file.
pub fn load_arrivals_csv(path: &Path) -> ScheduleResult<Vec<ManifestEntry>> {
    let file = std::fs::File::open(path)?;
    load_arrivals_reader(file)
}

/// Like [`load_arrivals_csv`] but accepts any `Read` source.
pub fn load_arrivals_reader<R: Read>(reader: R) -> ScheduleResult<Vec<ManifestEntry>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut entries = Vec::new();

    for (line, result) in csv_reader.deserialize::<ManifestRecord>().enumerate() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let at = |e: cs_core::CoreError| ScheduleError::Parse(format!("manifest row {}: {e}", line + 1));
        entries.push(ManifestEntry {
            passenger:    PassengerId(row.passenger_id),
            flight:       row.flight,
            category:     row.category.parse::<Category>().map_err(at)?,
            arrival:      row.arrival_time.parse::<ClockTime>().map_err(at)?,
            service_secs: row.service_secs,
        });
    }

    Ok(entries)
}

// ── Server schedule ───────────────────────────────────────────────────────────

/// Load the server schedule, returning the roster it defines and the
/// window-based availability provider.
pub fn load_server_schedule_csv(path: &Path) -> ScheduleResult<(Roster, WindowSchedule)> {
    let file = std::fs::File::open(path)?;
    load_server_schedule_reader(file)
}

/// Like [`load_server_schedule_csv`] but accepts any `Read` source.
pub fn load_server_schedule_reader<R: Read>(reader: R) -> ScheduleResult<(Roster, WindowSchedule)> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|e| ScheduleError::Parse(e.to_string()))?
        .clone();

    let id_col = column(&headers, "id")?;
    let sub_col = column(&headers, "subsection")?;
    let window_cols: Vec<(usize, HourWindow)> = headers
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != id_col && i != sub_col)
        .map(|(i, h)| h.parse::<HourWindow>().map(|w| (i, w)))
        .collect::<ScheduleResult<_>>()?;

    let mut members = Vec::new();
    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let field = |i: usize| record.get(i).unwrap_or("");

        let id: ServerId = field(id_col)
            .parse()
            .map_err(|_| ScheduleError::Parse(format!("invalid server id {:?}", field(id_col))))?;
        let category: Category = field(sub_col).parse()?;
        let flags = window_cols
            .iter()
            .map(|&(i, w)| parse_flag(field(i)).ok_or_else(|| {
                ScheduleError::Parse(format!("server {id} window {w}: expected 0 or 1, got {:?}", field(i)))
            }))
            .collect::<ScheduleResult<Vec<bool>>>()?;

        members.push((id, category));
        rows.push((id, flags));
    }

    let windows = window_cols.into_iter().map(|(_, w)| w).collect();
    let schedule = WindowSchedule::new(windows, rows)?;
    let roster = Roster::new(members)?;
    Ok((roster, schedule))
}

// ── Staffing plan ─────────────────────────────────────────────────────────────

/// Load a staffing plan.
pub fn load_staffing_csv(path: &Path) -> ScheduleResult<StaffingPlan> {
    let file = std::fs::File::open(path)?;
    load_staffing_reader(file)
}

/// Like [`load_staffing_csv`] but accepts any `Read` source.
pub fn load_staffing_reader<R: Read>(reader: R) -> ScheduleResult<StaffingPlan> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|e| ScheduleError::Parse(e.to_string()))?
        .clone();

    let sub_col = column(&headers, "subsection")?;
    let max_col = column(&headers, "max")?;
    let hour_cols = (0..HOURS_PER_DAY)
        .map(|h| column(&headers, &h.to_string()))
        .collect::<ScheduleResult<Vec<usize>>>()?;

    let mut plan = StaffingPlan::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let count = |i: usize| -> ScheduleResult<u32> {
            let cell = record.get(i).unwrap_or("");
            cell.parse()
                .map_err(|_| ScheduleError::Parse(format!("invalid server count {cell:?}")))
        };

        let category: Category = record.get(sub_col).unwrap_or("").parse()?;
        let mut staffing = SubsectionStaffing::at_max(count(max_col)?);
        for (h, &i) in hour_cols.iter().enumerate() {
            staffing.hourly[h] = count(i)?;
        }
        plan.insert(category, staffing)?;
    }

    Ok(plan)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn column(headers: &csv::StringRecord, name: &str) -> ScheduleResult<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| ScheduleError::Parse(format!("missing column {name:?}")))
}

fn parse_flag(s: &str) -> Option<bool> {
    match s {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}
