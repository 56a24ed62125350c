//! Plain data row types written by output backends.

use std::fmt;

use cs_core::Category;
use cs_sim::{HourlyRow, SimReport};

/// Which staffing plan a report describes.  Each kind has its own report
/// file or table partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// The server-window schedule as loaded.
    Baseline,
    /// The greedy search result.
    Optimized,
    /// The linear heuristic comparator.
    Heuristic,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Baseline  => "baseline",
            ReportKind::Optimized => "optimized",
            ReportKind::Heuristic => "heuristic",
        }
    }

    /// CSV file name for this kind's report.
    pub fn file_name(self) -> String {
        format!("{}_models.csv", self.as_str())
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One report line: a subsection's statistics for one hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRow {
    pub hour:                   u32,
    pub category:               Category,
    pub count:                  u32,
    pub ave_wait:               f64,
    pub max_wait:               f64,
    pub ave_server_utilization: f64,
    pub num_servers:            u32,
}

impl From<&HourlyRow> for ReportRow {
    fn from(r: &HourlyRow) -> Self {
        Self {
            hour:                   r.hour,
            category:               r.category,
            count:                  r.arrival_count,
            ave_wait:               r.average_wait,
            max_wait:               r.max_wait,
            ave_server_utilization: r.average_server_utilization,
            num_servers:            r.num_servers,
        }
    }
}

/// Report rows ordered by hour, then category.
pub fn report_rows(report: &SimReport) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = report.rows.iter().map(ReportRow::from).collect();
    rows.sort_by_key(|r| (r.hour, r.category));
    rows
}

/// One optimizer session in the run log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunLogRow {
    pub unix_time:       i64,
    pub num_simulations: u64,
    pub elapsed_secs:    f64,
}
