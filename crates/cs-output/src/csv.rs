//! CSV output backend.
//!
//! Appends to two files in the configured output directory:
//! - `<kind>_models.csv`: one block of hourly rows per simulation written
//! - `log.csv`: one line per optimizer session (opened on first use)
//!
//! Headers are written only when a file is created, so repeated runs
//! accumulate under a single header.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};

use cs_core::HOURS_PER_DAY;
use cs_schedule::StaffingPlan;

use crate::writer::ReportWriter;
use crate::{OutputResult, ReportKind, ReportRow, RunLogRow};

pub const REPORT_HEADER: [&str; 7] = [
    "hour",
    "type",
    "count",
    "ave_wait",
    "max_wait",
    "ave_server_utilization",
    "num_servers",
];

pub const LOG_HEADER: [&str; 3] = ["unix_time", "num_simulations", "elapsed_secs"];

pub const LOG_FILE: &str = "log.csv";

/// Open `path` for appending, writing `header` first if the file is new or
/// empty.
fn open_append(path: &Path, header: &[&str]) -> OutputResult<Writer<File>> {
    let fresh = fs::metadata(path).map_or(true, |m| m.len() == 0);
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    if fresh {
        writer.write_record(header)?;
    }
    Ok(writer)
}

/// Appends hourly reports and run-log lines to CSV files.
pub struct CsvReportWriter {
    dir:      PathBuf,
    report:   Writer<File>,
    log:      Option<Writer<File>>,
    finished: bool,
}

impl CsvReportWriter {
    /// Open (or create) `<kind>_models.csv` in `dir`.
    pub fn new(dir: &Path, kind: ReportKind) -> OutputResult<Self> {
        let report = open_append(&dir.join(kind.file_name()), &REPORT_HEADER)?;
        Ok(Self { dir: dir.to_path_buf(), report, log: None, finished: false })
    }
}

impl ReportWriter for CsvReportWriter {
    fn write_report(&mut self, rows: &[ReportRow]) -> OutputResult<()> {
        for row in rows {
            self.report.write_record(&[
                row.hour.to_string(),
                row.category.as_str().to_owned(),
                row.count.to_string(),
                row.ave_wait.to_string(),
                row.max_wait.to_string(),
                row.ave_server_utilization.to_string(),
                row.num_servers.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_run_log(&mut self, row: &RunLogRow) -> OutputResult<()> {
        if self.log.is_none() {
            self.log = Some(open_append(&self.dir.join(LOG_FILE), &LOG_HEADER)?);
        }
        if let Some(log) = &mut self.log {
            log.write_record(&[
                row.unix_time.to_string(),
                row.num_simulations.to_string(),
                row.elapsed_secs.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.report.flush()?;
        if let Some(log) = &mut self.log {
            log.flush()?;
        }
        Ok(())
    }
}

/// Write `plan` as a staffing CSV (`subsection,max,0,…,23`), replacing any
/// existing file.  The result loads back with
/// [`cs_schedule::load_staffing_csv`].
pub fn write_staffing_csv(path: &Path, plan: &StaffingPlan) -> OutputResult<()> {
    let mut writer = Writer::from_path(path)?;

    let mut header = vec!["subsection".to_owned(), "max".to_owned()];
    header.extend((0..HOURS_PER_DAY).map(|h| h.to_string()));
    writer.write_record(&header)?;

    for category in plan.categories() {
        let section = plan.section(category)?;
        let mut record = vec![category.as_str().to_owned(), section.max.to_string()];
        record.extend(section.hourly.iter().map(u32::to_string));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
