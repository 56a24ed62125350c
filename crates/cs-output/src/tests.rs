//! Integration tests for cs-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use cs_core::Category;

    use crate::csv::{CsvReportWriter, LOG_FILE};
    use crate::row::{ReportKind, ReportRow, RunLogRow};
    use crate::writer::ReportWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn report_row(hour: u32, category: Category) -> ReportRow {
        ReportRow {
            hour,
            category,
            count:                  12,
            ave_wait:               1.5,
            max_wait:               3.0,
            ave_server_utilization: 0.25,
            num_servers:            4,
        }
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn report_file_named_after_kind() {
        let dir = tmp();
        let _w = CsvReportWriter::new(dir.path(), ReportKind::Optimized).unwrap();
        assert!(dir.path().join("optimized_models.csv").exists());
        assert!(!dir.path().join(LOG_FILE).exists(), "log opens on first use");
    }

    #[test]
    fn report_headers_correct() {
        let dir = tmp();
        let mut w = CsvReportWriter::new(dir.path(), ReportKind::Heuristic).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("heuristic_models.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["hour", "type", "count", "ave_wait", "max_wait", "ave_server_utilization", "num_servers"]
        );
    }

    #[test]
    fn report_rows_written() {
        let dir = tmp();
        let mut w = CsvReportWriter::new(dir.path(), ReportKind::Optimized).unwrap();
        w.write_report(&[report_row(0, Category::Domestic), report_row(0, Category::Foreign)])
            .unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "optimized_models.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "domestic");
        assert_eq!(&rows[1][1], "foreign");
        assert_eq!(&rows[0][2], "12");
        assert_eq!(rows[0][3].parse::<f64>().unwrap(), 1.5);
        assert_eq!(&rows[0][6], "4");
    }

    #[test]
    fn appends_under_single_header() {
        let dir = tmp();
        for _ in 0..2 {
            let mut w = CsvReportWriter::new(dir.path(), ReportKind::Optimized).unwrap();
            w.write_report(&[report_row(3, Category::Domestic)]).unwrap();
            w.finish().unwrap();
        }
        let text = std::fs::read_to_string(dir.path().join("optimized_models.csv")).unwrap();
        assert_eq!(text.matches("ave_wait").count(), 1);
        assert_eq!(records(&dir, "optimized_models.csv").len(), 2);
    }

    #[test]
    fn run_log_appends() {
        let dir = tmp();
        for n in [10, 20] {
            let mut w = CsvReportWriter::new(dir.path(), ReportKind::Optimized).unwrap();
            w.write_run_log(&RunLogRow { unix_time: 1_700_000_000, num_simulations: n, elapsed_secs: 0.5 })
                .unwrap();
            w.finish().unwrap();
        }
        let rows = records(&dir, LOG_FILE);
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "1700000000");
        assert_eq!(&rows[0][1], "10");
        assert_eq!(&rows[1][1], "20");
    }

    #[test]
    fn boxed_writers_fan_out() {
        let dir = tmp();
        let mut all: Vec<Box<dyn ReportWriter>> = vec![
            Box::new(CsvReportWriter::new(dir.path(), ReportKind::Optimized).unwrap()),
            Box::new(CsvReportWriter::new(dir.path(), ReportKind::Baseline).unwrap()),
        ];
        all.write_report(&[report_row(5, Category::Foreign)]).unwrap();
        all.finish().unwrap();

        assert_eq!(records(&dir, "optimized_models.csv").len(), 1);
        assert_eq!(records(&dir, "baseline_models.csv").len(), 1);
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut w = CsvReportWriter::new(dir.path(), ReportKind::Baseline).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── Staffing plan export ──────────────────────────────────────────────────────

#[cfg(test)]
mod staffing_tests {
    use cs_core::Category;
    use cs_schedule::{StaffingPlan, SubsectionStaffing, load_staffing_csv};

    use crate::csv::write_staffing_csv;

    #[test]
    fn written_plan_loads_back() {
        let mut staffing = SubsectionStaffing::at_max(6);
        staffing.hourly[8] = 2;
        staffing.hourly[9] = 5;
        let mut plan = StaffingPlan::new();
        plan.insert(Category::Domestic, staffing).unwrap();
        plan.insert(Category::Foreign, SubsectionStaffing::at_max(3)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staffing.csv");
        write_staffing_csv(&path, &plan).unwrap();

        assert_eq!(load_staffing_csv(&path).unwrap(), plan);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use cs_core::{Category, PassengerId, ServerId, SimConfig, Tick};
    use cs_schedule::{AlwaysOnline, ArrivalRecord, ArrivalTable, Roster};
    use cs_sim::SimBuilder;

    use crate::csv::CsvReportWriter;
    use crate::observer::ReportObserver;
    use crate::row::{ReportKind, report_rows};

    fn table() -> ArrivalTable {
        ArrivalTable::from_records((0..4).map(|i| ArrivalRecord {
            passenger:     PassengerId(i),
            flight:        0,
            category:      if i % 2 == 0 { Category::Domestic } else { Category::Foreign },
            arrival_tick:  Tick(i * 10),
            service_ticks: 6,
        }))
    }

    #[test]
    fn rows_ordered_hour_major() {
        let roster = Roster::new([(ServerId(0), Category::Domestic), (ServerId(1), Category::Foreign)])
            .unwrap();
        let config = SimConfig { tick_duration_secs: 10, horizon_hours: 2, max_queue_size: 5 };
        let arrivals = table();
        let report = cs_sim::simulate(&config, &roster, &arrivals, &AlwaysOnline).unwrap();

        let rows = report_rows(&report);
        assert_eq!(rows.len(), 4);
        let keys: Vec<_> = rows.iter().map(|r| (r.hour, r.category)).collect();
        assert_eq!(
            keys,
            [(0, Category::Domestic), (0, Category::Foreign), (1, Category::Domestic), (1, Category::Foreign)]
        );
        assert_eq!(rows[0].count, 2);
    }

    #[test]
    fn integration_csv() {
        let roster = Roster::new([(ServerId(0), Category::Domestic), (ServerId(1), Category::Foreign)])
            .unwrap();
        let config = SimConfig { tick_duration_secs: 10, horizon_hours: 2, max_queue_size: 5 };
        let arrivals = table();
        let mut sim = SimBuilder::new(&roster, &arrivals, &AlwaysOnline)
            .config(config)
            .build()
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvReportWriter::new(dir.path(), ReportKind::Baseline).unwrap();
        let mut obs = ReportObserver::new(writer);
        let report = sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");
        assert_eq!(report.served, 4);

        // 2 hours × 2 subsections.
        let mut rdr = csv::Reader::from_path(dir.path().join("baseline_models.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 4);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use cs_core::Category;

    use crate::row::{ReportKind, ReportRow, RunLogRow};
    use crate::sqlite::SqliteReportWriter;
    use crate::writer::ReportWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn row(hour: u32) -> ReportRow {
        ReportRow {
            hour,
            category:               Category::Foreign,
            count:                  7,
            ave_wait:               2.25,
            max_wait:               4.0,
            ave_server_utilization: 0.5,
            num_servers:            3,
        }
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteReportWriter::new(dir.path(), ReportKind::Optimized).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_reports_partitioned_by_model() {
        let dir = tmp();
        let mut opt = SqliteReportWriter::new(dir.path(), ReportKind::Optimized).unwrap();
        opt.write_report(&[row(0), row(1)]).unwrap();
        opt.finish().unwrap();
        let mut heu = SqliteReportWriter::new(dir.path(), ReportKind::Heuristic).unwrap();
        heu.write_report(&[row(0)]).unwrap();
        heu.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM hourly_reports WHERE model = 'optimized'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(count, 2);

        let (kind, wait): (String, f64) = conn
            .query_row(
                "SELECT type, ave_wait FROM hourly_reports WHERE model = 'heuristic'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(kind, "foreign");
        assert_eq!(wait, 2.25);
    }

    #[test]
    fn sqlite_run_log() {
        let dir = tmp();
        let mut w = SqliteReportWriter::new(dir.path(), ReportKind::Optimized).unwrap();
        w.write_run_log(&RunLogRow { unix_time: 1_700_000_000, num_simulations: 42, elapsed_secs: 1.5 })
            .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let sims: i64 = conn
            .query_row("SELECT num_simulations FROM run_log", [], |r| r.get(0))
            .unwrap();
        assert_eq!(sims, 42);
    }
}
