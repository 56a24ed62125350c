//! customs-opt — finds the smallest hourly booth staffing that keeps the
//! average passenger wait under a threshold.
//!
//! ```console
//! $ cargo run --release -p customs-opt -- 5 \
//!       --arrivals schedules/arrivals.csv \
//!       --schedule schedules/sample_server_schedule.csv -v
//! ```
//!
//! Reports are appended to `<output>/optimized_models.csv`,
//! `<output>/heuristic_models.csv` and `<output>/log.csv`; the optimized plan
//! itself is written to `<output>/optimized_staffing.csv`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cs_core::{Category, ServiceTimeConfig, SimConfig, SimRng, TriangularSampler};
use cs_optimize::{DEFAULT_MOMENTUM, GreedyOptimizer, Optimized, OptimizerConfig, apportion};
use cs_output::{
    CsvReportWriter, ReportKind, ReportObserver, ReportWriter, RunLogRow, report_rows,
    write_staffing_csv,
};
use cs_schedule::{
    ArrivalTable, StaffingPlan, load_arrivals_csv, load_server_schedule_csv, load_staffing_csv,
};
use cs_sim::{SimBuilder, SimReport, simulate};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "customs-opt", version, about = "Customs booth staffing optimizer")]
struct Args {
    /// Target average wait per hour, in minutes.
    threshold: f64,

    /// Arrivals manifest (`passenger_id,flight,category,arrival_time[,service_secs]`).
    #[arg(long, default_value = "schedules/arrivals.csv")]
    arrivals: PathBuf,

    /// Server schedule (`id,subsection,<H-H>...`).
    #[arg(long, default_value = "schedules/sample_server_schedule.csv")]
    schedule: PathBuf,

    /// Staffing plan supplying per-subsection maxima.  Defaults to every
    /// rostered server.
    #[arg(long)]
    staffing: Option<PathBuf>,

    /// Directory for reports and the run log.
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Seconds per simulation tick.
    #[arg(long, default_value_t = 10)]
    speed_factor: u32,

    /// Waiting-line capacity of each booth.
    #[arg(long, default_value_t = 10)]
    max_queue: usize,

    /// Servers added or removed per search step.
    #[arg(long, default_value_t = DEFAULT_MOMENTUM)]
    momentum: u32,

    /// Seed for service-time sampling.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Do not simulate the linear heuristic for comparison.
    #[arg(long)]
    skip_heuristic: bool,

    /// Log optimizer progress (`info`).
    #[arg(short, long)]
    verbose: bool,

    /// Log every simulation (`debug`).
    #[arg(long)]
    debug: bool,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);
    run(&args)
}

fn init_logging(args: &Args) {
    let default = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn run(args: &Args) -> Result<()> {
    let sim_config = SimConfig {
        tick_duration_secs: args.speed_factor,
        max_queue_size:     args.max_queue,
        ..SimConfig::default()
    };
    sim_config.validate().context("invalid simulation settings")?;
    let opt_config = OptimizerConfig { threshold_minutes: args.threshold, momentum: args.momentum };
    opt_config.validate().context("invalid optimizer settings")?;

    fs::create_dir_all(&args.output)
        .with_context(|| format!("creating output directory {}", args.output.display()))?;

    // 1. Inputs.
    let (roster, windows) = load_server_schedule_csv(&args.schedule)
        .with_context(|| format!("loading server schedule {}", args.schedule.display()))?;
    let manifest = load_arrivals_csv(&args.arrivals)
        .with_context(|| format!("loading arrivals {}", args.arrivals.display()))?;

    let sampler = TriangularSampler::new(&ServiceTimeConfig::default())?;
    let mut rng = SimRng::new(args.seed);
    let arrivals = ArrivalTable::build(manifest, &sim_config, &sampler, &mut rng)?;
    info!(
        flights = arrivals.flight_count(),
        passengers = arrivals.passenger_count(),
        servers = roster.len(),
        "inputs loaded"
    );
    let late = arrivals.arriving_after(sim_config.end_tick());
    if late > 0 {
        warn!(late, "passengers arrive after the horizon and are ignored");
    }

    // 2. Baseline: the server schedule as loaded.
    let baseline = simulate(&sim_config, &roster, &arrivals, &windows)?;
    log_report(ReportKind::Baseline, &baseline);

    // 3. Greedy search.
    let start = match &args.staffing {
        Some(path) => load_staffing_csv(path)
            .with_context(|| format!("loading staffing plan {}", path.display()))?,
        None => StaffingPlan::at_capacity(&roster),
    };
    let mut optimizer = GreedyOptimizer::new(opt_config, sim_config.clone(), &roster, &arrivals);
    let optimized = optimizer.optimize(&start)?;
    log_report(ReportKind::Optimized, &optimized.report);

    let mut writers = report_writers(&args.output, ReportKind::Optimized)?;
    writers.write_report(&report_rows(&optimized.report))?;
    writers.write_run_log(&RunLogRow {
        unix_time:       unix_now(),
        num_simulations: optimized.simulations as u64,
        elapsed_secs:    optimized.elapsed.as_secs_f64(),
    })?;
    writers.finish()?;
    write_staffing_csv(&args.output.join("optimized_staffing.csv"), &optimized.plan)?;

    // 4. Heuristic comparator.
    let heuristic = if args.skip_heuristic {
        None
    } else {
        let plan = apportion(&optimized.report, &start)?;
        let mut sim = SimBuilder::new(&roster, &arrivals, &plan).config(sim_config.clone()).build()?;
        let mut obs = ReportObserver::new(report_writers(&args.output, ReportKind::Heuristic)?);
        let report = sim.run(&mut obs)?;
        if let Some(e) = obs.take_error() {
            return Err(e).context("writing heuristic report");
        }
        log_report(ReportKind::Heuristic, &report);
        Some((plan, report))
    };

    print_summary(args, &optimized, heuristic.as_ref().map(|(plan, report)| (plan, report)));
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn report_writers(dir: &Path, kind: ReportKind) -> Result<Vec<Box<dyn ReportWriter>>> {
    #[allow(unused_mut)]
    let mut writers: Vec<Box<dyn ReportWriter>> = vec![Box::new(CsvReportWriter::new(dir, kind)?)];
    #[cfg(feature = "sqlite")]
    writers.push(Box::new(cs_output::SqliteReportWriter::new(dir, kind)?));
    Ok(writers)
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() as i64)
}

fn log_report(kind: ReportKind, report: &SimReport) {
    info!(
        model = %kind,
        served = report.served,
        in_service = report.in_service,
        stranded = report.stranded,
        "simulated"
    );
    if report.stranded > 0 {
        warn!(model = %kind, stranded = report.stranded, "passengers still waiting at the horizon");
    }
}

fn print_summary(
    args:      &Args,
    optimized: &Optimized,
    heuristic: Option<(&StaffingPlan, &SimReport)>,
) {
    println!("=== customs-opt: threshold {} min ===", args.threshold);
    println!(
        "{} simulations in {:.2}s",
        optimized.simulations,
        optimized.elapsed.as_secs_f64()
    );

    for category in Category::ALL {
        if optimized.plan.section(category).is_err() {
            continue;
        }
        println!();
        println!("{category}");
        match heuristic {
            Some(_) => println!("hour  servers  ave_wait  | heuristic  ave_wait"),
            None => println!("hour  servers  ave_wait"),
        }
        for row in optimized.report.rows_for(category) {
            let servers = optimized.plan.servers(category, row.hour).unwrap_or(0);
            print!("{:>4}  {servers:>7}  {:>8.2}", row.hour, row.average_wait);
            if let Some((plan, report)) = heuristic {
                let h = plan.servers(category, row.hour).unwrap_or(0);
                print!("  | {h:>9}  {:>8.2}", report.average_wait(category, row.hour));
            }
            println!();
        }
    }

    let saturated = optimized.saturated_hours().count();
    if saturated > 0 {
        println!();
        println!("{saturated} hour(s) could not meet the threshold at maximum staffing");
    }
    println!();
    println!("Reports written to {}", args.output.display());
}
