use std::path::PathBuf;
use std::process;

use clap::Parser;
use clap::builder::TypedValueParser as _;
use sqlite_bench::profile::Profiler;
use sqlite_bench::report::render_table;
use sqlite_bench::{BenchError, Config, DriverKind, Scenario, runner};

#[derive(Parser, Debug)]
#[command(version, about = "Insert/query benchmarks for SQLite driver bindings")]
struct Args {
    /// Database file, deleted and recreated for every scenario.
    #[arg(long, default_value = "bench.db")]
    dbfile: PathBuf,

    /// Drivers to benchmark (default: all).
    #[arg(long = "driver", value_enum, value_delimiter = ',')]
    drivers: Vec<DriverKind>,

    /// Scenarios to run, in this order (default: all).
    #[arg(long = "scenario", value_enum, value_delimiter = ',')]
    scenarios: Vec<Scenario>,

    /// Rows in the flat users table.
    #[arg(long, default_value_t = Config::default().users)]
    users: usize,

    /// Profiles in the complex scenario.
    #[arg(long, default_value_t = Config::default().profiles)]
    profiles: usize,

    /// Devices per profile.
    #[arg(long, default_value_t = Config::default().devices)]
    devices: usize,

    /// Locations per device.
    #[arg(long, default_value_t = Config::default().locations)]
    locations: usize,

    /// Users in the relational scenario.
    #[arg(long, default_value_t = Config::default().rel_users)]
    rel_users: usize,

    /// Articles per user.
    #[arg(long, default_value_t = Config::default().articles)]
    articles: usize,

    /// Comments per article.
    #[arg(long, default_value_t = Config::default().comments)]
    comments: usize,

    /// Rows read by every concurrent worker.
    #[arg(long, default_value_t = Config::default().books)]
    books: usize,

    /// Concurrent reader counts, e.g. `2,4,8`.
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = Config::default().workers,
        value_parser = clap::value_parser!(u32).range(1..).map(|n| n as usize)
    )]
    workers: Vec<usize>,

    /// Write a CPU flamegraph of the whole run to this file.
    #[arg(long)]
    cpuprofile: Option<PathBuf>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let defaults = Config::default();
        Self {
            dbfile: args.dbfile,
            drivers: if args.drivers.is_empty() {
                defaults.drivers
            } else {
                args.drivers
            },
            scenarios: if args.scenarios.is_empty() {
                defaults.scenarios
            } else {
                args.scenarios
            },
            users: args.users,
            profiles: args.profiles,
            devices: args.devices,
            locations: args.locations,
            rel_users: args.rel_users,
            articles: args.articles,
            comments: args.comments,
            books: args.books,
            workers: args.workers,
            cpuprofile: args.cpuprofile,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::from(Args::parse());

    let dbfile = config.dbfile.clone();
    ctrlc::set_handler(move || {
        let _ = runner::reset_file(&dbfile);
        process::exit(1);
    })
    .unwrap_or_else(|e| log::warn!("cannot install Ctrl-C handler: {e}"));

    if let Err(err) = try_main(&config) {
        log::error!("{err}");
        process::exit(1);
    }
}

fn try_main(config: &Config) -> Result<(), BenchError> {
    let profiler = config
        .cpuprofile
        .as_deref()
        .map(Profiler::start)
        .transpose()?;

    let mut results = Vec::new();
    for driver in &config.drivers {
        results.extend(driver.run(config)?);
    }

    if let Some(profiler) = profiler {
        profiler.finish()?;
    }

    println!();
    println!("{}", render_table(&results));
    Ok(())
}
