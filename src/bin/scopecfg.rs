//! Scopecfg Demo Binary
//!
//! Declares a small service surface on an explicit root scope, populates it
//! from the command line and then either runs counter workers against the
//! mutable scope store or prints the resolved configuration.

use anyhow::{bail, Context};
use scopecfg::logging::{bootstrap_subscriber, init_logging, LoggingParams};
use scopecfg::{populate, CliSource, Scope, SubCommand, Value};
use std::process;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

struct ServiceConfig {
    name: Value<String>,
    workers: Value<i64>,
    logging: LoggingParams,
    tail: Value<Vec<String>>,
    run: SubCommand,
    ops: Option<Value<i64>>,
    deadline: Option<Value<Duration>>,
    show: SubCommand,
    pretty: Option<Value<bool>>,
}

impl ServiceConfig {
    fn declare(root: &Scope) -> Self {
        let name = root.with_string("name", "scopecfg", "Name reported in logs");
        let workers = root.with_int("workers", 4, "Number of worker threads");
        let logging = LoggingParams::declare(&root.child_of("log"));
        let tail = root.with_cli_tail();

        let (mut ops, mut deadline) = (None, None);
        let run = root.with_subcommand("", "Run counter workers against the scope store", |s| {
            ops = Some(s.with_int("ops", 100_000, "Total increments across all workers"));
            deadline = Some(s.with_duration(
                "deadline",
                Duration::from_secs(30),
                "Abort if the workers take longer than this",
            ));
        });

        let mut pretty = None;
        let show = root.with_subcommand("show", "Print the populated configuration as JSON", |s| {
            pretty = Some(s.with_bool("pretty", "Indent the JSON output"));
        });

        ServiceConfig {
            name,
            workers,
            logging,
            tail,
            run,
            ops,
            deadline,
            show,
            pretty,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        error!("Command failed: {:#}", e);
        eprintln!("{:#}", e);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let root = Scope::new();
    let cfg = ServiceConfig::declare(&root);

    let populated = tracing::subscriber::with_default(bootstrap_subscriber(), || {
        populate(&root, Some(&CliSource::from_env()))
    })
    .context("invalid configuration (use -h for help)")?;
    init_logging(Some(&cfg.logging.to_config())).context("failed to initialize logging")?;
    info!(name = %cfg.name.get(), "Scopecfg starting");

    let tail = cfg.tail.get();
    if !tail.is_empty() {
        warn!(?tail, "Ignoring trailing arguments");
    }

    if populated.is_selected(&cfg.show) {
        return show(&cfg);
    }
    if populated.is_selected(&cfg.run) {
        return run_workers(&root, &cfg);
    }
    bail!("no sub-command selected")
}

fn show(cfg: &ServiceConfig) -> anyhow::Result<()> {
    let value = serde_json::json!({
        "name": cfg.name.get(),
        "workers": cfg.workers.get(),
        "log": cfg.logging.to_config(),
        "tail": cfg.tail.get(),
    });
    let pretty = cfg.pretty.as_ref().map(Value::get).unwrap_or(false);
    let out = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{}", out);
    Ok(())
}

fn run_workers(root: &Scope, cfg: &ServiceConfig) -> anyhow::Result<()> {
    let workers = cfg.workers.get();
    if workers <= 0 {
        bail!("--workers must be positive, got {}", workers);
    }
    let ops = cfg.ops.as_ref().map(Value::get).unwrap_or(0).max(0);
    let deadline = cfg
        .deadline
        .as_ref()
        .map(Value::get)
        .unwrap_or(Duration::from_secs(30));

    let counter = root.child_of("counter");
    let start = Instant::now();
    let per_worker = ops / workers;
    let remainder = ops % workers;

    thread::scope(|s| {
        for worker in 0..workers {
            let counter = counter.clone();
            let quota = per_worker + i64::from(worker < remainder);
            s.spawn(move || {
                for _ in 0..quota {
                    counter.get_set_mutable_value(false, |v: Option<i64>| v.unwrap_or(0) + 1);
                }
                debug!(worker, quota, "Worker finished");
            });
        }
    });

    let elapsed = start.elapsed();
    let total = counter.mutable_value(0i64);
    info!(total, ?elapsed, "Workers finished");
    if total != ops {
        bail!("lost updates: expected {}, counted {}", ops, total);
    }
    if elapsed > deadline {
        bail!("workers exceeded deadline of {:?}", deadline);
    }
    println!("{} increments across {} workers in {:?}", total, workers, elapsed);
    Ok(())
}
