use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use schedule_engine::{
    expand_schedule, find_conflicts, is_valid_time, next_date_schedules, parse_time,
    try_expand_schedule, upcoming_schedules, DateInterval, DstPolicy, LocatedInterval,
    ScheduleContext, ScheduleRequest,
};

#[derive(Parser)]
#[command(name = "schedule", version, about = "Expand doctor availability and check slot conflicts")]
struct Cli {
    /// IANA timezone the schedule is declared in
    #[arg(long, short = 'z', global = true, env = "SCHEDULE_TZ", default_value = "UTC")]
    timezone: String,

    /// Current instant as RFC 3339 (defaults to the system clock)
    #[arg(long, global = true, env = "SCHEDULE_NOW")]
    now: Option<String>,

    /// What to do with times that fall in a DST gap
    #[arg(long, global = true, value_enum, default_value_t = GapPolicy::ShiftForward)]
    dst_policy: GapPolicy,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether a string is a valid HH:MM time
    ValidateTime {
        time: String,
    },
    /// Expand a schedule request (JSON) into dated intervals
    Expand {
        /// Request file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
        /// Fail with the reason instead of printing an empty list
        #[arg(long)]
        strict: bool,
    },
    /// Keep intervals that have not ended yet
    Upcoming {
        /// Interval list file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Keep today's remaining intervals, sorted by start
    NextDate {
        /// Interval list file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Report candidates that overlap stored intervals at the same location
    Conflicts {
        /// Stored located intervals (JSON array)
        #[arg(long)]
        existing: PathBuf,
        /// Candidate located intervals (JSON array), or `-` for stdin
        #[arg(long, default_value = "-")]
        candidates: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GapPolicy {
    ShiftForward,
    Skip,
}

impl From<GapPolicy> for DstPolicy {
    fn from(p: GapPolicy) -> Self {
        match p {
            GapPolicy::ShiftForward => DstPolicy::ShiftForward,
            GapPolicy::Skip => DstPolicy::Skip,
        }
    }
}

#[derive(Serialize)]
struct TimeCheck<'a> {
    time: &'a str,
    valid: bool,
    hour: Option<u32>,
    minute: Option<u32>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Command::ValidateTime { time } => {
            let valid = is_valid_time(time);
            let parsed = if valid { parse_time(time) } else { None };
            to_json(
                &TimeCheck {
                    time: time.as_str(),
                    valid,
                    hour: parsed.map(|t| t.hour()),
                    minute: parsed.map(|t| t.minute()),
                },
                cli.pretty,
            )
        }
        Command::Expand { input, strict } => {
            let ctx = context(cli)?;
            let request: ScheduleRequest = read_json(input)?;
            let intervals = if *strict {
                try_expand_schedule(&request, &ctx)?
            } else {
                expand_schedule(&request, &ctx)
            };
            tracing::info!(count = intervals.len(), "expanded schedule");
            to_json(&intervals, cli.pretty)
        }
        Command::Upcoming { input } => {
            let ctx = context(cli)?;
            let intervals: Vec<DateInterval> = read_json(input)?;
            to_json(&upcoming_schedules(&intervals, ctx.now()), cli.pretty)
        }
        Command::NextDate { input } => {
            let ctx = context(cli)?;
            let intervals: Vec<DateInterval> = read_json(input)?;
            to_json(&next_date_schedules(&intervals, &ctx), cli.pretty)
        }
        Command::Conflicts {
            existing,
            candidates,
        } => {
            let existing: Vec<LocatedInterval> = read_json(existing)?;
            let candidates: Vec<LocatedInterval> = read_json(candidates)?;
            to_json(&find_conflicts(&existing, &candidates), cli.pretty)
        }
    }
}

fn context(cli: &Cli) -> Result<ScheduleContext> {
    let now = match &cli.now {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("invalid --now '{s}'"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };
    let ctx = ScheduleContext::from_timezone_name(now, &cli.timezone)?;

    tracing::debug!(%now, timezone = %ctx.timezone(), "schedule context");
    Ok(ctx.with_dst_policy(cli.dst_policy.into()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };

    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}
