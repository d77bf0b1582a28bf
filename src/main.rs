use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use autoshade::shading::rails::{self, RailPositions};
use autoshade::shading::{TimeRange, evaluate_window, generate_time_series, series};
use autoshade::solar::{SpencerSun, SunPositionProvider};
use autoshade::{ShadeConfig, ShadeState, SunAngle, evaluate};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use log::info;

#[derive(Parser, Debug)]
#[command(version, about = "Window shade positions that keep the sun off the desk", long_about = None)]
struct Args {
    /// JSON configuration file (defaults to the built-in office layout)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rail positions for the current time
    Now,
    /// Rail positions for a given sun position
    At {
        #[arg(long, allow_negative_numbers = true)]
        azimuth: f64,
        #[arg(long, allow_negative_numbers = true)]
        elevation: f64,
    },
    /// Shade states over one day
    Series {
        /// Day to evaluate (YYYY-MM-DD, site local time)
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, default_value = "06:00")]
        start: String,
        #[arg(long, default_value = "21:00")]
        end: String,
        /// Step in minutes
        #[arg(long, default_value_t = 15)]
        step: i64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Sampler diagnostics for a given sun position
    Sample {
        #[arg(long, allow_negative_numbers = true)]
        azimuth: f64,
        #[arg(long, allow_negative_numbers = true)]
        elevation: f64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = match &args.config {
        Some(path) => ShadeConfig::from_path(path)?,
        None => ShadeConfig::reference()?,
    };
    info!(
        "Loaded {} window(s), orientation {:.1} deg",
        config.windows().len(),
        config.window_orientation()
    );

    match args.command {
        Command::Now => {
            let now = Utc::now().with_timezone(&site_offset(&config)?);
            let sun = SpencerSun.sun_angle(&config.site, now)?;
            info!(
                "Sun at {now}: azimuth {:.2}, elevation {:.2}",
                sun.azimuth, sun.elevation
            );
            print_payload(&config, &evaluate(&sun, &config)?)?;
        }
        Command::At { azimuth, elevation } => {
            let sun = SunAngle::new(azimuth, elevation);
            print_payload(&config, &evaluate(&sun, &config)?)?;
        }
        Command::Series {
            date,
            start,
            end,
            step,
            json,
        } => {
            let offset = site_offset(&config)?;
            let range = TimeRange::new(
                local_time(date, &start, offset)?,
                local_time(date, &end, offset)?,
                Duration::minutes(step),
            )?;
            let records = generate_time_series(&config, &SpencerSun, &range)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                series::write_table(&records, &mut io::stdout().lock())?;
            }
        }
        Command::Sample { azimuth, elevation } => {
            let sun = SunAngle::new(azimuth, elevation);
            for window in config.windows() {
                let e = evaluate_window(&sun, &config, window)?;
                println!("{}", serde_json::to_string(&(&window.name, e.sample, e.state))?);
            }
        }
    }

    Ok(())
}

fn print_payload(config: &ShadeConfig, states: &BTreeMap<String, ShadeState>) -> Result<()> {
    let payload: BTreeMap<String, RailPositions> =
        rails::payload(states, config.output.rail_convention);
    info!("Rails: {:?}", rails::by_rail(&payload, config.windows()));
    println!("{}", serde_json::to_string(&payload)?);
    Ok(())
}

fn site_offset(config: &ShadeConfig) -> Result<FixedOffset> {
    let seconds = (config.site.utc_offset_hours * 3600.0).round() as i32;
    FixedOffset::east_opt(seconds)
        .with_context(|| format!("Invalid UTC offset: {}", config.site.utc_offset_hours))
}

fn local_time(date: NaiveDate, hhmm: &str, offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    let time = NaiveTime::parse_from_str(hhmm, "%H:%M")
        .with_context(|| format!("Invalid time (expected HH:MM): {hhmm}"))?;
    date.and_time(time)
        .and_local_timezone(offset)
        .single()
        .with_context(|| format!("Ambiguous local time: {date} {hhmm}"))
}
