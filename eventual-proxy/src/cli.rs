use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use chrono::Weekday;
use eventual_grid::LayoutConfig;
use getopts::{Matches, Options};
use tokio::time::Duration;

/// Where month events are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceArg {
    File(PathBuf),
    Url(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub address: SocketAddr,
    pub enable_cache: bool,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
    pub layout: LayoutConfig,
    pub source: SourceArg,
}

#[derive(Debug, PartialEq)]
pub enum Parsed {
    Help(String),
    Run(Args),
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "a",
        "address",
        "Socket address (IP and port) to listen on [Default: 127.0.0.1:8080]",
        "SOCKET_ADDRESS",
    );
    opts.optflag(
        "c",
        "enable-cache",
        "Enable caching of fetched events [Default: false]",
    );
    opts.optopt(
        "t",
        "cache-ttl",
        "Time-to-live for cached events [Default: 3600]",
        "SECONDS",
    );
    opts.optopt(
        "",
        "cache-capacity",
        "Number of months kept in the cache [Default: 64]",
        "MONTHS",
    );
    opts.optopt(
        "w",
        "first-day-of-week",
        "Weekday shown in the first column [Default: sunday]",
        "WEEKDAY",
    );
    opts.optopt(
        "",
        "row-height",
        "Base height of a week row [Default: 20]",
        "HEIGHT",
    );
    opts.optopt(
        "",
        "level-height",
        "Height of one stacked event lane [Default: 2]",
        "HEIGHT",
    );
    opts.optflag(
        "",
        "no-navigation",
        "Leave out links to the previous and next month",
    );
    opts.optflag("", "no-event-links", "Leave out links to event pages");
    opts.optopt(
        "f",
        "events-file",
        "JSON file holding the events to display",
        "PATH",
    );
    opts.optopt(
        "u",
        "events-url",
        "Upstream endpoint queried with `start` and `end` dates",
        "URL",
    );
    opts
}

fn get_default<T>(matches: &Matches, name: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    matches
        .opt_get_default(name, default)
        .map_err(|err| format!("Provided value for option '{name}' is invalid: {err}"))
}

pub fn try_parse(args: &[String]) -> Result<Parsed, String> {
    let opts = opts();
    let matches = opts.parse(args).map_err(|fail| fail.to_string())?;

    if matches.opt_present("help") {
        return Ok(Parsed::Help(
            opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))),
        ));
    }

    let defaults = LayoutConfig::default();

    let address = get_default(&matches, "address", SocketAddr::from(([127, 0, 0, 1], 8080)))?;
    let enable_cache = matches.opt_present("enable-cache");
    let cache_ttl = Duration::from_secs(get_default(&matches, "cache-ttl", 3600)?);
    let cache_capacity = get_default(&matches, "cache-capacity", 64)?;

    let layout = LayoutConfig {
        first_day_of_week: get_default(&matches, "first-day-of-week", Weekday::Sun)?,
        base_row_height: get_default(&matches, "row-height", defaults.base_row_height)?,
        level_unit_height: get_default(&matches, "level-height", defaults.level_unit_height)?,
        navigation_links: !matches.opt_present("no-navigation"),
        link_to_events: !matches.opt_present("no-event-links"),
        ..defaults
    };

    let source = match (matches.opt_str("events-file"), matches.opt_str("events-url")) {
        (Some(path), None) => SourceArg::File(path.into()),
        (None, Some(url)) => SourceArg::Url(url),
        (Some(_), Some(_)) => {
            return Err("Options 'events-file' and 'events-url' are mutually exclusive".into())
        }
        (None, None) => return Err("One of 'events-file' or 'events-url' is required".into()),
    };

    Ok(Parsed::Run(Args {
        address,
        enable_cache,
        cache_ttl,
        cache_capacity,
        layout,
        source,
    }))
}

pub fn parse(args: &[String]) -> Args {
    match try_parse(args) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Help(usage)) => {
            println!("{usage}");
            process::exit(0);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
