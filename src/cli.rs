use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use getopts::Options;

use wird_calendar::Config;

pub struct Args {
    pub output: PathBuf,
    pub days: u32,
    pub masjid_id: Option<String>,
    pub timeout: Duration,
    pub json: bool,
    pub descriptions: bool,
}

impl Args {
    pub fn config(&self) -> Config {
        let mut config = Config {
            days_ahead: self.days,
            fetch_timeout: self.timeout,
            descriptions: self.descriptions,
            ..Config::default()
        };

        if let Some(masjid_id) = &self.masjid_id {
            config.masjid_id = masjid_id.clone();
        }

        config
    }
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "o",
        "output",
        "File to write the calendar to [Default: docs/naqshbandi_wird.ics]",
        "PATH",
    );
    opts.optopt(
        "d",
        "days",
        "Number of days ahead to generate events for [Default: 180]",
        "DAYS",
    );
    opts.optopt("m", "masjid-id", "AthanPlus masjid identifier", "ID");
    opts.optopt(
        "t",
        "timeout",
        "Timeout for each monthly timetable request [Default: 30]",
        "SECONDS",
    );
    opts.optflag(
        "j",
        "json",
        "Print the scheduled events as JSON instead of writing the calendar",
    );
    opts.optflag("", "no-descriptions", "Leave out event descriptions");
    opts
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
        process::exit(0);
    }

    let output = matches
        .opt_str("output")
        .map_or_else(|| PathBuf::from("docs/naqshbandi_wird.ics"), PathBuf::from);

    let days = match matches.opt_get_default("days", 180) {
        Ok(days) => days,
        Err(err) => {
            eprintln!("Provided value for option 'days' is invalid: {err}");
            process::exit(1);
        }
    };

    let timeout = match matches.opt_get_default("timeout", 30) {
        Ok(secs) => Duration::from_secs(secs),
        Err(err) => {
            eprintln!("Provided value for option 'timeout' is invalid: {err}");
            process::exit(1);
        }
    };

    Args {
        output,
        days,
        masjid_id: matches.opt_str("masjid-id"),
        timeout,
        json: matches.opt_present("json"),
        descriptions: !matches.opt_present("no-descriptions"),
    }
}
