mod debug_report;

use chrono::{DateTime, Duration, FixedOffset};
use std::io::{self, IsTerminal, Read};
use tempus::{FixedClock, MatchMode, Options, Parser, SystemClock};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TEMPUS_LOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_logging(config.debug);

    let options = Options { match_mode: if config.first_only { MatchMode::First } else { MatchMode::All } };
    let builder = Parser::builder().with_options(options);
    let builder = match config.reference {
        Some(now) => builder.with_clock(FixedClock(now)),
        None => builder.with_clock(SystemClock),
    };

    let parser = match builder.build() {
        Ok(parser) => parser,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let input = config.input.trim();
    if config.trace {
        match parser.parse_verbose(input) {
            Ok(res) => debug_report::print_run(input, &res, config.color),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    } else {
        match parser.parse(input) {
            Ok(res) => {
                println!("time:     {}", res.time.to_rfc3339());
                println!("duration: {}", format_duration(res.duration));
                println!("text:     {}", res.text);
                let spans = res.spans.iter().map(|s| format!("{}..{}", s.start, s.end)).collect::<Vec<_>>();
                println!("spans:    [{}]", spans.join(", "));
            }
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("tempus=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

/// Render like "2h30m0s", "1.5s", "0s".
pub(crate) fn format_duration(d: Duration) -> String {
    let Some(total) = d.num_nanoseconds() else {
        return format!("{}s", d.num_seconds());
    };
    if total == 0 {
        return "0s".to_string();
    }

    let sign = if total < 0 { "-" } else { "" };
    let nanos = total.unsigned_abs();
    let hours = nanos / 3_600_000_000_000;
    let minutes = nanos / 60_000_000_000 % 60;
    let secs = nanos / 1_000_000_000 % 60;
    let frac = nanos % 1_000_000_000;

    let mut seconds = secs.to_string();
    if frac > 0 {
        let digits = format!("{frac:09}");
        seconds.push('.');
        seconds.push_str(digits.trim_end_matches('0'));
    }

    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{seconds}s")
    } else {
        format!("{sign}{seconds}s")
    }
}

struct CliConfig {
    input: String,
    reference: Option<DateTime<FixedOffset>>,
    first_only: bool,
    trace: bool,
    debug: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut reference = None;
    let mut first_only = false;
    let mut trace = false;
    let mut debug = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("tempus {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--first-only" => first_only = true,
            "--trace" => trace = true,
            "--debug" => debug = true,
            "--reference" => {
                let value = args.next().ok_or_else(|| "error: --reference expects a value".to_string())?;
                reference = Some(parse_reference(&value)?);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--reference=") => {
                let value = arg.trim_start_matches("--reference=");
                reference = Some(parse_reference(value)?);
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, reference, first_only, trace, debug, color })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_reference(value: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(value)
        .map_err(|_| format!("error: invalid --reference '{value}' (expected RFC 3339, e.g. 2013-02-12T04:30:00Z)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "tempus {version}

Pull a time and a duration out of a short piece of text.

Usage:
  tempus [OPTIONS] [--] <input...>
  tempus [OPTIONS] --input <text>

Options:
  -i, --input <text>         Input text to parse. If omitted, reads remaining args
                             or stdin when no args are provided.
  --reference <timestamp>    Reference instant in RFC 3339. Default: the system clock.
  --first-only               Apply only the first match of each rule.
  --trace                    Print a per-rule report instead of the plain result.
  --debug                    Log engine events to stderr (otherwise {log_env} is read).
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  Parse error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
