mod debug_report;

use resenha::{Classifier, ClassifyError, CommandOracle, Options, Prediction, SentimentOracle, StaticOracle};
use std::io::{self, IsTerminal, Read};
use std::time::Duration;

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if config.list_rules {
        debug_report::print_rules(resenha::rules(), config.color);
        return;
    }

    let oracle: Box<dyn SentimentOracle> = match config.oracle {
        Some(OracleSpec::Static(prediction)) => Box::new(StaticOracle::new(prediction.label, prediction.confidence)),
        Some(OracleSpec::Command(command)) => Box::new(command.with_timeout(config.timeout)),
        None => {
            eprintln!("error: no oracle configured");
            std::process::exit(2);
        }
    };

    let classifier = Classifier::with_options(oracle, Options { preprocess: config.preprocess });
    match classifier.classify_verbose(&config.input) {
        Ok(res) if config.quiet => println!("{}", res.label),
        Ok(res) => debug_report::print_run(&res, config.color),
        Err(err @ ClassifyError::OracleUnavailable { .. }) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

enum OracleSpec {
    Static(Prediction),
    Command(CommandOracle),
}

struct CliConfig {
    input: String,
    /// Always set unless `list_rules` is.
    oracle: Option<OracleSpec>,
    timeout: Duration,
    color: bool,
    quiet: bool,
    preprocess: bool,
    list_rules: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut oracle: Option<OracleSpec> = None;
    let mut oracle_args: Vec<String> = Vec::new();
    let mut timeout = Duration::from_millis(DEFAULT_TIMEOUT_MS);
    let mut color = io::stdout().is_terminal();
    let mut quiet = false;
    let mut preprocess = false;
    let mut list_rules = false;
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("resenha {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "-q" | "--quiet" => quiet = true,
            "--preprocess" => preprocess = true,
            "--list-rules" => list_rules = true,
            "--oracle" => {
                let value = args.next().ok_or_else(|| "error: --oracle expects a value".to_string())?;
                set_oracle(&mut oracle, OracleSpec::Static(parse_static_oracle(&value)?))?;
            }
            "--oracle-cmd" => {
                let value = args.next().ok_or_else(|| "error: --oracle-cmd expects a value".to_string())?;
                set_oracle(&mut oracle, OracleSpec::Command(parse_command_oracle(&value)?))?;
            }
            "--oracle-arg" => {
                let value = args.next().ok_or_else(|| "error: --oracle-arg expects a value".to_string())?;
                oracle_args.push(value);
            }
            "--timeout-ms" => {
                let value = args.next().ok_or_else(|| "error: --timeout-ms expects a value".to_string())?;
                timeout = parse_timeout(&value)?;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_input(&mut input, value)?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--oracle=") => {
                let value = arg.trim_start_matches("--oracle=");
                set_oracle(&mut oracle, OracleSpec::Static(parse_static_oracle(value)?))?;
            }
            _ if arg.starts_with("--oracle-cmd=") => {
                let value = arg.trim_start_matches("--oracle-cmd=");
                set_oracle(&mut oracle, OracleSpec::Command(parse_command_oracle(value)?))?;
            }
            _ if arg.starts_with("--oracle-arg=") => {
                oracle_args.push(arg.trim_start_matches("--oracle-arg=").to_string());
            }
            _ if arg.starts_with("--timeout-ms=") => {
                timeout = parse_timeout(arg.trim_start_matches("--timeout-ms="))?;
            }
            _ if arg.starts_with("--input=") => {
                set_input(&mut input, arg.trim_start_matches("--input=").to_string())?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let oracle = attach_oracle_args(oracle, oracle_args)?;

    // The rule table needs neither input nor oracle.
    if list_rules {
        return Ok(CliConfig { input: String::new(), oracle, timeout, color, quiet, preprocess, list_rules });
    }

    if oracle.is_none() {
        return Err(format!("error: no oracle configured\n\n{}", help_text()));
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, oracle, timeout, color, quiet, preprocess, list_rules })
}

fn attach_oracle_args(oracle: Option<OracleSpec>, extra: Vec<String>) -> Result<Option<OracleSpec>, String> {
    if extra.is_empty() {
        return Ok(oracle);
    }
    match oracle {
        Some(OracleSpec::Command(command)) => {
            Ok(Some(OracleSpec::Command(extra.into_iter().fold(command, |command, arg| command.arg(arg)))))
        }
        _ => Err("error: --oracle-arg requires --oracle-cmd".to_string()),
    }
}

fn set_input(slot: &mut Option<String>, value: String) -> Result<(), String> {
    if slot.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *slot = Some(value);
    Ok(())
}

fn set_oracle(slot: &mut Option<OracleSpec>, value: OracleSpec) -> Result<(), String> {
    if slot.is_some() {
        return Err("error: oracle provided multiple times".to_string());
    }
    *slot = Some(value);
    Ok(())
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

/// `<label>:<confidence>`, e.g. `positive:0.93`.
fn parse_static_oracle(value: &str) -> Result<Prediction, String> {
    let invalid = || format!("error: invalid --oracle '{value}' (expected <positive|negative>:<confidence>)");
    let (label, confidence) = value.split_once(':').ok_or_else(invalid)?;
    let confidence: f64 = confidence.trim().parse().map_err(|_| invalid())?;
    Prediction::from_raw(label, confidence).map_err(|_| invalid())
}

fn parse_command_oracle(value: &str) -> Result<CommandOracle, String> {
    CommandOracle::from_command_line(value).ok_or_else(|| "error: --oracle-cmd expects a command".to_string())
}

fn parse_timeout(value: &str) -> Result<Duration, String> {
    match value.parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(format!("error: invalid --timeout-ms '{value}' (expected a positive integer)")),
    }
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "resenha {version}

Sentiment classifier for support reviews.

Usage:
  resenha [OPTIONS] --oracle <label>:<confidence> [--] <review...>
  resenha [OPTIONS] --oracle-cmd <command> --input <review>
  resenha --list-rules

Options:
  -i, --input <text>         Review text. If omitted, reads remaining args
                             or stdin when no args are provided.
  --oracle <label>:<conf>    Use a fixed oracle answer, e.g. positive:0.93.
  --oracle-cmd <command>     Run <command> per review; it reads the review on
                             stdin and prints '<label> <confidence>'.
                             Split on whitespace; quotes are not understood.
  --oracle-arg <arg>         Extra argument for --oracle-cmd, taken verbatim.
                             Repeatable.
  --timeout-ms <ms>          Deadline for --oracle-cmd; the program is killed
                             when it passes. Default: {default_timeout}
  --preprocess               Include the stop-word-free form in the report.
  --list-rules               Print the decision cascade and exit.
  -q, --quiet                Print only the label.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RESENHA_DEBUG_RULES=1      Trace extraction and rule evaluation on stderr.

Exit codes:
  0  Success.
  1  Oracle unavailable.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        default_timeout = DEFAULT_TIMEOUT_MS
    )
}
