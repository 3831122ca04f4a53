//! Purpose: `extract-svg` CLI entry point.
//! Role: Binary crate root; parses args, runs the extraction, reports the outcome.
//! Invariants: The success line is the only stdout output.
//! Invariants: Errors go to stderr: human text on a terminal, one JSON line otherwise.
//! Invariants: Process exit code is derived from `to_exit_code`.
use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Parser, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use svg_extract::core::error::{Error, ErrorKind, to_exit_code};
use svg_extract::core::extract::{Extraction, extract};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run(std::env::args_os()) {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run<I>(args: I) -> Result<RunOutcome, (Error, ColorMode)>
where
    I: IntoIterator<Item = OsString>,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                return Ok(RunOutcome::ok());
            }
            _ => {
                let message = clap_error_summary(&err);
                let hint = usage_hint(&message);
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(message)
                        .with_hint(hint),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    debug!(input = %cli.input.display(), output = ?cli.output, "starting extraction");

    let extraction = extract(&cli.input, cli.output.as_deref())
        .map_err(|err| (err, color_mode))?;
    emit_success(&extraction);
    Ok(RunOutcome::ok())
}

#[derive(Parser, Debug)]
#[command(
    name = "extract-svg",
    version,
    about = "Extract the rendered SVG map from a JSON stat response",
    long_about = None,
    after_help = r#"The first array element with a "map" field is written to the input path
with its first ".json" replaced by ".svg" (e.g. output.json -> output.svg).

EXAMPLES
  $ extract-svg output.json
  $ extract-svg responses.json --output map.svg
  $ extract-svg -- -stat.json           # path starting with '-'"#
)]
struct Cli {
    #[arg(help = "JSON file holding an array of response objects", value_hint = ValueHint::FilePath)]
    input: PathBuf,

    #[arg(
        short,
        long,
        help = "Write the SVG here instead of the path derived from the input",
        value_hint = ValueHint::FilePath
    )]
    output: Option<PathBuf>,

    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn emit_success(extraction: &Extraction) {
    debug!(
        index = extraction.index,
        request_id = ?extraction.request_id,
        bytes = extraction.bytes_written,
        "extraction complete"
    );
    println!("SVG saved to {}", extraction.output.display());
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

impl AnsiColor {
    fn paint(self, label: &str, enabled: bool) -> String {
        let code = match self {
            AnsiColor::Red => "31",
            AnsiColor::Yellow => "33",
        };
        if enabled {
            format!("\u{1b}[{code}m{label}\u{1b}[0m")
        } else {
            label.to_string()
        }
    }
}

// Only reachable if serializing a `Value` fails; the kind names a real `ErrorKind`.
const ENCODE_FAILED_LINE: &str = r#"{"error":{"kind":"Io","message":"json encode failed"}}"#;

fn emit_error(err: &Error, color_mode: ColorMode) {
    let stderr = io::stderr();
    let line = if stderr.is_terminal() {
        error_text(err, color_mode.use_color(true))
    } else {
        serde_json::to_string(&error_json(err)).unwrap_or_else(|_| ENCODE_FAILED_LINE.to_string())
    };
    eprintln!("{line}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "file not found".to_string(),
        ErrorKind::InvalidJson => "invalid JSON".to_string(),
        ErrorKind::FieldNotFound => "no object with a \"map\" field was found".to_string(),
        ErrorKind::InvalidMap => "\"map\" field is not a string".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    std::iter::successors(err.source(), |&source| source.source())
        .map(ToString::to_string)
        .collect()
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    if let Some(index) = err.index() {
        inner.insert("index".to_string(), json!(index));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        AnsiColor::Red.paint("error:", use_color),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            AnsiColor::Yellow.paint("hint:", use_color)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            AnsiColor::Yellow.paint("path:", use_color),
            path.display()
        ));
    }
    if let Some(index) = err.index() {
        lines.push(format!(
            "{} {index}",
            AnsiColor::Yellow.paint("index:", use_color)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            AnsiColor::Yellow.paint("caused by:", use_color)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.strip_prefix("error:").unwrap_or(line).trim().to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}

fn usage_hint(summary: &str) -> String {
    if summary.contains("unexpected argument '-") {
        return "Paths starting with '-' need `--` first: extract-svg -- <input.json>.".to_string();
    }
    "Usage: extract-svg <input.json>. Try `extract-svg --help`.".to_string()
}
