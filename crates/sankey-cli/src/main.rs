use sankey_core::{DEFAULT_PALETTE, DataTable, Viewport, build_graph};
use sankey_layout::LayoutOptions;
use sankey_layout::text::{DeterministicTextMeasurer, TextMeasurer, UnicodeWidthTextMeasurer};
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Input(sankey_core::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Input(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<sankey_core::Error> for CliError {
    fn from(value: sankey_core::Error) -> Self {
        Self::Input(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Graph,
}

#[derive(Debug, Clone, Copy, Default)]
enum TextMeasurerKind {
    #[default]
    Deterministic,
    Unicode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Json,
    Csv,
}

impl FromStr for InputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    format: Option<InputFormat>,
    text_measurer: TextMeasurerKind,
    viewport_width: f64,
    viewport_height: f64,
}

fn usage() -> &'static str {
    "sankey-cli\n\
\n\
USAGE:\n\
  sankey-cli [layout] [--pretty] [--format json|csv] [--text-measurer deterministic|unicode] [--viewport-width <w>] [--viewport-height <h>] [<path>|-]\n\
  sankey-cli graph [--pretty] [--format json|csv] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is read as CSV for '.csv' paths and as a JSON data table otherwise.\n\
  - layout prints the positioned nodes and links; graph prints the built graph only.\n\
  - Set RUST_LOG (e.g. RUST_LOG=sankey_layout=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Layout,
        viewport_width: 800.0,
        viewport_height: 600.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "graph" => args.command = Command::Graph,
            "--pretty" => args.pretty = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = Some(
                    fmt.parse::<InputFormat>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--text-measurer" => {
                let Some(kind) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.text_measurer = match kind.as_str() {
                    "deterministic" => TextMeasurerKind::Deterministic,
                    "unicode" => TextMeasurerKind::Unicode,
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--viewport-width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.viewport_width = w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--viewport-height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.viewport_height = h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn input_format(args: &Args) -> InputFormat {
    if let Some(format) = args.format {
        return format;
    }
    match args.input.as_deref() {
        Some(path) if path.to_ascii_lowercase().ends_with(".csv") => InputFormat::Csv,
        _ => InputFormat::Json,
    }
}

fn read_table(args: &Args) -> Result<DataTable, CliError> {
    let text = read_input(args.input.as_deref())?;
    let table = match input_format(args) {
        InputFormat::Csv => sankey_core::parse_csv_table(&text)?,
        InputFormat::Json => DataTable::from_json_str(&text)?,
    };
    tracing::debug!(rows = table.row_count(), "read data table");
    Ok(table)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn build_text_measurer(kind: TextMeasurerKind) -> Arc<dyn TextMeasurer + Send + Sync> {
    match kind {
        TextMeasurerKind::Deterministic => Arc::new(DeterministicTextMeasurer::default()),
        TextMeasurerKind::Unicode => Arc::new(UnicodeWidthTextMeasurer::default()),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let table = read_table(&args)?;

    match args.command {
        Command::Graph => {
            let graph = build_graph(&table, DEFAULT_PALETTE);
            write_json(&graph, args.pretty)
        }
        Command::Layout => {
            let options = LayoutOptions {
                text_measurer: build_text_measurer(args.text_measurer),
                ..Default::default()
            };
            let viewport = Viewport::new(args.viewport_width, args.viewport_height);
            let layout = sankey_layout::layout_sankey(&table, viewport, &options);
            write_json(&layout, args.pretty)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
