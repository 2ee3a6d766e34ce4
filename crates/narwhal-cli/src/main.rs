use narwhal::render::{HeadlessError, HeadlessRenderer};
use narwhal::{ChartKind, ChartRequest, StyleConfig};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "NARWHAL_LOG";

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io(std::io::Error),
    Narwhal(narwhal::Error),
    Headless(HeadlessError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Narwhal(err) => write!(f, "error: {err}"),
            CliError::Headless(err) => write!(f, "error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<narwhal::Error> for CliError {
    fn from(value: narwhal::Error) -> Self {
        Self::Narwhal(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Headless(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Render,
    Layout,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    kind: Option<ChartKind>,
    title: Option<String>,
    data: Option<String>,
    data_file: Option<String>,
    out: Option<String>,
    color: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    palette: Option<Vec<String>>,
    style_file: Option<String>,
    document_id: Option<String>,
    json: bool,
    pretty: bool,
}

fn usage() -> &'static str {
    "narwhal-cli\n\
\n\
USAGE:\n\
  narwhal-cli [render] --type <kind> --title <text> (--data <json> | --data-file <path>|-) --out <path> [--color <c>] [--width <w>] [--height <h>] [--palette <c1,c2,...>] [--style-file <path>] [--id <doc-id>] [--json]\n\
  narwhal-cli layout --type <kind> --title <text> (--data <json> | --data-file <path>|-) [style flags] [--pretty]\n\
\n\
KINDS:\n\
  bar, pie, stats, comparison, flowchart\n\
\n\
NOTES:\n\
  - -t, -d and -o are short for --type, --data and --out.\n\
  - --style-file is a JSON object of style options; flags override it.\n\
  - The output directory must already exist.\n\
  - Set NARWHAL_LOG (e.g. NARWHAL_LOG=debug) to see diagnostics on stderr.\n\
"
}

fn usage_error(msg: impl std::fmt::Display) -> CliError {
    CliError::Usage(format!("{msg}\n\n{}", usage()))
}

fn next_value<'a>(
    it: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a String, CliError> {
    it.next()
        .ok_or_else(|| usage_error(format!("missing value for {flag}")))
}

fn parse_dimension(flag: &str, raw: &str) -> Result<f64, CliError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| usage_error(format!("{flag} expects a finite number, got `{raw}`")))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage().to_string())),
            "render" => args.command = Command::Render,
            "layout" => args.command = Command::Layout,
            "--type" | "-t" => {
                let raw = next_value(&mut it, a)?;
                args.kind = Some(raw.parse::<ChartKind>().map_err(usage_error)?);
            }
            "--title" => args.title = Some(next_value(&mut it, a)?.clone()),
            "--data" | "-d" => args.data = Some(next_value(&mut it, a)?.clone()),
            "--data-file" => args.data_file = Some(next_value(&mut it, a)?.clone()),
            "--out" | "-o" => args.out = Some(next_value(&mut it, a)?.clone()),
            "--color" => args.color = Some(next_value(&mut it, a)?.clone()),
            "--width" => args.width = Some(parse_dimension(a, next_value(&mut it, a)?)?),
            "--height" => args.height = Some(parse_dimension(a, next_value(&mut it, a)?)?),
            "--palette" => {
                let raw = next_value(&mut it, a)?;
                let colors: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect();
                args.palette = Some(colors);
            }
            "--style-file" => args.style_file = Some(next_value(&mut it, a)?.clone()),
            "--id" => args.document_id = Some(next_value(&mut it, a)?.clone()),
            "--json" => args.json = true,
            "--pretty" => args.pretty = true,
            other => return Err(usage_error(format!("unexpected argument `{other}`"))),
        }
    }

    if args.kind.is_none() {
        return Err(usage_error("--type is required"));
    }
    if args.title.is_none() {
        return Err(usage_error("--title is required"));
    }
    match (&args.data, &args.data_file) {
        (None, None) => return Err(usage_error("one of --data or --data-file is required")),
        (Some(_), Some(_)) => {
            return Err(usage_error("--data and --data-file are mutually exclusive"));
        }
        _ => {}
    }
    if args.command == Command::Render && args.out.is_none() {
        return Err(usage_error("--out is required"));
    }

    Ok(args)
}

fn read_data(args: &Args) -> Result<String, CliError> {
    if let Some(inline) = &args.data {
        return Ok(inline.clone());
    }
    match args.data_file.as_deref() {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

/// Style file first, then individual flags on top.
fn build_style_config(args: &Args) -> Result<StyleConfig, CliError> {
    let mut config = match args.style_file.as_deref() {
        Some(path) => StyleConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => StyleConfig::empty_object(),
    };
    if let Some(color) = &args.color {
        config.set_value("primaryColor", Value::String(color.clone()));
    }
    if let Some(w) = args.width {
        config.set_value("width", Value::from(w));
    }
    if let Some(h) = args.height {
        config.set_value("height", Value::from(h));
    }
    if let Some(palette) = &args.palette {
        config.set_value("palette", Value::from(palette.clone()));
    }
    Ok(config)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let (Some(kind), Some(title)) = (args.kind, args.title.as_deref()) else {
        return Err(usage_error("--type and --title are required"));
    };
    let records = read_data(&args)?;
    let style = build_style_config(&args)?.to_style_options()?;
    let destination = args.out.as_deref().unwrap_or("-");
    let request = ChartRequest::from_json(kind, title, &records, destination)?.with_style(style);
    tracing::debug!(kind = %kind, records = request.data().len(), "request parsed");

    let mut renderer = HeadlessRenderer::new();
    if let Some(id) = &args.document_id {
        renderer = renderer.with_document_id(id.clone());
    }

    match args.command {
        Command::Layout => {
            println!("{}", renderer.layout_json(&request, args.pretty)?);
        }
        Command::Render => {
            let summary = renderer.render(&request)?;
            if args.json {
                write_json(&summary, args.pretty)?;
            } else {
                println!(
                    "Created {} chart: {}",
                    summary.kind,
                    summary.path.display()
                );
            }
        }
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
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

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
