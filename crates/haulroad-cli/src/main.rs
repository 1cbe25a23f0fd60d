use haulroad_core::format::{self, Format};
use haulroad_core::traversal::Polyline;
use haulroad_core::{
    Catalog, Frame, Location, Pose, Progress, Route, Tour, TourConfig, TourSettings, Traversal,
    leaf_id,
};
use haulroad_layout::{Bounds, Layout, Point};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(haulroad_core::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<haulroad_core::Error> for CliError {
    fn from(value: haulroad_core::Error) -> Self {
        Self::Core(value)
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
    Sweep,
    Locate,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    config: Option<String>,
    overrides: Vec<String>,
    algorithm: Option<String>,
    steps: usize,
    reveals_only: bool,
    progress: f64,
}

#[derive(Serialize)]
struct LeafFan<'a> {
    node: &'a str,
    positions: Vec<Point>,
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    algorithm: &'static str,
    #[serde(flatten)]
    layout: &'a Layout,
    bounds: Option<Bounds>,
    leaves: Vec<LeafFan<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SweepOut {
    length: f64,
    steps: usize,
    frames: Vec<Frame>,
    revealed_leaves: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocateOut {
    progress: Progress,
    /// Polyline segment under the marker; absent for the curve strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
    pose: Pose,
    revealed_nodes: Vec<String>,
}

fn usage() -> &'static str {
    "haulroad\n\
\n\
USAGE:\n\
  haulroad [layout] [--pretty] [--config <path>] [--set <key=value>]... [--algorithm <name>] [<catalog>|-]\n\
  haulroad sweep [--steps <n>] [--reveals-only] [--pretty] [--config <path>] [--set <key=value>]... [--algorithm <name>] [<catalog>|-]\n\
  haulroad locate --progress <p> [--pretty] [--config <path>] [--set <key=value>]... [--algorithm <name>] [<catalog>|-]\n\
\n\
NOTES:\n\
  - If <catalog> is omitted or '-', input is read from stdin (JSON, falling back to YAML).\n\
  - Catalog and config files are read as JSON, JSON5 or YAML by extension.\n\
  - --algorithm is one of zigZag, orthogonal, meander, curveFit.\n\
  - --set applies a dotted config override, e.g. --set reveal.threshold=0.75.\n\
  - sweep ticks the tour at <n>+1 evenly spaced progress values (default 100).\n\
  - locate walks the tour up to <p> and reports the marker pose there.\n\
  - locate includes the polyline segment only for the polyline strategy.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Layout,
        steps: 100,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "sweep" => args.command = Command::Sweep,
            "locate" => args.command = Command::Locate,
            "--pretty" => args.pretty = true,
            "--reveals-only" => args.reveals_only = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--set" => {
                let Some(kv) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.overrides.push(kv.clone());
            }
            "--algorithm" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.algorithm = Some(name.clone());
            }
            "--steps" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.steps = n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?;
                if args.steps == 0 {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--progress" => {
                let Some(p) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.progress = p.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
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
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
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

fn read_catalog(input: Option<&str>) -> Result<Catalog, CliError> {
    let text = read_input(input)?;
    let known = input
        .filter(|p| *p != "-")
        .and_then(|p| Format::from_path(Path::new(p)).ok());
    let value: Value = match known {
        Some(fmt) => fmt.parse(&text)?,
        None => format::parse_auto(&text)?,
    };
    Ok(Catalog::from_value(value)?)
}

fn resolve_settings(args: &Args) -> Result<TourSettings, CliError> {
    let mut cfg = match args.config.as_deref() {
        Some(path) => TourConfig::from_path(Path::new(path))?,
        None => TourConfig::empty_object(),
    };
    if let Some(name) = args.algorithm.as_deref() {
        cfg.set_value("layout.algorithm", Value::String(name.to_string()));
    }
    for kv in &args.overrides {
        cfg.apply_override(kv)?;
    }
    Ok(cfg.resolve()?)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let settings = resolve_settings(&args)?;
    let catalog = read_catalog(args.input.as_deref())?;
    let mut tour = Tour::new(catalog, &settings)?;
    tracing::debug!(command = ?args.command, nodes = tour.layout().nodes.len(), "running");

    match args.command {
        Command::Layout => {
            let layout = tour.layout();
            let leaves = layout
                .ids()
                .map(|id| LeafFan {
                    node: id,
                    positions: tour.leaf_positions(id).unwrap_or_default(),
                })
                .collect();
            let out = LayoutOut {
                algorithm: settings.layout.algorithm().name(),
                layout,
                bounds: layout.bounds(),
                leaves,
            };
            write_json(&out, args.pretty)
        }
        Command::Sweep => {
            let mut frames = Vec::with_capacity(args.steps + 1);
            for i in 0..=args.steps {
                tour.set_progress(Progress::new(i as f64 / args.steps as f64));
                let frame = tour.tick();
                if !args.reveals_only || !frame.newly_revealed.is_empty() {
                    frames.push(frame);
                }
            }
            let out = SweepOut {
                length: tour.route().length(),
                steps: args.steps,
                frames,
                revealed_leaves: tour
                    .visibility()
                    .revealed_leaves()
                    .map(|(node, leaf)| leaf_id(node, leaf))
                    .collect(),
            };
            write_json(&out, args.pretty)
        }
        Command::Locate => {
            let target = Progress::new(args.progress);
            // Walk up to the target so reveals and facing match a real scroll.
            let steps = 200;
            let mut pose = tour.tick().pose;
            for i in 1..=steps {
                tour.set_progress(Progress::new(target.get() * i as f64 / steps as f64));
                pose = tour.tick().pose;
            }
            let location = match settings.traversal.strategy {
                Traversal::Polyline => Polyline::new(tour.layout().path.clone()).locate(target),
                Traversal::CatmullRom => None,
            };
            let out = LocateOut {
                progress: target,
                location,
                pose,
                revealed_nodes: tour
                    .visibility()
                    .revealed_nodes()
                    .map(str::to_string)
                    .collect(),
            };
            write_json(&out, args.pretty)
        }
    }
}

fn main() {
    env_logger::init();

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
