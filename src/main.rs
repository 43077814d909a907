//! # pathd CLI
//!
//! Usage:
//!   pathd paths.txt                         # blank-line separated path data
//!   echo 'M 0 0 L 10 10' | pathd --format skia
//!   pathd --svg icon.svg --to 48x48 -o icon.txt
//!   pathd --from 100x100 --to 24x24 --format json paths.txt

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{error, info, warn};
use serde::Serialize;

use pathd::transform::parse_size;
use pathd::{render, CoordinateTransform, Identity, Instruction, PathParser, Rescale};

#[derive(Parser, Debug)]
#[command(name = "pathd", version, about = "Compile SVG path data into path instructions")]
struct Args {
    /// Input file (stdin when omitted)
    input: Option<PathBuf>,

    /// Treat the input as an SVG document and compile every <path d>
    #[arg(long)]
    svg: bool,

    /// Source canvas size, WIDTHxHEIGHT (defaults to the SVG viewBox)
    #[arg(long, value_parser = parse_size)]
    from: Option<(f64, f64)>,

    /// Destination canvas size, WIDTHxHEIGHT; enables rescaling
    #[arg(long, value_parser = parse_size)]
    to: Option<(f64, f64)>,

    /// Output rendering
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Skia,
    Json,
}

/// One input path as it appears in JSON output.
#[derive(Serialize)]
struct CompiledPath<'a> {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    instructions: Vec<Instruction>,
}

struct Source {
    id: Option<String>,
    d: String,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&args) {
        Ok(0) => {}
        Ok(failed) => {
            eprintln!("✗ {} path(s) failed to compile", failed);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("✗ {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns the number of paths that failed to compile.
fn run(args: &Args) -> Result<usize> {
    let text = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let (sources, view_box_size) = if args.svg {
        let doc = pathd::svg::extract_paths(&text).context("failed to read SVG document")?;
        let size = doc.view_box.map(|vb| (vb.width, vb.height));
        let sources = doc
            .paths
            .into_iter()
            .map(|p| Source { id: p.id, d: p.d })
            .collect::<Vec<_>>();
        (sources, size)
    } else {
        let sources = pathd::input::read_paths(text.as_bytes())?
            .into_iter()
            .map(|d| Source { id: None, d })
            .collect::<Vec<_>>();
        (sources, None)
    };

    let transform: Box<dyn CoordinateTransform> = match args.to {
        Some(to) => {
            let Some(from) = args.from.or(view_box_size) else {
                bail!("--to needs a source size: pass --from or use --svg with a viewBox");
            };
            info!("rescaling {}x{} -> {}x{}", from.0, from.1, to.0, to.1);
            Box::new(Rescale::between(from, to)?)
        }
        None => {
            if args.from.is_some() {
                warn!("--from without --to has no effect");
            }
            Box::new(Identity)
        }
    };
    let parser = PathParser::with_transform(transform);

    let mut failed = 0;
    let mut compiled = Vec::new();
    for (index, source) in sources.iter().enumerate() {
        match parser.parse(&source.d) {
            Ok(instructions) => compiled.push(CompiledPath {
                index,
                id: source.id.as_deref(),
                instructions,
            }),
            Err(e) => {
                let label = source.id.as_deref().map_or_else(|| format!("#{}", index), str::to_string);
                error!("path {}: {}", label, e);
                failed += 1;
            }
        }
    }

    let output = match args.format {
        Format::Json => serde_json::to_string_pretty(&compiled)? + "\n",
        Format::Text => join_blocks(compiled.iter().map(|c| render::to_text(&c.instructions))),
        Format::Skia => {
            join_blocks(compiled.iter().map(|c| render::to_skia_source(&c.instructions)))
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("✓ Compiled {} path(s) to {}", compiled.len(), path.display());
        }
        None => io::stdout().write_all(output.as_bytes())?,
    }

    Ok(failed)
}

fn join_blocks(blocks: impl Iterator<Item = String>) -> String {
    blocks.collect::<Vec<_>>().join("\n")
}
