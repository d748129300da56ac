//! Command-line interface for the SiiTune core
//!
//! Stands in for the GUI: imports `.sii` files into typed JSON, generates
//! fresh documents, patches existing ones, and scans mod archives for
//! engine definitions.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use siitune_core::sii::{extract, generate, patch, ConfigBlockKind, Document, FieldSet};

#[derive(Parser, Debug)]
#[command(
    name = "siitune",
    about = "Inspect, generate and patch SCS powertrain accessory .sii files",
    version
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Extract the field set of a .sii file and print it as JSON
    Show(ShowArgs),
    /// Generate a fresh document from a JSON field set
    Generate(GenerateArgs),
    /// Patch an existing document with a JSON field set, preserving formatting
    Patch(PatchArgs),
    /// Scan a mod archive (.scs/.zip) for engine definitions
    Scan(ScanArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Engine,
    Transmission,
}

impl From<Kind> for ConfigBlockKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Engine => ConfigBlockKind::Engine,
            Kind::Transmission => ConfigBlockKind::Transmission,
        }
    }
}

#[derive(clap::Args, Debug)]
struct ShowArgs {
    /// The .sii file to inspect
    path: PathBuf,
    /// Block kind to extract
    #[arg(long, value_enum, default_value_t = Kind::Engine)]
    kind: Kind,
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// JSON field set, e.g. {"Engine": {...}} (as printed by `show`)
    spec: PathBuf,
    /// Output path; prints to stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct PatchArgs {
    /// The original .sii file to patch
    path: PathBuf,
    /// JSON field set with the new values
    #[arg(long)]
    spec: PathBuf,
    /// Output path; prints to stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct ScanArgs {
    /// The .scs or .zip mod archive to scan
    path: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Show(args) => cmd_show(args),
        Cmd::Generate(args) => cmd_generate(args),
        Cmd::Patch(args) => cmd_patch(args),
        Cmd::Scan(args) => cmd_scan(args),
    }
}

fn cmd_show(args: ShowArgs) -> Result<()> {
    let text = fs::read_to_string(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    let fields = extract(&text, args.kind.into())?;
    println!("{}", serde_json::to_string_pretty(&fields)?);
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let fields = read_spec(&args.spec)?;
    write_output(args.out.as_deref(), &generate(&fields))
}

fn cmd_patch(args: PatchArgs) -> Result<()> {
    let text = fs::read_to_string(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    let fields = read_spec(&args.spec)?;

    let doc = Document::new(text);
    let patched = patch(&doc, &fields);
    if patched == doc.text() {
        tracing::warn!(
            keyword = fields.kind().keyword(),
            "document unchanged; block may be missing"
        );
    }
    write_output(args.out.as_deref(), &patched)
}

fn cmd_scan(args: ScanArgs) -> Result<()> {
    let file = fs::File::open(&args.path)
        .with_context(|| format!("opening {}", args.path.display()))?;
    let mut archive = zip::ZipArchive::new(file).context("reading archive")?;

    let mut found = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).context("reading archive entry")?;
        if entry.is_dir() || !entry.name().ends_with(".sii") {
            continue;
        }
        let Some(truck) = truck_from_path(entry.name()) else {
            continue;
        };
        let path = entry.name().to_string();

        let mut text = String::new();
        if entry.read_to_string(&mut text).is_err() {
            tracing::warn!(path, "skipping unreadable entry");
            continue;
        }
        if !text.contains(ConfigBlockKind::Engine.keyword()) {
            continue;
        }

        let name = extract(&text, ConfigBlockKind::Engine)
            .ok()
            .and_then(|f| match f {
                FieldSet::Engine(e) => e.name,
                _ => None,
            })
            .unwrap_or_else(|| "Unknown".to_string());
        found.push((truck, name, path));
    }

    if found.is_empty() {
        bail!("no engine definitions found in {}", args.path.display());
    }
    found.sort();
    for (truck, name, path) in found {
        println!("{truck}\t{name}\t{path}");
    }
    Ok(())
}

/// Truck internal name from a `def/vehicle/truck/<truck>/engine/...` path
fn truck_from_path(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').collect();
    segments
        .windows(5)
        .find(|w| w[0] == "def" && w[1] == "vehicle" && w[2] == "truck" && w[4] == "engine")
        .map(|w| w[3].to_string())
}

fn read_spec(path: &std::path::Path) -> Result<FieldSet> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing field set {}", path.display()))
}

fn write_output(out: Option<&std::path::Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?
        }
        None => print!("{text}"),
    }
    Ok(())
}
