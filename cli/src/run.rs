use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::Path;
use tracing::info;

use converter::{ConvertOptions, Table, TableKind};

use crate::args::Args;

/// Runs one conversion. Returns the JSON text when it should go to stdout,
/// `None` when it was written to `--output`.
pub fn run(args: &Args) -> Result<Option<String>> {
    let options = load_options(args)?;
    let persons = read_table(&args.persons, TableKind::Persons)?;
    let families = read_table(&args.families, TableKind::Families)?;

    let document = converter::convert(&persons, &families, &options)?;
    let json = converter::to_json(&document, args.compact).context("failed to serialize document")?;

    match &args.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
            Ok(None)
        }
        None => Ok(Some(json)),
    }
}

fn load_options(args: &Args) -> Result<ConvertOptions> {
    let base = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            ConvertOptions::from_json(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => ConvertOptions::default(),
    };
    Ok(args.apply(base))
}

fn read_table(path: &Path, kind: TableKind) -> Result<Table> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let table = Table::from_reader(kind, file)?;
    info!("Read {} {} rows from {}", table.rows().len(), kind, path.display());
    Ok(table)
}
