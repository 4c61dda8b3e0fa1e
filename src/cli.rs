use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use crate::pipeline::{self, PipelineConfig, DEFAULT_CELL_SIZE};
use crate::scene::{MemoryScene, SceneSink};
use crate::strip::StripDeclaration;
use crate::table::{CellValue, DataTable};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out LED strips and compute per-cell intensity timelines
    Layout {
        /// Strip declaration JSON file (array of strips)
        #[arg(long)]
        strips: PathBuf,

        /// Brightness table JSON file (array of rows of numbers/strings)
        #[arg(long)]
        table: PathBuf,

        /// Row where frame/value data begins
        #[arg(long, default_value_t = 0)]
        header_row: usize,

        /// Column where value data begins
        #[arg(long, default_value_t = 1)]
        header_col: usize,

        /// Edge length of one LED cell in host units
        #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
        cell_size: f32,

        /// Output JSON file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Layout {
            strips,
            table,
            header_row,
            header_col,
            cell_size,
            out,
        } => layout_command(strips, table, header_row, header_col, cell_size, out),
    }
}

fn layout_command(
    strips_path: PathBuf,
    table_path: PathBuf,
    header_row: usize,
    header_col: usize,
    cell_size: f32,
    out: Option<PathBuf>,
) -> Result<()> {
    let strips: Vec<StripDeclaration> = serde_json::from_str(
        &fs::read_to_string(&strips_path)
            .with_context(|| format!("failed to read {}", strips_path.display()))?,
    )
    .context("failed to parse strip declarations")?;

    let rows: Vec<Vec<CellValue>> = serde_json::from_str(
        &fs::read_to_string(&table_path)
            .with_context(|| format!("failed to read {}", table_path.display()))?,
    )
    .context("failed to parse brightness table")?;
    let table = DataTable::new(rows, header_row, header_col);

    let config = PipelineConfig { cell_size };
    let elements = pipeline::run(&strips, &table, &config)?;

    let mut scene = MemoryScene::new();
    scene.accept(&elements);

    let json = serde_json::to_string_pretty(scene.elements())?;
    match out {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => println!("{json}"),
    }

    Ok(())
}
