//! Sowgrid - Scenario Runner
//!
//! Loads a TOML scenario into an in-memory world and either previews a
//! placement grid (one validation tick) or runs a clustered harvest.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sowgrid::core::error::{Result, SowgridError};
use sowgrid::harvest::HarvestClusterFinder;
use sowgrid::placement::{GridPlacementTool, Status};
use sowgrid::world::{HarvestableIndex, Scenario};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Preview grid placements and clustered harvests against a scenario
#[derive(Parser, Debug)]
#[command(name = "sowgrid")]
#[command(about = "Preview grid placements and clustered harvests against a scenario file")]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out the grid around the root and validate every cell
    Preview {
        /// Scenario TOML file
        #[arg(long)]
        scenario: PathBuf,

        /// Override the configured row count
        #[arg(long)]
        rows: Option<u32>,

        /// Override the configured column count
        #[arg(long)]
        columns: Option<u32>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Harvest the cluster around an object
    Harvest {
        /// Scenario TOML file
        #[arg(long)]
        scenario: PathBuf,

        /// Scenario id of the harvest origin
        #[arg(long)]
        origin: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// JSON output for one grid cell
#[derive(Serialize)]
struct CellReport {
    index: usize,
    row: usize,
    column: usize,
    position: [f32; 3],
    status: Option<Status>,
    message: Option<&'static str>,
}

/// JSON output for a preview run
#[derive(Serialize)]
struct PreviewReport {
    placeable: String,
    rows: u32,
    columns: u32,
    spacing: f32,
    placement_blocked: bool,
    committed: usize,
    cells: Vec<CellReport>,
}

/// JSON output for a harvest run
#[derive(Serialize)]
struct HarvestReport {
    origin: String,
    harvested: Vec<String>,
    remaining: usize,
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose {
        "sowgrid=debug"
    } else {
        "sowgrid=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Preview {
            scenario,
            rows,
            columns,
            format,
        } => preview(Scenario::load(&scenario)?, rows, columns, format),
        Command::Harvest {
            scenario,
            origin,
            format,
        } => harvest(Scenario::load(&scenario)?, &origin, format),
    }
}

fn preview(mut scenario: Scenario, rows: Option<u32>, columns: Option<u32>, format: OutputFormat) -> Result<()> {
    if let Some(rows) = rows {
        scenario.config.rows = rows;
    }
    if let Some(columns) = columns {
        scenario.config.columns = columns;
    }

    let placeable = scenario
        .placeable
        .clone()
        .ok_or_else(|| SowgridError::InvalidConfig("scenario has no [placeable]".to_string()))?;

    let mut built = scenario.build_world()?;
    let mut tool = GridPlacementTool::new(scenario.config.clone());
    tool.select(&mut built.world, built.root_handle, built.root_pose, placeable.clone());
    let statuses = tool.update(&mut built.world, built.root_pose);

    let Some(grid) = tool.grid() else {
        return Err(SowgridError::InvalidConfig("placement grid was not created".to_string()));
    };

    let cells: Vec<CellReport> = grid
        .cells
        .iter()
        .zip(&statuses)
        .map(|(cell, status)| CellReport {
            index: cell.index,
            row: cell.index / grid.columns as usize,
            column: cell.index % grid.columns as usize,
            position: cell.pose.position.to_array(),
            status: *status,
            message: status.and_then(Status::message_key),
        })
        .collect();

    let report = PreviewReport {
        placeable: placeable.name,
        rows: grid.rows,
        columns: grid.columns,
        spacing: tool.spacing().unwrap_or_default(),
        placement_blocked: tool.is_placement_blocked(),
        committed: tool.commit().map(|poses| poses.len()).unwrap_or(0),
        cells,
    };

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} - {}x{} grid, spacing {:.3}",
        report.placeable, report.rows, report.columns, report.spacing
    );
    for cell in &report.cells {
        let status = cell
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "skipped".to_string());
        println!(
            "  [{},{}] ({:>8.3}, {:>8.3}, {:>8.3})  {:<14} {}",
            cell.row,
            cell.column,
            cell.position[0],
            cell.position[1],
            cell.position[2],
            status,
            cell.message.unwrap_or("")
        );
    }
    if report.placement_blocked {
        println!("placement blocked");
    } else {
        println!("would place {} of {} cells", report.committed, report.cells.len());
    }

    Ok(())
}

fn harvest(scenario: Scenario, origin_key: &str, format: OutputFormat) -> Result<()> {
    let mut built = scenario.build_world()?;
    let origin = built
        .object_id(origin_key)
        .ok_or_else(|| SowgridError::UnknownObject(origin_key.to_string()))?;

    let finder = HarvestClusterFinder::new(&scenario.config);
    let harvested = finder.harvest(origin, &mut built.world);

    let names: Vec<String> = harvested
        .iter()
        .map(|&id| {
            built
                .world
                .type_name(id)
                .map(|name| format!("{}#{}", name, id.0))
                .unwrap_or_else(|| format!("#{}", id.0))
        })
        .collect();

    let report = HarvestReport {
        origin: origin_key.to_string(),
        harvested: names,
        remaining: built.world.remaining_harvestables().len(),
    };

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("harvested {} around '{}':", report.harvested.len(), report.origin);
    for name in &report.harvested {
        println!("  {}", name);
    }
    println!("{} harvestables remain", report.remaining);

    Ok(())
}
