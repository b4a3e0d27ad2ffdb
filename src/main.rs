use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use floorwire::designer::serialization;
use floorwire::{init_logging, Config, DeviceKind, DeviceSchedule, FloorplanEditor};

#[derive(Parser, Debug)]
#[command(name = "floorwire", version, about = "Electrical overlay editor for floorplans")]
struct Cli {
    /// Settings file (JSON or TOML); defaults to the platform config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the device schedule of a project
    Schedule { project: PathBuf },

    /// Import walls from an SVG floorplan
    Import {
        svg: PathBuf,
        /// Multiplier applied to every SVG coordinate
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
        /// Project to import into; a new project is created otherwise
        #[arg(long)]
        project: Option<PathBuf>,
        /// Where to write the result; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Place a device (and its companion) the way a click on the canvas would
    Place {
        project: PathBuf,
        #[arg(long, value_enum)]
        kind: KindArg,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum KindArg {
    Power,
    Light,
    Switch,
}

impl From<KindArg> for DeviceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Power => DeviceKind::Power,
            KindArg::Light => DeviceKind::Light,
            KindArg::Switch => DeviceKind::Switch,
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Config::load_or_default().context("Failed to load settings")?,
    };
    Ok(config)
}

fn open_project(editor: &mut FloorplanEditor, path: &Path) -> anyhow::Result<()> {
    let doc = serialization::load_from_file(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    editor.store_mut().load_project(doc)?;
    Ok(())
}

fn write_project(editor: &FloorplanEditor, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            serialization::save_to_file(editor.store().document(), path)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{}", editor.store().export_project()?),
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let mut editor = FloorplanEditor::with_config(config)?;

    match cli.command {
        Command::Schedule { project } => {
            open_project(&mut editor, &project)?;
            let schedule = DeviceSchedule::from_nodes(editor.store().nodes());
            println!("{}", schedule);
        }
        Command::Import {
            svg,
            scale,
            project,
            output,
        } => {
            if let Some(project) = project {
                open_project(&mut editor, &project)?;
            }
            let content = std::fs::read_to_string(&svg)
                .with_context(|| format!("Failed to read {}", svg.display()))?;
            let count = editor.import_svg_walls(&content, scale)?;
            tracing::info!("{} walls, {} segments indexed", count, editor.wall_index().len());
            write_project(&editor, output.as_deref())?;
        }
        Command::Place {
            project,
            kind,
            x,
            y,
            output,
        } => {
            open_project(&mut editor, &project)?;
            let placement = editor
                .place_device(kind.into(), x, y)
                .context("Placement produced no changes")?;
            match &placement.companion {
                Some(companion) => tracing::info!(
                    "Placed {} with companion {} (wall snap: {})",
                    placement.primary,
                    companion,
                    placement.snapped
                ),
                None => tracing::info!(
                    "Placed {} (wall snap: {})",
                    placement.primary,
                    placement.snapped
                ),
            }
            write_project(&editor, output.as_deref().or(Some(project.as_path())))?;
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    run(Cli::parse())
}
