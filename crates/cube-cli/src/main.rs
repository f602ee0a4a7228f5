mod replay;
mod text;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cube_core::{Catalogue, Face, Orientation, SnapTarget, SpinPlan};
use cube_session::CubeConfig;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::text::TextPresenter;

#[derive(Parser)]
#[command(name = "cube", about = "Wisdom cube orientation engine driver")]
struct Cli {
    /// TOML config file (defaults to $CUBE_CONFIG, then built-in values)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON catalogue replacing the built-in wisdom cards
    #[arg(long, global = true)]
    catalogue: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the six faces with their home angles and cards
    Faces {
        #[arg(long)]
        json: bool,
    },

    /// Nearest face and snap target for an orientation
    Snap {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[arg(long)]
        json: bool,
    },

    /// Plan a random spin from an orientation
    Spin {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        /// Fixed RNG seed (overrides config)
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        json: bool,
    },

    /// Replay a JSON-lines pointer script ("-" for stdin) through a live session
    Replay {
        script: PathBuf,
        /// Eased intermediate frames to print per animation
        #[arg(long, default_value_t = 0)]
        samples: u32,
    },

    /// Write the active catalogue as JSON
    ExportCatalogue {
        /// Output file path
        path: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<CubeConfig> {
    let mut config = CubeConfig::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(path) = &cli.catalogue {
        config.catalogue = Some(path.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Faces { json } => cmd_faces(&cli, *json),
        Commands::Snap { x, y, json } => cmd_snap(Orientation::new(*x, *y), *json),
        Commands::Spin { x, y, seed, json } => {
            cmd_spin(&cli, Orientation::new(*x, *y), *seed, *json)
        }
        Commands::Replay { script, samples } => cmd_replay(&cli, script, *samples).await,
        Commands::ExportCatalogue { path } => cmd_export(&cli, path),
    }
}

fn cmd_faces(cli: &Cli, json: bool) -> Result<()> {
    let config = load_config(cli)?;
    let catalogue = config
        .load_catalogue()
        .context("failed to load catalogue")?;

    if json {
        let faces: Vec<_> = Face::ALL
            .iter()
            .map(|&face| {
                let home = face.home();
                serde_json::json!({
                    "face": face,
                    "home": { "x": home.x, "y": home.y },
                    "placement": face.placement(config.cube_size_px).css(),
                    "title": &catalogue.get(face).title,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&faces)?);
        return Ok(());
    }

    println!(
        "cube {}px, perspective {}px",
        config.cube_size_px, config.perspective_px
    );
    for face in Face::ALL {
        let home = face.home();
        let wisdom = catalogue.get(face);
        println!(
            "{:<7} home=({:>4}, {:>4})  {:<34}  {}",
            face.as_str(),
            home.x,
            home.y,
            face.placement(config.cube_size_px).css(),
            wisdom.title,
        );
    }
    Ok(())
}

fn cmd_snap(at: Orientation, json: bool) -> Result<()> {
    let snap = at.nearest_face_snap_target();
    if json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
        return Ok(());
    }
    let SnapTarget { face, target } = snap;
    let scores = at.score_faces();
    for (f, score) in scores.iter() {
        println!("score {:<7} {score:+.4}", f.as_str());
    }
    println!("face:   {face}");
    println!("target: ({}, {})", target.x, target.y);
    Ok(())
}

fn cmd_spin(cli: &Cli, at: Orientation, seed: Option<u64>, json: bool) -> Result<()> {
    let config = load_config(cli)?;
    let mut rng = match seed.or(config.seed) {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let plan: SpinPlan = at.plan_random_spin(&config.spin, &mut rng);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }
    println!("face:     {}", plan.face);
    println!("target:   ({}, {})", plan.target.x, plan.target.y);
    println!(
        "extra:    {} pitch, {} yaw",
        plan.extra_turns_x, plan.extra_turns_y
    );
    println!("duration: {:.3}s", plan.duration_secs);
    Ok(())
}

async fn cmd_replay(cli: &Cli, script: &Path, samples: u32) -> Result<()> {
    let config = load_config(cli)?;
    let catalogue = config
        .load_catalogue()
        .context("failed to load catalogue")?;
    let presenter = TextPresenter::new(std::io::stdout(), samples);

    let summary = replay::run(&config, presenter, script).await?;

    let reduced = summary.orientation.reduced();
    println!(
        "settled: {} (flows={}, committed={}, revoked={})",
        summary
            .active_face
            .map(|f| format!("{f} \"{}\"", catalogue.get(f).title))
            .unwrap_or_else(|| "none".to_string()),
        summary.flows_started,
        summary.committed,
        summary.revoked,
    );
    println!(
        "orientation: ({}, {}) reduced=({}, {})",
        summary.orientation.x, summary.orientation.y, reduced.x, reduced.y
    );
    Ok(())
}

fn cmd_export(cli: &Cli, path: &Path) -> Result<()> {
    let config = load_config(cli)?;
    let catalogue: Catalogue = config
        .load_catalogue()
        .context("failed to load catalogue")?;
    let json = catalogue.to_json().context("failed to serialize catalogue")?;
    std::fs::write(path, &json).with_context(|| format!("failed to write {}", path.display()))?;

    println!("exported to {}", path.display());
    Ok(())
}
