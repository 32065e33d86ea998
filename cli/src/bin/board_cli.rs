use clap::{Parser, Subcommand};
use cli::BoardJob;
use color_eyre::eyre::Result;
use locator::{LocatedParts, LocatorConfig, OverlayKind, load_board_image, locate_parts};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a localization job from a configuration file
    Process {
        /// Path to the TOML or JSON job file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Locate parts on a single board photograph
    Locate {
        /// Path to the input image
        #[arg(short, long)]
        input: PathBuf,
        /// Output directory for the mask, overlays and region report
        #[arg(short, long)]
        output_dir: PathBuf,
        /// Binarization threshold
        #[arg(long, default_value = "110")]
        threshold_level: u8,
        /// Median denoise kernel size (must be odd)
        #[arg(long, default_value = "23")]
        denoise_kernel_size: u32,
        /// Lower bound of the re-binarization band
        #[arg(long, default_value = "135")]
        range_low: u8,
        /// Upper bound of the re-binarization band
        #[arg(long, default_value = "255")]
        range_high: u8,
        /// Smallest accepted bounding-box side
        #[arg(long, default_value = "20")]
        min_side: u32,
        /// Largest accepted bounding-box side
        #[arg(long, default_value = "100")]
        max_side: u32,
        /// Bounding rectangle line thickness
        #[arg(long, default_value = "5")]
        box_thickness: u32,
    },
    /// Write a skeleton job file with the reference parameters
    Init {
        /// Path to the input image the job will process
        #[arg(short, long)]
        input: PathBuf,
        /// Output directory the job will write to
        #[arg(short, long)]
        output_dir: PathBuf,
        /// Path of the job file to create
        #[arg(short, long)]
        job: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process { config } => {
            let job = BoardJob::from_file(&config)?;
            run_job(&job)?;
        }
        Commands::Locate {
            input,
            output_dir,
            threshold_level,
            denoise_kernel_size,
            range_low,
            range_high,
            min_side,
            max_side,
            box_thickness,
        } => {
            let job = BoardJob {
                input,
                output_dir,
                locator: LocatorConfig {
                    threshold_level,
                    denoise_kernel_size,
                    range_low,
                    range_high,
                    min_side,
                    max_side,
                    box_thickness,
                    ..LocatorConfig::default()
                },
            };
            run_job(&job)?;
        }
        Commands::Init { input, output_dir, job } => {
            let skeleton = BoardJob {
                input,
                output_dir,
                locator: LocatorConfig::default(),
            };
            skeleton.to_toml_file(&job)?;
            info!("Wrote job skeleton to {}", job.display());
        }
    }

    Ok(())
}

fn run_job(job: &BoardJob) -> Result<()> {
    info!("Locating parts on {}", job.input.display());
    let image = load_board_image(&job.input)?;

    let parts = locate_parts(&image, &job.locator)?;
    info!(
        total = parts.regions.len(),
        accepted = parts.accepted().count(),
        "traced regions"
    );

    std::fs::create_dir_all(&job.output_dir)?;
    save_outputs(&parts, &job.output_dir)?;
    Ok(())
}

fn save_outputs(parts: &LocatedParts, output_dir: &Path) -> Result<()> {
    let mask_path = output_dir.join("mask.png");
    parts.mask.save(&mask_path)?;
    info!("Wrote {}", mask_path.display());

    for kind in OverlayKind::iter() {
        let path = output_dir.join(format!("{kind}.png"));
        parts.overlay(kind).save(&path)?;
        info!("Wrote {}", path.display());
    }

    let report_path = output_dir.join("regions.geojson");
    parts.save_geojson(&report_path)?;
    info!("Wrote {}", report_path.display());
    Ok(())
}
