use anyhow::Result;
use clap::{Parser, Subcommand};
use ftl_extract::commands::blur_images::{self, BlurImagesOptions};
use ftl_extract::commands::export::{self, ExportOptions};
use ftl_extract::config::Config;
use ftl_extract::logging::{self, LogLevel};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ftl-extract")]
#[command(
    author,
    version,
    about = "Extracts tr! and tr_plural! strings into Fluent translation files",
    long_about = None
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract translatable strings and generate FTL files
    Export {
        /// Project root directory
        #[arg(long, default_value = ".")]
        project_root: PathBuf,

        /// Print generated content instead of writing files
        #[arg(long)]
        dry_run: bool,

        /// Exit with an error if key collisions are detected
        #[arg(long)]
        fail_on_collisions: bool,
    },

    /// Regenerate blurred reference images for media tests
    BlurImages {
        /// Directory containing the PNG fixtures
        #[arg(long)]
        input_dir: PathBuf,

        /// Output directory (defaults to the input directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Blurhash component counts as X,Y
        #[arg(long, default_value = "4,3", value_parser = parse_components)]
        components: (u32, u32),

        /// Contrast adjustment applied when decoding
        #[arg(long, default_value_t = 1.0)]
        punch: f32,
    },
}

fn parse_components(value: &str) -> Result<(u32, u32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{value}'"))?;
    let x: u32 = x.trim().parse().map_err(|_| format!("invalid component count '{x}'"))?;
    let y: u32 = y.trim().parse().map_err(|_| format!("invalid component count '{y}'"))?;
    if !(1..=9).contains(&x) || !(1..=9).contains(&y) {
        return Err("component counts must be between 1 and 9".to_string());
    }
    Ok((x, y))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Ok(level) = std::env::var("FTL_EXTRACT_LOG") {
        if let Some(level) = LogLevel::parse(&level) {
            logging::set_level(level);
        }
    }
    if cli.quiet {
        logging::set_level(LogLevel::Warn);
    }

    let config = Config::load_or_default(cli.config.as_ref())?;

    match cli.command {
        Commands::Export {
            project_root,
            dry_run,
            fail_on_collisions,
        } => {
            export::run(
                &config,
                &ExportOptions {
                    project_root,
                    dry_run,
                    fail_on_collisions,
                },
            )?;
        }
        Commands::BlurImages {
            input_dir,
            output_dir,
            components,
            punch,
        } => {
            blur_images::run(&BlurImagesOptions {
                input_dir,
                output_dir,
                components,
                punch,
            })?;
        }
    }

    Ok(())
}
