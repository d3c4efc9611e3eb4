use clap::{Parser, Subcommand};
use logo_overlay::config::{self, LoggingConfig, ProjectConfig};
use logo_overlay::process::{OverlayManager, RunOptions};
use logo_overlay::scan::{self, FolderLayout};
use logo_overlay::types::{ImageKind, OffsetMode, OverlayJob};
use logo_overlay::{imaging, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "logo-overlay")]
#[command(about = "Overlap a logo on a folder of images")]
#[command(long_about = "\
Overlap a logo on a folder of images

Folder structure (relative to --root):

  config.toml                 # Optional settings (see gen-config)
  inputs/
  ├── images_jpeg/            # Base images for --image-type jpeg (.jpg/.jpeg)
  ├── logo_jpeg/              # Logo for jpeg (first file by name wins)
  ├── images_png/             # Base images for --image-type png
  └── logo_png/               # Logo for png
  outputs/                    # Results, same filenames as the inputs

Run 'logo-overlay init' to create the folders.")]
#[command(version)]
struct Cli {
    /// Project root containing config.toml and the inputs folder
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Output directory (overrides folders.outputs)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Overlap the logo on every image of the given type
    Overlay {
        /// Image type to process
        #[arg(long, value_enum, ignore_case = true)]
        image_type: ImageKind,

        /// X coordinate to place the logo
        #[arg(long, allow_negative_numbers = true)]
        position_x: i64,

        /// Y coordinate to place the logo
        #[arg(long, allow_negative_numbers = true)]
        position_y: i64,

        /// Treat the position as relative to the center of each image
        #[arg(long)]
        center_relative: bool,

        /// Write a JSON report of processed and skipped images
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Create the input and output folders
    Init,
    /// Print format, mode and size of images
    Info {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Overlay {
            image_type,
            position_x,
            position_y,
            center_relative,
            report,
        } => {
            let (project_config, layout) = setup(&cli.root, cli.output.as_deref(), cli.verbose)?;
            let job = OverlayJob::new(
                image_type,
                (position_x, position_y),
                OffsetMode::from_center_flag(center_relative),
            );
            let options = RunOptions {
                logo_max_dimension: project_config.logo.max_dimension,
            };

            let manager = OverlayManager::new(job, &layout, options)?;
            tracing::info!(
                "Found {} {} images, logo {}",
                manager.images().images().len(),
                manager.job().kind(),
                manager.images().logo().display()
            );

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    output::log_event(&event);
                }
            });
            let result = manager.run_with_backend(&imaging::RustBackend::new(), Some(tx));
            printer.join().ok();
            let batch = result?;

            if let Some(report_path) = report {
                let json = serde_json::to_string_pretty(&batch)?;
                std::fs::write(&report_path, json)?;
                tracing::info!("Report written to {}", report_path.display());
            }
            output::print_report(&batch, &layout.outputs);
        }
        Command::Init => {
            let (_, layout) = setup(&cli.root, cli.output.as_deref(), cli.verbose)?;
            let created = scan::ensure_folder_structure(&layout)?;
            for folder in &created {
                tracing::info!("Created folder: {}", folder.display());
            }
            println!("Folder structure validated ({} created)", created.len());
        }
        Command::Info { paths } => {
            setup(&cli.root, cli.output.as_deref(), cli.verbose)?;
            for path in &paths {
                match imaging::inspect(path) {
                    Ok(info) => {
                        for line in output::format_image_info(&info) {
                            println!("{}", line);
                        }
                    }
                    Err(e) => {
                        tracing::error!("Error getting image info for {}: {}", path.display(), e)
                    }
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `config.toml`, install logging, and resolve the folder layout.
fn setup(
    root: &Path,
    output_override: Option<&Path>,
    verbose: bool,
) -> Result<(ProjectConfig, FolderLayout), Box<dyn std::error::Error>> {
    let project_config = config::load_config(root)?;
    init_logging(root, &project_config.logging, verbose)?;

    let mut layout = FolderLayout::from_config(root, &project_config.folders);
    if let Some(output) = output_override {
        layout.outputs = output.to_path_buf();
    }
    Ok((project_config, layout))
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the configured level; `--verbose` forces debug.
fn init_logging(
    root: &Path,
    logging: &LoggingConfig,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact();

    match &logging.file {
        Some(file) => {
            let path = root.join(file);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            builder
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => builder.init(),
    }
    Ok(())
}
