use clap::{Parser, Subcommand};
use grid_inject::config::{self, GridConfig};
use grid_inject::fs::RealFs;
use grid_inject::run::{self, RunOptions};
use grid_inject::{output, scan};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid-inject")]
#[command(about = "Inject an image gallery grid into a static HTML page")]
#[command(long_about = "\
Inject an image gallery grid into a static HTML page

Images in public/etsy_photos/ become cards in a grid that is written
between two marker comments in index.html. Content outside the markers is
never touched.

Site structure:

  site/
  ├── grid.toml                    # Optional config (see gen-config)
  ├── index.html                   # Holds <!-- GRID:START --> ... <!-- GRID:END -->
  ├── product-blue-vase.html       # Optional detail page → card links to /product-blue-vase
  └── public/
      └── etsy_photos/
          ├── blue-vase.jpg        # Card titled \"Blue Vase\"
          └── blue-vase 2.jpg      # Renamed to blue-vase-2.jpg, then hidden as a duplicate

With --ci (or the CI environment variable set), an empty photo directory
fails the run instead of injecting a placeholder.")]
#[command(version)]
struct Cli {
    /// Document root
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Fail when no images are found
    #[arg(long, global = true)]
    ci: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Normalize filenames and inject the grid (default)
    Build,
    /// Show what a build would do without changing anything
    Check,
    /// Print the eligible image listing as JSON
    Scan,
    /// Print a stock grid.toml with all options documented
    GenConfig,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load `grid.toml` and resolve the CI signal from the flag or the environment.
fn load_site(
    fs: &RealFs,
    cli: &Cli,
    dry_run: bool,
) -> Result<(GridConfig, RunOptions), config::ConfigError> {
    let site_config = config::load_config(fs, &cli.root)?;
    let env_value = std::env::var(&site_config.ci.env_var).ok();
    let options = RunOptions {
        ci: cli.ci || run::ci_signal(env_value.as_deref()),
        dry_run,
        ..RunOptions::new(&cli.root)
    };
    Ok((site_config, options))
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    let fs = RealFs;
    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let (site_config, options) = load_site(&fs, &cli, false)?;
            let report = run::run(&fs, &site_config, &options)?;
            output::print_build_output(&report);
        }
        Command::Check => {
            let (site_config, options) = load_site(&fs, &cli, true)?;
            let report = run::run(&fs, &site_config, &options)?;
            output::print_check_output(&report);
            if !report.is_up_to_date() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Scan => {
            let (site_config, _) = load_site(&fs, &cli, true)?;
            let photos = site_config.photos_path(&cli.root);
            let images = scan::list_images(&fs, &photos, &site_config.images)?;
            println!("{}", serde_json::to_string_pretty(&images)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}
