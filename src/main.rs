use clap::{Parser, Subcommand};
use photo_manifest::imaging::RustBackend;
use photo_manifest::manifest::{Manifests, write_manifests};
use photo_manifest::{config, output, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-manifest")]
#[command(about = "Write JSON manifests for a CDN-hosted photo album")]
#[command(long_about = "\
Write JSON manifests for a CDN-hosted photo album

Every top-level directory of the photo root is a category. Images inside it
are measured and listed in two manifests written to the photo root:

  photos/
  ├── config.toml        # Optional overrides (see gen-config)
  ├── 壁纸/              # Category, published as \"wallpapers\"
  │   └── sunset.jpg
  ├── images/
  │   └── a.png
  ├── photosInfo.json    # [{dirName, fileName, iconID, remoteUrl}]
  └── photos.json        # [{name, children: [iconID]}]

Icon ids are \"{width}.{height} {fileName}\". Remote URLs are
{base_url}{owner}/{repo}/{category}/{fileName}.

Empty files, unsupported extensions and unreadable images are reported and
left out; they never stop the run.")]
#[command(version)]
struct Cli {
    /// Photo root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the photo root and write both manifests (default)
    Build,
    /// Scan and report without writing manifests
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let config = config::load_config(&cli.root)?;
            let result = scan::scan(
                &cli.root,
                &config,
                &RustBackend::new(),
                output::print_scan_event,
            )?;
            let manifests = Manifests::from_categories(&result.categories);
            let written = write_manifests(&cli.root, &config, &manifests)?;
            output::print_summary(&result, &config, Some(&written));
        }
        Command::Check => {
            let config = config::load_config(&cli.root)?;
            let result = scan::scan(
                &cli.root,
                &config,
                &RustBackend::new(),
                output::print_scan_event,
            )?;
            output::print_summary(&result, &config, None);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
