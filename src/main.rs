use clap::{Parser, Subcommand};
use simple_cv::filter::{self, FilterSpec};
use simple_cv::skills::SkillCatalogue;
use simple_cv::{config, generate, output, scan};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simple-cv")]
#[command(about = "Static site generator for CV and portfolio sites")]
#[command(long_about = "\
Static site generator for CV and portfolio sites

Pages are registered in config.toml and rendered from plain files: Markdown
with YAML front matter, a CSV skills table, and YAML lists.

Content structure:

  content/
  ├── config.toml                  # Pages, sidebar sections, colors
  ├── intro.md                     # markdown page
  ├── experiences/                 # cards page (one .md per card)
  │   ├── acme.md                  # front matter: period, skills, weight, image
  │   └── images/acme.png
  ├── projects/                    # tabs page (one .md per tab)
  ├── skills.csv                   # skills page
  ├── skill_categories.yaml
  └── publications.yaml            # publications page

Set RUST_LOG=simple_cv=debug for diagnostics.

Run 'simple-cv gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".simple-cv-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content directory without building
    Check,
    /// List the skills catalogue, optionally filtered
    Skills {
        /// Filter as column:op:value, e.g. level:gte:4 (repeatable)
        #[arg(long = "filter", value_name = "COLUMN:OP:VALUE")]
        filters: Vec<FilterSpec>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error_chain(err.as_ref());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Scan => {
            let site = scan::scan(&cli.source)?;
            write_manifest(&site, &cli.temp_dir)?;
            output::print_scan_output(&site);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let site = scan::scan(&cli.source)?;
            write_manifest(&site, &cli.temp_dir)?;
            output::print_scan_output(&site);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let summary = generate::generate(&site, &cli.output)?;
            output::print_generate_output(&summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = scan::scan(&cli.source)?;
            generate::build_router(&site)?;
            output::print_scan_output(&site);
            println!("==> Content is valid");
        }
        Command::Skills { filters } => {
            let catalogue = load_catalogue(&cli.source)?;
            let compiled = filter::compile_all(&filters)?;
            output::print_skills_table(&catalogue.filter(&compiled));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn write_manifest(site: &scan::Site, temp_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(site)?;
    std::fs::write(&manifest_path, json)?;
    tracing::debug!(path = %manifest_path.display(), "wrote manifest");
    Ok(())
}

/// The catalogue of the first skills page in the config.
fn load_catalogue(source: &Path) -> Result<SkillCatalogue, Box<dyn std::error::Error>> {
    let site_config = config::load_config(source)?;
    let csv = site_config
        .pages
        .iter()
        .find_map(|page| match &page.layout {
            config::Layout::Skills { source: csv, .. } => Some(csv.clone()),
            _ => None,
        })
        .ok_or("no skills page configured")?;
    Ok(SkillCatalogue::load(&source.join(csv))?)
}
