use clap::{Parser, Subcommand};
use simple_site::{model::SiteConfig, output, render};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "simple-site")]
#[command(about = "Static site builder core — build HTML sites from a site-config.json")]
#[command(long_about = "\
Static site builder core — build HTML sites from a site-config.json

The site configuration is a single JSON document describing the site name,
theme, main page, and an ordered list of pages with image galleries. It is
the same file the browser editor exports inside every generated bundle, so
a downloaded site can be rebuilt from its own site-config.json.

Configuration shape:

  {
    \"name\": \"my-site\",            # archive/export base name
    \"theme\": \"modern\",            # modern | minimal | classic
    \"mainTitle\": \"Welcome\",
    \"mainContent\": \"# Hello\",     # Markdown, rendered in the browser
    \"mainImages\": [\"https://…\", {\"url\": \"https://…\", \"title\": \"Dawn\"}],
    \"mainGalleryTitle\": \"Shots\",
    \"pages\": [
      {\"id\": 1712000000000, \"title\": \"About\", \"content\": \"…\",
       \"images\": [], \"galleryTitle\": \"\"}
    ]
  }

Older exports (bare-string images, missing galleryTitle) load unchanged.

Run 'simple-site new' to create a starter configuration.")]
#[command(version = version_string())]
struct Cli {
    /// Site configuration file
    #[arg(long, default_value = "site-config.json", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a starter site configuration
    New {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
    /// Validate the configuration and report missing required fields
    Check,
    /// Export the full site bundle into a directory
    Build {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Print the preview HTML document to stdout
    Preview,
    /// List available themes
    Themes,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::New { force } => {
            if cli.config.exists() && !force {
                return Err(format!(
                    "{} already exists (use --force to overwrite)",
                    cli.config.display()
                )
                .into());
            }
            let config = SiteConfig::new();
            std::fs::write(&cli.config, serde_json::to_string_pretty(&config)?)?;
            println!("Wrote {}", cli.config.display());
        }
        Command::Check => {
            let config = load_config(&cli.config)?;
            let validation = config.validate();
            output::print_check_output(&validation);
            if !validation.is_valid {
                std::process::exit(1);
            }
        }
        Command::Build { output: out_dir } => {
            let config = load_config(&cli.config)?;
            let bundle = render::package_site(&config)?;
            std::fs::create_dir_all(&out_dir)?;
            for (name, content) in &bundle {
                std::fs::write(out_dir.join(name), content)?;
            }
            output::print_export_output(&config, &bundle);
            println!("Site exported to {}", out_dir.display());
        }
        Command::Preview => {
            let config = load_config(&cli.config)?;
            print!("{}", render::render_preview(&config, None));
        }
        Command::Themes => {
            output::print_themes_output();
        }
    }

    Ok(())
}

/// Read and leniently parse a site configuration file.
///
/// Parse failures surface as one error; nothing is partially loaded.
fn load_config(path: &std::path::Path) -> Result<SiteConfig, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    let config: SiteConfig = serde_json::from_str(&text)
        .map_err(|err| format!("{} is not a valid site configuration: {err}", path.display()))?;
    Ok(config)
}
