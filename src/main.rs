use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use formgen::config::CONFIG_FILE;
use formgen::{FormIndex, Settings};

#[derive(Parser)]
#[command(name = "formgen")]
#[command(about = "Discovers JSON-described web forms and serves them as rendered templates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default formgen.toml
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate every form-data.json under the template root
    Check {
        /// Template root (overrides config)
        #[arg(short, long)]
        templates: Option<PathBuf>,
    },

    /// List every indexed form path
    List {
        /// Template root (overrides config)
        #[arg(short, long)]
        templates: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config,

    /// Serve every indexed form path over HTTP
    Serve {
        /// Bind address (overrides config)
        #[arg(short, long)]
        bind: Option<String>,

        /// Template root (overrides config)
        #[arg(short, long)]
        templates: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load()?;

    match cli.command {
        Commands::Init { force } => {
            if std::path::Path::new(CONFIG_FILE).exists() && !force {
                bail!("{CONFIG_FILE} already exists (use --force to overwrite)");
            }
            std::fs::write(CONFIG_FILE, toml::to_string_pretty(&settings)?)?;
            println!("Wrote {CONFIG_FILE}");
        }

        Commands::Check { templates } => {
            formgen::logging::init_with_config(&settings.logging);
            if let Some(templates) = templates {
                settings.templates_dir = templates;
            }
            match FormIndex::load(&settings.templates_dir) {
                Ok(index) => {
                    println!(
                        "OK: {} form paths under {}",
                        index.len(),
                        settings.templates_dir.display()
                    );
                }
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::List { templates } => {
            formgen::logging::init_with_config(&settings.logging);
            if let Some(templates) = templates {
                settings.templates_dir = templates;
            }
            let index = FormIndex::load(&settings.templates_dir)?;
            for path in index.paths() {
                let Some(meta) = index.get(path) else {
                    continue;
                };
                match meta.parent_path.as_deref() {
                    Some(parent) => {
                        println!("{path}  template={}  child-of={parent}", meta.template)
                    }
                    None => println!("{path}  template={}", meta.template),
                }
            }
        }

        Commands::Config => {
            println!("{}", toml::to_string_pretty(&settings)?);
        }

        Commands::Serve { bind, templates } => {
            if let Some(bind) = bind {
                settings.server.bind = bind;
            }
            if let Some(templates) = templates {
                settings.templates_dir = templates;
            }

            #[cfg(feature = "http-server")]
            formgen::serve::serve(settings).await?;

            #[cfg(not(feature = "http-server"))]
            {
                let _ = settings;
                eprintln!("HTTP server support is not compiled in.");
                eprintln!("Please rebuild with: cargo build --features http-server");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
