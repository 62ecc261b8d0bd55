//! Showcase CLI
//!
//! Inspect the page's diagrams and configuration, and run the page runtime
//! headless against the reference page.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use showcase_app::{fixture, PageSnapshot, ShowcaseApp};
use showcase_core::{Key, PageEvent};
use showcase_diagram::{DiagramCatalog, DiagramOutline, HeadlessRenderer, MermaidConfig};
use showcase_dom::{Document, InlineIcons, ScrollBehavior};

#[derive(Parser)]
#[command(name = "showcase")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pipeline showcase page runtime tools", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the page's diagrams, or print one diagram's source
    Diagrams {
        /// Diagram id (architecture, performance, algorithm, retrieval)
        id: Option<String>,
    },

    /// Print the effective page configuration
    Config {
        /// Site directory containing showcase.toml
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Print the diagram library configuration (JSON) instead
        #[arg(long)]
        mermaid: bool,
    },

    /// Run the page headless and print the resulting state
    Simulate {
        /// URL fragment the page is loaded with
        #[arg(long)]
        hash: Option<String>,

        /// Keys pressed after load, comma separated (e.g. 3,Escape,6)
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,

        /// Scroll offset applied after the keys
        #[arg(long)]
        scroll: Option<f64>,

        /// Virtual time to run until (ms)
        #[arg(long, default_value = "3000")]
        until: f64,

        /// Pretend the user prefers reduced motion
        #[arg(long)]
        reduced_motion: bool,

        /// Site directory containing showcase.toml
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Include the final document markup
        #[arg(long)]
        html: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Diagrams { id } => cmd_diagrams(id.as_deref()),

        Commands::Config { dir, mermaid } => cmd_config(&dir, mermaid),

        Commands::Simulate {
            hash,
            keys,
            scroll,
            until,
            reduced_motion,
            dir,
            html,
        } => cmd_simulate(SimulateOptions {
            hash,
            keys,
            scroll,
            until,
            reduced_motion,
            dir,
            html,
        }),
    }
}

fn cmd_diagrams(id: Option<&str>) -> Result<()> {
    let catalog = DiagramCatalog::standard();

    if let Some(id) = id {
        let definition = catalog.get_str(id).with_context(|| {
            format!(
                "Unknown diagram '{}'. Known diagrams: {}",
                id,
                catalog.ids().map(|d| d.as_str()).collect::<Vec<_>>().join(", ")
            )
        })?;
        print!("{}", definition.source);
        return Ok(());
    }

    println!(
        "{:<14} {:<22} {:<10} {:>6} {:>6} {:>6}",
        "ID", "CONTAINER", "KIND", "NODES", "EDGES", "TASKS"
    );
    for definition in catalog.iter() {
        let outline = DiagramOutline::parse(definition.source)
            .with_context(|| format!("Failed to read diagram '{}'", definition.id))?;
        println!(
            "{:<14} {:<22} {:<10} {:>6} {:>6} {:>6}",
            definition.id.as_str(),
            definition.container_id(),
            outline.kind,
            outline.nodes.len(),
            outline.edges.len(),
            outline.tasks.len()
        );
    }
    Ok(())
}

fn cmd_config(dir: &Path, mermaid: bool) -> Result<()> {
    if mermaid {
        println!("{}", MermaidConfig::default().to_json_pretty()?);
        return Ok(());
    }

    let config = config::load_from_dir(dir)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

struct SimulateOptions {
    hash: Option<String>,
    keys: Vec<String>,
    scroll: Option<f64>,
    until: f64,
    reduced_motion: bool,
    dir: PathBuf,
    html: bool,
}

#[derive(Serialize)]
struct SimulationReport {
    #[serde(flatten)]
    snapshot: PageSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
}

fn cmd_simulate(options: SimulateOptions) -> Result<()> {
    let config = config::load_from_dir(&options.dir)?;

    let mut doc = fixture::reference_page().with_reduced_motion(options.reduced_motion);
    if let Some(hash) = &options.hash {
        doc = doc.with_hash(hash);
    }

    let mut app = ShowcaseApp::new(doc, HeadlessRenderer::new(), config).with_icons(InlineIcons);
    app.handle(PageEvent::DomReady);

    for key in &options.keys {
        info!("key: {}", key);
        app.handle(PageEvent::KeyDown(Key::from_dom_key(key.trim())));
        let next = app.now() + showcase_app::FRAME_MS;
        app.run_until(next);
    }

    if let Some(y) = options.scroll {
        app.document_mut().scroll_to(y, ScrollBehavior::Instant);
        app.handle(PageEvent::Scroll { y });
    }

    app.run_until(options.until);

    let report = SimulationReport {
        snapshot: app.snapshot(),
        html: options.html.then(|| app.document().to_html()),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
