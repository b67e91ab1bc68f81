// glowup-pdf: Generate fillable 7-Day Glow-Up planner sheets

use clap::{Args, Parser, Subcommand};
use glowup_pdf::handler::{self, DEFAULT_SUBTITLE, DEFAULT_TITLE, DOWNLOAD_FILENAME};
use glowup_pdf::{AppError, PlannerRequest};
use std::fs;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Data Structures
// ============================================================================

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate fillable 7-Day Glow-Up planner PDFs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the planner PDF
    Generate {
        #[command(flatten)]
        planner: PlannerArgs,

        /// Output filename
        #[arg(short, long, default_value = DOWNLOAD_FILENAME)]
        output: String,
    },
    /// Print the computed page layout as JSON
    Layout {
        #[command(flatten)]
        planner: PlannerArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print the browser configuration script
    Env {
        /// Project URL exposed to the browser
        #[arg(long, env = "SUPABASE_URL")]
        supabase_url: Option<String>,

        /// Public (anon) key exposed to the browser
        #[arg(long, env = "SUPABASE_ANON_KEY")]
        supabase_anon_key: Option<String>,
    },
}

/// Planner parameters. Unknown theme or size names fall back to the defaults.
#[derive(Args, Debug)]
struct PlannerArgs {
    /// Color theme: blush, neutral, sage or sky
    #[arg(long, default_value = "blush")]
    theme: String,

    /// Page size: letter or a4
    #[arg(short, long, default_value = "letter")]
    size: String,

    /// Title printed in the header
    #[arg(short, long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Subtitle printed under the title
    #[arg(long, default_value = DEFAULT_SUBTITLE)]
    subtitle: String,
}

impl PlannerArgs {
    fn to_request(&self) -> PlannerRequest {
        PlannerRequest::from_params(
            Some(&self.theme),
            Some(&self.size),
            Some(&self.title),
            Some(&self.subtitle),
        )
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate { planner, output } => {
            let request = planner.to_request();
            let pdf = glowup_pdf::generate_planner(&request)?;
            fs::write(&output, &pdf)?;

            println!("✓ Generated: {}", output);
            println!("  Theme: {}", request.theme.name());
            println!("  Size: {}", request.size.name());
            println!("  Title: {}", request.title);
        }
        Command::Layout { planner, pretty } => {
            let layout = glowup_pdf::plan(&planner.to_request());
            let json = if pretty {
                serde_json::to_string_pretty(&layout)?
            } else {
                serde_json::to_string(&layout)?
            };
            println!("{}", json);
        }
        Command::Env {
            supabase_url,
            supabase_anon_key,
        } => {
            println!(
                "{}",
                handler::env_script(supabase_url.as_deref(), supabase_anon_key.as_deref())
            );
        }
    }

    Ok(())
}
