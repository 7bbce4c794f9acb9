//! Jicho CLI
//!
//! Civic risk monitoring: score news and bulletin feeds against the
//! crisis, misinformation and corruption indicator catalogs.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use jicho_core::{lookup, CatalogId, Document, ProfileTable, COUNTY_BASELINES};
use jicho_enrich::{
    create_anthropic_backend, create_backend, NarrativeConfig, NarrativeEnricher, ProviderConfig,
};
use jicho_runtime::{AssessmentPipeline, AssessmentReport, PipelineConfig};
use jicho_sources::{BulletinSource, FetchConfig, FixedSource, HeadlineSource, SharedSource};

#[derive(Parser)]
#[command(name = "jicho")]
#[command(author, version, about = "Jicho: civic risk monitoring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (0-3)
    #[arg(short, long, default_value = "1")]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a risk assessment
    Assess {
        /// Indicator catalog: crisis, misinformation, corruption
        #[arg(short, long, default_value = "crisis")]
        catalog: String,

        /// Search query passed to the feeds
        #[arg(short, long)]
        query: String,

        /// Score a local JSON file of documents instead of live feeds
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Extra JSON bulletin feed URLs (name=url)
        #[arg(long)]
        bulletin: Vec<String>,

        /// Region profile override file (TOML)
        #[arg(long)]
        profiles: Option<PathBuf>,

        /// Model for narrative enrichment
        #[arg(short, long, default_value = "claude-sonnet-4-20250514")]
        model: String,

        /// Anthropic API key (or set ANTHROPIC_API_KEY env var)
        #[arg(long, env = "ANTHROPIC_API_KEY")]
        anthropic_key: Option<String>,

        /// OpenAI API key (or set OPENAI_API_KEY env var)
        #[arg(long, env = "OPENAI_API_KEY")]
        api_key: Option<String>,

        /// Use OpenAI instead of Anthropic for the narrative
        #[arg(long)]
        openai: bool,

        /// Skip narrative enrichment (template summary only)
        #[arg(long)]
        no_narrative: bool,

        /// Narrative timeout in seconds
        #[arg(long, default_value = "8")]
        narrative_timeout: u64,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the built-in indicator catalogs
    Catalogs,

    /// List the built-in region baseline profiles
    Regions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Commands::Assess {
            catalog,
            query,
            input,
            bulletin,
            profiles,
            model,
            anthropic_key,
            api_key,
            openai,
            no_narrative,
            narrative_timeout,
            json,
            output,
        } => {
            run_assess(AssessArgs {
                catalog,
                query,
                input,
                bulletin,
                profiles,
                model,
                anthropic_key,
                api_key,
                openai,
                no_narrative,
                narrative_timeout,
                json,
                output,
            })
            .await?;
        }
        Commands::Catalogs => {
            list_catalogs();
        }
        Commands::Regions => {
            list_regions();
        }
    }

    Ok(())
}

struct AssessArgs {
    catalog: String,
    query: String,
    input: Option<PathBuf>,
    bulletin: Vec<String>,
    profiles: Option<PathBuf>,
    model: String,
    anthropic_key: Option<String>,
    api_key: Option<String>,
    openai: bool,
    no_narrative: bool,
    narrative_timeout: u64,
    json: bool,
    output: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct InputFile {
    documents: Vec<InputDocument>,
}

#[derive(Debug, Deserialize)]
struct InputDocument {
    source: String,
    content: String,
}

async fn run_assess(args: AssessArgs) -> Result<()> {
    let profiles = match &args.profiles {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading profile file {}", path.display()))?;
            ProfileTable::from_toml_str(&text)?
        }
        None => ProfileTable::builtin(),
    };

    let fetch_config = FetchConfig::default();
    let sources = build_sources(&args, &fetch_config)?;

    let enricher = build_enricher(&args)?;

    let pipeline = AssessmentPipeline::new(
        sources,
        profiles,
        enricher,
        PipelineConfig {
            catalog: args.catalog.clone(),
            max_concurrent_fetches: fetch_config.max_concurrent,
        },
    );

    let report = pipeline.run(&args.query).await?;

    let rendered = if args.json {
        serde_json::to_string_pretty(&report)?
    } else {
        render_text(&report)
    };

    match args.output {
        Some(path) => {
            fs::write(&path, &rendered)?;
            println!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn build_sources(args: &AssessArgs, fetch_config: &FetchConfig) -> Result<Vec<SharedSource>> {
    if let Some(path) = &args.input {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading input file {}", path.display()))?;
        let file: InputFile = serde_json::from_str(&text).context("parsing input documents")?;
        let documents = file
            .documents
            .into_iter()
            .map(|d| Document::new(&d.source, &d.content))
            .collect();
        return Ok(vec![Arc::new(FixedSource::new("local-file", documents))]);
    }

    let mut sources: Vec<SharedSource> = HeadlineSource::all_active(fetch_config)
        .into_iter()
        .map(|s| Arc::new(s) as SharedSource)
        .collect();

    for entry in &args.bulletin {
        let (name, url) = entry
            .split_once('=')
            .with_context(|| format!("bulletin feed '{}' is not name=url", entry))?;
        sources.push(Arc::new(BulletinSource::new(
            name,
            url,
            fetch_config.clone(),
        )));
    }

    Ok(sources)
}

fn build_enricher(args: &AssessArgs) -> Result<NarrativeEnricher> {
    if args.no_narrative {
        return Ok(NarrativeEnricher::offline());
    }

    let config = NarrativeConfig {
        timeout: std::time::Duration::from_secs(args.narrative_timeout),
    };

    let backend = if args.openai {
        match &args.api_key {
            Some(key) => Some(create_backend(ProviderConfig::openai(key, &args.model))?),
            None => None,
        }
    } else {
        match &args.anthropic_key {
            Some(key) => Some(create_anthropic_backend(ProviderConfig::anthropic(
                key,
                &args.model,
            ))?),
            None => None,
        }
    };

    if backend.is_none() {
        tracing::warn!("no provider key configured, narratives will use the template");
    }

    Ok(NarrativeEnricher::new(backend, config))
}

fn render_text(report: &AssessmentReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "National risk level: {}\n",
        report.national_level
    ));
    out.push_str(&format!(
        "Documents scored: {} | Generated: {}\n\n",
        report.source_count,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    out.push_str(&format!("{}\n\n", report.narrative));

    if report.alerts.is_empty() {
        out.push_str("No active alerts.\n\n");
    } else {
        out.push_str("Alerts:\n");
        for alert in &report.alerts {
            out.push_str(&format!(
                "  [{}] {} ({:.2})",
                alert.level, alert.entity, alert.score
            ));
            if !alert.indicators.is_empty() {
                out.push_str(&format!(" - {}", alert.indicators.join(", ")));
            }
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str("Recommendations:\n");
    for rec in &report.recommendations {
        out.push_str(&format!("  - {}\n", rec));
    }

    out
}

fn list_catalogs() {
    for &id in CatalogId::all() {
        println!("{}", id);
        for def in lookup(id) {
            println!(
                "  {:<26} weight {:.2}  share {:.2}  {} phrases",
                def.name,
                def.weight,
                def.share,
                def.phrases.len()
            );
        }
        println!();
    }
}

fn list_regions() {
    println!("{:<14} baseline multiplier", "region");
    for (name, m) in COUNTY_BASELINES {
        println!("{:<14} {:.2}", name, m);
    }
}
