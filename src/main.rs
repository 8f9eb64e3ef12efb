mod config;
mod dataset;
mod enrich;
mod error;
mod fetch;
mod parser;
mod pipeline;
mod record;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{Overrides, Settings};
use crate::fetch::HttpFetcher;
use crate::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "film_scraper", about = "Film metadata from Wikipedia's \"<year> in film\" pages")]
struct Cli {
    /// Settings file (default: ./film_scraper.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every year in range and write the dataset
    Run {
        /// First year (inclusive)
        #[arg(long)]
        start: Option<u16>,
        /// Last year (inclusive)
        #[arg(long)]
        end: Option<u16>,
        /// Output CSV path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Poster directory
        #[arg(long)]
        images: Option<PathBuf>,
        /// Years scraped at once
        #[arg(short, long)]
        jobs: Option<usize>,
    },
    /// Scrape a single year and print its rows (no dataset written)
    Year {
        year: u16,
        /// Poster directory
        #[arg(long)]
        images: Option<PathBuf>,
    },
    /// Summarise an existing dataset
    Stats {
        /// Dataset to read (default: configured output path)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            start,
            end,
            output,
            images,
            jobs,
        } => {
            let settings = settings
                .apply(Overrides {
                    start_year: start,
                    end_year: end,
                    output_path: output,
                    image_dir: images,
                    jobs,
                })
                .validate()?;
            let fetcher = HttpFetcher::new(&settings)?;
            let pipeline = Pipeline::new(&settings, &fetcher)?;

            let pb = year_progress();
            let records = pipeline.run(&pb)?;
            dataset::write(&settings.output_path, &records)
                .with_context(|| format!("writing {}", settings.output_path.display()))?;
            println!(
                "Saved {} rows to {}",
                records.len(),
                settings.output_path.display()
            );
        }
        Commands::Year { year, images } => {
            let settings = settings
                .apply(Overrides {
                    start_year: Some(year),
                    end_year: Some(year),
                    image_dir: images,
                    ..Default::default()
                })
                .validate()?;
            let fetcher = HttpFetcher::new(&settings)?;
            let pipeline = Pipeline::new(&settings, &fetcher)?;
            pipeline.prepare()?;

            let records = pipeline.scrape_year(year);
            if records.is_empty() {
                println!("No films found for {}.", year);
                return Ok(());
            }
            println!(
                "{:>3} | {:<32} | {:<16} | {:<18} | {:<16} | {:<16} | {}",
                "#", "Title", "Section", "Budget", "Box office", "Released", "Poster"
            );
            println!("{}", "-".repeat(120));
            for (i, r) in records.iter().enumerate() {
                println!(
                    "{:>3} | {:<32} | {:<16} | {:<18} | {:<16} | {:<16} | {}",
                    i + 1,
                    truncate(&r.title, 32),
                    r.section,
                    truncate(r.budget_raw.as_deref().unwrap_or("-"), 18),
                    truncate(r.box_office_raw.as_deref().unwrap_or("-"), 16),
                    truncate(r.release_date.as_deref().unwrap_or("-"), 16),
                    if r.image.is_some() { "yes" } else { "-" },
                );
            }
            println!("\n{} films", records.len());
        }
        Commands::Stats { input } => {
            let path = input.unwrap_or(settings.output_path);
            let records = dataset::read(&path)?;
            dataset::Summary::of(&records).print();
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }
    Ok(())
}

/// Hidden when stderr is not a terminal so log lines stay readable.
fn year_progress() -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40} {pos}/{len} years (eta {eta})")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
