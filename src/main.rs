use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use photo_harvest::catalog::PageSet;
use photo_harvest::config::CONFIG;
use photo_harvest::credentials::credential;
use photo_harvest::data_models::MAX_PER_PAGE;
use photo_harvest::downloader::Downloader;
use photo_harvest::error::HarvestError;
use photo_harvest::pipeline::{Pipeline, RunReport};
use photo_harvest::search::SearchClient;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Page {
    Homepage,
    SshoServices,
    SafetyRepresentatives,
    Services,
    All,
}

impl Page {
    fn sets(self) -> Vec<PageSet> {
        match self {
            Page::Homepage => vec![PageSet::Homepage],
            Page::SshoServices => vec![PageSet::SshoServices],
            Page::SafetyRepresentatives => vec![PageSet::SafetyRepresentatives],
            Page::Services => vec![PageSet::Services],
            Page::All => PageSet::ALL.to_vec(),
        }
    }
}

/// Download stock photos from Pexels for the site's pages.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Page whose images should be fetched
    #[arg(value_enum, default_value_t = Page::All)]
    page: Page,

    /// Directory the images and their metadata are written to
    #[arg(long)]
    images_dir: Option<PathBuf>,

    /// Results requested per search
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_PER_PAGE as i64))]
    per_page: Option<u32>,

    /// Exit non-zero if any role fails, not only when all of them do
    #[arg(long)]
    strict: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(true)
        .init();

    let Some(api_key) = credential() else {
        let err = HarvestError::MissingCredential;
        eprintln!("error: {err}");
        if let Some(hint) = err.hint() {
            eprintln!("hint: {hint}");
        }
        return Ok(ExitCode::FAILURE);
    };

    let config = &*CONFIG;
    let images_dir = cli.images_dir.unwrap_or_else(|| config.images_dir.clone());
    let per_page = cli.per_page.unwrap_or(config.per_page);

    let search = SearchClient::new(Some(api_key.clone()), config)?;
    let downloader = Downloader::new(config)?;
    let pipeline = Pipeline::new(search, downloader, images_dir, per_page);

    let mut reports = Vec::new();
    for set in cli.page.sets() {
        let report = pipeline.run(&set.role_set()).await?;
        print_report(&report);
        reports.push(report);
    }

    let total: usize = reports.iter().map(|r| r.outcomes.len()).sum();
    let succeeded: usize = reports.iter().map(RunReport::succeeded).sum();
    println!(
        "{succeeded}/{total} images saved to {}",
        pipeline.images_dir().display()
    );

    let failed = total - succeeded;
    if (total > 0 && succeeded == 0) || (cli.strict && failed > 0) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &RunReport) {
    println!("{}:", report.page);
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(success) => {
                let note = match (&success.metadata_path, success.meets_requirements) {
                    (None, _) => " (metadata not written)",
                    (Some(_), false) => " (below size requirements)",
                    (Some(_), true) => "",
                };
                println!("  ok     {} -> {}{note}", outcome.role, success.path.display());
            }
            Err(e) => {
                println!("  failed {}: {:#}", outcome.role, e);
                if let Some(hint) = e.hint() {
                    println!("         hint: {hint}");
                }
            }
        }
    }
    if report.all_failed() {
        println!("  every role failed for {}", report.page);
    } else if report.failed() > 0 {
        println!("  partially successful: {} of {} failed", report.failed(), report.outcomes.len());
    }
}
