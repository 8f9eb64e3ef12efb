use std::fs;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use rayon::prelude::*;
use scraper::Html;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::Settings;
use crate::enrich::{Enricher, Enrichment};
use crate::error::FetchError;
use crate::fetch::Fetch;
use crate::parser::extract::{extract_all, ListingRow};
use crate::record::FilmRecord;

/// Year loop: listing page → rows → film pages → records.
pub struct Pipeline<'a, F: Fetch + ?Sized> {
    settings: &'a Settings,
    fetcher: &'a F,
    base: Url,
}

impl<'a, F: Fetch + ?Sized> Pipeline<'a, F> {
    pub fn new(settings: &'a Settings, fetcher: &'a F) -> Result<Self> {
        let base = Url::parse(&settings.base_url)
            .with_context(|| format!("invalid base_url {:?}", settings.base_url))?;
        Ok(Self {
            settings,
            fetcher,
            base,
        })
    }

    /// Creates the image directory. Must run before any year is scraped.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.settings.image_dir).with_context(|| {
            format!("creating image dir {}", self.settings.image_dir.display())
        })
    }

    /// Every configured year, in order. Per year: highest-grossing rows,
    /// then notable releases.
    pub fn run(&self, pb: &ProgressBar) -> Result<Vec<FilmRecord>> {
        self.prepare()?;
        let years: Vec<u16> = self.settings.years().collect();
        pb.set_length(years.len() as u64);

        let per_year: Vec<Vec<FilmRecord>> = if self.settings.jobs <= 1 {
            years.iter().map(|&y| self.scrape_tracked(y, pb)).collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.settings.jobs)
                .build()
                .context("building worker pool")?;
            // Indexed collect keeps year order regardless of finish order.
            pool.install(|| {
                years
                    .par_iter()
                    .map(|&y| self.scrape_tracked(y, pb))
                    .collect()
            })
        };

        pb.finish_and_clear();
        Ok(per_year.into_iter().flatten().collect())
    }

    fn scrape_tracked(&self, year: u16, pb: &ProgressBar) -> Vec<FilmRecord> {
        let records = self.scrape_year(year);
        pb.inc(1);
        records
    }

    /// One year. A failed listing fetch gives an empty year, never an error.
    pub fn scrape_year(&self, year: u16) -> Vec<FilmRecord> {
        let rows = match self.listing_rows(year) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(year, error = %e, "Failed for {}", year);
                return Vec::new();
            }
        };
        debug!(year, rows = rows.len(), "listing rows");

        let enricher = Enricher::new(self.fetcher, &self.settings.image_dir);
        rows.into_iter()
            .map(|row| {
                let extra = match &row.link {
                    Some(link) => enricher.enrich(link, year, &row.title),
                    None => Enrichment::default(),
                };
                to_record(row, year, extra)
            })
            .collect()
    }

    /// Fetch and parse the listing page; the tree is gone before film pages
    /// are requested.
    fn listing_rows(&self, year: u16) -> Result<Vec<ListingRow>, FetchError> {
        let url = self.settings.year_url(year);
        info!("Scraping: {}", url);
        let html = self.fetcher.text(&url)?;
        let doc = Html::parse_document(&html);
        Ok(extract_all(&doc, &self.base))
    }
}

fn to_record(row: ListingRow, year: u16, extra: Enrichment) -> FilmRecord {
    FilmRecord {
        title: row.title,
        year,
        budget_raw: extra.budget_raw,
        box_office_raw: row.box_office_raw,
        release_date: row.release_date,
        section: row.section,
        image: extra.image.map(|p| p.display().to_string()),
    }
}

// ── Tests ──
