use std::fs;
use std::path::{Path, PathBuf};

use scraper::Html;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::error::FetchError;
use crate::fetch::Fetch;
use crate::parser::extract::infobox;
use crate::parser::{image_file_name, resolve_image};

/// Budget and poster gathered from one film page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub budget_raw: Option<String>,
    pub image: Option<PathBuf>,
}

/// Why a film page gave nothing (or only part of what was wanted).
#[derive(Debug, Error)]
enum Miss {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("no info panel")]
    NoPanel,
    #[error("no image in info panel")]
    NoImage,
    #[error("cannot resolve image address {0:?}")]
    BadImageUrl(String),
    #[error("writing poster failed: {0}")]
    Write(#[from] std::io::Error),
}

pub struct Enricher<'a, F: Fetch + ?Sized> {
    fetcher: &'a F,
    image_dir: &'a Path,
}

impl<'a, F: Fetch + ?Sized> Enricher<'a, F> {
    pub fn new(fetcher: &'a F, image_dir: &'a Path) -> Self {
        Self { fetcher, image_dir }
    }

    /// Never fails: every problem just leaves the matching field empty.
    pub fn enrich(&self, url: &str, year: u16, title: &str) -> Enrichment {
        let html = match self.fetcher.text(url) {
            Ok(html) => html,
            Err(e) => {
                debug!(%url, reason = %Miss::from(e), "film page skipped");
                return Enrichment::default();
            }
        };

        // Parsed tree is dropped before any further I/O.
        let Some(panel) = infobox::parse(&Html::parse_document(&html)) else {
            debug!(%url, reason = %Miss::NoPanel, "film page skipped");
            return Enrichment::default();
        };

        let image = match self.save_poster(url, panel.image_src.as_deref(), year, title) {
            Ok(path) => Some(path),
            Err(miss) => {
                debug!(%url, reason = %miss, "no poster");
                None
            }
        };

        Enrichment {
            budget_raw: panel.budget_raw,
            image,
        }
    }

    fn save_poster(
        &self,
        page_url: &str,
        src: Option<&str>,
        year: u16,
        title: &str,
    ) -> Result<PathBuf, Miss> {
        let src = src.ok_or(Miss::NoImage)?;
        let page = Url::parse(page_url).map_err(|_| Miss::BadImageUrl(page_url.to_string()))?;
        let img_url = resolve_image(&page, src).ok_or_else(|| Miss::BadImageUrl(src.to_string()))?;

        let bytes = self.fetcher.bytes(&img_url)?;
        let path = self.image_dir.join(image_file_name(year, title));
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

// ── Tests ──
