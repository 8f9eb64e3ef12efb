use std::path::{Path, PathBuf};
use std::time::Duration;

use ::config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "film_scraper.toml";
const ENV_PREFIX: &str = "FILMS";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0 Safari/537.36";

/// Everything the pipeline needs to know, built once at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prefix for year pages and for resolving film links.
    pub base_url: String,
    /// Appended after the year: `<base_url><year><page_suffix>`.
    pub page_suffix: String,
    pub start_year: u16,
    pub end_year: u16,
    pub output_path: PathBuf,
    pub image_dir: PathBuf,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Years scraped at once. 1 keeps the crawl strictly sequential.
    pub jobs: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org/wiki/".into(),
            page_suffix: "_in_film".into(),
            start_year: 1900,
            end_year: 2024,
            output_path: PathBuf::from("movies_dataset.csv"),
            image_dir: PathBuf::from("images"),
            timeout_secs: 10,
            user_agent: USER_AGENT.into(),
            jobs: 1,
        }
    }
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub start_year: Option<u16>,
    pub end_year: Option<u16>,
    pub output_path: Option<PathBuf>,
    pub image_dir: Option<PathBuf>,
    pub jobs: Option<usize>,
}

impl Settings {
    /// Defaults, then the optional TOML file, then `FILMS_*` variables.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let path = file.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let settings: Settings = Config::builder()
            .add_source(File::from(path).required(file.is_some()))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn apply(mut self, o: Overrides) -> Self {
        if let Some(y) = o.start_year {
            self.start_year = y;
        }
        if let Some(y) = o.end_year {
            self.end_year = y;
        }
        if let Some(p) = o.output_path {
            self.output_path = p;
        }
        if let Some(d) = o.image_dir {
            self.image_dir = d;
        }
        if let Some(j) = o.jobs {
            self.jobs = j;
        }
        self
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.start_year > self.end_year {
            return Err(ConfigError::YearRange {
                start: self.start_year,
                end: self.end_year,
            });
        }
        if self.jobs == 0 {
            return Err(ConfigError::NoJobs);
        }
        if url::Url::parse(&self.base_url).is_err() {
            return Err(ConfigError::BaseUrl(self.base_url));
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn years(&self) -> std::ops::RangeInclusive<u16> {
        self.start_year..=self.end_year
    }

    /// `https://en.wikipedia.org/wiki/1999_in_film` with the defaults.
    pub fn year_url(&self, year: u16) -> String {
        format!("{}{}{}", self.base_url, year, self.page_suffix)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_full_range() {
        let s = Settings::default();
        assert_eq!(s.years().count(), 125);
        assert_eq!(s.years().next(), Some(1900));
        assert_eq!(s.years().last(), Some(2024));
    }

    #[test]
    fn year_url_joins_base_and_suffix() {
        let s = Settings::default();
        assert_eq!(s.year_url(1999), "https://en.wikipedia.org/wiki/1999_in_film");
    }

    #[test]
    fn overrides_win() {
        let s = Settings::default().apply(Overrides {
            start_year: Some(2000),
            end_year: Some(2001),
            jobs: Some(4),
            ..Default::default()
        });
        assert_eq!(s.years().collect::<Vec<_>>(), vec![2000, 2001]);
        assert_eq!(s.jobs, 4);
        assert_eq!(s.output_path, PathBuf::from("movies_dataset.csv"));
    }

    #[test]
    fn rejects_inverted_range() {
        let s = Settings::default().apply(Overrides {
            start_year: Some(2010),
            end_year: Some(2000),
            ..Default::default()
        });
        assert!(matches!(s.validate(), Err(ConfigError::YearRange { .. })));
    }

    #[test]
    fn rejects_zero_jobs() {
        let s = Settings {
            jobs: 0,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(ConfigError::NoJobs)));
    }

    #[test]
    fn loads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "start_year = 1950\nend_year = 1955\nimage_dir = \"posters\"\n").unwrap();
        let s = Settings::load(Some(path.as_path())).unwrap();
        assert_eq!(s.start_year, 1950);
        assert_eq!(s.end_year, 1955);
        assert_eq!(s.image_dir, PathBuf::from("posters"));
        assert_eq!(s.timeout_secs, 10);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(Settings::load(Some(path.as_path())).is_err());
    }
}
