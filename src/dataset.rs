use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::record::{FilmRecord, Section, COLUMNS};

/// Write all records with a header row. The file appears in one step: rows go
/// to a sibling `.tmp` file which is then renamed over `path`.
pub fn write(path: &Path, records: &[FilmRecord]) -> Result<()> {
    let tmp = tmp_path(path);
    {
        let mut w = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)
            .with_context(|| format!("creating {}", tmp.display()))?;
        w.write_record(COLUMNS)?;
        for r in records {
            w.serialize(r)?;
        }
        w.flush()?;
    }
    fs::rename(&tmp, path)
        .with_context(|| format!("moving {} to {}", tmp.display(), path.display()))?;
    Ok(())
}

pub fn read(path: &Path) -> Result<Vec<FilmRecord>> {
    let mut rdr =
        csv::Reader::from_path(path).with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (i, row) in rdr.deserialize().enumerate() {
        let rec: FilmRecord = row.with_context(|| format!("row {} of {}", i + 1, path.display()))?;
        out.push(rec);
    }
    Ok(out)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Totals shown by `stats`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub rows: usize,
    pub highest_grossing: usize,
    pub notable: usize,
    pub with_budget: usize,
    pub with_image: usize,
    pub years: usize,
    pub first_year: Option<u16>,
    pub last_year: Option<u16>,
}

impl Summary {
    pub fn of(records: &[FilmRecord]) -> Self {
        let years: BTreeSet<u16> = records.iter().map(|r| r.year).collect();
        Self {
            rows: records.len(),
            highest_grossing: records
                .iter()
                .filter(|r| r.section == Section::HighestGrossing)
                .count(),
            notable: records
                .iter()
                .filter(|r| r.section == Section::NotableRelease)
                .count(),
            with_budget: records.iter().filter(|r| r.budget_raw.is_some()).count(),
            with_image: records.iter().filter(|r| r.image.is_some()).count(),
            years: years.len(),
            first_year: years.first().copied(),
            last_year: years.last().copied(),
        }
    }

    pub fn print(&self) {
        println!("Rows:             {}", self.rows);
        println!("Highest-grossing: {}", self.highest_grossing);
        println!("Notable release:  {}", self.notable);
        println!("With budget:      {}", self.with_budget);
        println!("With image:       {}", self.with_image);
        match (self.first_year, self.last_year) {
            (Some(a), Some(b)) => println!("Years:            {} ({}–{})", self.years, a, b),
            _ => println!("Years:            0"),
        }
    }
}

// ── Tests ──
