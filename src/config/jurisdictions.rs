//! Jurisdiction table and job specification
//!
//! Maps postal abbreviations to the URL slugs Justia uses for each
//! jurisdiction, and builds the root URL for a (jurisdiction, dataset,
//! year) crawl job.

use crate::{LexError, Result};
use std::path::PathBuf;

/// Site base for state codes; leaf and branch hrefs resolve against this.
pub const JUSTIA_BASE_URL: &str = "https://law.justia.com";

/// Root listing prefix for state codes.
pub const CODES_BASE_URL: &str = "https://law.justia.com/codes/";

/// Site base and root listing prefix for state regulations.
pub const REGULATIONS_BASE_URL: &str = "https://regulations.justia.com";

/// Which of the two Justia hierarchies a job walks.
///
/// The traversal is identical for both; only the root URL, the output
/// directory, and a few leaf extraction selectors differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Codes,
    Regulations,
}

impl DatasetKind {
    /// Base URL that child hrefs are resolved against.
    pub fn site_base(&self) -> &'static str {
        match self {
            DatasetKind::Codes => JUSTIA_BASE_URL,
            DatasetKind::Regulations => REGULATIONS_BASE_URL,
        }
    }

    /// Short name used in job ids and output directories.
    pub fn dir_name(&self) -> &'static str {
        match self {
            DatasetKind::Codes => "codes",
            DatasetKind::Regulations => "regs",
        }
    }
}

/// One jurisdiction from the static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jurisdiction {
    /// Postal abbreviation, e.g. "TX".
    pub abbr: &'static str,
    /// URL slug, e.g. "texas".
    pub slug: &'static str,
}

/// Postal abbreviation to Justia URL slug, all 50 states plus DC.
const JURISDICTIONS: &[Jurisdiction] = &[
    Jurisdiction { abbr: "AL", slug: "alabama" },
    Jurisdiction { abbr: "AK", slug: "alaska" },
    Jurisdiction { abbr: "AZ", slug: "arizona" },
    Jurisdiction { abbr: "AR", slug: "arkansas" },
    Jurisdiction { abbr: "CA", slug: "california" },
    Jurisdiction { abbr: "CO", slug: "colorado" },
    Jurisdiction { abbr: "CT", slug: "connecticut" },
    Jurisdiction { abbr: "DE", slug: "delaware" },
    Jurisdiction { abbr: "DC", slug: "district-of-columbia" },
    Jurisdiction { abbr: "FL", slug: "florida" },
    Jurisdiction { abbr: "GA", slug: "georgia" },
    Jurisdiction { abbr: "HI", slug: "hawaii" },
    Jurisdiction { abbr: "ID", slug: "idaho" },
    Jurisdiction { abbr: "IL", slug: "illinois" },
    Jurisdiction { abbr: "IN", slug: "indiana" },
    Jurisdiction { abbr: "IA", slug: "iowa" },
    Jurisdiction { abbr: "KS", slug: "kansas" },
    Jurisdiction { abbr: "KY", slug: "kentucky" },
    Jurisdiction { abbr: "LA", slug: "louisiana" },
    Jurisdiction { abbr: "ME", slug: "maine" },
    Jurisdiction { abbr: "MD", slug: "maryland" },
    Jurisdiction { abbr: "MA", slug: "massachusetts" },
    Jurisdiction { abbr: "MI", slug: "michigan" },
    Jurisdiction { abbr: "MN", slug: "minnesota" },
    Jurisdiction { abbr: "MS", slug: "mississippi" },
    Jurisdiction { abbr: "MO", slug: "missouri" },
    Jurisdiction { abbr: "MT", slug: "montana" },
    Jurisdiction { abbr: "NE", slug: "nebraska" },
    Jurisdiction { abbr: "NV", slug: "nevada" },
    Jurisdiction { abbr: "NH", slug: "new-hampshire" },
    Jurisdiction { abbr: "NJ", slug: "new-jersey" },
    Jurisdiction { abbr: "NM", slug: "new-mexico" },
    Jurisdiction { abbr: "NY", slug: "new-york" },
    Jurisdiction { abbr: "NC", slug: "north-carolina" },
    Jurisdiction { abbr: "ND", slug: "north-dakota" },
    Jurisdiction { abbr: "OH", slug: "ohio" },
    Jurisdiction { abbr: "OK", slug: "oklahoma" },
    Jurisdiction { abbr: "OR", slug: "oregon" },
    Jurisdiction { abbr: "PA", slug: "pennsylvania" },
    Jurisdiction { abbr: "RI", slug: "rhode-island" },
    Jurisdiction { abbr: "SC", slug: "south-carolina" },
    Jurisdiction { abbr: "SD", slug: "south-dakota" },
    Jurisdiction { abbr: "TN", slug: "tennessee" },
    Jurisdiction { abbr: "TX", slug: "texas" },
    Jurisdiction { abbr: "UT", slug: "utah" },
    Jurisdiction { abbr: "VT", slug: "vermont" },
    Jurisdiction { abbr: "VA", slug: "virginia" },
    Jurisdiction { abbr: "WA", slug: "washington" },
    Jurisdiction { abbr: "WV", slug: "west-virginia" },
    Jurisdiction { abbr: "WI", slug: "wisconsin" },
    Jurisdiction { abbr: "WY", slug: "wyoming" },
];

/// Looks up a jurisdiction by postal abbreviation, case-insensitively.
pub fn lookup_jurisdiction(abbr: &str) -> Result<Jurisdiction> {
    let upper = abbr.to_ascii_uppercase();
    JURISDICTIONS
        .iter()
        .find(|j| j.abbr == upper)
        .copied()
        .ok_or(LexError::UnknownJurisdiction(abbr.to_string()))
}

/// One crawl unit: a (jurisdiction, dataset kind) pair plus the edition
/// year, tracked independently by progress and checkpointing.
#[derive(Debug, Clone)]
pub struct JobSpec {
    pub jurisdiction: Jurisdiction,
    pub dataset: DatasetKind,
    pub year: u16,
}

impl JobSpec {
    pub fn new(jurisdiction: Jurisdiction, dataset: DatasetKind, year: u16) -> Self {
        Self {
            jurisdiction,
            dataset,
            year,
        }
    }

    /// Stable identifier used to key progress events and log lines.
    pub fn job_id(&self) -> String {
        format!("{}/{}", self.jurisdiction.abbr, self.dataset.dir_name())
    }

    /// Root listing URL for this job's tree.
    ///
    /// Regulations are not published per-year, so the year only enters
    /// the codes URL.
    pub fn root_url(&self) -> String {
        match self.dataset {
            DatasetKind::Codes => format!(
                "{}{}/{}/",
                CODES_BASE_URL, self.jurisdiction.slug, self.year
            ),
            DatasetKind::Regulations => format!(
                "{}/states/{}/",
                REGULATIONS_BASE_URL, self.jurisdiction.slug
            ),
        }
    }

    /// Path of this job's record log.
    pub fn output_path(&self, output: &crate::config::OutputConfig) -> PathBuf {
        let dir = match self.dataset {
            DatasetKind::Codes => &output.codes_dir,
            DatasetKind::Regulations => &output.regs_dir,
        };
        PathBuf::from(dir).join(format!("{}.jsonl", self.jurisdiction.abbr))
    }
}
