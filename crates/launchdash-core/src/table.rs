//! The in-memory launch table.
//!
//! [`LaunchTable`] is loaded once at startup and never mutated afterwards, so
//! handlers share it behind an `Arc` without locking.

use std::io::Read;
use std::path::Path;

use crate::filter::{PayloadRange, SiteSelection};
use crate::record::{CsvLaunchRow, LaunchRecord};
use crate::{Error, Result};

/// Launch records in file order.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    sites: Vec<String>,
    payload_min: f64,
    payload_max: f64,
}

impl LaunchTable {
    /// Load a table from a CSV file with a header row.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io_with_path(e, path))?;
        let table = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            records = table.len(),
            sites = table.sites.len(),
            "Loaded launch table"
        );
        Ok(table)
    }

    /// Load a table from any CSV source with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut records = Vec::new();
        for (index, row) in csv.deserialize::<CsvLaunchRow>().enumerate() {
            let record = LaunchRecord::try_from(row?).map_err(|e| Error::Csv {
                row: index as u64 + 1,
                message: e.to_string(),
            })?;
            records.push(record);
        }

        Self::from_records(records)
    }

    /// Build a table from already decoded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self> {
        let first = records.first().ok_or(Error::EmptyDataset)?;
        let (mut payload_min, mut payload_max) = (first.payload_mass_kg, first.payload_mass_kg);
        let mut sites: Vec<String> = Vec::new();

        for record in &records {
            payload_min = payload_min.min(record.payload_mass_kg);
            payload_max = payload_max.max(record.payload_mass_kg);
            if !sites.contains(&record.launch_site) {
                sites.push(record.launch_site.clone());
            }
        }

        Ok(Self {
            records,
            sites,
            payload_min,
            payload_max,
        })
    }

    /// All records in file order.
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`: an empty table cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Smallest payload mass in the table.
    pub fn payload_min(&self) -> f64 {
        self.payload_min
    }

    /// Largest payload mass in the table.
    pub fn payload_max(&self) -> f64 {
        self.payload_max
    }

    /// Launch sites in order of first appearance.
    pub fn unique_sites(&self) -> &[String] {
        &self.sites
    }

    /// Returns `true` if any record was launched from `site`.
    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    /// Fails with [`Error::UnknownSite`] if a named site has no records.
    pub fn check_selection(&self, selection: &SiteSelection) -> Result<()> {
        match selection {
            SiteSelection::Site(name) if !self.has_site(name) => {
                Err(Error::UnknownSite(name.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Successful launches.
    pub fn successes(&self) -> Vec<&LaunchRecord> {
        self.records
            .iter()
            .filter(|r| r.outcome.is_success())
            .collect()
    }

    /// Launches from the selected sites.
    pub fn for_site(&self, selection: &SiteSelection) -> Vec<&LaunchRecord> {
        self.records.iter().filter(|r| selection.matches(r)).collect()
    }

    /// Launches from the selected sites whose payload lies in `range`.
    pub fn matching(&self, selection: &SiteSelection, range: &PayloadRange) -> Vec<&LaunchRecord> {
        self.records
            .iter()
            .filter(|r| selection.matches(r) && range.contains(r.payload_mass_kg))
            .collect()
    }
}
