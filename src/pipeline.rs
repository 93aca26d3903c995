use crate::config::ScrubConfig;
use crate::constants::{ASSIGNED, DATE_OF_BIRTH, ID, NAME_COLUMNS, REQUIRED_COLUMNS};
use crate::error::Result;
use crate::normalize::{normalize_name, AssignmentMap, DateNormalizer};
use crate::record::RecordSet;
use crate::verify::{verify, VerificationReport};
use tracing::{info, instrument};

/// Everything a completed run produces: the cleaned record set and the
/// verification report over it.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub records: RecordSet,
    pub report: VerificationReport,
}

/// Runs the cleaning stages in their fixed order:
/// deduplicate → namespace columns → normalize names → canonicalize dates
/// → assign sequential IDs → expand assignment codes → verify.
///
/// The order is load-bearing. Renaming must come before any stage that
/// looks fields up by their namespaced names, and ID assignment must come
/// after deduplication so IDs are dense over the surviving rows. The first
/// stage error aborts the run; no partial output is ever produced.
#[derive(Debug)]
pub struct Pipeline {
    config: ScrubConfig,
    dates: DateNormalizer,
    assignment: AssignmentMap,
}

impl Pipeline {
    pub fn new(config: ScrubConfig) -> Result<Self> {
        let dates = DateNormalizer::new(&config.dates)?;
        let assignment = AssignmentMap::from_config(&config.assignment);
        Ok(Self {
            config,
            dates,
            assignment,
        })
    }

    #[instrument(skip(self, records))]
    pub fn run(&self, mut records: RecordSet) -> Result<PipelineOutcome> {
        for column in REQUIRED_COLUMNS {
            records.require_column(column)?;
        }

        let before = records.len();
        match &self.config.dedupe.key_fields {
            Some(keys) if !keys.is_empty() => records.deduplicate_by(keys)?,
            _ => records.deduplicate(),
        }
        info!(before, after = records.len(), "deduplicated records");

        let prefix = self.config.fields.namespace_prefix.clone();
        records.rename_columns(|name| format!("{prefix}{name}"))?;
        info!(%prefix, "namespaced column names");

        for column in NAME_COLUMNS {
            let prefixed = self.config.fields.prefixed(column);
            records.map_column(&prefixed, normalize_name)?;
        }
        info!("normalized name casing");

        let dob_column = self.config.fields.prefixed(DATE_OF_BIRTH);
        records.map_column(&dob_column, |value| self.dates.normalize(value))?;
        info!("canonicalized dates of birth");

        let id_column = self.config.fields.prefixed(ID);
        records.assign_sequential(&id_column);
        info!(rows = records.len(), "assigned sequential record IDs");

        let assigned_column = self.config.fields.prefixed(ASSIGNED);
        records.map_column(&assigned_column, |value| Ok(self.assignment.normalize(value)))?;
        info!("expanded assignment codes");

        let report = verify(&records, &id_column);
        Ok(PipelineOutcome { records, report })
    }
}
