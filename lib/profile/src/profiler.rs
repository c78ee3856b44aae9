//! Dataset profile assembly
//!
//! Transposes a [`RawTable`] into columns, profiles every column
//! independently, picks the target and task, and upserts the result into a
//! [`ProfileStore`] keyed by source id.

use crate::config::ProfilerConfig;
use crate::infer::infer_type;
use crate::stats::column_profile;
use crate::table::RawTable;
use crate::task::{infer_task, select_target};
use insightx_core::{ColumnProfile, DatasetProfile, Error, ProfileStore, Result};
use rayon::prelude::*;

/// Builds [`DatasetProfile`]s from raw tables
#[derive(Debug, Clone, Default)]
pub struct DatasetProfiler {
    config: ProfilerConfig,
}

impl DatasetProfiler {
    pub fn new(config: ProfilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Compute the profile of `table` without persisting it.
    ///
    /// Fails with [`Error::EmptyTable`] when the table has no header or no
    /// data rows.
    pub fn profile(&self, source_id: &str, table: &RawTable) -> Result<DatasetProfile> {
        if table.header.is_empty() {
            return Err(Error::EmptyTable(format!("source '{}' has no header", source_id)));
        }
        if table.rows.is_empty() {
            return Err(Error::EmptyTable(format!("source '{}' has no data rows", source_id)));
        }

        let columns = table.columns();
        let profiles: Vec<ColumnProfile> = table
            .header
            .par_iter()
            .zip(columns.par_iter())
            .map(|(name, values)| {
                let dtype = infer_type(values, &self.config);
                column_profile(name, dtype, values)
            })
            .collect();

        let target_idx = select_target(&table.header, &self.config.target_hints);
        let inferred_task = infer_task(target_idx.map(|i| profiles[i].dtype));
        let target = target_idx.map(|i| table.header[i].clone());

        tracing::debug!(
            "Profiled '{}': {} rows, {} columns, target={:?}, task={}",
            source_id,
            table.row_count(),
            profiles.len(),
            target,
            inferred_task
        );

        Ok(DatasetProfile {
            source_id: source_id.to_string(),
            row_count: table.row_count(),
            column_count: profiles.len(),
            inferred_task,
            target,
            columns: profiles,
        })
    }

    /// Profile `table` and replace whatever profile `store` holds for `source_id`.
    ///
    /// Nothing is written when profiling fails.
    pub fn profile_and_store(
        &self,
        source_id: &str,
        table: &RawTable,
        store: &dyn ProfileStore,
    ) -> Result<DatasetProfile> {
        let profile = self.profile(source_id, table)?;
        let stored = store.upsert(source_id, profile)?;
        tracing::info!("Stored profile for '{}' ({} columns)", source_id, stored.column_count);
        Ok(stored)
    }
}
