//! Loading resource snapshots from disk and exporting render models.
//!
//! The timeline core only consumes in-memory snapshots; this module is the boundary where
//! files are read, validated and turned into [`Resource`] lists.

pub mod file;

use std::collections::HashSet;
use std::io;
use thiserror::Error;

use crate::clock::ClockTimeError;
use crate::config::TimelineConfig;
use crate::model::Resource;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("resource {resource_id}: {source}")]
    Time {
        resource_id: String,
        #[source]
        source: ClockTimeError,
    },
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Checks identity rules and, when the config asks for it, every time string.
pub fn validate_resources(resources: &[Resource], config: &TimelineConfig) -> SnapshotResult<()> {
    let mut seen_ids = HashSet::with_capacity(resources.len());
    for resource in resources {
        if resource.id.trim().is_empty() {
            return Err(SnapshotError::InvalidData(format!(
                "resource '{}' has an empty id",
                resource.name
            )));
        }
        if !seen_ids.insert(resource.id.as_str()) {
            return Err(SnapshotError::InvalidData(format!(
                "duplicate resource id {}",
                resource.id
            )));
        }

        if !config.strict_times {
            continue;
        }
        if let Some(schedule) = &resource.schedule {
            for (_, shift) in schedule.assigned_days() {
                shift.validate_times().map_err(|source| SnapshotError::Time {
                    resource_id: resource.id.clone(),
                    source,
                })?;
            }
        }
    }
    Ok(())
}

pub use file::{
    load_resources_from_csv, load_resources_from_json, save_render_model_to_json,
    save_resources_to_csv, save_resources_to_json,
};
