use super::{SnapshotError, SnapshotResult, validate_resources};
use crate::config::TimelineConfig;
use crate::grid::RenderModel;
use crate::model::{Break, Resource, Shift, WEEK_KEYS, WeeklySchedule, weekday_from_key};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct ResourceSnapshot {
    resources: Vec<Resource>,
}

pub fn load_resources_from_json<P: AsRef<Path>>(
    path: P,
    config: &TimelineConfig,
) -> SnapshotResult<Vec<Resource>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let snapshot: ResourceSnapshot = serde_json::from_reader(file)?;
    validate_resources(&snapshot.resources, config)?;
    info!(
        "loaded {} resources from {}",
        snapshot.resources.len(),
        path.display()
    );
    Ok(snapshot.resources)
}

pub fn save_resources_to_json<P: AsRef<Path>>(
    resources: &[Resource],
    path: P,
) -> SnapshotResult<()> {
    let snapshot = ResourceSnapshot {
        resources: resources.to_vec(),
    };
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn save_render_model_to_json<P: AsRef<Path>>(
    model: &RenderModel,
    path: P,
) -> SnapshotResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, model)?;
    info!(
        "exported {} view with {} rows to {}",
        model.view,
        model.rows.len(),
        path.display()
    );
    Ok(())
}

/// One CSV row per resource and weekday. A resource without shifts is a single row with an
/// empty `weekday`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ShiftCsvRecord {
    resource_id: String,
    resource_name: String,
    #[serde(default)]
    weekday: String,
    #[serde(default)]
    shift_id: String,
    #[serde(default)]
    shift_name: String,
    #[serde(default)]
    start_hour: String,
    #[serde(default)]
    end_hour: String,
    #[serde(default)]
    breaks: String,
}

impl ShiftCsvRecord {
    fn resource_only(resource: &Resource) -> Self {
        Self {
            resource_id: resource.id.clone(),
            resource_name: resource.name.clone(),
            ..Self::default()
        }
    }

    fn for_shift(resource: &Resource, weekday_key: &str, shift: &Shift) -> SnapshotResult<Self> {
        Ok(Self {
            resource_id: resource.id.clone(),
            resource_name: resource.name.clone(),
            weekday: weekday_key.to_string(),
            shift_id: shift.id.clone(),
            shift_name: shift.name.clone(),
            start_hour: shift.start_hour.clone(),
            end_hour: shift.end_hour.clone(),
            breaks: serde_json::to_string(&shift.breaks)?,
        })
    }

    fn has_shift(&self) -> bool {
        !self.weekday.trim().is_empty()
    }

    fn to_shift(&self) -> SnapshotResult<Shift> {
        let breaks = if self.breaks.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str::<Vec<Break>>(&self.breaks).map_err(|err| {
                SnapshotError::InvalidData(format!(
                    "invalid breaks for resource {}: {err}",
                    self.resource_id
                ))
            })?
        };
        Ok(Shift {
            id: self.shift_id.clone(),
            name: self.shift_name.clone(),
            start_hour: self.start_hour.clone(),
            end_hour: self.end_hour.clone(),
            breaks,
        })
    }
}

/// Writes one row per assigned weekday.
///
/// A resource whose schedule has no assigned day is written as a single resource-only row, so
/// `Some(WeeklySchedule::default())` reads back as `None`. Both render the same empty row.
pub fn save_resources_to_csv<P: AsRef<Path>>(resources: &[Resource], path: P) -> SnapshotResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for resource in resources {
        let mut wrote_shift = false;
        if let Some(schedule) = &resource.schedule {
            for (weekday, key) in WEEK_KEYS {
                if let Some(shift) = schedule.shift_for(weekday) {
                    writer.serialize(ShiftCsvRecord::for_shift(resource, key, shift)?)?;
                    wrote_shift = true;
                }
            }
        }
        if !wrote_shift {
            writer.serialize(ShiftCsvRecord::resource_only(resource))?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn load_resources_from_csv<P: AsRef<Path>>(
    path: P,
    config: &TimelineConfig,
) -> SnapshotResult<Vec<Resource>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut resources: Vec<Resource> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in reader.deserialize::<ShiftCsvRecord>() {
        let record = record?;
        let position = match positions.get(&record.resource_id) {
            Some(&position) => position,
            None => {
                positions.insert(record.resource_id.clone(), resources.len());
                resources.push(Resource::new(
                    record.resource_id.clone(),
                    record.resource_name.clone(),
                ));
                resources.len() - 1
            }
        };

        if !record.has_shift() {
            continue;
        }
        let weekday = weekday_from_key(&record.weekday).ok_or_else(|| {
            SnapshotError::InvalidData(format!(
                "unknown weekday '{}' for resource {}",
                record.weekday, record.resource_id
            ))
        })?;
        let shift = record.to_shift()?;
        let schedule = resources[position]
            .schedule
            .get_or_insert_with(WeeklySchedule::default);
        let slot = schedule.slot_mut(weekday);
        if slot.is_some() {
            return Err(SnapshotError::InvalidData(format!(
                "resource {} has more than one shift on {}",
                record.resource_id, weekday
            )));
        }
        *slot = Some(shift);
    }

    if resources.is_empty() {
        return Err(SnapshotError::InvalidData(
            "CSV file contained no resources".into(),
        ));
    }

    validate_resources(&resources, config)?;
    info!("loaded {} resources from {}", resources.len(), path.display());
    Ok(resources)
}
