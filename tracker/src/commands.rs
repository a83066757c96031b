//! Data-file commands behind the CLI

use crate::db::{Database, Measurement};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::path::Path;
use tracing::info;

pub fn init(data_file: &Path) -> Result<Database> {
    if data_file.exists() {
        bail!("data file {} already exists", data_file.display());
    }
    let db = Database::create(data_file)
        .with_context(|| format!("failed to create {}", data_file.display()))?;
    info!("Initialized {:?}", data_file);
    Ok(db)
}

/// Opens a data file created earlier by `init`. Never creates one.
pub fn open_existing(data_file: &Path) -> Result<Database> {
    if !data_file.exists() {
        bail!("data file {} not found, run `weight-watcher init` first", data_file.display());
    }
    Database::open(data_file).with_context(|| format!("failed to open {}", data_file.display()))
}

pub fn add(data_file: &Path, day: NaiveDate, weight: f64) -> Result<i64> {
    let db = open_existing(data_file)?;
    let id = db.insert(day, weight)?;
    info!("Added measurement {}", id);
    Ok(id)
}

pub fn edit(data_file: &Path, id: i64, day: Option<NaiveDate>, weight: Option<f64>) -> Result<()> {
    if day.is_none() && weight.is_none() {
        bail!("nothing to change, give --date and/or --weight");
    }
    let db = open_existing(data_file)?;
    if !db.update(id, day, weight)? {
        bail!("no measurement with id {}", id);
    }
    info!("Updated measurement {}", id);
    Ok(())
}

pub fn remove(data_file: &Path, id: i64) -> Result<()> {
    let db = open_existing(data_file)?;
    if !db.remove(id)? {
        bail!("no measurement with id {}", id);
    }
    info!("Removed measurement {}", id);
    Ok(())
}

pub fn list(data_file: &Path) -> Result<Vec<Measurement>> {
    Ok(open_existing(data_file)?.list_ordered()?)
}
