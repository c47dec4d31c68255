use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use serde::{Deserialize, Serialize};

use crate::calendar::{Event, EventCategory};
use crate::theme::Theme;

/// The persisted application state, in fixed order: events, then
/// categories, then the current theme. Plain JSON so the file stays
/// inspectable and hand-editable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub events: Vec<Event>,
    pub categories: Vec<EventCategory>,
    pub theme: Theme,
}

pub fn data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("docket").join("docket.json"))
}

pub fn save(path: &Path, data: &SaveData) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load(path: &Path) -> Result<SaveData> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
