use crate::errors::AppError;
use crate::models::{SaveSplitRequest, SavedSplit, SavedSplits};
use crate::volume::{VolumeChart, aggregate_volume, tally_muscle_groups};

pub fn save_split(
    splits: &mut SavedSplits,
    name: &str,
    request: SaveSplitRequest,
    now_ms: i64,
) -> Result<SavedSplit, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("split name is required"));
    }

    let split = SavedSplit {
        saved_at: now_ms,
        exercises: request.exercises,
        notes: request.notes,
        num_days: request.num_days,
    };
    splits.insert(name.to_string(), split.clone());
    Ok(split)
}

/// Names of saved splits containing `query`, case-insensitively.
pub fn search_splits<'a>(splits: &'a SavedSplits, query: &str) -> Vec<&'a str> {
    let query = query.to_lowercase();
    splits
        .keys()
        .filter(|name| name.to_lowercase().contains(&query))
        .map(String::as_str)
        .collect()
}

pub fn split_volume(split: &SavedSplit) -> VolumeChart {
    aggregate_volume(&tally_muscle_groups(&split.exercises))
}
