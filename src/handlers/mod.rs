pub mod diet;
pub mod supplements;
pub mod training;

use crate::errors::AppError;
use crate::storage::{KeyValueStore, persist_slice};
use axum::http::header;
use serde::Serialize;
use tokio::sync::Mutex;

/// Applies `change` to a copy of the slice, persists the copy and only then
/// swaps it in. A failed write leaves the slice as it was.
pub(crate) async fn mutate<T, R>(
    store: &dyn KeyValueStore,
    key: &str,
    slot: &Mutex<T>,
    change: impl FnOnce(&mut T) -> Result<R, AppError>,
) -> Result<R, AppError>
where
    T: Serialize + Clone,
{
    let mut data = slot.lock().await;
    let mut next = data.clone();
    let result = change(&mut next)?;
    persist_slice(store, key, &next).await?;
    *data = next;
    Ok(result)
}

fn header_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect()
}

pub(crate) fn attachment(
    filename: &str,
    body: String,
) -> ([(header::HeaderName, String); 2], String) {
    (
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", header_filename(filename)),
            ),
        ],
        body,
    )
}

pub async fn health() -> &'static str {
    "ok"
}
