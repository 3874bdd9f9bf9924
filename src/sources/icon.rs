//! Per-item icon fragment lookup.
//!
//! The store renders icons from pre-built HTML fragments served by a local
//! endpoint. This is a side lookup triggered per displayed item; it shares
//! the curl transport but never participates in catalog aggregation.

use crate::state::types::PackageItem;

use super::{Endpoints, FETCH_TIMEOUT, curl_text};

/// What: Fetch the pre-rendered icon fragment for one item.
///
/// Inputs:
/// - `ep`: Endpoint builder.
/// - `item`: Displayed item; a Flatpak group key switches the lookup kind.
///
/// Output:
/// - `Some(html)` with the fragment, or `None` on any failure (logged).
pub async fn fetch_icon_fragment(ep: &Endpoints, item: &PackageItem) -> Option<String> {
    let url = match item.group_key.as_deref() {
        Some(group) => ep.icon_lookup("flatpak", group),
        None => ep.icon_lookup("pacman", &item.package_id),
    };
    let max_time = FETCH_TIMEOUT.as_secs().to_string();
    let task = tokio::task::spawn_blocking(move || curl_text(&url, &max_time));
    match tokio::time::timeout(FETCH_TIMEOUT, task).await {
        Ok(Ok(Ok(html))) => Some(html),
        Ok(Ok(Err(e))) => {
            tracing::warn!(package = %item.package_id, error = %e, "icon lookup failed");
            None
        }
        Ok(Err(join)) => {
            tracing::warn!(package = %item.package_id, error = %join, "icon lookup task failed");
            None
        }
        Err(_) => {
            tracing::warn!(package = %item.package_id, "icon lookup timed out");
            None
        }
    }
}
