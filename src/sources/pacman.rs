//! Native pacman listing adapter.

use serde_json::Value;

use crate::state::types::{PackageItem, Source};
use crate::util::flag;

use super::{Endpoints, fetch_value, record_to_item};

/// What: Fetch the pre-translated pacman dump and normalize it into items.
///
/// Inputs:
/// - `ep`: Endpoint builder for the local listing scripts.
///
/// Output:
/// - Items tagged `Source::Pacman`; empty on any fetch failure.
///
/// Details:
/// - The dump already reflects installed state through its `i` field, so no
///   reconciliation fetch is needed for this source.
pub async fn fetch_pacman(ep: &Endpoints) -> Vec<PackageItem> {
    let v = fetch_value(&ep.pacman_dump()).await;
    parse_dump(&v)
}

/// Parse the dump payload, passing the `i` installed flag through.
pub(crate) fn parse_dump(v: &Value) -> Vec<PackageItem> {
    let Some(arr) = v.as_array() else {
        if !v.is_null() {
            tracing::warn!(source = Source::Pacman.label(), "dump payload is not an array");
        }
        return Vec::new();
    };
    arr.iter()
        .filter_map(|rec| {
            let mut item = record_to_item(rec, Source::Pacman)?;
            item.installed = flag(rec, "i");
            Some(item)
        })
        .collect()
}
