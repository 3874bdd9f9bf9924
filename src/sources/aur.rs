//! AUR listing adapter.

use std::collections::HashMap;

use serde_json::Value;

use crate::state::types::{PackageItem, Source};
use crate::util::s;

use super::{Endpoints, fetch_value, parse_listing};

/// What: Fetch the cached AUR listing and the installed map concurrently and
/// reconcile them.
///
/// Inputs:
/// - `ep`: Endpoint builder for the local listing scripts.
///
/// Output:
/// - Items tagged `Source::Aur`, with `installed` and `installed_version`
///   set for every cache entry present in the installed map.
///
/// Details:
/// - Either fetch failing degrades independently: a missing installed map
///   leaves everything uninstalled, a missing cache yields no items.
pub async fn fetch_aur(ep: &Endpoints) -> Vec<PackageItem> {
    let aur_cache = ep.aur_cache();
    let aur_installed = ep.aur_installed();
    let (cache, installed) = tokio::join!(
        fetch_value(&aur_cache),
        fetch_value(&aur_installed)
    );
    let mut items = parse_listing(&cache, Source::Aur);
    apply_installed(&mut items, &installed);
    items
}

/// What: Mark cache items present in the installed map.
///
/// Inputs:
/// - `items`: Parsed cache listing, mutated in place.
/// - `installed`: Object mapping package id to `{version}` metadata.
///
/// Output:
/// - Matching items get `installed = true` and their version when known;
///   installed entries without a cache item are ignored.
pub(crate) fn apply_installed(items: &mut [PackageItem], installed: &Value) {
    let Some(map) = installed.as_object() else {
        if !installed.is_null() {
            tracing::warn!(source = Source::Aur.label(), "installed payload is not an object");
        }
        return;
    };
    let by_id: HashMap<String, usize> = items
        .iter()
        .enumerate()
        .map(|(idx, item)| (item.package_id.clone(), idx))
        .collect();
    for (package_id, info) in map {
        if let Some(&idx) = by_id.get(package_id) {
            let item = &mut items[idx];
            item.installed = true;
            let version = s(info, "version");
            item.installed_version = (!version.is_empty()).then_some(version);
        }
    }
}
