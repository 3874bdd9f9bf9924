//! Snap listing adapter.

use std::collections::HashSet;

use serde_json::Value;

use crate::state::types::{PackageItem, Source};
use crate::util::arrs;

use super::{Endpoints, fetch_value, parse_listing};

/// What: Fetch the Snap listing, installed set, and update set concurrently
/// and reconcile them.
///
/// Inputs:
/// - `ep`: Endpoint builder for the local listing scripts.
///
/// Output:
/// - Items tagged `Source::Snap` with `installed` and `update_available` set
///   by membership, and the `k` search key carried as `display_key`.
pub async fn fetch_snap(ep: &Endpoints) -> Vec<PackageItem> {
    let snap_search = ep.snap_search();
    let snap_installed = ep.snap_installed();
    let snap_updates = ep.snap_updates();
    let (cache, installed, updates) = tokio::join!(
        fetch_value(&snap_search),
        fetch_value(&snap_installed),
        fetch_value(&snap_updates)
    );
    reconcile(&cache, &installed, &updates)
}

/// Reconcile the cached listing against the installed and update name lists.
pub(crate) fn reconcile(cache: &Value, installed: &Value, updates: &Value) -> Vec<PackageItem> {
    let installed_names: HashSet<String> =
        arrs(installed, &["snapInstalled"]).into_iter().collect();
    let updatable_names: HashSet<String> = arrs(updates, &["snapUpdates"]).into_iter().collect();
    let mut items = parse_listing(cache, Source::Snap);
    for item in &mut items {
        item.installed = installed_names.contains(&item.package_id);
        item.update_available = updatable_names.contains(&item.package_id);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconcile_carries_display_key_and_membership_flags() {
        let cache = serde_json::json!([
            {"p": "spotify", "d": "Music", "k": "Spotify Player"},
            {"p": "vlc", "d": "Media player"}
        ]);
        let installed = serde_json::json!({"snapInstalled": ["vlc"]});
        let updates = serde_json::json!({"snapUpdates": []});

        let items = reconcile(&cache, &installed, &updates);
        assert_eq!(items[0].display_key, "Spotify Player");
        assert!(!items[0].installed);
        assert!(items[1].installed);
        assert!(!items[1].update_available);
    }

    #[test]
    fn reconcile_empty_cache_contributes_nothing() {
        let items = reconcile(
            &serde_json::json!([]),
            &serde_json::json!({"snapInstalled": ["vlc"]}),
            &Value::Null,
        );
        assert!(items.is_empty());
    }
}
