//! Flatpak listing adapter.

use std::collections::HashSet;

use serde_json::Value;

use crate::state::types::{PackageItem, Source};
use crate::util::arrs;

use super::{Endpoints, fetch_value, parse_listing};

/// What: Fetch the Flatpak listing, installed set, and update set
/// concurrently and reconcile them.
///
/// Inputs:
/// - `ep`: Endpoint builder for the local listing scripts.
///
/// Output:
/// - Items tagged `Source::Flatpak` with `installed` and `update_available`
///   set by membership in the side-channel name lists.
pub async fn fetch_flatpak(ep: &Endpoints) -> Vec<PackageItem> {
    let flatpak_search = ep.flatpak_search();
    let flatpak_installed = ep.flatpak_installed();
    let flatpak_updates = ep.flatpak_updates();
    let (cache, installed, updates) = tokio::join!(
        fetch_value(&flatpak_search),
        fetch_value(&flatpak_installed),
        fetch_value(&flatpak_updates)
    );
    reconcile(&cache, &installed, &updates)
}

/// Reconcile the cached listing against the installed and update name lists.
///
/// A failed side-channel fetch (`Null` payload) simply yields an empty
/// membership set; the cache listing still produces items.
pub(crate) fn reconcile(cache: &Value, installed: &Value, updates: &Value) -> Vec<PackageItem> {
    let installed_names: HashSet<String> =
        arrs(installed, &["flatpakInstalled"]).into_iter().collect();
    let updatable_names: HashSet<String> =
        arrs(updates, &["flatpakUpdates"]).into_iter().collect();
    let mut items = parse_listing(cache, Source::Flatpak);
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
    fn reconcile_sets_installed_and_update_flags_by_membership() {
        let cache = serde_json::json!([
            {"p": "org.gimp.GIMP", "d": "Image editor", "g": "gimp"},
            {"p": "org.kde.krita", "d": "Painting"}
        ]);
        let installed = serde_json::json!({"flatpakInstalled": ["org.gimp.GIMP"]});
        let updates = serde_json::json!({"flatpakUpdates": ["org.gimp.GIMP"]});

        let items = reconcile(&cache, &installed, &updates);
        assert_eq!(items.len(), 2);
        assert!(items[0].installed);
        assert!(items[0].update_available);
        assert_eq!(items[0].group_key.as_deref(), Some("gimp"));
        assert!(!items[1].installed);
        assert!(!items[1].update_available);
    }

    #[test]
    fn reconcile_with_failed_side_channels_defaults_flags_off() {
        let cache = serde_json::json!([{"p": "org.kde.krita", "d": "Painting"}]);
        let items = reconcile(&cache, &Value::Null, &Value::Null);
        assert_eq!(items.len(), 1);
        assert!(!items[0].installed);
        assert!(!items[0].update_available);

        assert!(reconcile(&Value::Null, &Value::Null, &Value::Null).is_empty());
    }
}
