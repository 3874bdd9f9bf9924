//! Network data retrieval for the four store sources, split into submodules.
//!
//! Every listing is JSON served by local endpoints; fetching shells out to
//! curl inside a blocking task and races the whole exchange against
//! [`FETCH_TIMEOUT`]. All failures degrade to an empty listing at this
//! boundary: a slow or broken source contributes zero items and never
//! aborts the other sources' refresh.

use std::time::Duration;

use serde_json::Value;

use crate::state::types::{PackageItem, Source};
use crate::util::{curl_args, percent_encode, s, ss};

mod aur;
mod flatpak;
mod icon;
mod pacman;
mod snap;

pub use aur::fetch_aur;
pub use flatpak::fetch_flatpak;
pub use icon::fetch_icon_fragment;
pub use pacman::fetch_pacman;
pub use snap::fetch_snap;

/// Default deadline for one listing fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure modes of one source fetch.
///
/// Every variant is recovered locally by the adapters; none propagate past
/// the source boundary as anything but a diagnostic log.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The endpoint did not respond within the deadline.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    /// curl could not be spawned, exited non-zero, or produced invalid UTF-8.
    #[error("transfer failed: {0}")]
    Transport(String),
    /// The response body was not valid JSON.
    #[error("malformed JSON payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// URL builder for the store's local listing endpoints.
#[derive(Clone, Debug)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// Create a builder rooted at `base` (trailing slash optional).
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base, path)
        } else {
            format!("{}/{}", self.base, path)
        }
    }

    /// Pre-translated pacman dump (installed state inlined).
    pub fn pacman_dump(&self) -> String {
        self.url("json_dump_pacman_with_translation.sh")
    }

    /// Cached AUR listing maintained out-of-band.
    pub fn aur_cache(&self) -> String {
        self.url("/var/tmp/pamac/aur_filtered.json")
    }

    /// Installed AUR packages with their install metadata.
    pub fn aur_installed(&self) -> String {
        self.url("json_installed_aur.sh")
    }

    /// Flatpak search listing.
    pub fn flatpak_search(&self) -> String {
        self.url("json_search_flatpak.sh")
    }

    /// Installed Flatpak identifiers.
    pub fn flatpak_installed(&self) -> String {
        self.url("json_installed_flatpak.sh")
    }

    /// Updatable Flatpak identifiers.
    pub fn flatpak_updates(&self) -> String {
        self.url("json_updates_flatpak.sh")
    }

    /// Snap search listing.
    pub fn snap_search(&self) -> String {
        self.url("json_search_snap.sh")
    }

    /// Installed Snap identifiers.
    pub fn snap_installed(&self) -> String {
        self.url("json_installed_snap.sh")
    }

    /// Updatable Snap identifiers.
    pub fn snap_updates(&self) -> String {
        self.url("json_updates_snap.sh")
    }

    /// Icon fragment lookup for one displayed item.
    pub fn icon_lookup(&self, kind: &str, query: &str) -> String {
        self.url(&format!(
            "find_icon.sh?type={kind}&query={}",
            percent_encode(query)
        ))
    }
}

/// What: Fetch JSON from a URL using curl and parse it.
///
/// Input: `url` to request; `max_time_secs` forwarded as curl's `--max-time`.
/// Output: `Ok(Value)` on success; a [`FetchError`] when curl fails or the
/// body is not valid JSON.
fn curl_json(url: &str, max_time_secs: &str) -> Result<Value, FetchError> {
    let args = curl_args(url, &["--max-time", max_time_secs]);
    let out = std::process::Command::new("curl")
        .args(&args)
        .output()
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    if !out.status.success() {
        return Err(FetchError::Transport(format!(
            "curl exited with {:?}",
            out.status
        )));
    }
    let body =
        String::from_utf8(out.stdout).map_err(|e| FetchError::Transport(e.to_string()))?;
    Ok(serde_json::from_str(&body)?)
}

/// What: Fetch plain text from a URL using curl.
///
/// Input: `url` to request; `max_time_secs` forwarded as curl's `--max-time`.
/// Output: `Ok(String)` with the response body; a [`FetchError`] otherwise.
fn curl_text(url: &str, max_time_secs: &str) -> Result<String, FetchError> {
    let args = curl_args(url, &["--max-time", max_time_secs]);
    let out = std::process::Command::new("curl")
        .args(&args)
        .output()
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    if !out.status.success() {
        return Err(FetchError::Transport(format!(
            "curl exited with {:?}",
            out.status
        )));
    }
    String::from_utf8(out.stdout).map_err(|e| FetchError::Transport(e.to_string()))
}

/// What: Fetch JSON with an overall deadline.
///
/// Inputs:
/// - `url`: Endpoint to request.
/// - `timeout`: Deadline for the whole exchange.
///
/// Output:
/// - Parsed `Value`, or `FetchError::Timeout` when the deadline passes first.
///
/// Details:
/// - Runs curl in a blocking task and races it against `tokio::time::timeout`;
///   an abandoned request may still finish in the background, but its result
///   is discarded.
pub(crate) async fn fetch_json(url: &str, timeout: Duration) -> Result<Value, FetchError> {
    let owned = url.to_string();
    let max_time = timeout.as_secs().max(1).to_string();
    let task = tokio::task::spawn_blocking(move || curl_json(&owned, &max_time));
    match tokio::time::timeout(timeout, task).await {
        Err(_) => Err(FetchError::Timeout(timeout)),
        Ok(Err(join)) => Err(FetchError::Transport(join.to_string())),
        Ok(Ok(result)) => result,
    }
}

/// Fetch JSON with the default deadline, degrading every failure to `Null`.
pub(crate) async fn fetch_value(url: &str) -> Value {
    match fetch_json(url, FETCH_TIMEOUT).await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(url, error = %e, "source fetch failed, using empty listing");
            Value::Null
        }
    }
}

/// What: Convert one raw listing record into a [`PackageItem`].
///
/// Inputs:
/// - `rec`: Raw JSON record (`{p, d, n?, k?, g?}`).
/// - `source`: Provenance to tag the item with.
///
/// Output:
/// - `Some(PackageItem)` with normalized attributes derived, or `None` when
///   the record has no package id.
///
/// Details:
/// - Missing description defaults to the empty string; `n` falls back to the
///   package id as display name.
pub(crate) fn record_to_item(rec: &Value, source: Source) -> Option<PackageItem> {
    let package_id = s(rec, "p");
    if package_id.is_empty() {
        tracing::debug!(source = source.label(), "skipping record without package id");
        return None;
    }
    let display_name = ss(rec, &["n", "name"]).unwrap_or_else(|| package_id.clone());
    let mut item = PackageItem::new(package_id, display_name, s(rec, "d"), source);
    item.display_key = s(rec, "k");
    let group = s(rec, "g");
    item.group_key = (!group.is_empty()).then_some(group);
    Some(item)
}

/// Parse a whole listing payload, skipping malformed records.
///
/// A payload that is not an array (including the `Null` produced by a failed
/// fetch) yields an empty vector.
pub(crate) fn parse_listing(v: &Value, source: Source) -> Vec<PackageItem> {
    let Some(arr) = v.as_array() else {
        if !v.is_null() {
            tracing::warn!(source = source.label(), "listing payload is not an array");
        }
        return Vec::new();
    };
    arr.iter()
        .filter_map(|rec| record_to_item(rec, source))
        .collect()
}
