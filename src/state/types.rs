//! Catalog item model shared by the adapters, query engine, and pager.

use crate::text::normalize;

/// Provenance of a catalog entry.
///
/// The variant order is also the fixed combine order used when per-source
/// results are concatenated into one ranked sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// Native pacman repositories.
    Pacman,
    /// Community-built AUR packages.
    Aur,
    /// Flatpak applications.
    Flatpak,
    /// Snap applications.
    Snap,
}

impl Source {
    /// All sources in the fixed combine order.
    pub const ALL: [Source; 4] = [Source::Pacman, Source::Aur, Source::Flatpak, Source::Snap];

    /// Stable lower-case label used in logs and diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Source::Pacman => "pacman",
            Source::Aur => "aur",
            Source::Flatpak => "flatpak",
            Source::Snap => "snap",
        }
    }
}

/// One catalog entry as seen by the search, ranking, and paging layers.
///
/// Items are immutable after ingestion except for `score`, which is a
/// transient ranking weight rewritten on every filter pass and meaningless
/// outside one. The `normalized_*` fields are derived exactly once in
/// [`PackageItem::new`]; they are never recomputed per query.
#[derive(Clone, Debug)]
pub struct PackageItem {
    /// Stable source-scoped identifier; unique within a source partition and
    /// the key for deduplication and autocomplete.
    pub package_id: String,
    /// Human-readable name; falls back to `package_id` for sources without a
    /// separate display name.
    pub display_name: String,
    /// Free-text description; may be empty.
    pub description: String,
    /// Provenance tag, immutable once set.
    pub source: Source,
    /// Whether the package is currently installed locally.
    pub installed: bool,
    /// Installed version, known only for AUR packages with install metadata.
    pub installed_version: Option<String>,
    /// Whether an update is pending; populated for Flatpak and Snap only.
    pub update_available: bool,
    /// Extra Snap search key (the `k` field of the listing), empty elsewhere.
    pub display_key: String,
    /// Flatpak icon group key (the `g` field of the listing).
    pub group_key: Option<String>,
    /// Lower-cased, accent-stripped `display_name`.
    pub normalized_name: String,
    /// Lower-cased, accent-stripped `description`.
    pub normalized_description: String,
    /// Transient relevance weight; reset at the start of every filter pass.
    pub score: i32,
}

impl PackageItem {
    /// Build an item and derive its normalized search attributes.
    pub fn new(
        package_id: String,
        display_name: String,
        description: String,
        source: Source,
    ) -> Self {
        let normalized_name = normalize(&display_name);
        let normalized_description = normalize(&description);
        Self {
            package_id,
            display_name,
            description,
            source,
            installed: false,
            installed_version: None,
            update_available: false,
            display_key: String::new(),
            group_key: None,
            normalized_name,
            normalized_description,
            score: 0,
        }
    }
}
