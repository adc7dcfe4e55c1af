//! Release notes and known issues shown by both front ends.

/// One released version and what it brought
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Release {
    pub version: &'static str,
    pub changes: &'static [&'static str],
}

/// Newest first.
pub const RELEASES: &[Release] = &[
    Release {
        version: "v0.5.0",
        changes: &["Copy button", "Handle template errors", "Unsaved configuration warning"],
    },
    Release {
        version: "v0.4.0",
        changes: &["MDW import", "Autoresize textarea"],
    },
    Release {
        version: "v0.3.0",
        changes: &[
            "Multiple charges",
            "Charges selector style fixes",
            "Light mode",
            "\"New\" version badge",
            "Changelog page",
        ],
    },
    Release {
        version: "v0.2.0",
        changes: &[
            "Officer customization",
            "Persistent configuration",
            "Charges selector style fixes",
        ],
    },
    Release {
        version: "v0.1.0",
        changes: &["Initial release"],
    },
];

pub const KNOWN_ISSUES: &[&str] =
    &["Duplicate charges in list if two are added, and the first is deleted"];

/// The version of the newest release
pub fn latest_version() -> &'static str {
    RELEASES.first().map(|release| release.version).unwrap_or_default()
}
