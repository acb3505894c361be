//! Scene identity
//!
//! A scene is the host-side grouping a factory is scoped to. Scenes that ship
//! in the build carry a build index; dynamically loaded scenes only have a
//! path, which is why lookups discriminate on the probe's shape.

use std::fmt;

/// Identity of a scene: its build index (when part of the build) and path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SceneId {
    build_index: Option<u32>,
    path: String,
}

impl SceneId {
    /// Identity of a scene included in the build.
    pub fn in_build(index: u32, path: impl Into<String>) -> Self {
        Self {
            build_index: Some(index),
            path: path.into(),
        }
    }

    /// Identity of a scene known only by path (loaded outside the build).
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            build_index: None,
            path: path.into(),
        }
    }

    /// Build index, `None` for scenes not part of the build.
    pub fn build_index(&self) -> Option<u32> {
        self.build_index
    }

    /// Scene asset path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this identity answers a lookup for `probe`.
    ///
    /// In-build probes match on build index only; path-only probes match on
    /// path only. The discriminators never cross.
    pub fn matches(&self, probe: &Self) -> bool {
        match probe.build_index {
            Some(index) => self.build_index == Some(index),
            None => self.path == probe.path,
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.build_index {
            Some(index) => write!(f, "{} (build #{index})", self.path),
            None => write!(f, "{} (unbuilt)", self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_build_probe_matches_by_index() {
        let stored = SceneId::in_build(2, "scenes/menu.scene");
        assert!(stored.matches(&SceneId::in_build(2, "some/other/path.scene")));
        assert!(!stored.matches(&SceneId::in_build(3, "scenes/menu.scene")));
    }

    #[test]
    fn test_path_probe_matches_by_path() {
        let stored = SceneId::from_path("bundles/dlc.scene");
        assert!(stored.matches(&SceneId::from_path("bundles/dlc.scene")));
        assert!(!stored.matches(&SceneId::from_path("bundles/other.scene")));
    }

    #[test]
    fn test_discriminators_do_not_cross() {
        // A path-only probe never matches an in-build factory by index, and an
        // in-build probe never falls back to a path comparison.
        let unbuilt = SceneId::from_path("scenes/menu.scene");
        assert!(!unbuilt.matches(&SceneId::in_build(0, "scenes/menu.scene")));

        let in_build = SceneId::in_build(0, "scenes/menu.scene");
        assert!(in_build.matches(&SceneId::in_build(0, "renamed.scene")));
        assert!(in_build.matches(&SceneId::from_path("scenes/menu.scene")));
    }
}
