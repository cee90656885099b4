//! Manifest schema definitions.
//!
//! This module contains the struct definitions that map to the JSON
//! manifest format: a `dependencies` array of descriptors tagged by
//! `type`.

use serde::{Deserialize, Serialize};

/// Root structure of a dependency manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Dependencies in declaration order; processed sequentially.
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Manifest {
    /// Look up a dependency by name.
    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.dependencies.iter().find(|dep| dep.name == name)
    }
}

/// A single external dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    /// Unique key; also names the checkout/extraction directory.
    pub name: String,

    /// Source location: git remote or download URL.
    pub url: String,

    #[serde(flatten)]
    pub kind: DependencyKind,
}

/// Dependency kind plus its kind-specific fields.
///
/// Tagged by the manifest's `type` field. Adding a kind extends this
/// enum, and every dispatch site is then checked at compile time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DependencyKind {
    /// A git repository pinned to a tag, branch, or commit.
    Git { revision: String },

    /// A downloadable file, extracted when it is a zip container.
    Archive {
        /// Overrides the default browser-like User-Agent for picky hosts.
        #[serde(
            rename = "user-agent",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        user_agent: Option<String>,
    },
}

impl Dependency {
    /// The kind tag as it appears in the manifest.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            DependencyKind::Git { .. } => "git",
            DependencyKind::Archive { .. } => "archive",
        }
    }

    /// Manifest-declared revision, present only for git dependencies.
    /// Archive freshness is decided from recorded URL and size instead.
    pub fn revision(&self) -> Option<&str> {
        match &self.kind {
            DependencyKind::Git { revision } => Some(revision),
            DependencyKind::Archive { .. } => None,
        }
    }
}
