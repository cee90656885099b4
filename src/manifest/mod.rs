//! Dependency manifest loading and schema.

pub mod loader;
pub mod schema;

pub use loader::{default_manifest_path, load_manifest, MANIFEST_FILE};
pub use schema::{Dependency, DependencyKind, Manifest};
