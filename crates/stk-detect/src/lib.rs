//! # stk-detect
//!
//! Naive signature detection over dependency names and repository file
//! listings. Four keyword tables (frameworks, databases, authentication,
//! test frameworks) match by lowercase substring containment; a fifth
//! table maps well-known filenames to deployment platforms. Matching is
//! intentionally permissive: a dependency containing `pg` anywhere hits
//! the PostgreSQL keyword, false positives accepted.
//!
//! Tables are immutable values passed into the matcher, so tests can
//! substitute their own.

pub mod manifest;
pub mod matcher;
pub mod tables;

pub use manifest::{ManifestKind, parse_manifest};
pub use matcher::{detect_testing, readme_license, test_directory};
pub use tables::{DetectionTables, SignatureTable};
