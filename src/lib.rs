//! Legal Solutions tooling
//!
//! Two small utilities for the Legal Solutions web app:
//!
//! - **Patcher**: splices a feature into a known source file by locating exact
//!   anchor substrings. Every anchor must match exactly once unless the lenient
//!   policy is selected, and re-running an applied plan is a no-op.
//! - **Icons** (feature `icons`, on by default): rasterizes the app logo into
//!   square PNG icons, scaled from a 512px reference design.
//!
//! # Example
//!
//! ```no_run
//! use legalkit::{patcher::Patcher, PatcherConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PatcherConfig {
//!     target_path: "src/app/page.tsx".into(),
//!     ..Default::default()
//! };
//! let report = Patcher::new(config).run()?;
//! println!("changed: {}", report.changed);
//! # Ok(())
//! # }
//! ```

use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

pub mod error;
pub use error::{Error, Result};

pub mod patcher;

// Rasterizer pulls in tiny-skia, so it stays behind a feature
#[cfg(feature = "icons")]
pub mod icons;

/// How the patcher reacts to anchors that are missing or repeated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorPolicy {
    /// Every anchor must occur exactly once, otherwise the run fails and
    /// nothing is written
    #[default]
    Strict,
    /// Missing anchors are skipped with a warning; repeated anchors use the
    /// first match
    Lenient,
}

/// Configuration for a patch run
///
/// # Examples
///
/// ```
/// let cfg = legalkit::PatcherConfig::default();
/// assert_eq!(cfg.policy, legalkit::AnchorPolicy::Strict);
/// assert!(!cfg.dry_run);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatcherConfig {
    /// File that is read, patched and written back in place
    pub target_path: PathBuf,
    /// Anchor matching policy
    pub policy: AnchorPolicy,
    /// Compute the report without touching the file
    pub dry_run: bool,
}

impl Default for PatcherConfig {
    fn default() -> Self {
        Self {
            target_path: PathBuf::from("src/app/page.tsx"),
            policy: AnchorPolicy::Strict,
            dry_run: false,
        }
    }
}

/// Configuration for icon generation
#[cfg(feature = "icons")]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IconConfig {
    /// Directory the `icon-{size}.png` files are written to
    pub out_dir: PathBuf,
    pub design: icons::Design,
    /// Square edge lengths in pixels
    pub sizes: Vec<u32>,
}

#[cfg(feature = "icons")]
impl Default for IconConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("public"),
            design: icons::Design::default(),
            sizes: vec![192, 512],
        }
    }
}

/// Hex encoded SHA-256 of `bytes`
pub fn digest_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
