//! PWA icon generation.
//!
//! An icon is built in three steps: [`layout::layout_icon`] computes the draw
//! list for a [`Design`] at a given size, [`raster::Canvas`] executes it, and
//! the canvas is written out as PNG.

pub mod layout;
pub mod paint;
pub mod raster;

use crate::{digest_hex, Error, IconConfig, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

pub use raster::Canvas;

/// Size the logo coordinates are authored against
pub const REFERENCE_SIZE: u32 = 512;

/// Which logo to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Design {
    /// Outlined pyramid with a centre dot
    #[default]
    Pyramid,
    /// Balance scale with white pans
    Scale,
}

impl fmt::Display for Design {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Design::Pyramid => write!(f, "pyramid"),
            Design::Scale => write!(f, "scale"),
        }
    }
}

impl FromStr for Design {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pyramid" => Ok(Design::Pyramid),
            "scale" => Ok(Design::Scale),
            other => Err(Error::ConfigError(format!("unknown icon design `{}`", other))),
        }
    }
}

/// An icon that was written to disk
#[derive(Debug, Clone)]
pub struct RenderedIcon {
    pub size: u32,
    pub design: Design,
    pub path: PathBuf,
    /// SHA-256 of the PNG bytes, hex encoded
    pub digest: String,
}

/// File name used for an icon of `size` pixels, e.g. `icon-192.png`
pub fn icon_file_name(size: u32) -> String {
    format!("icon-{}.png", size)
}

/// Draw `design` onto a fresh `size`x`size` canvas.
pub fn render(design: Design, size: u32) -> Result<Canvas> {
    let mut canvas = Canvas::new(size)?;
    let primitives = layout::layout_icon(design, size);
    debug!("{} icon at {}px: {} primitives", design, size, primitives.len());
    canvas.draw_all(&primitives);
    Ok(canvas)
}

/// Render every configured size into `config.out_dir`.
pub fn generate(config: &IconConfig) -> Result<Vec<RenderedIcon>> {
    if config.sizes.is_empty() {
        return Err(Error::ConfigError("no icon sizes requested".into()));
    }
    fs::create_dir_all(&config.out_dir).map_err(|e| Error::io(&config.out_dir, e))?;

    let mut written = Vec::with_capacity(config.sizes.len());
    for &size in &config.sizes {
        let path = config.out_dir.join(icon_file_name(size));
        let canvas = render(config.design, size)?;
        let png_data = canvas.save_png(&path)?;
        let digest = digest_hex(&png_data);
        info!("wrote {} ({}x{}, sha256: {})", path.display(), size, size, digest);
        written.push(RenderedIcon {
            size,
            design: config.design,
            path,
            digest,
        });
    }
    Ok(written)
}
