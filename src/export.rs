// Multi-resolution export: flat icons folder plus the macOS .iconset layout,
// all resampled from one base render.

use anyhow::{Context, Result, bail};
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use crate::config::{ExportConfig, IconConfig};
use crate::error::IconError;
use crate::render::render_base_icon;

/// Ordered export sizes and the retina cutoff.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeSet {
    sizes: Vec<u32>,
    retina_max: u32,
}

impl SizeSet {
    pub fn new(sizes: Vec<u32>, retina_max: u32) -> Self {
        SizeSet { sizes, retina_max }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.sizes.clone(), config.retina_max_size)
    }

    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    /// Double-resolution edge for `size`, if it gets an @2x variant
    pub fn retina(&self, size: u32) -> Option<u32> {
        (size <= self.retina_max).then_some(size * 2)
    }
}

/// `icon_{size}x{size}.png`
pub fn icon_file_name(size: u32) -> String {
    format!("icon_{}x{}.png", size, size)
}

/// `icon_{size}x{size}@2x.png`
pub fn retina_file_name(size: u32) -> String {
    format!("icon_{}x{}@2x.png", size, size)
}

/// Every file written by one export, in write order.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub icons_dir: PathBuf,
    pub iconset_dir: PathBuf,
    pub written: Vec<PathBuf>,
}

/// Render the base icon once and write every size under `root`.
pub fn export_icon_set(config: &IconConfig, root: &Path) -> Result<ExportReport, IconError> {
    let base = render_base_icon(&config.render)?;
    let sizes = SizeSet::from_config(&config.export);

    let mut report = ExportReport {
        icons_dir: root.join(&config.export.icons_dir),
        iconset_dir: root.join(&config.export.iconset_dir),
        written: Vec::new(),
    };
    ensure_dir(&report.icons_dir)?;
    ensure_dir(&report.iconset_dir)?;

    let resized: Vec<(u32, RgbaImage)> = sizes
        .sizes()
        .iter()
        .map(|&size| (size, resample(&base, size)))
        .collect();

    for (size, image) in &resized {
        let path = report.icons_dir.join(icon_file_name(*size));
        write_png(image, &path)?;
        report.written.push(path);
    }

    for (size, image) in &resized {
        let path = report.iconset_dir.join(icon_file_name(*size));
        write_png(image, &path)?;
        report.written.push(path);

        if let Some(retina) = sizes.retina(*size) {
            let path = report.iconset_dir.join(retina_file_name(*size));
            write_png(&resample(&base, retina), &path)?;
            report.written.push(path);
        }
    }

    info!(
        "Exported {} files to {} and {}",
        report.written.len(),
        report.icons_dir.display(),
        report.iconset_dir.display()
    );
    Ok(report)
}

/// High-quality resample of the base canvas to `size x size`.
pub fn resample(base: &RgbaImage, size: u32) -> RgbaImage {
    imageops::resize(base, size, size, FilterType::Lanczos3)
}

fn ensure_dir(path: &Path) -> Result<(), IconError> {
    fs::create_dir_all(path).map_err(|source| IconError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn write_png(image: &RgbaImage, path: &Path) -> Result<(), IconError> {
    debug!("Writing {}x{} {}", image.width(), image.height(), path.display());
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| IconError::WriteFailure {
            path: path.to_path_buf(),
            source,
        })
}

/// Pack an iconset folder into an `.icns` file with `iconutil` (macOS only).
pub fn pack_icns(iconset_dir: &Path, output: &Path) -> Result<()> {
    info!("Converting {} to .icns", iconset_dir.display());
    let result = Command::new("iconutil")
        .arg("-c")
        .arg("icns")
        .arg(iconset_dir)
        .arg("-o")
        .arg(output)
        .output()
        .context("Failed to run iconutil (required on macOS)")?;

    if !result.status.success() {
        bail!("iconutil failed: {}", String::from_utf8_lossy(&result.stderr));
    }

    Ok(())
}
