//! The `blur-images` command: regenerate blurred reference images for
//! the media test suite.
//!
//! Each PNG fixture is pushed through a blurhash encode/decode round
//! trip at its original dimensions, producing the image a client would
//! show while the real one loads. Tests compare against these
//! references, so they must be rebuilt with the same blurhash crate the
//! application decodes with.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

use crate::logging;

pub struct BlurImagesOptions {
    /// Directory containing the PNG fixtures
    pub input_dir: PathBuf,
    /// Where the blurred references go; defaults to the input directory
    pub output_dir: Option<PathBuf>,
    /// Blurhash component counts (x, y)
    pub components: (u32, u32),
    /// Contrast adjustment passed to the decoder
    pub punch: f32,
}

const BLURRED_SUFFIX: &str = "-blurred";

pub fn run(options: &BlurImagesOptions) -> Result<()> {
    if !options.input_dir.is_dir() {
        anyhow::bail!(
            "fixture directory {} does not exist",
            options.input_dir.display()
        );
    }

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| options.input_dir.clone());
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let fixtures = find_fixtures(&options.input_dir)?;
    if fixtures.is_empty() {
        logging::info(&format!(
            "No PNG fixtures found in {}",
            options.input_dir.display()
        ));
        return Ok(());
    }

    let mut written = 0usize;
    for fixture in &fixtures {
        match blur_one(fixture, &output_dir, options) {
            Ok(output) => {
                logging::info(&format!(
                    "  {} -> {}",
                    fixture.display(),
                    output.display()
                ));
                written += 1;
            }
            Err(e) => {
                logging::warn(&format!("Skipping {}: {e:#}", fixture.display()));
            }
        }
    }

    logging::info(&format!("Generated {written} blurred reference image(s)"));
    Ok(())
}

/// PNG files in the input directory, sorted, excluding previously
/// generated references so a rerun never blurs its own output.
fn find_fixtures(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(input_dir)
        .with_context(|| format!("Failed to read {}", input_dir.display()))?;

    let mut fixtures: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("png"))
        .filter(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|s| !s.ends_with(BLURRED_SUFFIX))
        })
        .collect();

    fixtures.sort();
    Ok(fixtures)
}

fn blur_one(fixture: &Path, output_dir: &Path, options: &BlurImagesOptions) -> Result<PathBuf> {
    let image = image::open(fixture)
        .with_context(|| format!("Failed to open {}", fixture.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    let (components_x, components_y) = options.components;

    let hash = blurhash::encode(components_x, components_y, width, height, image.as_raw())
        .map_err(|e| anyhow!("blurhash encode failed: {e}"))?;
    let pixels = blurhash::decode(&hash, width, height, options.punch)
        .map_err(|e| anyhow!("blurhash decode failed: {e}"))?;

    let blurred = image::RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| anyhow!("decoded pixel buffer does not match {width}x{height}"))?;

    let stem = fixture
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("fixture has no usable file name"))?;
    let output = output_dir.join(format!("{stem}{BLURRED_SUFFIX}.png"));
    blurred
        .save(&output)
        .with_context(|| format!("Failed to save {}", output.display()))?;

    Ok(output)
}
