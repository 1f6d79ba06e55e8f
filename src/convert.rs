//! Helper that runs a whole conversion from a [`Config`]

use std::path::PathBuf;

use eyre::{Context, Result};
use log::{info, warn};

use crate::color::ColorTable;
use crate::config::Config;
use crate::document::VectorDocument;
use crate::{draw, output, resources};

/// Build the color table: `-color` definitions first, in order, then the
/// resource file, whose entries cannot replace keys that already exist.
pub fn color_table(config: &Config) -> Result<ColorTable> {
    let mut table = ColorTable::new();

    for def in &config.colors {
        table.define(def)?;
    }

    if let Some(path) = &config.colors_file {
        let definitions = resources::load(path)?;
        let resolution = table.resolve(definitions);
        info!(
            "{} colors known after reading {} ({} passes)",
            table.len(),
            path.display(),
            resolution.passes
        );
    }

    Ok(table)
}

/// Convert the drawable named by `config` and write every requested density.
/// Returns the files written.
///
/// ```no_run
/// # use vectopng::{convert, Config};
/// let mut config = Config::new("data/ic_badge.xml");
/// config.ios = true;
///
/// let written = convert(&config).unwrap();
/// assert_eq!(written.len(), 3);
/// ```
pub fn convert(config: &Config) -> Result<Vec<PathBuf>> {
    let colors = color_table(config)?;

    let document = VectorDocument::load(&config.input)?;

    if config.offset.x != 0.0 || config.offset.y != 0.0 {
        warn!(
            "offset {},{} is not applied when rendering",
            config.offset.x, config.offset.y
        );
    }

    let drawing = draw::render_with(&document, &colors, &config.size)
        .wrap_err("cannot render vector file")?;

    let written = output::write_all(&drawing, &config.output, config.scale, config.ios)?;

    Ok(written)
}
