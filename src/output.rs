//! Writing PNG files, once per requested density

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::info;

use crate::canvas::Drawing;
use crate::error::Error;

/// Extra densities written in iOS mode, as (file suffix, scale multiplier).
pub const IOS_DENSITIES: [(&str, f64); 2] = [("@2x", 2.0), ("@3x", 3.0)];

/// `base` with its extension replaced by `<suffix>.png`, e.g. `icon@2x.png`.
pub fn density_path(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.with_extension("").into_os_string();
    name.push(suffix);
    name.push(".png");

    PathBuf::from(name)
}

/// Encode `drawing` at `scale` into the file at `path`. The file is only
/// created once rasterization has succeeded.
pub fn write(drawing: &Drawing, path: &Path, scale: f64) -> Result<(), Error> {
    let encode_error = |message: String| Error::Encode {
        path: path.to_owned(),
        message,
    };

    let surface = drawing
        .rasterize(scale)
        .map_err(|e| encode_error(format!("{:#}", e)))?;

    let file = File::create(path).map_err(|e| encode_error(e.to_string()))?;
    let mut writer = BufWriter::new(file);

    surface
        .write_to_png(&mut writer)
        .map_err(|e| encode_error(e.to_string()))?;

    writer
        .into_inner()
        .map_err(|e| encode_error(e.error().to_string()))?;

    let (width, height) = drawing.pixel_size(scale);
    info!("wrote {} ({}x{})", path.display(), width, height);

    Ok(())
}

/// Write the base density to `base` and, in iOS mode, the `@2x` and `@3x`
/// variants next to it. Stops at the first failure; files already written
/// are left in place. Returns the paths written.
pub fn write_all(
    drawing: &Drawing,
    base: &Path,
    scale: f64,
    ios: bool,
) -> Result<Vec<PathBuf>, Error> {
    let mut written = Vec::new();

    write(drawing, base, scale)?;
    written.push(base.to_owned());

    if ios {
        for (suffix, multiplier) in IOS_DENSITIES {
            let path = density_path(base, suffix);
            write(drawing, &path, multiplier * scale)?;
            written.push(path);
        }
    }

    Ok(written)
}
