//! Settings for one conversion, built once from the command line

use std::path::{Path, PathBuf};

use kurbo::Vec2;

use crate::color::ColorDefinition;
use crate::draw::SizeOverride;

/// Everything a conversion needs to know, validated up front.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Vector drawable to read
    pub input: PathBuf,
    /// PNG file to write at the base density
    pub output: PathBuf,
    /// `-color` definitions, in command line order
    pub colors: Vec<ColorDefinition>,
    /// Optional Android color resource file
    pub colors_file: Option<PathBuf>,
    /// Canvas size overrides in dp
    pub size: SizeOverride,
    /// Pixels per dp at the base density
    pub scale: f64,
    /// Also write `@2x` and `@3x` variants
    pub ios: bool,
    /// Translation requested with `-x`/`-y`. Accepted but not applied.
    pub offset: Vec2,
}

impl Config {
    /// Defaults for converting `input` next to itself.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        let input = input.into();

        Self {
            output: default_output_path(&input),
            input,
            colors: Vec::new(),
            colors_file: None,
            size: SizeOverride::default(),
            scale: 1.0,
            ios: false,
            offset: Vec2::new(0.0, 0.0),
        }
    }
}

/// `<input-without-extension>.png`
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    let mut out_path = input.as_ref().to_owned();
    out_path.set_extension("png");

    out_path
}
