//! Command line options
//!
//! Long options may be given with a single dash (`-color`, `-ios`) as well
//! as the usual two.

use std::ffi::OsString;
use std::path::PathBuf;

use kurbo::Vec2;
use log::LevelFilter;
use structopt::clap::{self, AppSettings};
use structopt::StructOpt;

use crate::color::ColorDefinition;
use crate::config::{default_output_path, Config};
use crate::draw::SizeOverride;
use crate::error::Error;

const LONG_FLAGS: &[&str] = &[
    "color", "colors", "height", "width", "scale", "ios", "version", "verbose", "help",
];

/// Renders Android vector drawables to PNG images
#[derive(StructOpt, Debug)]
#[structopt(
    name = "vectopng",
    global_settings = &[
        AppSettings::DisableVersion,
        AppSettings::AllowNegativeNumbers,
        AppSettings::ColorNever,
    ]
)]
pub struct Options {
    /// Defines an (A)RGB value for a color name (name=#(a)rgb|(aa)rrggbb)
    #[structopt(long = "color", value_name = "name=value", number_of_values = 1)]
    pub color: Vec<String>,

    /// Defines an Android color resource file to be parsed for color definitions
    #[structopt(long = "colors", value_name = "path", parse(from_os_str))]
    pub colors: Option<PathBuf>,

    /// Overrides the image width in dp
    #[structopt(long)]
    pub width: Option<f64>,

    /// Overrides the image height in dp
    #[structopt(long)]
    pub height: Option<f64>,

    /// Scales the image by the given factor
    #[structopt(long, default_value = "1")]
    pub scale: f64,

    /// Generates three resolutions of the image (adds @2x and @3x versions)
    #[structopt(long)]
    pub ios: bool,

    /// Horizontal offset (currently ignored)
    #[structopt(short, default_value = "0")]
    pub x: f64,

    /// Vertical offset (currently ignored)
    #[structopt(short, default_value = "0")]
    pub y: f64,

    /// Shows the program version
    #[structopt(long)]
    pub version: bool,

    /// Logs progress; repeat for more detail
    #[structopt(short, long, parse(from_occurrences))]
    pub verbose: u8,

    /// Android vector drawable to convert
    #[structopt(name = "vector-image-input", parse(from_os_str))]
    pub input: Option<PathBuf>,

    /// PNG file to write [default: input with a .png extension]
    #[structopt(name = "png-image-output", parse(from_os_str))]
    pub output: Option<PathBuf>,
}

/// Rewrite single-dash long options (`-colors x`) to their double-dash form.
/// Everything after `--` is passed through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }

            match arg.to_str() {
                Some("--") => {
                    passthrough = true;
                    arg
                }
                Some(s) if is_single_dash_long(s) => format!("-{}", s).into(),
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long(arg: &str) -> bool {
    match arg.strip_prefix('-') {
        Some(flag) if !flag.starts_with('-') => {
            let name = flag.split('=').next().unwrap_or(flag);
            LONG_FLAGS.contains(&name)
        }
        _ => false,
    }
}

/// Whether a parse "error" is really a help or version request that should
/// be printed as-is.
pub fn is_informational(e: &clap::Error) -> bool {
    matches!(
        e.kind,
        clap::ErrorKind::HelpDisplayed | clap::ErrorKind::VersionDisplayed
    )
}

/// The first line of a clap error, without its `error: ` prefix.
pub fn argument_error(e: &clap::Error) -> Error {
    let line = e.message.lines().next().unwrap_or_default();

    Error::InvalidArgument(line.trim_start_matches("error:").trim().to_owned())
}

impl Options {
    /// Parse `args`, program name first. Help requests also come back as an
    /// error, with kind [`clap::ErrorKind::HelpDisplayed`].
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Options::from_iter_safe(normalize_args(args))
    }

    /// Log level selected by the number of `-v` flags.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    /// Validate the options and turn them into a [`Config`].
    pub fn into_config(self) -> Result<Config, Error> {
        let input = self.input.ok_or_else(|| {
            Error::InvalidArgument("input vector image parameter is missing".to_owned())
        })?;

        if !(self.scale > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }

        for (name, value) in [("width", self.width), ("height", self.height)] {
            if let Some(v) = value {
                if !(v > 0.0) {
                    return Err(Error::InvalidArgument(format!(
                        "{} must be positive, got {}",
                        name, v
                    )));
                }
            }
        }

        let colors = self
            .color
            .iter()
            .map(|c| c.parse())
            .collect::<Result<Vec<ColorDefinition>, Error>>()?;

        Ok(Config {
            output: self.output.unwrap_or_else(|| default_output_path(&input)),
            input,
            colors,
            colors_file: self.colors,
            size: SizeOverride {
                width: self.width,
                height: self.height,
            },
            scale: self.scale,
            ios: self.ios,
            offset: Vec2::new(self.x, self.y),
        })
    }
}
