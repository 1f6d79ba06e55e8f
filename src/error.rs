//! Error type shared by every stage of a conversion

use std::path::PathBuf;

/// Everything that can abort a conversion. None of these are recovered from
/// locally; the first one ends the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad command line usage
    #[error("{0}")]
    InvalidArgument(String),

    /// A `-color` flag that is not of the form `name=value`, or whose value
    /// does not parse
    #[error("invalid color definition \"{0}\"")]
    InvalidColorDefinition(String),

    /// An input file could not be read
    #[error("cannot read {what} \"{}\"", .path.display())]
    FileRead {
        /// What kind of file was being read
        what: &'static str,
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Malformed XML, wrong root element, or an attribute with a bad value
    #[error("cannot parse {what}: {message}")]
    XmlParse {
        /// What kind of document was being parsed
        what: &'static str,
        /// Description of the problem
        message: String,
    },

    /// A dimension that is not a `dp` value
    #[error("invalid {field} \"{text}\"")]
    InvalidDimension {
        /// Name of the attribute the dimension came from
        field: String,
        /// Offending text
        text: String,
    },

    /// A color that is neither a hex literal nor a known name
    #[error("invalid color \"{0}\"")]
    InvalidColor(String),

    /// Path data the SVG path parser rejected
    #[error("invalid path data \"{data}\"")]
    PathParse {
        /// Offending path data
        data: String,
        /// Parser failure
        #[source]
        source: kurbo::SvgParseError,
    },

    /// Rasterizing or writing a PNG failed
    #[error("cannot save PNG data to \"{}\" ({message})", .path.display())]
    Encode {
        /// Destination file
        path: PathBuf,
        /// Backend failure description
        message: String,
    },
}

impl Error {
    pub(crate) fn xml(what: &'static str, message: impl ToString) -> Self {
        Error::XmlParse {
            what,
            message: message.to_string(),
        }
    }
}
