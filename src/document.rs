//! In-memory model of an Android vector drawable

use std::fs;
use std::path::Path;
use std::str::FromStr;

use kurbo::Size;
use log::warn;
use roxmltree::Node;

use crate::error::Error;

const WHAT: &str = "vector file";

/// A parsed `<vector>` drawable. Only direct `<path>` children are kept.
#[derive(Debug, PartialEq, Clone)]
pub struct VectorDocument {
    /// Raw `width` attribute, e.g. `24dp`
    pub width: String,
    /// Raw `height` attribute
    pub height: String,
    /// Size of the coordinate space the path data is expressed in
    pub viewport: Size,
    /// Paths in drawing order
    pub paths: Vec<PathElement>,
}

/// Winding rule used to fill a path
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum FillType {
    /// `nonZero`
    #[default]
    NonZero,
    /// `evenOdd`
    EvenOdd,
}

/// Shape drawn at open stroke ends
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum LineCap {
    /// Flat, ending exactly at the path end
    #[default]
    Butt,
    /// Semicircle past the path end
    Round,
    /// Half a stroke width past the path end
    Square,
}

/// Shape drawn where stroke segments meet
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum LineJoin {
    /// Sharp corner, bevelled past the miter limit
    #[default]
    Miter,
    /// Rounded corner
    Round,
    /// Corner cut off flat
    Bevel,
}

/// One `<path>` element
#[derive(Debug, PartialEq, Clone)]
pub struct PathElement {
    /// Fill color token, literal or name
    pub fill_color: Option<String>,
    /// Stroke color token, literal or name
    pub stroke_color: Option<String>,
    /// Stroke width in viewport units
    pub stroke_width: f64,
    /// SVG path data
    pub path_data: String,
    /// Multiplier applied to the fill color's alpha
    pub fill_alpha: f64,
    /// Multiplier applied to the stroke color's alpha
    pub stroke_alpha: f64,
    /// Fill winding rule
    pub fill_type: FillType,
    /// Stroke end shape
    pub line_cap: LineCap,
    /// Stroke corner shape
    pub line_join: LineJoin,
    /// Miter length limit, relative to the stroke width
    pub miter_limit: f64,
}

impl Default for PathElement {
    fn default() -> Self {
        Self {
            fill_color: None,
            stroke_color: None,
            stroke_width: 0.0,
            path_data: String::new(),
            fill_alpha: 1.0,
            stroke_alpha: 1.0,
            fill_type: FillType::NonZero,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 4.0,
        }
    }
}

impl FromStr for FillType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nonZero" => Ok(FillType::NonZero),
            "evenOdd" => Ok(FillType::EvenOdd),
            _ => Err(Error::xml(WHAT, format!("invalid fillType \"{}\"", s))),
        }
    }
}

impl FromStr for LineCap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "butt" => Ok(LineCap::Butt),
            "round" => Ok(LineCap::Round),
            "square" => Ok(LineCap::Square),
            _ => Err(Error::xml(WHAT, format!("invalid strokeLineCap \"{}\"", s))),
        }
    }
}

impl FromStr for LineJoin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "miter" => Ok(LineJoin::Miter),
            "round" => Ok(LineJoin::Round),
            "bevel" => Ok(LineJoin::Bevel),
            _ => Err(Error::xml(WHAT, format!("invalid strokeLineJoin \"{}\"", s))),
        }
    }
}

/// Attribute lookup by local name, so `android:width` and `width` both match.
pub(crate) fn attribute(node: Node, name: &str) -> Option<String> {
    node.attributes()
        .find(|a| a.name() == name)
        .map(|a| a.value().to_owned())
}

fn number(node: Node, name: &str, default: f64) -> Result<f64, Error> {
    match attribute(node, name) {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| Error::xml(WHAT, format!("invalid {} \"{}\"", name, v))),
    }
}

fn parsed<T: FromStr<Err = Error> + Default>(node: Node, name: &str) -> Result<T, Error> {
    match attribute(node, name) {
        None => Ok(T::default()),
        Some(v) => v.trim().parse(),
    }
}

fn color_token(node: Node, name: &str) -> Option<String> {
    attribute(node, name)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl PathElement {
    fn from_node(node: Node) -> Result<Self, Error> {
        Ok(PathElement {
            fill_color: color_token(node, "fillColor"),
            stroke_color: color_token(node, "strokeColor"),
            stroke_width: number(node, "strokeWidth", 0.0)?,
            path_data: attribute(node, "pathData").unwrap_or_default(),
            fill_alpha: number(node, "fillAlpha", 1.0)?,
            stroke_alpha: number(node, "strokeAlpha", 1.0)?,
            fill_type: parsed(node, "fillType")?,
            line_cap: parsed(node, "strokeLineCap")?,
            line_join: parsed(node, "strokeLineJoin")?,
            miter_limit: number(node, "strokeMiterLimit", 4.0)?,
        })
    }
}

impl VectorDocument {
    /// Parse drawable XML. The root element must be `<vector>`.
    pub fn parse(xml: &str) -> Result<Self, Error> {
        let doc = roxmltree::Document::parse(xml).map_err(|e| Error::xml(WHAT, e))?;
        let root = doc.root_element();

        if root.tag_name().name() != "vector" {
            return Err(Error::xml(WHAT, "not a valid Android vector drawable"));
        }

        let viewport_width = number(root, "viewportWidth", 0.0)?;
        let viewport_height = number(root, "viewportHeight", 0.0)?;
        if !(viewport_width > 0.0 && viewport_height > 0.0) {
            return Err(Error::xml(
                WHAT,
                format!(
                    "viewport must be positive, got {}x{}",
                    viewport_width, viewport_height
                ),
            ));
        }

        let mut paths = Vec::new();
        for child in root.children().filter(Node::is_element) {
            match child.tag_name().name() {
                "path" => paths.push(PathElement::from_node(child)?),
                other => warn!("ignoring unsupported <{}> element", other),
            }
        }

        Ok(VectorDocument {
            width: attribute(root, "width").unwrap_or_default(),
            height: attribute(root, "height").unwrap_or_default(),
            viewport: Size::new(viewport_width, viewport_height),
            paths,
        })
    }

    /// Read and parse a drawable file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path).map_err(|source| Error::FileRead {
            what: WHAT,
            path: path.to_owned(),
            source,
        })?;

        Self::parse(&xml)
    }
}
