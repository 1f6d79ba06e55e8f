//! Color literals and the table of named colors

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::error::Error;

/// Prefix under which colors from a resource file are stored, matching the
/// way vector drawables refer to them (`@color/accent`).
pub const RESOURCE_PREFIX: &str = "@color/";

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F]{3,8})$").expect("valid color pattern"));

/// A color with 8-bit channels and straight (not premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Opacity, 0 is fully transparent
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black; paints nothing.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    /// A color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Scale the alpha channel by `factor`, clamped to `0.0..=1.0`.
    pub fn multiply_alpha(self, factor: f64) -> Self {
        let a = (self.a as f64 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Whether drawing with this color would have no effect.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl From<Rgba> for piet::Color {
    fn from(c: Rgba) -> Self {
        piet::Color::rgba8(c.r, c.g, c.b, c.a)
    }
}

fn nibble(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

fn doubled(digit: u8) -> u8 {
    let n = nibble(digit);
    n << 4 | n
}

fn pair(hi: u8, lo: u8) -> u8 {
    nibble(hi) << 4 | nibble(lo)
}

/// Parses `#RGB`, `#ARGB`, `#RRGGBB` and `#AARRGGBB` literals.
impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidColor(s.to_owned());

        let digits = HEX_COLOR
            .captures(s)
            .and_then(|c| c.get(1))
            .ok_or_else(invalid)?
            .as_str()
            .as_bytes();

        let color = match *digits {
            [r, g, b] => Rgba::rgb(doubled(r), doubled(g), doubled(b)),
            [a, r, g, b] => Rgba::new(doubled(r), doubled(g), doubled(b), doubled(a)),
            [r1, r2, g1, g2, b1, b2] => Rgba::rgb(pair(r1, r2), pair(g1, g2), pair(b1, b2)),
            [a1, a2, r1, r2, g1, g2, b1, b2] => Rgba::new(
                pair(r1, r2),
                pair(g1, g2),
                pair(b1, b2),
                pair(a1, a2),
            ),
            _ => return Err(invalid()),
        };

        Ok(color)
    }
}

/// Resolve `text` to a color: a name known to `table` wins, otherwise it must
/// be a hex literal.
pub fn parse_color(text: &str, table: &ColorTable) -> Result<Rgba, Error> {
    match table.get(text) {
        Some(color) => Ok(color),
        None => text.parse(),
    }
}

/// One `name = color` entry, either from a `-color` flag or a resource file.
/// The value is kept raw until it is resolved against a [`ColorTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorDefinition {
    /// Key the color is stored under
    pub name: String,
    /// Hex literal or the name of another color
    pub value: String,
}

impl ColorDefinition {
    /// A definition of `name` as the raw `value`.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Parses the `name=value` form used on the command line.
impl FromStr for ColorDefinition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok(ColorDefinition::new(name.trim(), value.trim()))
            }
            _ => Err(Error::InvalidColorDefinition(s.to_owned())),
        }
    }
}

/// Outcome of resolving a batch of resource definitions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Number of passes over the work list, including the final one
    pub passes: usize,
    /// Names that never resolved, in definition order
    pub unresolved: Vec<String>,
}

/// Name to color lookup used while rendering. Lives for one conversion.
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    colors: HashMap<String, Rgba>,
}

impl ColorTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an exact key, e.g. `accent` or `@color/accent`.
    pub fn get(&self, name: &str) -> Option<Rgba> {
        self.colors.get(name).copied()
    }

    /// Number of names defined.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether no names are defined.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Insert or replace a color under `name`.
    pub fn insert(&mut self, name: impl Into<String>, color: Rgba) {
        self.colors.insert(name.into(), color);
    }

    /// Add a command line definition. The value may name a color defined
    /// earlier.
    pub fn define(&mut self, def: &ColorDefinition) -> Result<(), Error> {
        let color = parse_color(&def.value, self).map_err(|_| {
            Error::InvalidColorDefinition(format!("{}={}", def.name, def.value))
        })?;
        debug!("defined color {} = {:?}", def.name, color);
        self.insert(def.name.clone(), color);

        Ok(())
    }

    /// Add resource file definitions under [`RESOURCE_PREFIX`], in whatever
    /// order their references allow.
    ///
    /// Each pass tries every remaining definition in order. Definitions whose
    /// value cannot be resolved yet are retried on the next pass, until
    /// nothing remains or a pass makes no progress. Names that never resolve
    /// stay out of the table, so using them fails later with
    /// [`Error::InvalidColor`]. A key that is already present is kept as-is,
    /// which lets command line definitions override the file.
    pub fn resolve(&mut self, definitions: Vec<ColorDefinition>) -> Resolution {
        let mut remaining = definitions;
        let mut passes = 0;

        while !remaining.is_empty() {
            passes += 1;
            let before = remaining.len();

            remaining.retain(|def| {
                let key = format!("{}{}", RESOURCE_PREFIX, def.name);
                if self.colors.contains_key(&key) {
                    debug!("keeping existing color {}", key);
                    return false;
                }

                match parse_color(&def.value, self) {
                    Ok(color) => {
                        self.colors.insert(key, color);
                        false
                    }
                    Err(_) => true,
                }
            });

            debug!(
                "color resolution pass {}: {} resolved, {} remaining",
                passes,
                before - remaining.len(),
                remaining.len()
            );

            if remaining.len() == before {
                break;
            }
        }

        let unresolved: Vec<String> = remaining.into_iter().map(|def| def.name).collect();
        for name in &unresolved {
            warn!("color {}{} could not be resolved", RESOURCE_PREFIX, name);
        }

        Resolution { passes, unresolved }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Rgba {
        s.parse().unwrap()
    }

    #[test]
    fn three_digit_colors_duplicate_nibbles() {
        assert_eq!(hex("#FFF"), Rgba::new(255, 255, 255, 255));
        assert_eq!(hex("#a1c"), Rgba::new(0xAA, 0x11, 0xCC, 255));
    }

    #[test]
    fn four_digit_colors_lead_with_alpha() {
        assert_eq!(hex("#8421"), Rgba::new(0x44, 0x22, 0x11, 0x88));
        assert_eq!(hex("#0F00"), Rgba::new(0xFF, 0, 0, 0));
    }

    #[test]
    fn six_and_eight_digit_colors() {
        assert_eq!(hex("#112233"), Rgba::new(0x11, 0x22, 0x33, 255));
        assert_eq!(hex("#8090A0B0"), Rgba::new(0x90, 0xA0, 0xB0, 0x80));
        assert_eq!(hex("#deadbeef"), Rgba::new(0xAD, 0xBE, 0xEF, 0xDE));
    }

    #[test]
    fn rejects_malformed_colors() {
        for text in ["FFF", "#", "#FF", "#FFFFF", "#FFFFFFF", "#FFFFFFFFF", "#GGG", "red", " #FFF"] {
            match text.parse::<Rgba>() {
                Err(Error::InvalidColor(t)) => assert_eq!(t, text),
                other => panic!("{:?} parsed as {:?}", text, other),
            }
        }
    }

    #[test]
    fn table_names_take_precedence() {
        let mut table = ColorTable::new();
        table.insert("#FFF", Rgba::rgb(1, 2, 3));
        table.insert("brand", Rgba::rgb(0, 0x80, 0));

        assert_eq!(parse_color("#FFF", &table).unwrap(), Rgba::rgb(1, 2, 3));
        assert_eq!(parse_color("brand", &table).unwrap(), Rgba::rgb(0, 0x80, 0));
        assert!(matches!(
            parse_color("@color/brand", &table),
            Err(Error::InvalidColor(_))
        ));
    }

    #[test]
    fn command_line_definitions() {
        let def: ColorDefinition = " primary = #F00 ".parse().unwrap();
        assert_eq!(def, ColorDefinition::new("primary", "#F00"));

        assert!(matches!(
            "primary".parse::<ColorDefinition>(),
            Err(Error::InvalidColorDefinition(_))
        ));
        assert!(matches!(
            "=#F00".parse::<ColorDefinition>(),
            Err(Error::InvalidColorDefinition(_))
        ));
    }

    #[test]
    fn definitions_can_refer_to_earlier_ones() {
        let mut table = ColorTable::new();
        table.define(&"primary=#00F".parse().unwrap()).unwrap();
        table.define(&"accent=primary".parse().unwrap()).unwrap();

        assert_eq!(table.get("accent"), Some(Rgba::rgb(0, 0, 255)));

        let err = table.define(&"broken=nope".parse().unwrap()).unwrap_err();
        assert!(matches!(err, Error::InvalidColorDefinition(s) if s == "broken=nope"));
    }

    #[test]
    fn forward_references_resolve_in_two_passes() {
        let mut table = ColorTable::new();
        let resolution = table.resolve(vec![
            ColorDefinition::new("a", "@color/b"),
            ColorDefinition::new("b", "#FF0000"),
        ]);

        assert_eq!(resolution.passes, 2);
        assert!(resolution.unresolved.is_empty());
        assert_eq!(table.get("@color/a"), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(table.get("@color/b"), Some(Rgba::rgb(255, 0, 0)));
    }

    #[test]
    fn chains_resolve_regardless_of_order() {
        let mut table = ColorTable::new();
        let resolution = table.resolve(vec![
            ColorDefinition::new("c", "@color/b"),
            ColorDefinition::new("b", "@color/a"),
            ColorDefinition::new("a", "#80FFFFFF"),
        ]);

        assert_eq!(resolution.passes, 3);
        assert_eq!(table.get("@color/c"), Some(Rgba::new(255, 255, 255, 0x80)));
    }

    #[test]
    fn cycles_stay_unresolved() {
        let mut table = ColorTable::new();
        let resolution = table.resolve(vec![
            ColorDefinition::new("a", "@color/b"),
            ColorDefinition::new("b", "@color/a"),
            ColorDefinition::new("c", "#000"),
        ]);

        assert_eq!(resolution.passes, 2);
        assert_eq!(resolution.unresolved, vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(table.get("@color/c"), Some(Rgba::rgb(0, 0, 0)));
        assert!(matches!(
            parse_color("@color/a", &table),
            Err(Error::InvalidColor(name)) if name == "@color/a"
        ));
    }

    #[test]
    fn resolved_names_are_not_overwritten() {
        let mut table = ColorTable::new();
        table.insert("@color/accent", Rgba::rgb(0, 255, 0));

        table.resolve(vec![
            ColorDefinition::new("accent", "#F00"),
            ColorDefinition::new("other", "#00F"),
            ColorDefinition::new("other", "#FFF"),
        ]);

        assert_eq!(table.get("@color/accent"), Some(Rgba::rgb(0, 255, 0)));
        assert_eq!(table.get("@color/other"), Some(Rgba::rgb(0, 0, 255)));
    }

    #[test]
    fn resource_values_can_use_command_line_names() {
        let mut table = ColorTable::new();
        table.define(&"brand=#123".parse().unwrap()).unwrap();
        table.resolve(vec![ColorDefinition::new("button", "brand")]);

        assert_eq!(table.get("@color/button"), Some(Rgba::rgb(0x11, 0x22, 0x33)));
    }

    #[test]
    fn alpha_multiplication() {
        let c = Rgba::rgb(10, 20, 30);
        assert_eq!(c.multiply_alpha(0.5).a, 128);
        assert_eq!(c.multiply_alpha(2.0).a, 255);
        assert!(c.multiply_alpha(0.0).is_transparent());
        assert_eq!(c.multiply_alpha(0.0).r, 10);
    }
}
