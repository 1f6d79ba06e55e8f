//! Android color resource files (`res/values/colors.xml`)

use std::fs;
use std::path::Path;

use log::debug;
use roxmltree::Node;

use crate::color::ColorDefinition;
use crate::document::attribute;
use crate::error::Error;

const WHAT: &str = "colors file";

/// Collect the `<color name="...">value</color>` entries under the root
/// element, in file order. Other elements are ignored.
pub fn parse(xml: &str) -> Result<Vec<ColorDefinition>, Error> {
    let doc = roxmltree::Document::parse(xml).map_err(|e| Error::xml(WHAT, e))?;

    let mut definitions = Vec::new();
    for node in doc
        .root_element()
        .children()
        .filter(|n| n.has_tag_name("color"))
    {
        let name = attribute(node, "name")
            .ok_or_else(|| Error::xml(WHAT, "color element without a name"))?;
        definitions.push(ColorDefinition::new(name, text(node)));
    }

    debug!("read {} color definitions", definitions.len());

    Ok(definitions)
}

fn text(node: Node) -> String {
    node.text().unwrap_or_default().trim().to_owned()
}

/// Read and parse a color resource file.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<ColorDefinition>, Error> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path).map_err(|source| Error::FileRead {
        what: WHAT,
        path: path.to_owned(),
        source,
    })?;

    parse(&xml)
}
