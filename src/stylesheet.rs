//! Reusable CSS rule sets loaded from TOML
//!
//! A stylesheet is a named collection of CSS rules (selector to property
//! map) that can be merged into a document's style block. Keeping rules in
//! TOML lets a palette or house style live outside the code that lays out
//! the drawing.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A named collection of CSS rules
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    rules: BTreeMap<String, BTreeMap<String, String>>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    rules: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load stylesheet from TOML string
    pub fn from_toml(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            rules: parsed.rules,
        })
    }

    /// Set one property of the rule for `selector`
    pub fn insert(
        &mut self,
        selector: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.rules
            .entry(selector.into())
            .or_default()
            .insert(property.into(), value.into());
    }

    pub fn rule(&self, selector: &str) -> Option<&BTreeMap<String, String>> {
        self.rules.get(selector)
    }

    pub fn rules(&self) -> &BTreeMap<String, BTreeMap<String, String>> {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render every rule as CSS text, selectors and properties in sorted
    /// order
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        for (selector, props) in &self.rules {
            out.push_str(selector);
            out.push_str(" {\n");
            for (property, value) in props {
                out.push_str(&format!("\t{}: {};\n", property, value));
            }
            out.push_str("}\n");
        }
        out
    }
}
