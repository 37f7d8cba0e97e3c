//! Keyword-driven paint and text attribute sets.
//!
//! Unlike the positional attribute structs, these records are populated by
//! field name only. Fields listed as func-IRIs are wrapped as `url(#...)`
//! references on assignment, except for the `inherit` keyword.

use std::collections::BTreeMap;

use crate::attrs::WriteAttributes;
use crate::error::{Error, Result};
use crate::xml::XmlNode;

/// Declaration for one keyword-attribute struct kind
#[derive(Debug)]
pub struct KeywordSpec {
    pub name: &'static str,
    pub fields: &'static [&'static str],
    /// Fields whose values are element references and must be wrapped as
    /// `url(#id)`
    pub func_iris: &'static [&'static str],
}

/// Anything that can contribute key/value pairs into a CSS style rule
pub trait StyleSource {
    fn contribute(&self, props: &mut BTreeMap<String, String>);
}

/// A sparse record over a [`KeywordSpec`], set by field name
#[derive(Debug, Clone)]
pub struct KeywordAttrs {
    spec: &'static KeywordSpec,
    values: Vec<Option<String>>,
}

impl KeywordAttrs {
    pub fn new(spec: &'static KeywordSpec) -> Self {
        Self {
            spec,
            values: vec![None; spec.fields.len()],
        }
    }

    fn index_of(&self, field: &str) -> Option<usize> {
        self.spec.fields.iter().position(|f| *f == field)
    }

    pub fn set(&mut self, field: &str, value: impl ToString) -> Result<()> {
        let idx = self.index_of(field).ok_or_else(|| Error::UndeclaredField {
            name: self.spec.name,
            field: field.to_string(),
        })?;
        let raw = value.to_string();
        let stored = if self.spec.func_iris.contains(&field) && raw != "inherit" {
            format!("url(#{})", raw)
        } else {
            raw
        };
        self.values[idx] = Some(stored);
        Ok(())
    }

    pub fn get(&self, field: &str) -> Result<Option<&str>> {
        let idx = self.index_of(field).ok_or_else(|| Error::UndeclaredField {
            name: self.spec.name,
            field: field.to_string(),
        })?;
        Ok(self.values[idx].as_deref())
    }

    /// Iterate `(field, value)` over the currently set fields
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.spec
            .fields
            .iter()
            .zip(self.values.iter())
            .filter_map(|(f, v)| v.as_deref().map(|v| (*f, v)))
    }
}

impl WriteAttributes for KeywordAttrs {
    fn write_attributes(&self, node: &mut XmlNode) {
        for (field, value) in self.entries() {
            node.set_attr(field, value);
        }
    }
}

impl StyleSource for KeywordAttrs {
    fn contribute(&self, props: &mut BTreeMap<String, String>) {
        for (field, value) in self.entries() {
            props.insert(field.to_string(), value.to_string());
        }
    }
}

static FILL_SPEC: KeywordSpec = KeywordSpec {
    name: "fill",
    fields: &["fill", "fill-opacity", "fill-rule"],
    func_iris: &[],
};

static STROKE_SPEC: KeywordSpec = KeywordSpec {
    name: "stroke",
    fields: &[
        "stroke",
        "stroke-width",
        "stroke-opacity",
        "stroke-linejoin",
        "stroke-linecap",
        "stroke-dasharray",
    ],
    func_iris: &[],
};

static TEXT_SPEC: KeywordSpec = KeywordSpec {
    name: "text-attrs",
    fields: &["font-family", "font-size", "font-weight", "text-anchor"],
    func_iris: &[],
};

static EFFECTS_SPEC: KeywordSpec = KeywordSpec {
    name: "effects",
    fields: &[
        "filter",
        "clip-path",
        "mask",
        "marker-start",
        "marker-mid",
        "marker-end",
    ],
    func_iris: &[
        "filter",
        "clip-path",
        "mask",
        "marker-start",
        "marker-mid",
        "marker-end",
    ],
};

macro_rules! keyword_setter {
    ($(#[$doc:meta])* $method:ident => $field:literal) => {
        $(#[$doc])*
        pub fn $method(mut self, value: impl ToString) -> Self {
            // field is in the spec's declared list, cannot fail
            let _ = self.0.set($field, value);
            self
        }
    };
}

/// Fill paint attributes
#[derive(Debug, Clone)]
pub struct Fill(KeywordAttrs);

impl Fill {
    pub fn new(color: impl ToString) -> Self {
        let mut attrs = KeywordAttrs::new(&FILL_SPEC);
        let _ = attrs.set("fill", color);
        Self(attrs)
    }

    keyword_setter!(opacity => "fill-opacity");
    keyword_setter!(rule => "fill-rule");

    pub fn attrs(&self) -> &KeywordAttrs {
        &self.0
    }
}

/// Stroke paint attributes
#[derive(Debug, Clone)]
pub struct Stroke(KeywordAttrs);

impl Stroke {
    pub fn new(color: impl ToString) -> Self {
        let mut attrs = KeywordAttrs::new(&STROKE_SPEC);
        let _ = attrs.set("stroke", color);
        Self(attrs)
    }

    keyword_setter!(width => "stroke-width");
    keyword_setter!(opacity => "stroke-opacity");
    keyword_setter!(linejoin => "stroke-linejoin");
    keyword_setter!(linecap => "stroke-linecap");
    keyword_setter!(dasharray => "stroke-dasharray");

    pub fn attrs(&self) -> &KeywordAttrs {
        &self.0
    }
}

/// Font and anchoring attributes for text elements
#[derive(Debug, Clone, Default)]
pub struct TextAttrs(Option<KeywordAttrs>);

impl TextAttrs {
    pub fn new() -> Self {
        Self(Some(KeywordAttrs::new(&TEXT_SPEC)))
    }

    fn inner(&mut self) -> &mut KeywordAttrs {
        self.0.get_or_insert_with(|| KeywordAttrs::new(&TEXT_SPEC))
    }

    pub fn family(mut self, value: impl ToString) -> Self {
        let _ = self.inner().set("font-family", value);
        self
    }

    pub fn size(mut self, value: impl ToString) -> Self {
        let _ = self.inner().set("font-size", value);
        self
    }

    pub fn weight(mut self, value: impl ToString) -> Self {
        let _ = self.inner().set("font-weight", value);
        self
    }

    pub fn anchor(mut self, value: impl ToString) -> Self {
        let _ = self.inner().set("text-anchor", value);
        self
    }

    pub fn attrs(&self) -> Option<&KeywordAttrs> {
        self.0.as_ref()
    }
}

/// Reference-valued attributes: filters, clips, masks and markers.
/// Every field is a func-IRI, so plain ids are wrapped as `url(#id)`.
#[derive(Debug, Clone)]
pub struct Effects(KeywordAttrs);

impl Effects {
    pub fn new() -> Self {
        Self(KeywordAttrs::new(&EFFECTS_SPEC))
    }

    keyword_setter!(filter => "filter");
    keyword_setter!(clip_path => "clip-path");
    keyword_setter!(mask => "mask");
    keyword_setter!(marker_start => "marker-start");
    keyword_setter!(marker_mid => "marker-mid");
    keyword_setter!(marker_end => "marker-end");

    pub fn attrs(&self) -> &KeywordAttrs {
        &self.0
    }
}

impl Default for Effects {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! delegate_attr_traits {
    ($ty:ty) => {
        impl WriteAttributes for $ty {
            fn write_attributes(&self, node: &mut XmlNode) {
                self.0.write_attributes(node);
            }
        }

        impl StyleSource for $ty {
            fn contribute(&self, props: &mut BTreeMap<String, String>) {
                self.0.contribute(props);
            }
        }
    };
}

delegate_attr_traits!(Fill);
delegate_attr_traits!(Stroke);
delegate_attr_traits!(Effects);

impl WriteAttributes for TextAttrs {
    fn write_attributes(&self, node: &mut XmlNode) {
        if let Some(attrs) = &self.0 {
            attrs.write_attributes(node);
        }
    }
}

impl StyleSource for TextAttrs {
    fn contribute(&self, props: &mut BTreeMap<String, String>) {
        if let Some(attrs) = &self.0 {
            attrs.contribute(props);
        }
    }
}
