//! Generic attribute structs: sparse, named-field records that serialize to
//! XML element attributes.
//!
//! Each concrete struct kind declares its ordered field list once as a
//! static [`FieldSpec`]; access through an undeclared name is a typed error
//! rather than a silent miss.

use crate::error::{Error, Result};
use crate::xml::XmlNode;

/// Declaration shared by every instance of one attribute-struct kind
#[derive(Debug)]
pub struct FieldSpec {
    /// Struct kind name, used in error messages
    pub name: &'static str,
    /// Ordered list of declared field names
    pub fields: &'static [&'static str],
}

/// Anything that can write its set fields onto an XML element
pub trait WriteAttributes {
    fn write_attributes(&self, node: &mut XmlNode);
}

/// A sparse record over a fixed ordered field list.
///
/// Values are stored string-encoded once set; unset fields are simply
/// absent. Positional values past the declared fields are captured into an
/// `extra` list but not applied, so construction is permissive.
#[derive(Debug, Clone)]
pub struct AttrValues {
    spec: &'static FieldSpec,
    values: Vec<Option<String>>,
    extra: Vec<String>,
}

impl AttrValues {
    pub fn new(spec: &'static FieldSpec) -> Self {
        Self {
            spec,
            values: vec![None; spec.fields.len()],
            extra: Vec::new(),
        }
    }

    /// Populate fields positionally, without defaults
    pub fn from_values<S: AsRef<str>>(spec: &'static FieldSpec, values: &[S]) -> Self {
        Self::from_values_with_defaults(spec, values, &[])
    }

    /// Populate fields positionally. Trailing fields not covered by
    /// `values` take defaults, rightmost default to rightmost field; when
    /// the defaults list is shorter than the uncovered span, its last entry
    /// pads all remaining fields.
    pub fn from_values_with_defaults<S: AsRef<str>>(
        spec: &'static FieldSpec,
        values: &[S],
        defaults: &[&str],
    ) -> Self {
        let field_count = spec.fields.len();
        let mut record = Self::new(spec);
        for (i, slot) in record.values.iter_mut().enumerate() {
            if i < values.len() {
                *slot = Some(values[i].as_ref().to_string());
            } else if !defaults.is_empty() {
                let rev = field_count - i - 1;
                let val = if defaults.len() > rev {
                    defaults[rev]
                } else {
                    defaults[defaults.len() - 1]
                };
                *slot = Some(val.to_string());
            }
        }
        for v in values.iter().skip(field_count) {
            record.extra.push(v.as_ref().to_string());
        }
        record
    }

    pub fn spec(&self) -> &'static FieldSpec {
        self.spec
    }

    /// Comma-joined declared field names
    pub fn field_names(&self) -> String {
        self.spec.fields.join(",")
    }

    fn index_of(&self, field: &str) -> Option<usize> {
        self.spec.fields.iter().position(|f| *f == field)
    }

    fn undeclared(&self, field: &str) -> Error {
        Error::UndeclaredField {
            name: self.spec.name,
            field: field.to_string(),
        }
    }

    /// Whether `field` is in the declared list
    pub fn has_field(&self, field: &str) -> bool {
        self.index_of(field).is_some()
    }

    /// Whether `field` is declared and currently holds a value
    pub fn is_set(&self, field: &str) -> bool {
        self.index_of(field)
            .map_or(false, |i| self.values[i].is_some())
    }

    /// Number of fields currently holding a value
    pub fn set_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn get(&self, field: &str) -> Result<Option<&str>> {
        let idx = self.index_of(field).ok_or_else(|| self.undeclared(field))?;
        Ok(self.values[idx].as_deref())
    }

    pub fn set(&mut self, field: &str, value: impl ToString) -> Result<()> {
        let idx = self.index_of(field).ok_or_else(|| self.undeclared(field))?;
        self.values[idx] = Some(value.to_string());
        Ok(())
    }

    pub fn get_numeric(&self, field: &str) -> Result<Option<f64>> {
        Ok(self.get(field)?.and_then(|v| v.parse::<f64>().ok()))
    }

    /// Positional values that were captured but not applied
    pub fn extra(&self) -> &[String] {
        &self.extra
    }

    pub(crate) fn push_extra(&mut self, value: String) {
        self.extra.push(value);
    }

    /// Iterate `(field, value)` over the currently set fields, declared order
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.spec
            .fields
            .iter()
            .zip(self.values.iter())
            .filter_map(|(f, v)| v.as_deref().map(|v| (*f, v)))
    }

    /// Iterate the set values only, declared order
    pub fn set_values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().filter_map(|v| v.as_deref())
    }

    /// The original one-sided comparison: every field set in `self` is
    /// declared, set and equal in `other`
    pub fn agrees_with(&self, other: &AttrValues) -> bool {
        self.entries()
            .all(|(f, v)| matches!(other.get(f), Ok(Some(ov)) if ov == v))
    }

    /// Import any declared field present on the element
    pub fn read_attributes(&mut self, node: &XmlNode) {
        for (i, field) in self.spec.fields.iter().enumerate() {
            if let Some(value) = node.attr(field) {
                self.values[i] = Some(value.to_string());
            }
        }
    }
}

impl WriteAttributes for AttrValues {
    fn write_attributes(&self, node: &mut XmlNode) {
        for (field, value) in self.entries() {
            node.set_attr(field, value);
        }
    }
}

impl PartialEq for AttrValues {
    fn eq(&self, other: &Self) -> bool {
        self.set_count() == other.set_count() && self.agrees_with(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static QUAD: FieldSpec = FieldSpec {
        name: "quad",
        fields: &["x", "y", "width", "height"],
    };

    #[test]
    fn test_positional_construction() {
        let rec = AttrValues::from_values(&QUAD, &["1", "2", "30", "40"]);
        assert_eq!(rec.get("x").unwrap(), Some("1"));
        assert_eq!(rec.get("height").unwrap(), Some("40"));
        assert_eq!(rec.set_count(), 4);
    }

    #[test]
    fn test_pad_with_last_default() {
        let rec = AttrValues::from_values_with_defaults(&QUAD, &["5"], &["0"]);
        assert_eq!(rec.get("x").unwrap(), Some("5"));
        assert_eq!(rec.get("y").unwrap(), Some("0"));
        assert_eq!(rec.get("width").unwrap(), Some("0"));
        assert_eq!(rec.get("height").unwrap(), Some("0"));
    }

    #[test]
    fn test_rightmost_defaults_align_right() {
        // Two defaults for three uncovered fields: the rightmost default
        // goes to the rightmost field, the last entry pads the rest.
        let rec = AttrValues::from_values_with_defaults(&QUAD, &["5"], &["100", "7"]);
        assert_eq!(rec.get("height").unwrap(), Some("100"));
        assert_eq!(rec.get("width").unwrap(), Some("7"));
        assert_eq!(rec.get("y").unwrap(), Some("7"));
    }

    #[test]
    fn test_no_defaults_leaves_unset() {
        let rec = AttrValues::from_values(&QUAD, &["5", "6"]);
        assert!(rec.is_set("y"));
        assert!(!rec.is_set("width"));
        assert_eq!(rec.get("width").unwrap(), None);
    }

    #[test]
    fn test_extra_values_captured_not_applied() {
        let rec = AttrValues::from_values(&QUAD, &["1", "2", "3", "4", "leftover"]);
        assert_eq!(rec.extra(), &["leftover".to_string()]);
        assert_eq!(rec.set_count(), 4);
    }

    #[test]
    fn test_undeclared_field_errors() {
        let mut rec = AttrValues::from_values(&QUAD, &["1", "2", "3", "4"]);
        let err = rec.set("radius", 5).unwrap_err();
        assert!(matches!(
            err,
            Error::UndeclaredField { name: "quad", ref field } if field == "radius"
        ));
        assert!(rec.get("radius").is_err());
    }

    #[test]
    fn test_get_numeric() {
        let rec = AttrValues::from_values(&QUAD, &["1.5", "x"]);
        assert_eq!(rec.get_numeric("x").unwrap(), Some(1.5));
        assert_eq!(rec.get_numeric("y").unwrap(), None);
    }

    #[test]
    fn test_equality_same_populated_set() {
        let a = AttrValues::from_values(&QUAD, &["1", "2"]);
        let b = AttrValues::from_values(&QUAD, &["1", "2"]);
        let c = AttrValues::from_values(&QUAD, &["1", "2", "3"]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        // one-sided agreement still visible through agrees_with
        assert!(a.agrees_with(&c));
        assert!(!c.agrees_with(&a));
    }

    #[test]
    fn test_xml_round_trip() {
        use crate::xml::XmlNode;

        let rec = AttrValues::from_values(&QUAD, &["1", "2", "30", "40"]);
        let mut node = XmlNode::new("rect");
        rec.write_attributes(&mut node);
        assert_eq!(node.attr("width"), Some("30"));

        let mut back = AttrValues::new(&QUAD);
        back.read_attributes(&node);
        assert_eq!(back, rec);
    }
}
