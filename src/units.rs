//! Units-aware attribute structs: numeric field values carry a CSS length
//! unit suffix.

use std::fmt;
use std::str::FromStr;

use crate::attrs::{AttrValues, FieldSpec, WriteAttributes};
use crate::error::{Error, Result};
use crate::xml::XmlNode;

/// The fixed set of CSS length units an attribute struct may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Px,
    Pt,
    Em,
    Rem,
    Percent,
}

impl Unit {
    pub const ALL: [Unit; 5] = [Unit::Px, Unit::Pt, Unit::Em, Unit::Rem, Unit::Percent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Pt => "pt",
            Unit::Em => "em",
            Unit::Rem => "rem",
            Unit::Percent => "%",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "px" => Ok(Unit::Px),
            "pt" => Ok(Unit::Pt),
            "em" => Ok(Unit::Em),
            "rem" => Ok(Unit::Rem),
            "%" => Ok(Unit::Percent),
            other => Err(Error::InvalidUnit(other.to_string())),
        }
    }
}

/// An [`AttrValues`] record whose positive numeric values accumulate a
/// length unit suffix.
///
/// Units only decorate strictly positive magnitudes: zero, negative or
/// non-numeric values (e.g. a `viewBox` list) are left untouched.
#[derive(Debug, Clone)]
pub struct UnitValues {
    attrs: AttrValues,
    unit: Option<Unit>,
}

impl UnitValues {
    pub fn new(spec: &'static FieldSpec) -> Self {
        Self {
            attrs: AttrValues::new(spec),
            unit: None,
        }
    }

    /// Positional construction. One trailing value past the declared field
    /// list is taken as the unit name; an unparsable trailing value is
    /// captured into `extra` instead.
    pub fn from_values_with_defaults<S: AsRef<str>>(
        spec: &'static FieldSpec,
        values: &[S],
        defaults: &[&str],
    ) -> Self {
        let field_count = spec.fields.len();
        let (fields, trailing) = if values.len() == field_count + 1 {
            values.split_at(field_count)
        } else {
            (values, &[] as &[S])
        };
        let attrs = AttrValues::from_values_with_defaults(spec, fields, defaults);
        let mut record = Self { attrs, unit: None };
        if let Some(t) = trailing.first() {
            match t.as_ref().parse::<Unit>() {
                Ok(unit) => record.set_unit(unit),
                Err(_) => record.attrs.push_extra(t.as_ref().to_string()),
            }
        }
        record
    }

    pub fn from_values<S: AsRef<str>>(spec: &'static FieldSpec, values: &[S]) -> Self {
        Self::from_values_with_defaults(spec, values, &[])
    }

    pub fn unit(&self) -> Option<Unit> {
        self.unit
    }

    /// Set the active unit and suffix every positive numeric field value
    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = Some(unit);
        self.apply_unit();
    }

    /// Parse and set the unit by name; fails on anything outside the
    /// allowed set
    pub fn set_unit_name(&mut self, name: &str) -> Result<()> {
        self.set_unit(name.parse()?);
        Ok(())
    }

    fn apply_unit(&mut self) {
        let unit = match self.unit {
            Some(u) => u,
            None => return,
        };
        let fields = self.attrs.spec().fields;
        for field in fields {
            let current = match self.attrs.get(field) {
                Ok(Some(v)) => v.to_string(),
                _ => continue,
            };
            let suffixed = if let Ok(n) = current.parse::<i64>() {
                (n > 0).then(|| format!("{}{}", n, unit))
            } else if let Ok(n) = current.parse::<f64>() {
                (n > 0.0).then(|| format!("{}{}", n, unit))
            } else {
                None
            };
            if let Some(v) = suffixed {
                // field comes from the declared list, cannot fail
                let _ = self.attrs.set(field, v);
            }
        }
    }

    /// Set field values with the active unit substring removed
    pub fn stripped_values(&self) -> Vec<String> {
        self.attrs
            .set_values()
            .map(|v| match self.unit {
                Some(u) => v.replace(u.as_str(), ""),
                None => v.to_string(),
            })
            .collect()
    }

    /// Numeric value of a field, unit suffix removed before parsing
    pub fn get_numeric(&self, field: &str) -> Result<Option<f64>> {
        let raw = match self.attrs.get(field)? {
            Some(v) => v,
            None => return Ok(None),
        };
        let bare = match self.unit {
            Some(u) => raw.replace(u.as_str(), ""),
            None => raw.to_string(),
        };
        Ok(bare.parse::<f64>().ok())
    }

    pub fn get(&self, field: &str) -> Result<Option<&str>> {
        self.attrs.get(field)
    }

    pub fn set(&mut self, field: &str, value: impl ToString) -> Result<()> {
        self.attrs.set(field, value)
    }

    pub fn attrs(&self) -> &AttrValues {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut AttrValues {
        &mut self.attrs
    }

    pub fn read_attributes(&mut self, node: &XmlNode) {
        self.attrs.read_attributes(node);
    }
}

impl WriteAttributes for UnitValues {
    fn write_attributes(&self, node: &mut XmlNode) {
        self.attrs.write_attributes(node);
    }
}

impl PartialEq for UnitValues {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit && self.attrs == other.attrs
    }
}
