//! SVG transform definitions.
//!
//! Each variant carries exactly the numeric fields the corresponding SVG
//! transform function takes, so a constructed value is always renderable.
//! Optional trailing parameters (`ty`, `sy`, the rotation center) are
//! omitted from output while unset.

use crate::error::{Error, Result};
use crate::geom::{fmt_number, Pt};

/// One SVG transform function
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Matrix {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
    },
    Translate {
        tx: f64,
        ty: Option<f64>,
    },
    Scale {
        sx: f64,
        sy: Option<f64>,
    },
    Rotate {
        angle: f64,
        center: Option<Pt>,
    },
    SkewX {
        angle: f64,
    },
    SkewY {
        angle: f64,
    },
}

impl Transform {
    pub fn matrix(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Transform::Matrix { a, b, c, d, e, f }
    }

    pub fn translate(tx: f64) -> Self {
        Transform::Translate { tx, ty: None }
    }

    pub fn translate_xy(tx: f64, ty: f64) -> Self {
        Transform::Translate { tx, ty: Some(ty) }
    }

    pub fn scale(sx: f64) -> Self {
        Transform::Scale { sx, sy: None }
    }

    pub fn scale_xy(sx: f64, sy: f64) -> Self {
        Transform::Scale { sx, sy: Some(sy) }
    }

    pub fn rotate(angle: f64) -> Self {
        Transform::Rotate {
            angle,
            center: None,
        }
    }

    pub fn rotate_about(angle: f64, center: Pt) -> Self {
        Transform::Rotate {
            angle,
            center: Some(center),
        }
    }

    pub fn skew_x(angle: f64) -> Self {
        Transform::SkewX { angle }
    }

    pub fn skew_y(angle: f64) -> Self {
        Transform::SkewY { angle }
    }

    /// The SVG function name of this transform
    pub fn label(&self) -> &'static str {
        match self {
            Transform::Matrix { .. } => "matrix",
            Transform::Translate { .. } => "translate",
            Transform::Scale { .. } => "scale",
            Transform::Rotate { .. } => "rotate",
            Transform::SkewX { .. } => "skewX",
            Transform::SkewY { .. } => "skewY",
        }
    }

    fn params(&self) -> Vec<f64> {
        match *self {
            Transform::Matrix { a, b, c, d, e, f } => vec![a, b, c, d, e, f],
            Transform::Translate { tx, ty } => match ty {
                Some(ty) => vec![tx, ty],
                None => vec![tx],
            },
            Transform::Scale { sx, sy } => match sy {
                Some(sy) => vec![sx, sy],
                None => vec![sx],
            },
            Transform::Rotate { angle, center } => match center {
                Some(c) => vec![angle, c.x, c.y],
                None => vec![angle],
            },
            Transform::SkewX { angle } | Transform::SkewY { angle } => vec![angle],
        }
    }

    fn field_names(&self) -> &'static [&'static str] {
        match self {
            Transform::Matrix { .. } => &["a", "b", "c", "d", "e", "f"],
            Transform::Translate { .. } => &["tx", "ty"],
            Transform::Scale { .. } => &["sx", "sy"],
            Transform::Rotate { .. } => &["angle", "cx", "cy"],
            Transform::SkewX { .. } | Transform::SkewY { .. } => &["angle"],
        }
    }

    fn undeclared(&self, field: &str) -> Error {
        Error::UndeclaredTransformField {
            name: self.label(),
            field: field.to_string(),
        }
    }

    /// Read a parameter by field name. Unset optional parameters read as
    /// `None`.
    pub fn value(&self, field: &str) -> Result<Option<f64>> {
        let v = match (self, field) {
            (Transform::Matrix { a, .. }, "a") => Some(*a),
            (Transform::Matrix { b, .. }, "b") => Some(*b),
            (Transform::Matrix { c, .. }, "c") => Some(*c),
            (Transform::Matrix { d, .. }, "d") => Some(*d),
            (Transform::Matrix { e, .. }, "e") => Some(*e),
            (Transform::Matrix { f, .. }, "f") => Some(*f),
            (Transform::Translate { tx, .. }, "tx") => Some(*tx),
            (Transform::Translate { ty, .. }, "ty") => *ty,
            (Transform::Scale { sx, .. }, "sx") => Some(*sx),
            (Transform::Scale { sy, .. }, "sy") => *sy,
            (Transform::Rotate { angle, .. }, "angle") => Some(*angle),
            (Transform::Rotate { center, .. }, "cx") => center.map(|c| c.x),
            (Transform::Rotate { center, .. }, "cy") => center.map(|c| c.y),
            (Transform::SkewX { angle }, "angle") => Some(*angle),
            (Transform::SkewY { angle }, "angle") => Some(*angle),
            _ => return Err(self.undeclared(field)),
        };
        Ok(v)
    }

    /// Write a parameter by field name. Setting an optional parameter makes
    /// it render; a rotation center coordinate materializes the center at
    /// the origin first.
    pub fn set_value(&mut self, field: &str, value: f64) -> Result<()> {
        match (&mut *self, field) {
            (Transform::Matrix { a, .. }, "a") => *a = value,
            (Transform::Matrix { b, .. }, "b") => *b = value,
            (Transform::Matrix { c, .. }, "c") => *c = value,
            (Transform::Matrix { d, .. }, "d") => *d = value,
            (Transform::Matrix { e, .. }, "e") => *e = value,
            (Transform::Matrix { f, .. }, "f") => *f = value,
            (Transform::Translate { tx, .. }, "tx") => *tx = value,
            (Transform::Translate { ty, .. }, "ty") => *ty = Some(value),
            (Transform::Scale { sx, .. }, "sx") => *sx = value,
            (Transform::Scale { sy, .. }, "sy") => *sy = Some(value),
            (Transform::Rotate { angle, .. }, "angle") => *angle = value,
            (Transform::Rotate { center, .. }, "cx") => {
                center.get_or_insert(Pt::new(0.0, 0.0)).x = value;
            }
            (Transform::Rotate { center, .. }, "cy") => {
                center.get_or_insert(Pt::new(0.0, 0.0)).y = value;
            }
            (Transform::SkewX { angle }, "angle") => *angle = value,
            (Transform::SkewY { angle }, "angle") => *angle = value,
            _ => return Err(self.undeclared(field)),
        }
        Ok(())
    }

    /// Declared parameter names of this variant, including optionals
    pub fn fields(&self) -> &'static [&'static str] {
        self.field_names()
    }

    /// Render as one `name(v1,v2,...)` item of a transform attribute
    pub fn to_attr(&self) -> String {
        let params: Vec<String> = self.params().iter().map(|v| fmt_number(*v)).collect();
        format!("{}({})", self.label(), params.join(","))
    }
}

/// Join transforms into a space-separated `transform` attribute value,
/// applied left to right
pub fn render_transforms(transforms: &[Transform]) -> String {
    transforms
        .iter()
        .map(Transform::to_attr)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_single_and_pair() {
        assert_eq!(Transform::translate(10.0).to_attr(), "translate(10)");
        assert_eq!(
            Transform::translate_xy(10.0, -5.5).to_attr(),
            "translate(10,-5.5)"
        );
    }

    #[test]
    fn test_scale_optional_sy() {
        assert_eq!(Transform::scale(2.0).to_attr(), "scale(2)");
        assert_eq!(Transform::scale_xy(2.0, 0.5).to_attr(), "scale(2,0.5)");
    }

    #[test]
    fn test_rotate_with_center() {
        assert_eq!(Transform::rotate(45.0).to_attr(), "rotate(45)");
        assert_eq!(
            Transform::rotate_about(45.0, Pt::new(100.0, 200.0)).to_attr(),
            "rotate(45,100,200)"
        );
    }

    #[test]
    fn test_matrix_and_skews() {
        assert_eq!(
            Transform::matrix(1.0, 0.0, 0.0, 1.0, 30.0, 40.0).to_attr(),
            "matrix(1,0,0,1,30,40)"
        );
        assert_eq!(Transform::skew_x(12.0).to_attr(), "skewX(12)");
        assert_eq!(Transform::skew_y(-3.0).to_attr(), "skewY(-3)");
    }

    #[test]
    fn test_value_access_by_name() {
        let t = Transform::translate_xy(7.0, 8.0);
        assert_eq!(t.value("tx").unwrap(), Some(7.0));
        assert_eq!(t.value("ty").unwrap(), Some(8.0));
        assert_eq!(Transform::translate(7.0).value("ty").unwrap(), None);
        assert!(matches!(
            t.value("angle"),
            Err(Error::UndeclaredTransformField { name: "translate", .. })
        ));
    }

    #[test]
    fn test_set_value_materializes_center() {
        let mut t = Transform::rotate(30.0);
        t.set_value("cx", 50.0).unwrap();
        assert_eq!(t.to_attr(), "rotate(30,50,0)");
        t.set_value("cy", 60.0).unwrap();
        assert_eq!(t.to_attr(), "rotate(30,50,60)");
    }

    #[test]
    fn test_set_value_undeclared() {
        let mut t = Transform::skew_x(10.0);
        assert!(matches!(
            t.set_value("sx", 1.0),
            Err(Error::UndeclaredTransformField { name: "skewX", .. })
        ));
    }

    #[test]
    fn test_render_transforms_space_joined() {
        let list = [
            Transform::translate_xy(10.0, 20.0),
            Transform::rotate(90.0),
            Transform::scale(2.0),
        ];
        assert_eq!(
            render_transforms(&list),
            "translate(10,20) rotate(90) scale(2)"
        );
    }
}
