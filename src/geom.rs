//! Geometry primitives: points, angle/polar conversion and the bounding
//! envelope accumulator.

/// Sentinel "larger than any real coordinate" value used to seed envelopes.
pub const MAXCOORD: f64 = 99_999_999_999.9;
/// Sentinel "smaller than any real coordinate" value used to seed envelopes.
pub const MINCOORD: f64 = -MAXCOORD;
/// Default coincidence tolerance for coordinate comparisons.
pub const MINDELTA: f64 = 0.001;

/// A 2D point in the SVG coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pt {
    pub x: f64,
    pub y: f64,
}

impl Pt {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: Pt) -> Pt {
        Pt::new(self.x + other.x, self.y + other.y)
    }

    /// Whether both coordinates of `other` are within `tol` of this point's
    pub fn coincides_with(&self, other: Pt, tol: f64) -> bool {
        (self.x - other.x).abs() < tol && (self.y - other.y).abs() < tol
    }
}

/// Angle in degrees of the vector from `a` to `b`.
///
/// Near-vertical vectors map to 90 (pointing to positive y) or 270
/// (negative y). Returns `None` when both deltas are within `MINDELTA` of
/// zero: the direction of a zero-length vector is undefined.
pub fn angle_between(a: Pt, b: Pt) -> Option<f64> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    if dx.abs() < MINDELTA {
        if dy > MINDELTA {
            Some(90.0)
        } else if dy < -MINDELTA {
            Some(270.0)
        } else {
            None
        }
    } else {
        Some((dy / dx).atan().to_degrees())
    }
}

/// Convert polar coordinates (degrees, radius) to a point
pub fn polar_to_rect(angle_deg: f64, radius: f64) -> Pt {
    let rad = angle_deg.to_radians();
    Pt::new(rad.cos() * radius, rad.sin() * radius)
}

/// Whether a string parses as a floating-point number
pub fn is_numeric(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok()
}

/// Format a number, dropping the decimal part when it is integral
pub fn fmt_number(value: f64) -> String {
    let rounded = value.round();
    if rounded == value && value.abs() < 1e15 {
        (rounded as i64).to_string()
    } else {
        value.to_string()
    }
}

/// Axis-aligned bounding box accumulator.
///
/// A fresh envelope holds sentinel extremes so the first accumulated point
/// or envelope always wins the min/max comparison. After at least one
/// accumulation `minx <= maxx` and `miny <= maxy` hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl Envelope {
    pub fn new() -> Self {
        Self {
            minx: MAXCOORD,
            miny: MAXCOORD,
            maxx: MINCOORD,
            maxy: MINCOORD,
        }
    }

    pub fn from_points(points: &[Pt]) -> Self {
        let mut env = Self::new();
        env.define_from_points(points);
        env
    }

    /// Envelope centered on `center` with the given dimensions
    pub fn from_center_and_dims(center: Pt, width: f64, height: f64) -> Self {
        Self {
            minx: center.x - width / 2.0,
            miny: center.y - height / 2.0,
            maxx: center.x + width / 2.0,
            maxy: center.y + height / 2.0,
        }
    }

    /// Reset the bounds to the min/max over `points`. An empty sequence
    /// leaves the envelope unchanged.
    pub fn define_from_points(&mut self, points: &[Pt]) {
        if points.is_empty() {
            return;
        }
        let mut minx = MAXCOORD;
        let mut miny = MAXCOORD;
        let mut maxx = MINCOORD;
        let mut maxy = MINCOORD;
        for pt in points {
            minx = minx.min(pt.x);
            miny = miny.min(pt.y);
            maxx = maxx.max(pt.x);
            maxy = maxy.max(pt.y);
        }
        self.minx = minx;
        self.miny = miny;
        self.maxx = maxx;
        self.maxy = maxy;
    }

    /// Grow the bounds to include `pt`; never shrinks
    pub fn expand_to_point(&mut self, pt: Pt) -> &mut Self {
        self.minx = self.minx.min(pt.x);
        self.miny = self.miny.min(pt.y);
        self.maxx = self.maxx.max(pt.x);
        self.maxy = self.maxy.max(pt.y);
        self
    }

    /// Grow the bounds to include another envelope; never shrinks
    pub fn expand_to_other(&mut self, other: &Envelope) -> &mut Self {
        self.minx = self.minx.min(other.minx);
        self.miny = self.miny.min(other.miny);
        self.maxx = self.maxx.max(other.maxx);
        self.maxy = self.maxy.max(other.maxy);
        self
    }

    /// Recompute all four bounds from the current center with half
    /// dimensions multiplied by `ratio`. Ratio 1 is a no-op, below 1 shrinks.
    pub fn scale_about_center(&mut self, ratio: f64) -> &mut Self {
        let center = self.center();
        let half_width = self.width() * ratio * 0.5;
        let half_height = self.height() * ratio * 0.5;
        self.minx = center.x - half_width;
        self.miny = center.y - half_height;
        self.maxx = center.x + half_width;
        self.maxy = center.y + half_height;
        self
    }

    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }

    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }

    pub fn center(&self) -> Pt {
        Pt::new(self.minx + self.width() / 2.0, self.miny + self.height() / 2.0)
    }

    /// `[minx, miny, width, height]`, the parameter order of an SVG rect
    pub fn rect_params(&self) -> [f64; 4] {
        [self.minx, self.miny, self.width(), self.height()]
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}
