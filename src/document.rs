//! The SVG document: root element, id allocation, the reserved `defs`
//! container, style rules and serialization.

use std::collections::BTreeMap;
use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;

use crate::attrs::{FieldSpec, WriteAttributes};
use crate::error::{Error, Result};
use crate::geom::{fmt_number, Envelope, Pt};
use crate::paint::StyleSource;
use crate::path::{render_path, PathCommand};
use crate::stylesheet::Stylesheet;
use crate::transform::{render_transforms, Transform};
use crate::units::{Unit, UnitValues};
use crate::xml::{NodeId, TextContent, XmlNode, XmlTree};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

const DOCTYPE_SVG: &str = concat!(
    "svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" ",
    "\"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\""
);

static RECT_SPEC: FieldSpec = FieldSpec {
    name: "rect",
    fields: &["x", "y", "width", "height"],
};

static CIRCLE_SPEC: FieldSpec = FieldSpec {
    name: "circle",
    fields: &["cx", "cy", "r"],
};

static ELLIPSE_SPEC: FieldSpec = FieldSpec {
    name: "ellipse",
    fields: &["cx", "cy", "rx", "ry"],
};

static LINE_SPEC: FieldSpec = FieldSpec {
    name: "line",
    fields: &["x1", "y1", "x2", "y2"],
};

static VIEWBOX_SPEC: FieldSpec = FieldSpec {
    name: "viewBox",
    fields: &["viewBox"],
};

fn numbers_to_strings(values: &[f64]) -> Vec<String> {
    values.iter().map(|v| fmt_number(*v)).collect()
}

/// Rectangle parameters for the root `<svg>` element or a `<rect>`
#[derive(Debug, Clone, PartialEq)]
pub struct Rect(UnitValues);

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self(UnitValues::from_values_with_defaults(
            &RECT_SPEC,
            &numbers_to_strings(&[x, y, width, height]),
            &["0"],
        ))
    }

    pub fn from_env(env: &Envelope) -> Self {
        let [x, y, w, h] = env.rect_params();
        Self::new(x, y, w, h)
    }

    /// The whole-viewport rectangle: origin 0,0 and 100% dimensions
    pub fn full() -> Self {
        let mut rect = Self::new(0.0, 0.0, 100.0, 100.0);
        rect.0.set_unit(Unit::Percent);
        rect
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.0.set_unit(unit);
        self
    }

    pub fn values(&self) -> &UnitValues {
        &self.0
    }
}

impl WriteAttributes for Rect {
    fn write_attributes(&self, node: &mut XmlNode) {
        self.0.write_attributes(node);
    }
}

/// Circle parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Circle(UnitValues);

impl Circle {
    pub fn new(cx: f64, cy: f64, r: f64) -> Self {
        Self(UnitValues::from_values_with_defaults(
            &CIRCLE_SPEC,
            &numbers_to_strings(&[cx, cy, r]),
            &["0"],
        ))
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.0.set_unit(unit);
        self
    }

    pub fn values(&self) -> &UnitValues {
        &self.0
    }
}

impl WriteAttributes for Circle {
    fn write_attributes(&self, node: &mut XmlNode) {
        self.0.write_attributes(node);
    }
}

/// Ellipse parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse(UnitValues);

impl Ellipse {
    pub fn new(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        Self(UnitValues::from_values_with_defaults(
            &ELLIPSE_SPEC,
            &numbers_to_strings(&[cx, cy, rx, ry]),
            &["0"],
        ))
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.0.set_unit(unit);
        self
    }

    pub fn values(&self) -> &UnitValues {
        &self.0
    }
}

impl WriteAttributes for Ellipse {
    fn write_attributes(&self, node: &mut XmlNode) {
        self.0.write_attributes(node);
    }
}

/// Line segment parameters
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment(UnitValues);

impl LineSegment {
    pub fn new(p1: Pt, p2: Pt) -> Self {
        Self(UnitValues::from_values_with_defaults(
            &LINE_SPEC,
            &numbers_to_strings(&[p1.x, p1.y, p2.x, p2.y]),
            &["0"],
        ))
    }

    pub fn values(&self) -> &UnitValues {
        &self.0
    }
}

impl WriteAttributes for LineSegment {
    fn write_attributes(&self, node: &mut XmlNode) {
        self.0.write_attributes(node);
    }
}

/// A `viewBox` attribute value, derived from rectangle parameters with the
/// unit suffixes stripped
#[derive(Debug, Clone, PartialEq)]
pub struct ViewBox(UnitValues);

impl ViewBox {
    pub fn new(minx: f64, miny: f64, width: f64, height: f64) -> Self {
        Self::from_rect(&Rect::new(minx, miny, width, height), None)
    }

    /// Clone the rectangle's stripped values, optionally scaled and rounded
    pub fn from_rect(rect: &Rect, scale: Option<f64>) -> Self {
        let parts: Vec<String> = match scale {
            Some(s) => rect
                .values()
                .stripped_values()
                .iter()
                .filter_map(|v| v.parse::<f64>().ok())
                .map(|v| fmt_number((v * s).round()))
                .collect(),
            None => rect.values().stripped_values(),
        };
        let content = parts.join(" ");
        Self(UnitValues::from_values(&VIEWBOX_SPEC, &[content]))
    }

    pub fn to_attr(&self) -> String {
        // the single declared field is always set by construction
        self.0
            .get("viewBox")
            .ok()
            .flatten()
            .unwrap_or_default()
            .to_string()
    }
}

impl WriteAttributes for ViewBox {
    fn write_attributes(&self, node: &mut XmlNode) {
        self.0.write_attributes(node);
    }
}

/// A stop of a linear gradient
#[derive(Debug, Clone)]
pub struct GradientStop {
    pub offset: String,
    pub color: String,
    pub opacity: Option<f64>,
}

impl GradientStop {
    pub fn new(offset: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            offset: offset.into(),
            color: color.into(),
            opacity: None,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// An element staged for insertion into a [`Document`].
///
/// Attributes accumulate on a detached node; attaching hands the node to
/// the document, which allocates an id if none was requested.
#[derive(Debug, Clone)]
pub struct SvgElement {
    node: XmlNode,
    requested_id: Option<String>,
}

impl SvgElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            node: XmlNode::new(tag),
            requested_id: None,
        }
    }

    pub fn group() -> Self {
        Self::new("g")
    }

    pub fn rect(params: Rect) -> Self {
        Self::new("rect").with(&params)
    }

    pub fn circle(params: Circle) -> Self {
        Self::new("circle").with(&params)
    }

    pub fn ellipse(params: Ellipse) -> Self {
        Self::new("ellipse").with(&params)
    }

    pub fn line(params: LineSegment) -> Self {
        Self::new("line").with(&params)
    }

    pub fn polygon(points: &[Pt]) -> Self {
        let list = points
            .iter()
            .map(|p| format!("{},{}", fmt_number(p.x), fmt_number(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        let mut el = Self::new("polygon");
        el.node.set_attr("points", list);
        el
    }

    pub fn path(commands: &[PathCommand]) -> Self {
        Self::path_data(render_path(commands))
    }

    pub fn path_data(d: impl Into<String>) -> Self {
        let mut el = Self::new("path");
        el.node.set_attr("d", d);
        el
    }

    pub fn text(position: Pt, content: impl Into<String>) -> Self {
        let mut el = Self::new("text");
        el.node.set_attr("x", fmt_number(position.x));
        el.node.set_attr("y", fmt_number(position.y));
        el.node.set_text(content);
        el
    }

    /// A `<use>` referencing another element by id
    pub fn use_ref(position: Pt, ref_id: &str) -> Self {
        let mut el = Self::new("use");
        el.node.set_attr("xlink:href", format!("#{}", ref_id));
        el.node.set_attr("x", fmt_number(position.x));
        el.node.set_attr("y", fmt_number(position.y));
        el
    }

    pub fn image(rect: Rect, href: impl Into<String>) -> Self {
        let mut el = Self::new("image").with(&rect);
        el.node.set_attr("xlink:href", href);
        el
    }

    /// Apply an attribute writer (shape parameters, paint, text attrs)
    pub fn with(mut self, attrs: &impl WriteAttributes) -> Self {
        attrs.write_attributes(&mut self.node);
        self
    }

    /// Request a specific id instead of an allocated one
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.requested_id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.node.set_attr("class", class);
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.node.set_attr(key, value);
        self
    }

    pub fn with_transforms(mut self, transforms: &[Transform]) -> Self {
        self.node.set_attr("transform", render_transforms(transforms));
        self
    }

    pub fn with_text(mut self, content: impl Into<String>) -> Self {
        self.node.set_text(content);
        self
    }

    pub fn tag(&self) -> &str {
        self.node.tag()
    }

    /// Id allocation prefix: the first three tag characters, title-cased
    fn id_prefix(&self) -> String {
        let mut prefix = String::new();
        for (i, c) in self.node.tag().chars().take(3).enumerate() {
            if i == 0 {
                prefix.extend(c.to_uppercase());
            } else {
                prefix.extend(c.to_lowercase());
            }
        }
        prefix
    }
}

/// Handle to an element attached to a [`Document`].
///
/// Handles are only handed out by attachment; document methods reject
/// handles that fall outside their own tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRef(NodeId);

/// Serialization switches for [`Document::to_string`]
#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
    declaration: bool,
    doctype: bool,
    pretty: bool,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_declaration(mut self, on: bool) -> Self {
        self.declaration = on;
        self
    }

    pub fn with_doctype(mut self, on: bool) -> Self {
        self.doctype = on;
        self
    }

    pub fn with_pretty(mut self, on: bool) -> Self {
        self.pretty = on;
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            declaration: false,
            doctype: false,
            pretty: true,
        }
    }
}

const RESERVED_TAGS: &[&str] = &["defs"];

/// An SVG document under construction.
///
/// The root `<svg>` carries the construction rectangle and the namespace
/// declarations. Every attached element gets an id, allocated as a
/// tag-derived prefix plus a per-document serial when none was requested.
/// The `defs` container is managed internally and cannot be added directly.
#[derive(Debug, Clone)]
pub struct Document {
    tree: XmlTree,
    rect: Rect,
    id_serial: u64,
    styles: BTreeMap<String, BTreeMap<String, String>>,
    defs: Option<NodeId>,
    style_node: Option<NodeId>,
}

impl Document {
    pub fn new(rect: Rect) -> Self {
        let mut tree = XmlTree::new("svg");
        let root = tree.root();
        let node = tree.node_mut(root);
        node.set_attr("version", "1.1");
        node.set_attr("xmlns", SVG_NAMESPACE);
        node.set_attr("xmlns:xlink", XLINK_NAMESPACE);
        rect.write_attributes(node);
        Self {
            tree,
            rect,
            id_serial: 0,
            styles: BTreeMap::new(),
            defs: None,
            style_node: None,
        }
    }

    pub fn with_viewbox(mut self, viewbox: ViewBox) -> Self {
        self.set_viewbox(&viewbox);
        self
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn root(&self) -> ElementRef {
        ElementRef(self.tree.root())
    }

    pub fn set_viewbox(&mut self, viewbox: &ViewBox) {
        let root = self.tree.root();
        viewbox.write_attributes(self.tree.node_mut(root));
    }

    /// Derive the viewbox from the construction rectangle, optionally
    /// scaled
    pub fn set_identity_viewbox(&mut self, scale: Option<f64>) {
        self.set_viewbox(&ViewBox::from_rect(&self.rect, scale));
    }

    fn next_id_serial(&mut self) -> u64 {
        let serial = self.id_serial;
        self.id_serial += 1;
        serial
    }

    fn checked(&self, elem: ElementRef) -> Result<NodeId> {
        if self.tree.contains(elem.0) {
            Ok(elem.0)
        } else {
            Err(Error::NotAttached)
        }
    }

    /// Attach an element under the root
    pub fn add(&mut self, element: SvgElement) -> Result<ElementRef> {
        let root = self.root();
        self.add_child(root, element)
    }

    /// Attach an element under `parent`. Reserved tags are rejected; an
    /// element without a requested id gets `<Prefix><serial>` appended
    /// after its other attributes.
    pub fn add_child(&mut self, parent: ElementRef, element: SvgElement) -> Result<ElementRef> {
        let parent = self.checked(parent)?;
        if RESERVED_TAGS.contains(&element.tag()) {
            return Err(Error::ReservedTag(element.tag().to_string()));
        }
        Ok(ElementRef(self.attach(parent, element)))
    }

    fn attach(&mut self, parent: NodeId, element: SvgElement) -> NodeId {
        let id_value = match &element.requested_id {
            Some(id) => id.clone(),
            None => format!("{}{}", element.id_prefix(), self.next_id_serial()),
        };
        let SvgElement { node, .. } = element;
        let id = self.tree.add_element(parent, node.tag());
        let slot = self.tree.node_mut(id);
        for (key, value) in node.attributes() {
            slot.set_attr(key, value);
        }
        if let Some(text) = node.text() {
            match text {
                TextContent::Plain(t) => slot.set_text(t.clone()),
                TextContent::CData(t) => slot.set_cdata(t.clone()),
            }
        }
        if !slot.has_attr("id") {
            slot.set_attr("id", id_value);
        }
        id
    }

    fn ensure_defs(&mut self) -> NodeId {
        match self.defs {
            Some(id) => id,
            None => {
                let root = self.tree.root();
                let id = self.tree.add_element(root, "defs");
                self.defs = Some(id);
                id
            }
        }
    }

    /// Attach an element inside the managed `defs` container
    pub fn add_to_defs(&mut self, element: SvgElement) -> Result<ElementRef> {
        if RESERVED_TAGS.contains(&element.tag()) {
            return Err(Error::ReservedTag(element.tag().to_string()));
        }
        let defs = self.ensure_defs();
        Ok(ElementRef(self.attach(defs, element)))
    }

    pub fn id(&self, elem: ElementRef) -> Result<Option<&str>> {
        Ok(self.tree.node(self.checked(elem)?).attr("id"))
    }

    pub fn has_id(&self, elem: ElementRef) -> Result<bool> {
        Ok(self.id(elem)?.is_some())
    }

    pub fn set_id(&mut self, elem: ElementRef, id: impl Into<String>) -> Result<()> {
        let node = self.checked(elem)?;
        self.tree.node_mut(node).set_attr("id", id);
        Ok(())
    }

    /// `#id` CSS selector for an attached element
    pub fn id_selector(&self, elem: ElementRef) -> Result<String> {
        match self.id(elem)? {
            Some(id) => Ok(format!("#{}", id)),
            None => Err(Error::NotAttached),
        }
    }

    pub fn class(&self, elem: ElementRef) -> Result<Option<&str>> {
        Ok(self.tree.node(self.checked(elem)?).attr("class"))
    }

    pub fn set_class(&mut self, elem: ElementRef, class: impl Into<String>) -> Result<()> {
        let node = self.checked(elem)?;
        self.tree.node_mut(node).set_attr("class", class);
        Ok(())
    }

    pub fn attribute(&self, elem: ElementRef, key: &str) -> Result<Option<&str>> {
        Ok(self.tree.node(self.checked(elem)?).attr(key))
    }

    pub fn set_attribute(
        &mut self,
        elem: ElementRef,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let node = self.checked(elem)?;
        self.tree.node_mut(node).set_attr(key, value);
        Ok(())
    }

    /// Apply an attribute writer to an attached element
    pub fn apply(&mut self, elem: ElementRef, attrs: &impl WriteAttributes) -> Result<()> {
        let node = self.checked(elem)?;
        attrs.write_attributes(self.tree.node_mut(node));
        Ok(())
    }

    pub fn set_transforms(&mut self, elem: ElementRef, transforms: &[Transform]) -> Result<()> {
        let node = self.checked(elem)?;
        self.tree
            .node_mut(node)
            .set_attr("transform", render_transforms(transforms));
        Ok(())
    }

    /// Merge a style source's properties into the rule for `selector`
    pub fn add_style_rule(&mut self, selector: impl Into<String>, source: &impl StyleSource) {
        let rule = self.styles.entry(selector.into()).or_default();
        source.contribute(rule);
    }

    pub fn add_style_property(
        &mut self,
        selector: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.styles
            .entry(selector.into())
            .or_default()
            .insert(property.into(), value.into());
    }

    /// Merge every rule of a stylesheet into the document's style rules
    pub fn merge_stylesheet(&mut self, sheet: &Stylesheet) {
        for (selector, props) in sheet.rules() {
            let rule = self.styles.entry(selector.clone()).or_default();
            for (property, value) in props {
                rule.insert(property.clone(), value.clone());
            }
        }
    }

    pub fn style_rules(&self) -> &BTreeMap<String, BTreeMap<String, String>> {
        &self.styles
    }

    /// Create a `<filter>` in `defs`, sized to overflow its target
    pub fn add_filter(&mut self) -> Result<ElementRef> {
        let filter = SvgElement::new("filter")
            .with_attr("width", "150%")
            .with_attr("height", "150%");
        self.add_to_defs(filter)
    }

    fn add_fe(&mut self, filter: ElementRef, tag: &str) -> Result<NodeId> {
        let parent = self.checked(filter)?;
        Ok(self.tree.add_element(parent, tag))
    }

    pub fn fe_offset(
        &mut self,
        filter: ElementRef,
        dx: f64,
        dy: f64,
        input: &str,
        result: &str,
    ) -> Result<()> {
        let fe = self.add_fe(filter, "feOffset")?;
        let node = self.tree.node_mut(fe);
        node.set_attr("dx", fmt_number(dx));
        node.set_attr("dy", fmt_number(dy));
        node.set_attr("in", input);
        node.set_attr("result", result);
        Ok(())
    }

    pub fn fe_blend(
        &mut self,
        filter: ElementRef,
        input: &str,
        input2: &str,
        mode: &str,
    ) -> Result<()> {
        let fe = self.add_fe(filter, "feBlend")?;
        let node = self.tree.node_mut(fe);
        node.set_attr("in", input);
        node.set_attr("in2", input2);
        node.set_attr("mode", mode);
        Ok(())
    }

    pub fn fe_gaussian_blur(
        &mut self,
        filter: ElementRef,
        input: &str,
        result: &str,
        std_deviation: f64,
    ) -> Result<()> {
        let fe = self.add_fe(filter, "feGaussianBlur")?;
        let node = self.tree.node_mut(fe);
        node.set_attr("in", input);
        node.set_attr("result", result);
        node.set_attr("stdDeviation", fmt_number(std_deviation));
        Ok(())
    }

    /// Create a `<linearGradient>` in `defs` with the given stops. The
    /// gradient vector is only written when both endpoints are given.
    pub fn add_linear_gradient(
        &mut self,
        orig: Option<Pt>,
        dest: Option<Pt>,
        stops: &[GradientStop],
    ) -> Result<ElementRef> {
        let mut gradient = SvgElement::new("linearGradient");
        if let (Some(o), Some(d)) = (orig, dest) {
            gradient = gradient
                .with_attr("x1", fmt_number(o.x))
                .with_attr("y1", fmt_number(o.y))
                .with_attr("x2", fmt_number(d.x))
                .with_attr("y2", fmt_number(d.y));
        }
        let gradient_ref = self.add_to_defs(gradient)?;
        let parent = self.checked(gradient_ref)?;
        for stop in stops {
            let id = self.tree.add_element(parent, "stop");
            let node = self.tree.node_mut(id);
            node.set_attr("offset", stop.offset.clone());
            node.set_attr("stop-color", stop.color.clone());
            if let Some(opacity) = stop.opacity {
                node.set_attr("stop-opacity", fmt_number(opacity));
            }
        }
        Ok(gradient_ref)
    }

    /// A `<text>` whose glyphs run along an already attached path.
    /// `start_offset` is a percentage along the path; `dy` shifts the
    /// glyphs off the path through a nested `<tspan>`.
    pub fn add_text_along_path(
        &mut self,
        content: impl Into<String>,
        path: ElementRef,
        start_offset: f64,
        dy: Option<f64>,
    ) -> Result<ElementRef> {
        let href = self.id_selector(path)?;
        let text_ref = self.add(SvgElement::new("text"))?;
        let text_node = self.checked(text_ref)?;
        let text_path = self.tree.add_element(text_node, "textPath");
        {
            let node = self.tree.node_mut(text_path);
            node.set_attr("xlink:href", href);
            node.set_attr("startOffset", format!("{}%", fmt_number(start_offset)));
        }
        match dy {
            Some(dy) => {
                let tspan = self.tree.add_element(text_path, "tspan");
                let node = self.tree.node_mut(tspan);
                node.set_attr("dy", fmt_number(dy));
                node.set_text(content);
            }
            None => self.tree.node_mut(text_path).set_text(content),
        }
        Ok(text_ref)
    }

    fn render_css(&self) -> String {
        let mut out = String::new();
        for (selector, props) in &self.styles {
            out.push_str(selector);
            out.push_str(" {\n");
            for (property, value) in props {
                out.push_str(&format!("\t{}: {};\n", property, value));
            }
            out.push_str("}\n");
        }
        out
    }

    /// Materialize the accumulated style rules as the single `<style>`
    /// child of `defs`. Idempotent: re-rendering replaces the block.
    pub fn prepare_rendering(&mut self) {
        if self.styles.is_empty() {
            return;
        }
        let css = self.render_css();
        let style = match self.style_node {
            Some(id) => id,
            None => {
                let defs = self.ensure_defs();
                let id = self.tree.add_element(defs, "style");
                self.tree.node_mut(id).set_attr("type", "text/css");
                self.style_node = Some(id);
                id
            }
        };
        self.tree.node_mut(style).set_cdata(css);
    }

    pub fn to_bytes(&mut self, options: &WriteOptions) -> Result<Vec<u8>> {
        self.prepare_rendering();
        let cursor = Cursor::new(Vec::new());
        let mut writer = if options.pretty {
            Writer::new_with_indent(cursor, b' ', 2)
        } else {
            Writer::new(cursor)
        };
        if options.declaration {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", None, Some("no"))))?;
        }
        if options.doctype {
            writer.write_event(Event::DocType(BytesText::from_escaped(DOCTYPE_SVG)))?;
        }
        self.tree.write_node(&mut writer, self.tree.root())?;
        Ok(writer.into_inner().into_inner())
    }

    pub fn to_string(&mut self, options: &WriteOptions) -> Result<String> {
        Ok(String::from_utf8(self.to_bytes(options)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{Fill, Stroke};

    fn flat(doc: &mut Document) -> String {
        doc.to_string(&WriteOptions::new().with_pretty(false)).unwrap()
    }

    #[test]
    fn test_auto_id_allocation() {
        let mut doc = Document::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let c = doc.add(SvgElement::circle(Circle::new(10.0, 10.0, 5.0))).unwrap();
        let r = doc.add(SvgElement::rect(Rect::new(0.0, 0.0, 4.0, 4.0))).unwrap();
        let g = doc.add(SvgElement::group()).unwrap();
        assert_eq!(doc.id(c).unwrap(), Some("Cir0"));
        assert_eq!(doc.id(r).unwrap(), Some("Rec1"));
        assert_eq!(doc.id(g).unwrap(), Some("G2"));
    }

    #[test]
    fn test_requested_id_wins() {
        let mut doc = Document::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let c = doc
            .add(SvgElement::circle(Circle::new(1.0, 1.0, 1.0)).with_id("anchor"))
            .unwrap();
        assert_eq!(doc.id(c).unwrap(), Some("anchor"));
        assert_eq!(doc.id_selector(c).unwrap(), "#anchor");
        // the serial was not consumed
        let next = doc.add(SvgElement::group()).unwrap();
        assert_eq!(doc.id(next).unwrap(), Some("G0"));
    }

    #[test]
    fn test_defs_tag_reserved() {
        let mut doc = Document::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let err = doc.add(SvgElement::new("defs")).unwrap_err();
        assert!(matches!(err, Error::ReservedTag(ref tag) if tag == "defs"));
    }

    #[test]
    fn test_root_namespaces_and_rect() {
        let mut doc = Document::new(Rect::new(0.0, 3.0, 100.0, 200.0).with_unit(Unit::Px));
        let out = flat(&mut doc);
        assert!(out.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
        assert!(out.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));
        assert!(out.contains(r#"width="100px""#));
        assert!(out.contains(r#"y="3px""#));
        assert!(out.contains(r#"x="0""#));
    }

    #[test]
    fn test_identity_viewbox_scaled() {
        let mut doc = Document::new(Rect::new(0.0, 3.0, 100.0, 200.0).with_unit(Unit::Px));
        doc.set_identity_viewbox(Some(10.0));
        let out = flat(&mut doc);
        assert!(out.contains(r#"viewBox="0 30 1000 2000""#));
    }

    #[test]
    fn test_full_rect_percent() {
        let mut doc = Document::new(Rect::full());
        let out = flat(&mut doc);
        assert!(out.contains(r#"width="100%""#));
        assert!(out.contains(r#"height="100%""#));
    }

    #[test]
    fn test_style_block_rendered_once() {
        let mut doc = Document::new(Rect::full());
        doc.add_style_rule("rect", &Fill::new("#112233"));
        doc.add_style_rule("rect", &Stroke::new("black").width(2));
        let first = flat(&mut doc);
        assert!(first.contains("<defs><style type=\"text/css\"><![CDATA["));
        assert!(first.contains("rect {\n\tfill: #112233;\n\tstroke: black;\n\tstroke-width: 2;\n}\n"));
        // second render replaces, not duplicates, the style block
        doc.add_style_property("circle", "fill", "none");
        let second = flat(&mut doc);
        assert_eq!(second.matches("<style").count(), 1);
        assert!(second.contains("circle {\n\tfill: none;\n}\n"));
    }

    #[test]
    fn test_declaration_and_doctype() {
        let mut doc = Document::new(Rect::full());
        let out = doc
            .to_string(
                &WriteOptions::new()
                    .with_declaration(true)
                    .with_doctype(true)
                    .with_pretty(false),
            )
            .unwrap();
        assert!(out.starts_with(r#"<?xml version="1.0" standalone="no"?>"#));
        assert!(out.contains("<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\""));
    }

    #[test]
    fn test_add_to_defs_and_use() {
        let mut doc = Document::new(Rect::full());
        let proto = doc
            .add_to_defs(SvgElement::circle(Circle::new(0.0, 0.0, 5.0)).with_id("dot"))
            .unwrap();
        assert_eq!(doc.id(proto).unwrap(), Some("dot"));
        doc.add(SvgElement::use_ref(Pt::new(20.0, 30.0), "dot")).unwrap();
        let out = flat(&mut doc);
        assert!(out.contains(r#"<defs><circle cx="0" cy="0" r="5" id="dot"/></defs>"#));
        assert!(out.contains(r##"xlink:href="#dot""##));
    }

    #[test]
    fn test_detached_handle_rejected() {
        let mut small = Document::new(Rect::full());
        let mut big = Document::new(Rect::full());
        let a = big.add(SvgElement::group()).unwrap();
        let b = big.add(SvgElement::group()).unwrap();
        let _ = a;
        assert!(matches!(small.id(b), Err(Error::NotAttached)));
        assert!(matches!(
            small.set_class(b, "x"),
            Err(Error::NotAttached)
        ));
    }

    #[test]
    fn test_apply_and_transforms() {
        let mut doc = Document::new(Rect::full());
        let r = doc.add(SvgElement::rect(Rect::new(1.0, 1.0, 10.0, 10.0))).unwrap();
        doc.apply(r, &Fill::new("red")).unwrap();
        doc.set_transforms(r, &[Transform::rotate(45.0), Transform::scale(2.0)])
            .unwrap();
        let out = flat(&mut doc);
        assert!(out.contains(r#"fill="red""#));
        assert!(out.contains(r#"transform="rotate(45) scale(2)""#));
    }

    #[test]
    fn test_filter_pipeline() {
        let mut doc = Document::new(Rect::full());
        let flt = doc.add_filter().unwrap();
        doc.fe_offset(flt, 6.0, 6.0, "SourceGraphic", "offOut").unwrap();
        doc.fe_gaussian_blur(flt, "offOut", "blurOut", 6.0).unwrap();
        doc.fe_blend(flt, "SourceGraphic", "blurOut", "normal").unwrap();
        let out = flat(&mut doc);
        assert!(out.contains(r#"<filter width="150%" height="150%" id="Fil0">"#));
        assert!(out.contains(r#"<feOffset dx="6" dy="6" in="SourceGraphic" result="offOut"/>"#));
        assert!(out.contains(r#"<feGaussianBlur in="offOut" result="blurOut" stdDeviation="6"/>"#));
        assert!(out.contains(r#"<feBlend in="SourceGraphic" in2="blurOut" mode="normal"/>"#));
    }

    #[test]
    fn test_linear_gradient_stops() {
        let mut doc = Document::new(Rect::full());
        let grad = doc
            .add_linear_gradient(
                Some(Pt::new(0.0, 0.0)),
                Some(Pt::new(1.0, 0.0)),
                &[
                    GradientStop::new("0%", "gold"),
                    GradientStop::new("100%", "red").with_opacity(0.5),
                ],
            )
            .unwrap();
        assert_eq!(doc.id(grad).unwrap(), Some("Lin0"));
        let out = flat(&mut doc);
        assert!(out.contains(r#"<linearGradient x1="0" y1="0" x2="1" y2="0" id="Lin0">"#));
        assert!(out.contains(r#"<stop offset="0%" stop-color="gold"/>"#));
        assert!(out.contains(r#"<stop offset="100%" stop-color="red" stop-opacity="0.5"/>"#));
    }

    #[test]
    fn test_text_along_path() {
        use crate::path::{PathCommand, PathOp};

        let mut doc = Document::new(Rect::full());
        let arc = doc
            .add(SvgElement::path(&[
                PathCommand::absolute(PathOp::Move { x: 10.0, y: 100.0 }),
                PathCommand::absolute(PathOp::Quadratic {
                    x1: 100.0,
                    y1: 10.0,
                    x: 190.0,
                    y: 100.0,
                }),
            ]))
            .unwrap();
        doc.add_text_along_path("curved label", arc, 40.0, Some(-4.0)).unwrap();
        let out = flat(&mut doc);
        assert!(out.contains(r#"d="M10 100Q100 10 190 100""#));
        assert!(out.contains(r##"<textPath xlink:href="#Pat0" startOffset="40%">"##));
        assert!(out.contains(r#"<tspan dy="-4">curved label</tspan>"#));
    }

    #[test]
    fn test_nested_groups() {
        let mut doc = Document::new(Rect::full());
        let outer = doc.add(SvgElement::group().with_class("layer")).unwrap();
        let inner = doc.add_child(outer, SvgElement::group()).unwrap();
        doc.add_child(inner, SvgElement::circle(Circle::new(1.0, 2.0, 3.0))).unwrap();
        assert_eq!(doc.class(outer).unwrap(), Some("layer"));
        let out = flat(&mut doc);
        assert!(out.contains(r#"<g class="layer" id="G0"><g id="G1"><circle cx="1" cy="2" r="3" id="Cir2"/></g></g>"#));
    }
}
