//! Arena-backed XML element tree.
//!
//! Nodes are owned by the tree and addressed by [`NodeId`], so parents and
//! children never alias. Serialization walks the arena recursively and emits
//! `quick-xml` writer events; childless, textless elements collapse to the
//! empty-element form.

use std::io::Cursor;

use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;

/// Index of a node inside its owning [`XmlTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Element text payload
#[derive(Debug, Clone, PartialEq)]
pub enum TextContent {
    Plain(String),
    CData(String),
}

/// One element: tag, ordered attributes, child ids and optional text
#[derive(Debug, Clone)]
pub struct XmlNode {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<NodeId>,
    text: Option<TextContent>,
}

impl XmlNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing in place so first-set order is stable
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        let idx = self.attrs.iter().position(|(k, _)| k == key)?;
        Some(self.attrs.remove(idx).1)
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attr(key).is_some()
    }

    /// Attribute names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attrs.iter().map(|(k, _)| k.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(TextContent::Plain(text.into()));
    }

    pub fn set_cdata(&mut self, text: impl Into<String>) {
        self.text = Some(TextContent::CData(text.into()));
    }

    pub fn text(&self) -> Option<&TextContent> {
        self.text.as_ref()
    }
}

/// The arena. The root is created with the tree and cannot be removed.
#[derive(Debug, Clone)]
pub struct XmlTree {
    nodes: Vec<XmlNode>,
}

impl XmlTree {
    pub fn new(root_tag: impl Into<String>) -> Self {
        Self {
            nodes: vec![XmlNode::new(root_tag)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &XmlNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut XmlNode {
        &mut self.nodes[id.0]
    }

    /// Append a fresh element under `parent` and return its id
    pub fn add_element(&mut self, parent: NodeId, tag: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(XmlNode::new(tag));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Detach all children of `id`. The detached nodes stay in the arena
    /// but are no longer reachable from the root.
    pub fn clear_children(&mut self, id: NodeId) {
        self.nodes[id.0].children.clear();
    }

    /// Depth-first count of elements reachable from the root
    pub fn len(&self) -> usize {
        fn count(tree: &XmlTree, id: NodeId) -> usize {
            1 + tree.node(id).children.iter().map(|c| count(tree, *c)).sum::<usize>()
        }
        count(self, self.root())
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Emit writer events for the subtree rooted at `id`
    pub fn write_node<W: std::io::Write>(
        &self,
        writer: &mut Writer<W>,
        id: NodeId,
    ) -> Result<()> {
        let node = self.node(id);
        let mut start = BytesStart::new(node.tag.as_str());
        for (key, value) in node.attributes() {
            start.push_attribute((key, value));
        }
        if node.children.is_empty() && node.text.is_none() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }
        writer.write_event(Event::Start(start))?;
        match &node.text {
            Some(TextContent::Plain(text)) => {
                writer.write_event(Event::Text(BytesText::new(text)))?;
            }
            Some(TextContent::CData(text)) => {
                writer.write_event(Event::CData(BytesCData::new(text.as_str())))?;
            }
            None => {}
        }
        for child in &node.children {
            self.write_node(writer, *child)?;
        }
        writer.write_event(Event::End(BytesEnd::new(node.tag.as_str())))?;
        Ok(())
    }

    /// Serialize the whole tree, optionally indented
    pub fn to_bytes(&self, pretty: bool) -> Result<Vec<u8>> {
        let cursor = Cursor::new(Vec::new());
        let mut writer = if pretty {
            Writer::new_with_indent(cursor, b' ', 2)
        } else {
            Writer::new(cursor)
        };
        self.write_node(&mut writer, self.root())?;
        Ok(writer.into_inner().into_inner())
    }

    pub fn to_string(&self, pretty: bool) -> Result<String> {
        Ok(String::from_utf8(self.to_bytes(pretty)?)?)
    }
}
