//! Retained scene graph
//!
//! Components never touch a rendering surface directly: they create shapes
//! through [`SceneHost`] and keep the returned [`NodeId`]s so later updates
//! can rewrite attributes in place.

use std::fmt::Write;

use brushline_core::Result;

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Drawable primitive kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Group,
    Rect,
    Path,
    Text,
}

impl ShapeKind {
    /// SVG tag name
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Group => "g",
            Self::Rect => "rect",
            Self::Path => "path",
            Self::Text => "text",
        }
    }
}

/// Handle to a node created by a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Ordered attribute list plus optional text content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs {
    entries: Vec<(&'static str, String)>,
    text: Option<String>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl ToString) -> Self {
        self.set(name, value);
        self
    }

    /// Set only when `value` is present
    pub fn with_opt(self, name: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Insert or replace, keeping first-insertion order
    pub fn set(&mut self, name: &'static str, value: impl ToString) {
        let value = value.to_string();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(n, v)| (*n, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.text.is_none()
    }

    /// Apply another attribute set on top of this one
    pub fn merge(&mut self, other: &Attrs) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
        if let Some(text) = other.text() {
            self.text = Some(text.to_string());
        }
    }

    /// Rectangle geometry attributes
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new()
            .with("x", x)
            .with("y", y)
            .with("width", width.max(0.0))
            .with("height", height.max(0.0))
    }
}

// ============================================================================
// HOST CONTRACT
// ============================================================================

/// Surface that owns the real nodes behind [`NodeId`]s
pub trait SceneHost {
    /// Create a node; `children` are appended in order
    fn create_shape(&mut self, kind: ShapeKind, attrs: Attrs, children: &[NodeId]) -> Result<NodeId>;

    /// Overwrite the given attributes of an existing node
    fn set_attributes(&mut self, node: NodeId, attrs: &Attrs) -> Result<()>;
}

// ============================================================================
// IN-MEMORY SCENE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub kind: ShapeKind,
    pub attrs: Attrs,
    pub children: Vec<NodeId>,
}

/// Arena-backed host, serializable to SVG markup
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    updates: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).and_then(|n| n.attrs.get(name))
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.attrs.text())
    }

    /// Number of nodes ever created
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of `set_attributes` calls
    pub fn update_count(&self) -> usize {
        self.updates
    }

    /// Descendants of `root` (inclusive) with the given kind, in document order
    pub fn find_all(&self, root: NodeId, kind: ShapeKind) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.walk(root, &mut |id, node| {
            if node.kind == kind {
                found.push(id);
            }
        });
        found
    }

    fn walk(&self, id: NodeId, visit: &mut dyn FnMut(NodeId, &SceneNode)) {
        if let Some(node) = self.node(id) {
            visit(id, node);
            for &child in &node.children {
                self.walk(child, visit);
            }
        }
    }

    /// Serialize `root` as a standalone `<svg>` document
    pub fn to_svg(&self, root: NodeId, width: f64, height: f64) -> String {
        let mut out = String::with_capacity(4096);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        self.write_node(root, &mut out);
        out.push_str("</svg>");
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        let tag = node.kind.tag();
        let _ = write!(out, "<{tag}");
        for (name, value) in node.attrs.iter() {
            let _ = write!(out, r#" {name}="{}""#, escape(value));
        }
        if node.children.is_empty() && node.attrs.text().is_none() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = node.attrs.text() {
            out.push_str(&escape(text));
        }
        for &child in &node.children {
            self.write_node(child, out);
        }
        let _ = write!(out, "</{tag}>");
    }
}

impl SceneHost for Scene {
    fn create_shape(&mut self, kind: ShapeKind, attrs: Attrs, children: &[NodeId]) -> Result<NodeId> {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            kind,
            attrs,
            children: children.to_vec(),
        });
        Ok(id)
    }

    fn set_attributes(&mut self, node: NodeId, attrs: &Attrs) -> Result<()> {
        let target = self
            .nodes
            .get_mut(node.0)
            .ok_or_else(|| brushline_core::ChartError::invalid_input(format!("unknown scene node {}", node.0)))?;
        target.attrs.merge(attrs);
        self.updates += 1;
        Ok(())
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
