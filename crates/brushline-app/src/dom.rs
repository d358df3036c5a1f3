//! SVG scene host backed by the browser DOM

use brushline_charts::{Attrs, NodeId, SceneHost, ShapeKind};
use brushline_core::{ChartError, Result};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub(crate) fn js_error(context: &str, err: JsValue) -> ChartError {
    ChartError::InvalidHost(format!("{context}: {err:?}"))
}

/// Creates SVG elements and keeps them addressable by [`NodeId`]
#[derive(Debug)]
pub struct DomHost {
    document: Document,
    nodes: Vec<Element>,
}

impl DomHost {
    pub fn new() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ChartError::InvalidHost("no document available".to_string()))?;

        Ok(Self {
            document,
            nodes: Vec::new(),
        })
    }

    /// Top-level `<svg>` sized one user unit per CSS pixel
    pub fn create_surface(&self, width: f64, height: f64) -> Result<Element> {
        let svg = self.create_element("svg")?;
        let attrs = Attrs::new()
            .with("width", width)
            .with("height", height)
            .with("viewBox", format!("0 0 {width} {height}"))
            .with("style", "display: block; touch-action: none; user-select: none");
        write_attrs(&svg, &attrs)?;
        Ok(svg)
    }

    /// Append a created node to a mounted element
    pub fn attach(&self, node: NodeId, parent: &Element) -> Result<()> {
        let element = self.element(node)?;
        parent
            .append_child(element)
            .map_err(|e| js_error("appendChild", e))?;
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn element(&self, id: NodeId) -> Result<&Element> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| ChartError::InvalidHost(format!("unknown node {}", id.0)))
    }

    fn create_element(&self, tag: &str) -> Result<Element> {
        self.document
            .create_element_ns(Some(SVG_NS), tag)
            .map_err(|e| js_error("createElementNS", e))
    }
}

fn write_attrs(element: &Element, attrs: &Attrs) -> Result<()> {
    for (name, value) in attrs.iter() {
        element
            .set_attribute(name, value)
            .map_err(|e| js_error(name, e))?;
    }
    if let Some(text) = attrs.text() {
        element.set_text_content(Some(text));
    }
    Ok(())
}

impl SceneHost for DomHost {
    fn create_shape(&mut self, kind: ShapeKind, attrs: Attrs, children: &[NodeId]) -> Result<NodeId> {
        let element = self.create_element(kind.tag())?;
        write_attrs(&element, &attrs)?;

        for child in children {
            element
                .append_child(self.element(*child)?)
                .map_err(|e| js_error("appendChild", e))?;
        }

        self.nodes.push(element);
        Ok(NodeId(self.nodes.len() - 1))
    }

    fn set_attributes(&mut self, node: NodeId, attrs: &Attrs) -> Result<()> {
        write_attrs(self.element(node)?, attrs)
    }
}
