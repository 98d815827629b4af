//! DOM domain types.
//!
//! The DOM domain exposes DOM read/write operations. Only the subset used to
//! locate the `<html>` element's attribute string is kept here.

use serde::{Deserialize, Serialize};

/// Unique DOM node identifier.
pub type NodeId = i32;

/// Parameters for DOM.getDocument.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetDocumentParams {
    /// The maximum depth at which children should be retrieved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<i32>,
    /// Whether or not iframes and shadow roots should be traversed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pierce: Option<bool>,
}

/// DOM Node.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Node identifier that is passed into the rest of the DOM messages.
    pub node_id: NodeId,
    /// Node's nodeType.
    pub node_type: i32,
    /// Node's nodeName, e.g. `"HTML"` or `"#document"`.
    pub node_name: String,
    /// Child nodes of this node when requested.
    #[serde(default)]
    pub children: Option<Vec<Node>>,
    /// Attributes of the Element node, as a flat `[name, value, name, value, ...]` array.
    #[serde(default)]
    pub attributes: Option<Vec<String>>,
}

impl Node {
    /// Find the first node in this subtree (self included, depth-first) whose `nodeName` is `HTML`.
    ///
    /// `DOM.getDocument` responses don't guarantee the `<html>` element sits at a fixed
    /// path, so this walks the tree instead of indexing `children[1]` directly.
    #[must_use]
    pub fn find_html_element(&self) -> Option<&Node> {
        if self.node_name.eq_ignore_ascii_case("HTML") {
            return Some(self);
        }
        self.children
            .as_ref()?
            .iter()
            .find_map(Node::find_html_element)
    }

    /// Join this node's flat attribute array into one searchable string.
    #[must_use]
    pub fn attribute_string(&self) -> Option<String> {
        self.attributes.as_ref().map(|attrs| attrs.join(" "))
    }
}

/// Result of DOM.getDocument.
#[derive(Debug, Clone, Deserialize)]
pub struct GetDocumentResult {
    /// Resulting node.
    pub root: Node,
}
