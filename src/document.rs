//! Parsed page model.
//!
//! A [`Document`] flattens the `scraper` DOM into an arena of element and
//! comment nodes. Children are owned through index lists, and each node keeps
//! a plain index back to its parent that is only read to compute ancestry and
//! sibling position. Text nodes are folded into their parent's direct text.

use std::sync::OnceLock;

use scraper::{Html, Selector};
use url::Url;

static LINK_SELECTOR: OnceLock<Selector> = OnceLock::new();
static BASE_SELECTOR: OnceLock<Selector> = OnceLock::new();

/// Index of a node inside its document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Comment,
}

#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    tag: String,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Tag name; `#comment` for comments.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Text owned by this node alone, whitespace collapsed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// An immutable parsed page.
#[derive(Debug, Clone)]
pub struct Document {
    base_url: Url,
    nodes: Vec<Node>,
    hrefs: Vec<String>,
}

impl Document {
    /// Parses `html` fetched from `url`. A `<base href>` in the page overrides
    /// `url` as the base for link resolution.
    pub fn parse(html: &str, url: Url) -> Self {
        let html = Html::parse_document(html);
        let link_selector = LINK_SELECTOR.get_or_init(|| Selector::parse("a[href]").unwrap());
        let base_selector = BASE_SELECTOR.get_or_init(|| Selector::parse("base[href]").unwrap());

        let base_url = html
            .select(base_selector)
            .next()
            .and_then(|e| e.value().attr("href"))
            .and_then(|href| url.join(href.trim()).ok())
            .unwrap_or(url);

        let hrefs = html
            .select(link_selector)
            .filter_map(|e| e.value().attr("href"))
            .map(str::to_string)
            .collect();

        let mut nodes: Vec<Node> = Vec::new();
        let mut stack = vec![(*html.root_element(), None::<NodeId>)];

        // Children are pushed in reverse so they pop, and get appended to
        // their parent, in document order.
        while let Some((node, parent)) = stack.pop() {
            let (kind, tag, text) = match node.value() {
                scraper::Node::Element(el) => {
                    let text = node
                        .children()
                        .filter_map(|c| c.value().as_text())
                        .flat_map(|t| t.split_whitespace())
                        .collect::<Vec<_>>()
                        .join(" ");
                    (NodeKind::Element, el.name().to_string(), text)
                }
                scraper::Node::Comment(c) => (
                    NodeKind::Comment,
                    "#comment".to_string(),
                    c.split_whitespace().collect::<Vec<_>>().join(" "),
                ),
                _ => continue,
            };

            let id = NodeId(nodes.len());
            nodes.push(Node {
                kind,
                tag,
                text,
                children: Vec::new(),
                parent,
            });
            if let Some(parent) = parent {
                nodes[parent.0].children.push(id);
            }

            let kids: Vec<_> = node
                .children()
                .filter(|c| c.value().is_element() || c.value().is_comment())
                .collect();
            stack.extend(kids.into_iter().rev().map(|kid| (kid, Some(id))));
        }

        Self {
            base_url,
            nodes,
            hrefs,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Raw `href` values of every anchor, in document order.
    pub fn hrefs(&self) -> &[String] {
        &self.hrefs
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Position of `id` among its parent's children; `None` for the root.
    pub fn ordinal(&self, id: NodeId) -> Option<usize> {
        let parent = self.node(id).parent?;
        self.node(parent).children.iter().position(|&c| c == id)
    }
}
