//! Document tree nodes.

/// Payload of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Plain text value (`key = text`). Bare list items carry an empty leaf.
    Leaf(String),
    /// Nested block (`key = { ... }`), children in declaration order.
    Block(Vec<Node>),
}

/// A keyed entry in a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    key: String,
    value: Value,
}

impl Node {
    pub fn text(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Value::Leaf(text.into()),
        }
    }

    pub fn block(key: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            key: key.into(),
            value: Value::Block(children),
        }
    }

    /// Key name of this entry. The document root has an empty key.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Leaf text, or `None` for blocks.
    pub fn leaf(&self) -> Option<&str> {
        match &self.value {
            Value::Leaf(text) => Some(text),
            Value::Block(_) => None,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self.value, Value::Block(_))
    }

    /// Direct children in declaration order. Leaves have none.
    pub fn children(&self) -> &[Node] {
        match &self.value {
            Value::Block(children) => children,
            Value::Leaf(_) => &[],
        }
    }

    /// All direct children with the given key, in declaration order.
    pub fn children_named<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children().iter().filter(move |c| c.key == key)
    }

    /// First direct child with the given key.
    pub fn child(&self, key: &str) -> Option<&Node> {
        self.children().iter().find(|c| c.key == key)
    }
}
