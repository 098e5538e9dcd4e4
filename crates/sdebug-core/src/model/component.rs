use serde::{Deserialize, Serialize};

/// A node in the simulation's component hierarchy
///
/// Children's paths extend the parent's path with one or more dotted
/// segments, e.g. `world` → `world.bob` → `world.bob.heart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentNode {
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub children: Vec<ComponentNode>,
}

impl ComponentNode {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            details: String::new(),
            children: Vec::new(),
        }
    }

    /// Root used before the first tree has been accepted
    pub fn placeholder() -> Self {
        Self::new("?", "?")
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn with_child(mut self, child: ComponentNode) -> Self {
        self.children.push(child);
        self
    }

    /// Total number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

impl Default for ComponentNode {
    fn default() -> Self {
        Self::placeholder()
    }
}
