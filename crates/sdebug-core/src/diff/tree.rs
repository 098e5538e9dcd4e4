//! Component tree projection diff.
//!
//! Trees are compared as sorted sets of `"{path} - {details}"` lines, so a
//! reordering of siblings is not a change.

use std::collections::BTreeSet;

use crate::diff::model::TreeDiff;
use crate::errors::{Result, SdebugError};
use crate::filter::{include_component, Scope};
use crate::model::ComponentNode;

/// Check path nesting and uniqueness across the whole tree
///
/// # Errors
///
/// - `ComponentPathNotNested` if a child's path doesn't extend its parent's
///   with a `.`
/// - `DuplicateComponentPath` if a path appears twice
pub fn validate_tree(root: &ComponentNode) -> Result<()> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if !seen.insert(node.path.as_str()) {
            return Err(SdebugError::DuplicateComponentPath {
                path: node.path.clone(),
            });
        }
        for child in &node.children {
            let nested = child
                .path
                .strip_prefix(node.path.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .is_some_and(|rest| !rest.is_empty());
            if !nested {
                return Err(SdebugError::ComponentPathNotNested {
                    parent: node.path.clone(),
                    child: child.path.clone(),
                });
            }
            stack.push(child);
        }
    }
    Ok(())
}

/// Pre-order `"{path} - {details}"` lines for nodes passing the scope
///
/// A node outside the scope is skipped but its children are still visited.
pub fn flatten(root: &ComponentNode, scope: &Scope) -> Vec<String> {
    let mut lines = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if include_component(&node.path, scope) {
            lines.push(format!("{} - {}", node.path, node.details));
        }
        stack.extend(node.children.iter().rev());
    }
    lines
}

/// Sorted-line comparison of two trees under `scope`
pub fn tree_has_changed(previous: &ComponentNode, current: &ComponentNode, scope: &Scope) -> bool {
    let mut old = flatten(previous, scope);
    let mut new = flatten(current, scope);
    old.sort();
    new.sort();
    old != new
}

/// Diff a fetched tree against the accepted one
///
/// With no accepted tree the placeholder root stands in, so the first real
/// tree is always a change. Returns `None` when nothing visible changed.
pub fn diff_tree(
    previous: Option<&ComponentNode>,
    current: &ComponentNode,
    scope: &Scope,
) -> Option<TreeDiff> {
    let placeholder = ComponentNode::placeholder();
    let previous = previous.unwrap_or(&placeholder);

    if !tree_has_changed(previous, current, scope) {
        return None;
    }
    tracing::debug!(nodes = current.node_count(), "component tree changed");
    Some(TreeDiff {
        tree: current.clone(),
    })
}

/// `(depth, node)` rows in tree order for nodes passing the scope
///
/// Depth is the node's depth in the full tree, root at 0.
pub fn outline<'a>(root: &'a ComponentNode, scope: &Scope) -> Vec<(usize, &'a ComponentNode)> {
    let mut rows = Vec::new();
    let mut stack = vec![(0usize, root)];

    while let Some((depth, node)) = stack.pop() {
        if include_component(&node.path, scope) {
            rows.push((depth, node));
        }
        stack.extend(node.children.iter().rev().map(|child| (depth + 1, child)));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(path: &str) -> ComponentNode {
        let name = path.rsplit('.').next().unwrap_or(path);
        ComponentNode::new(path, name)
    }

    fn world() -> ComponentNode {
        node("world")
            .with_child(
                node("world.foo")
                    .with_details("busy")
                    .with_child(node("world.foo.bar")),
            )
            .with_child(node("world.blip"))
    }

    #[test]
    fn test_flatten_is_preorder() {
        let lines = flatten(&world(), &Scope::all());
        assert_eq!(
            lines,
            vec![
                "world - ",
                "world.foo - busy",
                "world.foo.bar - ",
                "world.blip - ",
            ]
        );
    }

    #[test]
    fn test_flatten_scope_keeps_ancestors_and_descendants() {
        let lines = flatten(&world(), &Scope::new("world.foo"));
        assert_eq!(
            lines,
            vec!["world - ", "world.foo - busy", "world.foo.bar - "]
        );
    }

    #[test]
    fn test_flatten_visits_children_of_skipped_nodes() {
        let tree = node("sim").with_child(node("world").with_child(node("world.foo")));
        let lines = flatten(&tree, &Scope::new("world"));
        assert_eq!(lines, vec!["world - ", "world.foo - "]);
    }

    #[test]
    fn test_added_child_is_a_change() {
        let before = node("a").with_child(node("a.b"));
        let after = node("a").with_child(node("a.b")).with_child(node("a.c"));
        assert!(diff_tree(Some(&before), &after, &Scope::all()).is_some());
    }

    #[test]
    fn test_sibling_reorder_is_not_a_change() {
        let before = node("a").with_child(node("a.b")).with_child(node("a.c"));
        let after = node("a").with_child(node("a.c")).with_child(node("a.b"));
        assert!(diff_tree(Some(&before), &after, &Scope::all()).is_none());
    }

    #[test]
    fn test_details_change_is_a_change() {
        let before = node("a");
        let after = node("a").with_details("running");
        assert!(diff_tree(Some(&before), &after, &Scope::all()).is_some());
    }

    #[test]
    fn test_placeholder_against_placeholder_is_unchanged() {
        assert!(diff_tree(None, &ComponentNode::placeholder(), &Scope::all()).is_none());
        assert!(diff_tree(None, &world(), &Scope::all()).is_some());
    }

    #[test]
    fn test_validate_tree() {
        assert!(validate_tree(&world()).is_ok());

        let bad = node("world").with_child(node("worldly"));
        assert!(matches!(
            validate_tree(&bad),
            Err(SdebugError::ComponentPathNotNested { .. })
        ));

        let dup = node("a").with_child(node("a.b")).with_child(node("a.b"));
        assert!(matches!(
            validate_tree(&dup),
            Err(SdebugError::DuplicateComponentPath { .. })
        ));
    }

    #[test]
    fn test_outline_depths() {
        let tree = world();
        let rows: Vec<(usize, &str)> = outline(&tree, &Scope::all())
            .into_iter()
            .map(|(depth, n)| (depth, n.path.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (0, "world"),
                (1, "world.foo"),
                (2, "world.foo.bar"),
                (1, "world.blip"),
            ]
        );
    }
}
