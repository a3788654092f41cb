use crate::scene::types::VisualElement;

/// Levels added per step into a child. Combined with the two-space indent
/// unit, each generation sits four spaces deeper than its parent.
const DEPTH_STEP: usize = 2;

/// Renders `node` and all of its descendants, one header line per node and a
/// `children (N):` line in front of every non-empty child list.
///
/// Recursion is unbounded here; the snapshot boundary guarantees a finite,
/// acyclic tree.
pub fn describe_hierarchy(node: &VisualElement, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    let mut hierarchy = format!("{indent}{}: {}", node.kind.label(), node.name);

    let children = node.children();
    if !children.is_empty() {
        hierarchy.push_str(&format!("\n{indent}  children ({}):", children.len()));
        for child in children {
            hierarchy.push('\n');
            hierarchy.push_str(&describe_hierarchy(child, depth + DEPTH_STEP));
        }
    }

    hierarchy
}
