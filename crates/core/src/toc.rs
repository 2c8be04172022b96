//! Heading metadata and the nested outline used for a table of contents.

use serde::Serialize;

/// A heading found while rendering `text` blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    /// Heading depth (1-6).
    pub depth: u8,
    /// Unique anchor slug.
    pub slug: String,
    /// Heading text with inline markers removed.
    pub text: String,
}

/// A heading with the headings nested under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineNode {
    /// The heading itself.
    #[serde(flatten)]
    pub heading: HeadingEntry,
    /// Deeper headings up to the next heading of equal or lower depth.
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    fn leaf(heading: HeadingEntry) -> Self {
        Self {
            heading,
            children: Vec::new(),
        }
    }
}

/// Nests headings no deeper than `max_depth` under the closest preceding
/// heading of smaller depth.
pub fn build_outline(headings: &[HeadingEntry], max_depth: u8) -> Vec<OutlineNode> {
    let mut roots = Vec::new();
    for heading in headings.iter().filter(|h| h.depth <= max_depth) {
        insert(&mut roots, heading.clone());
    }
    roots
}

fn insert(nodes: &mut Vec<OutlineNode>, heading: HeadingEntry) {
    match nodes.last_mut() {
        Some(last) if last.heading.depth < heading.depth => insert(&mut last.children, heading),
        _ => nodes.push(OutlineNode::leaf(heading)),
    }
}

/// Path from a root to the node with `slug`, inclusive, for expanding the
/// sections around the active heading.
pub fn path_to<'a>(nodes: &'a [OutlineNode], slug: &str) -> Option<Vec<&'a OutlineNode>> {
    for node in nodes {
        if node.heading.slug == slug {
            return Some(vec![node]);
        }
        if let Some(mut path) = path_to(&node.children, slug) {
            path.insert(0, node);
            return Some(path);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(depth: u8, slug: &str) -> HeadingEntry {
        HeadingEntry {
            depth,
            slug: slug.to_string(),
            text: slug.to_string(),
        }
    }

    fn shape(nodes: &[OutlineNode]) -> String {
        nodes
            .iter()
            .map(|n| {
                if n.children.is_empty() {
                    n.heading.slug.clone()
                } else {
                    format!("{}({})", n.heading.slug, shape(&n.children))
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn nests_by_depth() {
        let headings = [h(1, "a"), h(2, "b"), h(3, "c"), h(2, "d"), h(1, "e")];
        assert_eq!(shape(&build_outline(&headings, 3)), "a(b(c) d) e");
    }

    #[test]
    fn skipped_levels_still_nest() {
        let headings = [h(2, "a"), h(3, "b"), h(1, "c"), h(3, "d")];
        assert_eq!(shape(&build_outline(&headings, 6)), "a(b) c(d)");
    }

    #[test]
    fn depth_cutoff_drops_deep_headings() {
        let headings = [h(1, "a"), h(4, "deep"), h(2, "b")];
        assert_eq!(shape(&build_outline(&headings, 3)), "a(b)");
    }

    #[test]
    fn path_to_finds_ancestors() {
        let outline = build_outline(&[h(1, "a"), h(2, "b"), h(3, "c"), h(1, "d")], 3);
        let path: Vec<&str> = path_to(&outline, "c")
            .unwrap()
            .iter()
            .map(|n| n.heading.slug.as_str())
            .collect();
        assert_eq!(path, vec!["a", "b", "c"]);
        assert!(path_to(&outline, "zzz").is_none());
    }
}
