//! Related-terms graph, derived on demand from the current term list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::Term;

/// Label carried by every derived edge.
pub const RELATES_TO: &str = "relates_to";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphEdge {
    pub from_id: String,
    pub to_id: String,
    pub label: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TermGraph {
    #[serde(default)]
    pub nodes: Vec<Term>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl TermGraph {
    /// One edge per `related_ids` entry, in node order then list order.
    /// Entries pointing at unknown ids are kept only with `include_orphans`.
    pub fn derive(nodes: Vec<Term>, include_orphans: bool) -> Self {
        let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let mut edges = Vec::new();
        for node in &nodes {
            for rid in &node.related_ids {
                if include_orphans || known.contains(rid.as_str()) {
                    edges.push(GraphEdge {
                        from_id: node.id.clone(),
                        to_id: rid.clone(),
                        label: RELATES_TO.to_string(),
                    });
                }
            }
        }
        Self { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<Term> {
        vec![
            Term::new("Custom Elements", "tags").with_id("ce"),
            Term::new("Shadow DOM", "encapsulation").with_id("sd"),
            Term::new("Web Components", "standards").with_id("wc").with_related(["ce", "gone", "sd"]),
        ]
    }

    #[test]
    fn drops_orphans_by_default() {
        let g = TermGraph::derive(fixture(), false);
        assert_eq!(g.nodes.len(), 3);
        let pairs: Vec<(&str, &str)> =
            g.edges.iter().map(|e| (e.from_id.as_str(), e.to_id.as_str())).collect();
        assert_eq!(pairs, vec![("wc", "ce"), ("wc", "sd")]);
        assert!(g.edges.iter().all(|e| e.label == RELATES_TO));
    }

    #[test]
    fn includes_orphans_on_request() {
        let g = TermGraph::derive(fixture(), true);
        let targets: Vec<&str> = g.edges.iter().map(|e| e.to_id.as_str()).collect();
        assert_eq!(targets, vec!["ce", "gone", "sd"]);
        assert!(g.nodes.iter().all(|n| n.id != "gone"));
    }

    #[test]
    fn empty_input_gives_empty_graph() {
        assert_eq!(TermGraph::derive(Vec::new(), true), TermGraph::default());
    }
}
