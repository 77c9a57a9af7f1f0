//! Graph cleanup applied before clause segmentation.

use log::debug;

use crate::graph::DepGraph;

/// Return a cleaned copy of `graph` ready for segmentation.
///
/// Two rewrites are applied:
///
/// 1. **Case-marker stripping.** A leaf hanging off a prepositional object
///    via a `case` edge duplicates information the collapsed `nmod:...`
///    label already carries, so the leaf is dropped.
/// 2. **Existential splitting.** For "there is X ..." sentences rooted at
///    a form of *be* with exactly an expletive "there" and a subject, the
///    graph is re-rooted at the subject so the verb patterns can see the
///    real clause.
///
/// Normalizing an already-normalized graph changes nothing.
pub fn normalize(graph: &DepGraph) -> DepGraph {
    let mut cleaned = graph.clone();
    strip_case_markers(&mut cleaned);
    rewrite_existential(&mut cleaned);
    cleaned
}

fn strip_case_markers(graph: &mut DepGraph) {
    let mut doomed: Vec<u32> = Vec::new();
    for edge in graph.edges() {
        if edge.label.as_str() != "case" {
            continue;
        }
        // Only leaves are safe to drop.
        if graph.out_degree(edge.dependent) != 0 {
            continue;
        }
        let collapsed = graph
            .incoming(edge.governor)
            .iter()
            .any(|incoming| {
                incoming.label.short() == "nmod" && incoming.label.specific().is_some()
            });
        if collapsed {
            doomed.push(edge.dependent);
        }
    }
    for index in doomed {
        debug!("dropping case marker at node {index}");
        graph.remove_node(index);
    }
}

fn rewrite_existential(graph: &mut DepGraph) {
    let Some(root_index) = graph.root_index() else {
        return;
    };
    let Some(root) = graph.node(root_index) else {
        return;
    };
    let is_be = if root.lemma.is_empty() {
        ["is", "are", "was", "were", "be"]
            .iter()
            .any(|form| root.text.eq_ignore_ascii_case(form))
    } else {
        root.lemma.eq_ignore_ascii_case("be")
    };
    if !is_be || graph.out_degree(root_index) != 2 {
        return;
    }

    let mut found_there = false;
    let mut extra = false;
    let mut new_root: Option<u32> = None;
    for edge in graph.outgoing(root_index) {
        if edge.label.as_str() == "expl" {
            match graph.node(edge.dependent) {
                Some(token) if token.text.eq_ignore_ascii_case("there") => found_there = true,
                _ => extra = true,
            }
        } else if edge.label.as_str() == "nsubj" {
            new_root = Some(edge.dependent);
        } else {
            extra = true;
        }
    }

    if found_there && !extra {
        if let Some(subject) = new_root {
            if graph.retain_subtree(subject).is_ok() {
                debug!("split existential clause, re-rooted at node {subject}");
            }
        }
    }
}
