//! Discovery of the host protocol object in the enclosing window hierarchy.
//!
//! Content is usually launched inside one or more frames of the host's page,
//! or in a popup whose opener holds the frameset. The search walks parent
//! links first and falls back to the opener chain.

use tracing::debug;

/// Upper bound on parent hops in a single walk.
///
/// Real documents are never nested this deep; the bound only guarantees
/// termination against cyclic or misbehaving parent links.
pub const MAX_PARENT_HOPS: usize = 500;

/// A browsing context that may expose the host protocol object.
pub trait Window: Sized {
    /// Handle to the host protocol object.
    type Api;

    /// The protocol object attached to this window, if any.
    fn api(&self) -> Option<Self::Api>;

    /// The containing window. Top-level windows may return themselves.
    fn parent(&self) -> Option<Self>;

    /// The window that opened this one, if it was spawned as a popup.
    fn opener(&self) -> Option<Self>;

    /// Identity comparison between two window references.
    fn is_same(&self, other: &Self) -> bool;
}

/// Result of a locator search, including how many windows were inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search<A> {
    pub api: Option<A>,
    pub examined: usize,
}

/// Find the host protocol object starting from `start`.
///
/// Absence is an expected outcome (local preview outside any host).
#[must_use]
pub fn locate<W: Window + Clone>(start: &W) -> Option<W::Api> {
    let found = search(start);
    debug!(
        found = found.api.is_some(),
        examined = found.examined,
        "host api lookup finished"
    );
    found.api
}

/// Same as [`locate`], but reports the number of windows examined.
#[must_use]
pub fn search<W: Window + Clone>(start: &W) -> Search<W::Api> {
    let first = walk(start.clone());
    if first.api.is_some() {
        return first;
    }

    match start.opener() {
        Some(opener) => {
            let second = walk(opener);
            Search {
                api: second.api,
                examined: first.examined + second.examined,
            }
        }
        None => first,
    }
}

fn walk<W: Window>(mut current: W) -> Search<W::Api> {
    let mut examined = 1;
    let mut hops = 0;

    loop {
        if let Some(api) = current.api() {
            return Search {
                api: Some(api),
                examined,
            };
        }
        let Some(parent) = current.parent() else {
            break;
        };
        if parent.is_same(&current) {
            break;
        }
        hops += 1;
        if hops > MAX_PARENT_HOPS {
            debug!(hops, "parent chain exceeded hop bound");
            break;
        }
        current = parent;
        examined += 1;
    }

    Search {
        api: None,
        examined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Arena-backed window graph; `id` indexes into `nodes`.
    struct Graph {
        nodes: Vec<Node>,
    }

    struct Node {
        parent: Option<usize>,
        opener: Option<usize>,
        api: Option<&'static str>,
    }

    #[derive(Clone, Copy)]
    struct Win<'a> {
        graph: &'a Graph,
        id: usize,
    }

    impl<'a> Window for Win<'a> {
        type Api = &'static str;

        fn api(&self) -> Option<Self::Api> {
            self.graph.nodes[self.id].api
        }

        fn parent(&self) -> Option<Self> {
            self.graph.nodes[self.id].parent.map(|id| Win {
                graph: self.graph,
                id,
            })
        }

        fn opener(&self) -> Option<Self> {
            self.graph.nodes[self.id].opener.map(|id| Win {
                graph: self.graph,
                id,
            })
        }

        fn is_same(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    /// Builds a chain where node `i` has parent `i + 1`; the last node is top.
    fn chain(len: usize, api_at: Option<usize>) -> Graph {
        let nodes = (0..len)
            .map(|i| Node {
                parent: Some(if i + 1 < len { i + 1 } else { i }),
                opener: None,
                api: (Some(i) == api_at).then_some("API"),
            })
            .collect();
        Graph { nodes }
    }

    #[test]
    fn api_on_start_window_examines_one() {
        let graph = chain(3, Some(0));
        let found = search(&Win { graph: &graph, id: 0 });
        assert_eq!(found.api, Some("API"));
        assert_eq!(found.examined, 1);
    }

    #[test]
    fn examines_depth_plus_one_windows() {
        for depth in [1, 7, 120, MAX_PARENT_HOPS] {
            let graph = chain(depth + 1, Some(depth));
            let found = search(&Win { graph: &graph, id: 0 });
            assert_eq!(found.api, Some("API"), "depth {depth}");
            assert_eq!(found.examined, depth + 1, "depth {depth}");
        }
    }

    #[test]
    fn gives_up_beyond_hop_bound() {
        let depth = MAX_PARENT_HOPS + 1;
        let graph = chain(depth + 1, Some(depth));
        let found = search(&Win { graph: &graph, id: 0 });
        assert_eq!(found.api, None);
        assert!(found.examined <= MAX_PARENT_HOPS + 1);
    }

    #[test]
    fn cyclic_parents_terminate() {
        let graph = Graph {
            nodes: vec![
                Node {
                    parent: Some(1),
                    opener: None,
                    api: None,
                },
                Node {
                    parent: Some(0),
                    opener: None,
                    api: None,
                },
            ],
        };
        assert_eq!(locate(&Win { graph: &graph, id: 0 }), None);
    }

    #[test]
    fn falls_back_to_opener_chain() {
        // 0 is a popup with no parent; 1 opened it and sits in frameset 2.
        let graph = Graph {
            nodes: vec![
                Node {
                    parent: Some(0),
                    opener: Some(1),
                    api: None,
                },
                Node {
                    parent: Some(2),
                    opener: None,
                    api: None,
                },
                Node {
                    parent: Some(2),
                    opener: None,
                    api: Some("LMS"),
                },
            ],
        };
        let found = search(&Win { graph: &graph, id: 0 });
        assert_eq!(found.api, Some("LMS"));
        assert_eq!(found.examined, 3);
    }

    #[test]
    fn absent_everywhere_is_none() {
        let graph = chain(4, None);
        assert_eq!(locate(&Win { graph: &graph, id: 0 }), None);
    }
}
