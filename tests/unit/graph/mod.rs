use super::*;
use crate::control::stepper::Recorder;

fn diamond() -> Graph {
    Graph::new()
        .node("A")
        .node("B")
        .node("C")
        .node("D")
        .edge("A", "B", 1)
        .edge("A", "C", 1)
        .edge("B", "D", 1)
}

fn triangle() -> Graph {
    Graph::new()
        .node("A")
        .node("B")
        .node("C")
        .edge("A", "B", 1)
        .edge("B", "C", 1)
        .edge("A", "C", 5)
}

fn run(
    algo: GraphAlgorithm,
    graph: &Graph,
    start: Option<&str>,
) -> (TraversalOutcome, Vec<GraphSnapshot>) {
    let prepared = algo.prepare(graph, start, false).expect("valid graph");
    let mut rec: Recorder<GraphSnapshot> = Recorder::new();
    let outcome = {
        let mut stepper = Stepper::detached(&mut rec);
        prepared.run(&mut stepper).expect("detached")
    };
    (outcome, rec.snapshots)
}

#[test]
fn bfs_visits_level_by_level() {
    let (out, snaps) = run(GraphAlgorithm::Bfs, &diamond(), Some("A"));
    assert_eq!(out.visit_order, vec!["A", "B", "C", "D"]);
    assert_eq!(out.parents.get("D").map(String::as_str), Some("B"));
    assert!(!out.parents.contains_key("A"));
    assert_eq!(out.parents.len(), 3);
    assert_eq!(snaps.first().map(|s| s.visited.clone()), Some(vec!["A".to_owned()]));
}

#[test]
fn dfs_matches_recursive_order() {
    let (out, _) = run(GraphAlgorithm::Dfs, &diamond(), Some("A"));
    assert_eq!(out.visit_order, vec!["A", "B", "D", "C"]);
    assert_eq!(out.parents.get("C").map(String::as_str), Some("A"));
}

#[test]
fn traversals_never_revisit() {
    for algo in [GraphAlgorithm::Bfs, GraphAlgorithm::Dfs, GraphAlgorithm::Dijkstra] {
        let graph = diamond().edge("C", "D", 1).edge("D", "A", 2);
        let (out, snaps) = run(algo, &graph, Some("B"));
        let mut seen = out.visit_order.clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), out.visit_order.len(), "{algo:?}");
        assert_eq!(seen.len(), 4);
        for node in &out.visit_order {
            if node != "B" {
                assert!(out.parents.contains_key(node), "{algo:?}: {node}");
            }
        }
        // Visit sets only ever grow.
        for pair in snaps.windows(2) {
            assert!(pair[1].visited.starts_with(&pair[0].visited));
        }
    }
}

#[test]
fn bfs_first_discoverer_is_parent() {
    // D is reachable from both B and C; B discovers it first.
    let graph = diamond().edge("C", "D", 1);
    let (out, _) = run(GraphAlgorithm::Bfs, &graph, Some("A"));
    assert_eq!(out.parents.get("D").map(String::as_str), Some("B"));
}

#[test]
fn dijkstra_prefers_the_cheaper_detour() {
    let (out, snaps) = run(GraphAlgorithm::Dijkstra, &triangle(), Some("A"));
    let distances = out.distances.clone().expect("distances");
    assert_eq!(distances["A"], Some(0));
    assert_eq!(distances["B"], Some(1));
    assert_eq!(distances["C"], Some(2));
    assert_eq!(out.path_to("C"), vec!["A", "B", "C"]);

    let last = snaps.last().expect("snapshots");
    assert!(last.explored.iter().any(|e| e.kind == EdgeKind::Examining && e.weight == Some(5)));
    assert!(last
        .explored
        .iter()
        .any(|e| e.kind == EdgeKind::Tree && e.target == "C" && e.distance == Some(2)));
}

#[test]
fn dijkstra_keeps_one_tree_edge_per_node() {
    let graph = Graph::new()
        .node("A")
        .node("B")
        .node("C")
        .edge("A", "B", 5)
        .edge("A", "C", 1)
        .edge("C", "B", 1);
    let (out, _) = run(GraphAlgorithm::Dijkstra, &graph, Some("A"));
    assert_eq!(out.parents.get("B").map(String::as_str), Some("C"));

    let tree_into_b: Vec<String> = out
        .explored
        .iter()
        .filter(|e| e.kind == EdgeKind::Tree && e.target == "B")
        .map(|e| format!("{}->{}", e.source, e.target))
        .collect();
    assert_eq!(tree_into_b, vec!["C->B"]);
    let tree_edges = out.explored.iter().filter(|e| e.kind == EdgeKind::Tree).count();
    assert_eq!(tree_edges, out.parents.len());
    // The superseded edge stays in the list as examined.
    assert!(out
        .explored
        .iter()
        .any(|e| e.kind == EdgeKind::Examining && e.source == "A" && e.target == "B"));
}

#[test]
fn dijkstra_marks_unreachable_nodes() {
    let graph = triangle().node("Z");
    let (out, _) = run(GraphAlgorithm::Dijkstra, &graph, Some("A"));
    assert_eq!(out.distances.expect("distances")["Z"], None);
    assert!(!out.visit_order.contains(&"Z".to_owned()));
}

fn reference_graph() -> Graph {
    Graph::new()
        .node("A")
        .node("B")
        .node("C")
        .node("D")
        .node("E")
        .edge("A", "B", 4)
        .edge("A", "C", 1)
        .edge("C", "B", 2)
        .edge("B", "D", 5)
        .edge("C", "D", 8)
        .edge("D", "E", 3)
        .edge("C", "E", 9)
}

#[test]
fn prim_and_kruskal_agree_on_mst_weight() {
    // Hand-checked: A-C 1, C-B 2, D-E 3, B-D 5.
    let (prim, _) = run(GraphAlgorithm::Prim, &reference_graph(), Some("A"));
    let (kruskal, _) = run(GraphAlgorithm::Kruskal, &reference_graph(), None);
    let prim = prim.spanning_tree.expect("prim tree");
    let kruskal = kruskal.spanning_tree.expect("kruskal tree");
    assert_eq!(prim.total_weight, 11);
    assert_eq!(kruskal.total_weight, 11);
    assert_eq!(prim.edges.len(), 4);
    assert_eq!(kruskal.edges.len(), 4);
}

#[test]
fn prim_keeps_lighter_parent() {
    let (out, _) = run(GraphAlgorithm::Prim, &reference_graph(), Some("A"));
    assert_eq!(out.parents.get("B").map(String::as_str), Some("C"));
    assert_eq!(out.parents.get("D").map(String::as_str), Some("B"));
}

#[test]
fn spanning_trees_ignore_edge_direction() {
    let mut graph = Graph::new()
        .node("A")
        .node("B")
        .node("C")
        .edge("A", "B", 10)
        .edge("A", "C", 10);
    graph.edges.push(Edge {
        source: "C".to_owned(),
        target: "B".to_owned(),
        weight: Some(1),
        directed: true,
    });

    let (kruskal, _) = run(GraphAlgorithm::Kruskal, &graph, None);
    let kruskal = kruskal.spanning_tree.expect("kruskal tree");
    assert_eq!(kruskal.total_weight, 11);
    for start in ["A", "B", "C"] {
        let (prim, _) = run(GraphAlgorithm::Prim, &graph, Some(start));
        let prim = prim.spanning_tree.expect("prim tree");
        assert_eq!(prim.total_weight, kruskal.total_weight, "prim from {start}");
    }

    // Traversals still honour the edge's own flag.
    let (bfs, _) = run(GraphAlgorithm::Bfs, &graph, Some("B"));
    assert_eq!(bfs.parents.get("C").map(String::as_str), Some("A"));
}

#[test]
fn kruskal_parents_span_each_component() {
    let graph = Graph::new()
        .node("A")
        .node("B")
        .node("C")
        .node("D")
        .edge("A", "B", 1)
        .edge("C", "D", 1)
        .edge("D", "B", 2);
    let (out, _) = run(GraphAlgorithm::Kruskal, &graph, None);
    assert_eq!(out.parents.len(), 3);
    assert_eq!(out.path_to("A"), vec!["C", "D", "B", "A"]);
    for node in ["A", "B", "D"] {
        assert_eq!(out.path_to(node).first().map(String::as_str), Some("C"));
    }
}

#[test]
fn kruskal_examines_every_edge() {
    let graph = reference_graph();
    let (out, _) = run(GraphAlgorithm::Kruskal, &graph, None);
    let examined = out
        .explored
        .iter()
        .filter(|e| e.kind == EdgeKind::Examining)
        .count();
    assert_eq!(examined, graph.edges.len());
}

#[test]
fn disconnected_graphs_stay_in_the_start_component() {
    let graph = Graph::new()
        .node("A")
        .node("B")
        .node("X")
        .node("Y")
        .edge("A", "B", 1)
        .edge("X", "Y", 1);
    let (out, _) = run(GraphAlgorithm::Bfs, &graph, Some("X"));
    assert_eq!(out.visit_order, vec!["X", "Y"]);

    let (out, _) = run(GraphAlgorithm::Kruskal, &graph, None);
    assert_eq!(out.spanning_tree.map(|t| t.edges.len()), Some(2));
}

#[test]
fn directed_option_restricts_edges() {
    let graph = Graph::new().node("A").node("B").edge("B", "A", 1);
    let prepared = GraphAlgorithm::Bfs
        .prepare(&graph, Some("A"), true)
        .expect("valid");
    let mut sink = crate::control::stepper::NullSink;
    let mut stepper: Stepper<'_, GraphSnapshot> = Stepper::detached(&mut sink);
    let out = prepared.run(&mut stepper).expect("detached");
    assert_eq!(out.visit_order, vec!["A"]);
}

#[test]
fn invalid_graphs_are_rejected_before_running() {
    let dangling = Graph::new().node("A").edge("A", "Q", 1);
    let err = GraphAlgorithm::Bfs
        .prepare(&dangling, Some("A"), false)
        .expect_err("unknown endpoint");
    assert!(err.to_string().contains("unknown node 'Q'"));

    let dup = Graph::new().node("A").node("A");
    assert!(dup.validate().is_err());

    let missing_start = GraphAlgorithm::Dfs.prepare(&diamond(), Some("Z"), false);
    assert!(missing_start.is_err());

    let negative = Graph::new().node("A").node("B").edge("A", "B", -2);
    assert!(GraphAlgorithm::Dijkstra.prepare(&negative, None, false).is_err());
    assert!(GraphAlgorithm::Prim.prepare(&negative, None, false).is_ok());

    assert!(GraphAlgorithm::Bfs.prepare(&Graph::new(), None, false).is_err());
    assert!(GraphAlgorithm::Kruskal.prepare(&Graph::new(), None, false).is_ok());
}

#[test]
fn shortest_path_survives_parent_cycles() {
    let mut parents = BTreeMap::new();
    parents.insert("A".to_owned(), "B".to_owned());
    parents.insert("B".to_owned(), "A".to_owned());
    let path = shortest_path(&parents, "A");
    assert!(path.len() <= 3);
}
