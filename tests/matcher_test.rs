use afgraph::{AlignmentFreeGraph, ColorConsistency, GfaDocument, GraphConfig, NodeId};

const TWO_HAPLOTYPES: &str = "H\tVN:Z:1.0\n\
S\t1\tACG\n\
S\t2\tTAC\n\
S\t3\tGGA\n\
L\t1\t+\t2\t+\t0M\n\
P\tsample#1\t1+,2+\t*\n\
P\tsample#2\t3+\t*\n";

fn load(gfa: &str, k: usize) -> AlignmentFreeGraph<afgraph::GraphStore> {
    let config = GraphConfig { k, ..Default::default() };
    let mut graph = AlignmentFreeGraph::connect(&config).unwrap();
    graph.import_gfa(&GfaDocument::parse_str(gfa).unwrap(), false).unwrap();
    graph
}

#[test]
fn test_sequence_shorter_than_k_is_empty() {
    let mut graph = load(TWO_HAPLOTYPES, 3);
    assert!(graph.match_via_index("AC", None).unwrap().is_empty());
    assert!(graph.match_via_traversal("AC", None).unwrap().is_empty());
}

#[test]
fn test_exact_chunking_drops_remainder() {
    let mut graph = load(TWO_HAPLOTYPES, 3);
    graph.set_color_consistency(ColorConsistency::Shared);

    let six = graph.match_via_index("ACGTAC", None).unwrap();
    let seven = graph.match_via_index("ACGTACG", None).unwrap();
    assert_eq!(six.len(), 2);
    assert_eq!(six, seven);
    assert_eq!(six.get(1), Some(NodeId::new(1)));
    assert_eq!(six.get(3), Some(NodeId::new(2)));
}

#[test]
fn test_color_polarity() {
    let mut graph = load(TWO_HAPLOTYPES, 3);

    // Same haplotype: shared color, so the default check fails
    assert!(graph.match_via_index("acgtac", None).unwrap().is_empty());
    // Different haplotypes: disjoint colors succeed
    let path = graph.match_via_index("ACG GGA", None).unwrap();
    assert_eq!(path.node_ids(), vec![NodeId::new(1), NodeId::new(3)]);

    graph.set_color_consistency(ColorConsistency::Shared);
    assert_eq!(graph.match_via_index("ACGTAC", None).unwrap().len(), 2);
    assert!(graph.match_via_index("ACGGGA", None).unwrap().is_empty());
}

#[test]
fn test_explicit_k_rebuilds_index() {
    let mut graph = load(TWO_HAPLOTYPES, 3);
    graph.set_color_consistency(ColorConsistency::Shared);

    let path = graph.match_via_index("CGTA", Some(2)).unwrap();
    assert_eq!(graph.k(), 2);
    // AC is spelled at two nodes of sample#1 once k = 2
    assert!(!graph.index().contains("AC"));
    assert_eq!(path.iter().map(|(key, _)| key).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn test_gfa_exploded_chain() {
    let graph = load("S\t1\tACG\nP\tp\t1+\t*\n", 1);
    let store = graph.backend();
    assert_eq!(store.node_count(), 3);

    let symbols: Vec<(u64, Option<char>)> = store.all_nodes().map(|n| (n.id.as_u64(), n.symbol())).collect();
    assert_eq!(symbols[0], (1, Some('A')));
    // Fresh ids sit above the segment count
    assert!(symbols[1..].iter().all(|(id, _)| *id > 1));

    let c = symbols.iter().find(|(_, s)| *s == Some('C')).map(|(id, _)| NodeId::new(*id));
    let g = symbols.iter().find(|(_, s)| *s == Some('G')).map(|(id, _)| NodeId::new(*id));
    let edges: Vec<(NodeId, NodeId)> = store.all_edges().map(|e| (e.source, e.target)).collect();
    assert_eq!(edges, vec![(NodeId::new(1), c.unwrap()), (c.unwrap(), g.unwrap())]);
}

#[test]
fn test_traversal_vs_index_divergence() {
    // GTA occurs on both haplotypes at different nodes
    let gfa = "S\t1\tGTA\nS\t2\tCCC\nS\t3\tGTA\nP\th1\t1+,2+\t*\nP\th2\t3+\t*\n";
    let mut graph = load(gfa, 3);
    assert!(!graph.index().contains("GTA"));

    assert!(graph.match_via_index("GTACCC", None).unwrap().is_empty());
    graph.set_color_consistency(ColorConsistency::Shared);
    assert!(graph.match_via_index("GTACCC", None).unwrap().is_empty());

    let path = graph.match_via_traversal("GTACCC", None).unwrap();
    // Lowest start id wins among equal walks
    assert_eq!(path.get(1), Some(NodeId::new(1)));
    assert_eq!(path.get(3), Some(NodeId::new(2)));
}

#[test]
fn test_traversal_skips_unmatched_windows() {
    let graph = load(TWO_HAPLOTYPES, 3);
    let path = graph.match_via_traversal("TTTTAC", None).unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(path.get(3), Some(NodeId::new(2)));
}
