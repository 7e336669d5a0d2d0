use cladekit::newick::{parse_file, parse_str, to_newick};
use std::path::Path;

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree() {
    let newick = "((A:1.0,B:2.0):3.0,C:4.0);";
    let tree = parse_str(newick).unwrap();

    // Test counts
    assert_eq!(tree.num_terminals(), 3);
    assert_eq!(tree.num_internal(), 2);
    assert_eq!(tree.num_vertices(), 5);
    assert!(tree.is_valid());

    // Test relationships
    // - Root has children (internal, C)
    let root = tree.root();
    let root_index = root.index();
    assert_eq!(root.children().len(), 2);
    let internal = tree.vertex(root.children()[0]);
    let leaf_c = tree.vertex(root.children()[1]);

    // - Internal vertex has children (A, B)
    assert!(internal.is_internal());
    let leaf_a = tree.vertex(internal.children()[0]);
    let leaf_b = tree.vertex(internal.children()[1]);

    // - Three terminals with their labels
    assert_eq!(leaf_a.taxon(), Some("A"));
    assert_eq!(leaf_b.taxon(), Some("B"));
    assert_eq!(leaf_c.taxon(), Some("C"));

    // - Parent relationships
    assert_eq!(internal.parent(), Some(root_index));
    assert_eq!(leaf_a.parent(), Some(internal.index()));
    assert_eq!(leaf_b.parent(), Some(internal.index()));
    assert_eq!(leaf_c.parent(), Some(root_index));
}

#[test]
fn test_multifurcating_tree() {
    let newick = "(A:1.0,B:1.0,C:1.0,D:1.0);";
    let tree = parse_str(newick).unwrap();

    assert_eq!(tree.num_terminals(), 4);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.root().children().len(), 4);
    assert!(tree.is_valid());
}

#[test]
fn test_single_child_vertex() {
    // Degree-two vertices appear in rerooted trees and must survive a round trip
    let newick = "((A:1):2,B:3);";
    let tree = parse_str(newick).unwrap();

    assert_eq!(tree.num_terminals(), 2);
    assert_eq!(tree.num_internal(), 2);
    assert_eq!(to_newick(&tree), newick);
}

#[test]
fn test_tree_with_quoted_labels() {
    let newick = "(('Taxon one':1.5,'Second''s taxon':2.5):3.0,'3rd Taxon':4.0);";
    let tree = parse_str(newick).unwrap();

    assert_eq!(tree.num_terminals(), 3);
    let taxa: Vec<&str> = tree.terminals().filter_map(|t| t.taxon()).collect();
    assert_eq!(taxa, vec!["Taxon one", "Second's taxon", "3rd Taxon"]);
}

#[test]
fn test_tree_with_scientific_notation() {
    let newick = "((A:1e-5,B:2.5E+3):1.0e2,C:3.14E-10);";
    let tree = parse_str(newick).unwrap();

    assert_eq!(tree.num_terminals(), 3);
    let a = tree.terminals().next().unwrap();
    assert_eq!(*a.branch_length().unwrap(), 1e-5);
}

#[test]
fn test_optional_branch_length() {
    let newick = "((A:1.0,B),C:4.0);";
    let tree = parse_str(newick).unwrap();

    let b = tree.terminals().nth(1).unwrap();
    assert_eq!(b.taxon(), Some("B"));
    assert!(b.branch_length().is_none());
}

#[test]
fn test_internal_node_label_preserved() {
    // Support values sit where a clade label would; both round-trip verbatim
    let newick = "((A:0.1,B:0.2)0.95:0.3,C:0.4)root_label;";
    let tree = parse_str(newick).unwrap();

    let root = tree.root();
    assert_eq!(root.label(), Some("root_label"));
    let inner = tree.vertex(root.children()[0]);
    assert_eq!(inner.label(), Some("0.95"));

    assert_eq!(to_newick(&tree), newick);
}

#[test]
fn test_newick_with_comments() {
    let newick = "[A tree of] (([Shags!]A[Great Commentoran]:0.33,B[Pied Commentoran]:0.33):1.87,C:[King Commentoran]2.2);";
    let tree = parse_str(newick).unwrap();

    assert_eq!(tree.num_terminals(), 3);
    assert_eq!(tree.num_internal(), 2);
}

#[test]
fn test_root_branch_length_preserved() {
    let newick = "((A:1,B:2):3,C:4):0.5;";
    let tree = parse_str(newick).unwrap();

    assert_eq!(*tree.root().branch_length().unwrap(), 0.5);
    assert_eq!(to_newick(&tree), newick);
}

// --- TESTS DEALING WITH CORRUPT NEWICK STRINGS ---

#[test]
fn test_missing_semicolon() {
    let newick = "((A:1.0,B:2.0):3.0,C:4.0):0.5";
    assert!(parse_str(newick).is_err());
}

#[test]
fn test_missing_comma() {
    let newick = "((A:1.0 B:2.0):3.0,C:4.0):0.5;";
    assert!(parse_str(newick).is_err());
}

#[test]
fn test_unmatched_parentheses() {
    let newick = "((A:1.0,B:2.0:3.0,C:4.0):0.5;";
    assert!(parse_str(newick).is_err());
}

#[test]
fn test_invalid_branch_length() {
    let newick = "((A:1.0,B:abc):3.0,C:4.0):0.5;";
    assert!(parse_str(newick).is_err());
}

#[test]
fn test_negative_branch_length() {
    let newick = "((A:1.0,B:-2.0):3.0,C:4.0);";
    assert!(parse_str(newick).is_err());
}

#[test]
fn test_unclosed_comment() {
    let newick = "((A:1.0,B:2.0):3.0,C:4.0)[oops;";
    assert!(parse_str(newick).is_err());
}

// --- TESTS WRITING ---

#[test]
fn test_write_round_trip() {
    let newick = "((a:0.01,a:0.2):0.2,(b:0.2,c:0.2):0.2);";
    let tree = parse_str(newick).unwrap();
    assert_eq!(to_newick(&tree), newick);
}

#[test]
fn test_write_escapes_labels() {
    let newick = "('Pan[1]':0.5,Pongo_abelii:0.5);";
    let tree = parse_str(newick).unwrap();
    assert_eq!(to_newick(&tree), newick);
}

// --- TESTS PARSING WHOLE FILE ---
#[test]
fn test_parsing_newick_file() {
    let path = Path::new("tests").join("fixtures").join("primates.nwk");
    let trees = parse_file(path).unwrap();

    assert_eq!(trees.len(), 3);
    for tree in &trees {
        assert_eq!(tree.num_terminals(), 4);
        assert!(tree.is_valid());
    }
}
