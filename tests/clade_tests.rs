use cladekit::clade::{label_clade, locate, prune_taxa, read_taxon_names, reroot_on_outgroup};
use cladekit::error::CladeError;
use cladekit::newick::{parse_str, to_newick};
use cladekit::{TaxonSelection, label_file, prune_file, reroot_file};
use std::fs;

fn names(taxa: &[&str]) -> Vec<String> {
    taxa.iter().map(|t| t.to_string()).collect()
}

// ============= Locator Tests =============

#[test]
fn test_locate_unique_names_finds_minimal_clade() {
    let tree = parse_str("((a:0.1,b:0.2):0.3,(c:0.2,d:0.2):0.2);").unwrap();
    let clade = locate(&tree, &names(&["c", "d"])).unwrap();

    let descendants: Vec<&str> = tree
        .pre_order_iter()
        .filter(|v| v.is_terminal())
        .filter_map(|v| v.taxon())
        .collect();
    assert_eq!(descendants, vec!["a", "b", "c", "d"]);

    // The located vertex spans exactly c and d
    let c = tree.terminals().find(|t| t.taxon() == Some("c")).unwrap();
    assert_eq!(clade, c.parent().unwrap());
}

#[test]
fn test_locate_counts_duplicate_names() {
    // Two terminals named "a"; requesting the name twice spans both
    let tree = parse_str("((a:0.01,a:0.2):0.2,(b:0.2,c:0.2):0.2);").unwrap();
    let clade = locate(&tree, &names(&["a", "a"])).unwrap();

    let first_a = tree.terminals().next().unwrap();
    assert_eq!(clade, first_a.parent().unwrap());
}

#[test]
fn test_locate_missing_name_reports_it() {
    let tree = parse_str("((a:0.1,b:0.2):0.3,c:0.4);").unwrap();
    let err = locate(&tree, &names(&["a", "Aotus_trivirgatus"])).unwrap_err();

    match err {
        CladeError::TaxaNotFound { missing } => {
            assert_eq!(missing, vec!["Aotus_trivirgatus".to_string()]);
        }
        other => panic!("expected TaxaNotFound, got {:?}", other),
    }
}

#[test]
fn test_locate_reports_undersatisfied_duplicates() {
    let tree = parse_str("((a:0.1,b:0.2):0.3,c:0.4);").unwrap();
    let err = locate(&tree, &names(&["a", "a"])).unwrap_err();

    match err {
        CladeError::TaxaNotFound { missing } => {
            assert_eq!(missing, vec!["a".to_string()]);
        }
        other => panic!("expected TaxaNotFound, got {:?}", other),
    }
}

// ============= Selection Tests =============

#[test]
fn test_selection_conflict_detected() {
    let err = TaxonSelection::from_parts(vec!["hu.".into()], None, vec!["a".into()]).unwrap_err();
    assert!(matches!(err, CladeError::ConfigurationConflict));
}

#[test]
fn test_selection_requires_some_input() {
    let err = TaxonSelection::from_parts(vec![], None, vec![]).unwrap_err();
    assert!(matches!(err, CladeError::NoSelection));
}

#[test]
fn test_selection_deduplicates_names() {
    let selection =
        TaxonSelection::from_parts(vec![], None, names(&["b", "c", "b"])).unwrap();
    assert_eq!(selection, TaxonSelection::Names(names(&["b", "c"])));
}

#[test]
fn test_prefix_selection_resolves_with_multiplicity() {
    let tree = parse_str("((a:0.01,a:0.2):0.2,(b:0.2,c:0.2):0.2);").unwrap();
    let selection = TaxonSelection::Prefixes(vec!["a".into()]);
    assert_eq!(selection.resolve(&tree).unwrap(), names(&["a", "a"]));
}

#[test]
fn test_prefix_selection_without_match_is_an_error() {
    let tree = parse_str("((a:0.1,b:0.2):0.3,c:0.4);").unwrap();
    let selection = TaxonSelection::Prefixes(vec!["zz".into()]);
    assert!(matches!(
        selection.resolve(&tree),
        Err(CladeError::NoMatchingTaxa(_))
    ));
}

#[test]
fn test_read_taxon_names_strips_and_skips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taxa.txt");
    fs::write(&path, "b.taxon  \nc.taxon\n\n").unwrap();

    assert_eq!(read_taxon_names(&path).unwrap(), names(&["b.taxon", "c.taxon"]));
}

// ============= Editor Tests =============

#[test]
fn test_label_clade_by_duplicate_prefix_names() {
    let mut tree = parse_str("((a:0.01,a:0.2):0.2,(b:0.2,c:0.2):0.2);").unwrap();
    let selection = TaxonSelection::Prefixes(vec!["a".into()]);
    let targets = selection.resolve(&tree).unwrap();

    label_clade(&mut tree, &targets, "#1").unwrap();

    assert_eq!(
        to_newick(&tree),
        "((a:0.01,a:0.2)#1:0.2,(b:0.2,c:0.2):0.2);"
    );
}

#[test]
fn test_label_clade_by_names() {
    let mut tree = parse_str("((a:0.01,a:0.2):0.2,(b:0.2,c:0.2):0.2);").unwrap();

    label_clade(&mut tree, &names(&["b", "c"]), "#1").unwrap();

    assert_eq!(
        to_newick(&tree),
        "((a:0.01,a:0.2):0.2,(b:0.2,c:0.2)#1:0.2);"
    );

    // Re-parsing the output recovers the label on the designated vertex,
    // with everything else unchanged
    let reparsed = parse_str(to_newick(&tree)).unwrap();
    let labelled = reparsed
        .pre_order_iter()
        .find(|v| v.label() == Some("#1"))
        .unwrap();
    assert!(labelled.is_internal());
    assert_eq!(to_newick(&reparsed), to_newick(&tree));
}

#[test]
fn test_label_clade_propagates_resolution_failure() {
    let mut tree = parse_str("((a:0.1,b:0.2):0.3,c:0.4);").unwrap();
    let err = label_clade(&mut tree, &names(&["a", "nope"]), "#1").unwrap_err();
    assert!(matches!(err, CladeError::TaxaNotFound { .. }));
}

#[test]
fn test_prune_by_names() {
    let mut tree = parse_str("((a:0.01,a:0.2):0.2,(b:0.2,c:0.2):0.2);").unwrap();
    let selection = TaxonSelection::Names(names(&["b", "c"]));

    let removed = prune_taxa(&mut tree, &selection).unwrap();

    assert_eq!(removed, 2);
    assert_eq!(to_newick(&tree), "(a:0.01,a:0.2);");
}

#[test]
fn test_prune_by_prefix_removes_every_match() {
    let mut tree =
        parse_str("((hu.BF128:0.1,hu.BF520:0.1):0.2,(si.MND1:0.2,si.MND2:0.3):0.1);").unwrap();
    let selection = TaxonSelection::Prefixes(vec!["hu.".into()]);

    prune_taxa(&mut tree, &selection).unwrap();

    assert_eq!(to_newick(&tree), "(si.MND1:0.2,si.MND2:0.3);");
    assert!(tree.is_valid());
}

#[test]
fn test_prune_everything_is_an_error() {
    let mut tree = parse_str("((a:0.1,b:0.2):0.3,c:0.4);").unwrap();
    let selection = TaxonSelection::Names(names(&["a", "b", "c"]));
    assert!(matches!(
        prune_taxa(&mut tree, &selection),
        Err(CladeError::EmptyResultTree)
    ));
}

#[test]
fn test_prune_nothing_is_an_error() {
    let mut tree = parse_str("((a:0.1,b:0.2):0.3,c:0.4);").unwrap();
    let selection = TaxonSelection::Names(names(&["zz"]));
    assert!(matches!(
        prune_taxa(&mut tree, &selection),
        Err(CladeError::NoMatchingTaxa(_))
    ));
}

#[test]
fn test_reroot_on_terminal_outgroup() {
    let mut tree = parse_str("((a:0.1,b:0.1):0.1,c:0.3);").unwrap();

    reroot_on_outgroup(&mut tree, &names(&["c"])).unwrap();

    assert!(tree.is_valid());
    assert_eq!(to_newick(&tree), "(c:0.15,((a:0.1,b:0.1):0.1):0.15);");
}

#[test]
fn test_reroot_on_clade_outgroup() {
    let mut tree = parse_str("((a:0.1,b:0.1):0.1,(c:0.1,d:0.1):0.3);").unwrap();

    reroot_on_outgroup(&mut tree, &names(&["c", "d"])).unwrap();

    assert!(tree.is_valid());
    assert_eq!(
        to_newick(&tree),
        "((c:0.1,d:0.1):0.15,((a:0.1,b:0.1):0.1):0.15);"
    );
}

#[test]
fn test_reroot_on_root_is_degenerate() {
    let mut tree = parse_str("((a:0.1,b:0.1):0.1,c:0.3);").unwrap();
    let err = reroot_on_outgroup(&mut tree, &names(&["a", "b", "c"])).unwrap_err();
    assert!(matches!(err, CladeError::DegenerateRoot));
}

#[test]
fn test_reroot_without_branch_length_is_degenerate() {
    let mut tree = parse_str("((a:0.1,b:0.1),c:0.3);").unwrap();
    let err = reroot_on_outgroup(&mut tree, &names(&["a", "b"])).unwrap_err();
    assert!(matches!(err, CladeError::DegenerateRoot));
}

// ============= File-level Tests =============

#[test]
fn test_label_file_recomputes_prefix_per_tree() {
    let dir = tempfile::tempdir().unwrap();
    let tree_path = dir.path().join("in.nwk");
    let out_path = dir.path().join("out.nwk");
    fs::write(
        &tree_path,
        "((a:0.01,a:0.2):0.2,(b:0.2,c:0.2):0.2);\n((a:0.1,b:0.2):0.3,c:0.4);\n",
    )
    .unwrap();

    let selection = TaxonSelection::Prefixes(vec!["a".into()]);
    label_file(&tree_path, &out_path, &selection, "#1").unwrap();

    let out = fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "((a:0.01,a:0.2)#1:0.2,(b:0.2,c:0.2):0.2);",
            // Only one terminal matches here, so the terminal itself is the clade
            "((a#1:0.1,b:0.2):0.3,c:0.4);",
        ]
    );
}

#[test]
fn test_label_file_appends_to_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let tree_path = dir.path().join("in.nwk");
    let out_path = dir.path().join("out.nwk");
    fs::write(&tree_path, "((a:0.1,b:0.2):0.3,c:0.4);\n").unwrap();

    let selection = TaxonSelection::Names(names(&["a", "b"]));
    label_file(&tree_path, &out_path, &selection, "#1").unwrap();
    label_file(&tree_path, &out_path, &selection, "#1").unwrap();

    let out = fs::read_to_string(&out_path).unwrap();
    assert_eq!(out.lines().count(), 2);
}

#[test]
fn test_label_file_skips_failing_tree_and_reports_batch() {
    let dir = tempfile::tempdir().unwrap();
    let tree_path = dir.path().join("in.nwk");
    let out_path = dir.path().join("out.nwk");
    fs::write(
        &tree_path,
        "((a:0.1,b:0.2):0.3,c:0.4);\n((a:0.1,d:0.2):0.3,c:0.4);\n",
    )
    .unwrap();

    let selection = TaxonSelection::Names(names(&["a", "b"]));
    let err = label_file(&tree_path, &out_path, &selection, "#1").unwrap_err();

    match err {
        CladeError::Batch { failed, total } => {
            assert_eq!(failed, 1);
            assert_eq!(total, 2);
        }
        other => panic!("expected Batch, got {:?}", other),
    }
    // The failing tree was skipped, never emitted unmodified
    let out = fs::read_to_string(&out_path).unwrap();
    assert_eq!(
        out.lines().collect::<Vec<_>>(),
        vec!["((a:0.1,b:0.2)#1:0.3,c:0.4);"]
    );
}

#[test]
fn test_prune_file_multi_tree_order() {
    let dir = tempfile::tempdir().unwrap();
    let tree_path = dir.path().join("in.nwk");
    let out_path = dir.path().join("out.nwk");
    fs::write(
        &tree_path,
        "((a:0.01,a:0.2):0.2,(b:0.2,c:0.2):0.2);\n((b:0.1,a:0.2):0.3,(c:0.15,d:0.2):0.2);\n",
    )
    .unwrap();

    let selection = TaxonSelection::from_parts(vec![], None, names(&["b", "c"])).unwrap();
    prune_file(&tree_path, &out_path, &selection).unwrap();

    let out = fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "(a:0.01,a:0.2);");
    assert_eq!(lines[1], "(a:0.5,d:0.4);");
}

#[test]
fn test_reroot_file_single_tree() {
    let dir = tempfile::tempdir().unwrap();
    let tree_path = dir.path().join("in.nwk");
    let outgroup_path = dir.path().join("outgroup.txt");
    let out_path = dir.path().join("out.nwk");
    fs::write(&tree_path, "((a:0.1,b:0.1):0.1,c:0.3);\n").unwrap();
    fs::write(&outgroup_path, "c\n").unwrap();

    reroot_file(&tree_path, &outgroup_path, &out_path, false).unwrap();

    let out = fs::read_to_string(&out_path).unwrap();
    assert_eq!(out, "(c:0.15,((a:0.1,b:0.1):0.1):0.15);\n");
}

#[test]
fn test_reroot_file_rejects_multi_tree_without_flag() {
    let dir = tempfile::tempdir().unwrap();
    let tree_path = dir.path().join("in.nwk");
    let outgroup_path = dir.path().join("outgroup.txt");
    let out_path = dir.path().join("out.nwk");
    fs::write(
        &tree_path,
        "((a:0.1,b:0.1):0.1,c:0.3);\n((a:0.2,b:0.1):0.1,c:0.3);\n",
    )
    .unwrap();
    fs::write(&outgroup_path, "c\n").unwrap();

    let err = reroot_file(&tree_path, &outgroup_path, &out_path, false).unwrap_err();
    assert!(matches!(err, CladeError::SingleTreeExpected(2)));
    assert!(!out_path.exists());
}

#[test]
fn test_reroot_file_multi_tree_with_flag() {
    let dir = tempfile::tempdir().unwrap();
    let tree_path = dir.path().join("in.nwk");
    let outgroup_path = dir.path().join("outgroup.txt");
    let out_path = dir.path().join("out.nwk");
    fs::write(
        &tree_path,
        "((a:0.1,b:0.1):0.1,c:0.3);\n((a:0.2,b:0.1):0.2,c:0.1);\n",
    )
    .unwrap();
    fs::write(&outgroup_path, "c\n").unwrap();

    reroot_file(&tree_path, &outgroup_path, &out_path, true).unwrap();

    let out = fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "(c:0.15,((a:0.1,b:0.1):0.1):0.15);");
    assert_eq!(lines[1], "(c:0.05,((a:0.2,b:0.1):0.2):0.05);");
}

#[test]
fn test_reroot_file_empty_outgroup_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let tree_path = dir.path().join("in.nwk");
    let outgroup_path = dir.path().join("outgroup.txt");
    let out_path = dir.path().join("out.nwk");
    fs::write(&tree_path, "((a:0.1,b:0.1):0.1,c:0.3);\n").unwrap();
    fs::write(&outgroup_path, "\n").unwrap();

    let err = reroot_file(&tree_path, &outgroup_path, &out_path, false).unwrap_err();
    assert!(matches!(err, CladeError::NoSelection));
}
