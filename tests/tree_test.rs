//! Tests for the BST Tree Engine: insert/search/delete/info ledgers.

use rstest::{fixture, rstest};

use steptrace::ledger::Snapshot;
use steptrace::tree::BinarySearchTree;
use steptrace::util::testing::init_test_setup;
use steptrace::TraverseOrder;

/// The classic scenario tree: 50,30,70,20,40,60,80 inserted in order.
#[fixture]
fn sample_tree() -> BinarySearchTree {
    init_test_setup();
    let mut tree = BinarySearchTree::new();
    for value in [50, 30, 70, 20, 40, 60, 80] {
        tree.insert(value);
    }
    tree
}

// ============================================================
// Insert Tests
// ============================================================

#[test]
fn given_empty_tree_when_inserting_then_value_becomes_root() {
    let mut tree = BinarySearchTree::new();
    let ledger = tree.insert(50);

    assert_eq!(ledger.len(), 2);
    assert!(ledger.last().unwrap().description.contains("as root"));
    // No comparisons were needed.
    assert_eq!(ledger.op_count(), 0);

    let info = tree.info();
    assert_eq!(info.height, 1);
    assert_eq!(info.node_count, 1);
}

#[test]
fn given_nonempty_tree_when_inserting_then_one_op_per_node_visited() {
    let mut tree = BinarySearchTree::new();
    tree.insert(50);
    tree.insert(30);

    // 20 walks 50 -> 30 -> empty left slot: two comparisons.
    let ledger = tree.insert(20);
    assert_eq!(ledger.op_count(), 2);
    assert!(ledger.last().unwrap().description.contains("Inserting 20"));
}

#[rstest]
fn given_any_insert_sequence_when_checking_validity_then_bst_holds_after_every_operation(
    #[values(vec![5, 3, 8, 1, 4], vec![1, 2, 3, 4, 5], vec![9, 9, 9], vec![42])] values: Vec<i64>,
) {
    init_test_setup();
    let mut tree = BinarySearchTree::new();
    for value in values {
        tree.insert(value);
        assert!(tree.info().is_valid_bst, "invalid after inserting {value}");
    }
}

#[test]
fn given_duplicate_value_when_inserting_then_it_lands_in_right_subtree() {
    let mut tree = BinarySearchTree::new();
    tree.insert(10);
    tree.insert(10);

    let info = tree.info();
    assert!(info.is_valid_bst);
    let root = info.tree.unwrap();
    assert!(root.left.is_none());
    assert_eq!(root.right.unwrap().value, 10);
}

#[test]
fn given_insert_ledger_when_inspecting_steps_then_sequence_is_monotonic() {
    let mut tree = BinarySearchTree::new();
    tree.insert(50);
    tree.insert(30);
    let ledger = tree.insert(40);

    for (i, step) in ledger.steps().iter().enumerate() {
        assert_eq!(step.step, i + 1);
    }
}

#[test]
fn given_insert_ledger_when_replaying_then_early_snapshots_lack_the_new_node() {
    let mut tree = BinarySearchTree::new();
    tree.insert(50);
    let ledger = tree.insert(30);

    // The opening step was recorded before the node was linked.
    let Snapshot::Tree { root: Some(first) } = &ledger.steps()[0].snapshot else {
        panic!("expected a tree snapshot");
    };
    assert!(first.left.is_none());

    let Snapshot::Tree { root: Some(last) } = &ledger.last().unwrap().snapshot else {
        panic!("expected a tree snapshot");
    };
    assert_eq!(last.left.as_ref().unwrap().value, 30);
}

// ============================================================
// Search Tests
// ============================================================

#[rstest]
fn given_sample_tree_when_searching_existing_value_then_it_is_found(
    sample_tree: BinarySearchTree,
) {
    let (ledger, found) = sample_tree.search(60);
    assert!(found.is_some());
    assert!(ledger
        .last()
        .unwrap()
        .description
        .contains("Found value 60"));
    // Path 50 -> 70 -> 60: three comparisons.
    assert_eq!(ledger.op_count(), 3);
}

#[rstest]
fn given_sample_tree_when_searching_absent_value_then_miss_is_a_completed_ledger(
    sample_tree: BinarySearchTree,
) {
    let (ledger, found) = sample_tree.search(99);
    assert!(found.is_none());
    assert!(ledger.last().unwrap().description.contains("not found"));
    assert!(ledger.len() > 1);
}

// ============================================================
// Delete Tests
// ============================================================

#[rstest]
fn given_sample_tree_when_deleting_two_child_node_then_successor_takes_its_place(
    mut sample_tree: BinarySearchTree,
) {
    let (ledger, removed) = sample_tree.delete(30);
    assert!(removed);
    assert!(ledger
        .steps()
        .iter()
        .any(|s| s.description.contains("Case 4")));
    assert!(ledger
        .steps()
        .iter()
        .any(|s| s.description.contains("successor value 40")));

    let info = sample_tree.info();
    assert_eq!(info.node_count, 6);
    assert!(info.is_valid_bst);

    let root = info.tree.unwrap();
    assert_eq!(root.value, 50);
    let left = root.left.unwrap();
    assert_eq!(left.value, 40);
    assert_eq!(left.left.unwrap().value, 20);
    // 40 was the whole right subtree of 30; nothing remains of it.
    assert!(left.right.is_none());

    let (_, order) = sample_tree.traverse(TraverseOrder::In);
    assert_eq!(order, vec![20, 40, 50, 60, 70, 80]);
}

#[rstest]
fn given_single_occurrence_when_deleting_then_search_misses_and_count_drops_by_one(
    mut sample_tree: BinarySearchTree,
) {
    let before = sample_tree.info().node_count;
    let (_, removed) = sample_tree.delete(60);
    assert!(removed);
    assert_eq!(sample_tree.info().node_count, before - 1);

    let (ledger, found) = sample_tree.search(60);
    assert!(found.is_none());
    assert!(ledger.last().unwrap().description.contains("not found"));
}

#[test]
fn given_leaf_node_when_deleting_then_case_one_applies() {
    let mut tree = BinarySearchTree::new();
    tree.insert(50);
    tree.insert(30);
    let (ledger, removed) = tree.delete(30);

    assert!(removed);
    assert!(ledger
        .steps()
        .iter()
        .any(|s| s.description.contains("Case 1")));
    assert_eq!(tree.info().node_count, 1);
}

#[test]
fn given_node_with_only_right_child_when_deleting_then_right_child_is_promoted() {
    let mut tree = BinarySearchTree::new();
    tree.insert(50);
    tree.insert(70);
    tree.insert(80);
    let (ledger, removed) = tree.delete(70);

    assert!(removed);
    assert!(ledger
        .steps()
        .iter()
        .any(|s| s.description.contains("Case 2")));
    let root = tree.info().tree.unwrap();
    assert_eq!(root.right.unwrap().value, 80);
}

#[test]
fn given_node_with_only_left_child_when_deleting_then_left_child_is_promoted() {
    let mut tree = BinarySearchTree::new();
    tree.insert(50);
    tree.insert(70);
    tree.insert(60);
    let (ledger, removed) = tree.delete(70);

    assert!(removed);
    assert!(ledger
        .steps()
        .iter()
        .any(|s| s.description.contains("Case 3")));
    let root = tree.info().tree.unwrap();
    assert_eq!(root.right.unwrap().value, 60);
}

#[test]
fn given_root_as_only_node_when_deleting_then_tree_is_empty() {
    let mut tree = BinarySearchTree::new();
    tree.insert(50);
    let (_, removed) = tree.delete(50);

    assert!(removed);
    let info = tree.info();
    assert_eq!(info.height, 0);
    assert_eq!(info.node_count, 0);
    assert!(info.tree.is_none());
}

#[rstest]
fn given_absent_value_when_deleting_then_ledger_completes_unsuccessfully(
    mut sample_tree: BinarySearchTree,
) {
    let (ledger, removed) = sample_tree.delete(99);
    assert!(!removed);
    assert!(ledger
        .last()
        .unwrap()
        .description
        .contains("Deletion failed"));
    assert_eq!(sample_tree.info().node_count, 7);
}

// ============================================================
// Info Tests
// ============================================================

#[rstest]
fn given_sample_tree_when_requesting_info_then_shape_is_reported(sample_tree: BinarySearchTree) {
    let info = sample_tree.info();
    assert_eq!(info.height, 3);
    assert_eq!(info.node_count, 7);
    assert!(info.is_valid_bst);

    let root = info.tree.unwrap();
    assert_eq!(root.value, 50);
    assert_eq!(root.left.as_ref().unwrap().value, 30);
    assert_eq!(root.right.as_ref().unwrap().value, 70);
}

#[test]
fn given_empty_tree_when_requesting_info_then_all_zero_and_valid() {
    let tree = BinarySearchTree::new();
    let info = tree.info();
    assert_eq!(info.height, 0);
    assert_eq!(info.node_count, 0);
    assert!(info.is_valid_bst);
    assert!(info.tree.is_none());
}

// ============================================================
// Serialization Tests
// ============================================================

#[test]
fn given_insert_ledger_when_serializing_then_documented_fields_are_present() {
    let mut tree = BinarySearchTree::new();
    let ledger = tree.insert(50);

    let json = serde_json::to_value(&ledger).unwrap();
    let step = &json["steps"][0];
    assert!(step["step"].is_number());
    assert!(step["description"].is_string());
    assert!(step.get("subject").is_some());
    assert_eq!(step["snapshot"]["kind"], "tree");
    assert!(step["op_count"].is_number());
}
