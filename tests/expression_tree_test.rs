//! Tests for ExpressionTree construction and combination

use exprchain::domain::{ExpressionError, ExpressionTree, Operator};
use exprchain::util::testing;
use rstest::rstest;

fn of(value: &'static str) -> ExpressionTree<&'static str> {
    ExpressionTree::of(value)
}

#[rstest]
#[case::of(of("A"))]
#[case::or_operator(ExpressionTree::or_operator(["A"]).unwrap())]
#[case::or_operator_vec(ExpressionTree::or_operator(vec!["A"]).unwrap())]
#[case::or_chains(ExpressionTree::or_chains([of("A")]).unwrap())]
#[case::and_operator(ExpressionTree::and_operator(["A"]).unwrap())]
#[case::and_operator_vec(ExpressionTree::and_operator(vec!["A"]).unwrap())]
#[case::and_chains(ExpressionTree::and_chains([of("A")]).unwrap())]
fn given_single_value_when_building_then_renders_leaf(#[case] tree: ExpressionTree<&str>) {
    testing::init_test_setup();
    assert!(tree.is_leaf());
    assert_eq!(tree.to_string(), "A");
}

#[rstest]
#[case::and_value(of("A").and("B"))]
#[case::and_tree(of("A").and_tree(of("B")))]
#[case::and_operator(ExpressionTree::and_operator(["A", "B"]).unwrap())]
#[case::and_operator_then_and(ExpressionTree::and_operator(["A"]).unwrap().and("B"))]
#[case::or_operator_then_and(ExpressionTree::or_operator(["A"]).unwrap().and("B"))]
#[case::and_chains(ExpressionTree::and_chains([of("A"), of("B")]).unwrap())]
fn given_two_values_when_and_then_renders_and_group(#[case] tree: ExpressionTree<&str>) {
    assert!(tree.is_and());
    assert_eq!(tree.to_string(), "(A && B)");
}

#[rstest]
#[case::or_value(of("A").or("B"))]
#[case::or_tree(of("A").or_tree(of("B")))]
#[case::or_operator(ExpressionTree::or_operator(["A", "B"]).unwrap())]
#[case::or_operator_then_or(ExpressionTree::or_operator(["A"]).unwrap().or("B"))]
#[case::and_operator_then_or(ExpressionTree::and_operator(["A"]).unwrap().or("B"))]
#[case::or_chains(ExpressionTree::or_chains([of("A"), of("B")]).unwrap())]
fn given_two_values_when_or_then_renders_or_group(#[case] tree: ExpressionTree<&str>) {
    assert!(tree.is_or());
    assert_eq!(tree.to_string(), "(A || B)");
}

#[rstest]
#[case("(A || (B && C))", of("A").or_tree(ExpressionTree::and_operator(["B", "C"]).unwrap()))]
#[case("((A || B) && C)", of("A").or("B").and("C"))]
#[case("(A && (B || C))", of("A").and_tree(of("B").or("C")))]
#[case("((A && B) || C)", ExpressionTree::and_operator(["A", "B"]).unwrap().or("C"))]
#[case("(A && B && C)", of("A").and("B").and("C"))]
#[case("(A && B && C)", ExpressionTree::and_operator(["A", "B", "C"]).unwrap())]
#[case("(A || B || C)", of("A").or("B").or("C"))]
#[case("(A || B || C)", ExpressionTree::or_operator(["A", "B", "C"]).unwrap())]
fn given_two_operators_when_combining_then_renders(
    #[case] expected: &str,
    #[case] tree: ExpressionTree<&str>,
) {
    assert_eq!(tree.to_string(), expected);
}

#[rstest]
#[case("((A && B) || (C && D))", of("A").and("B").or_tree(of("C").and("D")))]
#[case(
    "((A && B) || (C && D))",
    ExpressionTree::or_chains([of("A").and("B"), of("C").and("D")]).unwrap()
)]
#[case("((A && B) || (C || D))", of("A").and("B").or_tree(of("C").or("D")))]
#[case("((A || B) && (C || D))", of("A").or("B").and_tree(of("C").or("D")))]
#[case(
    "((A || B) && (C && D))",
    ExpressionTree::and_chains([
        ExpressionTree::or_operator(["A", "B"]).unwrap(),
        ExpressionTree::and_operator(["C", "D"]).unwrap(),
    ])
    .unwrap()
)]
#[case("(A && B && (C || D))", of("A").and("B").and_tree(of("C").or("D")))]
#[case(
    "(A || B || (C && D))",
    ExpressionTree::or_chains([
        of("A"),
        of("B"),
        ExpressionTree::and_chains([of("C"), of("D")]).unwrap(),
    ])
    .unwrap()
)]
fn given_three_operators_when_combining_then_renders(
    #[case] expected: &str,
    #[case] tree: ExpressionTree<&str>,
) {
    assert_eq!(tree.to_string(), expected);
}

#[rstest]
#[case(Operator::And)]
#[case(Operator::Or)]
fn given_repeated_same_operator_when_combining_then_stays_flat(#[case] operator: Operator) {
    let values: Vec<u32> = (1..=25).collect();
    let mut tree = ExpressionTree::of(values[0]);
    for value in &values[1..] {
        tree.combine(operator, ExpressionTree::of(*value));
    }

    assert_eq!(tree.operator(), operator);
    assert_eq!(tree.children().len(), values.len());
    assert_eq!(tree.depth(), 2);
    assert!(tree.children().iter().all(|child| child.is_leaf()));
    assert_eq!(tree.leaves().copied().collect::<Vec<_>>(), values);
}

#[rstest]
#[case(Operator::And, Operator::Or)]
#[case(Operator::Or, Operator::And)]
fn given_group_when_switching_operator_then_splits_in_two(
    #[case] first: Operator,
    #[case] second: Operator,
) {
    let mut tree = ExpressionTree::of("A");
    tree.combine(first, of("B")).combine(first, of("C"));
    let before = tree.to_string();

    tree.combine(second, of("D").and("E"));

    assert_eq!(tree.operator(), second);
    assert_eq!(tree.children().len(), 2);
    assert_eq!(tree.children()[0].to_string(), before);
    assert_eq!(tree.children()[1].to_string(), "(D && E)");
}

#[test]
fn given_switch_mid_chain_when_continuing_then_appends_to_new_operator() {
    let tree = of("A").or("B").and("C").and("D");

    assert_eq!(tree.to_string(), "((A || B) && C && D)");
    assert_eq!(tree.children().len(), 3);
}

#[test]
fn given_single_tree_when_chaining_then_returns_it_unchanged() {
    let tree = of("A").and("B").or("C");
    let expected = tree.clone();

    assert_eq!(ExpressionTree::and_chains([tree.clone()]).unwrap(), expected);
    assert_eq!(ExpressionTree::or_chains([tree]).unwrap(), expected);
}

#[test]
fn given_chains_when_grouping_then_does_not_flatten() {
    let tree = ExpressionTree::and_chains([of("A").and("B"), of("C").and("D")]).unwrap();

    assert_eq!(tree.children().len(), 2);
    assert_eq!(tree.to_string(), "((A && B) && (C && D))");
}

#[rstest]
#[case::and(of("A").and("B").and_optional(None))]
#[case::or(of("A").and("B").or_optional(None))]
fn given_absent_optional_when_combining_then_unchanged(#[case] tree: ExpressionTree<&str>) {
    assert_eq!(tree, of("A").and("B"));
    assert_eq!(tree.to_string(), "(A && B)");
}

#[test]
fn given_present_optional_when_combining_then_combines() {
    assert_eq!(of("A").and_optional(Some("B")).to_string(), "(A && B)");
    assert_eq!(of("A").or_optional(Some("B")).to_string(), "(A || B)");
}

#[test]
fn given_mutable_reference_when_combining_then_mutates_in_place() {
    let mut tree = of("A");
    tree.try_and(Some("B"))
        .unwrap()
        .try_or_tree(Some(of("C").and("D")))
        .unwrap();

    assert_eq!(tree.to_string(), "((A && B) || (C && D))");
}

#[test]
fn given_leaf_when_inspecting_then_exposes_value() {
    let tree = of("A");

    assert!(!tree.is_group());
    assert_eq!(tree.value(), Some(&"A"));
    assert!(tree.children().is_empty());
    assert_eq!(tree.depth(), 1);
    assert_eq!(tree.leaf_count(), 1);
}

#[test]
fn given_or_group_when_inspecting_then_is_or_not_and() {
    let tree = of("A").or("B");

    assert!(tree.is_group());
    assert!(tree.is_or());
    assert!(!tree.is_and());
    assert_eq!(tree.value(), None);
}

// ============================================================
// Failures
// ============================================================

#[test]
fn given_no_values_when_building_then_empty_input() {
    let empty: [&str; 0] = [];

    assert_eq!(
        ExpressionTree::and_operator(empty),
        Err(ExpressionError::EmptyInput { what: "values" })
    );
    assert_eq!(
        ExpressionTree::or_operator(Vec::<&str>::new()),
        Err(ExpressionError::EmptyInput { what: "values" })
    );
    assert_eq!(
        ExpressionTree::<&str>::and_chains([]),
        Err(ExpressionError::EmptyInput { what: "trees" })
    );
    assert_eq!(
        ExpressionTree::<&str>::try_or_chains([]),
        Err(ExpressionError::EmptyInput { what: "trees" })
    );
}

#[test]
fn given_absent_value_when_building_then_null_value() {
    assert_eq!(
        ExpressionTree::<&str>::try_of(None),
        Err(ExpressionError::NullValue { what: "value" })
    );
    assert_eq!(
        ExpressionTree::try_and_operator([Some("A"), None]),
        Err(ExpressionError::NullValue { what: "values" })
    );
    assert_eq!(
        ExpressionTree::try_or_chains([Some(of("A")), None]),
        Err(ExpressionError::NullValue { what: "trees" })
    );
}

#[test]
fn given_present_values_when_building_checked_then_succeeds() {
    assert_eq!(ExpressionTree::try_of(Some("A")).unwrap().to_string(), "A");
    assert_eq!(
        ExpressionTree::try_or_operator([Some("A"), Some("B")])
            .unwrap()
            .to_string(),
        "(A || B)"
    );
    assert_eq!(
        ExpressionTree::try_and_chains([Some(of("A")), Some(of("B").or("C"))])
            .unwrap()
            .to_string(),
        "(A && (B || C))"
    );
}

#[test]
fn given_absent_tree_when_combining_then_receiver_untouched() {
    let mut tree = of("A").or("B");
    let before = tree.clone();

    assert_eq!(
        tree.try_and_tree(None).unwrap_err(),
        ExpressionError::NullValue { what: "tree" }
    );
    assert!(tree.try_or(None).is_err());
    assert_eq!(tree, before);
}

#[test]
fn given_error_when_displaying_then_describes_problem() {
    let err = ExpressionTree::and_operator(Vec::<u8>::new()).unwrap_err();
    assert_eq!(err.to_string(), "values must contain at least one element");

    let err = ExpressionTree::<u8>::try_of(None).unwrap_err();
    assert_eq!(err.to_string(), "value must be non-null if supplied");
}
