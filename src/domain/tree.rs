//! Expression tree: leaves holding values, groups joining children under one operator.
//!
//! Trees are grown through `and`/`or`. Repeating the receiver's operator appends a
//! sibling (the group stays flat); switching operator turns the receiver into a
//! two-child group holding its previous state and the new node.

use std::mem;

use serde::Serialize;
use tracing::{instrument, trace};

use crate::domain::error::ExprResult;
use crate::domain::operator::Operator;
use crate::domain::preconditions::{check_all_not_null, check_not_empty, check_not_null};

/// A node of a boolean combinator tree.
///
/// Either a leaf (`value` present, no children) or a group (no value, at least
/// two children combined by `operator`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpressionTree<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<T>,
    operator: Operator,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<ExpressionTree<T>>,
}

impl<T> ExpressionTree<T> {
    fn leaf(value: T, operator: Operator) -> Self {
        Self {
            value: Some(value),
            operator,
            children: Vec::new(),
        }
    }

    fn group(operator: Operator, children: Vec<Self>) -> Self {
        Self {
            value: None,
            operator,
            children,
        }
    }

    /// Leaf wrapping `value`.
    pub fn of(value: T) -> Self {
        Self::leaf(value, Operator::And)
    }

    /// Leaf wrapping a value that may be absent.
    pub fn try_of(value: Option<T>) -> ExprResult<Self> {
        check_not_null(value, "value").map(Self::of)
    }

    /// All `values` joined by AND.
    pub fn and_operator<I>(values: I) -> ExprResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::fold_values(Operator::And, values.into_iter().collect())
    }

    /// All `values` joined by OR.
    pub fn or_operator<I>(values: I) -> ExprResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::fold_values(Operator::Or, values.into_iter().collect())
    }

    /// Like [`and_operator`](Self::and_operator), failing if any value is absent.
    pub fn try_and_operator<I>(values: I) -> ExprResult<Self>
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let values = check_not_empty(values.into_iter().collect(), "values")?;
        Self::fold_values(Operator::And, check_all_not_null(values, "values")?)
    }

    /// Like [`or_operator`](Self::or_operator), failing if any value is absent.
    pub fn try_or_operator<I>(values: I) -> ExprResult<Self>
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let values = check_not_empty(values.into_iter().collect(), "values")?;
        Self::fold_values(Operator::Or, check_all_not_null(values, "values")?)
    }

    #[instrument(level = "trace", skip(values), fields(count = values.len()))]
    fn fold_values(operator: Operator, values: Vec<T>) -> ExprResult<Self> {
        let mut values = check_not_empty(values, "values")?.into_iter();
        let mut tree = Self::leaf(check_not_null(values.next(), "values")?, operator);
        for value in values {
            tree.combine(operator, Self::of(value));
        }
        Ok(tree)
    }

    /// Groups existing trees under AND without flattening them.
    ///
    /// A single tree is returned as is.
    pub fn and_chains<I>(trees: I) -> ExprResult<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        Self::group_chains(Operator::And, trees.into_iter().collect())
    }

    /// Groups existing trees under OR without flattening them.
    ///
    /// A single tree is returned as is.
    pub fn or_chains<I>(trees: I) -> ExprResult<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        Self::group_chains(Operator::Or, trees.into_iter().collect())
    }

    pub fn try_and_chains<I>(trees: I) -> ExprResult<Self>
    where
        I: IntoIterator<Item = Option<Self>>,
    {
        let trees = check_not_empty(trees.into_iter().collect(), "trees")?;
        Self::group_chains(Operator::And, check_all_not_null(trees, "trees")?)
    }

    pub fn try_or_chains<I>(trees: I) -> ExprResult<Self>
    where
        I: IntoIterator<Item = Option<Self>>,
    {
        let trees = check_not_empty(trees.into_iter().collect(), "trees")?;
        Self::group_chains(Operator::Or, check_all_not_null(trees, "trees")?)
    }

    #[instrument(level = "trace", skip(trees), fields(count = trees.len()))]
    fn group_chains(operator: Operator, trees: Vec<Self>) -> ExprResult<Self> {
        let mut trees = check_not_empty(trees, "trees")?;
        // no need for a parent operator
        if trees.len() == 1 {
            return check_not_null(trees.pop(), "trees");
        }
        Ok(Self::group(operator, trees))
    }

    pub fn and(self, value: T) -> Self {
        self.and_tree(Self::of(value))
    }

    pub fn and_tree(mut self, node: Self) -> Self {
        self.combine(Operator::And, node);
        self
    }

    /// Combines with AND when `value` is present, otherwise returns `self` untouched.
    pub fn and_optional(self, value: Option<T>) -> Self {
        match value {
            Some(value) => self.and(value),
            None => self,
        }
    }

    pub fn or(self, value: T) -> Self {
        self.or_tree(Self::of(value))
    }

    pub fn or_tree(mut self, node: Self) -> Self {
        self.combine(Operator::Or, node);
        self
    }

    /// Combines with OR when `value` is present, otherwise returns `self` untouched.
    pub fn or_optional(self, value: Option<T>) -> Self {
        match value {
            Some(value) => self.or(value),
            None => self,
        }
    }

    /// In-place AND of a value that must be present.
    pub fn try_and(&mut self, value: Option<T>) -> ExprResult<&mut Self> {
        let value = check_not_null(value, "value")?;
        Ok(self.combine(Operator::And, Self::of(value)))
    }

    /// In-place OR of a value that must be present.
    pub fn try_or(&mut self, value: Option<T>) -> ExprResult<&mut Self> {
        let value = check_not_null(value, "value")?;
        Ok(self.combine(Operator::Or, Self::of(value)))
    }

    pub fn try_and_tree(&mut self, node: Option<Self>) -> ExprResult<&mut Self> {
        let node = check_not_null(node, "tree")?;
        Ok(self.combine(Operator::And, node))
    }

    pub fn try_or_tree(&mut self, node: Option<Self>) -> ExprResult<&mut Self> {
        let node = check_not_null(node, "tree")?;
        Ok(self.combine(Operator::Or, node))
    }

    /// Attaches `node` to this tree under `operator`, rewriting the receiver in place.
    ///
    /// - same operator: `node` is appended to the group. A leaf first becomes a
    ///   group holding its old value.
    /// - different operator: the whole current node moves down one level and the
    ///   receiver becomes a two-child `operator` group `[previous, node]`.
    #[instrument(level = "trace", skip(self, node), fields(receiver = %self.operator))]
    pub fn combine(&mut self, operator: Operator, node: Self) -> &mut Self {
        match (self.operator, operator) {
            (Operator::And, Operator::And) | (Operator::Or, Operator::Or) => self.append(node),
            (Operator::And, Operator::Or) | (Operator::Or, Operator::And) => {
                self.demote(operator, node)
            }
        }
        self
    }

    fn append(&mut self, node: Self) {
        // already a group of this operator, keep it flat
        if self.is_group() {
            self.children.push(node);
            trace!(children = self.children.len(), "appended to group");
            return;
        }

        let old_leaf = self.take_node();
        self.children = vec![old_leaf, node];
        trace!("leaf promoted to group");
    }

    fn demote(&mut self, operator: Operator, node: Self) {
        let previous = self.take_node();
        trace!(
            from = %previous.operator,
            to = %operator,
            moved_children = previous.children.len(),
            "split on operator switch"
        );
        self.operator = operator;
        self.children = vec![previous, node];
    }

    /// Moves value, operator and the child list out into a new node, leaving
    /// `self` without value or children.
    fn take_node(&mut self) -> Self {
        Self {
            value: self.value.take(),
            operator: self.operator,
            children: mem::take(&mut self.children),
        }
    }

    pub fn is_group(&self) -> bool {
        self.value.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_group()
    }

    pub fn is_and(&self) -> bool {
        self.operator == Operator::And
    }

    pub fn is_or(&self) -> bool {
        self.operator == Operator::Or
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Direct children, empty for leaves.
    pub fn children(&self) -> &[ExpressionTree<T>] {
        &self.children
    }

    pub fn into_value(mut self) -> Option<T> {
        self.value.take()
    }

    pub fn into_children(mut self) -> Vec<ExpressionTree<T>> {
        mem::take(&mut self.children)
    }

    /// Number of levels, a leaf counts as one.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Leaf values from left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &T> {
        self.iter().filter_map(|node| node.value.as_ref())
    }

    /// Pre-order traversal over all nodes.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { stack: vec![self] }
    }
}

// Every operator switch adds a level, so the default recursive drop could
// exhaust the stack on long alternating chains.
impl<T> Drop for ExpressionTree<T> {
    fn drop(&mut self) {
        let mut stack = mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

pub struct Iter<'a, T> {
    stack: Vec<&'a ExpressionTree<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a ExpressionTree<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl<'a, T> IntoIterator for &'a ExpressionTree<T> {
    type Item = &'a ExpressionTree<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
