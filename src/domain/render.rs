//! Text renderings of expression trees: parenthesized infix and `termtree` diagrams.

use std::fmt;

use itertools::Itertools;
use termtree::Tree;

use crate::domain::error::ExprResult;
use crate::domain::operator::Operator;
use crate::domain::preconditions::check_argument;
use crate::domain::tree::ExpressionTree;

/// Symbols and layout used when rendering a tree as infix text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    and_symbol: String,
    or_symbol: String,
    parenthesize_root: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            and_symbol: Operator::And.symbol().to_string(),
            or_symbol: Operator::Or.symbol().to_string(),
            parenthesize_root: true,
        }
    }
}

impl RenderStyle {
    pub fn new(
        and_symbol: impl Into<String>,
        or_symbol: impl Into<String>,
        parenthesize_root: bool,
    ) -> ExprResult<Self> {
        let and_symbol = and_symbol.into();
        let or_symbol = or_symbol.into();
        check_argument(!and_symbol.trim().is_empty(), "and symbol must not be blank")?;
        check_argument(!or_symbol.trim().is_empty(), "or symbol must not be blank")?;
        check_argument(
            and_symbol != or_symbol,
            format!("and/or symbols must differ, both are '{}'", and_symbol),
        )?;
        Ok(Self {
            and_symbol,
            or_symbol,
            parenthesize_root,
        })
    }

    pub fn symbol(&self, operator: Operator) -> &str {
        match operator {
            Operator::And => &self.and_symbol,
            Operator::Or => &self.or_symbol,
        }
    }

    /// Infix rendering, e.g. `((A && B) || C)`.
    pub fn render<T: fmt::Display>(&self, tree: &ExpressionTree<T>) -> String {
        self.display(tree).to_string()
    }

    pub fn display<'a, T>(&'a self, tree: &'a ExpressionTree<T>) -> Infix<'a, T> {
        Infix {
            style: self,
            tree,
            root: true,
        }
    }

    /// Diagram with one line per node, groups labelled by their operator symbol.
    pub fn to_tree<T: fmt::Display>(&self, tree: &ExpressionTree<T>) -> Tree<String> {
        let label = match tree.value() {
            Some(value) => value.to_string(),
            None => self.symbol(tree.operator()).to_string(),
        };

        let leaves: Vec<_> = tree
            .children()
            .iter()
            .map(|child| self.to_tree(child))
            .collect();

        Tree::new(label).with_leaves(leaves)
    }
}

/// Lazily formatted infix view of a tree.
pub struct Infix<'a, T> {
    style: &'a RenderStyle,
    tree: &'a ExpressionTree<T>,
    root: bool,
}

impl<T: fmt::Display> fmt::Display for Infix<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(value) = self.tree.value() {
            return write!(f, "{}", value);
        }

        let separator = format!(" {} ", self.style.symbol(self.tree.operator()));
        let body = self
            .tree
            .children()
            .iter()
            .map(|child| Infix {
                style: self.style,
                tree: child,
                root: false,
            })
            .join(&separator);

        if self.root && !self.style.parenthesize_root {
            write!(f, "{}", body)
        } else {
            write!(f, "({})", body)
        }
    }
}

impl<T: fmt::Display> fmt::Display for ExpressionTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", RenderStyle::default().display(self))
    }
}

pub trait TreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: fmt::Display> TreeConvert for ExpressionTree<T> {
    fn to_tree_string(&self) -> Tree<String> {
        RenderStyle::default().to_tree(self)
    }
}
