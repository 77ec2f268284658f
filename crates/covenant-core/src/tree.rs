//! Keyed route trees and the contract/implementation merge.
//!
//! Contracts, implementations and their merge all share one shape: a
//! [`Node`] is either a leaf or a branch of named children. Keys keep their
//! insertion order, which is also the order routes are matched in.
//!
//! ```text
//! posts ─┬─ getPosts    GET  /posts
//!        ├─ getPost     GET  /posts/:id
//!        └─ createPost  POST /posts
//! health ── GET /health
//! ```

use crate::contract::RouteContract;
use crate::error::ContractError;
use crate::handler::RouteHandler;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

/// A tree of named routes: a leaf or a branch of named children.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<L> {
    /// A single route.
    Leaf(L),
    /// Named sub-trees in declaration order.
    Branch(IndexMap<String, Node<L>>),
}

/// A tree of route contracts.
pub type ContractTree = Node<RouteContract>;

/// A tree of handlers with the same shape as its contract tree.
pub type ImplementationTree = Node<RouteHandler>;

/// A tree of contracts paired with their handlers.
pub type MergedTree = Node<MergedRoute>;

impl<L> Node<L> {
    /// Creates a leaf.
    pub fn leaf(value: L) -> Self {
        Self::Leaf(value)
    }

    /// Creates a branch from `(key, child)` pairs.
    pub fn branch<K: Into<String>>(children: impl IntoIterator<Item = (K, Node<L>)>) -> Self {
        Self::Branch(
            children
                .into_iter()
                .map(|(key, child)| (key.into(), child))
                .collect(),
        )
    }

    /// Returns true for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns the leaf value, if this is a leaf.
    pub fn as_leaf(&self) -> Option<&L> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Branch(_) => None,
        }
    }

    /// Returns a direct child by key.
    pub fn get(&self, key: &str) -> Option<&Node<L>> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(children) => children.get(key),
        }
    }

    /// Follows a dotted key path such as `posts.getPost`.
    pub fn get_path(&self, path: &str) -> Option<&Node<L>> {
        path.split('.')
            .filter(|key| !key.is_empty())
            .try_fold(self, |node, key| node.get(key))
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Self::Leaf(_) => "leaf",
            Self::Branch(_) => "branch",
        }
    }

    /// Returns every leaf with its dotted key path, depth-first in
    /// declaration order.
    pub fn leaves(&self) -> Vec<(String, &L)> {
        let mut out = Vec::new();
        self.collect_leaves(String::new(), &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, prefix: String, out: &mut Vec<(String, &'a L)>) {
        match self {
            Self::Leaf(value) => out.push((prefix, value)),
            Self::Branch(children) => {
                for (key, child) in children {
                    child.collect_leaves(join_key(&prefix, key), out);
                }
            }
        }
    }

    /// Pairs this tree with `other`, combining leaves with `combine`.
    ///
    /// The walk is driven by this tree's keys. Keys present only in `other`
    /// are ignored; keys missing from `other` and leaf/branch disagreements
    /// are errors. `combine` receives the dotted key path of each leaf.
    pub fn zip_with<R, O>(
        &self,
        other: &Node<R>,
        mut combine: impl FnMut(&str, &L, &R) -> O,
    ) -> Result<Node<O>, ContractError> {
        self.zip_at(other, "", &mut combine)
    }

    fn zip_at<R, O>(
        &self,
        other: &Node<R>,
        path: &str,
        combine: &mut impl FnMut(&str, &L, &R) -> O,
    ) -> Result<Node<O>, ContractError> {
        match (self, other) {
            (Self::Leaf(left), Node::Leaf(right)) => Ok(Node::Leaf(combine(path, left, right))),
            (Self::Branch(left), Node::Branch(right)) => {
                let mut children = IndexMap::with_capacity(left.len());
                for (key, child) in left {
                    let child_path = join_key(path, key);
                    let Some(other_child) = right.get(key) else {
                        return Err(ContractError::MissingImplementation { path: child_path });
                    };
                    children.insert(key.clone(), child.zip_at(other_child, &child_path, combine)?);
                }
                for key in right.keys().filter(|key| !left.contains_key(*key)) {
                    debug!(key = %join_key(path, key), "ignoring implementation without a contract");
                }
                Ok(Node::Branch(children))
            }
            _ => Err(ContractError::ShapeMismatch {
                path: if path.is_empty() { "$".to_string() } else { path.to_string() },
                expected: self.kind_name(),
                found: other.kind_name(),
            }),
        }
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// A route contract paired with its handler.
#[derive(Debug, Clone)]
pub struct MergedRoute {
    /// The route's contract.
    pub contract: Arc<RouteContract>,
    /// The route's handler.
    pub handler: RouteHandler,
}

/// Pairs every contract leaf with the handler at the same key path.
///
/// Inputs are left untouched, so merging the same trees again produces a
/// structurally identical result.
pub fn merge(
    contract: &ContractTree,
    implementation: &ImplementationTree,
) -> Result<MergedTree, ContractError> {
    contract.zip_with(implementation, |_, route, handler| MergedRoute {
        contract: Arc::new(route.clone()),
        handler: handler.clone(),
    })
}
