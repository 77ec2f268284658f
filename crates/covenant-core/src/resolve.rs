//! Route resolution over a merged tree.

use crate::tree::{MergedRoute, MergedTree, Node};
use http::Method;

/// Finds the first route serving `method` on `path`.
///
/// The tree is searched depth-first in declaration order. A branch without
/// a match does not end the search; every leaf is considered before giving
/// up.
pub fn resolve<'a>(tree: &'a MergedTree, path: &str, method: &Method) -> Option<&'a MergedRoute> {
    resolve_with_key(tree, path, method).map(|(_, route)| route)
}

/// Like [`resolve`], also returning the dotted key path of the route.
pub fn resolve_with_key<'a>(
    tree: &'a MergedTree,
    path: &str,
    method: &Method,
) -> Option<(String, &'a MergedRoute)> {
    let mut keys = Vec::new();
    find(tree, path, method, &mut keys).map(|route| (keys.join("."), route))
}

fn find<'a>(
    node: &'a MergedTree,
    path: &str,
    method: &Method,
    keys: &mut Vec<&'a str>,
) -> Option<&'a MergedRoute> {
    match node {
        Node::Leaf(route) => route.contract.accepts(method, path).then_some(route),
        Node::Branch(children) => {
            for (key, child) in children {
                keys.push(key);
                if let Some(route) = find(child, path, method, keys) {
                    return Some(route);
                }
                keys.pop();
            }
            None
        }
    }
}
