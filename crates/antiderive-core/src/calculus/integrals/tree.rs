//! AND/OR proof tree for the integration search
//!
//! Nodes live in an index arena; children own their subtrees through the
//! arena while the parent link is a plain back-reference. Growth is purely
//! additive: the search only appends children and promotes node kinds, so
//! indices stay valid for the lifetime of one integration call.

use super::transforms::Transform;
use crate::core::{Expression, Symbol};
use crate::simplify::Simplify;

pub(crate) type NodeId = usize;

/// Role of a node in the AND/OR tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    /// Default single-child state; solved when all children are solved
    Unset,
    /// Every child must be solved
    And,
    /// Any solved child suffices
    Or,
    /// Terminal success; carries its solution
    Solution,
    /// Terminal failure
    Failure,
}

#[derive(Debug)]
pub(crate) struct Node {
    pub expr: Expression,
    pub var: Symbol,
    /// The transform that produced this node; `None` only at the root
    pub transform: Option<Transform>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
    /// Present on solution nodes, and on ancestors after back-propagation
    pub solution: Option<Expression>,
}

#[derive(Debug)]
pub(crate) struct Tree {
    nodes: Vec<Node>,
    fresh_counter: usize,
}

impl Tree {
    /// Create a tree with a simplified root; the root has no incoming
    /// transform
    pub fn new(expr: Expression, var: Symbol) -> (Self, NodeId) {
        let tree = Self {
            nodes: vec![Node {
                expr: expr.simplify(),
                var,
                transform: None,
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Unset,
                solution: None,
            }],
            fresh_counter: 0,
        };
        (tree, 0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Append a child; the expression is simplified on insertion
    pub fn add_child(
        &mut self,
        parent: NodeId,
        expr: Expression,
        var: Symbol,
        transform: Transform,
    ) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            expr: expr.simplify(),
            var,
            transform: Some(transform),
            parent: Some(parent),
            children: Vec::new(),
            kind: NodeKind::Unset,
            solution: None,
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Append a terminal solution child
    pub fn add_solution_child(
        &mut self,
        parent: NodeId,
        expr: Expression,
        var: Symbol,
        transform: Transform,
        solution: Expression,
    ) -> NodeId {
        let id = self.add_child(parent, expr, var, transform);
        let node = self.node_mut(id);
        node.kind = NodeKind::Solution;
        node.solution = Some(solution);
        id
    }

    /// Deterministic fresh intermediate variable for substitutions
    pub fn fresh_symbol(&mut self) -> Symbol {
        let name = format!("u_{}", self.fresh_counter);
        self.fresh_counter += 1;
        Symbol::new(name)
    }

    pub fn is_solved(&self, id: NodeId) -> bool {
        let node = self.node(id);
        match node.kind {
            NodeKind::Solution => true,
            NodeKind::Failure => false,
            NodeKind::Or => {
                !node.children.is_empty()
                    && node.children.iter().any(|&child| self.is_solved(child))
            }
            NodeKind::And | NodeKind::Unset => {
                !node.children.is_empty()
                    && node.children.iter().all(|&child| self.is_solved(child))
            }
        }
    }

    pub fn is_failed(&self, id: NodeId) -> bool {
        let node = self.node(id);
        match node.kind {
            NodeKind::Failure => true,
            NodeKind::Solution => false,
            NodeKind::Or => {
                !node.children.is_empty()
                    && node.children.iter().all(|&child| self.is_failed(child))
            }
            NodeKind::And | NodeKind::Unset => {
                node.children.iter().any(|&child| self.is_failed(child))
            }
        }
    }

    pub fn is_finished(&self, id: NodeId) -> bool {
        self.is_solved(id) || self.is_failed(id)
    }

    /// All leaves under `id`, in depth-first creation order
    pub fn leaves(&self, id: NodeId) -> Vec<NodeId> {
        let node = self.node(id);
        if node.children.is_empty() {
            return vec![id];
        }
        node.children
            .iter()
            .flat_map(|&child| self.leaves(child))
            .collect()
    }

    /// Leaves still waiting for work
    pub fn unfinished_leaves(&self, id: NodeId) -> Vec<NodeId> {
        self.leaves(id)
            .into_iter()
            .filter(|&leaf| !self.is_finished(leaf))
            .collect()
    }

    /// Children of `id` that are not yet finished
    pub fn unfinished_children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .children
            .iter()
            .copied()
            .filter(|&child| !self.is_finished(child))
            .collect()
    }

    pub fn depth(&self, id: NodeId) -> usize {
        match self.node(id).parent {
            Some(parent) => 1 + self.depth(parent),
            None => 0,
        }
    }

    /// The transform of the nearest ancestor edge that made real progress
    ///
    /// Pulling constants, splitting sums and expanding do not change what
    /// kind of integrand we face, so loop prevention looks through them to
    /// the last substantial transform.
    pub fn last_heuristic_transform(&self, id: NodeId) -> Option<&Transform> {
        let node = self.node(id);
        match &node.transform {
            Some(Transform::PullConstant { .. })
            | Some(Transform::Additivity)
            | Some(Transform::Expand) => {
                self.last_heuristic_transform(node.parent.expect("non-root has a parent"))
            }
            other => other.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Symbol {
        Symbol::new("x")
    }

    fn leaf_tree() -> (Tree, NodeId) {
        Tree::new(Expression::symbol(x()), x())
    }

    #[test]
    fn test_root_is_unfinished_leaf() {
        let (tree, root) = leaf_tree();
        assert!(!tree.is_finished(root));
        assert_eq!(tree.unfinished_leaves(root), vec![root]);
    }

    #[test]
    fn test_and_node_requires_all_children() {
        let (mut tree, root) = leaf_tree();
        tree.node_mut(root).kind = NodeKind::And;
        let a = tree.add_child(root, Expression::symbol(x()), x(), Transform::Additivity);
        let b = tree.add_child(root, Expression::symbol(x()), x(), Transform::Additivity);

        tree.node_mut(a).kind = NodeKind::Solution;
        assert!(!tree.is_solved(root));
        tree.node_mut(b).kind = NodeKind::Solution;
        assert!(tree.is_solved(root));
    }

    #[test]
    fn test_or_node_requires_any_child() {
        let (mut tree, root) = leaf_tree();
        tree.node_mut(root).kind = NodeKind::Or;
        let a = tree.add_child(root, Expression::symbol(x()), x(), Transform::RewriteTrig);
        let b = tree.add_child(root, Expression::symbol(x()), x(), Transform::RewriteTrig);

        tree.node_mut(a).kind = NodeKind::Failure;
        assert!(!tree.is_failed(root));
        assert!(!tree.is_solved(root));
        tree.node_mut(b).kind = NodeKind::Solution;
        assert!(tree.is_solved(root));
    }

    #[test]
    fn test_or_node_fails_only_when_all_children_fail() {
        let (mut tree, root) = leaf_tree();
        tree.node_mut(root).kind = NodeKind::Or;
        let a = tree.add_child(root, Expression::symbol(x()), x(), Transform::RewriteTrig);
        let b = tree.add_child(root, Expression::symbol(x()), x(), Transform::RewriteTrig);

        tree.node_mut(a).kind = NodeKind::Failure;
        tree.node_mut(b).kind = NodeKind::Failure;
        assert!(tree.is_failed(root));
    }

    #[test]
    fn test_fresh_symbols_are_distinct() {
        let (mut tree, _) = leaf_tree();
        let a = tree.fresh_symbol();
        let b = tree.fresh_symbol();
        assert_ne!(a, b);
    }

    #[test]
    fn test_depth() {
        let (mut tree, root) = leaf_tree();
        let a = tree.add_child(root, Expression::symbol(x()), x(), Transform::Expand);
        let b = tree.add_child(a, Expression::symbol(x()), x(), Transform::Expand);
        assert_eq!(tree.depth(root), 0);
        assert_eq!(tree.depth(b), 2);
    }
}
