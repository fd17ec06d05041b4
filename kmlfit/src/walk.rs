//! Depth-first traversal of document trees.
//!
//! [`walk`] visits nodes in pre-order and lets the visitor steer the
//! traversal through the [`Step`] it returns:
//!
//! - [`Step::Continue`] descends into the node's children, handing them the
//!   carried context
//! - [`Step::SkipChildren`] moves on to the next sibling
//! - [`Step::Stop`] ends the whole traversal
//!
//! Which children a node has depends on [`WalkOptions`]: group features are
//! followed by default, geometries (a placemark's geometry, a multi-geometry's
//! members, a polygon's inner boundaries) only when asked for.
//!
//! # Example
//!
//! ```
//! use kmlfit::document::Node;
//! use kmlfit::walk::{walk, Step, WalkOptions};
//!
//! let tree = Node::group(vec![Node::group(vec![Node::point(0.0, 0.0, 0.0)])]);
//!
//! // Record the depth of every node
//! let mut depths = Vec::new();
//! walk(
//!     &tree,
//!     |_node, depth: &usize| {
//!         depths.push(*depth);
//!         Step::Continue(depth + 1)
//!     },
//!     WalkOptions::with_root_context(0),
//! );
//!
//! assert_eq!(depths, vec![0, 1, 2]);
//! ```

use std::ops::ControlFlow;

use crate::document::Node;

/// What the walker does after visiting a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<C> {
    /// Descend into the node's children with this context.
    Continue(C),
    /// Do not descend into this node; continue with its siblings.
    SkipChildren,
    /// Stop the traversal entirely.
    Stop,
}

impl<C: Clone> Step<C> {
    /// Continue, handing the children the same context this node received.
    pub fn inherit(current: &C) -> Self {
        Step::Continue(current.clone())
    }
}

/// How a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Every reachable node was visited (or skipped by request).
    Completed,
    /// The visitor returned [`Step::Stop`].
    Stopped,
}

impl WalkOutcome {
    /// Whether the visitor stopped the walk.
    pub fn is_stopped(&self) -> bool {
        matches!(self, WalkOutcome::Stopped)
    }
}

/// Walk options.
#[derive(Debug, Clone)]
pub struct WalkOptions<C> {
    /// Descend into the child features of groups.
    pub features: bool,
    /// Descend into geometries: placemark geometry, multi-geometry members
    /// and polygon inner boundaries.
    pub geometries: bool,
    /// Context handed to the root node.
    pub root_context: C,
}

impl<C: Default> Default for WalkOptions<C> {
    fn default() -> Self {
        Self::with_root_context(C::default())
    }
}

impl<C> WalkOptions<C> {
    /// Default descent options with the given root context.
    pub fn with_root_context(root_context: C) -> Self {
        Self {
            features: true,
            geometries: false,
            root_context,
        }
    }

    /// Set whether group features are walked.
    pub fn with_features(mut self, features: bool) -> Self {
        self.features = features;
        self
    }

    /// Set whether geometries are walked.
    pub fn with_geometries(mut self, geometries: bool) -> Self {
        self.geometries = geometries;
        self
    }
}

/// Walk `root` depth-first in pre-order, calling `visit` on every node.
///
/// `visit` receives the node and the context produced by its parent (the
/// root receives `options.root_context`).
pub fn walk<C, F>(root: &Node, mut visit: F, options: WalkOptions<C>) -> WalkOutcome
where
    F: FnMut(&Node, &C) -> Step<C>,
{
    let descent = Descent {
        features: options.features,
        geometries: options.geometries,
    };
    match recurse(root, &options.root_context, &mut visit, descent) {
        ControlFlow::Continue(()) => WalkOutcome::Completed,
        ControlFlow::Break(()) => WalkOutcome::Stopped,
    }
}

#[derive(Clone, Copy)]
struct Descent {
    features: bool,
    geometries: bool,
}

impl Descent {
    /// Children to walk below `node`, first matching rule wins.
    fn children<'a>(&self, node: &'a Node) -> &'a [Node] {
        if let Some(features) = node.features() {
            if self.features {
                return features;
            }
        } else if let Node::Placemark(placemark) = node {
            if self.geometries {
                if let Some(geometry) = placemark.geometry.as_deref() {
                    return std::slice::from_ref(geometry);
                }
            }
        } else if let Some(geometries) = node.geometries() {
            if self.geometries {
                return geometries;
            }
        } else if let Some(boundaries) = node.inner_boundaries() {
            if self.geometries {
                return boundaries;
            }
        }
        &[]
    }
}

fn recurse<C, F>(node: &Node, context: &C, visit: &mut F, descent: Descent) -> ControlFlow<()>
where
    F: FnMut(&Node, &C) -> Step<C>,
{
    let child_context = match visit(node, context) {
        Step::Continue(child_context) => child_context,
        Step::SkipChildren => return ControlFlow::Continue(()),
        Step::Stop => return ControlFlow::Break(()),
    };

    for child in descent.children(node) {
        recurse(child, &child_context, visit, descent)?;
    }
    ControlFlow::Continue(())
}
