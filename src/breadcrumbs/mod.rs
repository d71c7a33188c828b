//! Breadcrumb trails derived from parent links between states.
//!
//! Each state that appears in navigation names at most one parent. The trail
//! of a state is the list of display items from the root down to it. Trails
//! are derived once for the whole table and then looked up per render.

use crate::core::State;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub mod error;

pub use error::BreadcrumbError;

/// A state's place in navigation: its parent and what to display for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreadcrumbNode<S, I> {
    pub parent: Option<S>,
    pub item: I,
}

impl<S, I> BreadcrumbNode<S, I> {
    pub fn root(item: I) -> Self {
        Self { parent: None, item }
    }

    pub fn child(parent: S, item: I) -> Self {
        Self {
            parent: Some(parent),
            item,
        }
    }
}

/// Derive the trail of every node, root first.
///
/// The input is only borrowed; items are cloned into the trails. Nodes are
/// visited in name order, so the same table always yields the same error.
///
/// # Example
///
/// ```rust
/// use flowkit::breadcrumbs::{build_breadcrumbs, BreadcrumbNode};
/// use flowkit::flow_states;
/// use std::collections::HashMap;
///
/// flow_states! {
///     enum Step {
///         Landing,
///         Profile,
///         Taxes,
///     }
/// }
///
/// let nodes = HashMap::from([
///     (Step::Landing, BreadcrumbNode::root("Start")),
///     (Step::Profile, BreadcrumbNode::child(Step::Landing, "Profile")),
///     (Step::Taxes, BreadcrumbNode::child(Step::Profile, "Taxes")),
/// ]);
///
/// let trails = build_breadcrumbs(&nodes).unwrap();
/// assert_eq!(trails[&Step::Taxes], vec!["Start", "Profile", "Taxes"]);
/// ```
pub fn build_breadcrumbs<S, I>(
    nodes: &HashMap<S, BreadcrumbNode<S, I>>,
) -> Result<HashMap<S, Vec<I>>, BreadcrumbError>
where
    S: State,
    I: Clone,
{
    let mut entries: Vec<(&S, &BreadcrumbNode<S, I>)> = nodes.iter().collect();
    entries.sort_by(|a, b| a.0.name().cmp(b.0.name()));

    let mut trails = HashMap::with_capacity(entries.len());
    for (name, node) in entries {
        trails.insert(name.clone(), trail_for(name, node, nodes)?);
    }
    Ok(trails)
}

fn trail_for<S, I>(
    start: &S,
    start_node: &BreadcrumbNode<S, I>,
    nodes: &HashMap<S, BreadcrumbNode<S, I>>,
) -> Result<Vec<I>, BreadcrumbError>
where
    S: State,
    I: Clone,
{
    let mut visited: HashSet<&S> = HashSet::new();
    let mut path: Vec<&S> = Vec::new();
    let mut items = Vec::new();

    let mut name = start;
    let mut node = start_node;
    loop {
        if !visited.insert(name) {
            path.push(name);
            return Err(BreadcrumbError::CyclicGraph {
                node: start.name().to_string(),
                path: path.iter().map(|s| s.name().to_string()).collect(),
            });
        }
        path.push(name);
        items.push(node.item.clone());

        let Some(parent) = &node.parent else {
            break;
        };
        node = nodes
            .get(parent)
            .ok_or_else(|| BreadcrumbError::BrokenParentReference {
                node: name.name().to_string(),
                parent: parent.name().to_string(),
            })?;
        name = parent;
    }

    items.reverse();
    Ok(items)
}

/// Precomputed trails for a flow, built once and read on every render.
#[derive(Clone, Debug)]
pub struct Breadcrumbs<S: State, I> {
    trails: HashMap<S, Vec<I>>,
}

impl<S: State, I: Clone> Breadcrumbs<S, I> {
    pub fn build(nodes: &HashMap<S, BreadcrumbNode<S, I>>) -> Result<Self, BreadcrumbError> {
        let trails = build_breadcrumbs(nodes)?;
        tracing::debug!(nodes = trails.len(), "breadcrumb trails derived");
        Ok(Self { trails })
    }

    /// Build from a JSON object mapping state names to nodes.
    ///
    /// ```rust
    /// use flowkit::breadcrumbs::Breadcrumbs;
    /// use flowkit::flow_states;
    ///
    /// flow_states! {
    ///     enum Step {
    ///         List,
    ///         Sign,
    ///     }
    /// }
    ///
    /// let crumbs: Breadcrumbs<Step, String> = Breadcrumbs::from_json(
    ///     r#"{"List": {"item": "Documents"}, "Sign": {"parent": "List", "item": "Sign"}}"#,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(crumbs.trail(&Step::Sign).unwrap(), ["Documents", "Sign"]);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, BreadcrumbError>
    where
        I: DeserializeOwned,
    {
        let nodes: HashMap<S, BreadcrumbNode<S, I>> = serde_json::from_str(json)?;
        Self::build(&nodes)
    }
}

impl<S: State, I> Breadcrumbs<S, I> {
    /// Trail for `state`, root first. `None` for states without a breadcrumb.
    pub fn trail(&self, state: &S) -> Option<&[I]> {
        self.trails.get(state).map(Vec::as_slice)
    }

    /// Number of items in the trail of `state`.
    pub fn depth(&self, state: &S) -> Option<usize> {
        self.trails.get(state).map(Vec::len)
    }

    /// Length of the longest trail.
    pub fn max_depth(&self) -> usize {
        self.trails.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.trails.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.trails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    pub fn into_inner(self) -> HashMap<S, Vec<I>> {
        self.trails
    }
}
