//! Dependency resolution
//!
//! Computes build order for library projects and detects circular
//! dependencies.
//!
//! Every node added to the graph is also attached to a synthetic root node
//! ([`ROOT_NODE`]), so ordering the whole graph is the same as resolving the
//! root. Dependencies are visited in declaration order, which makes the
//! resulting order deterministic.

use std::collections::HashMap;

use crate::config::defaults::ROOT_NODE;
use crate::error::ResolverError;

/// A unit in the graph. `dependencies` are indices into the node arena.
#[derive(Debug)]
struct Node {
    name: String,
    dependencies: Vec<usize>,
}

/// Dependency graph for library projects
#[derive(Debug)]
pub struct DependencyGraph {
    /// Node arena, the root is always at index 0
    nodes: Vec<Node>,
    /// Name -> arena index
    index: HashMap<String, usize>,
}

const ROOT: usize = 0;

impl Default for DependencyGraph {
    fn default() -> Self {
        Self {
            nodes: vec![Node {
                name: ROOT_NODE.to_string(),
                dependencies: Vec::new(),
            }],
            index: HashMap::from([(ROOT_NODE.to_string(), ROOT)]),
        }
    }
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit to the graph. Adding an existing name is a no-op.
    pub fn add(&mut self, name: &str) {
        self.node_id(name);
    }

    /// Declare that `name` depends on `depends_on`
    ///
    /// Both units are created if missing. Repeated calls with the same pair
    /// record a duplicate edge, which resolution tolerates.
    pub fn set_dependency(&mut self, name: &str, depends_on: &str) {
        let dependent = self.node_id(name);
        let dependency = self.node_id(depends_on);
        tracing::debug!("{name} -> {depends_on}");
        self.nodes[dependent].dependencies.push(dependency);
    }

    /// Whether a unit with this name has been added
    pub fn contains(&self, name: &str) -> bool {
        name != ROOT_NODE && self.index.contains_key(name)
    }

    /// Number of units, not counting the synthetic root
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Whether no unit has been added
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Direct dependencies of a unit, in declaration order
    pub fn dependencies(&self, name: &str) -> Result<Vec<&str>, ResolverError> {
        let id = self.lookup(name)?;
        Ok(self.nodes[id]
            .dependencies
            .iter()
            .map(|&dep| self.nodes[dep].name.as_str())
            .collect())
    }

    /// Resolve the build order of a single unit
    ///
    /// Returns every transitive dependency of `name` followed by `name`
    /// itself, each dependency strictly before the units that need it.
    pub fn resolve(&self, name: &str) -> Result<Vec<String>, ResolverError> {
        let start = self.lookup(name)?;
        Ok(self
            .resolve_ids(start)?
            .into_iter()
            .map(|id| self.nodes[id].name.clone())
            .collect())
    }

    /// Compute the build order of every unit in the graph
    pub fn sort(&self) -> Result<Vec<String>, ResolverError> {
        let mut order = self.resolve_ids(ROOT)?;
        order.pop();
        Ok(order
            .into_iter()
            .map(|id| self.nodes[id].name.clone())
            .collect())
    }

    fn lookup(&self, name: &str) -> Result<usize, ResolverError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| ResolverError::NotFound {
                name: name.to_string(),
            })
    }

    fn node_id(&mut self, name: &str) -> usize {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(Node {
            name: name.to_string(),
            dependencies: Vec::new(),
        });
        self.index.insert(name.to_string(), id);
        // the root itself is created with the graph and never reaches here
        self.nodes[ROOT].dependencies.push(id);
        id
    }

    /// Depth-first walk with an explicit stack of (node, next dependency)
    /// frames. Equivalent to the recursive formulation: a node is emitted
    /// once all its dependencies are, and meeting a node that is still on
    /// the active path is a cycle.
    fn resolve_ids(&self, start: usize) -> Result<Vec<usize>, ResolverError> {
        let mut resolved = vec![false; self.nodes.len()];
        let mut on_stack = vec![false; self.nodes.len()];
        let mut order = Vec::new();
        let mut stack = vec![(start, 0usize)];
        on_stack[start] = true;

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            if let Some(&dep) = self.nodes[node].dependencies.get(next) {
                frame.1 += 1;
                if resolved[dep] {
                    continue;
                }
                if on_stack[dep] {
                    return Err(ResolverError::CircularDependency {
                        dependent: self.nodes[node].name.clone(),
                        dependency: self.nodes[dep].name.clone(),
                    });
                }
                on_stack[dep] = true;
                stack.push((dep, 0));
            } else {
                stack.pop();
                on_stack[node] = false;
                resolved[node] = true;
                order.push(node);
            }
        }

        Ok(order)
    }
}
