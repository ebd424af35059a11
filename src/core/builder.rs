//! Build orchestration logic
//!
//! Coordinates the build of every library in dependency order.
//!
//! A run goes through `collecting -> sorted -> building(i) -> completed |
//! failed`. The order is computed once, up front, by [`BuildOrchestrator::plan`];
//! [`BuildPlan::execute`] then starts one external build at a time and only
//! moves on once the previous one has succeeded. The first failure ends the
//! run, already built libraries are left as they are.

use std::collections::{HashMap, VecDeque};
use std::future::Future;

use futures::stream::{self, Stream};

use crate::config::defaults::ROOT_NODE;
use crate::core::resolver::DependencyGraph;
use crate::error::{BuildError, ExecError, WorkspaceError};

/// A buildable library project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildUnit {
    /// Project name, unique in the workspace
    pub name: String,
    /// Project root, relative to the workspace root
    pub root: String,
    /// Declared peer dependency names, in declaration order
    pub dependencies: Vec<String>,
}

/// Source of build unit descriptors
pub trait UnitCatalog {
    /// All buildable units with their declared dependency names
    fn build_units(&self) -> Result<Vec<BuildUnit>, WorkspaceError>;
}

impl UnitCatalog for Vec<BuildUnit> {
    fn build_units(&self) -> Result<Vec<BuildUnit>, WorkspaceError> {
        Ok(self.clone())
    }
}

/// The external build step for one unit
pub trait BuildAction {
    /// Build the unit named `unit`
    fn build(&self, unit: &str) -> impl Future<Output = Result<(), ExecError>> + Send;
}

/// Build orchestrator
#[derive(Debug)]
pub struct BuildOrchestrator<'a, C> {
    catalog: &'a C,
}

impl<'a, C: UnitCatalog> BuildOrchestrator<'a, C> {
    /// Create a new build orchestrator over `catalog`
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Collect the units and compute the build order
    ///
    /// Dependency names that are not units of the catalog are ignored. A unit
    /// named like the graph root is rejected.
    pub fn plan(&self) -> Result<BuildPlan, BuildError> {
        let units = self.catalog.build_units()?;

        let mut graph = DependencyGraph::new();
        for unit in &units {
            if unit.name == ROOT_NODE {
                return Err(BuildError::ReservedUnitName {
                    name: unit.name.clone(),
                });
            }
            graph.add(&unit.name);
        }
        for unit in &units {
            for dep in &unit.dependencies {
                if graph.contains(dep) {
                    graph.set_dependency(&unit.name, dep);
                }
            }
        }

        let order = graph.sort()?;
        let mut by_name: HashMap<String, BuildUnit> = units
            .into_iter()
            .map(|unit| (unit.name.clone(), unit))
            .collect();
        let units = order
            .iter()
            .filter_map(|name| by_name.remove(name))
            .collect();

        Ok(BuildPlan { units })
    }

    /// Build every unit in dependency order
    ///
    /// Fails before any build when the order cannot be computed. Otherwise
    /// returns a lazy stream yielding each unit once its build succeeded; a
    /// failed build is the last item of the stream.
    pub fn build_all<'b, A: BuildAction>(
        &self,
        action: &'b A,
    ) -> Result<impl Stream<Item = Result<BuildUnit, BuildError>> + 'b, BuildError> {
        Ok(self.plan()?.execute(action))
    }

    /// Build a single unit, ignoring its dependencies
    pub async fn build_one<A: BuildAction>(
        &self,
        name: &str,
        action: &A,
    ) -> Result<BuildUnit, BuildError> {
        let unit = self
            .catalog
            .build_units()?
            .into_iter()
            .find(|unit| unit.name == name)
            .ok_or_else(|| BuildError::UnknownUnit {
                name: name.to_string(),
            })?;

        tracing::info!("Building {}", unit.name);
        action
            .build(&unit.name)
            .await
            .map_err(|e| BuildError::BuildFailed {
                unit: unit.name.clone(),
                error: e.to_string(),
            })?;
        Ok(unit)
    }
}

/// Units in build order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildPlan {
    units: Vec<BuildUnit>,
}

impl BuildPlan {
    /// Units in the order they will be built
    pub fn units(&self) -> &[BuildUnit] {
        &self.units
    }

    /// Unit names in build order
    pub fn order(&self) -> Vec<&str> {
        self.units.iter().map(|unit| unit.name.as_str()).collect()
    }

    /// Number of units to build
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether there is nothing to build
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Run the builds sequentially
    ///
    /// Nothing starts until the stream is polled, and the next build is only
    /// started after the previous item has been produced.
    pub fn execute<A: BuildAction>(
        self,
        action: &A,
    ) -> impl Stream<Item = Result<BuildUnit, BuildError>> + '_ {
        let pending: VecDeque<BuildUnit> = self.units.into();
        stream::try_unfold(pending, move |mut pending| async move {
            let Some(unit) = pending.pop_front() else {
                return Ok(None);
            };

            tracing::info!("Building {}", unit.name);
            if let Err(e) = action.build(&unit.name).await {
                tracing::debug!("Build of {} failed, {} skipped", unit.name, pending.len());
                return Err(BuildError::BuildFailed {
                    unit: unit.name,
                    error: e.to_string(),
                });
            }

            Ok(Some((unit, pending)))
        })
    }
}
