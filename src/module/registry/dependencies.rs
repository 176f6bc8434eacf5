//! Module dependency resolution
//!
//! Owns the module registry and answers validation and ordering queries.
//! Startup order is a topological order over declared dependencies; among
//! modules that are ready at the same time, lower priority starts first and
//! equal priorities fall back to ordinal name comparison, so the same registry
//! always produces the same order.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::{debug, warn};

use crate::module::registry::descriptor::ModuleDescriptor;
use crate::module::traits::ModuleError;

/// Result of checking every required dependency against the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// True iff no missing dependency was found
    pub is_valid: bool,
    /// One entry per missing reference, naming the dependent and the dependency
    pub missing_dependencies: Vec<String>,
}

impl ValidationResult {
    /// Convert into an error carrying every missing reference
    pub fn into_result(self) -> Result<(), ModuleError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(ModuleError::DependencyMissing(self.missing_dependencies))
        }
    }
}

/// Dependency resolver
#[derive(Debug, Default)]
pub struct DependencyResolver {
    /// Registered modules (name -> descriptor)
    modules: BTreeMap<String, ModuleDescriptor>,
}

impl DependencyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module, replacing any previous descriptor with the same name
    pub fn register_module(&mut self, descriptor: ModuleDescriptor) -> Result<(), ModuleError> {
        if !descriptor.has_valid_name() {
            return Err(ModuleError::NameRequired(descriptor.name));
        }

        let name = descriptor.name.clone();
        if let Some(previous) = self.modules.insert(name.clone(), descriptor) {
            warn!(
                "Module {} was already registered (priority {}, dependencies {:?}), replacing it",
                name, previous.priority, previous.required_dependencies
            );
        } else {
            debug!("Registered module {}", name);
        }

        Ok(())
    }

    /// Number of distinct registered module names
    pub fn registered_module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn descriptor(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.get(name)
    }

    /// Registered names in ordinal order
    pub fn module_names(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    /// Check that every required dependency names a registered module
    ///
    /// Cycles are not checked here; they surface from [`Self::startup_order`].
    pub fn validate_dependencies(&self) -> ValidationResult {
        let mut missing = Vec::new();

        for (name, descriptor) in &self.modules {
            for dep in descriptor.required() {
                if !self.modules.contains_key(&dep) {
                    missing.push(format!("{} requires {} which is not registered", name, dep));
                }
            }
        }

        if !missing.is_empty() {
            debug!("Dependency validation found {} missing references", missing.len());
        }

        ValidationResult {
            is_valid: missing.is_empty(),
            missing_dependencies: missing,
        }
    }

    /// Deterministic startup order (dependencies first)
    ///
    /// Unregistered dependencies are ignored for ordering purposes. A cycle of
    /// required dependencies fails with [`ModuleError::CircularDependency`]
    /// carrying the cycle path.
    pub fn startup_order(&self) -> Result<Vec<String>, ModuleError> {
        let edges = self.ordering_edges();
        let mut in_degree: HashMap<&str, usize> = HashMap::new();
        let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();

        for (&name, deps) in &edges {
            in_degree.insert(name, deps.len());
            for &dep in deps {
                dependents.entry(dep).or_default().push(name);
            }
        }

        // Kahn's algorithm; the ready set is ordered by (priority, name)
        let mut ready: BTreeSet<(i32, &str)> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(&name, _)| (self.priority_of(name), name))
            .collect();

        let mut order = Vec::with_capacity(self.modules.len());

        while let Some((_, module)) = ready.pop_first() {
            order.push(module.to_string());

            if let Some(waiting) = dependents.get(module) {
                for &dependent in waiting {
                    if let Some(degree) = in_degree.get_mut(dependent) {
                        *degree -= 1;
                        if *degree == 0 {
                            ready.insert((self.priority_of(dependent), dependent));
                        }
                    }
                }
            }
        }

        if order.len() != self.modules.len() {
            let cycle = self.trace_cycle(&in_degree, &edges);
            warn!("Circular dependency detected: {}", cycle.join(" -> "));
            return Err(ModuleError::CircularDependency(cycle));
        }

        debug!("Dependency resolution complete: {:?}", order);
        Ok(order)
    }

    /// Exact reverse of [`Self::startup_order`]
    pub fn shutdown_order(&self) -> Result<Vec<String>, ModuleError> {
        let mut order = self.startup_order()?;
        order.reverse();
        Ok(order)
    }

    /// Filtered required dependencies of `name`, in declared order
    pub fn direct_dependencies(&self, name: &str) -> Vec<String> {
        if name.trim().is_empty() {
            return Vec::new();
        }
        self.modules
            .get(name)
            .map(ModuleDescriptor::required)
            .unwrap_or_default()
    }

    /// Registered modules that directly require `name`, in ordinal order
    pub fn direct_dependents(&self, name: &str) -> Vec<String> {
        if name.trim().is_empty() || !self.modules.contains_key(name) {
            return Vec::new();
        }
        self.modules
            .iter()
            .filter(|(_, descriptor)| descriptor.required().iter().any(|dep| dep == name))
            .map(|(module, _)| module.clone())
            .collect()
    }

    /// Registered predecessors of every module
    ///
    /// Required dependencies always count. An optional dependency counts only
    /// when its dependency does not already wait on the dependent, so optional
    /// edges never close a cycle.
    fn ordering_edges(&self) -> HashMap<&str, Vec<&str>> {
        let mut edges: HashMap<&str, Vec<&str>> = self
            .modules
            .iter()
            .map(|(name, descriptor)| (name.as_str(), self.registered(descriptor.required())))
            .collect();

        for (name, descriptor) in &self.modules {
            for dep in self.registered(descriptor.optional()) {
                if edges.get(name.as_str()).is_some_and(|deps| deps.contains(&dep)) {
                    continue;
                }
                if Self::waits_on(&edges, dep, name) {
                    debug!(
                        "Ignoring optional dependency {} -> {}, it would close a cycle",
                        name, dep
                    );
                    continue;
                }
                if let Some(deps) = edges.get_mut(name.as_str()) {
                    deps.push(dep);
                }
            }
        }

        edges
    }

    /// Registry keys for the registered names in `names`
    fn registered(&self, names: Vec<String>) -> Vec<&str> {
        names
            .iter()
            .filter_map(|dep| self.modules.get_key_value(dep.as_str()).map(|(key, _)| key.as_str()))
            .collect()
    }

    /// True if `from` reaches `target` by following dependency edges
    fn waits_on(edges: &HashMap<&str, Vec<&str>>, from: &str, target: &str) -> bool {
        let mut stack = vec![from];
        let mut seen = HashSet::new();
        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if seen.insert(current) {
                stack.extend(edges.get(current).into_iter().flatten().copied());
            }
        }
        false
    }

    fn priority_of(&self, name: &str) -> i32 {
        self.modules
            .get(name)
            .map(|descriptor| descriptor.priority)
            .unwrap_or_default()
    }

    /// Walk dependency edges among the unresolved modules until one repeats
    ///
    /// Every unresolved module still waits on at least one unresolved
    /// predecessor, so the walk always closes a cycle.
    fn trace_cycle(
        &self,
        in_degree: &HashMap<&str, usize>,
        edges: &HashMap<&str, Vec<&str>>,
    ) -> Vec<String> {
        let blocked: BTreeSet<(i32, &str)> = in_degree
            .iter()
            .filter(|(_, degree)| **degree > 0)
            .map(|(&name, _)| (self.priority_of(name), name))
            .collect();

        let Some(&(_, start)) = blocked.iter().next() else {
            return Vec::new();
        };

        let mut path: Vec<&str> = Vec::new();
        let mut position: HashMap<&str, usize> = HashMap::new();
        let mut current = start;

        loop {
            if let Some(&index) = position.get(current) {
                let mut cycle: Vec<String> = path[index..].iter().map(|s| s.to_string()).collect();
                cycle.push(current.to_string());
                return cycle;
            }
            position.insert(current, path.len());
            path.push(current);

            let next = edges
                .get(current)
                .into_iter()
                .flatten()
                .filter(|dep| in_degree.get(*dep).is_some_and(|&degree| degree > 0))
                .min_by_key(|dep| (self.priority_of(dep), **dep));

            match next {
                Some(&dep) => current = dep,
                None => {
                    // Unreachable for a consistent graph; report everything still blocked
                    return blocked.iter().map(|(_, name)| name.to_string()).collect();
                }
            }
        }
    }
}
