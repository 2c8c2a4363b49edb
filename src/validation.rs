//! Dependency validation for the task graph.
//!
//! Resolves every authored dependency against the graph's id table and
//! reports what cannot be used. Nothing here is fatal: unresolved edges
//! are dropped and surfaced as warnings. Detects:
//! - Repeated task IDs
//! - Predecessors that are missing or undated
//! - Dependency cycles (DFS back-edges, reported with their members)
//! - Dependencies that a project's current dates violate
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3 (Depth-first search)

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::graph::TaskGraph;
use crate::models::{DependencyKind, Project, ScheduleWarning};
use crate::propagation::required_shift_days;

/// A dependency whose predecessor was found in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDependency {
    /// Record index of the predecessor.
    pub predecessor: usize,
    /// Relation kind.
    pub kind: DependencyKind,
}

/// Resolved edges for every record, plus the warnings raised.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// `edges[i]` holds the usable dependencies of record `i`.
    pub edges: Vec<Vec<ResolvedDependency>>,
    /// Warnings, in record order.
    pub warnings: Vec<ScheduleWarning>,
}

impl Resolution {
    /// Number of usable dependencies across all records.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }
}

/// A dependency the current dates do not satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyViolation {
    /// Successor task ID.
    pub task_id: String,
    /// Predecessor task ID.
    pub predecessor_id: String,
    /// Relation kind.
    pub kind: DependencyKind,
    /// Days the successor would have to move forward.
    pub days: i64,
}

/// Resolves dependencies of every record in the graph.
///
/// Emits one warning per repeated id and one per unresolved dependency,
/// in flattened task order.
pub fn resolve_dependencies(graph: &TaskGraph) -> Resolution {
    let mut warnings: Vec<ScheduleWarning> = graph
        .duplicate_ids()
        .iter()
        .map(|id| ScheduleWarning::duplicate_task_id(id))
        .collect();

    let mut edges = Vec::with_capacity(graph.len());
    for record in &graph.records {
        let mut resolved = Vec::with_capacity(record.dependencies.len());
        for dep in &record.dependencies {
            match graph.index_of(&dep.predecessor_id) {
                Some(predecessor) => resolved.push(ResolvedDependency {
                    predecessor,
                    kind: dep.kind,
                }),
                None => {
                    tracing::warn!(
                        task_id = %record.id,
                        predecessor_id = %dep.predecessor_id,
                        "unknown predecessor, dependency ignored"
                    );
                    warnings.push(ScheduleWarning::unknown_predecessor(
                        &record.id,
                        &dep.predecessor_id,
                    ));
                }
            }
        }
        edges.push(resolved);
    }

    Resolution { edges, warnings }
}

/// Finds dependency cycles among resolved edges.
///
/// Each cycle is returned once, as record indices in dependency order
/// (predecessor before successor), starting from the member reached
/// first by the search.
///
/// # Algorithm
/// DFS over predecessor → successor edges with an explicit frame stack,
/// so chain length is not bounded by the call stack. A back-edge to a
/// node still on the path closes a cycle made of the path suffix
/// starting at that node.
pub fn find_cycles(edges: &[Vec<ResolvedDependency>]) -> Vec<Vec<usize>> {
    let n = edges.len();
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (succ, deps) in edges.iter().enumerate() {
        for dep in deps {
            if !successors[dep.predecessor].contains(&succ) {
                successors[dep.predecessor].push(succ);
            }
        }
    }

    let mut visited = vec![false; n];
    let mut on_path = vec![false; n];
    let mut cycles = Vec::new();
    let mut seen: HashSet<Vec<usize>> = HashSet::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }

        // (node, index of the next successor to explore)
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
        let mut path = vec![root];
        visited[root] = true;
        on_path[root] = true;

        while let Some(&(node, child)) = frames.last() {
            let Some(&next) = successors[node].get(child) else {
                frames.pop();
                path.pop();
                on_path[node] = false;
                continue;
            };
            if let Some(top) = frames.last_mut() {
                top.1 += 1;
            }

            if on_path[next] {
                if let Some(pos) = path.iter().position(|&p| p == next) {
                    let cycle = path[pos..].to_vec();
                    let mut key = cycle.clone();
                    key.sort_unstable();
                    if seen.insert(key) {
                        cycles.push(cycle);
                    }
                }
            } else if !visited[next] {
                visited[next] = true;
                on_path[next] = true;
                path.push(next);
                frames.push((next, 0));
            }
        }
    }

    cycles
}

/// Lists every resolvable dependency the project's current dates violate.
///
/// Uses the same constraint rules as propagation, so an empty result
/// means a scheduling run would move nothing.
pub fn verify_dependencies(project: &Project) -> Vec<DependencyViolation> {
    let graph = TaskGraph::build(project);
    let resolution = resolve_dependencies(&graph);
    collect_violations(&graph, &resolution.edges)
}

fn collect_violations(
    graph: &TaskGraph,
    edges: &[Vec<ResolvedDependency>],
) -> Vec<DependencyViolation> {
    let mut violations = Vec::new();
    for (i, deps) in edges.iter().enumerate() {
        let record = &graph.records[i];
        for dep in deps {
            let pred = &graph.records[dep.predecessor];
            let days = required_shift_days(dep.kind, pred.start, pred.end, record.start, record.end);
            if days > 0 {
                violations.push(DependencyViolation {
                    task_id: record.id.clone(),
                    predecessor_id: pred.id.clone(),
                    kind: dep.kind,
                    days,
                });
            }
        }
    }
    violations
}
