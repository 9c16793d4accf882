//! This module implements a variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! which lets the jump point solver generate successors based on the parent if there is one,
//! keeps an explicit open/closed flag per state and stops early when a [SearchBudget] runs out.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::{Float, Zero};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use log::{trace, warn};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::time::Instant;

/// Whether a state may still be expanded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Membership {
    Open,
    Closed,
}

/// A node of the search tree. The node itself is the key it is stored under in the state
/// table; `parent` is the table index of the state it was reached from.
#[derive(Clone, Debug)]
pub struct SearchState<C> {
    pub g: C,
    pub h: C,
    pub parent: Option<usize>,
    pub membership: Membership,
}

struct SmallestCostHolder<C> {
    estimated_cost: C,
    cost: C,
    index: usize,
}

impl<C: PartialOrd> Eq for SmallestCostHolder<C> {}

impl<C: PartialOrd> PartialEq for SmallestCostHolder<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C: PartialOrd> PartialOrd for SmallestCostHolder<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: PartialOrd> Ord for SmallestCostHolder<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then prefers the larger cost (smaller remaining
        // estimate) and finally the state that entered the table first.
        match other
            .estimated_cost
            .partial_cmp(&self.estimated_cost)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => match self.cost.partial_cmp(&other.cost) {
                Some(Ordering::Equal) | None => other.index.cmp(&self.index),
                Some(s) => s,
            },
            s => s,
        }
    }
}

/// Cooperative limits checked before every expansion.
#[derive(Clone, Debug, Default)]
pub struct SearchBudget {
    pub max_expansions: Option<usize>,
    pub deadline: Option<Instant>,
}

impl SearchBudget {
    pub fn exceeded(&self, expansions: usize) -> bool {
        self.max_expansions.is_some_and(|max| expansions >= max)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome<N, C> {
    /// The goal was popped; `path` runs from start to goal.
    Found { path: Vec<N>, cost: C },
    /// The frontier emptied without reaching the goal.
    Exhausted,
    /// The [SearchBudget] ran out first.
    Interrupted,
}

/// State table and frontier for one search. The table owns every state ever generated; the
/// heap only holds indices into it.
pub struct SearchContext<N, C> {
    table: FxIndexMap<N, SearchState<C>>,
    to_see: BinaryHeap<SmallestCostHolder<C>>,
    expansions: usize,
}

impl<N, C> Default for SearchContext<N, C> {
    fn default() -> Self {
        Self {
            table: FxIndexMap::default(),
            to_see: BinaryHeap::new(),
            expansions: 0,
        }
    }
}

impl<N, C> SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Float,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of states expanded by the last search.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Number of distinct states generated by the last search.
    pub fn generated(&self) -> usize {
        self.table.len()
    }

    pub fn state(&self, node: &N) -> Option<&SearchState<C>> {
        self.table.get(node)
    }

    fn reverse_path(&self, start: usize) -> Vec<N> {
        let mut path: Vec<N> = std::iter::successors(Some(start), |&i| {
            self.table.get_index(i).and_then(|(_, state)| state.parent)
        })
        .filter_map(|i| self.table.get_index(i).map(|(node, _)| node.clone()))
        .collect();
        path.reverse();
        path
    }

    /// Best-first search from `start` until `success` holds for a popped node.
    ///
    /// States that were closed are never reopened, which is only optimal when `heuristic` is
    /// consistent. An improved cost for an open state updates it in place and pushes a fresh
    /// heap entry; outdated entries are skipped when popped.
    pub fn astar_jps<FN, IN, FH, FS, E>(
        &mut self,
        start: &N,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
        budget: &SearchBudget,
    ) -> Result<SearchOutcome<N, C>, E>
    where
        FN: FnMut(Option<&N>, &N) -> Result<IN, E>,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> Result<C, E>,
        FS: FnMut(&N) -> bool,
    {
        self.table.clear();
        self.to_see.clear();
        self.expansions = 0;

        let h = heuristic(start)?;
        self.table.insert(
            start.clone(),
            SearchState {
                g: Zero::zero(),
                h,
                parent: None,
                membership: Membership::Open,
            },
        );
        self.to_see.push(SmallestCostHolder {
            estimated_cost: h,
            cost: Zero::zero(),
            index: 0,
        });

        while let Some(SmallestCostHolder { cost, index, .. }) = self.to_see.pop() {
            let successors = {
                let Some((node, state)) = self.table.get_index(index) else {
                    continue;
                };
                // A node may sit in the heap several times if a cheaper way to it was found
                // later; only the entry matching the table's cost counts.
                if state.membership == Membership::Closed || cost > state.g {
                    continue;
                }
                if success(node) {
                    let path = self.reverse_path(index);
                    return Ok(SearchOutcome::Found { path, cost });
                }
                if budget.exceeded(self.expansions) {
                    return Ok(SearchOutcome::Interrupted);
                }
                self.expansions += 1;
                trace!("expanding state {index} ({} generated)", self.table.len());
                let parent_node = state
                    .parent
                    .and_then(|p| self.table.get_index(p))
                    .map(|(n, _)| n);
                successors(parent_node, node)?
            };
            if let Some((_, state)) = self.table.get_index_mut(index) {
                state.membership = Membership::Closed;
            }

            for (successor, move_cost) in successors {
                let new_cost = cost + move_cost;
                match self.table.entry(successor) {
                    Vacant(e) => {
                        let h = heuristic(e.key())?;
                        let n = e.index();
                        e.insert(SearchState {
                            g: new_cost,
                            h,
                            parent: Some(index),
                            membership: Membership::Open,
                        });
                        self.to_see.push(SmallestCostHolder {
                            estimated_cost: new_cost + h,
                            cost: new_cost,
                            index: n,
                        });
                    }
                    Occupied(mut e) => {
                        let n = e.index();
                        let state = e.get_mut();
                        if state.membership == Membership::Open && state.g > new_cost {
                            state.g = new_cost;
                            state.parent = Some(index);
                            self.to_see.push(SmallestCostHolder {
                                estimated_cost: new_cost + state.h,
                                cost: new_cost,
                                index: n,
                            });
                        }
                    }
                }
            }
        }
        warn!(
            "Frontier exhausted after {} expansions without reaching the goal",
            self.expansions
        );
        Ok(SearchOutcome::Exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    type Edges = &'static [(char, char, f64)];

    fn run(
        edges: Edges,
        h: fn(&char) -> f64,
        start: char,
        goal: char,
        budget: &SearchBudget,
    ) -> (SearchOutcome<char, f64>, SearchContext<char, f64>) {
        let mut ctx = SearchContext::new();
        let outcome = ctx
            .astar_jps(
                &start,
                |_, node| {
                    Ok::<_, Infallible>(
                        edges
                            .iter()
                            .filter(|(from, _, _)| from == node)
                            .map(|&(_, to, c)| (to, c))
                            .collect::<Vec<_>>(),
                    )
                },
                |node| Ok(h(node)),
                |node| *node == goal,
                budget,
            )
            .unwrap();
        (outcome, ctx)
    }

    #[test]
    fn holder_prefers_low_estimate_then_high_cost_then_early_index() {
        let mut heap = BinaryHeap::new();
        let entries = [(5.0, 1.0, 0), (4.0, 1.0, 1), (4.0, 3.0, 3), (4.0, 3.0, 2)];
        for (estimated_cost, cost, index) in entries {
            heap.push(SmallestCostHolder {
                estimated_cost,
                cost,
                index,
            });
        }
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|h| h.index)).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }

    #[test]
    fn decrease_key_updates_open_state() {
        // s -> a is expensive directly but cheap through b; a must end up with parent b.
        const EDGES: Edges = &[
            ('s', 'a', 5.0),
            ('s', 'b', 1.0),
            ('b', 'a', 1.0),
            ('a', 'g', 1.0),
        ];
        let (outcome, ctx) = run(EDGES, |_| 0.0, 's', 'g', &SearchBudget::default());
        assert_eq!(
            outcome,
            SearchOutcome::Found {
                path: vec!['s', 'b', 'a', 'g'],
                cost: 3.0
            }
        );
        assert_eq!(ctx.state(&'a').map(|s| s.g), Some(2.0));
        assert_eq!(ctx.state(&'a').map(|s| s.membership), Some(Membership::Closed));
    }

    #[test]
    fn closed_states_are_not_reopened() {
        // With an inconsistent heuristic a is closed with g = 4 before the cheaper route via
        // b is found; the closed state keeps its cost.
        const EDGES: Edges = &[
            ('s', 'a', 4.0),
            ('s', 'b', 1.0),
            ('b', 'a', 1.0),
            ('a', 'g', 10.0),
        ];
        let h = |n: &char| if *n == 'b' { 10.0 } else { 0.0 };
        let (outcome, ctx) = run(EDGES, h, 's', 'g', &SearchBudget::default());
        assert_eq!(ctx.state(&'a').map(|s| s.g), Some(4.0));
        assert!(matches!(outcome, SearchOutcome::Found { cost, .. } if cost == 14.0));
    }

    #[test]
    fn start_is_goal() {
        let (outcome, ctx) = run(&[], |_| 0.0, 's', 's', &SearchBudget::default());
        assert_eq!(
            outcome,
            SearchOutcome::Found {
                path: vec!['s'],
                cost: 0.0
            }
        );
        assert_eq!(ctx.expansions(), 0);
    }

    #[test]
    fn unreachable_goal_exhausts() {
        const EDGES: Edges = &[('s', 'a', 1.0), ('a', 's', 1.0)];
        let (outcome, ctx) = run(EDGES, |_| 0.0, 's', 'g', &SearchBudget::default());
        assert_eq!(outcome, SearchOutcome::Exhausted);
        assert_eq!(ctx.generated(), 2);
    }

    #[test]
    fn budget_interrupts() {
        const EDGES: Edges = &[('s', 'a', 1.0), ('a', 'b', 1.0), ('b', 'g', 1.0)];
        let budget = SearchBudget {
            max_expansions: Some(2),
            deadline: None,
        };
        let (outcome, ctx) = run(EDGES, |_| 0.0, 's', 'g', &budget);
        assert_eq!(outcome, SearchOutcome::Interrupted);
        assert_eq!(ctx.expansions(), 2);
    }

    #[test]
    fn successor_errors_propagate() {
        let mut ctx: SearchContext<char, f64> = SearchContext::new();
        let result = ctx.astar_jps(
            &'s',
            |_, _| Err::<Vec<(char, f64)>, _>("boom"),
            |_| Ok(0.0),
            |node| *node == 'g',
            &SearchBudget::default(),
        );
        assert_eq!(result, Err("boom"));
    }
}
