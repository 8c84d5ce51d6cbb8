//! Memoised evaluation of recursions over a DAG of states
//!
//! A [`DpProblem`] names the states a state depends on and how to combine
//! their values. [`DpCache`] evaluates every reachable state once, bottom-up,
//! with an explicit stack so deep chains do not exhaust the thread stack.
//! A dependency cycle makes [`DpCache::get`] return `None`.
//!
//! ```
//! use advent_solutions::utils::dp_cache::{DpCache, DpProblem};
//!
//! /// Monotone lattice paths from (0, 0) to a cell
//! struct LatticePaths;
//!
//! impl DpProblem for LatticePaths {
//!     type State = (u32, u32);
//!     type Value = u64;
//!
//!     fn deps(&self, &(y, x): &(u32, u32)) -> Vec<(u32, u32)> {
//!         let mut deps = Vec::new();
//!         if y > 0 { deps.push((y - 1, x)); }
//!         if x > 0 { deps.push((y, x - 1)); }
//!         deps
//!     }
//!
//!     fn combine(&self, _: &(u32, u32), deps: &[u64]) -> u64 {
//!         if deps.is_empty() { 1 } else { deps.iter().sum() }
//!     }
//! }
//!
//! let cache = DpCache::new(LatticePaths);
//! assert_eq!(cache.get(&(4, 4)), Some(70));
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// A recursion whose states form a DAG
pub trait DpProblem {
    type State: Clone + Eq + Hash;
    type Value: Clone;

    /// States whose values `state` is built from; empty for base cases
    fn deps(&self, state: &Self::State) -> Vec<Self::State>;

    /// Value of `state` given the values of `deps(state)`, in the same order
    fn combine(&self, state: &Self::State, deps: &[Self::Value]) -> Self::Value;
}

enum Frame<S> {
    Enter(S),
    Exit(S, Vec<S>),
}

/// Lazily filled memo table for a [`DpProblem`]
pub struct DpCache<P: DpProblem> {
    problem: P,
    memo: RefCell<HashMap<P::State, P::Value>>,
}

impl<P: DpProblem> DpCache<P> {
    pub fn new(problem: P) -> Self {
        Self {
            problem,
            memo: RefCell::new(HashMap::new()),
        }
    }

    /// Value of `state`, evaluating any missing dependency first
    ///
    /// Returns `None` when `state` reaches a dependency cycle.
    pub fn get(&self, state: &P::State) -> Option<P::Value> {
        if let Some(value) = self.memo.borrow().get(state) {
            return Some(value.clone());
        }

        let mut memo = self.memo.borrow_mut();
        // States entered but not yet combined; meeting one again is a back edge
        let mut open: HashSet<P::State> = HashSet::new();
        let mut stack = vec![Frame::Enter(state.clone())];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(current) => {
                    if memo.contains_key(&current) {
                        continue;
                    }
                    if !open.insert(current.clone()) {
                        return None;
                    }
                    let deps = self.problem.deps(&current);
                    let pending: Vec<_> = deps
                        .iter()
                        .filter(|dep| !memo.contains_key(*dep))
                        .cloned()
                        .collect();
                    stack.push(Frame::Exit(current, deps));
                    stack.extend(pending.into_iter().map(Frame::Enter));
                }
                Frame::Exit(current, deps) => {
                    let values = deps
                        .iter()
                        .map(|dep| memo.get(dep).cloned())
                        .collect::<Option<Vec<_>>>()?;
                    let value = self.problem.combine(&current, &values);
                    open.remove(&current);
                    memo.insert(current, value);
                }
            }
        }

        memo.get(state).cloned()
    }

    /// Number of states evaluated so far
    pub fn len(&self) -> usize {
        self.memo.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Fibonacci;

    impl DpProblem for Fibonacci {
        type State = u32;
        type Value = u64;

        fn deps(&self, &n: &u32) -> Vec<u32> {
            if n <= 1 { vec![] } else { vec![n - 1, n - 2] }
        }

        fn combine(&self, &n: &u32, deps: &[u64]) -> u64 {
            if n <= 1 { u64::from(n) } else { deps[0] + deps[1] }
        }
    }

    #[test]
    fn test_fibonacci() {
        let cache = DpCache::new(Fibonacci);
        assert_eq!(cache.get(&10), Some(55));
        assert_eq!(cache.get(&90), Some(2_880_067_194_370_816_120));
        assert_eq!(cache.len(), 91);
    }

    /// 0 -> {1, 2}, 1 -> 3, 2 -> 3
    struct Diamond {
        combines: Cell<u32>,
    }

    impl DpProblem for Diamond {
        type State = u8;
        type Value = u32;

        fn deps(&self, &n: &u8) -> Vec<u8> {
            match n {
                0 => vec![1, 2],
                1 | 2 => vec![3],
                _ => vec![],
            }
        }

        fn combine(&self, _: &u8, deps: &[u32]) -> u32 {
            self.combines.set(self.combines.get() + 1);
            deps.iter().sum::<u32>().max(1)
        }
    }

    #[test]
    fn test_shared_dependency_combined_once() {
        let cache = DpCache::new(Diamond {
            combines: Cell::new(0),
        });
        assert_eq!(cache.get(&0), Some(2));
        assert_eq!(cache.problem.combines.get(), 4);

        assert_eq!(cache.get(&1), Some(1));
        assert_eq!(cache.problem.combines.get(), 4);
    }

    /// n -> n + 1 up to a limit, optionally looping back to 0
    struct Chain {
        limit: u32,
        looped: bool,
    }

    impl DpProblem for Chain {
        type State = u32;
        type Value = u32;

        fn deps(&self, &n: &u32) -> Vec<u32> {
            match (n < self.limit, self.looped) {
                (true, _) => vec![n + 1],
                (false, true) => vec![0],
                (false, false) => vec![],
            }
        }

        fn combine(&self, _: &u32, deps: &[u32]) -> u32 {
            deps.first().map_or(0, |d| d + 1)
        }
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let cache = DpCache::new(Chain {
            limit: 500_000,
            looped: false,
        });
        assert_eq!(cache.get(&0), Some(500_000));
    }

    #[test]
    fn test_cycle_is_reported() {
        let cache = DpCache::new(Chain {
            limit: 5,
            looped: true,
        });
        assert_eq!(cache.get(&2), None);
        assert!(cache.is_empty());
    }
}
