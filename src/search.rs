//! Uniform cost search over a maze where turning is expensive.
//!
//! A node in the search is a [`SearchState`]: a location together with the
//! direction the searcher is facing. Moving forward one cell costs
//! [`STEP_COST`]; turning 90 degrees in place costs [`TURN_COST`]. Stepping
//! never changes direction, so every turn is paid for explicitly.

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap, HashSet},
};

use gridly::prelude::*;

use crate::maze::Maze;

pub type Cost = u64;

pub const STEP_COST: Cost = 1;
pub const TURN_COST: Cost = 1000;

/// The number of 90 degree turns needed to face `to` when facing `from`.
pub fn rotations_between(from: Direction, to: Direction) -> u32 {
    if from == to {
        0
    } else if from.clockwise().clockwise() == to {
        2
    } else {
        1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchState {
    pub location: Location,
    pub facing: Direction,
}

impl SearchState {
    pub fn new(location: Location, facing: Direction) -> Self {
        Self { location, facing }
    }

    fn successors(self, maze: &Maze) -> impl Iterator<Item = (SearchState, Cost)> {
        let ahead = self.location + self.facing;
        let step = maze
            .is_open(ahead)
            .then_some((SearchState::new(ahead, self.facing), STEP_COST));

        let turns = [self.facing.anticlockwise(), self.facing.clockwise()].map(|facing| {
            (
                SearchState::new(self.location, facing),
                turn_cost(self.facing, facing),
            )
        });

        step.into_iter().chain(turns)
    }
}

/// The cost of turning in place from `from` to `to`. Each 90 degree rotation
/// is paid for separately, so reversing costs twice as much as a single turn.
pub fn turn_cost(from: Direction, to: Direction) -> Cost {
    TURN_COST * Cost::from(rotations_between(from, to))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    cost: Cost,
    sequence: u64,
    state: SearchState,
}

// BinaryHeap is a max heap; the cheapest (and then oldest) entry must sort
// highest.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    pushed: u64,
}

impl Frontier {
    fn push(&mut self, cost: Cost, state: SearchState) {
        self.heap.push(FrontierEntry {
            cost,
            sequence: self.pushed,
            state,
        });
        self.pushed += 1;
    }

    fn pop(&mut self) -> Option<(Cost, SearchState)> {
        self.heap.pop().map(|entry| (entry.cost, entry.state))
    }
}

struct Search<'a> {
    maze: &'a Maze,
    frontier: Frontier,
    costs: HashMap<SearchState, Cost>,

    // Every predecessor that reaches a state at its best known cost. Only
    // populated when `record_predecessors` is set.
    predecessors: HashMap<SearchState, Vec<SearchState>>,
    record_predecessors: bool,
    settled: usize,
}

impl<'a> Search<'a> {
    fn new(maze: &'a Maze, origin: SearchState, record_predecessors: bool) -> Self {
        let mut frontier = Frontier::default();
        frontier.push(0, origin);

        Self {
            maze,
            frontier,
            costs: HashMap::from([(origin, 0)]),
            predecessors: HashMap::new(),
            record_predecessors,
            settled: 0,
        }
    }

    /// Pop the cheapest state that hasn't since been reached more cheaply.
    fn settle_next(&mut self) -> Option<(Cost, SearchState)> {
        while let Some((cost, state)) = self.frontier.pop() {
            if self.costs.get(&state) == Some(&cost) {
                self.settled += 1;
                return Some((cost, state));
            }
        }

        None
    }

    fn relax(&mut self, cost: Cost, state: SearchState) {
        for (next, step_cost) in state.successors(self.maze) {
            let candidate = cost + step_cost;
            let best = self.costs.entry(next).or_insert(Cost::MAX);

            match candidate.cmp(&*best) {
                Ordering::Less => {
                    *best = candidate;
                    self.frontier.push(candidate, next);

                    if self.record_predecessors {
                        self.predecessors.insert(next, vec![state]);
                    }
                }
                Ordering::Equal if self.record_predecessors => {
                    self.predecessors.entry(next).or_default().push(state);
                }
                _ => {}
            }
        }
    }

    /// Collect the location of every state that leads, through best-cost
    /// predecessors, to one of the `roots`. Each state is expanded at most
    /// once, so shared stretches of path are only walked a single time.
    fn backtrack(&self, roots: Vec<SearchState>) -> HashSet<Location> {
        let mut visited: HashSet<SearchState> = HashSet::new();
        let mut pending = roots;

        while let Some(state) = pending.pop() {
            if !visited.insert(state) {
                continue;
            }

            if let Some(previous) = self.predecessors.get(&state) {
                pending.extend(previous.iter().copied());
            }
        }

        visited.into_iter().map(|state| state.location).collect()
    }
}

/// The cheapest cost to reach `end`, in any facing, starting at `start`
/// facing `start_facing`. Returns `None` if `end` can't be reached (or if
/// either endpoint isn't an open cell).
pub fn shortest_cost(
    maze: &Maze,
    start: Location,
    start_facing: Direction,
    end: Location,
) -> Option<Cost> {
    if !maze.is_open(start) || !maze.is_open(end) {
        return None;
    }

    let mut search = Search::new(maze, SearchState::new(start, start_facing), false);

    while let Some((cost, state)) = search.settle_next() {
        if state.location == end {
            log::debug!(
                "reached {end:?} for {cost} after settling {} states",
                search.settled
            );
            return Some(cost);
        }

        search.relax(cost, state);
    }

    log::debug!(
        "{end:?} is unreachable; settled {} states",
        search.settled
    );
    None
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestPaths {
    pub cost: Cost,

    /// Every location that lies on at least one path costing `cost`
    pub tiles: HashSet<Location>,
}

/// The cheapest cost to reach `end`, along with every tile on any path that
/// achieves it.
pub fn best_paths(
    maze: &Maze,
    start: Location,
    start_facing: Direction,
    end: Location,
) -> Option<BestPaths> {
    if !maze.is_open(start) || !maze.is_open(end) {
        return None;
    }

    let mut search = Search::new(maze, SearchState::new(start, start_facing), true);
    let mut best: Option<Cost> = None;
    let mut goals = Vec::new();

    // Once a state more expensive than the goal is settled, every state on a
    // best path (and all of its best predecessors) is already known.
    while let Some((cost, state)) = search.settle_next() {
        if best.map_or(false, |best| cost > best) {
            break;
        }

        if state.location == end {
            best = Some(cost);
            goals.push(state);
            continue;
        }

        search.relax(cost, state);
    }

    let cost = best?;
    log::debug!(
        "{} best arrivals at {end:?} for {cost}; settled {} states",
        goals.len(),
        search.settled
    );

    let tiles = search.backtrack(goals);
    Some(BestPaths { cost, tiles })
}

/// Every location on any cheapest path from `start` to `end`. Empty if `end`
/// can't be reached.
pub fn all_minimal_path_tiles(
    maze: &Maze,
    start: Location,
    start_facing: Direction,
    end: Location,
) -> HashSet<Location> {
    best_paths(maze, start, start_facing, end)
        .map(|paths| paths.tiles)
        .unwrap_or_default()
}

/// The cheapest cost to reach every reachable state from `start`.
pub fn cost_table(
    maze: &Maze,
    start: Location,
    start_facing: Direction,
) -> HashMap<SearchState, Cost> {
    if !maze.is_open(start) {
        return HashMap::new();
    }

    let mut search = Search::new(maze, SearchState::new(start, start_facing), false);

    while let Some((cost, state)) = search.settle_next() {
        search.relax(cost, state);
    }

    search.costs
}
