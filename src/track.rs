//! Step-count distances through a maze, and the shortcuts that jump between
//! two points of a single shortest path regardless of the walls in between.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    iter, mem,
};

use gridly::prelude::*;
use itertools::Itertools;
use thiserror::Error;

use crate::maze::Maze;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no path from {start:?} to {end:?}")]
pub struct NoBasePath {
    pub start: Location,
    pub end: Location,
}

/// Breadth-first step counts from `origin` to every open cell reachable
/// from it.
pub fn distances_from(maze: &Maze, origin: Location) -> HashMap<Location, usize> {
    let mut distances = HashMap::new();

    if !maze.is_open(origin) {
        return distances;
    }

    let mut to_explore = HashSet::from([origin]);
    let mut distance = 0;

    while !to_explore.is_empty() {
        let current_step = mem::take(&mut to_explore);
        distances.extend(current_step.iter().map(|&location| (location, distance)));

        for &location in &current_step {
            for neighbour in maze.open_neighbours(location) {
                if !distances.contains_key(&neighbour) {
                    to_explore.insert(neighbour);
                }
            }
        }

        distance += 1;
    }

    distances
}

/// One shortest path from `start` to `end`, counted in steps. Element `i` of
/// the path is exactly `i` steps from `start`.
pub fn base_path(maze: &Maze, start: Location, end: Location) -> Result<Vec<Location>, NoBasePath> {
    let distances = distances_from(maze, start);

    if !distances.contains_key(&end) {
        return Err(NoBasePath { start, end });
    }

    // Walk back from the end, each time stepping to a neighbour one step
    // closer to the start.
    let mut path: Vec<Location> = iter::successors(Some(end), |&current| {
        let closer = distances.get(&current)?.checked_sub(1)?;

        EACH_DIRECTION
            .iter()
            .map(|&direction| current + direction)
            .find(|neighbour| distances.get(neighbour) == Some(&closer))
    })
    .collect();

    path.reverse();
    Ok(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Shortcut {
    from: Location,
    to: Location,
    saving: usize,
}

/// Every jump from an earlier point of `path` to a later one that's at most
/// `max_length` away (by manhattan distance).
fn shortcuts(path: &[Location], max_length: usize) -> impl Iterator<Item = Shortcut> + '_ {
    path.iter().enumerate().tuple_combinations().filter_map(
        move |((from_distance, &from), (to_distance, &to))| {
            let length = (to - from).manhattan_length() as usize;

            // Consecutive path cells are adjacent, so the distance along the
            // path is never shorter than the jump.
            (length <= max_length).then(|| Shortcut {
                from,
                to,
                saving: to_distance - from_distance - length,
            })
        },
    )
}

/// Count the shortcuts of at most `max_shortcut_length` steps that save at
/// least `min_saving` steps over the base path from `start` to `end`.
pub fn shortcut_savings(
    maze: &Maze,
    start: Location,
    end: Location,
    max_shortcut_length: usize,
    min_saving: usize,
) -> Result<usize, NoBasePath> {
    let path = base_path(maze, start, end)?;
    log::debug!("base path is {} steps", path.len() - 1);

    Ok(shortcuts(&path, max_shortcut_length)
        .filter(|shortcut| shortcut.saving >= min_saving)
        .count())
}

/// The number of shortcuts of at most `max_shortcut_length` steps for each
/// (nonzero) number of steps saved.
pub fn shortcut_histogram(
    maze: &Maze,
    start: Location,
    end: Location,
    max_shortcut_length: usize,
) -> Result<BTreeMap<usize, usize>, NoBasePath> {
    let path = base_path(maze, start, end)?;

    Ok(shortcuts(&path, max_shortcut_length)
        .filter(|shortcut| shortcut.saving > 0)
        .inspect(|shortcut| {
            log::trace!(
                "{:?} -> {:?} saves {}",
                shortcut.from,
                shortcut.to,
                shortcut.saving
            )
        })
        .fold(BTreeMap::new(), |mut histogram, shortcut| {
            *histogram.entry(shortcut.saving).or_insert(0) += 1;
            histogram
        }))
}
