use anyhow::Context;
use gridly::prelude::*;

use crate::{
    maze::{Maze, MazeError},
    search::{self, Cost},
};

/// Reindeer always start the race facing east
const START_FACING: Direction = Right;

pub struct Input {
    maze: Maze,
}

impl TryFrom<&str> for Input {
    type Error = MazeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Maze::parse(value).map(|maze| Input { maze })
    }
}

pub fn part1(input: Input) -> anyhow::Result<Cost> {
    let maze = &input.maze;

    search::shortest_cost(maze, maze.start(), START_FACING, maze.end())
        .context("no path from the start to the end")
}

pub fn part2(input: Input) -> anyhow::Result<usize> {
    let maze = &input.maze;

    let paths = search::best_paths(maze, maze.start(), START_FACING, maze.end())
        .context("no path from the start to the end")?;

    log::debug!(
        "every path costing {}:\n{}",
        paths.cost,
        maze.render(&paths.tiles)
    );

    Ok(paths.tiles.len())
}
