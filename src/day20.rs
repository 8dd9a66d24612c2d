use crate::{
    maze::{Maze, MazeError},
    track,
};

const MIN_SAVING: usize = 100;

pub struct Input {
    maze: Maze,
}

impl TryFrom<&str> for Input {
    type Error = MazeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Maze::parse(value).map(|maze| Input { maze })
    }
}

fn count_shortcuts(input: &Input, max_length: usize, min_saving: usize) -> anyhow::Result<usize> {
    let maze = &input.maze;

    if log::log_enabled!(log::Level::Debug) {
        let histogram = track::shortcut_histogram(maze, maze.start(), maze.end(), max_length)?;

        for (saving, count) in histogram {
            log::debug!("{count} shortcuts save {saving} steps");
        }
    }

    let count = track::shortcut_savings(maze, maze.start(), maze.end(), max_length, min_saving)?;
    Ok(count)
}

pub fn part1(input: Input) -> anyhow::Result<usize> {
    count_shortcuts(&input, 2, MIN_SAVING)
}

pub fn part2(input: Input) -> anyhow::Result<usize> {
    count_shortcuts(&input, 20, MIN_SAVING)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "
        ###############
        #...#...#.....#
        #.#.#.#.#.###.#
        #S#...#.#.#...#
        #######.#.#.###
        #######.#.#...#
        #######.#.###.#
        ###..E#...#...#
        ###.#######.###
        #...###...#...#
        #.#####.#.###.#
        #.#...#.#.#...#
        #.#.#.#.#.#.###
        #...#...#...###
        ###############
    ";

    #[test]
    fn counts_example_shortcuts() -> anyhow::Result<()> {
        let input = Input::try_from(EXAMPLE)?;

        assert_eq!(count_shortcuts(&input, 2, 1)?, 44);
        assert_eq!(count_shortcuts(&input, 2, 20)?, 5);
        assert_eq!(count_shortcuts(&input, 20, 50)?, 285);
        Ok(())
    }

    #[test]
    fn example_has_no_big_savings() -> anyhow::Result<()> {
        assert_eq!(part1(Input::try_from(EXAMPLE)?)?, 0);
        assert_eq!(part2(Input::try_from(EXAMPLE)?)?, 0);
        Ok(())
    }

    #[test]
    fn disconnected_track_is_an_error() -> anyhow::Result<()> {
        let input = Input::try_from("#####\n#S#E#\n#####")?;

        assert!(part1(input).is_err());
        Ok(())
    }
}
