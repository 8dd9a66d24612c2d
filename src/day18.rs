use anyhow::Context;
use gridly::prelude::*;
use joinery::Joinable;
use nom::{
    character::complete::{char, digit1, line_ending, multispace0},
    combinator::eof,
    IResult, Parser,
};
use nom_supreme::{
    error::ErrorTree,
    final_parser::{final_parser, Location as ErrorLocation},
    multi::collect_separated_terminated,
    ParserExt,
};

use crate::{maze::Maze, track};

const MEMORY_SIZE: usize = 71;
const FALLEN_BYTES: usize = 1024;

fn parse_coordinate<T: LocationComponent>(input: &str) -> IResult<&str, T, ErrorTree<&str>> {
    digit1
        .parse_from_str_cut()
        .map(|coord: isize| T::from(coord))
        .parse(input)
}

fn parse_byte(input: &str) -> IResult<&str, Location, ErrorTree<&str>> {
    parse_coordinate
        .context("x")
        .terminated(char(','))
        .and(parse_coordinate.context("y"))
        .map(|(column, row)| Location { row, column })
        .parse(input)
}

fn parse_bytes(input: &str) -> IResult<&str, Vec<Location>, ErrorTree<&str>> {
    collect_separated_terminated(
        parse_byte.context("byte"),
        line_ending,
        multispace0.terminated(eof),
    )
    .parse(input)
}

pub struct Input {
    bytes: Vec<Location>,
}

impl TryFrom<&str> for Input {
    type Error = ErrorTree<ErrorLocation>;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        final_parser(parse_bytes)(value).map(|bytes| Input { bytes })
    }
}

fn corners(size: usize) -> (Location, Location) {
    let last = size as isize - 1;
    (Row(0) + Column(0), Row(last) + Column(last))
}

/// The fewest steps from the top left to the bottom right corner, once all
/// of `bytes` have fallen. `None` if they've cut the corners off from each
/// other (or landed on one of them).
fn steps_to_exit(bytes: &[Location], size: usize) -> anyhow::Result<Option<usize>> {
    let (start, end) = corners(size);

    if bytes.contains(&start) || bytes.contains(&end) {
        return Ok(None);
    }

    let maze = Maze::from_walls(size, size, bytes.iter().copied(), start, end)
        .context("failed to lay out corrupted memory")?;

    Ok(track::distances_from(&maze, start).get(&end).copied())
}

fn shortest_escape(bytes: &[Location], size: usize, fallen: usize) -> anyhow::Result<usize> {
    let fallen = bytes
        .get(..fallen)
        .with_context(|| format!("input only has {} bytes", bytes.len()))?;

    steps_to_exit(fallen, size)?.context("the exit is unreachable")
}

fn first_blocking_byte(bytes: &[Location], size: usize) -> anyhow::Result<Location> {
    if steps_to_exit(&[], size)?.is_none() {
        anyhow::bail!("the exit is unreachable before any bytes fall");
    }

    if steps_to_exit(bytes, size)?.is_some() {
        anyhow::bail!("the exit is still reachable after every byte has fallen");
    }

    // The exit is reachable after `open` bytes fall and unreachable after
    // `blocked` bytes fall.
    let mut open = 0;
    let mut blocked = bytes.len();

    while blocked - open > 1 {
        let middle = open + (blocked - open) / 2;

        match steps_to_exit(&bytes[..middle], size)? {
            Some(_) => open = middle,
            None => blocked = middle,
        }
    }

    log::info!("the exit is cut off by byte number {blocked}");
    Ok(bytes[blocked - 1])
}

fn format_byte(byte: Location) -> String {
    [byte.column.0, byte.row.0].join_with(',').to_string()
}

pub fn part1(input: Input) -> anyhow::Result<usize> {
    shortest_escape(&input.bytes, MEMORY_SIZE, FALLEN_BYTES)
}

pub fn part2(input: Input) -> anyhow::Result<String> {
    first_blocking_byte(&input.bytes, MEMORY_SIZE).map(format_byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "5,4
4,2
4,5
3,0
2,1
6,3
2,4
1,5
0,6
3,3
2,6
5,1
1,2
5,5
2,5
6,5
1,4
0,4
6,4
1,1
6,1
1,0
0,5
1,6
2,0
";

    #[test]
    fn parses_bytes_as_x_y() -> anyhow::Result<()> {
        let input = Input::try_from(EXAMPLE)?;

        assert_eq!(input.bytes.len(), 25);
        assert_eq!(input.bytes[0], Row(4) + Column(5));
        assert_eq!(input.bytes[24], Row(0) + Column(2));
        Ok(())
    }

    #[test]
    fn rejects_malformed_bytes() {
        assert!(Input::try_from("5,4\n4;2\n").is_err());
    }

    #[test]
    fn escapes_example() -> anyhow::Result<()> {
        let input = Input::try_from(EXAMPLE)?;

        assert_eq!(shortest_escape(&input.bytes, 7, 12)?, 22);
        Ok(())
    }

    #[test]
    fn finds_first_blocking_byte() -> anyhow::Result<()> {
        let input = Input::try_from(EXAMPLE)?;
        let byte = first_blocking_byte(&input.bytes, 7)?;

        assert_eq!(byte, Row(1) + Column(6));
        assert_eq!(format_byte(byte), "6,1");
        Ok(())
    }

    #[test]
    fn byte_on_a_corner_blocks_the_exit() -> anyhow::Result<()> {
        let bytes = [Row(6) + Column(6)];

        assert_eq!(steps_to_exit(&bytes, 7)?, None);
        assert_eq!(first_blocking_byte(&bytes, 7)?, Row(6) + Column(6));
        Ok(())
    }

    #[test]
    fn never_blocked_is_an_error() -> anyhow::Result<()> {
        let input = Input::try_from(EXAMPLE)?;

        assert!(first_blocking_byte(&input.bytes[..12], 7).is_err());
        Ok(())
    }
}
