mod logger;

use std::{fmt::Display, fs, path::PathBuf, str::FromStr};

use anyhow::Context;
use clap::Parser;
use lazy_format::lazy_format;
use thiserror::Error;

// Defines `run_solution`, dispatching to each `src/dayN.rs`
include!(concat!(env!("OUT_DIR"), "/solutions.rs"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    One,
    Two,
}

#[derive(Debug, Error)]
#[error("part must be 1 or 2, not {0:?}")]
struct BadPart(String);

impl FromStr for Part {
    type Err = BadPart;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Part::One),
            "2" => Ok(Part::Two),
            other => Err(BadPart(other.to_owned())),
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Solve an Advent of Code puzzle")]
struct Args {
    /// The day to solve
    #[arg(short, long)]
    day: u8,

    /// Which part of the day to solve (1 or 2). Solves both if omitted
    #[arg(short, long)]
    part: Option<Part>,

    /// The puzzle input. Defaults to inputs/day<DAY>.txt
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Log more about the solution; repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn solve<I, T, E1, E2>(
    solver: impl FnOnce(I) -> Result<T, E2>,
    input: &str,
) -> anyhow::Result<String>
where
    I: for<'a> TryFrom<&'a str, Error = E1>,
    anyhow::Error: From<E1> + From<E2>,
    T: Display,
{
    let input = I::try_from(input)
        .map_err(anyhow::Error::from)
        .context("failed to parse puzzle input")?;

    let answer = solver(input)?;
    Ok(answer.to_string())
}

/// Solve one part of a day, or both parts with each answer labeled.
fn run_day(day: u8, part: Option<Part>, input: &str) -> anyhow::Result<String> {
    match part {
        Some(part) => run_solution(day, part, input),
        None => {
            let part1 = run_solution(day, Part::One, input).context("part 1 failed")?;
            let part2 = run_solution(day, Part::Two, input).context("part 2 failed")?;

            Ok(lazy_format!("day{day}:\n  part 1: {part1}\n  part 2: {part2}").to_string())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::install(args.verbose).context("failed to install logger")?;

    let path = args
        .input
        .unwrap_or_else(|| PathBuf::from(format!("inputs/day{}.txt", args.day)));
    let name = path.display().to_string();

    let input = fs::read_to_string(&path)
        .context(lazy_format!("failed to read puzzle input from {name}"))?;

    log::info!("solving day {} part {:?}", args.day, args.part);
    let answer = run_day(args.day, args.part, &input)?;
    println!("{answer}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_parts() {
        assert_eq!("1".parse::<Part>().ok(), Some(Part::One));
        assert_eq!("2".parse::<Part>().ok(), Some(Part::Two));
        assert!("3".parse::<Part>().is_err());
    }

    #[test]
    fn unknown_day_is_an_error() {
        assert!(run_solution(3, Part::One, "").is_err());
    }

    #[test]
    fn dispatches_to_the_day() -> anyhow::Result<()> {
        let answer = run_solution(16, Part::One, "#####\n#S..#\n###E#\n#####")?;

        assert_eq!(answer, "1003");
        Ok(())
    }

    #[test]
    fn labels_both_parts() -> anyhow::Result<()> {
        let maze = "#####\n#S..#\n###E#\n#####";

        assert_eq!(
            run_day(16, None, maze)?,
            "day16:\n  part 1: 1003\n  part 2: 4"
        );
        assert_eq!(run_day(16, Some(Part::Two), maze)?, "4");
        assert!(run_day(3, None, maze).is_err());
        Ok(())
    }

    #[test]
    fn part_is_optional_on_the_command_line() {
        let args = Args::try_parse_from(["advent2024", "--day", "16"]).expect("day alone is valid");

        assert_eq!(args.day, 16);
        assert_eq!(args.part, None);

        let args = Args::try_parse_from(["advent2024", "-d", "20", "-p", "2"])
            .expect("day and part are valid");
        assert_eq!(args.part, Some(Part::Two));
    }
}
