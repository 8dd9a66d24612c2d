use std::{env, fs, path::Path};

use joinery::Joinable;
use nom::{character::complete::digit1, combinator::eof, IResult, Parser};
use nom_supreme::{error::ErrorTree, tag::complete::tag, ParserExt};

fn parse_day(input: &str) -> IResult<&str, u8, ErrorTree<&str>> {
    tag("day")
        .precedes(digit1.parse_from_str_cut())
        .terminated(tag(".rs"))
        .terminated(eof)
        .parse(input)
}

fn main() {
    println!("cargo:rerun-if-changed=src");

    let mut days: Vec<u8> = fs::read_dir("src")
        .expect("failed to list src")
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter_map(|name| {
            let (_, day) = parse_day(&name).ok()?;
            Some(day)
        })
        .collect();

    days.sort_unstable();

    let arms: Vec<String> = days
        .iter()
        .flat_map(|day| {
            [("One", 1), ("Two", 2)].map(|(part, number)| {
                format!(
                    "        ({day}, Part::{part}) => solve(advent2024::day{day}::part{number}, input),"
                )
            })
        })
        .collect();

    let code = format!(
        "fn run_solution(day: u8, part: Part, input: &str) -> anyhow::Result<String> {{\n    \
            match (day, part) {{\n{arms}\n        \
                _ => anyhow::bail!(\"no solution for day {{day}}\"),\n    \
            }}\n\
        }}\n",
        arms = arms.join_with("\n"),
    );

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    fs::write(Path::new(&out_dir).join("solutions.rs"), code).expect("failed to write solutions.rs");
}
