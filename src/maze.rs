use std::{collections::HashSet, fmt};

use gridly::prelude::*;
use gridly_grids::VecGrid;
use itertools::Itertools;
use thiserror::Error;

use crate::library::IterExt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Open,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Start,
    End,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Marker::Start => "start",
            Marker::End => "end",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze has no cells")]
    Empty,

    #[error("row {row} is {width} cells wide, but the maze is {expected} cells wide")]
    Ragged {
        row: isize,
        width: usize,
        expected: usize,
    },

    #[error("unrecognized cell {cell:?} at row {row}, column {column}")]
    UnknownCell { cell: char, row: isize, column: isize },

    #[error("multiple {0} locations")]
    Duplicate(Marker),

    #[error("no {0} location")]
    Missing(Marker),

    #[error("{marker} location {location:?} is outside the maze")]
    OutOfBounds { marker: Marker, location: Location },

    #[error("{marker} location {location:?} is a wall")]
    Blocked { marker: Marker, location: Location },

    #[error("wall at {0:?} is outside the maze")]
    WallOutOfBounds(Location),
}

/// A rectangular grid of open cells and walls, with a start and an end.
/// Immutable once built; every constructor checks that the grid is
/// rectangular and that both endpoints are open cells inside it.
#[derive(Debug, Clone)]
pub struct Maze {
    cells: VecGrid<Cell>,
    start: Location,
    end: Location,
}

impl Maze {
    pub fn new(rows: Vec<Vec<Cell>>, start: Location, end: Location) -> Result<Self, MazeError> {
        let expected = rows.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(MazeError::Empty);
        }

        if let Some((row, width)) = rows
            .iter()
            .map(Vec::len)
            .with_rows(Row(0))
            .find(|&(_, width)| width != expected)
        {
            return Err(MazeError::Ragged {
                row: row.0,
                width,
                expected,
            });
        }

        let cells = VecGrid::new_from_rows(rows).ok_or(MazeError::Empty)?;
        Self::from_cells(cells, start, end)
    }

    fn from_cells(cells: VecGrid<Cell>, start: Location, end: Location) -> Result<Self, MazeError> {
        for (marker, location) in [(Marker::Start, start), (Marker::End, end)] {
            match cells.get(location) {
                Ok(Cell::Open) => {}
                Ok(Cell::Wall) => return Err(MazeError::Blocked { marker, location }),
                Err(_) => return Err(MazeError::OutOfBounds { marker, location }),
            }
        }

        Ok(Self { cells, start, end })
    }

    /// Build an otherwise open maze of the given size, with a wall at each
    /// of the `walls` locations.
    pub fn from_walls(
        width: usize,
        height: usize,
        walls: impl IntoIterator<Item = Location>,
        start: Location,
        end: Location,
    ) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::Empty);
        }

        let mut cells = VecGrid::new_from_rows(vec![vec![Cell::Open; width]; height])
            .ok_or(MazeError::Empty)?;

        for wall in walls {
            let cell = cells
                .get_mut(wall)
                .map_err(|_| MazeError::WallOutOfBounds(wall))?;

            *cell = Cell::Wall;
        }

        Self::from_cells(cells, start, end)
    }

    /// Parse a maze drawn with `#` for walls, `.` for open cells, and `S` and
    /// `E` for the (open) start and end cells.
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let mut start = None;
        let mut end = None;

        let rows: Vec<Vec<Cell>> = text
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .with_rows(Row(0))
            .map(|(row, line)| {
                line.chars()
                    .with_columns(Column(0))
                    .map(|(column, cell)| {
                        let (marker, slot) = match cell {
                            '#' => return Ok(Cell::Wall),
                            '.' => return Ok(Cell::Open),
                            'S' => (Marker::Start, &mut start),
                            'E' => (Marker::End, &mut end),
                            cell => {
                                return Err(MazeError::UnknownCell {
                                    cell,
                                    row: row.0,
                                    column: column.0,
                                })
                            }
                        };

                        match slot.replace(row + column) {
                            Some(_) => Err(MazeError::Duplicate(marker)),
                            None => Ok(Cell::Open),
                        }
                    })
                    .try_collect()
            })
            .try_collect()?;

        let start = start.ok_or(MazeError::Missing(Marker::Start))?;
        let end = end.ok_or(MazeError::Missing(Marker::End))?;

        Self::new(rows, start, end)
    }

    pub fn start(&self) -> Location {
        self.start
    }

    pub fn end(&self) -> Location {
        self.end
    }

    pub fn width(&self) -> usize {
        self.cells.num_columns().0 as usize
    }

    pub fn height(&self) -> usize {
        self.cells.num_rows().0 as usize
    }

    pub fn in_bounds(&self, location: Location) -> bool {
        self.cells.check_location(location).is_ok()
    }

    /// Anything outside the maze counts as a wall.
    pub fn is_wall(&self, location: Location) -> bool {
        !self.is_open(location)
    }

    pub fn is_open(&self, location: Location) -> bool {
        matches!(self.cells.get(location), Ok(Cell::Open))
    }

    pub fn open_neighbours(&self, location: Location) -> impl Iterator<Item = Location> + '_ {
        EACH_DIRECTION
            .iter()
            .map(move |&direction| location + direction)
            .filter(move |&neighbour| self.is_open(neighbour))
    }

    /// Draw the maze, marking each of the `highlighted` tiles with an `O`.
    pub fn render<'a>(&'a self, highlighted: &'a HashSet<Location>) -> Rendered<'a> {
        Rendered {
            maze: self,
            highlighted,
        }
    }
}

impl TryFrom<&str> for Maze {
    type Error = MazeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

pub struct Rendered<'a> {
    maze: &'a Maze,
    highlighted: &'a HashSet<Location>,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.maze.cells.rows().iter() {
            for (location, &cell) in row.iter_with_locations() {
                let glyph = match cell {
                    Cell::Wall => '#',
                    Cell::Open if self.highlighted.contains(&location) => 'O',
                    Cell::Open => '.',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
