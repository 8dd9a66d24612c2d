use std::{
    iter::{Map, Zip},
    ops::RangeFrom,
};

use gridly::prelude::*;

type Indexed<I, C> = Zip<Map<RangeFrom<isize>, fn(isize) -> C>, I>;

pub trait IterExt: Iterator + Sized {
    /// Pair each item with a row, counting up from `start`
    fn with_rows(self, start: Row) -> Indexed<Self, Row> {
        (start.0..).map(Row as fn(isize) -> Row).zip(self)
    }

    /// Pair each item with a column, counting up from `start`
    fn with_columns(self, start: Column) -> Indexed<Self, Column> {
        (start.0..).map(Column as fn(isize) -> Column).zip(self)
    }
}

impl<I: Iterator> IterExt for I {}
