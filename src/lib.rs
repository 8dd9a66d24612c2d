pub mod day16;
pub mod day18;
pub mod day20;
pub mod library;
pub mod maze;
pub mod search;
pub mod track;
