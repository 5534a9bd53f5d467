//! Sol Cesto Advisor - Row recommendation engine for the Sol Cesto grid

pub mod core;
pub mod engine;
pub mod grid;
pub mod modifier;
pub mod player;
