#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod board;
mod common;
mod config;
mod fleet;
mod game;
mod generator;
pub mod geometry;
#[cfg(feature = "std")]
mod logging;
mod placement;
mod player;
mod ship;
#[cfg(feature = "std")]
pub mod ui;

pub use ai::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
pub use generator::*;
pub use geometry::{Coord, GridDimensions, Orientation, Rect, Step};
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
pub use placement::*;
pub use player::*;
pub use ship::*;
