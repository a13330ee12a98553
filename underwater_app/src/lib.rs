//! Underwater reef scene
//!
//! Concrete entities, the initial population and the cinematic camera
//! tour for a reef built on `reef_engine`, plus a headless driver that
//! runs it without a window.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod camera_tour;
pub mod driver;
pub mod entities;
pub mod population;

pub use driver::{AppError, Command, Driver, FrameReport};
pub use population::{PopulationConfig, UnderwaterPopulator};
