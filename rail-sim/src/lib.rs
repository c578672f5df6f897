//! Rail network playback simulation.
//!
//! Given track polylines and a timetable of trips, answers: "where is each
//! train, and which way is it heading, at this moment of simulated time?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod generate;
pub mod geometry;
pub mod playback;
pub mod schedule;
pub mod store;
