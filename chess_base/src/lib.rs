//! # Base types for tapchess
//!
//! This is an auxiliary crate for `tapchess`, which contains the core vocabulary of the
//! engine: teams, piece kinds, pieces, board coordinates and the step geometry used by
//! move generation and attack detection.
//!
//! Normally you don't want to use this crate directly. Use `tapchess` instead.

pub mod geometry;
pub mod types;
