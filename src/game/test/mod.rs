//! Tests for the game engine, one module per area of the rules.

#![cfg(test)]

pub mod test_utils;
pub mod views;
pub mod voting;
