//! A moderator's engine for Mafia: role assignment, night resolution, voting and victory.

pub mod error;
pub mod game;
pub mod script;
