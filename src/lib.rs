//! MyMusic - a terminal music player demo with a companion calculator.
//!
//! The player follows an MVC split: [`model`] owns all state behind async
//! accessors, [`controller`] maps key events onto model operations, and
//! [`view`] renders snapshots with ratatui. [`storage`] is the JSON-backed
//! key/value store everything persists through. [`calc`] is a standalone
//! calculator engine with no ties to the player modules.

pub mod calc;
pub mod controller;
pub mod logging;
pub mod model;
pub mod storage;
pub mod view;
