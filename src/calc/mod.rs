//! Calculator module - input/operation state machine
//!
//! A small, self-contained calculator: a pure state machine over key tokens
//! (digits, operators, control keys) producing a display string and a pending
//! binary operation. It has no dependency on the music-player modules.
//!
//! - `engine`: the state machine itself
//! - `keys`: key tokens and the crossterm key mapping

mod engine;
mod keys;

pub use engine::{Calculator, ERROR_RESET_DELAY};
pub use keys::{CalcKey, Op};
