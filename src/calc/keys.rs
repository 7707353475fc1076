//! Key tokens for the calculator and the terminal key mapping

use crossterm::event::{KeyCode, KeyEvent};

/// A pending binary operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

impl Op {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Op::Add),
            '-' => Some(Op::Subtract),
            '*' => Some(Op::Multiply),
            '/' => Some(Op::Divide),
            '%' => Some(Op::Remainder),
            _ => None,
        }
    }

    /// Display symbol used in the history line
    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Subtract => '−',
            Op::Multiply => '×',
            Op::Divide => '÷',
            Op::Remainder => '%',
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Op::Add => lhs + rhs,
            Op::Subtract => lhs - rhs,
            Op::Multiply => lhs * rhs,
            Op::Divide => lhs / rhs,
            // Truncated remainder: sign follows the dividend
            Op::Remainder => lhs % rhs,
        }
    }
}

/// A recognized calculator key token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalcKey {
    Digit(u8),
    Decimal,
    Operator(Op),
    Equals,
    Backspace,
    Clear,
}

impl CalcKey {
    /// Map a terminal key event to a calculator token.
    ///
    /// Unrecognized keys yield `None` and produce no state change.
    pub fn from_key_event(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char(c @ '0'..='9') => Some(CalcKey::Digit(c as u8 - b'0')),
            KeyCode::Char('.') => Some(CalcKey::Decimal),
            KeyCode::Char(c @ ('+' | '-' | '*' | '/' | '%')) => {
                Op::from_char(c).map(CalcKey::Operator)
            }
            KeyCode::Char('=') | KeyCode::Enter => Some(CalcKey::Equals),
            KeyCode::Backspace | KeyCode::Delete => Some(CalcKey::Backspace),
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Esc => Some(CalcKey::Clear),
            _ => None,
        }
    }
}
