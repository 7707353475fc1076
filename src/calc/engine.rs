//! The calculator state machine

use std::time::{Duration, Instant};

use super::keys::{CalcKey, Op};

/// How long the divide-by-zero error stays on screen before the state resets.
pub const ERROR_RESET_DELAY: Duration = Duration::from_millis(1500);

const ERROR_MARKER: &str = "Error";

/// Calculator state: one value being entered, at most one pending operation.
///
/// The divide-by-zero auto-clear is modelled as an explicit deadline owned by
/// the state object; the host loop calls [`Calculator::tick`] with the current
/// instant, which keeps the transition deterministic under test.
pub struct Calculator {
    current_input: String,
    previous_input: String,
    operation: Option<Op>,
    pending_reset: bool,
    error_until: Option<Instant>,
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            current_input: "0".to_string(),
            previous_input: String::new(),
            operation: None,
            pending_reset: false,
            error_until: None,
        }
    }

    /// Text currently shown on the display.
    pub fn display(&self) -> &str {
        &self.current_input
    }

    /// History line shown above the display while an operation is pending.
    pub fn history(&self) -> Option<String> {
        match (self.operation, self.previous_input.is_empty()) {
            (Some(op), false) => Some(format!("{} {}", self.previous_input, op.symbol())),
            _ => None,
        }
    }

    pub fn has_error(&self) -> bool {
        self.error_until.is_some()
    }

    /// Reset the state once the error deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.error_until
            && now >= deadline
        {
            self.clear();
        }
    }

    /// Dispatch one key token. `now` anchors the error deadline when a
    /// divide-by-zero occurs.
    pub fn handle_key(&mut self, key: CalcKey, now: Instant) {
        // The error display is a transient terminal state: nothing is
        // accepted until the timer resets it.
        if self.error_until.is_some() {
            return;
        }

        match key {
            CalcKey::Digit(d) => self.digit(d),
            CalcKey::Decimal => self.decimal_point(),
            CalcKey::Operator(op) => self.operator(op, now),
            CalcKey::Equals => self.equals(now),
            CalcKey::Backspace => self.backspace(),
            CalcKey::Clear => self.clear(),
        }
    }

    fn digit(&mut self, d: u8) {
        let ch = char::from(b'0' + (d % 10));
        if self.pending_reset {
            self.current_input.clear();
            self.current_input.push(ch);
            self.pending_reset = false;
        } else if self.current_input == "0" {
            // A lone zero is replaced, not prefixed
            self.current_input.clear();
            self.current_input.push(ch);
        } else {
            self.current_input.push(ch);
        }
    }

    fn decimal_point(&mut self) {
        if self.pending_reset {
            self.current_input = "0.".to_string();
            self.pending_reset = false;
        } else if !self.current_input.contains('.') {
            self.current_input.push('.');
        }
    }

    fn operator(&mut self, op: Op, now: Instant) {
        // Chained entry: evaluate the pending operation first when the
        // current operand is non-trivial.
        if !self.previous_input.is_empty() && self.current_input != "0" {
            self.equals(now);
            if self.error_until.is_some() {
                return;
            }
        }

        self.operation = Some(op);
        self.previous_input = self.current_input.clone();
        self.pending_reset = true;
    }

    fn equals(&mut self, now: Instant) {
        let Some(op) = self.operation else { return };
        if self.previous_input.is_empty() {
            return;
        }

        let (Ok(prev), Ok(current)) = (
            self.previous_input.parse::<f64>(),
            self.current_input.parse::<f64>(),
        ) else {
            return;
        };

        if op == Op::Divide && current == 0.0 {
            self.current_input = ERROR_MARKER.to_string();
            self.error_until = Some(now + ERROR_RESET_DELAY);
            return;
        }

        let result = round_to_8_decimals(op.apply(prev, current));
        self.current_input = format_value(result);
        self.operation = None;
        self.previous_input.clear();
        self.pending_reset = true;
    }

    fn backspace(&mut self) {
        if self.pending_reset {
            return;
        }

        self.current_input.pop();
        if self.current_input.is_empty() || self.current_input == "-" {
            self.current_input = "0".to_string();
        }
    }

    fn clear(&mut self) {
        self.current_input = "0".to_string();
        self.previous_input.clear();
        self.operation = None;
        self.pending_reset = false;
        self.error_until = None;
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Round to 8 decimal digits to suppress binary floating-point noise.
fn round_to_8_decimals(value: f64) -> f64 {
    (value * 100_000_000.0).round() / 100_000_000.0
}

fn format_value(value: f64) -> String {
    if value == 0.0 {
        // Avoid rendering a negative zero
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Instant {
        Instant::now()
    }

    fn press(calc: &mut Calculator, keys: &[CalcKey]) {
        let t = now();
        for &key in keys {
            calc.handle_key(key, t);
        }
    }

    fn digits(s: &str) -> Vec<CalcKey> {
        s.chars()
            .map(|c| match c {
                '.' => CalcKey::Decimal,
                d => CalcKey::Digit(d as u8 - b'0'),
            })
            .collect()
    }

    #[test]
    fn leading_zero_is_replaced() {
        let mut calc = Calculator::new();
        press(&mut calc, &digits("07"));
        assert_eq!(calc.display(), "7");
    }

    #[test]
    fn digits_append_after_first() {
        let mut calc = Calculator::new();
        press(&mut calc, &digits("123"));
        assert_eq!(calc.display(), "123");
    }

    #[test]
    fn only_one_decimal_point() {
        let mut calc = Calculator::new();
        press(&mut calc, &digits("1.5"));
        calc.handle_key(CalcKey::Decimal, now());
        press(&mut calc, &digits("5"));
        assert_eq!(calc.display(), "1.55");
    }

    #[test]
    fn decimal_after_operator_starts_fresh_input() {
        let mut calc = Calculator::new();
        press(&mut calc, &digits("5"));
        calc.handle_key(CalcKey::Operator(Op::Add), now());
        calc.handle_key(CalcKey::Decimal, now());
        assert_eq!(calc.display(), "0.");
    }

    #[test]
    fn simple_addition() {
        let mut calc = Calculator::new();
        press(&mut calc, &digits("6"));
        calc.handle_key(CalcKey::Operator(Op::Add), now());
        press(&mut calc, &digits("4"));
        calc.handle_key(CalcKey::Equals, now());
        assert_eq!(calc.display(), "10");
    }

    #[test]
    fn float_noise_is_rounded_away() {
        let mut calc = Calculator::new();
        press(&mut calc, &digits("0.1"));
        calc.handle_key(CalcKey::Operator(Op::Add), now());
        press(&mut calc, &digits("0.2"));
        calc.handle_key(CalcKey::Equals, now());
        assert_eq!(calc.display(), "0.3");
    }

    #[test]
    fn chained_operators_evaluate_pending_operation() {
        let mut calc = Calculator::new();
        press(&mut calc, &digits("5"));
        calc.handle_key(CalcKey::Operator(Op::Add), now());
        press(&mut calc, &digits("3"));
        calc.handle_key(CalcKey::Operator(Op::Multiply), now());
        // The pending + was evaluated before * was stored
        assert_eq!(calc.history().as_deref(), Some("8 ×"));
        press(&mut calc, &digits("2"));
        calc.handle_key(CalcKey::Equals, now());
        assert_eq!(calc.display(), "16");
    }

    #[test]
    fn remainder_sign_follows_dividend() {
        let mut calc = Calculator::new();
        press(&mut calc, &digits("7"));
        calc.handle_key(CalcKey::Operator(Op::Remainder), now());
        press(&mut calc, &digits("3"));
        calc.handle_key(CalcKey::Equals, now());
        assert_eq!(calc.display(), "1");

        // -7 % 3 is -1 under truncated remainder; enter it via 0 - 7
        let mut calc = Calculator::new();
        calc.handle_key(CalcKey::Operator(Op::Subtract), now());
        press(&mut calc, &digits("7"));
        calc.handle_key(CalcKey::Equals, now());
        assert_eq!(calc.display(), "-7");
        calc.handle_key(CalcKey::Operator(Op::Remainder), now());
        press(&mut calc, &digits("3"));
        calc.handle_key(CalcKey::Equals, now());
        assert_eq!(calc.display(), "-1");
    }

    #[test]
    fn divide_by_zero_shows_error_then_resets_after_delay() {
        let mut calc = Calculator::new();
        let t = now();
        for key in digits("6") {
            calc.handle_key(key, t);
        }
        calc.handle_key(CalcKey::Operator(Op::Divide), t);
        for key in digits("0") {
            calc.handle_key(key, t);
        }
        calc.handle_key(CalcKey::Equals, t);

        assert_eq!(calc.display(), "Error");
        assert!(calc.has_error());

        // Input is ignored while the error is pending
        calc.handle_key(CalcKey::Digit(5), t);
        assert_eq!(calc.display(), "Error");

        // Before the deadline nothing changes
        calc.tick(t + ERROR_RESET_DELAY - Duration::from_millis(1));
        assert_eq!(calc.display(), "Error");

        // At the deadline the state equals the cleared initial state
        calc.tick(t + ERROR_RESET_DELAY);
        assert_eq!(calc.display(), "0");
        assert!(!calc.has_error());
        assert!(calc.history().is_none());
    }

    #[test]
    fn backspace_removes_last_character() {
        let mut calc = Calculator::new();
        press(&mut calc, &digits("123"));
        calc.handle_key(CalcKey::Backspace, now());
        assert_eq!(calc.display(), "12");
    }

    #[test]
    fn backspace_collapses_to_zero() {
        let mut calc = Calculator::new();
        press(&mut calc, &digits("1"));
        calc.handle_key(CalcKey::Backspace, now());
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn backspace_is_noop_after_operator() {
        let mut calc = Calculator::new();
        press(&mut calc, &digits("42"));
        calc.handle_key(CalcKey::Operator(Op::Add), now());
        calc.handle_key(CalcKey::Backspace, now());
        assert_eq!(calc.display(), "42");
    }

    #[test]
    fn clear_resets_everything() {
        let mut calc = Calculator::new();
        press(&mut calc, &digits("9"));
        calc.handle_key(CalcKey::Operator(Op::Multiply), now());
        press(&mut calc, &digits("9"));
        calc.handle_key(CalcKey::Clear, now());
        assert_eq!(calc.display(), "0");
        assert!(calc.history().is_none());
    }

    #[test]
    fn equals_without_pending_operation_is_noop() {
        let mut calc = Calculator::new();
        press(&mut calc, &digits("12"));
        calc.handle_key(CalcKey::Equals, now());
        assert_eq!(calc.display(), "12");
    }

    #[test]
    fn digit_after_equals_starts_fresh_input() {
        let mut calc = Calculator::new();
        press(&mut calc, &digits("2"));
        calc.handle_key(CalcKey::Operator(Op::Add), now());
        press(&mut calc, &digits("2"));
        calc.handle_key(CalcKey::Equals, now());
        press(&mut calc, &digits("7"));
        assert_eq!(calc.display(), "7");
    }

    #[test]
    fn unrecognized_terminal_keys_map_to_none() {
        use crossterm::event::{KeyEvent, KeyModifiers};
        let key = KeyEvent::new(crossterm::event::KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(CalcKey::from_key_event(&key), None);
    }
}
