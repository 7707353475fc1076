//! Single-user session state and credential validation
//!
//! The password hash is a fast rolling hash (multiply-accumulate over UTF-16
//! code units, rendered base-36). It is not a security-grade function and
//! must not be used for real credential storage; this is a demo with no
//! security goals.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error(
        "Username must be at least 3 characters and contain only letters, numbers, and underscores"
    )]
    InvalidUsername,
    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please use a stronger password (include uppercase, lowercase, numbers, and symbols)")]
    WeakPassword,
    #[error("An account with this email already exists")]
    AccountExists,
    #[error("No account found. Please sign up first.")]
    NoAccount,
    #[error("Invalid email/username or password")]
    InvalidCredentials,
    #[error("Please login or sign up to access this feature!")]
    LoginRequired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    pub fn label(self) -> &'static str {
        match self {
            PasswordStrength::Weak => "Weak password",
            PasswordStrength::Medium => "Medium password",
            PasswordStrength::Strong => "Strong password",
        }
    }
}

/// In-memory session state. The persisted counterpart lives in the store
/// under `loggedIn` / `lastLogin` / `rememberMe` / `loginAttempts`.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub logged_in: bool,
    pub username: Option<String>,
    pub email: Option<String>,
    pub failed_attempts: u32,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Non-cryptographic rolling hash: `h = (h << 5) - h + code`, wrapping at 32
/// bits, rendered in base 36 with a leading minus for negative values.
pub fn hash_password(password: &str) -> String {
    let mut hash: i32 = 0;
    for unit in password.encode_utf16() {
        let shifted = hash.wrapping_shl(5) as i64;
        hash = (shifted - i64::from(hash) + i64::from(unit)) as i32;
    }
    to_base36(hash)
}

fn to_base36(value: i32) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut n = i64::from(value).unsigned_abs();
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    if value < 0 {
        out.push(b'-');
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

/// Email shape check: `local@domain.tld`, no whitespace, non-empty parts.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Usernames are `[A-Za-z0-9_]+` with at least 3 characters.
pub fn is_valid_username(username: &str) -> bool {
    username.len() >= 3
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Strength heuristic: one point each for length >= 8, length >= 12, mixed
/// case, a digit, and a symbol.
pub fn password_strength(password: &str) -> PasswordStrength {
    let mut strength = 0;
    if password.len() >= 8 {
        strength += 1;
    }
    if password.len() >= 12 {
        strength += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
    {
        strength += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        strength += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        strength += 1;
    }

    match strength {
        0..=2 => PasswordStrength::Weak,
        3 => PasswordStrength::Medium,
        _ => PasswordStrength::Strong,
    }
}

/// Field validation for signup, in the order the form reports problems.
/// Performs no state mutation; the duplicate-account check happens against
/// the store in the model layer.
pub fn validate_signup(
    email: &str,
    username: &str,
    password: &str,
    confirm: &str,
) -> Result<(), AuthError> {
    if email.is_empty() || username.is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(AuthError::MissingFields);
    }
    if !is_valid_email(email) {
        return Err(AuthError::InvalidEmail);
    }
    if !is_valid_username(username) {
        return Err(AuthError::InvalidUsername);
    }
    if password.len() < 8 {
        return Err(AuthError::PasswordTooShort);
    }
    if password != confirm {
        return Err(AuthError::PasswordMismatch);
    }
    if password_strength(password) == PasswordStrength::Weak {
        return Err(AuthError::WeakPassword);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_hash_matches_known_values() {
        assert_eq!(hash_password("Secret123!"), "8y16v3");
        assert_eq!(hash_password("password"), "k4k87v");
        // Negative accumulator renders with a leading minus
        assert_eq!(hash_password("CorrectHorse9!"), "-lxsf0l");
        assert_eq!(hash_password(""), "0");
    }

    #[test]
    fn email_shape_validation() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("user@@example.com"));
    }

    #[test]
    fn username_charset_and_length() {
        assert!(is_valid_username("dj_khaled99"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("bad name"));
        assert!(!is_valid_username("nope!"));
    }

    #[test]
    fn strength_heuristic_buckets() {
        assert_eq!(password_strength("short"), PasswordStrength::Weak);
        assert_eq!(password_strength("lowercaseonly"), PasswordStrength::Weak);
        assert_eq!(password_strength("Mixed1234"), PasswordStrength::Medium);
        assert_eq!(password_strength("Mixed1234!@LONG"), PasswordStrength::Strong);
    }

    #[test]
    fn signup_validation_order() {
        assert_eq!(
            validate_signup("", "user", "Password1!", "Password1!"),
            Err(AuthError::MissingFields)
        );
        assert_eq!(
            validate_signup("bad-email", "user", "Password1!", "Password1!"),
            Err(AuthError::InvalidEmail)
        );
        assert_eq!(
            validate_signup("a@b.co", "x", "Password1!", "Password1!"),
            Err(AuthError::InvalidUsername)
        );
        assert_eq!(
            validate_signup("a@b.co", "user", "short", "short"),
            Err(AuthError::PasswordTooShort)
        );
        assert_eq!(
            validate_signup("a@b.co", "user", "Password1!", "Password2!"),
            Err(AuthError::PasswordMismatch)
        );
        assert_eq!(
            validate_signup("a@b.co", "user", "weakweakweak", "weakweakweak"),
            Err(AuthError::WeakPassword)
        );
        assert_eq!(
            validate_signup("a@b.co", "user", "Password1!", "Password1!"),
            Ok(())
        );
    }
}
