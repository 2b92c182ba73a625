//! Authentication primitives: login credentials and registration requests.
//!
//! Handlers build these through validating constructors before a service
//! talks to the backend, so blank inputs never leave the process.

use std::fmt;

use zeroize::Zeroizing;

/// Name used when a registration omits the first name.
pub const DEFAULT_FIRST_NAME: &str = "User";
/// Surname used when a registration omits it.
pub const DEFAULT_SURNAME: &str = "Test";

/// Domain error returned when credential values are invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl CredentialsValidationError {
    /// Request field the error refers to.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyEmail => "email",
            Self::EmptyPassword => "password",
        }
    }
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use historian::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ana@example.org ", "pw").unwrap();
/// assert_eq!(creds.email(), "ana@example.org");
/// assert_eq!(creds.password(), "pw");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated account registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    credentials: LoginCredentials,
    name: String,
    surname: String,
}

impl Registration {
    /// Build a registration, filling blank names with placeholders.
    ///
    /// # Examples
    /// ```
    /// use historian::domain::{LoginCredentials, Registration};
    ///
    /// let creds = LoginCredentials::try_from_parts("ana@example.org", "pw").unwrap();
    /// let registration = Registration::new(creds, None, Some("  "));
    /// assert_eq!(registration.name(), "User");
    /// assert_eq!(registration.surname(), "Test");
    /// ```
    pub fn new(credentials: LoginCredentials, name: Option<&str>, surname: Option<&str>) -> Self {
        Self {
            credentials,
            name: name_or(name, DEFAULT_FIRST_NAME),
            surname: name_or(surname, DEFAULT_SURNAME),
        }
    }

    pub fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn surname(&self) -> &str {
        self.surname.as_str()
    }
}

fn name_or(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(fallback)
        .to_owned()
}

/// Bearer token issued by the backend.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Wrap a token; blank input yields `None`.
    pub fn new(token: &str) -> Option<Self> {
        let trimmed = token.trim();
        (!trimmed.is_empty()).then(|| Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Parse an `Authorization` header value of the form `Bearer <token>`.
    pub fn from_authorization(header: &str) -> Option<Self> {
        let (scheme, token) = header.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        Self::new(token)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsValidationError::EmptyEmail)]
    #[case("   ", "pw", CredentialsValidationError::EmptyEmail)]
    #[case("ana@example.org", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  ana@example.org  ", " spaced secret ")]
    #[case("bruno@example.org", "correct horse battery staple")]
    fn valid_credentials_trim_email_only(#[case] email: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(email, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.email(), email.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case(None, None, "User", "Test")]
    #[case(Some(" Ana "), Some(""), "Ana", "Test")]
    #[case(Some("Ana"), Some("Souza"), "Ana", "Souza")]
    fn registration_fills_missing_names(
        #[case] name: Option<&str>,
        #[case] surname: Option<&str>,
        #[case] expected_name: &str,
        #[case] expected_surname: &str,
    ) {
        let creds = LoginCredentials::try_from_parts("ana@example.org", "pw").expect("creds");
        let registration = Registration::new(creds, name, surname);
        assert_eq!(registration.name(), expected_name);
        assert_eq!(registration.surname(), expected_surname);
        assert_eq!(registration.credentials().email(), "ana@example.org");
    }

    #[rstest]
    #[case("Bearer abc", Some("abc"))]
    #[case("bearer   abc ", Some("abc"))]
    #[case("Basic abc", None)]
    #[case("Bearer ", None)]
    #[case("abc", None)]
    fn parses_bearer_headers(#[case] header: &str, #[case] expected: Option<&str>) {
        let token = AccessToken::from_authorization(header);
        assert_eq!(token.as_ref().map(AccessToken::as_str), expected);
    }

    #[rstest]
    fn token_debug_is_redacted() {
        let token = AccessToken::new("secret").expect("token");
        assert_eq!(format!("{token:?}"), "AccessToken(..)");
    }
}
