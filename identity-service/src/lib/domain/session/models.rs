use crate::domain::identity::models::IdentityView;

/// A freshly issued access/refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Command to open a session from presented credentials.
///
/// At least one of `username`/`email` must be present; blank values are
/// normalized to `None` before the command is built.
#[derive(Debug)]
pub struct LoginCommand {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

/// Result of a successful login: the resolved identity view plus the pair.
#[derive(Debug)]
pub struct LoginOutcome {
    pub identity: IdentityView,
    pub tokens: TokenPair,
}

/// Command to replace the stored credential.
#[derive(Debug)]
pub struct ChangePasswordCommand {
    pub old_password: String,
    pub new_password: String,
}
