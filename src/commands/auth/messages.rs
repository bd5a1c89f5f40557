/// Authentication-related user-facing messages
pub mod auth {
    pub const EMPTY_TOKEN: &str = "Token cannot be empty";

    pub const LOGIN_REQUIRED: &str = "Run 'ai-review-pr auth login' to store a Raygun token";
    pub const VERIFYING_TOKEN: &str = "Verifying token...";
    pub const AUTH_SUCCESS: &str = "Authentication successful!";
    pub const TOKEN_SAVED: &str = "Token saved to the system keyring";
    pub const LOGGED_OUT: &str = "Removed Raygun token from the keyring";
    pub const CHECKING_STATUS: &str = "Checking authentication status...";
    pub const AUTHENTICATED: &str = "Authenticated";
    pub const NOT_AUTHENTICATED: &str = "Not authenticated";
}
