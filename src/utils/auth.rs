/// Keyring storage for the Raygun access token
use anyhow::{Context, Result};
use keyring::Entry;

use crate::constants::{KEYRING_ACCOUNT, KEYRING_SERVICE_NAME};
use crate::error::Error;
use crate::utils::debug;

fn entry(account: &str) -> Result<Entry> {
    Entry::new(KEYRING_SERVICE_NAME, account).context("Failed to create keyring entry")
}

fn save_account_token(account: &str, token: &str) -> Result<()> {
    entry(account)?
        .set_password(token)
        .context("Failed to save token to keyring")
}

fn get_account_token(account: &str) -> Result<String> {
    entry(account)?
        .get_password()
        .context("No token found in keyring")
}

fn delete_account_token(account: &str) -> Result<()> {
    entry(account)?
        .delete_credential()
        .context("Failed to delete token from keyring")
}

/// Save the token to the system keyring
pub fn save_token(token: &str) -> Result<()> {
    save_account_token(KEYRING_ACCOUNT, token)
}

/// Retrieve the token from the system keyring
pub fn get_token() -> Result<String> {
    get_account_token(KEYRING_ACCOUNT)
}

/// Delete the token from the system keyring
pub fn delete_token() -> Result<()> {
    delete_account_token(KEYRING_ACCOUNT)
}

/// Pick the first available token: explicit flag/env value, then keyring.
///
/// Empty strings count as absent.
pub fn resolve_token(explicit: Option<&str>) -> crate::error::Result<String> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }

    stored_token(get_token())
}

fn stored_token(lookup: Result<String>) -> crate::error::Result<String> {
    match lookup {
        Ok(token) if !token.trim().is_empty() => {
            debug::log("Using Raygun token from keyring");
            Ok(token.trim().to_string())
        }
        Ok(_) => {
            debug::log("Keyring holds an empty Raygun token");
            Err(Error::MissingCredential)
        }
        Err(e) => {
            debug::log(&format!("Keyring lookup failed: {:#}", e));
            Err(Error::MissingCredential)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_explicit_token_wins() {
        assert_eq!(resolve_token(Some("  abc123 ")).unwrap(), "abc123");
    }

    #[test]
    fn test_stored_token_is_trimmed() {
        assert_eq!(stored_token(Ok(" abc\n".to_string())).unwrap(), "abc");
    }

    #[test]
    fn test_keyring_failures_are_missing_credential() {
        assert!(matches!(
            stored_token(Ok("   ".to_string())),
            Err(Error::MissingCredential)
        ));
        assert!(matches!(
            stored_token(Err(anyhow!("secret service unavailable"))),
            Err(Error::MissingCredential)
        ));
    }

    #[test]
    fn test_saved_token_survives_a_fresh_entry() {
        let account = format!("test-{}", std::process::id());
        // Sandboxes without a session keyring cannot store anything at all
        if save_account_token(&account, "persisted-token").is_err() {
            return;
        }

        let read_back = get_account_token(&account);
        let _ = delete_account_token(&account);

        assert_eq!(read_back.unwrap(), "persisted-token");
    }
}
