use crate::{CREDENTIAL_DELIMITER, error::StoreError};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

///
/// Credential
///
/// One `users.txt` account: `username:password[:admin]`, colon-delimited,
/// plaintext. This is the toy credential surface of the original
/// application; it has no security design and none is pretended here.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub admin: bool,
}

impl Credential {
    /// Construct an account. A username literally equal to `admin` is an
    /// administrator regardless of any marker (backward-compat rule).
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        let admin = username == "admin";

        Self {
            username,
            password: password.into(),
            admin,
        }
    }

    #[must_use]
    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin || self.username == "admin";
        self
    }
}

/// Decode one credential line. Blank lines and lines without a delimiter
/// yield no account.
#[must_use]
pub fn parse_credential_line(line: &str) -> Option<Credential> {
    if line.trim().is_empty() || !line.contains(CREDENTIAL_DELIMITER) {
        return None;
    }

    let mut tokens = line.split(CREDENTIAL_DELIMITER);
    let username = tokens.next().unwrap_or_default().to_string();
    let password = tokens.next().unwrap_or_default().to_string();
    let marker = tokens.next().unwrap_or_default();

    let admin = is_admin_marker(marker) || username == "admin";

    Some(Credential {
        username,
        password,
        admin,
    })
}

// Accepted spellings of the optional administrator marker.
fn is_admin_marker(token: &str) -> bool {
    token.eq_ignore_ascii_case("admin") || token == "1" || token.eq_ignore_ascii_case("true")
}

/// Load all accounts. A missing or unreadable file falls back to the
/// built-in defaults rather than failing; a readable file with no valid
/// lines is simply an empty account list.
#[must_use]
pub fn load_credentials(path: impl AsRef<Path>) -> Vec<Credential> {
    let path = path.as_ref();

    match fs::read_to_string(path) {
        Ok(text) => text.lines().filter_map(parse_credential_line).collect(),
        Err(err) => {
            warn!(
                "credentials file {} unavailable ({err}); using built-in defaults",
                path.display()
            );
            default_credentials()
        }
    }
}

/// The fallback account set used when no credentials file exists yet.
#[must_use]
pub fn default_credentials() -> Vec<Credential> {
    vec![Credential::new("admin", "admin")]
}

/// Rewrite the credentials file in full. The marker is emitted for every
/// administrator account, including the literal `admin` user.
pub fn save_credentials(path: impl AsRef<Path>, credentials: &[Credential]) -> Result<(), StoreError> {
    let path = path.as_ref();
    let d = CREDENTIAL_DELIMITER;

    let mut text = String::new();
    for credential in credentials {
        text.push_str(&credential.username);
        text.push(d);
        text.push_str(&credential.password);
        if credential.admin {
            text.push(d);
            text.push_str("admin");
        }
        text.push('\n');
    }

    fs::write(path, text).map_err(|source| StoreError::write(path, source))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn plain_line_is_a_regular_account() {
        let credential = parse_credential_line("alice:hunter2").unwrap();

        assert_eq!(credential.username, "alice");
        assert_eq!(credential.password, "hunter2");
        assert!(!credential.admin);
    }

    #[test]
    fn marker_spellings_grant_admin() {
        for line in ["bob:pw:admin", "bob:pw:ADMIN", "bob:pw:1", "bob:pw:True"] {
            let credential = parse_credential_line(line).unwrap();
            assert!(credential.admin, "line: {line}");
        }

        let credential = parse_credential_line("bob:pw:no").unwrap();
        assert!(!credential.admin);
    }

    #[test]
    fn literal_admin_username_is_admin_without_marker() {
        let credential = parse_credential_line("admin:secret").unwrap();
        assert!(credential.admin);
    }

    #[test]
    fn blank_and_delimiterless_lines_yield_nothing() {
        assert_eq!(parse_credential_line(""), None);
        assert_eq!(parse_credential_line("   "), None);
        assert_eq!(parse_credential_line("justausername"), None);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let credentials = load_credentials("/nonexistent/users.txt");

        assert_eq!(credentials, default_credentials());
        assert!(credentials[0].admin);
    }

    #[test]
    fn readable_file_with_no_valid_lines_is_empty() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"\n   \nnotaline\n").unwrap();
        file.flush().unwrap();

        assert!(load_credentials(file.path()).is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let file = NamedTempFile::new().unwrap();
        let accounts = vec![
            Credential::new("alice", "hunter2"),
            Credential::new("bob", "pw").with_admin(true),
            Credential::new("admin", "secret"),
        ];

        save_credentials(file.path(), &accounts).unwrap();

        assert_eq!(load_credentials(file.path()), accounts);
        let text = fs::read_to_string(file.path()).unwrap();
        assert_eq!(text, "alice:hunter2\nbob:pw:admin\nadmin:secret:admin\n");
    }
}
