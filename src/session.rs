use serde::{Deserialize, Serialize};

use crate::models::AuthResponse;

/// Authenticated identity held by the shell.
///
/// Fields are only ever set or cleared together: a successful login fills all
/// three, logout empties all three. Being logged in means holding a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    email: Option<String>,
    name: Option<String>,
    token: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_auth(response: AuthResponse) -> Self {
        Self {
            email: Some(response.email),
            name: Some(response.name),
            token: Some(response.token),
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Initials shown in place of a profile picture ("Ann Lee" -> "AL")
    pub fn picture_placeholder(&self) -> Option<String> {
        let initials: String = self
            .name
            .as_deref()?
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect();

        if initials.is_empty() {
            None
        } else {
            Some(initials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> Session {
        Session::from_auth(AuthResponse {
            email: "a@b.com".into(),
            name: "Ann Lee".into(),
            token: "T1".into(),
        })
    }

    #[test]
    fn test_empty_session_is_logged_out() {
        let session = Session::new();
        assert!(!session.logged_in());
        assert!(session.email().is_none());
        assert!(session.name().is_none());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_logged_in_follows_token() {
        let session = ann();
        assert!(session.logged_in());
        assert_eq!(session.token(), Some("T1"));
    }

    #[test]
    fn test_picture_placeholder() {
        assert_eq!(ann().picture_placeholder().as_deref(), Some("AL"));
        assert_eq!(Session::new().picture_placeholder(), None);
    }

    #[test]
    fn test_picture_placeholder_uppercases_and_collapses_whitespace() {
        let session = Session::from_auth(AuthResponse {
            email: "e@x.com".into(),
            name: "  émile   de la  cruz ".into(),
            token: "t".into(),
        });
        assert_eq!(session.picture_placeholder().as_deref(), Some("ÉDLC"));
    }

    #[test]
    fn test_picture_placeholder_blank_name() {
        let session = Session::from_auth(AuthResponse {
            email: "e@x.com".into(),
            name: "   ".into(),
            token: "t".into(),
        });
        assert_eq!(session.picture_placeholder(), None);
    }
}
