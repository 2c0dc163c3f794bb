use crate::models::AuthResponse;
use crate::session::Session;
use crate::storage::{self, Storage};

const STORAGE_KEY: &str = "user";

/// Sole owner of the [`Session`]; every change is written through to storage
pub struct UserStore {
    session: Session,
    storage: Box<dyn Storage>,
}

impl UserStore {
    /// Restore the session from `storage`, or start logged out
    pub fn new(storage: Box<dyn Storage>) -> Self {
        let session = storage::load_or_default(storage.as_ref(), STORAGE_KEY);
        Self { session, storage }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn logged_in(&self) -> bool {
        self.session.logged_in()
    }

    pub fn picture_placeholder(&self) -> Option<String> {
        self.session.picture_placeholder()
    }

    /// Replace the whole session with the identity returned by the server
    pub fn sign_in(&mut self, response: AuthResponse) {
        self.session = Session::from_auth(response);
        self.persist();
    }

    pub fn sign_out(&mut self) {
        self.session = Session::new();
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = storage::save(self.storage.as_mut(), STORAGE_KEY, &self.session) {
            tracing::warn!("Failed to persist session: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn response() -> AuthResponse {
        AuthResponse {
            email: "a@b.com".into(),
            name: "Ann".into(),
            token: "T1".into(),
        }
    }

    #[test]
    fn test_sign_in_sets_all_fields() {
        let mut store = UserStore::new(Box::new(MemoryStorage::new()));
        store.sign_in(response());

        let session = store.session();
        assert!(store.logged_in());
        assert_eq!(session.email(), Some("a@b.com"));
        assert_eq!(session.name(), Some("Ann"));
        assert_eq!(session.token(), Some("T1"));
        assert_eq!(store.picture_placeholder().as_deref(), Some("A"));
    }

    #[test]
    fn test_sign_out_clears_all_fields() {
        let mut store = UserStore::new(Box::new(MemoryStorage::new()));
        store.sign_in(response());
        store.sign_out();

        assert!(!store.logged_in());
        assert_eq!(store.session(), &Session::new());
    }

    #[test]
    fn test_sign_out_when_already_logged_out() {
        let mut store = UserStore::new(Box::new(MemoryStorage::new()));
        store.sign_out();
        assert!(!store.logged_in());
    }

    #[test]
    fn test_restores_from_storage() {
        let mut backing = MemoryStorage::new();
        storage::save(&mut backing, STORAGE_KEY, &Session::from_auth(response())).unwrap();

        let store = UserStore::new(Box::new(backing));
        assert!(store.logged_in());
        assert_eq!(store.session().token(), Some("T1"));
    }

    #[test]
    fn test_corrupt_storage_starts_logged_out() {
        let mut backing = MemoryStorage::new();
        backing.set(STORAGE_KEY, "[1, 2").unwrap();

        let store = UserStore::new(Box::new(backing));
        assert!(!store.logged_in());
    }
}
