//! Key-value backed session store.

use std::sync::Arc;

use resumate_core::clock::Clock;
use resumate_core::error::Result;
use resumate_core::kv::{KeyValueStore, KvChange, keys};
use resumate_core::session::{Session, SessionRepository, UserProfile};

use crate::dto::{create_user_profile_migrator, with_legacy_version};

/// Persists the session as three keys: `accessToken`, `refreshToken` and a
/// versioned `user` document.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read '{}' from session storage: {}", key, e);
                None
            }
        }
    }

    fn read_user(&self) -> Option<UserProfile> {
        let raw = self.read_key(keys::USER)?;
        match decode_user(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Discarding unreadable stored user profile: {}", e);
                None
            }
        }
    }
}

fn decode_user(raw: &str) -> Result<UserProfile> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let value = with_legacy_version(value, "1.0.0");
    let migrator = create_user_profile_migrator();
    Ok(migrator.load_flat_from("user_profile", value)?)
}

fn encode_user(user: &UserProfile) -> Result<String> {
    let migrator = create_user_profile_migrator();
    Ok(migrator.save_domain_flat("user_profile", user)?)
}

impl SessionRepository for SessionStore {
    fn load(&self) -> Session {
        Session {
            access_token: self.read_key(keys::ACCESS_TOKEN),
            refresh_token: self.read_key(keys::REFRESH_TOKEN),
            user: self.read_user(),
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        let user = session.user.as_ref().map(encode_user).transpose()?;

        let changes = [
            (keys::ACCESS_TOKEN, session.access_token.clone()),
            (keys::REFRESH_TOKEN, session.refresh_token.clone()),
            (keys::USER, user),
        ]
        .into_iter()
        .map(|(key, value)| match value {
            Some(value) => KvChange::set(key, value),
            None => KvChange::remove(key),
        })
        .collect();

        self.store.apply(changes)?;
        tracing::debug!("Session persisted");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.store
            .apply(keys::SESSION_KEYS.iter().map(|key| KvChange::remove(key)).collect())?;
        tracing::debug!("Session cleared");
        Ok(())
    }

    fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumate_core::clock::ManualClock;
    use resumate_core::kv::InMemoryStore;

    const NOW: i64 = 1_700_000_000_000;

    fn profile() -> UserProfile {
        UserProfile {
            id: 9,
            email: "grace@example.com".to_string(),
            full_name: "Grace Hopper".to_string(),
            roles: vec!["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()],
            created_at: Some(NOW),
            expires_in: Some(3600),
        }
    }

    fn signed_in() -> Session {
        Session {
            access_token: Some("access".to_string()),
            refresh_token: Some("refresh".to_string()),
            user: Some(profile()),
        }
    }

    fn setup() -> (Arc<InMemoryStore>, ManualClock, SessionStore) {
        let kv = Arc::new(InMemoryStore::new());
        let clock = ManualClock::at(NOW);
        let store = SessionStore::new(kv.clone(), Arc::new(clock.clone()));
        (kv, clock, store)
    }

    #[test]
    fn test_save_then_load() {
        let (kv, _clock, store) = setup();

        store.save(&signed_in()).unwrap();

        assert_eq!(kv.write_count(), 1);
        assert_eq!(store.load(), signed_in());
    }

    #[test]
    fn test_empty_storage_loads_anonymous() {
        let (_kv, _clock, store) = setup();
        assert_eq!(store.load(), Session::anonymous());
    }

    #[test]
    fn test_corrupt_user_reads_as_absent() {
        let (kv, _clock, store) = setup();
        kv.set(keys::ACCESS_TOKEN, "access".to_string()).unwrap();
        kv.set(keys::USER, "{broken".to_string()).unwrap();

        let session = store.load();
        assert_eq!(session.access_token.as_deref(), Some("access"));
        assert_eq!(session.user, None);
        assert!(!store.is_authenticated(&session));
    }

    #[test]
    fn test_unversioned_user_document_is_migrated() {
        let (kv, _clock, store) = setup();
        kv.set(
            keys::USER,
            r#"{"id":9,"email":"g@example.com","fullName":"Grace","roles":[],
                "createdAt":"2023-11-14T22:13:20","expiresIn":3600}"#
                .to_string(),
        )
        .unwrap();

        let user = store.load().user.unwrap();
        assert_eq!(user.created_at, Some(NOW));
    }

    #[test]
    fn test_clear_removes_all_fields() {
        let (kv, _clock, store) = setup();
        store.save(&signed_in()).unwrap();
        kv.set(keys::THEME, "dark".to_string()).unwrap();

        store.clear().unwrap();

        assert_eq!(store.load(), Session::anonymous());
        assert_eq!(kv.get(keys::THEME).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_expiry_follows_clock() {
        let (_kv, clock, store) = setup();
        let session = signed_in();

        assert!(!store.is_expired(&session));
        clock.advance_secs(3601);
        assert!(store.is_expired(&session));
    }

    #[test]
    fn test_restore_clears_expired_session() {
        let (kv, clock, store) = setup();
        store.save(&signed_in()).unwrap();

        assert_eq!(store.restore().unwrap(), signed_in());

        clock.advance_secs(7200);
        let restored = store.restore().unwrap();
        assert!(!restored.is_authenticated());
        assert_eq!(restored.refresh_token.as_deref(), Some("refresh"));
        assert_eq!(kv.get(keys::ACCESS_TOKEN).unwrap(), None);
        assert_eq!(kv.get(keys::USER).unwrap(), None);
        assert_eq!(kv.get(keys::REFRESH_TOKEN).unwrap().as_deref(), Some("refresh"));
    }

    #[test]
    fn test_restore_of_anonymous_session_does_not_write() {
        let (kv, _clock, store) = setup();

        assert_eq!(store.restore().unwrap(), Session::anonymous());
        assert_eq!(kv.write_count(), 0);
    }

    #[test]
    fn test_restore_clears_token_without_user() {
        let (kv, _clock, store) = setup();
        kv.set(keys::ACCESS_TOKEN, "orphan".to_string()).unwrap();

        assert_eq!(store.restore().unwrap(), Session::anonymous());
        assert!(kv.snapshot().is_empty());
    }
}
