//! Session repository trait.

use crate::clock::Clock;
use crate::error::Result;
use crate::session::model::Session;

/// Persistent store for the client session.
///
/// `load` never fails: missing or corrupt fields come back as `None`.
pub trait SessionRepository: Send + Sync {
    /// Reads the persisted session.
    fn load(&self) -> Session;

    /// Persists all session fields in one atomic write.
    fn save(&self, session: &Session) -> Result<()>;

    /// Removes every persisted session field.
    fn clear(&self) -> Result<()>;

    /// Clock used for expiry checks.
    fn clock(&self) -> &dyn Clock;

    fn is_authenticated(&self, session: &Session) -> bool {
        session.is_authenticated()
    }

    fn is_expired(&self, session: &Session) -> bool {
        session.is_expired_at(self.clock().now_millis())
    }

    /// Startup check: returns the persisted session if it is authenticated and
    /// unexpired. Otherwise the access token and user are dropped and only the
    /// refresh token is kept, so the session can still be refreshed.
    fn restore(&self) -> Result<Session> {
        let session = self.load();
        if self.is_authenticated(&session) && !self.is_expired(&session) {
            return Ok(session);
        }

        let retained = Session {
            refresh_token: session.refresh_token.clone(),
            ..Session::anonymous()
        };
        if session != retained {
            self.save(&retained)?;
        }
        Ok(retained)
    }
}
