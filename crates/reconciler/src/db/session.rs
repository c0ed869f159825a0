use super::MockDb;
use crate::core::errors::{CustomResult, StorageError};

#[async_trait::async_trait]
pub trait RedirectSessionInterface {
    /// Remember the redirect target for a checkout session.
    async fn store_session_redirect_url(
        &self,
        session_id: &str,
        redirect_url: &str,
    ) -> CustomResult<(), StorageError>;

    /// Take the redirect target for a session, clearing it so a replayed
    /// callback does not observe it again.
    async fn pop_session_redirect_url(
        &self,
        session_id: &str,
    ) -> CustomResult<Option<String>, StorageError>;
}

#[async_trait::async_trait]
impl RedirectSessionInterface for MockDb {
    async fn store_session_redirect_url(
        &self,
        session_id: &str,
        redirect_url: &str,
    ) -> CustomResult<(), StorageError> {
        let mut sessions = self.redirect_sessions.lock().await;
        sessions.retain(|(stored, _)| stored != session_id);
        sessions.push((session_id.to_string(), redirect_url.to_string()));
        Ok(())
    }

    async fn pop_session_redirect_url(
        &self,
        session_id: &str,
    ) -> CustomResult<Option<String>, StorageError> {
        let mut sessions = self.redirect_sessions.lock().await;
        let position = sessions
            .iter()
            .position(|(stored, _)| stored == session_id);
        Ok(position.map(|index| sessions.remove(index).1))
    }
}
