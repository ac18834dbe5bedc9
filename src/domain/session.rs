//! Per-visitor state carried between requests.

use serde::{Deserialize, Serialize};

use crate::domain::types::SessionId;

/// Explicit session context loaded at the start of a request and saved after mutation.
///
/// Holds the visitor's chat session id (so a returning visitor resumes the same
/// conversation) and the key of their quote wizard. The wizard itself stays on
/// the server, so the cookie remains a fixed, small size.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionContext {
    pub chat_session_id: Option<SessionId>,
    pub quote_key: Option<SessionId>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of the visitor's wizard, assigning one on first use.
    pub fn quote_key_mut(&mut self) -> SessionId {
        *self.quote_key.get_or_insert_with(SessionId::new)
    }

    pub fn clear_chat(&mut self) {
        self.chat_session_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_key_is_assigned_once() {
        let mut context = SessionContext::new();
        assert!(context.quote_key.is_none());
        let key = context.quote_key_mut();
        assert_eq!(context.quote_key_mut(), key);
    }

    #[test]
    fn clearing_chat_keeps_quote_key() {
        let mut context = SessionContext {
            chat_session_id: Some(SessionId::new()),
            quote_key: Some(SessionId::new()),
        };
        context.clear_chat();
        assert!(context.chat_session_id.is_none());
        assert!(context.quote_key.is_some());
    }

    #[test]
    fn serialized_context_stays_small() {
        let context = SessionContext {
            chat_session_id: Some(SessionId::new()),
            quote_key: Some(SessionId::new()),
        };
        let json = serde_json::to_string(&context).unwrap();
        assert!(json.len() < 200, "{json}");
    }
}
