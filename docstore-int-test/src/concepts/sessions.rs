use docstore::collection::{DocCollection, FindOptions};
use docstore::doc;
use docstore::doc_store::DocStore;
use docstore::errors::{DocStoreError, DocStoreResult, ErrorKind};
use docstore::filter::field;

/// Sessioning concept: opaque tokens bound to usernames.
///
/// Tokens are random uuids; ending a session pops its document, so a token
/// can be ended exactly once.
pub struct SessionConcept {
    sessions: DocCollection,
}

impl SessionConcept {
    pub fn new(db: &DocStore) -> DocStoreResult<Self> {
        let sessions = db.collection("sessions")?;
        Ok(SessionConcept { sessions })
    }

    /// Starts a session for a user and returns the session token.
    pub fn start(&self, username: &str) -> DocStoreResult<String> {
        let token = uuid::Uuid::new_v4().to_string();
        self.sessions
            .create_one(doc! { token: (token.as_str()), username: username })?;
        Ok(token)
    }

    /// Returns the username bound to a session token.
    pub fn get_user(&self, token: &str) -> DocStoreResult<String> {
        let session = self
            .sessions
            .read_one(field("token").eq(token), &FindOptions::default())?
            .ok_or_else(|| DocStoreError::new("Session not found", ErrorKind::NotFound))?;

        session.get("username").as_str().map(String::from).ok_or_else(|| {
            DocStoreError::new("Session is missing 'username'", ErrorKind::ObjectMapping)
        })
    }

    /// Ends a session. Fails when the token does not name a live session.
    pub fn end(&self, token: &str) -> DocStoreResult<()> {
        match self.sessions.pop_one(field("token").eq(token))? {
            Some(_) => Ok(()),
            None => Err(DocStoreError::new("Session not found", ErrorKind::NotFound)),
        }
    }

    /// Counts the live sessions.
    pub fn active_count(&self) -> DocStoreResult<u64> {
        self.sessions
            .count(docstore::filter::all(), &FindOptions::default())
    }
}
