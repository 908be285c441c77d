pub mod drafts;

pub use drafts::{
    DEFAULT_MAX_SESSIONS, Draft, DraftStore, SESSION_COOKIE, SessionId, new_session,
    session_from_headers,
};
