use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use axum::http::{HeaderMap, HeaderValue, header, header::InvalidHeaderValue};
use dashmap::DashMap;
use tracing::debug;

pub const SESSION_COOKIE: &str = "lessonbox_session";

pub type SessionId = String;
pub type LessonId = String;

/// The last code a visitor submitted for a lesson
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub code: String,
    pub attempts: u32,
}

/// Sessions kept before the least recently active one is evicted
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Default)]
struct SessionDrafts {
    drafts: HashMap<LessonId, Draft>,
    last_active: u64,
}

/// Per-visitor drafts, keyed by the session cookie.
///
/// At most `max_sessions` sessions are held; saving for a new session when
/// full evicts the one that was used least recently.
#[derive(Clone)]
pub struct DraftStore {
    sessions: Arc<DashMap<SessionId, SessionDrafts>>,
    clock: Arc<AtomicU64>,
    max_sessions: usize,
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            clock: Arc::new(AtomicU64::new(0)),
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn get(&self, session_id: &str, lesson_id: &str) -> Option<Draft> {
        let mut session = self.sessions.get_mut(session_id)?;
        session.last_active = self.tick();
        session.drafts.get(lesson_id).cloned()
    }

    /// Store `code` as the latest draft and count the attempt
    pub fn save(&self, session_id: &str, lesson_id: &str, code: &str) -> Draft {
        if !self.sessions.contains_key(session_id) {
            self.evict_to(self.max_sessions - 1);
        }

        let now = self.tick();
        let mut session = self.sessions.entry(session_id.to_string()).or_default();
        session.last_active = now;
        let draft = session
            .drafts
            .entry(lesson_id.to_string())
            .and_modify(|draft| {
                draft.code = code.to_string();
                draft.attempts += 1;
            })
            .or_insert_with(|| Draft {
                code: code.to_string(),
                attempts: 1,
            });
        draft.clone()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    /// Drop least recently active sessions until at most `limit` remain
    fn evict_to(&self, limit: usize) {
        while self.sessions.len() > limit {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|entry| entry.value().last_active)
                .map(|entry| entry.key().clone());
            let Some(oldest) = oldest else {
                return;
            };
            self.sessions.remove(&oldest);
            debug!("Evicted drafts of session {}", oldest);
        }
    }
}

/// Read the session id from the request cookies, ignoring malformed values
pub fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| uuid::Uuid::parse_str(value).ok())
        .map(|id| id.to_string())
}

/// A fresh session id and the `Set-Cookie` value announcing it
pub fn new_session() -> Result<(SessionId, HeaderValue), InvalidHeaderValue> {
    let id = uuid::Uuid::new_v4().to_string();
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, id
    );
    Ok((id, HeaderValue::from_str(&cookie)?))
}
