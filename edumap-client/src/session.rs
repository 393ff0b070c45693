use crate::assistant::AssistantClient;
use crate::details::LiveDetails;
use crate::error::ClientError;
use chrono::{DateTime, Utc};
use edumap_core::LocationRecord;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Shown in place of an assistant reply when the chatbot request fails.
/// Users get this text, never a technical error.
pub const CHAT_FALLBACK: &str = "Sorry, I couldn't process your request at the moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One transcript entry. The transcript is append-only for the lifetime of
/// a panel session.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            at: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

/// What happens to a transcript when its panel closes. The source variants
/// disagreed on this, so it is a configuration choice rather than a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranscriptPolicy {
    /// Every open starts a fresh transcript.
    #[default]
    ResetOnOpen,
    /// Transcripts survive re-selecting the same institution within a run.
    KeepPerRecord,
}

/// Correlates an asynchronous completion with the selection that issued it.
/// Tags carry a monotonic sequence number and the institution name; a
/// completion whose tag predates the current session is discarded instead of
/// writing into state the user has already left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    seq: u64,
    inst_name: String,
}

impl RequestTag {
    pub fn inst_name(&self) -> &str {
        &self.inst_name
    }
}

/// The details panel for one selected institution. Base attributes are
/// available the moment the panel opens; live details merge in whenever
/// their fetch resolves.
#[derive(Debug, Clone)]
pub struct PanelSession {
    record: LocationRecord,
    live: Option<LiveDetails>,
    transcript: Vec<ChatMessage>,
    opened_seq: u64,
}

impl PanelSession {
    pub fn record(&self) -> &LocationRecord {
        &self.record
    }

    pub fn live(&self) -> Option<&LiveDetails> {
        self.live.as_ref()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }
}

/// Owns the panel lifecycle: at most one session is open, selection swaps
/// sessions, and completions are gated by their request tag.
pub struct PanelManager {
    policy: TranscriptPolicy,
    session: Option<PanelSession>,
    saved: HashMap<String, Vec<ChatMessage>>,
    seq: u64,
}

impl PanelManager {
    pub fn new(policy: TranscriptPolicy) -> Self {
        Self {
            policy,
            session: None,
            saved: HashMap::new(),
            seq: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&PanelSession> {
        self.session.as_ref()
    }

    fn next_tag(&mut self, inst_name: &str) -> RequestTag {
        self.seq += 1;
        RequestTag {
            seq: self.seq,
            inst_name: inst_name.to_string(),
        }
    }

    /// A completion belongs to the current session iff it targets the same
    /// institution and was issued no earlier than the session opened.
    fn accepts(&self, tag: &RequestTag) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.record.name == tag.inst_name && tag.seq >= s.opened_seq)
    }

    /// Open the panel for `record`. Returns the tag for the live-details
    /// request the caller should now issue; the base attributes are already
    /// renderable when this returns.
    pub fn open(&mut self, record: LocationRecord) -> RequestTag {
        self.close();

        let tag = self.next_tag(&record.name);
        let transcript = match self.policy {
            TranscriptPolicy::ResetOnOpen => Vec::new(),
            TranscriptPolicy::KeepPerRecord => {
                self.saved.remove(&record.name).unwrap_or_default()
            }
        };

        self.session = Some(PanelSession {
            record,
            live: None,
            transcript,
            opened_seq: tag.seq,
        });
        tag
    }

    pub fn close(&mut self) {
        if let Some(session) = self.session.take()
            && self.policy == TranscriptPolicy::KeepPerRecord
        {
            self.saved.insert(session.record.name, session.transcript);
        }
    }

    /// Merge a live-details completion. A failed fetch is logged and the
    /// panel simply keeps rendering without the augmented fields; a stale
    /// completion is dropped.
    pub fn accept_live(
        &mut self,
        tag: &RequestTag,
        result: std::result::Result<LiveDetails, ClientError>,
    ) {
        if !self.accepts(tag) {
            debug!("Discarding stale live details for {}", tag.inst_name);
            return;
        }

        match result {
            Ok(live) => {
                if let Some(session) = self.session.as_mut() {
                    session.live = Some(live);
                }
            }
            Err(e) => warn!("Live details for {} unavailable: {}", tag.inst_name, e),
        }
    }

    /// First half of a chat send: append the user message (optimistically,
    /// before any network traffic) and hand back the tag and query for the
    /// request the caller must now issue. `None` means nothing happened:
    /// no panel is open, or the input trimmed to empty, in which case the
    /// transcript is untouched and no request may be made.
    pub fn begin_chat(&mut self, input: &str) -> Option<(RequestTag, String)> {
        let query = input.trim();
        if query.is_empty() {
            return None;
        }

        let inst_name = self.session.as_ref()?.record.name.clone();
        let tag = self.next_tag(&inst_name);
        if let Some(session) = self.session.as_mut() {
            session.transcript.push(ChatMessage::user(query));
        }
        Some((tag, query.to_string()))
    }

    /// Second half: file the assistant's reply, or the fixed fallback when
    /// the request failed. Stale tags are dropped.
    pub fn accept_reply(
        &mut self,
        tag: &RequestTag,
        result: std::result::Result<String, ClientError>,
    ) {
        if !self.accepts(tag) {
            debug!("Discarding stale assistant reply for {}", tag.inst_name);
            return;
        }

        let text = match result {
            Ok(text) => text,
            Err(e) => {
                warn!("Chatbot request for {} failed: {}", tag.inst_name, e);
                CHAT_FALLBACK.to_string()
            }
        };
        if let Some(session) = self.session.as_mut() {
            session.transcript.push(ChatMessage::assistant(text));
        }
    }

    /// Drive one full exchange inline. Interactive frontends split this into
    /// `begin_chat` + `accept_reply` around a spawned task; either way the
    /// user message lands before the request goes out. Returns whether a
    /// request was issued.
    pub async fn send_chat(&mut self, client: &AssistantClient, input: &str) -> bool {
        let Some((tag, query)) = self.begin_chat(input) else {
            return false;
        };

        let reply = client.ask(&query, &tag.inst_name).await;
        self.accept_reply(&tag, reply);
        true
    }
}
