pub mod assistant;
pub mod details;
pub mod error;
pub mod session;

pub use assistant::{AssistantClient, DEFAULT_BASE_URL};
pub use details::LiveDetails;
pub use error::ClientError;
pub use session::{
    CHAT_FALLBACK, ChatMessage, ChatRole, PanelManager, PanelSession, RequestTag, TranscriptPolicy,
};
