use std::{fs, path::Path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ThreadError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Ai,
    #[default]
    Human,
    System,
    Viewer,
}

impl SenderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Human => "human",
            Self::System => "system",
            Self::Viewer => "viewer",
        }
    }
}

/// One chat or debate message.
///
/// `reply_to_id` is the only edge the organizer follows; everything else
/// except `timestamp` is payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub sender_type: SenderType,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    /// Filled in by the organizer in threaded mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_depth: Option<usize>,
}

impl Message {
    pub fn new(id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Message {
            id: id.into(),
            sender_id: String::new(),
            sender_type: SenderType::default(),
            sender_name: String::new(),
            content: String::new(),
            timestamp,
            reply_to_id: None,
            thread_id: None,
            thread_depth: None,
        }
    }

    pub fn replying_to(mut self, parent_id: impl Into<String>) -> Self {
        self.reply_to_id = Some(parent_id.into());
        self
    }

    pub fn from_sender(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        self.sender_id = name.to_lowercase();
        self.sender_name = name;
        self.content = content.into();
        self
    }

    pub fn is_root(&self) -> bool {
        self.reply_to_id.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Chronological,
    #[default]
    Threaded,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chronological => "chronological",
            Self::Threaded => "threaded",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ViewMode {
    type Err = ThreadError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chronological" => Ok(Self::Chronological),
            "threaded" => Ok(Self::Threaded),
            _ => Err(ThreadError::UnknownViewMode(s.to_string())),
        }
    }
}

/// Read a JSON array of messages.
pub fn load_messages(path: &Path) -> Result<Vec<Message>> {
    let content = fs::read_to_string(path)?;
    let messages: Vec<Message> = serde_json::from_str(&content)?;
    tracing::debug!(count = messages.len(), path = %path.display(), "loaded messages");
    Ok(messages)
}

pub fn save_messages(path: &Path, messages: &[Message]) -> Result<()> {
    let json = serde_json::to_string_pretty(messages)?;
    fs::write(path, json)?;
    Ok(())
}
