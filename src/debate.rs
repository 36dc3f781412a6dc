//! Debate panels and round-robin turn selection.
//!
//! Agents are a closed set resolved through [`AgentId`]; debates live in a
//! [`DebateFixtures`] value that callers load and pass around.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThreadError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentId {
    #[serde(alias = "1")]
    Claude,
    #[serde(alias = "2")]
    Gpt4,
    #[serde(alias = "3")]
    Gemini,
    #[serde(alias = "4")]
    Mistral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAi,
    Google,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
            Self::Google => "google",
        }
    }
}

/// Static configuration of one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    pub name: &'static str,
    pub provider: Provider,
    pub model: &'static str,
    pub speciality: &'static str,
}

impl AgentId {
    pub const ALL: [AgentId; 4] = [Self::Claude, Self::Gpt4, Self::Gemini, Self::Mistral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Gpt4 => "gpt4",
            Self::Gemini => "gemini",
            Self::Mistral => "mistral",
        }
    }

    /// Numeric id used by the chat routes.
    pub fn legacy_id(&self) -> &'static str {
        match self {
            Self::Claude => "1",
            Self::Gpt4 => "2",
            Self::Gemini => "3",
            Self::Mistral => "4",
        }
    }

    pub fn profile(&self) -> AgentProfile {
        match self {
            Self::Claude => AgentProfile {
                name: "Claude",
                provider: Provider::Anthropic,
                model: "claude-3.5-sonnet-20241022",
                speciality: "research assistant",
            },
            Self::Gpt4 => AgentProfile {
                name: "GPT-4",
                provider: Provider::OpenAi,
                model: "gpt-4o",
                speciality: "creative collaborator",
            },
            Self::Gemini => AgentProfile {
                name: "Gemini",
                provider: Provider::Google,
                model: "gemini-1.5-pro",
                speciality: "multimodal analyst",
            },
            // No Mistral provider is wired up; it runs on the OpenAI model.
            Self::Mistral => AgentProfile {
                name: "Mistral",
                provider: Provider::OpenAi,
                model: "gpt-4o",
                speciality: "technical specialist",
            },
        }
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.profile().name)
    }
}

impl std::str::FromStr for AgentId {
    type Err = ThreadError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|agent| agent.as_str() == key || agent.legacy_id() == key)
            .ok_or_else(|| ThreadError::AgentNotFound(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub agent: AgentId,
    pub expertise: String,
    pub personality: String,
    pub perspective: String,
}

impl Participant {
    fn new(agent: AgentId, expertise: &str, personality: &str, perspective: &str) -> Self {
        Participant {
            agent,
            expertise: expertise.to_string(),
            personality: personality.to_string(),
            perspective: perspective.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateConfig {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl DebateConfig {
    /// Round-robin: the speaker after `history_len` messages.
    pub fn next_speaker(&self, history_len: usize) -> Result<&Participant> {
        if self.participants.is_empty() {
            return Err(ThreadError::NoParticipants(self.id.clone()));
        }
        Ok(&self.participants[history_len % self.participants.len()])
    }

    pub fn system_prompt(&self, speaker: &Participant) -> String {
        let name = speaker.agent.profile().name;
        let others = self
            .participants
            .iter()
            .map(|p| format!("- {}: {} ({})", p.agent.profile().name, p.expertise, p.perspective))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "You are participating in a debate about: \"{title}\"\n\
             \n\
             {description}\n\
             \n\
             You are {name}, with expertise in: {expertise}\n\
             Your personality: {personality}\n\
             Your perspective: {perspective}\n\
             \n\
             Other participants in this debate:\n\
             {others}\n\
             \n\
             Instructions:\n\
             1. Respond as {name} with your unique perspective and expertise\n\
             2. Engage with the arguments of other participants\n\
             3. Build on previous points while adding your own insights\n\
             4. Maintain a respectful but intellectually rigorous tone\n\
             5. Format your response as: \"{name}: [your response]\"",
            title = self.title,
            description = self.description,
            name = name,
            expertise = speaker.expertise,
            personality = speaker.personality,
            perspective = speaker.perspective,
            others = others,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DebateFixtures {
    #[serde(default)]
    pub debates: Vec<DebateConfig>,
}

impl DebateFixtures {
    /// The three demo debates.
    pub fn builtin() -> Self {
        use AgentId::*;
        DebateFixtures {
            debates: vec![
                DebateConfig {
                    id: "1".to_string(),
                    title: "The Future of AI Ethics".to_string(),
                    description: "Should AI development be regulated? How do we balance innovation with safety?".to_string(),
                    participants: vec![
                        Participant::new(Claude, "Academic Research, Ethics, Philosophy", "Scholarly and analytical, values evidence-based reasoning", "Focuses on ethical frameworks and long-term societal implications"),
                        Participant::new(Gpt4, "Creative Problem Solving, Innovation", "Imaginative and innovative, explores unconventional solutions", "Emphasizes creative approaches and technological possibilities"),
                        Participant::new(Gemini, "Multimodal Analysis, Data Visualization", "Comprehensive and thorough, excels at connecting different types of information", "Focuses on data-driven insights and comprehensive analysis"),
                        Participant::new(Mistral, "Technical Implementation, System Architecture", "Precise and practical, focuses on actionable technical solutions", "Emphasizes practical implementation and technical feasibility"),
                    ],
                },
                DebateConfig {
                    id: "2".to_string(),
                    title: "Climate Change Solutions".to_string(),
                    description: "What are the most effective approaches to addressing climate change?".to_string(),
                    participants: vec![
                        Participant::new(Claude, "Scientific Analysis, Research", "Scholarly and analytical", "Focuses on scientific evidence and research-based solutions"),
                        Participant::new(Gpt4, "Creative Problem Solving, Innovation", "Imaginative and innovative", "Explores creative and innovative approaches to climate solutions"),
                        Participant::new(Mistral, "Technical Implementation, Engineering", "Precise and practical", "Focuses on technical implementation and engineering solutions"),
                    ],
                },
                DebateConfig {
                    id: "3".to_string(),
                    title: "The Impact of Social Media".to_string(),
                    description: "How has social media changed society and human interaction?".to_string(),
                    participants: vec![
                        Participant::new(Gpt4, "Creative Analysis, Social Trends", "Imaginative and innovative", "Explores creative interpretations and social dynamics"),
                        Participant::new(Gemini, "Data Analysis, Pattern Recognition", "Comprehensive and thorough", "Focuses on data-driven analysis of social media impact"),
                        Participant::new(Mistral, "Technical Systems, Architecture", "Precise and practical", "Analyzes technical aspects and system design implications"),
                    ],
                },
            ],
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let fixtures = Self::from_toml_str(&content)?;
        tracing::debug!(count = fixtures.debates.len(), path = %path.display(), "loaded debate fixtures");
        Ok(fixtures)
    }

    pub fn get(&self, id: &str) -> Result<&DebateConfig> {
        self.debates
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| ThreadError::DebateNotFound(id.to_string()))
    }
}
