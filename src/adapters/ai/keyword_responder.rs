//! Keyword Responder - Offline scripted replies.
//!
//! Used when no AI endpoint is configured. Replies are keyed on the most
//! recent user turn and name a specialist where the symptoms suggest one.

use async_trait::async_trait;

use crate::ports::{AIError, AIRequest, AIResponder};

struct Rule {
    keywords: &'static [&'static str],
    reply: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        keywords: &["headache", "migraine"],
        reply: "It sounds like you might be experiencing headaches. This could be due to various reasons like stress, dehydration, or eye strain. Would you like me to help you book an appointment with a Neurologist?",
    },
    Rule {
        keywords: &["skin", "rash", "acne"],
        reply: "Based on your description, you might want to consult with a Dermatologist. Would you like me to help you find available dermatologists?",
    },
    Rule {
        keywords: &["heart", "chest pain", "palpitations"],
        reply: "Chest pain or heart palpitations could be serious. I recommend speaking with a Cardiologist. Would you like me to help you book an urgent appointment?",
    },
    Rule {
        keywords: &["joint", "bone", "back pain"],
        reply: "Joint or bone pain could be better addressed by an Orthopedic specialist. Would you like me to help you book an appointment?",
    },
    Rule {
        keywords: &["appointment", "book", "schedule"],
        reply: "I can help you book an appointment. What kind of specialist would you like to see?",
    },
];

const DEFAULT_REPLY: &str = "I understand you're not feeling well. Could you provide more details about your symptoms so I can help you find the right specialist?";

/// Scripted responder; never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordResponder;

impl KeywordResponder {
    pub fn new() -> Self {
        Self
    }

    /// Reply for a single user text.
    pub fn reply_for(text: &str) -> &'static str {
        let lower = text.to_lowercase();
        RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
            .map(|rule| rule.reply)
            .unwrap_or(DEFAULT_REPLY)
    }
}

#[async_trait]
impl AIResponder for KeywordResponder {
    async fn respond(&self, request: AIRequest) -> Result<String, AIError> {
        Ok(Self::reply_for(request.latest_user_text()).to_string())
    }
}
