//! Prompt plans
//!
//! Turns a [`RoutingDecision`] and a chat history into the message list and
//! sampling temperature for the downstream generation call. The generation
//! call itself is not made here.

use crate::router::{format_context, RoutingDecision, Strategy};
use insightx_core::{Error, Result, ScoredFragment};
use serde::{Deserialize, Serialize};

pub const GROUNDED_SYSTEM_PROMPT: &str = "You are a helpful, concise assistant. Use the CONTEXT provided to answer accurately. \
If you are asked explicitly about what the user's files say and the context does not cover it, say so clearly. \
Write in a natural, conversational way.";

pub const GENERAL_SYSTEM_PROMPT: &str = "You are a clear, friendly conversational assistant. Answer from general knowledge when \
there is no evidence in the user's files. Do NOT invent details about private files. \
Only mention the lack of evidence in the files if the user explicitly asks about them \
(for example: 'what does my CSV say?'). You may ask clarifying questions and suggest next steps.";

pub const STRICT_SYSTEM_PROMPT: &str = "You are a concise assistant. Answer ONLY with information supported by the CONTEXT. \
If there is not enough evidence, say explicitly that the answer is not in the data.";

pub const GROUNDED_TEMPERATURE: f32 = 0.3;
pub const GENERAL_TEMPERATURE: f32 = 0.6;
pub const STRICT_TEMPERATURE: f32 = 0.2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// The most recent user message, trimmed
pub fn latest_question(messages: &[ChatMessage]) -> Result<&str> {
    let last_user = messages
        .iter()
        .rev()
        .find(|m| m.role == ChatRole::User)
        .ok_or_else(|| Error::InvalidInput("conversation has no user message".to_string()))?;
    let question = last_user.content.trim();
    if question.is_empty() {
        return Err(Error::InvalidInput("last user message is empty".to_string()));
    }
    Ok(question)
}

/// Messages and sampling settings for one generation call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptPlan {
    pub strategy: Strategy,
    pub temperature: f32,
    pub messages: Vec<ChatMessage>,
}

impl PromptPlan {
    /// Build the plan for `question` given the routing decision.
    ///
    /// Only the last `history_window` non-system messages of `history` are
    /// kept. In grounded mode a trailing user turn is replaced by a message
    /// carrying the context block and the question (any other trailing turn
    /// stays); in general mode the history is passed through unchanged.
    pub fn build(
        decision: &RoutingDecision,
        question: &str,
        history: &[ChatMessage],
        history_window: usize,
    ) -> Self {
        let non_system: Vec<&ChatMessage> =
            history.iter().filter(|m| m.role != ChatRole::System).collect();
        let start = non_system.len().saturating_sub(history_window);
        let mut window: Vec<ChatMessage> = non_system[start..].iter().map(|m| (*m).clone()).collect();

        if decision.use_grounded_context {
            if window.last().map(|m| m.role) == Some(ChatRole::User) {
                window.pop();
            }
            let mut messages = Vec::with_capacity(window.len() + 2);
            messages.push(ChatMessage::system(GROUNDED_SYSTEM_PROMPT));
            messages.extend(window);
            messages.push(ChatMessage::user(format!(
                "CONTEXT (relevant excerpts from the user's files):\n{}\n\nUSER QUESTION:\n{}",
                decision.context_block(),
                question
            )));
            Self {
                strategy: Strategy::Grounded,
                temperature: GROUNDED_TEMPERATURE,
                messages,
            }
        } else {
            if window.last().map(|m| m.role) != Some(ChatRole::User) {
                window.push(ChatMessage::user(question));
            }
            let mut messages = Vec::with_capacity(window.len() + 1);
            messages.push(ChatMessage::system(GENERAL_SYSTEM_PROMPT));
            messages.extend(window);
            Self {
                strategy: Strategy::General,
                temperature: GENERAL_TEMPERATURE,
                messages,
            }
        }
    }

    /// Single-turn plan that always answers from `ranked`, with no history.
    ///
    /// The model is told to refuse when the excerpts do not contain the
    /// answer, so an empty or weak ranking still produces a plan.
    pub fn strict(ranked: &[ScoredFragment], question: &str) -> Self {
        Self {
            strategy: Strategy::Strict,
            temperature: STRICT_TEMPERATURE,
            messages: vec![
                ChatMessage::system(STRICT_SYSTEM_PROMPT),
                ChatMessage::user(format!(
                    "QUESTION:\n{}\n\nCONTEXT:\n{}",
                    question,
                    format_context(ranked)
                )),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded() -> RoutingDecision {
        RoutingDecision {
            use_grounded_context: true,
            top_score: 0.5,
            selected_fragments: vec![ScoredFragment::new("Sales: 120 units", 0.5)],
        }
    }

    fn general() -> RoutingDecision {
        RoutingDecision {
            use_grounded_context: false,
            top_score: 0.1,
            selected_fragments: Vec::new(),
        }
    }

    fn conversation() -> Vec<ChatMessage> {
        vec![
            ChatMessage::system("ignored"),
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello!"),
            ChatMessage::user("how many units did we sell?"),
        ]
    }

    #[test]
    fn test_latest_question() {
        assert_eq!(latest_question(&conversation()).unwrap(), "how many units did we sell?");
        assert!(latest_question(&[ChatMessage::assistant("x")]).is_err());
        assert!(latest_question(&[ChatMessage::user("   ")]).is_err());
    }

    #[test]
    fn test_grounded_plan() {
        let history = conversation();
        let question = latest_question(&history).unwrap();
        let plan = PromptPlan::build(&grounded(), question, &history, 6);

        assert_eq!(plan.strategy, Strategy::Grounded);
        assert_eq!(plan.temperature, GROUNDED_TEMPERATURE);
        assert_eq!(plan.messages.len(), 4);
        assert_eq!(plan.messages[0].content, GROUNDED_SYSTEM_PROMPT);
        assert_eq!(plan.messages[1].content, "hi");
        assert_eq!(plan.messages[2].content, "hello!");
        let last = &plan.messages[3];
        assert_eq!(last.role, ChatRole::User);
        assert!(last.content.contains("[#1 score=0.500]\nSales: 120 units"));
        assert!(last.content.ends_with("USER QUESTION:\nhow many units did we sell?"));
    }

    #[test]
    fn test_general_plan_keeps_history() {
        let history = conversation();
        let plan = PromptPlan::build(&general(), "how many units did we sell?", &history, 6);

        assert_eq!(plan.strategy, Strategy::General);
        assert_eq!(plan.temperature, GENERAL_TEMPERATURE);
        assert_eq!(plan.messages.len(), 4);
        assert_eq!(plan.messages[0].content, GENERAL_SYSTEM_PROMPT);
        assert!(plan.messages.iter().skip(1).all(|m| m.role != ChatRole::System));
        assert_eq!(plan.messages[3].content, "how many units did we sell?");
    }

    #[test]
    fn test_history_window() {
        let mut history = Vec::new();
        for i in 0..10 {
            history.push(ChatMessage::user(format!("q{}", i)));
            history.push(ChatMessage::assistant(format!("a{}", i)));
        }
        history.push(ChatMessage::user("final"));

        let plan = PromptPlan::build(&general(), "final", &history, 6);
        // system + 6 most recent
        assert_eq!(plan.messages.len(), 7);
        assert_eq!(plan.messages[1].content, "a7");
        assert_eq!(plan.messages[6].content, "final");
    }

    #[test]
    fn test_question_without_history() {
        let plan = PromptPlan::build(&general(), "what is a p-value?", &[], 6);
        assert_eq!(plan.messages.len(), 2);
        assert_eq!(plan.messages[1], ChatMessage::user("what is a p-value?"));

        let plan = PromptPlan::build(&grounded(), "units?", &[], 6);
        assert_eq!(plan.messages.len(), 2);
        assert!(plan.messages[1].content.contains("units?"));
    }

    #[test]
    fn test_grounded_keeps_trailing_assistant_turn() {
        // the question was never appended to this history, so nothing is dropped
        let history = vec![
            ChatMessage::user("how many units did we sell?"),
            ChatMessage::assistant("120 units."),
        ];
        let plan = PromptPlan::build(&grounded(), "and in March?", &history, 6);

        assert_eq!(plan.messages.len(), 4);
        assert_eq!(plan.messages[1].content, "how many units did we sell?");
        assert_eq!(plan.messages[2], ChatMessage::assistant("120 units."));
        let questions = plan
            .messages
            .iter()
            .filter(|m| m.content.contains("and in March?"))
            .count();
        assert_eq!(questions, 1);
    }

    #[test]
    fn test_strict_plan() {
        let ranked = vec![
            ScoredFragment::new("Sales: 120 units", 0.12),
            ScoredFragment::new("Returns: 4 units", 0.05),
        ];
        let plan = PromptPlan::strict(&ranked, "how many units were returned?");

        assert_eq!(plan.strategy, Strategy::Strict);
        assert_eq!(plan.temperature, STRICT_TEMPERATURE);
        assert_eq!(plan.messages.len(), 2);
        assert_eq!(plan.messages[0], ChatMessage::system(STRICT_SYSTEM_PROMPT));
        assert_eq!(
            plan.messages[1].content,
            "QUESTION:\nhow many units were returned?\n\nCONTEXT:\n\
             [#1 score=0.120]\nSales: 120 units\n\n[#2 score=0.050]\nReturns: 4 units"
        );

        let empty = PromptPlan::strict(&[], "anything?");
        assert!(empty.messages[1].content.ends_with("CONTEXT:\n"));
    }
}
