//! Heuristic intent classifier for model replies.
//!
//! A reply is matched against an ordered list of marker rules. The first rule
//! that matches decides the variant; text matching none of them is treated as
//! intermediate reasoning.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AgentResponse {
    Search {
        content: String,
        #[serde(rename = "searchQuery")]
        query: String,
    },
    Answer {
        content: String,
    },
    Thinking {
        content: String,
    },
}

impl AgentResponse {
    pub fn kind(&self) -> &'static str {
        match self {
            AgentResponse::Search { .. } => "search",
            AgentResponse::Answer { .. } => "answer",
            AgentResponse::Thinking { .. } => "thinking",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            AgentResponse::Search { content, .. }
            | AgentResponse::Answer { content }
            | AgentResponse::Thinking { content } => content,
        }
    }
}

// One marker rule: a pattern and how to build the variant from its match
pub struct Rule {
    name: &'static str,
    pattern: Regex,
    build: fn(&str, &Captures) -> AgentResponse,
}

impl Rule {
    fn apply(&self, text: &str) -> Option<AgentResponse> {
        self.pattern
            .captures(text)
            .map(|caps| (self.build)(text, &caps))
    }
}

fn capture(caps: &Captures) -> String {
    caps.get(1)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

fn search(text: &str, caps: &Captures) -> AgentResponse {
    AgentResponse::Search {
        content: text.to_string(),
        query: capture(caps),
    }
}

fn answer(_text: &str, caps: &Captures) -> AgentResponse {
    AgentResponse::Answer {
        content: capture(caps),
    }
}

lazy_static! {
    // Evaluated top to bottom, first match wins
    pub static ref RULES: Vec<Rule> = vec![
        Rule {
            name: "search",
            // query starts on the marker's line and runs to its end
            pattern: Regex::new(r"(?i)SEARCH:[^\S\n]*(\S.*)").unwrap(),
            build: search,
        },
        Rule {
            name: "answer",
            // answer runs to the end of the text, newlines included
            pattern: Regex::new(r"(?is)ANSWER:\s*(.+)").unwrap(),
            build: answer,
        },
    ];
}

pub fn parse_agent_response(text: &str) -> AgentResponse {
    RULES
        .iter()
        .find_map(|rule| rule.apply(text))
        .unwrap_or_else(|| AgentResponse::Thinking {
            content: text.to_string(),
        })
}
