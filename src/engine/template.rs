// SociaClip Template Formatter
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Named text templates with `{name}` placeholders. `{{` and `}}` produce
// literal braces. Formatting failures are hard errors.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("template variable '{0}' was not provided")]
    MissingVariable(String),
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),
    #[error("malformed template at byte {position}: {reason}")]
    Malformed { position: usize, reason: String },
}

/// Id -> template text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateBook {
    templates: BTreeMap<String, String>,
}

impl Default for TemplateBook {
    fn default() -> Self {
        let mut book = Self::empty();
        book.insert(
            "strategy.educational.1",
            "Here's what most people get wrong about {concept}: {insight}. The better approach? {solution}.",
        );
        book.insert(
            "strategy.educational.2",
            "Let me break down {concept} for you: {insight}. This changes everything because {reason}.",
        );
        book.insert(
            "strategy.educational.3",
            "The truth about {concept} that nobody talks about: {insight}. Here's why it matters: {solution}.",
        );
        book.insert(
            "strategy.story.1",
            "I used to struggle with {challenge} until I discovered {solution}. The results? {outcome}. Game changer.",
        );
        book.insert(
            "strategy.story.2",
            "Plot twist: What everyone thinks about {concept} is wrong. Here's what actually works: {insight}.",
        );
        book.insert(
            "strategy.story.3",
            "True story: I tried this {concept} approach and the results blew my mind. Here's what happened: {outcome}.",
        );
        book.insert(
            "strategy.viral.1",
            "This {niche} hack is breaking the internet: {insight}. Try it and thank me later! 🔥",
        );
        book.insert(
            "strategy.viral.2",
            "POV: You discover the {concept} secret that {niche} experts don't want you to know 👀",
        );
        book.insert(
            "strategy.viral.3",
            "Wait... did this just solve the biggest {niche} problem? The answer is YES. 🤯",
        );
        book.insert("query.trending", "trending {niche} YouTube videos {year}");
        book.insert("query.viral", "viral {niche} content TikTok recent");
        book.insert("query.popular", "popular {niche} videos this week");
        book.insert("query.moments", "{niche} viral moments {month}");
        book.insert("query.best", "best {niche} clips going viral");
        book
    }
}

impl TemplateBook {
    pub fn empty() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, id: &str, text: &str) {
        self.templates.insert(id.to_string(), text.to_string());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.templates.get(id).map(|s| s.as_str())
    }

    pub fn format(&self, id: &str, vars: &HashMap<&str, String>) -> Result<String, FormatError> {
        let template = self
            .get(id)
            .ok_or_else(|| FormatError::UnknownTemplate(id.to_string()))?;
        render(template, vars)
    }
}

/// Substitute `{name}` placeholders in `template`
pub fn render(template: &str, vars: &HashMap<&str, String>) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    match c {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => {
                            return Err(FormatError::Malformed {
                                position: pos,
                                reason: "nested '{' inside placeholder".to_string(),
                            })
                        }
                        other => name.push(other),
                    }
                }
                if !closed {
                    return Err(FormatError::Malformed {
                        position: pos,
                        reason: "unterminated placeholder".to_string(),
                    });
                }
                let key = name.trim();
                if key.is_empty() {
                    return Err(FormatError::Malformed {
                        position: pos,
                        reason: "empty placeholder".to_string(),
                    });
                }
                let value = vars
                    .get(key)
                    .ok_or_else(|| FormatError::MissingVariable(key.to_string()))?;
                out.push_str(value);
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(FormatError::Malformed {
                        position: pos,
                        reason: "unmatched '}'".to_string(),
                    });
                }
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

/// Cut to at most `max_length` characters, marking the cut with `...`
pub fn truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    if max_length < 3 {
        return ".".repeat(max_length);
    }
    let mut cut: String = text.chars().take(max_length - 3).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vars(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_substitution() {
        let out = render("Hello {name}, welcome to {place}!", &vars(&[("name", "Ana"), ("place", "gym")])).unwrap();
        assert_eq!(out, "Hello Ana, welcome to gym!");
    }

    #[test]
    fn test_escaped_braces() {
        let out = render("{{literal}} {x}", &vars(&[("x", "1")])).unwrap();
        assert_eq!(out, "{literal} 1");
    }

    #[test]
    fn test_missing_variable_named() {
        let err = render("Hi {who}", &HashMap::new()).unwrap_err();
        assert_eq!(err, FormatError::MissingVariable("who".to_string()));
    }

    #[test]
    fn test_unknown_template() {
        let book = TemplateBook::empty();
        let err = book.format("nope", &HashMap::new()).unwrap_err();
        assert_eq!(err, FormatError::UnknownTemplate("nope".to_string()));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(render("Hi {who", &HashMap::new()), Err(FormatError::Malformed { .. })));
        assert!(matches!(render("a } b", &HashMap::new()), Err(FormatError::Malformed { .. })));
        assert!(matches!(render("{}", &HashMap::new()), Err(FormatError::Malformed { .. })));
    }

    #[test]
    fn test_default_book_formats() {
        let book = TemplateBook::default();
        let out = book
            .format(
                "strategy.viral.2",
                &vars(&[("concept", "recovery"), ("niche", "fitness")]),
            )
            .unwrap();
        assert_eq!(
            out,
            "POV: You discover the recovery secret that fitness experts don't want you to know 👀"
        );
        assert!(book.get("query.best").is_some());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        assert_eq!(truncate("this is too long", 10), "this is...");
        assert_eq!(truncate("abcdef", 2), "..");
        assert_eq!(truncate("abcdef", 0), "");
    }

    #[test]
    fn test_truncate_counts_chars() {
        let out = truncate("💪💪💪💪💪💪", 5);
        assert_eq!(out, "💪💪...");
    }

    proptest! {
        #[test]
        fn prop_truncate_never_exceeds(text in ".{0,300}", max in 0usize..200) {
            let out = truncate(&text, max);
            prop_assert!(out.chars().count() <= max);
        }
    }
}
