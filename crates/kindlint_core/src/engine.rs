//! The lint engine.

use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::rules::{RULES, Rule, RuleKind};
use crate::{EngineError, LineIndex, Message, Profile, Settings};

/// Output of a single check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Messages in document order.
    pub messages: Vec<Message>,
}

/// Checks documents against the built-in word lists.
#[derive(Debug, Clone)]
pub struct Engine {
    settings: Settings,
    rules: Vec<&'static Rule>,
}

impl Engine {
    /// Creates an engine for the given settings.
    pub fn new(settings: Settings) -> Result<Self, EngineError> {
        settings.validate()?;

        let rules = RULES
            .iter()
            .filter(|rule| Self::is_enabled(&settings, rule))
            .collect();

        Ok(Self { settings, rules })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn is_enabled(settings: &Settings, rule: &Rule) -> bool {
        if settings.allow.iter().any(|id| id == rule.id) {
            return false;
        }
        if !settings.deny.is_empty() && !settings.deny.iter().any(|id| id == rule.id) {
            return false;
        }

        match rule.kind {
            RuleKind::Insensitive { .. } => true,
            RuleKind::Binary { .. } => settings.no_binary,
            RuleKind::Profanity { sureness } => sureness >= settings.profanity_sureness,
        }
    }

    /// Checks `source` read with `profile`.
    pub fn check(&self, source: &str, profile: Profile) -> Result<Report, EngineError> {
        let segments = profile.segments(source)?;
        let index = LineIndex::new(source);
        let mut messages = Vec::new();

        for segment in segments {
            let words: Vec<(usize, &str)> = source[segment.clone()]
                .unicode_word_indices()
                .map(|(offset, word)| (segment.start + offset, word))
                .collect();

            let mut i = 0;
            while i < words.len() {
                let Some(rule) = self.longest_match(source, &words[i..]) else {
                    i += 1;
                    continue;
                };

                let len = rule.phrase.len();
                let start = words[i].0;
                let (last_offset, last_word) = words[i + len - 1];
                let end = last_offset + last_word.len();

                if let (Some(start_point), Some(end_point)) = (index.point(start), index.point(end)) {
                    let message = Message::new(
                        rule.id,
                        rule.reason(&source[start..end]),
                        start_point,
                        end_point,
                    );
                    messages.push(if rule.is_fatal() {
                        message.with_fatal(true)
                    } else {
                        message
                    });
                }

                i += len;
            }
        }

        debug!(
            "Checked {} bytes with the {} profile: {} messages",
            source.len(),
            profile.name(),
            messages.len()
        );

        Ok(Report { messages })
    }

    fn longest_match(&self, source: &str, words: &[(usize, &str)]) -> Option<&'static Rule> {
        self.rules
            .iter()
            .copied()
            .filter(|rule| phrase_matches(source, rule.phrase, words))
            .max_by_key(|rule| rule.phrase.len())
    }
}

/// Words of a phrase must be consecutive and separated only by whitespace.
fn phrase_matches(source: &str, phrase: &[&str], words: &[(usize, &str)]) -> bool {
    if words.len() < phrase.len() {
        return false;
    }

    phrase.iter().zip(words).enumerate().all(|(n, (expected, (offset, word)))| {
        if !word.eq_ignore_ascii_case(expected) && word.to_lowercase() != *expected {
            return false;
        }
        if n == 0 {
            return true;
        }
        let (prev_offset, prev_word) = words[n - 1];
        source[prev_offset + prev_word.len()..*offset]
            .chars()
            .all(char::is_whitespace)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point, ProfanitySureness};
    use pretty_assertions::assert_eq;

    fn check(source: &str, settings: Settings) -> Vec<Message> {
        Engine::new(settings)
            .unwrap()
            .check(source, Profile::Text)
            .unwrap()
            .messages
    }

    #[test]
    fn test_reports_insensitive_term() {
        let messages = check("Add it to the whitelist.", Settings::default());
        assert_eq!(messages.len(), 1);

        let message = &messages[0];
        assert_eq!(message.rule_id, "whitelist");
        assert_eq!(
            message.reason,
            "`whitelist` may be insensitive, use `allowlist`, `passlist` instead"
        );
        assert_eq!(message.location.start, Point::new(1, 15));
        assert_eq!(message.location.end, Point::new(1, 24));
        assert_eq!(message.line, Some(1));
        assert_eq!(message.column, Some(15));
        assert_eq!(message.fatal, None);
    }

    #[test]
    fn test_matches_are_case_insensitive() {
        let messages = check("Master branch", Settings::default());
        assert_eq!(messages.len(), 1);
        assert!(messages[0].reason.starts_with("`Master`"));
    }

    #[test]
    fn test_multi_word_phrase() {
        let messages = check("Run a sanity\n check first.", Settings::default());
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].rule_id, "sanity-check");
        assert_eq!(messages[0].location.start, Point::new(1, 7));
        assert_eq!(messages[0].location.end, Point::new(2, 7));
    }

    #[test]
    fn test_phrase_not_matched_across_punctuation() {
        assert!(check("sanity, check", Settings::default()).is_empty());
    }

    #[test]
    fn test_word_boundaries() {
        assert!(check("mastery and remastered", Settings::default()).is_empty());
    }

    #[test]
    fn test_allow_suppresses_rule() {
        let settings = Settings {
            allow: vec!["master".to_string()],
            ..Settings::default()
        };
        assert!(check("master", settings).is_empty());
    }

    #[test]
    fn test_deny_restricts_rules() {
        let settings = Settings {
            deny: vec!["slave".to_string()],
            ..Settings::default()
        };
        let messages = check("master and slave", settings);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].rule_id, "slave");
    }

    #[test]
    fn test_binary_pronouns_need_no_binary() {
        assert!(check("he said", Settings::default()).is_empty());

        let settings = Settings {
            no_binary: true,
            ..Settings::default()
        };
        let messages = check("he said", settings);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].rule_id, "he-she");
    }

    #[test]
    fn test_profanity_sureness() {
        let all = check("hell damn crap", Settings::default());
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].fatal, Some(true));

        let settings = Settings {
            profanity_sureness: ProfanitySureness::Likely,
            ..Settings::default()
        };
        let likely = check("hell damn crap", settings);
        assert_eq!(likely.len(), 1);
        assert_eq!(likely[0].rule_id, "crap");
    }

    #[test]
    fn test_invalid_settings() {
        let settings = Settings {
            allow: vec!["a".to_string()],
            deny: vec!["b".to_string()],
            ..Settings::default()
        };
        assert!(Engine::new(settings).is_err());
    }

    #[test]
    fn test_markdown_profile_ignores_code() {
        let engine = Engine::new(Settings::default()).unwrap();
        let report = engine
            .check("Use `master` here, not the master.\n", Profile::Markdown)
            .unwrap();
        assert_eq!(report.messages.len(), 1);
        assert_eq!(report.messages[0].location.start, Point::new(1, 28));
    }
}
