//! Built-in word lists.

use crate::ProfanitySureness;

/// What a rule reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// A term that may be insensitive, with considerate alternatives.
    Insensitive {
        suggestions: &'static [&'static str],
    },
    /// A gendered pronoun; only reported when `noBinary` is set.
    Binary {
        suggestions: &'static [&'static str],
    },
    /// A profanity.
    Profanity { sureness: ProfanitySureness },
}

/// A rule matching a phrase of one or more words, case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub id: &'static str,
    pub phrase: &'static [&'static str],
    pub kind: RuleKind,
}

impl Rule {
    const fn insensitive(
        id: &'static str,
        phrase: &'static [&'static str],
        suggestions: &'static [&'static str],
    ) -> Self {
        Self {
            id,
            phrase,
            kind: RuleKind::Insensitive { suggestions },
        }
    }

    const fn binary(
        id: &'static str,
        phrase: &'static [&'static str],
        suggestions: &'static [&'static str],
    ) -> Self {
        Self {
            id,
            phrase,
            kind: RuleKind::Binary { suggestions },
        }
    }

    const fn profanity(
        id: &'static str,
        phrase: &'static [&'static str],
        sureness: ProfanitySureness,
    ) -> Self {
        Self {
            id,
            phrase,
            kind: RuleKind::Profanity { sureness },
        }
    }

    /// Builds the message reason for the matched text.
    pub fn reason(&self, actual: &str) -> String {
        match self.kind {
            RuleKind::Insensitive { suggestions } | RuleKind::Binary { suggestions } => {
                let quoted: Vec<String> = suggestions.iter().map(|s| format!("`{}`", s)).collect();
                format!(
                    "`{}` may be insensitive, use {} instead",
                    actual,
                    quoted.join(", ")
                )
            }
            RuleKind::Profanity {
                sureness: ProfanitySureness::Likely,
            } => format!("Don’t use `{}`, it’s profane", actual),
            RuleKind::Profanity { .. } => {
                format!("Be careful with `{}`, it’s profane in some cases", actual)
            }
        }
    }

    /// Likely profanities are errors; everything else is a warning.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            RuleKind::Profanity {
                sureness: ProfanitySureness::Likely
            }
        )
    }
}

/// All built-in rules.
pub static RULES: &[Rule] = &[
    Rule::insensitive("master", &["master"], &["primary", "main", "leader"]),
    Rule::insensitive("slave", &["slave"], &["secondary", "replica", "follower"]),
    Rule::insensitive("whitelist", &["whitelist"], &["allowlist", "passlist"]),
    Rule::insensitive("blacklist", &["blacklist"], &["denylist", "blocklist"]),
    Rule::insensitive(
        "sanity-check",
        &["sanity", "check"],
        &["confidence check", "coherence check"],
    ),
    Rule::insensitive("dummy", &["dummy"], &["placeholder", "sample"]),
    Rule::insensitive("guys", &["guys"], &["people", "folks", "everyone"]),
    Rule::insensitive("manpower", &["manpower"], &["workforce", "personnel"]),
    Rule::insensitive("chairman", &["chairman"], &["chair", "chairperson"]),
    Rule::insensitive("mankind", &["mankind"], &["humanity", "humankind"]),
    Rule::insensitive("grandfathered", &["grandfathered"], &["legacy"]),
    Rule::insensitive("lame", &["lame"], &["boring", "dull"]),
    Rule::insensitive("cripple", &["cripple"], &["disable", "hamper"]),
    Rule::insensitive("crazy", &["crazy"], &["wild", "baffling", "unexpected"]),
    Rule::binary("he-she", &["he"], &["they", "it"]),
    Rule::binary("he-she", &["she"], &["they", "it"]),
    Rule::binary("his-her", &["his"], &["their", "its"]),
    Rule::binary("hers", &["hers"], &["theirs"]),
    Rule::binary("himself-herself", &["himself"], &["themselves", "itself"]),
    Rule::binary("himself-herself", &["herself"], &["themselves", "itself"]),
    Rule::profanity("hell", &["hell"], ProfanitySureness::Unlikely),
    Rule::profanity("damn", &["damn"], ProfanitySureness::Maybe),
    Rule::profanity("crap", &["crap"], ProfanitySureness::Likely),
];
