//! Taboo pre-filter, run before a consultation.
//!
//! A question that touches a taboo gets the taboo's response instead of a
//! reading. Crisis taboos short-circuit and leave the session untouched;
//! any other taboo charges its debt and entropy deltas.

use ob_core::{Lore, TabooRule};

use crate::state::SessionState;

/// A question refused by a taboo.
#[derive(Debug, Clone, PartialEq)]
pub struct TabooVerdict<'a> {
    /// The matching rule.
    pub rule: &'a TabooRule,
    /// Session state after the penalty, if any.
    pub state: SessionState,
}

impl TabooVerdict<'_> {
    /// Whether the taboo is a crisis response.
    pub fn is_crisis(&self) -> bool {
        self.rule.crisis
    }
}

/// First taboo with a trigger contained in the lowercased question.
pub fn find_taboo<'a>(lore: &'a Lore, question: &str) -> Option<&'a TabooRule> {
    let lower = question.to_lowercase();
    lore.taboos.iter().find(|rule| {
        rule.triggers
            .iter()
            .any(|t| !t.is_empty() && lower.contains(&t.to_lowercase()))
    })
}

/// Check a question against the lore's taboos.
pub fn check_taboos<'a>(
    lore: &'a Lore,
    state: &SessionState,
    question: &str,
) -> Option<TabooVerdict<'a>> {
    let rule = find_taboo(lore, question)?;
    let mut next = state.clone();
    if rule.crisis {
        tracing::info!(taboo = %rule.id, "crisis taboo, no reading");
    } else {
        next.apply_taboo_penalty(rule.debt_delta, rule.entropy_delta);
        tracing::info!(
            taboo = %rule.id,
            debt = next.debt,
            entropy = next.entropy,
            "taboo touched"
        );
    }
    Some(TabooVerdict { rule, state: next })
}
