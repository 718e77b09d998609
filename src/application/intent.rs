// Chat message intent classification - keyword rule table
//
// The classifier is a deliberate cost and latency guard: conversational
// messages are answered from a fixed table and never reach the generation
// collaborator. Heuristic substring matching is sufficient here; this is
// not a correctness-critical path.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentCategory {
    Modification,
    Greeting,
    Thanks,
    Help,
}

pub struct IntentRule {
    pub keyword: &'static str,
    pub category: IntentCategory,
}

/// Ordered rule table; the first matching rule wins, so modification
/// keywords take precedence over conversational ones.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule { keyword: "add", category: IntentCategory::Modification },
    IntentRule { keyword: "remove", category: IntentCategory::Modification },
    IntentRule { keyword: "delete", category: IntentCategory::Modification },
    IntentRule { keyword: "change", category: IntentCategory::Modification },
    IntentRule { keyword: "modify", category: IntentCategory::Modification },
    IntentRule { keyword: "update", category: IntentCategory::Modification },
    IntentRule { keyword: "rename", category: IntentCategory::Modification },
    IntentRule { keyword: "replace", category: IntentCategory::Modification },
    IntentRule { keyword: "create", category: IntentCategory::Modification },
    IntentRule { keyword: "make", category: IntentCategory::Modification },
    IntentRule { keyword: "show", category: IntentCategory::Modification },
    IntentRule { keyword: "hide", category: IntentCategory::Modification },
    IntentRule { keyword: "increase", category: IntentCategory::Modification },
    IntentRule { keyword: "decrease", category: IntentCategory::Modification },
    IntentRule { keyword: "more", category: IntentCategory::Modification },
    IntentRule { keyword: "less", category: IntentCategory::Modification },
    IntentRule { keyword: "bigger", category: IntentCategory::Modification },
    IntentRule { keyword: "smaller", category: IntentCategory::Modification },
    IntentRule { keyword: "color", category: IntentCategory::Modification },
    IntentRule { keyword: "theme", category: IntentCategory::Modification },
    IntentRule { keyword: "chart", category: IntentCategory::Modification },
    IntentRule { keyword: "filter", category: IntentCategory::Modification },
    IntentRule { keyword: "sort", category: IntentCategory::Modification },
    IntentRule { keyword: "hello", category: IntentCategory::Greeting },
    IntentRule { keyword: "hey", category: IntentCategory::Greeting },
    IntentRule { keyword: "hi", category: IntentCategory::Greeting },
    IntentRule { keyword: "thank", category: IntentCategory::Thanks },
    IntentRule { keyword: "help", category: IntentCategory::Help },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageIntent {
    /// Routes to the generation collaborator and may mutate the
    /// specification.
    Modification,
    /// Answered locally from the canned-response table; never mutates.
    Conversational(&'static str),
}

pub fn classify(message: &str) -> MessageIntent {
    let lowered = message.to_lowercase();
    for rule in INTENT_RULES {
        if lowered.contains(rule.keyword) {
            return match rule.category {
                IntentCategory::Modification => MessageIntent::Modification,
                category => MessageIntent::Conversational(canned_reply(category)),
            };
        }
    }
    MessageIntent::Conversational(canned_reply_fallback())
}

pub fn canned_reply(category: IntentCategory) -> &'static str {
    match category {
        IntentCategory::Greeting => {
            "Hi! Tell me what you'd like to adjust - for example \"add a pie chart\" \
             or \"change the theme to ocean\"."
        }
        IntentCategory::Thanks => "You're welcome! Anything else you'd like to adjust?",
        IntentCategory::Help => {
            "I can add, remove, or restyle charts and filters. Try \"add a bar chart \
             of sales by region\"."
        }
        IntentCategory::Modification => "",
    }
}

pub fn canned_reply_fallback() -> &'static str {
    "I didn't catch a change request. Try something like \"add a line chart\" or \
     \"remove the last filter\"."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modification_keywords_route_to_generation() {
        for message in [
            "add a pie chart",
            "please REMOVE the table",
            "Change the theme to ocean",
            "make it bigger",
            "sort by revenue",
        ] {
            assert_eq!(classify(message), MessageIntent::Modification, "{}", message);
        }
    }

    #[test]
    fn test_greetings_and_thanks_stay_conversational() {
        for message in ["hello", "Hey!", "hi", "thank you", "thanks a lot"] {
            assert!(
                matches!(classify(message), MessageIntent::Conversational(_)),
                "{}",
                message
            );
        }
    }

    #[test]
    fn test_modification_wins_over_greeting() {
        assert_eq!(classify("hi, add a chart please"), MessageIntent::Modification);
    }

    #[test]
    fn test_unmatched_message_gets_fallback() {
        let MessageIntent::Conversational(reply) = classify("lorem ipsum") else {
            panic!("expected conversational");
        };
        assert_eq!(reply, canned_reply_fallback());
        assert!(!reply.is_empty());
    }

    #[test]
    fn test_canned_replies_are_non_empty() {
        for category in [
            IntentCategory::Greeting,
            IntentCategory::Thanks,
            IntentCategory::Help,
        ] {
            assert!(!canned_reply(category).is_empty());
        }
    }
}
