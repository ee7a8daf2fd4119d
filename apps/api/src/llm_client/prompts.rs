// Prompt templates for the history dashboard.
// Placeholders are filled in a single pass, so user text that happens to
// contain `{location}` or similar is never expanded a second time.

/// System prompt sent with every completion.
pub const HISTORIAN_SYSTEM: &str = "You are a careful historian. \
    Answer only with facts about the requested place and period. \
    Do NOT add greetings, caveats, or conversational filler. \
    Always give a full answer, even when sources are sparse.";

/// Initial query. Replace: {location}, {time_period}
pub const HISTORY_PROMPT_TEMPLATE: &str = "\
Respond with exactly 10 interesting historical facts for {location} around the time period of {time_period}, give or take a few years.
Do NOT provide historical information from outside this period.
Provide brief context of what was going on in the wider region around that time.
Format the answer as bullet points only, one fact per bullet. Provide no filler or conversational response.
You must always provide a full, non-empty response.";

/// Follow-up query on highlighted text.
/// Replace: {location}, {time_period}, {previous_response}, {selected_text}
pub const FOLLOWUP_PROMPT_TEMPLATE: &str = "\
You previously gave these historical facts about {location} around {time_period}:

{previous_response}

The reader highlighted this passage and wants to know more:

{selected_text}

Elaborate on the highlighted passage in the context of {location} around {time_period}, give or take a few years.
Do NOT provide historical information from outside this period.
Format the answer as bullet points only. Provide no filler or conversational response.
You must always provide a full, non-empty response.";

pub fn build_history_prompt(location: &str, time_period: &str) -> String {
    fill_template(
        HISTORY_PROMPT_TEMPLATE,
        &[("location", location), ("time_period", time_period)],
    )
}

pub fn build_followup_prompt(
    location: &str,
    time_period: &str,
    previous_response: &str,
    selected_text: &str,
) -> String {
    fill_template(
        FOLLOWUP_PROMPT_TEMPLATE,
        &[
            ("location", location),
            ("time_period", time_period),
            ("previous_response", previous_response),
            ("selected_text", selected_text),
        ],
    )
}

/// Replaces `{name}` placeholders from `vars`. Unknown placeholders are kept verbatim.
fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_prompt_contains_inputs_and_constraints() {
        let prompt = build_history_prompt("Paris", "1920s");
        assert!(prompt.contains("Paris"));
        assert!(prompt.contains("1920s"));
        assert!(prompt.contains("exactly 10"));
        assert!(prompt.contains("bullet points"));
        assert!(prompt.contains("no filler"));
        assert!(prompt.contains("non-empty"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_history_prompt_is_deterministic() {
        assert_eq!(
            build_history_prompt("Kyoto", "1600"),
            build_history_prompt("Kyoto", "1600")
        );
    }

    #[test]
    fn test_followup_prompt_contains_all_inputs() {
        let prompt = build_followup_prompt(
            "Rome, Lazio, Italy",
            "44 BC",
            "- Julius Caesar was assassinated",
            "assassinated",
        );
        assert!(prompt.contains("Rome, Lazio, Italy"));
        assert!(prompt.contains("44 BC"));
        assert!(prompt.contains("- Julius Caesar was assassinated"));
        assert!(prompt.contains("\n\nassassinated\n\n"));
        assert!(prompt.contains("outside this period"));
        assert!(prompt.contains("no filler"));
        assert!(prompt.contains("non-empty"));
    }

    #[test]
    fn test_placeholders_in_user_text_are_not_expanded() {
        let prompt = build_history_prompt("{time_period}", "1800");
        assert!(prompt.contains("for {time_period} around the time period of 1800"));
    }

    #[test]
    fn test_fill_template_keeps_unknown_and_unclosed_braces() {
        assert_eq!(fill_template("a {x} {y} {", &[("x", "1")]), "a 1 {y} {");
    }
}
