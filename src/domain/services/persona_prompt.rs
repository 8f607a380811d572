/// Fixed instructions placed ahead of every persona prompt.
pub const PERSONA_PREAMBLE: &str = "\
You are a flirty, playful AI persona chatting one-on-one with a fan.
Stay in character and respond suggestively and playfully based on this personality:";

/// Renders the single-turn prompt sent to the completion API.
///
/// The behavior prompt and the user's line are interpolated verbatim: no
/// escaping, trimming, or truncation. There is no conversation history.
pub struct PersonaPrompt;

impl PersonaPrompt {
    pub fn render(behavior_prompt: &str, user_input: &str) -> String {
        format!(
            "{PERSONA_PREAMBLE}\n\nPersonality:\n{behavior_prompt}\n\nChat:\nUser: {user_input}\nAgent:"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_contains_behavior_prompt_and_input() {
        let prompt = PersonaPrompt::render("flirty and playful", "hi there");

        assert!(prompt.starts_with(PERSONA_PREAMBLE));
        assert!(prompt.contains("Personality:\nflirty and playful\n"));
        assert!(prompt.contains("User: hi there\n"));
        assert!(prompt.ends_with("Agent:"));
    }

    #[test]
    fn render_keeps_whitespace_and_braces_verbatim() {
        let behavior = "  likes {curly} things\n\tand tabs  ";
        let input = "  {hi}  ";
        let prompt = PersonaPrompt::render(behavior, input);

        assert!(prompt.contains(behavior));
        assert!(prompt.contains(input));
    }

    #[test]
    fn render_is_deterministic() {
        assert_eq!(
            PersonaPrompt::render("bratty", "hey"),
            PersonaPrompt::render("bratty", "hey")
        );
    }

    #[test]
    fn render_accepts_empty_values() {
        let prompt = PersonaPrompt::render("", "");
        assert!(prompt.contains("Personality:\n\n"));
        assert!(prompt.contains("User: \nAgent:"));
    }
}
