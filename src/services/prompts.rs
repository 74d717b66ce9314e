use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Fallback genre; also the template used for unknown genre tags
pub const DEFAULT_GENRE: &str = "Open-ended";

const OPEN_ENDED_TEMPLATE: &str = "{prompt}\n\nContinue:";

/// Genre templates, each with a single `{prompt}` substitution point
static PROMPT_TEMPLATES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            "Fantasy",
            "You are an expert fantasy storyteller. Continue this scene with \
             imaginative worldbuilding, vivid sensory details, and a compelling emotional \
             arc. Keep dialogue natural and show (don't tell).\n\nScene: {prompt}\n\nContinue:",
        ),
        (
            "Mystery",
            "You are a master mystery novelist. Continue this scene with mounting \
             tension, subtle clues, and a twist or hook at the end. \
             Be concise and atmospheric.\n\nScene: {prompt}\n\nContinue:",
        ),
        (
            "Sci-Fi",
            "You are a visionary sci-fi author. Continue the scene with \
             speculative technology, clear stakes, and logical consequences.\n\n\
             Scene: {prompt}\n\nContinue:",
        ),
        (
            "Horror",
            "You are a horror storyteller. Build dread and atmosphere. Use \
             sensory detail and pace the reveals carefully.\n\nScene: {prompt}\n\nContinue:",
        ),
        (DEFAULT_GENRE, OPEN_ENDED_TEMPLATE),
    ])
});

/// Renders the genre template around the trimmed user text
///
/// Unknown genres fall back to the open-ended template; the user text is
/// substituted at the template's single insertion point.
pub fn assemble(user_text: &str, genre: &str) -> String {
    let template = PROMPT_TEMPLATES
        .get(genre)
        .copied()
        .unwrap_or(OPEN_ENDED_TEMPLATE);
    template.replacen("{prompt}", user_text.trim(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_known_genre() {
        let prompt = assemble("A dragon lands on the castle wall.", "Fantasy");
        assert!(prompt.starts_with("You are an expert fantasy storyteller."));
        assert!(prompt.contains("Scene: A dragon lands on the castle wall."));
        assert!(prompt.ends_with("Continue:"));
    }

    #[test]
    fn test_assemble_unknown_genre_uses_open_ended_template() {
        let prompt = assemble("hello", "UnknownGenre");
        assert_eq!(prompt, "hello\n\nContinue:");
        assert_eq!(prompt.matches("hello").count(), 1);
    }

    #[test]
    fn test_assemble_trims_user_text() {
        let prompt = assemble("  a quiet street \n", "Open-ended");
        assert_eq!(prompt, "a quiet street\n\nContinue:");
    }

    #[test]
    fn test_assemble_substitutes_exactly_once() {
        let prompt = assemble("say {prompt} twice", "Open-ended");
        assert_eq!(prompt, "say {prompt} twice\n\nContinue:");
    }

    #[test]
    fn test_all_templates_have_one_insertion_point() {
        for (genre, template) in PROMPT_TEMPLATES.iter() {
            assert_eq!(
                template.matches("{prompt}").count(),
                1,
                "template for {} should have exactly one insertion point",
                genre
            );
        }
    }
}
