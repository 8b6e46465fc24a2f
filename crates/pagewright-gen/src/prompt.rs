//! Prompt builders for site generation
//!
//! Constructs the single natural-language prompt sent to the provider:
//! - Initial builds embed the brief, the evaluator's checks, and attachment
//!   names (never their contents)
//! - Revisions embed the currently published document verbatim along with
//!   the new brief and checks
//!
//! Both instruct the model to return only the complete HTML document,
//! starting directly at `<!DOCTYPE html>` with no code fences.

/// The document-type declaration every generated site must start with.
pub const DOCTYPE: &str = "<!DOCTYPE html>";

/// Build the prompt for a round-1 initial build.
pub fn build_initial_prompt(brief: &str, checks: &[String], attachment_names: &[&str]) -> String {
    let mut prompt = String::new();

    prompt.push_str("You are an expert frontend developer.\n");
    prompt.push_str("Given these requirements:\n\n");
    prompt.push_str(brief);
    prompt.push_str("\n\n");

    prompt.push_str("The following checks will be performed by the evaluator:\n");
    for check in checks {
        prompt.push_str("- ");
        prompt.push_str(check);
        prompt.push('\n');
    }
    prompt.push('\n');

    if !attachment_names.is_empty() {
        prompt.push_str("You may be given file attachments, refer to them by the names below:\n");
        for name in attachment_names {
            prompt.push_str("- ");
            prompt.push_str(name);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    prompt.push_str(
        "Please output a single complete HTML file with embedded CSS and JS as required.\n",
    );
    prompt.push_str("The HTML output must pass all checks. ");
    prompt.push_str("Start your output directly with <!DOCTYPE html> (no code fences).");

    prompt
}

/// Build the prompt for a round-2+ revision.
///
/// `existing` is the currently published document, embedded verbatim so the
/// model can preserve behavior the new brief does not touch.
pub fn build_revision_prompt(existing: &str, brief: &str, checks: &[String]) -> String {
    let mut prompt = String::new();

    prompt.push_str("You are updating a previously deployed static website. ");
    prompt.push_str("Below is the current code for the website (index.html):\n\n");
    prompt.push_str("----- OLD CODE START -----\n");
    prompt.push_str(existing);
    prompt.push_str("\n----- OLD CODE END -----\n\n");

    prompt.push_str("Your new instructions are:\n");
    prompt.push_str(brief);
    prompt.push_str("\n\n");

    prompt.push_str("You must update the code to implement these new requirements ");
    prompt.push_str("while preserving all existing original features unless a change is requested. ");
    prompt.push_str("The following code checks will be used to automatically test your solution:\n");
    for check in checks {
        prompt.push_str("- ");
        prompt.push_str(check);
        prompt.push('\n');
    }
    prompt.push('\n');

    prompt.push_str(
        "Return ONLY the complete updated HTML file, starting with <!DOCTYPE html>.",
    );

    prompt
}

/// Whether a generated document starts at the document-type declaration.
pub fn starts_with_doctype(document: &str) -> bool {
    document.trim_start().starts_with(DOCTYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_prompt_embeds_brief_and_checks() {
        let checks = vec!["counter increments on click".to_string()];
        let prompt = build_initial_prompt("Build a counter app", &checks, &[]);

        assert!(prompt.contains("Build a counter app"));
        assert!(prompt.contains("- counter increments on click"));
        assert!(prompt.contains("single complete HTML file"));
        assert!(prompt.contains("Start your output directly with <!DOCTYPE html>"));
    }

    #[test]
    fn test_initial_prompt_lists_attachment_names_in_order() {
        let prompt = build_initial_prompt("brief", &[], &["logo.png", "data.csv"]);

        let logo = prompt.find("- logo.png").unwrap();
        let data = prompt.find("- data.csv").unwrap();
        assert!(logo < data);
        // Only names reach the prompt, never URLs or contents
        assert!(!prompt.contains("http"));
    }

    #[test]
    fn test_initial_prompt_omits_attachment_section_when_empty() {
        let prompt = build_initial_prompt("brief", &[], &[]);
        assert!(!prompt.contains("file attachments"));
    }

    #[test]
    fn test_revision_prompt_embeds_prior_document_verbatim() {
        let existing = "<!DOCTYPE html><html><body>old</body></html>";
        let checks = vec!["shows a reset button".to_string()];
        let prompt = build_revision_prompt(existing, "Add a reset button", &checks);

        assert!(prompt.contains(existing));
        assert!(prompt.contains("----- OLD CODE START -----"));
        assert!(prompt.contains("Add a reset button"));
        assert!(prompt.contains("- shows a reset button"));
        assert!(prompt.contains("preserving all existing original features"));
        assert!(prompt.contains("starting with <!DOCTYPE html>"));
    }

    #[test]
    fn test_checks_render_one_per_line_in_input_order() {
        let checks = vec!["first".to_string(), "second".to_string()];
        let prompt = build_initial_prompt("brief", &checks, &[]);

        let first = prompt.find("- first\n").unwrap();
        let second = prompt.find("- second\n").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_starts_with_doctype() {
        assert!(starts_with_doctype("<!DOCTYPE html><html></html>"));
        assert!(starts_with_doctype("\n<!DOCTYPE html>"));
        assert!(!starts_with_doctype("```html\n<!DOCTYPE html>"));
    }
}
