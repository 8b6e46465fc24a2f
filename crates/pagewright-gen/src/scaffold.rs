//! Static accompanying files for round-1 deployments
//!
//! Round 1 ships a README and an MIT license next to the generated site.
//! Revisions never regenerate these.

use chrono::{Datelike, Utc};

/// Generate the repository README for an initial build.
pub fn generate_readme(brief: &str, checks: &[String], task_id: &str) -> String {
    let mut readme = String::new();

    readme.push_str(&format!("# {}\n\n", task_id));
    readme.push_str("## Overview\n");
    readme.push_str("This project is a single-page app generated for the brief:\n\n");
    readme.push_str(&format!("> {}\n\n", brief));

    readme.push_str("## Checks Implemented\n");
    for check in checks {
        readme.push_str(&format!("- {}\n", check));
    }
    readme.push('\n');

    readme.push_str("## Usage\n");
    readme.push_str(
        "Open `index.html` in your browser. All required logic, CSS and JS are included in this file.\n\n",
    );
    readme.push_str("## License\nMIT\n");

    readme
}

/// Generate an MIT license with the current year.
pub fn generate_license(author: &str) -> String {
    let year = Utc::now().year();
    format!(
        r#"MIT License

Copyright (c) {year} {author}

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in
all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readme_embeds_brief_checks_and_task_id() {
        let checks = vec!["counter increments on click".to_string()];
        let readme = generate_readme("Build a counter app", &checks, "counter-app-abc123");

        assert!(readme.starts_with("# counter-app-abc123\n"));
        assert!(readme.contains("> Build a counter app"));
        assert!(readme.contains("- counter increments on click"));
    }

    #[test]
    fn test_license_embeds_year_and_author() {
        let license = generate_license("student@example.com");
        let year = Utc::now().year().to_string();

        assert!(license.starts_with("MIT License"));
        assert!(license.contains(&format!("Copyright (c) {} student@example.com", year)));
    }
}
