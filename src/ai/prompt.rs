//! Prompt construction for AI-generated commit messages.

/// Maximum bytes of diff text included in the prompt.
pub const MAX_DIFF_LENGTH: usize = 12_000;

/// Build the prompt asking for a commit message for the staged changes.
pub fn build_commit_prompt(stat: &str, diff: &str, branch: Option<&str>) -> String {
    let (sanitized_diff, truncated) = sanitize_diff(diff, MAX_DIFF_LENGTH);

    let truncation_note = if truncated {
        "\n\nNote: The diff was truncated due to size. Focus on the visible changes."
    } else {
        ""
    };

    let branch = branch.unwrap_or("(detached HEAD)");

    format!(
        r#"Write a git commit message for the staged changes below.

## Branch
{branch}

## Changed files
{stat}

## Diff
```
{sanitized_diff}
```{truncation_note}

## Rules
- First line: imperative mood summary, at most 72 characters, no trailing period
- Use a Conventional Commits prefix (feat, fix, docs, refactor, test, chore...) when one fits
- Add a short body after a blank line only if the change needs explaining
- Reply with the commit message only: no quotes, no code fences, no commentary"#
    )
}

/// Strip control characters (except newlines and tabs) and truncate to
/// `max_len` bytes on a char boundary. Returns whether truncation happened.
pub fn sanitize_diff(text: &str, max_len: usize) -> (String, bool) {
    let mut result: String = text
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    if result.len() <= max_len {
        return (result, false);
    }

    let mut end = max_len;
    while end > 0 && !result.is_char_boundary(end) {
        end -= 1;
    }
    result.truncate(end);
    (result, true)
}

/// Normalize a model reply into a usable commit message.
///
/// Removes wrapping code fences, matching quotes or backticks, and trailing
/// whitespace on every line.
pub fn clean_suggestion(response: &str) -> String {
    let mut text = response.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the fence line, which may carry a language tag.
        let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
        text = body.trim_end().strip_suffix("```").unwrap_or(body).trim();
    }

    for quote in ['"', '\'', '`'] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            text = text[1..text.len() - 1].trim();
        }
    }

    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_stat_diff_and_branch() {
        let prompt = build_commit_prompt(
            " src/lib.rs | 2 +-",
            "+pub fn new_function() {}\n",
            Some("feat/login"),
        );
        assert!(prompt.contains("src/lib.rs | 2 +-"));
        assert!(prompt.contains("pub fn new_function()"));
        assert!(prompt.contains("feat/login"));
        assert!(!prompt.contains("truncated"));
    }

    #[test]
    fn test_prompt_detached_head() {
        let prompt = build_commit_prompt("", "", None);
        assert!(prompt.contains("(detached HEAD)"));
    }

    #[test]
    fn test_prompt_truncation_note() {
        let diff = "x".repeat(MAX_DIFF_LENGTH + 10);
        let prompt = build_commit_prompt("", &diff, Some("main"));
        assert!(prompt.contains("truncated due to size"));
    }

    #[test]
    fn test_sanitize_removes_control_chars() {
        let (clean, truncated) = sanitize_diff("a\u{1b}[31mred\u{7}\tb\nc", 100);
        assert_eq!(clean, "a[31mred\tb\nc");
        assert!(!truncated);
    }

    #[test]
    fn test_sanitize_truncates_on_char_boundary() {
        let (clean, truncated) = sanitize_diff("ééé", 3);
        assert_eq!(clean, "é");
        assert!(truncated);
    }

    #[test]
    fn test_clean_suggestion_strips_fences() {
        let raw = "```text\nfeat(cli): add --no-push flag\n```";
        assert_eq!(clean_suggestion(raw), "feat(cli): add --no-push flag");
    }

    #[test]
    fn test_clean_suggestion_strips_quotes() {
        assert_eq!(clean_suggestion("\"fix: handle empty input\""), "fix: handle empty input");
        assert_eq!(clean_suggestion("`chore: bump deps`"), "chore: bump deps");
    }

    #[test]
    fn test_clean_suggestion_keeps_body() {
        let raw = "feat: add setup command  \n\nStores the provider and key.  \n";
        assert_eq!(
            clean_suggestion(raw),
            "feat: add setup command\n\nStores the provider and key."
        );
    }
}
