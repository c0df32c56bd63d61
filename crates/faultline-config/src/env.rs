use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Failure to expand a placeholder
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExpandError {
    /// Placeholder names a variable that is unset and has no default
    #[error("environment variable not found: `{0}`")]
    Missing(String),

    /// Placeholder is not of the form `env.NAME`
    #[error("only variables scoped with 'env.' are supported: `{0}`")]
    UnsupportedScope(String),
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `{{ env.NAME }}` or `{{ env.NAME | default("value") }}`
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("placeholder pattern is valid")
    })
}

fn resolve(captures: &Captures<'_>) -> Result<String, ExpandError> {
    let key = &captures[1];
    let fallback = captures.get(2).map(|m| m.as_str());

    let Some(name) = key.strip_prefix("env.").filter(|name| !name.is_empty() && !name.contains('.')) else {
        return Err(ExpandError::UnsupportedScope(key.to_owned()));
    };

    match (std::env::var(name), fallback) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(fallback)) => Ok(fallback.to_owned()),
        (Err(_), None) => Err(ExpandError::Missing(name.to_owned())),
    }
}

fn expand_line(line: &str) -> Result<String, ExpandError> {
    let mut expanded = String::with_capacity(line.len());
    let mut cursor = 0;

    for captures in placeholder().captures_iter(line) {
        let whole = captures.get(0).expect("group 0 always participates");
        expanded.push_str(&line[cursor..whole.start()]);
        expanded.push_str(&resolve(&captures)?);
        cursor = whole.end();
    }

    expanded.push_str(&line[cursor..]);
    Ok(expanded)
}

/// Expand `{{ env.NAME }}` placeholders in raw TOML text
///
/// Comment lines are copied verbatim so a commented-out secret never has
/// to be set.
pub fn expand_env(input: &str) -> Result<String, ExpandError> {
    let lines = input
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                Ok(line.to_owned())
            } else {
                expand_line(line)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = "base_url = \"http://localhost\"\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn expands_set_variable() {
        temp_env::with_var("FAULTLINE_HOST", Some("users.internal"), || {
            let result = expand_env("base_url = \"http://{{ env.FAULTLINE_HOST }}/\"").unwrap();
            assert_eq!(result, "base_url = \"http://users.internal/\"");
        });
    }

    #[test]
    fn missing_variable_is_an_error() {
        temp_env::with_var_unset("FAULTLINE_MISSING", || {
            let err = expand_env("key = \"{{ env.FAULTLINE_MISSING }}\"").unwrap_err();
            assert_eq!(err, ExpandError::Missing("FAULTLINE_MISSING".to_owned()));
        });
    }

    #[test]
    fn default_applies_only_when_unset() {
        temp_env::with_var_unset("FAULTLINE_OPTIONAL", || {
            let result = expand_env("t = \"{{ env.FAULTLINE_OPTIONAL | default(\"5s\") }}\"").unwrap();
            assert_eq!(result, "t = \"5s\"");
        });
        temp_env::with_var("FAULTLINE_OPTIONAL", Some("9s"), || {
            let result = expand_env("t = \"{{ env.FAULTLINE_OPTIONAL | default(\"5s\") }}\"").unwrap();
            assert_eq!(result, "t = \"9s\"");
        });
    }

    #[test]
    fn other_scopes_are_rejected() {
        let err = expand_env("key = \"{{ vault.SECRET }}\"").unwrap_err();
        assert_eq!(err, ExpandError::UnsupportedScope("vault.SECRET".to_owned()));
    }

    #[test]
    fn comments_are_not_expanded() {
        temp_env::with_var_unset("FAULTLINE_MISSING", || {
            let input = "  # token = \"{{ env.FAULTLINE_MISSING }}\"\nkey = 1";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }
}
