//! Environment variable expansion for configuration strings.
//!
//! - `${VAR}` expands to the value of VAR and errors if unset
//! - `${VAR:-default}` falls back to `default`
//! - a leading `~` in paths expands to the home directory

use crate::ConfigError;

/// Expand `${VAR}` references in `value`.
///
/// Only `${...}` spans are expanded. Bare `$` is copied through, so literal
/// dollar signs in markup survive next to `${VAR:-default}` placeholders.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let end = start + len + 1;
        let reference = shellexpand::env_with_context(&rest[start..end], lookup)
            .map_err(|e| unset_error(field, &e.cause))?;

        expanded.push_str(&rest[..start]);
        expanded.push_str(&reference);
        rest = &rest[end..];
    }
    expanded.push_str(rest);

    Ok(expanded)
}

/// Expand a leading `~` and `${VAR}` references in a path value.
pub(crate) fn expand_path(value: &str, field: &str) -> Result<String, ConfigError> {
    let home = || std::env::var("HOME").ok();
    expand_env(&shellexpand::tilde_with_context(value, home), field)
}

fn lookup(var: &str) -> Result<Option<String>, UnsetVar> {
    std::env::var(var)
        .map(Some)
        .map_err(|_| UnsetVar(var.to_owned()))
}

fn unset_error(field: &str, cause: &UnsetVar) -> ConfigError {
    ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", cause.0),
    }
}

/// Name of an environment variable that is not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_env_with_value() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CSB_TEST_EXAMPLES", "/srv/examples");
        }
        let result = expand_env("${CSB_TEST_EXAMPLES}/react", "embed.directory").unwrap();
        assert_eq!(result, "/srv/examples/react");
        unsafe {
            std::env::remove_var("CSB_TEST_EXAMPLES");
        }
    }

    #[test]
    fn test_expand_env_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CSB_TEST_UNSET_PROTOCOL");
        }
        let result = expand_env("${CSB_TEST_UNSET_PROTOCOL:-sandbox://}", "embed.protocol").unwrap();
        assert_eq!(result, "sandbox://");
    }

    #[test]
    fn test_expand_env_missing_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CSB_TEST_MISSING");
        }
        let err = expand_env("${CSB_TEST_MISSING}", "embed.directory").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("CSB_TEST_MISSING"));
        assert!(err.to_string().contains("embed.directory"));
    }

    #[test]
    fn test_bare_dollar_in_template_is_kept() {
        let template = r#"<iframe data-price="$5" src="{url}"></iframe>"#;
        assert_eq!(expand_env(template, "embed.iframe_template").unwrap(), template);
    }

    #[test]
    fn test_bare_dollar_next_to_reference() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CSB_TEST_TEMPLATE_WIDTH");
        }
        let template = r#"<iframe width="${CSB_TEST_TEMPLATE_WIDTH:-100}" data-price="$5" title="$HOME" src="{url}"></iframe>"#;

        let result = expand_env(template, "embed.iframe_template").unwrap();

        assert_eq!(
            result,
            r#"<iframe width="100" data-price="$5" title="$HOME" src="{url}"></iframe>"#
        );
    }

    #[test]
    fn test_unclosed_reference_is_literal() {
        assert_eq!(
            expand_env("cost: ${5", "embed.iframe_template").unwrap(),
            "cost: ${5"
        );
    }

    #[test]
    fn test_expand_path_home() {
        let Ok(home) = std::env::var("HOME") else {
            return;
        };
        let result = expand_path("~/examples", "embed.directory").unwrap();
        assert_eq!(result, format!("{home}/examples"));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        assert_eq!(
            expand_path("examples/react", "embed.directory").unwrap(),
            "examples/react"
        );
    }
}
