// Copyright (c) 2025 - Cowboy AI, Inc.
//! Canonical Resource and Stack Naming
//!
//! Pure functions mapping (environment, pillar, resource-type, suffix) tuples
//! to lowercase resource names and PascalCase stack names. There is no
//! validation layer: malformed inputs (such as empty segments) propagate into
//! malformed but non-crashing output, and callers own segment hygiene.

/// Lowercase project prefix for resource names
pub const PROJECT_PREFIX: &str = "wa-handson";

/// Capitalized project prefix for stack names
pub const STACK_PREFIX: &str = "WaHandson";

/// Separator joining name segments
pub const SEPARATOR: char = '-';

/// Build a canonical lowercase resource name
///
/// Segments are lowercased and joined in fixed order behind the project
/// prefix; the suffix is appended only when provided. Deterministic and
/// idempotent: no time, randomness, or I/O is involved.
///
/// # Examples
///
/// ```rust
/// use wa_handson::domain::naming::resource_name;
///
/// let name = resource_name("dev", "performance", "sg", Some("redis"));
/// assert_eq!(name, "wa-handson-dev-performance-sg-redis");
///
/// let name = resource_name("dev", "security", "bucket", None);
/// assert_eq!(name, "wa-handson-dev-security-bucket");
/// ```
pub fn resource_name(
    environment: &str,
    pillar: &str,
    resource_type: &str,
    suffix: Option<&str>,
) -> String {
    let mut parts = vec![
        PROJECT_PREFIX.to_string(),
        environment.to_lowercase(),
        pillar.to_lowercase(),
        resource_type.to_lowercase(),
    ];

    if let Some(suffix) = suffix {
        parts.push(suffix.to_lowercase());
    }

    parts.join(&SEPARATOR.to_string())
}

/// Build a canonical stack name
///
/// The environment and pillar get exactly their first character upper-cased;
/// the stack label's casing is left untouched.
///
/// # Examples
///
/// ```rust
/// use wa_handson::domain::naming::stack_name;
///
/// let name = stack_name("dev", "performance", "CacheStack");
/// assert_eq!(name, "WaHandson-Dev-Performance-CacheStack");
/// ```
pub fn stack_name(environment: &str, pillar: &str, stack: &str) -> String {
    [
        STACK_PREFIX.to_string(),
        capitalize_first(environment),
        capitalize_first(pillar),
        stack.to_string(),
    ]
    .join(&SEPARATOR.to_string())
}

/// Upper-case exactly the first character, leaving the rest untouched
fn capitalize_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_name_with_suffix() {
        assert_eq!(
            resource_name("dev", "performance", "sg", Some("redis")),
            "wa-handson-dev-performance-sg-redis"
        );
    }

    #[test]
    fn test_resource_name_without_suffix() {
        assert_eq!(
            resource_name("dev", "performance", "cache", None),
            "wa-handson-dev-performance-cache"
        );
    }

    #[test]
    fn test_resource_name_lowercases_input() {
        assert_eq!(
            resource_name("DEV", "Performance", "SG", Some("Redis")),
            "wa-handson-dev-performance-sg-redis"
        );
    }

    #[test]
    fn test_resource_name_is_idempotent() {
        let first = resource_name("prod", "cost", "bucket", Some("reports"));
        let second = resource_name("prod", "cost", "bucket", Some("reports"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_resource_name_malformed_input_passes_through() {
        // No validation layer: empty segments yield empty slots
        assert_eq!(resource_name("", "security", "bucket", None), "wa-handson--security-bucket");
        assert_eq!(
            resource_name("dev", "security", "bucket", Some("")),
            "wa-handson-dev-security-bucket-"
        );
    }

    #[test]
    fn test_stack_name() {
        assert_eq!(
            stack_name("dev", "performance", "CacheStack"),
            "WaHandson-Dev-Performance-CacheStack"
        );
    }

    #[test]
    fn test_stack_name_capitalizes_only_first_character() {
        // Rest of the segment is untouched, not lowercased
        assert_eq!(
            stack_name("dEV", "pERFORMANCE", "CacheStack"),
            "WaHandson-DEV-PERFORMANCE-CacheStack"
        );
    }

    #[test]
    fn test_stack_name_leaves_stack_label_untouched() {
        assert_eq!(
            stack_name("dev", "security", "auditBucketStack"),
            "WaHandson-Dev-Security-auditBucketStack"
        );
    }

    #[test]
    fn test_stack_name_empty_segments_pass_through() {
        assert_eq!(stack_name("", "", "Stack"), "WaHandson---Stack");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("dev"), "Dev");
        assert_eq!(capitalize_first("Dev"), "Dev");
        assert_eq!(capitalize_first("d"), "D");
        assert_eq!(capitalize_first(""), "");
    }
}
