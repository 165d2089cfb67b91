/// Placeholder shown for empty profile fields
pub const NOT_SET: &str = "Not set";

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Upper-case the first character, leave the rest as is
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Return the value, or "Not set" when missing or blank
pub fn or_not_set(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => NOT_SET.to_string(),
    }
}

/// Show only the edges of a bearer token: `abcd…wxyz`
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Hello", 2), "He");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("admin"), "Admin");
        assert_eq!(capitalize_first("Parent"), "Parent");
        assert_eq!(capitalize_first("élève"), "Élève");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_or_not_set() {
        assert_eq!(or_not_set(Some("Ada")), "Ada");
        assert_eq!(or_not_set(Some("  ")), "Not set");
        assert_eq!(or_not_set(None), "Not set");
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcdefghijklmnop"), "abcd…mnop");
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token(""), "");
    }
}
