/// Get environment variable with TIDEWAY_ prefix, falling back to unprefixed version
///
/// Checks `TIDEWAY_{key}` first, then `{key}`, so `SMTP_HOST` works as
/// well as `TIDEWAY_SMTP_HOST`.
///
/// # Examples
///
/// ```rust,ignore
/// use tideway_mail::utils::get_env_with_prefix;
///
/// // Checks TIDEWAY_SMTP_HOST first, then SMTP_HOST
/// let host = get_env_with_prefix("SMTP_HOST");
/// ```
pub fn get_env_with_prefix(key: &str) -> Option<String> {
    std::env::var(format!("TIDEWAY_{}", key))
        .or_else(|_| std::env::var(key))
        .ok()
}

/// Read a boolean flag via [`get_env_with_prefix`]
///
/// `true`, `1`, `yes` and `on` (any case) are true; anything else is false.
/// Returns `None` when the variable is unset.
pub fn get_env_flag(key: &str) -> Option<bool> {
    get_env_with_prefix(key).map(|v| parse_flag(&v))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
