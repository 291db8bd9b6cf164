/// Prefix every display name starts with
pub const TAG_PREFIX: char = '#';
/// Repeated once per level of depth after the prefix
pub const DEPTH_MARKER: char = '>';

/// Strip leading `#`/`>` decoration so names are stored raw
pub fn strip_decoration(name: &str) -> &str {
    name.trim_start_matches(&[TAG_PREFIX, DEPTH_MARKER][..])
}

/// Depth-qualified label: `#name`, `#>name`, `#>>name`, ...
pub fn display_name(name: &str, depth: usize) -> String {
    let name = name.strip_prefix(TAG_PREFIX).unwrap_or(name);

    let mut label = String::with_capacity(1 + depth + name.len());
    label.push(TAG_PREFIX);
    label.extend(std::iter::repeat(DEPTH_MARKER).take(depth));
    label.push_str(name);
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_root() {
        assert_eq!(display_name("authentication", 0), "#authentication");
    }

    #[test]
    fn test_display_name_nested() {
        assert_eq!(display_name("login", 1), "#>login");
        assert_eq!(display_name("google-oauth", 2), "#>>google-oauth");
        assert_eq!(display_name("x", 5), format!("#{}x", ">".repeat(5)));
    }

    #[test]
    fn test_display_name_drops_leading_hash() {
        assert_eq!(display_name("#login", 1), "#>login");
    }

    #[test]
    fn test_strip_decoration() {
        assert_eq!(strip_decoration("#>>login"), "login");
        assert_eq!(strip_decoration(">login"), "login");
        assert_eq!(strip_decoration("log#in"), "log#in");
        assert_eq!(strip_decoration("login"), "login");
    }
}
