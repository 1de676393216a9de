// tests/logging_levels.rs

use crackwatch::logging::parse_level_str;
use tracing::Level;

#[test]
fn level_names_from_environment() {
    assert_eq!(parse_level_str("debug"), Some(Level::DEBUG));
    assert_eq!(parse_level_str(" WARN "), Some(Level::WARN));
    assert_eq!(parse_level_str("warning"), Some(Level::WARN));
    assert_eq!(parse_level_str("trace"), Some(Level::TRACE));
    assert_eq!(parse_level_str("verbose"), None);
    assert_eq!(parse_level_str(""), None);
}
