use super::*;

#[test]
fn new_provider_is_empty() {
    let tokens = TokenProvider::new();
    assert!(tokens.token().is_none());
    assert!(tokens.bearer().is_none());
}

#[test]
fn set_then_bearer() {
    let tokens = TokenProvider::new();
    tokens.set("abc123");
    assert_eq!(tokens.bearer().as_deref(), Some("Bearer abc123"));
}

#[test]
fn set_replaces_previous_token() {
    let tokens = TokenProvider::new();
    tokens.set("first");
    tokens.set("second");
    assert_eq!(tokens.token().as_deref(), Some("second"));
}

#[test]
fn clones_share_state() {
    let a = TokenProvider::new();
    let b = a.clone();
    a.set("shared");
    assert_eq!(b.token().as_deref(), Some("shared"));
    b.clear();
    assert!(a.token().is_none());
}

#[test]
fn debug_does_not_leak_token() {
    let tokens = TokenProvider::new();
    tokens.set("very-secret");
    let debug = format!("{tokens:?}");
    assert!(!debug.contains("very-secret"));
    assert!(debug.contains("present: true"));
}
