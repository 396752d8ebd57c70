use std::collections::HashMap;

use fieldcheck::patterns;

fn matches(name: &str, value: &str) -> bool {
    let registry = patterns::registry(&HashMap::new()).unwrap();
    registry[name].is_match(value)
}

#[test]
fn test_patterns_are_anchored() {
    // Full-value matching: a valid fragment inside junk does not pass.
    assert!(matches("integer", "42"));
    assert!(!matches("integer", "x42"));
    assert!(!matches("integer", "42x"));
}

#[test]
fn test_alpha_and_alpha_numeric() {
    assert!(matches("alpha", "Hello"));
    assert!(!matches("alpha", "Hello2"));
    assert!(matches("alpha_numeric", "Hello2"));
    assert!(!matches("alpha_numeric", "Hello 2"));
}

#[test]
fn test_number_accepts_empty() {
    // Emptiness is the required rule's business, not the pattern's.
    assert!(matches("number", ""));
    assert!(matches("number", "-3,14"));
    assert!(matches("number", "+3.14"));
    assert!(!matches("number", "3.14.15"));
}

#[test]
fn test_email() {
    assert!(matches("email", "a@b.co"));
    assert!(matches("email", "first.last+tag@sub.example.org"));
    assert!(!matches("email", "not-an-email"));
    assert!(!matches("email", "a@"));
}

#[test]
fn test_url_and_domain() {
    assert!(matches("url", "https://example.com/path?q=1"));
    assert!(matches("url", "ssh://host"));
    assert!(!matches("url", "example.com"));
    assert!(matches("domain", "sub.example.co.uk"));
    assert!(!matches("domain", "nodots"));
}

#[test]
fn test_dates_and_times() {
    assert!(matches("date", "2023-02-28"));
    assert!(!matches("date", "2023-02-30"));
    assert!(matches("date", "2024-04-30"));
    assert!(!matches("date", "2024-04-31"));
    assert!(matches("date", "1999-12-31"));

    assert!(matches("datetime", "2023-01-15T10:30:00Z"));
    assert!(matches("datetime", "2023-01-15T10:30:00+05:00"));
    assert!(matches("datetime", "2023-01-15T10:30:00+05:30"));
    assert!(matches("datetime", "2023-01-15T10:30:00+13:00"));
    assert!(!matches("datetime", "2023-01-15T10:30:00+15:00"));
    assert!(!matches("datetime", "2023-01-15 10:30:00"));

    assert!(matches("time", "23:59:59"));
    assert!(!matches("time", "24:00:00"));

    assert!(matches("dateISO", "2023/1/5"));
    assert!(matches("dateISO", "2023-01-05"));
    assert!(!matches("dateISO", "23-01-05"));

    assert!(matches("month_day_year", "12/31/2023"));
    assert!(!matches("month_day_year", "31/12/2023"));
    assert!(matches("day_month_year", "31/12/2023"));
    assert!(!matches("day_month_year", "12/31/2023"));
}

#[test]
fn test_color() {
    assert!(matches("color", "#aabbcc"));
    assert!(matches("color", "fff"));
    assert!(!matches("color", "#ggg"));
}

#[test]
fn test_registry_accepts_extra_sources() {
    let mut extra = HashMap::new();
    extra.insert("zip".to_string(), r"\d{5}".to_string());
    let registry = patterns::registry(&extra).unwrap();
    assert!(registry["zip"].is_match("12345"));
    // Built-ins are still present alongside.
    assert!(registry.contains_key("email"));
}
