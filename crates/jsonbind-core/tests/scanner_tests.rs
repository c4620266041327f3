use jsonbind_core::scanner::{compact, scan_string, split};

// ============================================================================
// Compaction
// ============================================================================

#[test]
fn compact_strips_whitespace() {
    assert_eq!(compact("{ \"a\" : 1 }"), "{\"a\":1}");
}

#[test]
fn compact_strips_newlines_and_tabs() {
    assert_eq!(compact("[\n\t1,\r\n 2\n]"), "[1,2]");
}

#[test]
fn compact_strips_unicode_whitespace() {
    assert_eq!(compact("1\u{00A0}2"), "12");
}

#[test]
fn compact_preserves_string_interior() {
    assert_eq!(compact("{\"k\" : \" x  y \"}"), "{\"k\":\" x  y \"}");
}

#[test]
fn compact_preserves_escaped_quote() {
    // The escaped quote must not terminate the literal early, or the
    // trailing " b" would be treated as outside-string whitespace.
    assert_eq!(compact(r#""a\" b""#), r#""a\" b""#);
}

#[test]
fn compact_idempotent() {
    let messy = " { \"name\" : \"a b\" , \"xs\" : [ 1 , 2 ] } ";
    let once = compact(messy);
    assert_eq!(compact(&once), once);
}

#[test]
fn compact_empty_input() {
    assert_eq!(compact(""), "");
}

#[test]
fn compact_unterminated_literal_copies_rest() {
    assert_eq!(compact("\"abc 1"), "\"abc 1");
}

// ============================================================================
// String literal scanning
// ============================================================================

#[test]
fn scan_string_simple() {
    assert_eq!(scan_string("\"abc\"", 0), 4);
}

#[test]
fn scan_string_skips_escaped_quote() {
    assert_eq!(scan_string(r#""a\"b""#, 0), 5);
}

#[test]
fn scan_string_skips_escaped_backslash() {
    // The second backslash is consumed as the escaped character, so the
    // quote right after it closes the literal.
    assert_eq!(scan_string(r#""a\\""#, 0), 4);
}

#[test]
fn scan_string_mid_text() {
    let text = "{\"k\":1}";
    assert_eq!(scan_string(text, 1), 3);
}

#[test]
fn scan_string_unterminated_returns_last_index() {
    assert_eq!(scan_string("\"abc", 0), 3);
}

// ============================================================================
// Depth-aware splitting
// ============================================================================

#[test]
fn split_flat_array() {
    assert_eq!(split("[1,2,3]"), vec!["1", "2", "3"]);
}

#[test]
fn split_single_element() {
    assert_eq!(split("[42]"), vec!["42"]);
}

#[test]
fn split_nested_array_not_split() {
    assert_eq!(split("[1,[2,3],4]"), vec!["1", "[2,3]", "4"]);
}

#[test]
fn split_nested_object_not_split() {
    assert_eq!(
        split(r#"{"a":{"b":1,"c":2}}"#),
        vec![r#""a""#, r#"{"b":1,"c":2}"#]
    );
}

#[test]
fn split_comma_inside_string() {
    assert_eq!(split(r#"["a,b","c"]"#), vec![r#""a,b""#, r#""c""#]);
}

#[test]
fn split_colon_inside_string() {
    assert_eq!(split(r#"{"a:b":1}"#), vec![r#""a:b""#, "1"]);
}

#[test]
fn split_bracket_inside_string() {
    assert_eq!(split(r#"["[1,2]"]"#), vec![r#""[1,2]""#]);
}

#[test]
fn split_object_into_alternating_fragments() {
    assert_eq!(
        split(r#"{"a":1,"b":2}"#),
        vec![r#""a""#, "1", r#""b""#, "2"]
    );
}

#[test]
fn split_empty_array() {
    assert!(split("[]").is_empty());
}

#[test]
fn split_empty_object() {
    assert!(split("{}").is_empty());
}

#[test]
fn split_multibyte_content() {
    assert_eq!(split("[\"caf\u{e9}\",1]"), vec!["\"caf\u{e9}\"", "1"]);
}
