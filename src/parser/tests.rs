// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;
#[cfg(test)]
use crate::ast::{NodeKind, Value};
#[cfg(test)]
use chrono::{TimeZone, Utc};

const EXAMPLE: &str = r#"
# This is a TOML document. Boom.

title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
organization = "GitHub"
bio = "GitHub Cofounder & CEO\nLikes tater tots and beer."
dob = 1979-05-27T07:32:00Z # First class dates? Why not?

[database]
server = "192.168.1.1"
ports = [ 8001, 8001, 8002 ]
connection_max = 5000
enabled = true

[servers]

  # You can indent as you please. Tabs or spaces. TOML don't care.
  [servers.alpha]
  ip = "10.0.0.1"
  dc = "eqdc10"

  [servers.beta]
  ip = "10.0.0.2"
  dc = "eqdc10"

[clients]
data = [ ["gamma", "delta"], [1, 2] ] # just an update to make sure parsers support it

# Line breaks are OK when inside arrays
hosts = [
  "alpha",
  "omega"
]

[floats]
pi = 3.14
minus = -10.001
"#;

// ===== Value grammar =====

#[test]
fn test_parse_bool() {
    let parsed = parse_value("true").unwrap();
    assert_eq!(parsed.value, Value::Bool(true));
    assert_eq!(parsed.consumed(), 4);

    let parsed = parse_value("false, 1").unwrap();
    assert_eq!(parsed.value, Value::Bool(false));
    assert_eq!(parsed.raw, "false");
}

#[test]
fn test_parse_string_escapes() {
    let input = r#""a\tb\n\"c\"""#;
    let (text, consumed) = parse_string(input).unwrap();
    assert_eq!(text, "a\tb\n\"c\"");
    assert_eq!(consumed, input.len());

    let (text, _) = parse_string(r#""\0\r\\""#).unwrap();
    assert_eq!(text, "\0\r\\");
}

#[test]
fn test_parse_string_stops_at_closing_quote() {
    let parsed = parse_value(r#""ab" tail"#).unwrap();
    assert_eq!(parsed.value, Value::String("ab".into()));
    assert_eq!(parsed.raw, r#""ab""#);
}

#[test]
fn test_parse_string_multibyte() {
    let parsed = parse_value("\"héllo ✓\"").unwrap();
    assert_eq!(parsed.value, Value::String("héllo ✓".into()));
    assert_eq!(parsed.consumed(), "\"héllo ✓\"".len());
}

#[test]
fn test_parse_string_unknown_escape_fails() {
    let err = parse_string(r#""bad\q""#).unwrap_err();
    assert_eq!(err.code(), Some(103));
}

#[test]
fn test_parse_string_unterminated_fails() {
    assert!(parse_string("\"abc").is_err());
    assert!(parse_string(r#""abc\""#).is_err());
    assert!(parse_value("\"abc").is_err());
}

#[test]
fn test_parse_integer_and_float() {
    assert_eq!(parse_value("5000").unwrap().value, Value::Int(5000));
    assert_eq!(parse_value("-42").unwrap().value, Value::Int(-42));
    assert_eq!(parse_value("3.14").unwrap().value, Value::Float(3.14));
    assert_eq!(parse_value("-10.001").unwrap().value, Value::Float(-10.001));
}

#[test]
fn test_parse_integer_overflow_falls_back_to_float() {
    assert_eq!(
        parse_value("9223372036854775808").unwrap().value,
        Value::Float(9223372036854775808.0)
    );
}

#[test]
fn test_parse_number_rejects_malformed_runs() {
    assert_eq!(parse_value("1-2").unwrap_err().code(), Some(102));
    assert_eq!(parse_value("1.2.3").unwrap_err().code(), Some(102));
    assert_eq!(parse_value("abc").unwrap_err().code(), Some(101));
    assert_eq!(parse_value("").unwrap_err().code(), Some(101));
}

#[test]
fn test_parse_timestamp() {
    let parsed = parse_value("1979-05-27T07:32:00Z").unwrap();
    let expected = Utc.with_ymd_and_hms(1979, 5, 27, 7, 32, 0).unwrap();
    assert_eq!(parsed.value, Value::Timestamp(expected));
    assert_eq!(parsed.consumed(), 20);
}

#[test]
fn test_parse_timestamp_invalid_date_fails() {
    let err = parse_value("1979-13-27T07:32:00Z").unwrap_err();
    assert_eq!(err.code(), Some(104));
}

#[test]
fn test_parse_timestamp_numeric_offset_unsupported() {
    // Only the `Z` form is recognized; this falls through to the number grammar.
    assert!(parse_value("1979-05-27T07:32:00-07:00").is_err());
}

#[test]
fn test_parse_nested_arrays() {
    let input = "[[1,2],[3,4,5]]";
    let parsed = parse_value(input).unwrap();
    assert_eq!(parsed.consumed(), input.len());

    let outer = parsed.value.as_array();
    assert_eq!(outer.len(), 2);
    assert_eq!(outer[0].value().as_array().len(), 2);
    assert_eq!(outer[1].value().as_array().len(), 3);
    assert_eq!(outer[1].value().as_array()[2].value(), &Value::Int(5));
}

#[test]
fn test_parse_deeply_nested_array() {
    let input = format!("{}7{}", "[".repeat(32), "]".repeat(32));
    let mut value = parse_value(&input).unwrap().value;
    for _ in 0..32 {
        value = value.as_array()[0].value().clone();
    }
    assert_eq!(value, Value::Int(7));
}

#[test]
fn test_parse_array_keeps_element_source() {
    let (items, consumed) = parse_array(r#"[ 1.50, "a\tb", [2,  3] ] tail"#).unwrap();
    assert_eq!(consumed, r#"[ 1.50, "a\tb", [2,  3] ]"#.len());

    let raws: Vec<&str> = items.iter().map(|item| item.raw()).collect();
    assert_eq!(raws, vec!["1.50", r#""a\tb""#, "[2,  3]"]);
    assert_eq!(items[1].value(), &Value::String("a\tb".into()));

    let inner = items[2].value().as_array();
    assert_eq!(inner[1].raw(), "3");
    assert_eq!(inner[1].value(), &Value::Int(3));
}

#[test]
fn test_built_elements_have_no_source() {
    let value = Value::array([Value::Int(1)]);
    assert_eq!(value.as_array()[0].raw(), "");
}

#[test]
fn test_array_string_with_z_at_timestamp_offset() {
    let parsed = parse_value(r#"[1, "abcdefghijklmnoZ"]"#).unwrap();
    assert_eq!(
        parsed.value,
        Value::array([Value::Int(1), Value::String("abcdefghijklmnoZ".into())])
    );

    let doc = parse(r#"k = [1, "abcdefghijklmnoZ"]"#).unwrap();
    assert!(doc.errors().is_empty());
    assert_eq!(doc.get_value("k").unwrap().as_array().len(), 2);
}

#[test]
fn test_array_of_timestamps() {
    let parsed = parse_value("[1979-05-27T07:32:00Z, 1980-01-01T00:00:00Z]").unwrap();
    let items = parsed.value.as_array();
    assert_eq!(items.len(), 2);
    assert_eq!(
        items[1].value().as_timestamp(),
        Utc.with_ymd_and_hms(1980, 1, 1, 0, 0, 0).unwrap()
    );
}

#[test]
fn test_very_deep_array_does_not_overflow() {
    const DEPTH: usize = 100_000;
    let input = format!("a = {}1{}", "[".repeat(DEPTH), "]".repeat(DEPTH));
    let doc = parse(&input).unwrap();

    let mut value = doc.get_value("a").unwrap();
    let mut depth = 0;
    while let Value::Array(items) = value {
        assert_eq!(items.len(), 1);
        value = items[0].value();
        depth += 1;
    }
    assert_eq!(depth, DEPTH);
    assert_eq!(value, &Value::Int(1));
}

#[test]
fn test_very_deep_unterminated_array_is_value_error() {
    let input = format!("a = {}1", "[".repeat(100_000));
    let doc = parse(&input).unwrap();
    assert_eq!(doc.get_leaf("a").unwrap().error().and_then(|e| e.code()), Some(105));
}

#[test]
fn test_parse_mixed_array() {
    let (items, _) = parse_array(r#"[1, "two", true, 2.5]"#).unwrap();
    assert_eq!(
        Value::Array(items),
        Value::array([
            Value::Int(1),
            Value::String("two".into()),
            Value::Bool(true),
            Value::Float(2.5),
        ])
    );
}

#[test]
fn test_parse_array_of_strings_with_separators_inside() {
    let (items, _) = parse_array(r#"[ "a,b" , "]" ]"#).unwrap();
    assert_eq!(
        Value::Array(items),
        Value::array([Value::String("a,b".into()), Value::String("]".into())])
    );
}

#[test]
fn test_parse_array_empty_and_trailing_comma() {
    assert_eq!(parse_array("[]").unwrap(), (vec![], 2));
    assert_eq!(parse_array("[ ]").unwrap(), (vec![], 3));

    let (items, _) = parse_array("[1, 2, ]").unwrap();
    assert_eq!(Value::Array(items), Value::array([Value::Int(1), Value::Int(2)]));
}

#[test]
fn test_parse_array_errors() {
    assert_eq!(parse_array("[1, 2").unwrap_err().code(), Some(105));
    assert_eq!(parse_array("[1 2]").unwrap_err().code(), Some(105));
    assert_eq!(parse_array(r#"[1, "bad\q"]"#).unwrap_err().code(), Some(103));
}

// ===== Document building =====

#[test]
fn test_parse_example_document() {
    let doc = parse(EXAMPLE).expect("Failed to parse document");

    assert_eq!(doc.get_value("title"), Some(&Value::String("TOML Example".into())));
    assert_eq!(doc.get_value("servers.beta.ip"), Some(&Value::String("10.0.0.2".into())));
    assert_eq!(doc.get_value("database.connection_max"), Some(&Value::Int(5000)));
    assert_eq!(doc.get_value("database.enabled"), Some(&Value::Bool(true)));
    assert_eq!(doc.get_value("floats.pi"), Some(&Value::Float(3.14)));
    assert_eq!(doc.get_value("floats.minus"), Some(&Value::Float(-10.001)));
    assert_eq!(
        doc.get_value("owner.bio").unwrap().as_str(),
        "GitHub Cofounder & CEO\nLikes tater tots and beer."
    );
    assert_eq!(
        doc.get_value("owner.dob").unwrap().as_timestamp(),
        Utc.with_ymd_and_hms(1979, 5, 27, 7, 32, 0).unwrap()
    );

    let data = doc.get_value("clients.data").unwrap();
    assert_eq!(data.as_array()[0].value().as_array()[0].value().as_str(), "gamma");
    assert_eq!(data.as_array()[1].value().as_array()[1].value().as_int(), 2);

    let hosts = doc.get_value("clients.hosts").unwrap();
    assert_eq!(
        hosts,
        &Value::array([Value::String("alpha".into()), Value::String("omega".into())])
    );

    assert!(doc.errors().is_empty());
}

#[test]
fn test_section_value_lookup() {
    let doc = parse("[a.b.c]\nk = 5").unwrap();
    assert_eq!(doc.get_value("a.b.c.k"), Some(&Value::Int(5)));

    let section = doc.get_section("a.b").unwrap();
    assert_eq!(section.kind(), NodeKind::Section);
    assert_eq!(section.get_value("c.k"), Some(&Value::Int(5)));
}

#[test]
fn test_redeclared_section_reuses_node() {
    let input = "[a]\nx = 1\n[b]\ny = 2\n[a]\nz = 3\n";
    let doc = parse(input).unwrap();

    assert_eq!(doc.root().sections().count(), 2);
    let a = doc.get_section("a").unwrap();
    let names: Vec<&str> = a.children().map(|c| c.name()).collect();
    assert_eq!(names, vec!["x", "z"]);
    assert_eq!(a.line(), 1);
}

#[test]
fn test_nested_header_reuses_parent() {
    let doc = parse("[servers]\n[servers.alpha]\nip = \"1\"\n[servers.beta]\nip = \"2\"").unwrap();

    let servers = doc.get_section("servers").unwrap();
    assert_eq!(servers.sections().count(), 2);
    assert_eq!(doc.root().sections().count(), 1);
}

#[test]
fn test_multiline_array_with_comment() {
    let input = "data = [ # comment\n \"x\",\n \"y\"\n]";
    let doc = parse(input).unwrap();

    let leaf = doc.get_leaf("data").unwrap();
    assert_eq!(leaf.raw(), r#"["x","y"]"#);
    assert_eq!(
        leaf.value(),
        &Value::array([Value::String("x".into()), Value::String("y".into())])
    );
}

#[test]
fn test_multiline_nested_array() {
    let input = "matrix = [\n  [1, 2],\n  [3, 4, 5], # row two\n]\nafter = 1";
    let doc = parse(input).unwrap();

    let matrix = doc.get_value("matrix").unwrap().as_array();
    assert_eq!(matrix.len(), 2);
    assert_eq!(matrix[1].value().as_array().len(), 3);
    assert_eq!(doc.get_value("after"), Some(&Value::Int(1)));
}

#[test]
fn test_bracketed_continuation_line_reads_as_header() {
    // A line that both starts with `[` and ends with `]` is always a header,
    // even in the middle of a multi-line array.
    let err = parse("m = [\n  [1, 2]\n]").unwrap_err();
    assert_eq!(err.code(), Some(201));
    assert_eq!(err.line(), 3);
}

#[test]
fn test_header_with_trailing_comment() {
    let doc = parse("a = 1\n[owner] # people\nname = \"t\"").unwrap();

    assert_eq!(doc.get_leaf("a").unwrap().raw(), "1");
    assert_eq!(doc.get_value("owner.name"), Some(&Value::String("t".into())));
    assert!(doc.get_value("name").is_none());
}

#[test]
fn test_section_path_with_many_segments() {
    const SEGMENTS: usize = 200_000;
    let path = vec!["a"; SEGMENTS].join(".");
    let doc = parse(&format!("[{}]\nk = 1", path)).unwrap();

    assert_eq!(doc.get_value(&format!("{}.k", path)), Some(&Value::Int(1)));
    assert_eq!(doc.len(), SEGMENTS + 2);
    assert!(doc.errors().is_empty());
}

#[test]
fn test_comment_inside_string_is_kept() {
    let doc = parse(r#"key = "a # b""#).unwrap();
    assert_eq!(doc.get_value("key"), Some(&Value::String("a # b".into())));
}

#[test]
fn test_escaped_quote_before_hash() {
    let doc = parse(r#"key = "a \" # b" # trailing"#).unwrap();
    assert_eq!(doc.get_value("key"), Some(&Value::String("a \" # b".into())));
}

#[test]
fn test_lookup_is_case_sensitive() {
    let doc = parse("[database]\nenabled = true").unwrap();

    assert!(doc.get_value("Database.Enabled").is_none());
    assert!(doc.get_value("database.Enabled").is_none());
    assert!(doc.get_section("Database").is_none());
    assert!(doc.get_value("database.enabled").is_some());
}

#[test]
fn test_missing_paths_are_none() {
    let doc = parse(EXAMPLE).unwrap();

    assert!(doc.get_value("nope").is_none());
    assert!(doc.get_value("servers.gamma.ip").is_none());
    assert!(doc.get_value("servers.alpha.port").is_none());
    assert!(doc.get_section("servers.gamma").is_none());
    assert!(doc.get_section("").is_none());
    assert!(doc.get_value("").is_none());
}

#[test]
fn test_kinds_do_not_cross() {
    let doc = parse(EXAMPLE).unwrap();

    // A section is not a value and a value is not a section.
    assert!(doc.get_value("servers.alpha").is_none());
    assert!(doc.get_section("database.enabled").is_none());
    assert!(doc.get_section("database.enabled.x").is_none());
}

#[test]
fn test_same_name_under_different_parents() {
    let doc = parse("[a.x]\nv = 1\n[b.x]\nv = 2").unwrap();

    assert_eq!(doc.get_value("a.x.v"), Some(&Value::Int(1)));
    assert_eq!(doc.get_value("b.x.v"), Some(&Value::Int(2)));
    assert!(doc.get_value("x.v").is_none());
}

#[test]
fn test_full_name_and_parent() {
    let doc = parse(EXAMPLE).unwrap();

    let ip = doc.get_leaf("servers.alpha.ip").unwrap();
    assert_eq!(ip.full_name(), "servers.alpha.ip");
    assert_eq!(ip.parent().unwrap().full_name(), "servers.alpha");
    assert_eq!(doc.root().full_name(), "");
    assert!(doc.root().parent().is_none());
}

#[test]
fn test_duplicate_key_last_wins() {
    let doc = parse("k = 1\nother = 0\nk = 2").unwrap();

    assert_eq!(doc.get_value("k"), Some(&Value::Int(2)));
    assert_eq!(doc.get_leaf("k").unwrap().line(), 3);
    assert_eq!(doc.root().children().count(), 2);
}

#[test]
fn test_orphan_continuation_is_fatal() {
    let err = parse("\n  \"x\"").unwrap_err();
    assert!(matches!(err, crate::TomlError::SyntaxError { line: 2, code: Some(201), .. }));
}

#[test]
fn test_section_header_resets_continuation_target() {
    let err = parse("a = [1,\n[s]\n2]").unwrap_err();
    assert_eq!(err.code(), Some(201));
    assert_eq!(err.line(), 3);
}

#[test]
fn test_section_colliding_with_value_is_fatal() {
    let err = parse("a = 1\n[a]\nb = 2").unwrap_err();
    assert!(matches!(err, crate::TomlError::SyntaxError { line: 2, code: Some(202), .. }));
}

#[test]
fn test_invalid_value_is_marked_not_fatal() {
    let doc = parse("good = 1\nbad = \"oops\nworse = ???").unwrap();

    assert_eq!(doc.get_value("good"), Some(&Value::Int(1)));
    assert_eq!(doc.get_value("bad"), Some(&Value::Invalid));

    let bad = doc.get_leaf("bad").unwrap();
    assert_eq!(bad.error().and_then(|e| e.code()), Some(103));
    assert_eq!(bad.error().map(|e| e.line()), Some(2));

    let errors = doc.errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].0, "bad");
    assert_eq!(errors[1].0, "worse");
    assert!(doc.validate().is_err());
}

#[test]
fn test_trailing_text_after_value_is_ignored() {
    let doc = parse("n = 42 apples").unwrap();
    assert_eq!(doc.get_value("n"), Some(&Value::Int(42)));
    assert!(doc.errors().is_empty());
}

#[test]
fn test_keys_are_trimmed() {
    let doc = parse("   spaced key   =   7   ").unwrap();
    assert_eq!(doc.get_value("spaced key"), Some(&Value::Int(7)));
}

#[test]
fn test_crlf_input() {
    let doc = parse("[s]\r\nk = \"v\"\r\nn = 3\r\n").unwrap();
    assert_eq!(doc.get_value("s.k"), Some(&Value::String("v".into())));
    assert_eq!(doc.get_value("s.n"), Some(&Value::Int(3)));
}

#[test]
fn test_empty_input() {
    let doc = parse("").unwrap();
    assert!(doc.is_empty());
    assert_eq!(doc.len(), 1);

    let doc = parse("# only comments\n\n   # here\n").unwrap();
    assert!(doc.is_empty());
}

#[test]
fn test_sections_have_no_value() {
    let doc = parse(EXAMPLE).unwrap();
    let owner = doc.get_section("owner").unwrap();

    assert_eq!(owner.value(), &Value::Unset);
    assert!(owner.error().is_none());
    assert_eq!(owner.values().count(), 4);
}
