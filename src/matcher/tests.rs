use super::{ArrayMatcher, Matcher, MatcherKind, OwnedMatch, RouteMatcher, TrieMatcher};
use crate::url_parts::UrlParts;

fn build(kind: MatcherKind, patterns: &[&str]) -> RouteMatcher<usize> {
    let mut m = RouteMatcher::new(kind);
    for (i, p) in patterns.iter().enumerate() {
        m.add(p, i).unwrap();
    }
    m
}

/// Match `url` with both algorithms, assert they agree and return the result.
fn lookup(patterns: &[&str], url: &str) -> Option<OwnedMatch<usize>> {
    let array = build(MatcherKind::Array, patterns);
    let trie = build(MatcherKind::Trie, patterns);
    let a = array.match_str(url).unwrap().map(|m| m.into_owned());
    let t = trie.match_str(url).unwrap().map(|m| m.into_owned());
    assert_eq!(a, t, "matchers disagree on {url}");
    a
}

fn param(m: &OwnedMatch<usize>, name: &str) -> Option<String> {
    m.params.get(name).map(str::to_string)
}

#[test]
fn test_optional_groups() {
    let patterns = ["api/(v:major(.:minor)/)run"];

    let m = lookup(&patterns, "https://x.test/api/v1.2/run").unwrap();
    assert_eq!(param(&m, "major").as_deref(), Some("1"));
    assert_eq!(param(&m, "minor").as_deref(), Some("2"));

    let m = lookup(&patterns, "https://x.test/api/v1/run").unwrap();
    assert_eq!(param(&m, "major").as_deref(), Some("1"));
    assert_eq!(param(&m, "minor"), None);
    assert!(m.params.contains_key("minor"));

    let m = lookup(&patterns, "https://x.test/api/run").unwrap();
    assert_eq!(param(&m, "major"), None);
    assert_eq!(param(&m, "minor"), None);

    assert!(lookup(&patterns, "https://x.test/api/").is_none());
}

#[test]
fn test_single_parameter() {
    let patterns = ["users/:id"];
    let m = lookup(&patterns, "https://x.test/users/123").unwrap();
    assert_eq!(param(&m, "id").as_deref(), Some("123"));
    assert!(lookup(&patterns, "https://x.test/users/").is_none());
    assert!(lookup(&patterns, "https://x.test/users/123/posts").is_none());
}

#[test]
fn test_wildcards() {
    let patterns = ["files/*"];
    assert!(lookup(&patterns, "https://x.test/files/anything").is_some());
    assert!(lookup(&patterns, "https://x.test/files/path/to/file").is_some());
    assert!(lookup(&patterns, "https://x.test/files/").is_some());
    assert!(lookup(&patterns, "https://x.test/files").is_none());

    let patterns = ["static/*path"];
    let m = lookup(&patterns, "https://x.test/static/css/site.css").unwrap();
    assert_eq!(param(&m, "path").as_deref(), Some("css/site.css"));

    let patterns = ["files/*/raw/:name"];
    let m = lookup(&patterns, "https://x.test/files/a/b/raw/readme").unwrap();
    assert_eq!(param(&m, "name").as_deref(), Some("readme"));
    assert!(lookup(&patterns, "https://x.test/files/a/b/raw").is_none());
}

#[test]
fn test_root_beats_catch_all() {
    let patterns = ["/", "*"];
    assert_eq!(lookup(&patterns, "https://x.test/").unwrap().payload, 0);
    assert_eq!(lookup(&patterns, "https://x.test/other").unwrap().payload, 1);

    let patterns = ["*", "/"];
    assert_eq!(lookup(&patterns, "https://x.test/").unwrap().payload, 0);
}

#[test]
fn test_registration_order_priority() {
    let patterns = ["users/:id", "users/me", "*"];
    let m = lookup(&patterns, "https://x.test/users/me").unwrap();
    assert_eq!(m.payload, 0);
    assert_eq!(m.pattern, "users/:id");

    let patterns = ["users/me", "users/:id"];
    assert_eq!(lookup(&patterns, "https://x.test/users/me").unwrap().payload, 0);
    assert_eq!(lookup(&patterns, "https://x.test/users/you").unwrap().payload, 1);
}

#[test]
fn test_hostname_patterns() {
    let patterns = [
        "https://:tenant.example.com/dashboard",
        "https://*.example.com/*",
        "http(s)://example.com/(:page)",
    ];

    let m = lookup(&patterns, "https://acme.example.com/dashboard").unwrap();
    assert_eq!(m.payload, 0);
    assert_eq!(param(&m, "tenant").as_deref(), Some("acme"));

    let m = lookup(&patterns, "https://a.b.example.com/dashboard").unwrap();
    assert_eq!(m.payload, 1);

    let m = lookup(&patterns, "http://example.com/pricing").unwrap();
    assert_eq!(m.payload, 2);
    assert_eq!(param(&m, "page").as_deref(), Some("pricing"));

    let m = lookup(&patterns, "https://example.com/").unwrap();
    assert_eq!(m.payload, 2);
    assert_eq!(param(&m, "page"), None);

    assert!(lookup(&patterns, "ftp://example.com/x").is_none());
    assert!(lookup(&patterns, "https://example.org/x").is_none());
}

#[test]
fn test_hostname_parameter_spans_one_label() {
    let patterns = ["https://:sub.example.com/"];
    assert!(lookup(&patterns, "https://a.b.example.com/").is_none());
    assert!(lookup(&patterns, "https://example.com/").is_none());
}

#[test]
fn test_port_and_search() {
    let patterns = [
        "http://localhost:3000/*",
        "https://example.com/search?q",
        "https://example.com/search?mode=advanced",
        "https://example.com/search",
    ];

    assert_eq!(lookup(&patterns, "http://localhost:3000/x").unwrap().payload, 0);
    assert!(lookup(&patterns, "http://localhost:4000/x").is_none());
    assert!(lookup(&patterns, "http://localhost/x").is_none());

    assert_eq!(
        lookup(&patterns, "https://example.com/search?q=rust").unwrap().payload,
        1
    );
    assert_eq!(
        lookup(&patterns, "https://example.com/search?mode=advanced")
            .unwrap()
            .payload,
        2
    );
    assert_eq!(
        lookup(&patterns, "https://example.com/search?mode=basic")
            .unwrap()
            .payload,
        3
    );
}

#[test]
fn test_parameters_share_a_segment() {
    let patterns = ["archive/:year-:month", "assets/:name.:ext"];

    let m = lookup(&patterns, "https://x.test/archive/2024-05").unwrap();
    assert_eq!(param(&m, "year").as_deref(), Some("2024"));
    assert_eq!(param(&m, "month").as_deref(), Some("05"));

    let m = lookup(&patterns, "https://x.test/assets/app.min.js").unwrap();
    assert_eq!(param(&m, "name").as_deref(), Some("app"));
    assert_eq!(param(&m, "ext").as_deref(), Some("min.js"));
}

#[test]
fn test_values_stay_percent_encoded() {
    let m = lookup(&["users/:name"], "https://x.test/users/j%C3%BCrgen").unwrap();
    assert_eq!(param(&m, "name").as_deref(), Some("j%C3%BCrgen"));
}

#[test]
fn test_failed_add_keeps_previous_patterns() {
    for kind in [MatcherKind::Array, MatcherKind::Trie] {
        let mut m = build(kind, &["a/:id"]);
        assert!(m.add("b/(:x", 1).is_err());
        assert!(m.add("c/:dup/:dup", 2).is_err());
        assert!(m.add("d/:", 3).is_err());
        assert_eq!(m.len(), 1);

        m.add("e", 4).unwrap();
        let hit = m.match_str("https://x.test/a/7").unwrap().unwrap();
        assert_eq!(*hit.payload, 0);
        assert_eq!(hit.params.get("id"), Some("7"));
        assert!(m.match_str("https://x.test/b/1").unwrap().is_none());
    }
}

#[test]
fn test_match_any_returns_a_matching_pattern() {
    let mut trie = TrieMatcher::new();
    trie.add("users/:id", 0).unwrap();
    trie.add("users/me", 1).unwrap();
    trie.add("posts/*", 2).unwrap();

    let url: UrlParts = "https://x.test/users/me".parse().unwrap();
    let hit = trie.match_any(&url).unwrap();
    assert!(matches!(*hit.payload, 0 | 1));

    let url: UrlParts = "https://x.test/posts/1/comments".parse().unwrap();
    assert_eq!(*trie.match_any(&url).unwrap().payload, 2);

    let url: UrlParts = "https://x.test/nothing".parse().unwrap();
    assert!(trie.match_any(&url).is_none());
}

#[test]
fn test_round_trip_substitution() {
    let cases: &[(&str, &[(&str, &str)])] = &[
        ("users/:id/posts/:post", &[("id", "42"), ("post", "hello-world")]),
        ("https://:tenant.example.com/:section", &[("tenant", "acme"), ("section", "billing")]),
        ("docs/(:lang/)*rest", &[("lang", "en"), ("rest", "guide/intro")]),
        ("v:major.:minor/status", &[("major", "3"), ("minor", "14")]),
    ];
    for (pattern, values) in cases {
        let mut url = pattern.to_string();
        for (name, value) in *values {
            url = url
                .replacen(&format!(":{name}"), value, 1)
                .replacen(&format!("*{name}"), value, 1);
        }
        let url = url.replace(['(', ')'], "");
        let url = if url.contains("://") {
            url
        } else {
            format!("https://x.test/{url}")
        };

        let m = lookup(&[*pattern], &url).unwrap_or_else(|| panic!("{pattern} vs {url}"));
        for (name, value) in *values {
            assert_eq!(param(&m, name).as_deref(), Some(*value), "{pattern} vs {url}");
        }
    }
}

#[test]
fn test_matcher_kind_parse() {
    assert_eq!(MatcherKind::parse("ARRAY"), MatcherKind::Array);
    assert_eq!(MatcherKind::parse("linear"), MatcherKind::Array);
    assert_eq!(MatcherKind::parse("trie"), MatcherKind::Trie);
    assert_eq!(MatcherKind::parse("bogus"), MatcherKind::Trie);
    assert_eq!(MatcherKind::default().as_str(), "trie");
}

#[test]
fn test_array_and_trie_report_patterns_in_order() {
    let mut array = ArrayMatcher::new();
    let mut trie = TrieMatcher::new();
    for (i, p) in ["a", "b/:x", "c/*"].iter().enumerate() {
        array.add(p, i).unwrap();
        trie.add(p, i).unwrap();
    }
    let a: Vec<_> = array.patterns().map(|p| p.source().to_string()).collect();
    let t: Vec<_> = trie.patterns().map(|p| p.source().to_string()).collect();
    assert_eq!(a, vec!["a", "b/:x", "c/*"]);
    assert_eq!(a, t);
}

#[test]
fn test_params_serialize_as_map() {
    let m = lookup(&["api/(v:major(.:minor)/)run"], "https://x.test/api/v1/run").unwrap();
    let json = serde_json::to_value(&m.params).unwrap();
    assert_eq!(json, serde_json::json!({"major": "1", "minor": null}));
}
