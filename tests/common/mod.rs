#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write `content` to a uniquely named temporary file ending in `.{ext}`.
    /// The file is removed when the handle drops.
    pub fn create_temp_table(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("brrtpattern_test_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }
}

pub mod matchers {
    use brrtpattern::{Matcher, MatcherKind, OwnedMatch, RouteMatcher};

    pub fn build(kind: MatcherKind, patterns: &[&str]) -> RouteMatcher<usize> {
        let mut m = RouteMatcher::new(kind);
        for (i, p) in patterns.iter().enumerate() {
            m.add(p, i)
                .unwrap_or_else(|e| panic!("failed to add {p}: {e}"));
        }
        m
    }

    /// Resolve `url` with both algorithms, assert they agree, return the result.
    pub fn resolve_both(patterns: &[&str], url: &str) -> Option<OwnedMatch<usize>> {
        let array = build(MatcherKind::Array, patterns);
        let trie = build(MatcherKind::Trie, patterns);
        let a = array.match_str(url).unwrap().map(|m| m.into_owned());
        let t = trie.match_str(url).unwrap().map(|m| m.into_owned());
        assert_eq!(a, t, "array and trie disagree on {url}");
        a
    }
}
