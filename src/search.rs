//! Query-string constraints written after `?` in a pattern.
//!
//! `?q` requires the `q` parameter to be present, `?page=1` requires a `page`
//! parameter equal to `1`. Several constraints are joined with `&`.

use url::form_urlencoded;

/// One query constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchConstraint {
    /// The key must be present, with any value
    Present(String),
    /// The key must be present with exactly this value
    Equals(String, String),
}

impl std::fmt::Display for SearchConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchConstraint::Present(key) => write!(f, "{key}"),
            SearchConstraint::Equals(key, value) => write!(f, "{key}={value}"),
        }
    }
}

/// Every constraint of a pattern's search component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConstraints {
    constraints: Vec<SearchConstraint>,
}

impl SearchConstraints {
    /// Read constraints from the text after `?`. Empty items are ignored.
    ///
    /// Keys and values are decoded like URL query pairs (`%XX` and `+`), so
    /// they compare equal to what [`UrlParts`](crate::url_parts::UrlParts)
    /// holds for the same query text.
    #[must_use]
    pub fn parse(search: &str) -> Self {
        let constraints = search
            .split('&')
            .filter(|item| !item.is_empty())
            .filter_map(|item| {
                let (key, value) = form_urlencoded::parse(item.as_bytes()).next()?;
                Some(if item.contains('=') {
                    SearchConstraint::Equals(key.into_owned(), value.into_owned())
                } else {
                    SearchConstraint::Present(key.into_owned())
                })
            })
            .collect();
        Self { constraints }
    }

    /// True when every constraint holds for the decoded query pairs.
    #[must_use]
    pub fn matches(&self, query: &[(String, String)]) -> bool {
        self.constraints.iter().all(|constraint| match constraint {
            SearchConstraint::Present(key) => query.iter().any(|(k, _)| k == key),
            SearchConstraint::Equals(key, value) => {
                query.iter().any(|(k, v)| k == key && v == value)
            }
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchConstraint> {
        self.constraints.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_presence_and_equality() {
        let c = SearchConstraints::parse("q&page=2");
        assert!(c.matches(&query(&[("q", ""), ("page", "2")])));
        assert!(c.matches(&query(&[("page", "1"), ("page", "2"), ("q", "x")])));
        assert!(!c.matches(&query(&[("page", "2")])));
        assert!(!c.matches(&query(&[("q", "x"), ("page", "3")])));
    }

    #[test]
    fn test_empty_search_matches_anything() {
        let c = SearchConstraints::parse("");
        assert!(c.is_empty());
        assert!(c.matches(&[]));
        assert!(SearchConstraints::parse("&&").is_empty());
    }

    #[test]
    fn test_encoded_values_are_decoded() {
        let c = SearchConstraints::parse("q=a%20b&tag=c%2B%2B&sp=x+y");
        assert_eq!(
            c.iter().cloned().collect::<Vec<_>>(),
            vec![
                SearchConstraint::Equals("q".into(), "a b".into()),
                SearchConstraint::Equals("tag".into(), "c++".into()),
                SearchConstraint::Equals("sp".into(), "x y".into()),
            ]
        );
        assert!(c.matches(&query(&[("q", "a b"), ("tag", "c++"), ("sp", "x y")])));

        let c = SearchConstraints::parse("my%20key&empty=");
        assert!(c.matches(&query(&[("my key", "1"), ("empty", "")])));
        assert!(!c.matches(&query(&[("my key", "1"), ("empty", "x")])));
    }
}
