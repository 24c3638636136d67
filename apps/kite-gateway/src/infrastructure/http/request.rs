//! HTTP request DTOs.

/// Query string for `POST /api/kite/session`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateSessionQuery {
    /// One-time request token from the Kite login redirect.
    pub request_token: Option<String>,
}

impl CreateSessionQuery {
    /// Build from decoded query pairs.
    ///
    /// When `request_token` repeats, the first occurrence wins. Other keys
    /// are ignored.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let request_token = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "request_token").then_some(value));
        Self { request_token }
    }

    /// The request token, or an empty string when absent.
    #[must_use]
    pub fn request_token(&self) -> &str {
        self.request_token.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn missing_token_reads_as_empty() {
        let query = CreateSessionQuery::from_pairs(Vec::new());
        assert_eq!(query.request_token(), "");
    }

    #[test]
    fn present_token() {
        let query = CreateSessionQuery::from_pairs(pairs(&[("request_token", "tok123")]));
        assert_eq!(query.request_token(), "tok123");
    }

    #[test]
    fn first_of_repeated_tokens_wins() {
        let query = CreateSessionQuery::from_pairs(pairs(&[
            ("status", "success"),
            ("request_token", "first"),
            ("request_token", "second"),
        ]));
        assert_eq!(query.request_token(), "first");
    }

    #[test]
    fn whitespace_is_preserved() {
        let query = CreateSessionQuery::from_pairs(pairs(&[("request_token", "  ")]));
        assert_eq!(query.request_token(), "  ");
    }
}
