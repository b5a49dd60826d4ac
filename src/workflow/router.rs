/// Query fragments that signal the user wants recent information.
pub const RECENCY_KEYWORDS: [&str; 4] = ["news", "latest", "today", "recent"];

/// Ticker symbols the finance specialist knows how to look up.
pub const TICKER_TOKENS: [&str; 6] = ["AAPL", "TSLA", "MSFT", "NVDA", "GOOGL", "AMZN"];

/// Which specialists apply to a given query.
///
/// Computed fresh per query, never persisted. Both flags are independent:
/// a query may select both specialists, one, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingDecision {
    pub web: bool,
    pub finance: bool,
}

impl RoutingDecision {
    pub fn is_empty(&self) -> bool {
        !self.web && !self.finance
    }
}

/// Decides which specialists a query is dispatched to.
///
/// This is a deliberately coarse, explainable heuristic: literal substring
/// membership tests, no semantic matching and no fallback inference. A
/// query with none of the signals selects no specialist even if one would
/// have been relevant.
#[derive(Debug, Clone)]
pub struct Router {
    recency_keywords: Vec<String>,
    ticker_tokens: Vec<String>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(RECENCY_KEYWORDS, TICKER_TOKENS)
    }
}

impl Router {
    /// Build a router from custom signal lists. Keywords are matched
    /// case-insensitively, tickers against the upper-cased query, so the
    /// lists are normalized here once.
    pub fn new<K, T, S1, S2>(recency_keywords: K, ticker_tokens: T) -> Self
    where
        K: IntoIterator<Item = S1>,
        T: IntoIterator<Item = S2>,
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        Self {
            recency_keywords: recency_keywords
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
            ticker_tokens: ticker_tokens
                .into_iter()
                .map(|s| s.as_ref().to_uppercase())
                .collect(),
        }
    }

    /// Pure lexical inspection of the query; idempotent, no failure path.
    pub fn route(&self, query: &str) -> RoutingDecision {
        let lowered = query.to_lowercase();
        let uppered = query.to_uppercase();

        RoutingDecision {
            web: self
                .recency_keywords
                .iter()
                .any(|keyword| lowered.contains(keyword)),
            finance: self
                .ticker_tokens
                .iter()
                .any(|ticker| uppered.contains(ticker)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recency_keyword_selects_web_only() {
        let decision = Router::default().route("What's the latest AI news today?");
        assert_eq!(
            decision,
            RoutingDecision {
                web: true,
                finance: false
            }
        );
    }

    #[test]
    fn ticker_selects_finance_only() {
        let decision = Router::default().route("What is the current stock price of AAPL?");
        assert_eq!(
            decision,
            RoutingDecision {
                web: false,
                finance: true
            }
        );
    }

    #[test]
    fn both_signals_select_both() {
        let decision = Router::default().route("Latest news on TSLA today");
        assert_eq!(
            decision,
            RoutingDecision {
                web: true,
                finance: true
            }
        );
    }

    #[test]
    fn no_signal_selects_neither() {
        let decision = Router::default().route("Explain what you can do.");
        assert!(decision.is_empty());
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let router = Router::default();
        assert!(router.route("LATEST developments in robotics").web);
        assert!(router.route("give me the News").web);
    }

    #[test]
    fn ticker_match_survives_lowercase_input() {
        // membership is checked against the upper-cased query, exactly as
        // the reference behavior: "aapl" upper-cases to "AAPL" and matches
        assert!(Router::default().route("price of aapl please").finance);
    }

    #[test]
    fn route_is_idempotent() {
        let router = Router::default();
        let query = "Latest news on TSLA today";
        assert_eq!(router.route(query), router.route(query));
    }

    #[test]
    fn custom_lists_are_normalized() {
        let router = Router::new(["Breaking"], ["gme"]);
        assert!(router.route("breaking story").web);
        assert!(router.route("is GME up?").finance);
    }
}
