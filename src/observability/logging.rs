use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const DEFAULT_DIRECTIVES: &str = "warn,troupe=debug,tool=info";

/// Install the process-wide subscriber with this crate's default filter:
/// workflow and agent spans at debug, tool execution at info, everything
/// else at warn. `RUST_LOG`, when set, overrides the lot.
pub fn init_default_tracing() {
    init_tracing(DEFAULT_DIRECTIVES);
}

/// Install the process-wide subscriber with the given filter directives.
/// `RUST_LOG`, when set, takes precedence.
pub fn init_tracing(default_directives: &str) {
    let filter = build_filter(
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        default_directives,
    );

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_span_events(fmt::format::FmtSpan::CLOSE);

    Registry::default().with(filter).with(fmt_layer).init();
}

fn build_filter(env_directives: Option<String>, default_directives: &str) -> EnvFilter {
    match env_directives {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(default_directives),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env_override() {
        let filter = build_filter(None, DEFAULT_DIRECTIVES);
        let rendered = filter.to_string();
        assert!(rendered.contains("troupe=debug"));
        assert!(rendered.contains("tool=info"));
    }

    #[test]
    fn env_directives_take_precedence() {
        let filter = build_filter(Some("warn".into()), DEFAULT_DIRECTIVES);
        assert_eq!(filter.to_string(), "warn");
    }
}
