use std::time::Duration;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::workflow::capability::{AgentId, Capability};
use crate::workflow::error::WorkflowError;
use crate::workflow::router::Router;

/// What a specialist contributed to one workflow run.
///
/// `Skipped` and `Answered("")` are distinct on purpose: the synthesizer
/// must be able to tell "this agent was not consulted" apart from "this
/// agent ran and found nothing".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialistOutput {
    Skipped,
    Answered(String),
}

impl SpecialistOutput {
    fn render(&self) -> &str {
        match self {
            SpecialistOutput::Skipped => "(not consulted)",
            SpecialistOutput::Answered(text) => text,
        }
    }
}

/// Sequences one query through routing, specialist invocation, and answer
/// synthesis.
///
/// Execution is strictly sequential: router, then the web specialist (if
/// selected), then the finance specialist (if selected), then the
/// synthesizer. The coordinator holds no state between queries beyond
/// whatever history its capabilities keep.
pub struct Coordinator<C> {
    router: Router,
    web: C,
    finance: C,
    general: C,
    deadline: Option<Duration>,
}

impl<C: Capability> Coordinator<C> {
    pub fn new(router: Router, web: C, finance: C, general: C) -> Self {
        Self {
            router,
            web,
            finance,
            general,
            deadline: None,
        }
    }

    /// Bound every [`answer`](Self::answer) call by an overall deadline.
    /// On expiry the in-flight agent call is cancelled by drop and
    /// [`WorkflowError::DeadlineExceeded`] is returned; no partial answer
    /// escapes.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Produce the final answer for a query.
    ///
    /// Correctness of this layer is defined by *which* specialists are
    /// invoked and *what* reaches the synthesizer, not by the model text
    /// itself, which is non-deterministic.
    #[instrument(level = "info", skip_all, fields(run_id = %Uuid::new_v4()))]
    pub async fn answer(&mut self, query: &str) -> Result<String, WorkflowError> {
        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.run(query))
                .await
                .unwrap_or_else(|_| Err(WorkflowError::DeadlineExceeded)),
            None => self.run(query).await,
        }
    }

    async fn run(&mut self, query: &str) -> Result<String, WorkflowError> {
        let decision = self.router.route(query);
        info!(
            web = decision.web,
            finance = decision.finance,
            "routing decision"
        );

        let web_output = if decision.web {
            let prompt = format!("Provide factual, concise information for: {query}");
            let text = self.web.invoke(&prompt).await.map_err(|e| {
                WorkflowError::Agent {
                    agent: AgentId::Web,
                    source: e,
                }
            })?;
            SpecialistOutput::Answered(text)
        } else {
            SpecialistOutput::Skipped
        };

        let finance_output = if decision.finance {
            let prompt = format!("Use live market data to answer: {query}");
            let text = self.finance.invoke(&prompt).await.map_err(|e| {
                WorkflowError::Agent {
                    agent: AgentId::Finance,
                    source: e,
                }
            })?;
            SpecialistOutput::Answered(text)
        } else {
            SpecialistOutput::Skipped
        };

        let prompt = synthesis_prompt(query, &web_output, &finance_output);
        self.general
            .invoke(&prompt)
            .await
            .map_err(|e| WorkflowError::Agent {
                agent: AgentId::General,
                source: e,
            })
    }
}

fn synthesis_prompt(
    query: &str,
    web: &SpecialistOutput,
    finance: &SpecialistOutput,
) -> String {
    format!(
        "User question:\n{query}\n\n\
         Web research agent response:\n{}\n\n\
         Finance agent response:\n{}\n\n\
         Combine everything into a clear final answer.",
        web.render(),
        finance.render(),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::agent::AgentError;
    use crate::workflow::capability::Capability;

    type CallLog = Arc<Mutex<Vec<(&'static str, String)>>>;

    /// Capability that returns a scripted reply (or fails) and records
    /// every prompt it was handed.
    struct Scripted {
        label: &'static str,
        reply: Option<&'static str>,
        log: CallLog,
    }

    #[async_trait]
    impl Capability for Scripted {
        async fn invoke(&mut self, prompt: &str) -> Result<String, AgentError> {
            self.log
                .lock()
                .unwrap()
                .push((self.label, prompt.to_string()));
            match self.reply {
                Some(reply) => Ok(reply.to_string()),
                None => Err(AgentError::Runtime("scripted failure".into())),
            }
        }
    }

    fn coordinator(
        web: Option<&'static str>,
        finance: Option<&'static str>,
        general: Option<&'static str>,
    ) -> (Coordinator<Scripted>, CallLog) {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let make = |label, reply| Scripted {
            label,
            reply,
            log: Arc::clone(&log),
        };
        let coordinator = Coordinator::new(
            Router::default(),
            make("web", web),
            make("finance", finance),
            make("general", general),
        );
        (coordinator, log)
    }

    fn invoked(log: &CallLog) -> Vec<&'static str> {
        log.lock().unwrap().iter().map(|(label, _)| *label).collect()
    }

    #[tokio::test]
    async fn recency_query_invokes_web_then_synthesizer() {
        let (mut c, log) = coordinator(Some("web facts"), Some("unused"), Some("final"));
        let answer = c.answer("What's the latest AI news today?").await.unwrap();

        assert_eq!(answer, "final");
        assert_eq!(invoked(&log), vec!["web", "general"]);

        let entries = log.lock().unwrap();
        let (_, web_prompt) = &entries[0];
        assert_eq!(
            web_prompt,
            "Provide factual, concise information for: What's the latest AI news today?"
        );
        let (_, synthesis) = &entries[1];
        assert!(synthesis.contains("web facts"));
        assert!(synthesis.contains("Finance agent response:\n(not consulted)"));
        assert!(synthesis.contains("Combine everything into a clear final answer."));
    }

    #[tokio::test]
    async fn ticker_query_invokes_finance_then_synthesizer() {
        let (mut c, log) = coordinator(Some("unused"), Some("AAPL at 190"), Some("final"));
        let answer = c
            .answer("What is the current stock price of AAPL?")
            .await
            .unwrap();

        assert_eq!(answer, "final");
        assert_eq!(invoked(&log), vec!["finance", "general"]);

        let entries = log.lock().unwrap();
        let (_, finance_prompt) = &entries[0];
        assert_eq!(
            finance_prompt,
            "Use live market data to answer: What is the current stock price of AAPL?"
        );
        let (_, synthesis) = &entries[1];
        assert!(synthesis.contains("AAPL at 190"));
        assert!(synthesis.contains("Web research agent response:\n(not consulted)"));
    }

    #[tokio::test]
    async fn unrouted_query_goes_straight_to_synthesizer() {
        let (mut c, log) = coordinator(Some("unused"), Some("unused"), Some("final"));
        let answer = c.answer("Explain what you can do.").await.unwrap();

        assert_eq!(answer, "final");
        assert_eq!(invoked(&log), vec!["general"]);

        let entries = log.lock().unwrap();
        let (_, synthesis) = &entries[0];
        assert_eq!(synthesis.matches("(not consulted)").count(), 2);
        assert!(synthesis.contains("Explain what you can do."));
    }

    #[tokio::test]
    async fn combined_query_invokes_both_specialists_in_order() {
        let (mut c, log) = coordinator(Some("web facts"), Some("tsla data"), Some("final"));
        let answer = c.answer("Latest news on TSLA today").await.unwrap();

        assert_eq!(answer, "final");
        assert_eq!(invoked(&log), vec!["web", "finance", "general"]);

        let entries = log.lock().unwrap();
        let (_, synthesis) = &entries[2];
        assert!(synthesis.contains("web facts"));
        assert!(synthesis.contains("tsla data"));
        assert!(!synthesis.contains("(not consulted)"));
    }

    #[tokio::test]
    async fn specialist_failure_aborts_before_synthesis() {
        let (mut c, log) = coordinator(Some("unused"), None, Some("never"));
        let err = c
            .answer("What is the current stock price of AAPL?")
            .await
            .unwrap_err();

        assert!(
            matches!(err, WorkflowError::Agent { agent: AgentId::Finance, .. }),
            "expected finance failure, got: {err}"
        );
        // the synthesizer must not run after a specialist failure
        assert_eq!(invoked(&log), vec!["finance"]);
    }

    #[tokio::test]
    async fn deadline_expiry_yields_deadline_error() {
        struct Stalls;

        #[async_trait]
        impl Capability for Stalls {
            async fn invoke(&mut self, _prompt: &str) -> Result<String, AgentError> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok("too late".into())
            }
        }

        let mut c = Coordinator::new(Router::default(), Stalls, Stalls, Stalls)
            .with_deadline(Duration::from_millis(20));
        let err = c.answer("latest news").await.unwrap_err();
        assert!(matches!(err, WorkflowError::DeadlineExceeded));
    }
}
