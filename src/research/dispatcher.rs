//! Bounded-concurrency research dispatch
//!
//! Each uncached diff gets one research call. Fan-out is capped by a
//! semaphore so an install touching hundreds of packages cannot spawn
//! hundreds of agent processes. Failures stay isolated per task: a slow or
//! failing call never cancels its siblings, and every diff comes back with
//! a result, marker text included.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::config::MAX_CONCURRENT_RESEARCH;
use crate::research::agent::{ResearchAgent, ResearchError};
use crate::version::diff::VersionDiff;

/// A diff paired with its research brief (or failure marker)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchResult {
    pub diff: VersionDiff,
    pub research: String,
    pub from_cache: bool,
}

impl ResearchResult {
    /// Failure markers are parenthesized so they stay distinguishable from
    /// genuine briefs; they are surfaced in output but never cached.
    pub fn is_failure(&self) -> bool {
        self.research.starts_with('(')
    }
}

/// Builds the fixed research prompt for a major-version transition
pub fn build_prompt(package: &str, old_major: u64, new_major: u64) -> String {
    format!(
        "Breaking changes: {package} v{old_major} -> v{new_major}\n\
         \n\
         You're providing context to an AI coding assistant. The codebase has \
         v{old_major} pinned but v{new_major} is latest.\n\
         \n\
         Return ONLY:\n\
         - 3-5 bullet points: breaking changes that affect code written today\n\
         - For API changes, show: `old way` -> `new way`\n\
         \n\
         Be terse. No migration guides, no installation steps, no sources, no headers.\n\
         This gets injected into context - every word costs attention."
    )
}

/// Runs the research agent for every diff, at most
/// [`MAX_CONCURRENT_RESEARCH`] calls in flight at once.
///
/// Blocks until all tasks complete. Results come back in submission order;
/// a task failure is converted into marker text, never propagated.
pub async fn dispatch(
    agent: Arc<dyn ResearchAgent>,
    diffs: Vec<VersionDiff>,
) -> Vec<ResearchResult> {
    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_RESEARCH));

    let tasks = diffs.into_iter().map(|diff| {
        let agent = Arc::clone(&agent);
        let semaphore = Arc::clone(&semaphore);

        async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("research semaphore never closed");

            let prompt = build_prompt(&diff.package, diff.installed_major, diff.latest_major);
            let research = match agent.research(&prompt).await {
                Ok(text) => text,
                Err(ResearchError::TimedOut(_)) => {
                    format!("(Research timed out for {})", diff.package)
                }
                Err(e) => format!("(Research failed for {}: {})", diff.package, e),
            };

            ResearchResult {
                diff,
                research,
                from_cache: false,
            }
        }
    });

    join_all(tasks).await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::research::agent::MockResearchAgent;

    fn diff(package: &str, installed_major: u64, latest_major: u64) -> VersionDiff {
        VersionDiff {
            package: package.to_string(),
            installed_version: format!("^{installed_major}.0.0"),
            installed_major,
            latest_version: format!("{latest_major}.0.0"),
            latest_major,
        }
    }

    /// Agent that records how many calls are in flight simultaneously
    struct InstrumentedAgent {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        fail_for: Option<String>,
    }

    impl InstrumentedAgent {
        fn new(fail_for: Option<&str>) -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                fail_for: fail_for.map(String::from),
            }
        }
    }

    #[async_trait::async_trait]
    impl ResearchAgent for InstrumentedAgent {
        async fn research(&self, prompt: &str) -> Result<String, ResearchError> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if let Some(needle) = &self.fail_for
                && prompt.contains(needle)
            {
                return Err(ResearchError::TimedOut(Duration::from_millis(1)));
            }

            Ok(format!("brief for: {}", prompt.lines().next().unwrap_or("")))
        }
    }

    #[tokio::test]
    async fn dispatch_never_exceeds_the_concurrency_bound() {
        let agent = Arc::new(InstrumentedAgent::new(None));
        let diffs: Vec<VersionDiff> = (0..25).map(|i| diff(&format!("pkg{i}"), 1, 2)).collect();

        let results = dispatch(agent.clone(), diffs).await;

        assert_eq!(results.len(), 25);
        assert!(agent.max_in_flight.load(Ordering::SeqCst) <= MAX_CONCURRENT_RESEARCH);
        assert!(results.iter().all(|r| !r.from_cache));
    }

    #[tokio::test]
    async fn dispatch_returns_results_in_submission_order() {
        let agent = Arc::new(InstrumentedAgent::new(None));
        let diffs = vec![diff("react", 17, 18), diff("lodash", 4, 5)];

        let results = dispatch(agent, diffs).await;

        assert_eq!(results[0].diff.package, "react");
        assert_eq!(results[1].diff.package, "lodash");
    }

    #[tokio::test]
    async fn dispatch_converts_timeout_into_marker_without_cancelling_siblings() {
        let agent = Arc::new(InstrumentedAgent::new(Some("lodash")));
        let diffs = vec![
            diff("react", 17, 18),
            diff("lodash", 4, 5),
            diff("flask", 1, 3),
        ];

        let results = dispatch(agent, diffs).await;

        assert_eq!(results.len(), 3);
        assert!(!results[0].is_failure());
        assert!(results[1].is_failure());
        assert_eq!(results[1].research, "(Research timed out for lodash)");
        assert!(!results[2].is_failure());
    }

    #[tokio::test]
    async fn dispatch_converts_invocation_failure_into_marker() {
        let mut agent = MockResearchAgent::new();
        agent.expect_research().returning(|_| {
            Err(ResearchError::Spawn(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such binary",
            )))
        });

        let results = dispatch(Arc::new(agent), vec![diff("react", 17, 18)]).await;

        assert!(results[0].is_failure());
        assert!(results[0].research.starts_with("(Research failed for react:"));
    }

    #[test]
    fn build_prompt_names_package_and_transition() {
        let prompt = build_prompt("react", 17, 18);

        assert!(prompt.starts_with("Breaking changes: react v17 -> v18"));
        assert!(prompt.contains("v17 pinned but v18 is latest"));
    }
}
