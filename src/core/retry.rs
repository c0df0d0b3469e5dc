use crate::core::extract::{Extraction, RowExtractor};
use crate::domain::model::{RawGame, SourceRow, UnitSummary, WorkUnit};
use crate::domain::ports::{PageFetcher, RowParser};
use crate::domain::report::SoftError;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Five attempts in total.
pub const DEFAULT_RETRIES: u32 = 4;
pub const DEFAULT_DELAY_MS: u64 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one.
    pub retries: u32,
    pub delay: Duration,
    /// Rows an attempt must yield to be accepted. 0 accepts any page.
    pub min_expected: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            min_expected: 0,
        }
    }
}

impl RetryPolicy {
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }
}

/// Per-unit lifecycle. `Retrying` loops back to `Fetching`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitState {
    Fetching,
    Validating,
    Retrying,
    Accepted,
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOutcome {
    pub unit: WorkUnit,
    pub state: UnitState,
    pub attempts: u32,
    pub observed: usize,
    pub expected: usize,
    pub games: Vec<RawGame>,
    pub discards: Vec<SoftError>,
    /// Why the last attempt was rejected; None when accepted.
    pub reason: Option<String>,
}

impl UnitOutcome {
    pub fn is_accepted(&self) -> bool {
        self.state == UnitState::Accepted
    }

    /// Warnings this unit contributes to the run report.
    pub fn warnings(&self) -> Vec<SoftError> {
        let mut warnings = self.discards.clone();
        if let (UnitState::Exhausted, Some(reason)) = (self.state, &self.reason) {
            warnings.push(SoftError::FetchValidationExhausted {
                unit: self.unit.label.clone(),
                attempts: self.attempts,
                observed: self.observed,
                expected: self.expected,
                reason: reason.clone(),
            });
        }
        warnings
    }

    pub fn summary(&self) -> UnitSummary {
        UnitSummary {
            label: self.unit.label.clone(),
            attempts: self.attempts,
            observed: self.observed,
            games: self.games.len(),
            complete: self.is_accepted(),
        }
    }
}

fn transition(unit: &WorkUnit, state: UnitState, attempt: u32) {
    debug!("🌐 [{}] attempt {}: {:?} {}", unit.label, attempt, state, unit.url);
}

struct Attempt {
    rows: Vec<SourceRow>,
    failure: Option<String>,
}

/// Fetches one unit repeatedly until the page looks complete or the retry
/// budget is spent. Each attempt starts from scratch.
pub struct RetryController<'a> {
    fetcher: &'a dyn PageFetcher,
    parser: &'a dyn RowParser,
    extractor: RowExtractor,
    policy: RetryPolicy,
}

impl<'a> RetryController<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, parser: &'a dyn RowParser, policy: RetryPolicy) -> Self {
        Self {
            fetcher,
            parser,
            extractor: RowExtractor::new(),
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    async fn attempt(&self, unit: &WorkUnit) -> Attempt {
        let page = match self.fetcher.fetch(unit).await {
            Ok(page) => page,
            Err(e) => {
                return Attempt {
                    rows: Vec::new(),
                    failure: Some(format!("fetch failed: {}", e)),
                }
            }
        };

        match self.parser.parse(&page) {
            Ok(rows) => Attempt { rows, failure: None },
            Err(e) => Attempt {
                rows: Vec::new(),
                failure: Some(format!("parse failed: {}", e)),
            },
        }
    }

    fn split_rows(&self, unit: &WorkUnit, rows: &[SourceRow]) -> (Vec<RawGame>, Vec<SoftError>) {
        let mut games = Vec::new();
        let mut discards = Vec::new();
        for row in rows {
            match self.extractor.extract(row) {
                Extraction::Game(game) => games.push(game),
                Extraction::Discard(reason) => discards.push(SoftError::ExtractionDiscard {
                    unit: unit.label.clone(),
                    reason,
                }),
            }
        }
        (games, discards)
    }

    pub async fn run(&self, unit: &WorkUnit) -> UnitOutcome {
        let max_attempts = self.policy.max_attempts();
        let mut attempts = 0;

        loop {
            attempts += 1;
            transition(unit, UnitState::Fetching, attempts);
            let attempt = self.attempt(unit).await;

            transition(unit, UnitState::Validating, attempts);
            let observed = attempt.rows.len();
            let complete = attempt.failure.is_none() && observed >= self.policy.min_expected;

            if complete || attempts >= max_attempts {
                let (games, discards) = self.split_rows(unit, &attempt.rows);
                let (state, reason) = if complete {
                    info!(
                        "✅ [{}] {} rows, {} games after {} attempt(s)",
                        unit.label,
                        observed,
                        games.len(),
                        attempts
                    );
                    (UnitState::Accepted, None)
                } else {
                    warn!("⚠️ [{}] giving up after {} attempts with {} rows", unit.label, attempts, observed);
                    let reason = attempt.failure.unwrap_or_else(|| {
                        format!("found {} rows, expected at least {}", observed, self.policy.min_expected)
                    });
                    (UnitState::Exhausted, Some(reason))
                };
                transition(unit, state, attempts);

                return UnitOutcome {
                    unit: unit.clone(),
                    state,
                    attempts,
                    observed,
                    expected: self.policy.min_expected,
                    games,
                    discards,
                    reason,
                };
            }

            transition(unit, UnitState::Retrying, attempts);
            match &attempt.failure {
                Some(failure) => warn!(
                    "🔄 [{}] {}, retrying ({}/{})",
                    unit.label, failure, attempts, self.policy.retries
                ),
                None => warn!(
                    "🔄 [{}] found {} rows, expected {}, retrying ({}/{})",
                    unit.label, observed, self.policy.min_expected, attempts, self.policy.retries
                ),
            }
            if !self.policy.delay.is_zero() {
                tokio::time::sleep(self.policy.delay).await;
            }
        }
    }

    /// Runs every unit with at most `concurrency` in flight. Outcomes come
    /// back in unit order. The returned future is `Send`.
    pub fn run_all<'b>(&'b self, units: &'b [WorkUnit], concurrency: usize) -> BoxFuture<'b, Vec<UnitOutcome>> {
        stream::iter(units)
            .map(move |unit| self.run(unit))
            .buffered(concurrency.max(1))
            .collect()
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{EtlError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves pre-baked pages in order, repeating the last one.
    struct ScriptedFetcher {
        pages: Vec<Result<String>>,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        fn new(pages: Vec<Result<String>>) -> Self {
            Self {
                pages,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageFetcher for ScriptedFetcher {
        async fn fetch(&self, unit: &WorkUnit) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.pages[call.min(self.pages.len() - 1)] {
                Ok(page) => Ok(page.clone()),
                Err(_) => Err(EtlError::FetchError {
                    unit: unit.label.clone(),
                    message: "connection reset".to_string(),
                }),
            }
        }
    }

    /// Page content is "<count>:<tag>"; each row's matchup is tagged so
    /// tests can tell which attempt produced it.
    struct CountingParser;

    impl CountingParser {
        fn new() -> Self {
            Self
        }
    }

    impl RowParser for CountingParser {
        fn parse(&self, page: &str) -> Result<Vec<SourceRow>> {
            let (count, tag) = page.split_once(':').ok_or_else(|| EtlError::ParseError {
                message: "unrecognised page".to_string(),
            })?;
            let count: usize = count.parse().map_err(|_| EtlError::ParseError {
                message: "bad count".to_string(),
            })?;
            Ok((0..count)
                .map(|i| {
                    if i % 2 == 0 {
                        SourceRow::from_matchup(format!("Home{} vs {} on 06/01/2025", tag, i)).with_date("June 1")
                    } else {
                        SourceRow::from_matchup(format!("Away @ Home{}", tag))
                    }
                })
                .collect())
        }
    }

    fn policy(retries: u32, min_expected: usize) -> RetryPolicy {
        RetryPolicy {
            retries,
            delay: Duration::ZERO,
            min_expected,
        }
    }

    #[tokio::test]
    async fn test_below_threshold_exhausts_budget_and_keeps_last_attempt() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok("100:a".to_string()),
            Ok("100:b".to_string()),
            Ok("100:c".to_string()),
        ]);
        let parser = CountingParser::new();
        let controller = RetryController::new(&fetcher, &parser, policy(2, 162));

        let outcome = controller.run(&WorkUnit::new("rays", "https://example.test/rays")).await;

        assert_eq!(fetcher.calls(), 3);
        assert_eq!(outcome.attempts, 3);
        assert_eq!(outcome.state, UnitState::Exhausted);
        assert_eq!(outcome.observed, 100);
        assert_eq!(outcome.games.len(), 50);
        assert!(outcome.games.iter().all(|g| g.home_token == "Homec"));
        assert_eq!(outcome.discards.len(), 50);

        let warnings = outcome.warnings();
        assert!(warnings.iter().any(|w| matches!(
            w,
            SoftError::FetchValidationExhausted { unit, attempts: 3, observed: 100, .. } if unit == "rays"
        )));
    }

    #[tokio::test]
    async fn test_accepts_as_soon_as_threshold_is_met() {
        let fetcher = ScriptedFetcher::new(vec![Ok("10:a".to_string()), Ok("162:b".to_string())]);
        let parser = CountingParser::new();
        let controller = RetryController::new(&fetcher, &parser, policy(5, 162));

        let outcome = controller.run(&WorkUnit::new("dodgers", "https://example.test/lad")).await;

        assert_eq!(fetcher.calls(), 2);
        assert!(outcome.is_accepted());
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.games.len(), 81);
        assert!(outcome.reason.is_none());
        assert!(outcome.summary().complete);
    }

    #[tokio::test]
    async fn test_fetch_errors_count_as_empty_attempts() {
        let fetcher = ScriptedFetcher::new(vec![
            Err(EtlError::ProcessingError { message: String::new() }),
            Ok("4:x".to_string()),
        ]);
        let parser = CountingParser::new();
        let controller = RetryController::new(&fetcher, &parser, policy(1, 1));

        let outcome = controller.run(&WorkUnit::new("week", "https://example.test/w")).await;

        assert!(outcome.is_accepted());
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.games.len(), 2);
    }

    #[tokio::test]
    async fn test_parse_error_on_final_attempt_is_exhausted_with_no_rows() {
        let fetcher = ScriptedFetcher::new(vec![Ok("garbage".to_string())]);
        let parser = CountingParser::new();
        let controller = RetryController::new(&fetcher, &parser, policy(0, 0));

        let outcome = controller.run(&WorkUnit::new("week", "https://example.test/w")).await;

        assert_eq!(outcome.state, UnitState::Exhausted);
        assert_eq!(outcome.attempts, 1);
        assert!(outcome.games.is_empty());
        assert!(outcome.reason.unwrap().contains("parse failed"));
    }

    #[tokio::test]
    async fn test_rerunning_a_unit_does_not_merge_outcomes() {
        let fetcher = ScriptedFetcher::new(vec![Ok("6:z".to_string())]);
        let parser = CountingParser::new();
        let controller = RetryController::new(&fetcher, &parser, policy(2, 0));
        let unit = WorkUnit::new("giants", "https://example.test/sf");

        let first = controller.run(&unit).await;
        let second = controller.run(&unit).await;

        assert_eq!(first, second);
        assert_eq!(second.games.len(), 3);
    }

    #[tokio::test]
    async fn test_run_all_preserves_unit_order() {
        let fetcher = ScriptedFetcher::new(vec![Ok("2:q".to_string())]);
        let parser = CountingParser::new();
        let controller = RetryController::new(&fetcher, &parser, policy(0, 0));
        let units: Vec<WorkUnit> = (0..5)
            .map(|i| WorkUnit::new(format!("unit-{}", i), format!("https://example.test/{}", i)))
            .collect();

        let outcomes = controller.run_all(&units, 3).await;

        let labels: Vec<&str> = outcomes.iter().map(|o| o.unit.label.as_str()).collect();
        assert_eq!(labels, vec!["unit-0", "unit-1", "unit-2", "unit-3", "unit-4"]);
    }

    #[test]
    fn test_default_policy_makes_five_attempts() {
        assert_eq!(RetryPolicy::default().max_attempts(), 5);
    }

    #[tokio::test]
    async fn test_run_all_future_can_move_across_threads() {
        fn assert_send<T: Send>(value: T) -> T {
            value
        }

        let fetcher = ScriptedFetcher::new(vec![Ok("1:a".to_string())]);
        let parser = CountingParser::new();
        let controller = RetryController::new(&fetcher, &parser, policy(0, 1));
        let units = vec![WorkUnit::new("only", "https://example.test/only")];

        let outcomes = assert_send(controller.run_all(&units, 2)).await;
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_accepted());
    }
}
