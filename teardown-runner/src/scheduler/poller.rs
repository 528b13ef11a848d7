//! Run poller
//!
//! Polls a Terraform Cloud run at a fixed interval until it reaches a
//! terminal status or the attempt budget runs out.

use std::sync::Arc;
use std::time::Duration;
use teardown_core::domain::run::{LogSource, Run};
use tokio::time;
use tracing::{error, info, warn};

use crate::repository::ControlPlaneRepository;

/// Attempt budget and spacing for run polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Polls before giving up
    pub max_attempts: u32,
    /// Wait after each non-terminal poll
    pub interval: Duration,
}

impl PollPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// Upper bound on how long a single run is waited for
    pub fn ceiling(&self) -> Duration {
        self.interval.saturating_mul(self.max_attempts)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        // 10 x 30s: five minutes per run
        Self::new(10, Duration::from_secs(30))
    }
}

/// Waits for runs to finish
pub struct RunPoller {
    repository: Arc<dyn ControlPlaneRepository>,
    policy: PollPolicy,
}

impl RunPoller {
    /// Creates a new run poller
    pub fn new(repository: Arc<dyn ControlPlaneRepository>, policy: PollPolicy) -> Self {
        Self { repository, policy }
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Polls the run until it is applied, fails, or the budget is spent
    ///
    /// Returns `true` only for an applied run. A failed status fetch ends
    /// polling immediately.
    pub async fn wait_for_run(&self, run_id: &str) -> bool {
        info!(
            "Polling run {} (max {} attempts, interval {:?})",
            run_id, self.policy.max_attempts, self.policy.interval
        );

        for attempt in 1..=self.policy.max_attempts {
            let Some(run) = self.repository.fetch_run(run_id).await else {
                return false;
            };

            info!("Attempt {}: Run status is '{}'", attempt, run.status);

            if run.status.is_success() {
                self.log_location(run.apply_id.map(LogSource::Apply), &run.id)
                    .await;
                return true;
            }
            if run.status.is_terminal() {
                self.log_location(run.plan_id.clone().map(LogSource::Plan), &run.id)
                    .await;
                error!("Run {} failed with status '{}'", run_id, run.status);
                return false;
            }
            self.log_progress(&run, attempt);

            time::sleep(self.policy.interval).await;
        }

        warn!("Max retries reached for polling run {}", run_id);
        false
    }

    fn log_progress(&self, run: &Run, attempt: u32) {
        let remaining = self.policy.max_attempts - attempt;
        match run.created_at {
            Some(created_at) => info!(
                "Run {} still in progress (created at {}), {} attempts left",
                run.id, created_at, remaining
            ),
            None => info!("Run {} still in progress, {} attempts left", run.id, remaining),
        }
    }

    /// Logs where the plan or apply logs of a finished run can be read
    async fn log_location(&self, source: Option<LogSource>, run_id: &str) {
        let Some(source) = source else {
            warn!("Run {} has no log source to report", run_id);
            return;
        };

        if let Some(url) = self.repository.log_read_url(&source).await {
            info!("Log read URL: {}", url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockControlPlaneRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use teardown_core::domain::run::{RunMode, RunStatus};

    const INTERVAL: Duration = Duration::from_secs(30);

    fn run(status: &str) -> Run {
        Run {
            id: "run-1".to_string(),
            workspace_id: Some("ws-1".to_string()),
            mode: RunMode::Apply,
            status: RunStatus::from(status),
            message: None,
            created_at: None,
            plan_id: Some("plan-1".to_string()),
            apply_id: Some("apply-1".to_string()),
        }
    }

    /// Paused time advances straight to each sleep deadline
    fn assert_elapsed(start: time::Instant, expected: Duration) {
        let elapsed = start.elapsed();
        assert!(elapsed >= expected, "elapsed {:?} < {:?}", elapsed, expected);
        assert!(elapsed < expected + Duration::from_secs(1));
    }

    fn poller(mock: MockControlPlaneRepository, max_attempts: u32) -> RunPoller {
        RunPoller::new(Arc::new(mock), PollPolicy::new(max_attempts, INTERVAL))
    }

    #[test]
    fn test_default_policy_ceiling() {
        assert_eq!(PollPolicy::default().ceiling(), Duration::from_secs(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_applied_on_first_poll() {
        let mut mock = MockControlPlaneRepository::new();
        mock.expect_fetch_run()
            .times(1)
            .returning(|_| Some(run("applied")));
        mock.expect_log_read_url()
            .withf(|source| *source == LogSource::Apply("apply-1".to_string()))
            .times(1)
            .returning(|_| Some("https://logs.example/apply".to_string()));

        let start = time::Instant::now();
        assert!(poller(mock, 10).wait_for_run("run-1").await);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_errored_on_first_poll() {
        let mut mock = MockControlPlaneRepository::new();
        mock.expect_fetch_run()
            .times(1)
            .returning(|_| Some(run("errored")));
        mock.expect_log_read_url()
            .withf(|source| *source == LogSource::Plan("plan-1".to_string()))
            .times(1)
            .returning(|_| Some("https://logs.example/plan".to_string()));

        assert!(!poller(mock, 10).wait_for_run("run-1").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_canceled_is_failure() {
        let mut mock = MockControlPlaneRepository::new();
        mock.expect_fetch_run()
            .times(1)
            .returning(|_| Some(run("canceled")));
        mock.expect_log_read_url().times(1).returning(|_| None);

        assert!(!poller(mock, 10).wait_for_run("run-1").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_status_keeps_polling() {
        let mut mock = MockControlPlaneRepository::new();
        let polls = AtomicUsize::new(0);
        mock.expect_fetch_run().times(2).returning(move |_| {
            match polls.fetch_add(1, Ordering::SeqCst) {
                0 => Some(run("policy_checking")),
                _ => Some(run("errored")),
            }
        });
        mock.expect_log_read_url().times(1).returning(|_| None);

        let start = time::Instant::now();
        assert!(!poller(mock, 10).wait_for_run("run-1").await);
        assert_elapsed(start, INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_running_until_attempts_exhausted() {
        let mut mock = MockControlPlaneRepository::new();
        mock.expect_fetch_run()
            .times(4)
            .returning(|_| Some(run("applying")));
        mock.expect_log_read_url().never();

        let start = time::Instant::now();
        assert!(!poller(mock, 4).wait_for_run("run-1").await);
        assert_elapsed(start, INTERVAL * 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_then_applied() {
        let mut mock = MockControlPlaneRepository::new();
        let polls = AtomicUsize::new(0);
        mock.expect_fetch_run().times(3).returning(move |_| {
            match polls.fetch_add(1, Ordering::SeqCst) {
                0 | 1 => Some(run("pending")),
                _ => Some(run("applied")),
            }
        });
        mock.expect_log_read_url()
            .times(1)
            .returning(|_| Some("https://logs.example/apply".to_string()));

        let start = time::Instant::now();
        assert!(poller(mock, 10).wait_for_run("run-1").await);
        assert_elapsed(start, INTERVAL * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_stops_immediately() {
        let mut mock = MockControlPlaneRepository::new();
        mock.expect_fetch_run().times(1).returning(|_| None);
        mock.expect_log_read_url().never();

        let start = time::Instant::now();
        assert!(!poller(mock, 10).wait_for_run("run-1").await);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_log_url_failure_keeps_result() {
        let mut mock = MockControlPlaneRepository::new();
        mock.expect_fetch_run()
            .times(1)
            .returning(|_| Some(run("applied")));
        mock.expect_log_read_url().times(1).returning(|_| None);

        assert!(poller(mock, 10).wait_for_run("run-1").await);
    }
}
