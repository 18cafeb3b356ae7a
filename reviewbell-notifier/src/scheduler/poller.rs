//! Homework status poller
//!
//! Each cycle runs Fetch → Validate → Extract → Notify and then sleeps for the
//! retry period. The cursor and the last delivered message live here and only
//! here; there is no other shared state.

use std::sync::Arc;

use reviewbell_core::domain::{check_response, parse_status};
use tokio::time::{self, Duration};
use tracing::{debug, error, info};

use crate::error::CycleError;
use crate::repository::HomeworkRepository;
use crate::service::{Delivery, NotificationService};

/// What a successful cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The response held no homework; nothing to report
    NoHomeworks { current_date: Option<i64> },
    /// The latest homework was turned into a message and passed to the notifier
    Status {
        message: String,
        delivery: Delivery,
        current_date: Option<i64>,
    },
}

impl CycleOutcome {
    /// Cursor value for the next fetch, if it should move
    ///
    /// A cycle whose delivery failed keeps the old cursor so the same
    /// homework is fetched and retried next time.
    pub fn next_cursor(&self) -> Option<i64> {
        match self {
            Self::NoHomeworks { current_date } => *current_date,
            Self::Status {
                delivery: Delivery::Failed,
                ..
            } => None,
            Self::Status { current_date, .. } => *current_date,
        }
    }
}

/// Poller that checks homework statuses forever
pub struct StatusPoller {
    homeworks: Arc<dyn HomeworkRepository>,
    notifier: NotificationService,
    retry_period: Duration,
    /// Unix timestamp sent as `from_date`
    cursor: i64,
}

impl StatusPoller {
    /// Creates a new poller
    ///
    /// # Arguments
    /// * `homeworks` - Source of homework statuses
    /// * `notifier` - De-duplicating notification sender
    /// * `retry_period` - Sleep between cycles
    /// * `start_from` - Initial cursor, normally the process start time
    pub fn new(
        homeworks: Arc<dyn HomeworkRepository>,
        notifier: NotificationService,
        retry_period: Duration,
        start_from: i64,
    ) -> Self {
        Self {
            homeworks,
            notifier,
            retry_period,
            cursor: start_from,
        }
    }

    /// Current cursor
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Starts the polling loop
    ///
    /// Never returns: every error inside a cycle is reported and the loop
    /// carries on after the retry period.
    pub async fn run(&mut self) {
        info!(
            "Starting homework poller (interval: {:?}, from_date: {})",
            self.retry_period, self.cursor
        );

        loop {
            self.tick().await;
            time::sleep(self.retry_period).await;
        }
    }

    /// Runs one cycle and handles its outcome
    pub async fn tick(&mut self) {
        match self.run_cycle().await {
            Ok(outcome) => {
                if let CycleOutcome::Status {
                    message, delivery, ..
                } = &outcome
                {
                    debug!("Latest status: {} ({:?})", message, delivery);
                }
                if let Some(cursor) = outcome.next_cursor() {
                    debug!("Advancing cursor from {} to {}", self.cursor(), cursor);
                    self.cursor = cursor;
                }
            }
            Err(e) => {
                error!(kind = ?e.kind(), "Program failure: {}", e);
                self.notifier.notify(&e.failure_message()).await;
            }
        }
    }

    /// Performs a single poll cycle
    async fn run_cycle(&mut self) -> Result<CycleOutcome, CycleError> {
        debug!("Polling homework statuses (from_date: {})", self.cursor);

        let body = self.homeworks.fetch_statuses(self.cursor).await?;
        let response = check_response(&body)?;

        let Some(homework) = response.latest() else {
            debug!("Homework list is empty");
            return Ok(CycleOutcome::NoHomeworks {
                current_date: response.current_date,
            });
        };

        let message = parse_status(&homework?)?;
        let delivery = self.notifier.notify(&message).await;

        Ok(CycleOutcome::Status {
            message,
            delivery,
            current_date: response.current_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::repository::mock::{MockHomeworkRepository, MockNotificationRepository};
    use reviewbell_client::{ClientError, Result};
    use serde_json::{Value, json};
    use std::sync::Mutex;

    const START: i64 = 500;
    const APPROVED: &str =
        "Changed review status for \"proj1\". Работа проверена: ревьюеру всё понравилось. Ура!";

    struct Harness {
        poller: StatusPoller,
        sent: Arc<Mutex<Vec<String>>>,
        requested: Arc<Mutex<Vec<i64>>>,
    }

    fn harness(responses: Vec<Result<Value>>, notifications: MockNotificationRepository) -> Harness {
        let homeworks = MockHomeworkRepository::new(responses);
        let requested = homeworks.requested();
        let sent = notifications.sent();
        let poller = StatusPoller::new(
            Arc::new(homeworks),
            NotificationService::new(Arc::new(notifications)),
            Duration::from_secs(600),
            START,
        );
        Harness {
            poller,
            sent,
            requested,
        }
    }

    fn approved(current_date: i64) -> Result<Value> {
        Ok(json!({
            "homeworks": [{"homework_name": "proj1", "status": "approved"}],
            "current_date": current_date
        }))
    }

    #[tokio::test]
    async fn test_approved_status_is_sent_and_cursor_advances() {
        let mut h = harness(vec![approved(1000)], MockNotificationRepository::new());

        h.poller.tick().await;

        assert_eq!(*h.sent.lock().unwrap(), vec![APPROVED.to_string()]);
        assert_eq!(h.poller.cursor(), 1000);
        assert_eq!(*h.requested.lock().unwrap(), vec![START]);
    }

    #[tokio::test]
    async fn test_cycle_outcome_carries_message() {
        let mut h = harness(vec![approved(1000)], MockNotificationRepository::new());

        let outcome = h.poller.run_cycle().await.unwrap();
        assert_eq!(
            outcome,
            CycleOutcome::Status {
                message: APPROVED.to_string(),
                delivery: Delivery::Sent,
                current_date: Some(1000),
            }
        );
    }

    #[tokio::test]
    async fn test_same_status_twice_is_sent_once() {
        let mut h = harness(
            vec![approved(1000), approved(1600)],
            MockNotificationRepository::new(),
        );

        h.poller.tick().await;
        h.poller.tick().await;

        assert_eq!(h.sent.lock().unwrap().len(), 1);
        assert_eq!(h.poller.cursor(), 1600);
        assert_eq!(*h.requested.lock().unwrap(), vec![START, 1000]);
    }

    #[tokio::test]
    async fn test_empty_homeworks_sends_nothing() {
        let mut h = harness(
            vec![Ok(json!({"homeworks": [], "current_date": 900}))],
            MockNotificationRepository::new(),
        );

        let outcome = h.poller.run_cycle().await.unwrap();
        assert_eq!(
            outcome,
            CycleOutcome::NoHomeworks {
                current_date: Some(900)
            }
        );
        assert!(h.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_status_reported_once_without_advancing() {
        let unknown = || {
            Ok(json!({"homeworks": [{"homework_name": "proj1", "status": "unknown_status"}]}))
        };
        let mut h = harness(vec![unknown(), unknown()], MockNotificationRepository::new());

        h.poller.tick().await;
        h.poller.tick().await;

        assert_eq!(
            *h.sent.lock().unwrap(),
            vec!["Program failure: unexpected status value: `unknown_status`".to_string()]
        );
        assert_eq!(h.poller.cursor(), START);
    }

    #[tokio::test]
    async fn test_unknown_status_is_status_field_error() {
        let mut h = harness(
            vec![Ok(json!({"homeworks": [{"homework_name": "proj1", "status": "unknown_status"}]}))],
            MockNotificationRepository::new(),
        );

        let err = h.poller.run_cycle().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StatusField);
    }

    #[tokio::test]
    async fn test_missing_homeworks_sends_only_failure_text() {
        let mut h = harness(
            vec![Ok(json!({"current_date": 1000}))],
            MockNotificationRepository::new(),
        );

        h.poller.tick().await;

        assert_eq!(
            *h.sent.lock().unwrap(),
            vec!["Program failure: expected keys absent from API response: `homeworks`".to_string()]
        );
        assert_eq!(h.poller.cursor(), START);
    }

    #[tokio::test]
    async fn test_endpoint_unavailable_reports_status_code() {
        let mut h = harness(
            vec![Err(ClientError::unavailable(
                "https://example.test/api/",
                503,
                "Service Unavailable",
            ))],
            MockNotificationRepository::new(),
        );

        h.poller.tick().await;

        let sent = h.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("Program failure: "));
        assert!(sent[0].contains("503"));
    }

    #[tokio::test]
    async fn test_large_error_page_is_reported_once() {
        let page = "x".repeat(5013);
        let mut h = harness(
            vec![
                Err(ClientError::unavailable("https://example.test/api/", 503, page.clone())),
                Err(ClientError::unavailable("https://example.test/api/", 503, page)),
            ],
            MockNotificationRepository::new(),
        );

        h.poller.tick().await;
        h.poller.tick().await;

        let sent = h.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].chars().count() <= reviewbell_client::MAX_MESSAGE_CHARS);
        assert!(sent[0].contains("503"));
    }

    #[tokio::test]
    async fn test_latest_homework_wins_over_older() {
        let mut h = harness(
            vec![Ok(json!({
                "homeworks": [
                    {"homework_name": "proj2", "status": "reviewing"},
                    {"homework_name": "proj1", "status": "approved"}
                ],
                "current_date": 1000
            }))],
            MockNotificationRepository::new(),
        );

        h.poller.tick().await;

        assert_eq!(
            *h.sent.lock().unwrap(),
            vec!["Changed review status for \"proj2\". Работа взята на проверку ревьюером.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_malformed_older_homework_does_not_block_latest() {
        let mut h = harness(
            vec![Ok(json!({
                "homeworks": [
                    {"homework_name": "proj2", "status": "approved"},
                    {"homework_name": null, "status": "approved"},
                    42
                ],
                "current_date": 1000
            }))],
            MockNotificationRepository::new(),
        );

        h.poller.tick().await;

        assert_eq!(
            *h.sent.lock().unwrap(),
            vec!["Changed review status for \"proj2\". Работа проверена: ревьюеру всё понравилось. Ура!".to_string()]
        );
        assert_eq!(h.poller.cursor(), 1000);
    }

    #[tokio::test]
    async fn test_malformed_latest_homework_is_reported() {
        let mut h = harness(
            vec![Ok(json!({"homeworks": ["proj2"], "current_date": 1000}))],
            MockNotificationRepository::new(),
        );

        let err = h.poller.run_cycle().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(h.poller.cursor(), START);
    }

    #[tokio::test]
    async fn test_two_distinct_failures_are_both_sent() {
        let mut h = harness(
            vec![
                Err(ClientError::unavailable("https://example.test/api/", 503, "")),
                Err(ClientError::Decode("expected value".to_string())),
            ],
            MockNotificationRepository::new(),
        );

        h.poller.tick().await;
        h.poller.tick().await;

        assert_eq!(h.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_recovery_after_failure_notifies_status() {
        let mut h = harness(
            vec![
                approved(1000),
                Err(ClientError::Decode("expected value".to_string())),
                approved(1600),
            ],
            MockNotificationRepository::new(),
        );

        h.poller.tick().await;
        h.poller.tick().await;
        h.poller.tick().await;

        let sent = h.sent.lock().unwrap();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[2], APPROVED);
        assert_eq!(h.poller.cursor(), 1600);
    }

    #[tokio::test]
    async fn test_failed_delivery_does_not_advance_and_retries() {
        let mut h = harness(
            vec![approved(1000), approved(1000)],
            MockNotificationRepository::failing(1),
        );

        h.poller.tick().await;
        assert_eq!(h.poller.cursor(), START);
        assert!(h.sent.lock().unwrap().is_empty());

        h.poller.tick().await;
        assert_eq!(h.poller.cursor(), 1000);
        assert_eq!(*h.sent.lock().unwrap(), vec![APPROVED.to_string()]);
        assert_eq!(*h.requested.lock().unwrap(), vec![START, START]);
    }

    #[tokio::test]
    async fn test_missing_current_date_keeps_cursor() {
        let mut h = harness(
            vec![Ok(json!({"homeworks": [{"homework_name": "proj1", "status": "reviewing"}]}))],
            MockNotificationRepository::new(),
        );

        h.poller.tick().await;

        assert_eq!(h.sent.lock().unwrap().len(), 1);
        assert_eq!(h.poller.cursor(), START);
    }
}
