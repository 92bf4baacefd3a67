//! Best-effort email fan-out.
//!
//! Every recipient is attempted concurrently; one failure never stops the
//! others. The caller gets a tally instead of an error.

use futures::future::join_all;
use serde::Serialize;

use super::email::{MailTransport, OutgoingEmail};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FanoutFailure {
    pub to: String,
    pub error: String,
}

/// Per-recipient outcome of a fan-out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FanoutReport {
    pub sent: usize,
    pub failed: usize,
    pub failures: Vec<FanoutFailure>,
}

impl FanoutReport {
    pub fn attempted(&self) -> usize {
        self.sent + self.failed
    }
}

/// Send every email through `transport`, collecting successes and failures.
pub async fn send_all(transport: &dyn MailTransport, emails: &[OutgoingEmail]) -> FanoutReport {
    let results = join_all(emails.iter().map(|email| transport.send(email))).await;

    let mut report = FanoutReport::default();
    for (email, result) in emails.iter().zip(results) {
        match result {
            Ok(()) => report.sent += 1,
            Err(e) => {
                tracing::warn!(to = %email.to, error = %e, "Email delivery failed");
                report.failed += 1;
                report.failures.push(FanoutFailure {
                    to: email.to.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::delivery::email::EmailError;

    /// Records deliveries and fails for addresses on the reject list.
    struct RecordingTransport {
        reject: Vec<&'static str>,
        delivered: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
            if self.reject.contains(&email.to.as_str()) {
                return Err(EmailError::Build("mailbox unavailable".to_string()));
            }
            self.delivered.lock().unwrap().push(email.to.clone());
            Ok(())
        }
    }

    fn email(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: to.to_string(),
            subject: "s".to_string(),
            body: "b".to_string(),
        }
    }

    #[tokio::test]
    async fn partial_failure_is_tallied_and_others_still_sent() {
        let transport = RecordingTransport {
            reject: vec!["b@example.com"],
            delivered: Mutex::new(Vec::new()),
        };
        let emails = vec![email("a@example.com"), email("b@example.com"), email("c@example.com")];

        let report = send_all(&transport, &emails).await;

        assert_eq!(report.sent, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.attempted(), 3);
        assert_eq!(report.failures[0].to, "b@example.com");
        assert!(report.failures[0].error.contains("mailbox unavailable"));

        let mut delivered = transport.delivered.lock().unwrap().clone();
        delivered.sort();
        assert_eq!(delivered, vec!["a@example.com", "c@example.com"]);
    }

    #[tokio::test]
    async fn empty_batch_reports_nothing() {
        let transport = RecordingTransport {
            reject: vec![],
            delivered: Mutex::new(Vec::new()),
        };
        let report = send_all(&transport, &[]).await;
        assert_eq!(report, FanoutReport::default());
    }
}
