//! Outbound email for career decisions.
//!
//! Handlers talk to a [`Mailer`] so the SMTP transport can be swapped out in
//! tests. Message bodies live in [`templates`].

pub mod smtp;
pub mod templates;

use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub to_name: String,
    pub to_email: String,
    pub subject: String,
    pub html_body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<()>;
}

/// Tells the applicant their application was approved, with an interview
/// date one to seven days out.
pub async fn send_approval_email(mailer: &dyn Mailer, name: &str, email: &str) -> Result<()> {
    let mail = templates::approval(name, email, templates::random_appointment());
    mailer.send(&mail).await
}

pub async fn send_denial_email(mailer: &dyn Mailer, name: &str, email: &str) -> Result<()> {
    let mail = templates::denial(name, email);
    mailer.send(&mail).await
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Keeps every message instead of delivering it.
    #[derive(Default)]
    pub struct RecordingMailer {
        pub sent: Mutex<Vec<OutgoingMail>>,
    }

    impl RecordingMailer {
        pub fn sent(&self) -> Vec<OutgoingMail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, mail: &OutgoingMail) -> Result<()> {
            self.sent.lock().unwrap().push(mail.clone());
            Ok(())
        }
    }

    pub struct FailingMailer;

    #[async_trait]
    impl Mailer for FailingMailer {
        async fn send(&self, _mail: &OutgoingMail) -> Result<()> {
            anyhow::bail!("connection refused")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[actix_web::test]
    async fn approval_goes_to_the_applicant() {
        let mailer = RecordingMailer::default();
        send_approval_email(&mailer, "Priya", "priya@example.com").await.unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to_email, "priya@example.com");
        assert!(sent[0].html_body.contains("Dear Priya"));
        assert!(sent[0].html_body.contains("10:00 AM"));
    }

    #[actix_web::test]
    async fn transport_failure_is_reported() {
        let err = send_denial_email(&FailingMailer, "Priya", "priya@example.com")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
