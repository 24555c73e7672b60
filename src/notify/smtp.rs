use super::{Mailer, OutgoingMail};
use crate::config::EmailConfig;
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{info, warn};

pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        if !self.config.is_configured() {
            warn!(to = %mail.to_email, "Email not configured, nothing delivered");
            bail!("email transport is not configured");
        }

        let from_address = self
            .config
            .smtp_username
            .as_ref()
            .ok_or_else(|| anyhow!("Sender address not configured"))?;

        let from = Mailbox::new(Some(self.config.from_name.clone()), from_address.parse()?);
        let to = Mailbox::new(Some(mail.to_name.clone()), mail.to_email.parse()?);

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(&mail.subject)
            .header(ContentType::TEXT_HTML)
            .body(mail.html_body.clone())?;

        let mut transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)?
            .port(self.config.smtp_port);

        if let (Some(username), Some(password)) =
            (&self.config.smtp_username, &self.config.smtp_password)
        {
            transport = transport.credentials(Credentials::new(username.clone(), password.clone()));
        }

        transport.build().send(email).await?;

        info!(to = %mail.to_email, subject = %mail.subject, "Email sent");
        Ok(())
    }
}
