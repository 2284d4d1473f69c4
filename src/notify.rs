use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

use crate::config::SmtpConfig;
use crate::error::{Error, Result};

/// Delivers a transition message to the operator.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    /// Sends `message` about the site at `url`. Not retried by callers.
    ///
    /// # Errors
    ///
    /// Fails when the transport cannot connect, authenticate or deliver.
    async fn notify(&self, url: &str, message: &str) -> Result<()>;
}

/// Subject line of the mail sent for `url`.
pub fn subject_for(url: &str) -> String {
    format!("Site status change: {url}")
}

/// Sends one mail per notification over SMTPS with username/password auth.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    /// Builds the transport; no connection is made until the first send.
    ///
    /// # Errors
    ///
    /// Fails on an invalid relay host, sender or receiver address, or when
    /// the password was never resolved.
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let password = config
            .password
            .clone()
            .ok_or_else(|| Error::Config("SMTP password is not set".into()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(config.username.clone(), password))
            .timeout(Some(Duration::from_secs(30)))
            .build();

        Ok(Self {
            transport,
            from: config.sender().parse()?,
            to: config.receiver.parse()?,
        })
    }

    fn build_message(&self, url: &str, message: &str) -> Result<Message> {
        Ok(Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject_for(url))
            .header(ContentType::TEXT_PLAIN)
            .body(message.to_string())?)
    }
}

impl Notifier for SmtpNotifier {
    async fn notify(&self, url: &str, message: &str) -> Result<()> {
        let email = self.build_message(url, message)?;
        self.transport.send(email).await?;
        Ok(())
    }
}
