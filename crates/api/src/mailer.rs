//! Outbound email with bounded retry.
//!
//! Messages are sent over SMTP via lettre. Transient transport failures are
//! retried with a linear backoff before giving up; callers treat a final
//! failure as an internal error and decide whether to roll back the work
//! that triggered the mail (the register flow does).

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailConfig;

/// Maximum delivery attempts per message.
const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("Failed to send email after {MAX_ATTEMPTS} attempts: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// SMTP mailer shared through [`crate::state::AppState`].
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    sandbox: bool,
}

impl Mailer {
    /// Build a mailer from configuration.
    ///
    /// Credentials are optional; without a username the transport connects
    /// unauthenticated (local relay / development).
    pub fn from_config(config: &MailConfig) -> Result<Self, MailerError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port);

        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from: config.from_address.parse()?,
            sandbox: config.sandbox,
        })
    }

    /// Send the account-activation email.
    pub async fn send_invitation(&self, to: &str, activation_url: &str) -> Result<(), MailerError> {
        let body = format!(
            "Welcome to Timeclock!\n\n\
             Activate your account by visiting:\n\n{activation_url}\n\n\
             The link expires in a few days. If you did not register, you can\n\
             ignore this email."
        );
        self.send("Activate your Timeclock account", to, body).await
    }

    /// Send the password-reset email.
    pub async fn send_password_reset(&self, to: &str, reset_url: &str) -> Result<(), MailerError> {
        let body = format!(
            "A password reset was requested for your Timeclock account.\n\n\
             Reset your password by visiting:\n\n{reset_url}\n\n\
             If you did not request this, you can ignore this email."
        );
        self.send("Reset your Timeclock password", to, body).await
    }

    async fn send(&self, subject: &str, to: &str, body: String) -> Result<(), MailerError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject)
            .body(body)?;

        if self.sandbox {
            tracing::info!(to, subject, "mail sandbox enabled, skipping delivery");
            return Ok(());
        }

        let mut attempt = 1;
        loop {
            match self.transport.send(message.clone()).await {
                Ok(_) => {
                    tracing::info!(to, subject, attempt, "email sent");
                    return Ok(());
                }
                Err(err) if attempt < MAX_ATTEMPTS => {
                    tracing::warn!(to, subject, attempt, error = %err, "email send failed");
                    // Linear backoff between attempts.
                    tokio::time::sleep(std::time::Duration::from_secs(u64::from(attempt))).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::warn!(to, subject, attempt, error = %err, "email send failed");
                    return Err(MailerError::Transport(err));
                }
            }
        }
    }
}
