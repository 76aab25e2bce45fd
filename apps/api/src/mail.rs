//! Outbound transactional mail over SMTP.

use anyhow::{Context, Result};
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::Config;
use crate::errors::AppError;

#[derive(Clone)]
pub struct Mailer {
    transport: SmtpTransport,
    from: Mailbox,
    base_url: String,
}

impl Mailer {
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = SmtpTransport::relay(&config.smtp_host)
            .context("invalid SMTP host")?
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();
        let from: Mailbox = config
            .mail_from
            .parse()
            .context("MAIL_FROM must be a valid mailbox, e.g. `ResuCraft <noreply@example.com>`")?;
        Ok(Mailer {
            transport,
            from,
            base_url: config.app_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn send_verification(&self, to: &str, token: &str) -> Result<(), AppError> {
        let link = format!("{}/verify-email?token={token}", self.base_url);
        self.send(
            to,
            "Verify your email",
            format!(
                "Welcome to ResuCraft!\n\n\
                 Please confirm your email address by opening the link below:\n\n\
                 {link}\n\n\
                 The link expires in 24 hours. If you did not sign up, you can ignore this email.\n"
            ),
        )
    }

    pub fn send_password_reset(&self, to: &str, token: &str) -> Result<(), AppError> {
        let link = format!("{}/reset-password?token={token}", self.base_url);
        self.send(
            to,
            "Reset your password",
            format!(
                "We received a request to reset your password.\n\n\
                 {link}\n\n\
                 The link expires in 1 hour. If you did not request a reset, you can ignore this email.\n"
            ),
        )
    }

    fn send(&self, to: &str, subject: &str, body: String) -> Result<(), AppError> {
        let to: Mailbox = to
            .parse()
            .map_err(|_| AppError::Validation("Invalid recipient address".to_string()))?;
        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .body(body)
            .map_err(|e| AppError::Mail(e.to_string()))?;
        self.transport
            .send(&email)
            .map_err(|e| AppError::Mail(e.to_string()))?;
        Ok(())
    }
}
