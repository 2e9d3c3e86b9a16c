// src/notify/smtp.rs

//! SMTP notification via an authenticated relay.

use chrono::Local;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::error::{AppError, Result};
use crate::models::EmailConfig;
use crate::notify::{MenuNotification, Notifier};

/// Sends the menu PDF by email over SMTP with STARTTLS.
pub struct SmtpNotifier {
    config: EmailConfig,
}

impl SmtpNotifier {
    /// Create a notifier for the given relay settings.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, notification: &MenuNotification<'_>) -> Result<Message> {
        let now = Local::now();
        let subject = format!(
            "New Menu Available - {} - {}",
            notification.section,
            now.format("%Y-%m-%d")
        );
        let body = format!(
            "Hello,\n\n\
             A new menu is available for {}.\n\n\
             Menu URL: {}\n\
             Downloaded: {}\n\n\
             Please find the PDF attached.\n\n\
             Gudden Appetit!\n",
            notification.section,
            notification.pdf_url,
            now.format("%Y-%m-%d %H:%M:%S")
        );

        let filename = notification
            .pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "menu.pdf".to_string());
        let content_type = ContentType::parse("application/pdf")
            .map_err(|e| AppError::transport(format!("invalid attachment type: {e}")))?;
        let attachment =
            Attachment::new(filename).body(notification.pdf_bytes.to_vec(), content_type);

        let mut builder = Message::builder()
            .from(self.config.from.parse()?)
            .subject(subject);
        for recipient in &self.config.to {
            builder = builder.to(recipient.parse()?);
        }

        Ok(builder.multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(body))
                .singlepart(attachment),
        )?)
    }
}

impl Notifier for SmtpNotifier {
    fn notify(&self, notification: &MenuNotification<'_>) -> Result<()> {
        let message = self.build_message(notification)?;

        let mailer = SmtpTransport::starttls_relay(&self.config.smtp_server)?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .build();

        mailer.send(&message)?;
        log::info!("Email sent to {}", self.config.to.join(", "));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn email_config() -> EmailConfig {
        EmailConfig {
            from: "menu@example.com".into(),
            to: vec!["a@example.com".into(), "b@example.com".into()],
            smtp_server: "smtp.example.com".into(),
            smtp_port: 587,
            username: "menu@example.com".into(),
            password: "secret".into(),
        }
    }

    fn notification<'a>() -> MenuNotification<'a> {
        MenuNotification {
            section: "SEA Gonderange/ Bourglinster",
            pdf_url: "https://paiperlek.lu/files/menu_gonderange.pdf",
            pdf_path: Path::new("menus/menu_20240101_120000.pdf"),
            pdf_bytes: b"%PDF-1.4 menu",
        }
    }

    #[test]
    fn test_message_carries_all_recipients() {
        let notifier = SmtpNotifier::new(email_config());
        let message = notifier.build_message(&notification()).unwrap();

        let recipients: Vec<String> = message
            .envelope()
            .to()
            .iter()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(recipients, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn test_message_body_mentions_section_and_url() {
        let notifier = SmtpNotifier::new(email_config());
        let message = notifier.build_message(&notification()).unwrap();

        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("SEA Gonderange/ Bourglinster"));
        assert!(formatted.contains("menu_gonderange.pdf"));
        // Attachment named after the on-disk file
        assert!(formatted.contains("menu_20240101_120000.pdf"));
    }

    #[test]
    fn test_invalid_from_address_is_an_error() {
        let mut config = email_config();
        config.from = "not an address".into();
        let notifier = SmtpNotifier::new(config);

        assert!(notifier.build_message(&notification()).is_err());
    }
}
