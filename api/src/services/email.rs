//! Email service for result notifications.
//!
//! Sends mail over Gmail SMTP with the `lettre` crate. Credentials come from
//! `GMAIL_USERNAME` and `GMAIL_APP_PASSWORD`; when either is missing no
//! transport is built and [`EmailService::send_result_email`] fails fast.

use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{
    AsyncTransport, Tokio1Executor,
    message::{Message, MultiPart, SinglePart, header},
    transport::smtp::{AsyncSmtpTransport, authentication::Credentials},
};
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde_json::json;
use util::config::AppConfig;

use db::events::ResultNotification;

pub type EmailError = Box<dyn std::error::Error + Send + Sync>;

/// Global SMTP client, built on first use. `None` when SMTP is not configured.
static SMTP_CLIENT: Lazy<Option<AsyncSmtpTransport<Tokio1Executor>>> = Lazy::new(|| {
    let config = AppConfig::global();
    if !config.email_enabled() {
        return None;
    }

    let tls_parameters = match TlsParameters::new("smtp.gmail.com".to_string()) {
        Ok(params) => params,
        Err(e) => {
            tracing::error!("Failed to create TLS parameters: {e}");
            return None;
        }
    };

    match AsyncSmtpTransport::<Tokio1Executor>::relay("smtp.gmail.com") {
        Ok(builder) => Some(
            builder
                .port(587)
                .tls(Tls::Required(tls_parameters))
                .credentials(Credentials::new(
                    config.gmail_username.clone(),
                    config.gmail_app_password.clone(),
                ))
                .build(),
        ),
        Err(e) => {
            tracing::error!("Failed to create SMTP transport: {e}");
            None
        }
    }
});

/// Service for handling email-related operations.
pub struct EmailService;

impl EmailService {
    /// Emails a student their finalized semester result.
    ///
    /// The message has a plain-text and an HTML part with the subject
    /// breakdown, totals, pass status and attendance eligibility.
    pub async fn send_result_email(notification: &ResultNotification) -> Result<(), EmailError> {
        let client = SMTP_CLIENT
            .as_ref()
            .ok_or("SMTP is not configured")?;

        let (from_email, from_name) = {
            let config = AppConfig::global();
            (config.gmail_username.clone(), config.email_from_name.clone())
        };

        let html = Self::result_html(notification)?;

        let email = Message::builder()
            .from(format!("{from_name} <{from_email}>").parse()?)
            .to(notification.student_email.parse()?)
            .subject(Self::result_subject(notification))
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(Self::result_text(notification, &from_name)),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )?;

        client.send(email).await?;
        Ok(())
    }

    pub fn result_subject(notification: &ResultNotification) -> String {
        format!("Your {} result has been published", notification.semester)
    }

    pub fn result_text(notification: &ResultNotification, from_name: &str) -> String {
        let subjects: String = notification
            .subjects
            .iter()
            .map(|s| format!("  {}: {}\n", s.subject_name, s.marks))
            .collect();

        format!(
            "Dear {name},\n\n\
            Your result for semester {semester} ({branch}, {reg}) is now available.\n\n\
            {subjects}\n\
            Total: {total}\n\
            Percentage: {percentage:.2}%\n\
            Status: {status}\n\
            Attendance eligibility: {eligibility}\n\n\
            Best regards,\n\
            {from_name}",
            name = notification.student_name,
            semester = notification.semester,
            branch = notification.branch,
            reg = notification.register_number,
            total = notification.total_marks,
            percentage = notification.percentage,
            status = notification.pass_status,
            eligibility = notification.attendance_eligibility,
        )
    }

    /// Renders the HTML part. Every value is HTML-escaped by the template engine.
    pub fn result_html(notification: &ResultNotification) -> Result<String, EmailError> {
        let data = json!({
            "name": notification.student_name,
            "semester": notification.semester,
            "subjects": notification.subjects,
            "total": notification.total_marks,
            "percentage": format!("{:.2}", notification.percentage),
            "status": notification.pass_status.to_string(),
            "eligibility": notification.attendance_eligibility.to_string(),
        });

        Ok(Handlebars::new().render_template(RESULT_HTML_TEMPLATE, &data)?)
    }
}

const RESULT_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #333;">
    <h2>Semester {{semester}} result</h2>
    <p>Dear {{name}},</p>
    <table border="1" cellpadding="6" cellspacing="0">
        <tr><th>Subject</th><th>Marks</th></tr>
        {{#each subjects}}
        <tr><td>{{subject_name}}</td><td>{{marks}}</td></tr>
        {{/each}}
    </table>
    <p>Total: <strong>{{total}}</strong> ({{percentage}}%)</p>
    <p>Status: <strong>{{status}}</strong></p>
    <p>Attendance eligibility: {{eligibility}}</p>
</body>
</html>"#;
