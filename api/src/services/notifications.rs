//! Result notification dispatcher.
//!
//! The aggregation engine publishes [`ResultEvent`]s after a result commits.
//! The dispatcher task drains that channel and hands each notification to a
//! [`Notifier`]. Delivery failures are logged and dropped; they never reach the
//! engine or the request that triggered the approval.

use std::sync::Arc;

use async_trait::async_trait;
use db::events::{ResultEvent, ResultNotification};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use util::config::AppConfig;

use crate::services::email::{EmailError, EmailService};

/// Delivers a finalized result to the student.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &ResultNotification) -> Result<(), EmailError>;
}

/// Sends result emails over SMTP.
pub struct EmailNotifier;

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, notification: &ResultNotification) -> Result<(), EmailError> {
        EmailService::send_result_email(notification).await
    }
}

/// Records notifications in the log only. Used when SMTP is not configured.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &ResultNotification) -> Result<(), EmailError> {
        info!(
            to = %notification.student_email,
            key = %notification.key(),
            total = notification.total_marks,
            pass_status = %notification.pass_status,
            "Result notification (email disabled)"
        );
        Ok(())
    }
}

/// Picks the email notifier when SMTP credentials are configured.
pub fn default_notifier() -> Arc<dyn Notifier> {
    if AppConfig::global().email_enabled() {
        Arc::new(EmailNotifier)
    } else {
        warn!("GMAIL_USERNAME/GMAIL_APP_PASSWORD not set; result emails will only be logged");
        Arc::new(LogNotifier)
    }
}

/// Spawns the dispatcher. The task ends once every sender has been dropped.
pub fn spawn_dispatcher(
    mut events: UnboundedReceiver<ResultEvent>,
    notifier: Arc<dyn Notifier>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            dispatch(&event, notifier.as_ref()).await;
        }
        debug!("Result event channel closed; dispatcher stopping");
    })
}

async fn dispatch(event: &ResultEvent, notifier: &dyn Notifier) {
    let notification = event.notification();

    if notification.student_email.trim().is_empty() {
        warn!(
            key = %notification.key(),
            "No student email on record; skipping {}",
            event.event_type()
        );
        return;
    }

    if let Err(e) = notifier.notify(notification).await {
        error!(
            key = %notification.key(),
            to = %notification.student_email,
            "Failed to deliver {}: {e}",
            event.event_type()
        );
    }
}
