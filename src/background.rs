use std::sync::Arc;
use tokio::sync::mpsc::Receiver;
use tracing::{error, info, info_span, Instrument};
use crate::domain::models::mail::MailData;
use crate::domain::ports::EmailService;

/// Drains the mail queue until every sender is gone. Delivery is best effort:
/// a failed send is logged and the worker moves on.
pub async fn start_mail_worker(mut rx: Receiver<MailData>, email_service: Arc<dyn EmailService>) {
    info!("Starting mail worker...");

    while let Some(mail) = rx.recv().await {
        let span = info_span!("mail_delivery", to = %mail.to, subject = %mail.subject);

        async {
            match email_service.send(&mail).await {
                Ok(()) => info!("Mail delivered"),
                Err(e) => error!("Mail delivery failed: {}", e),
            }
        }
            .instrument(span)
            .await;
    }

    info!("Mail queue closed, mail worker stopping");
}
