use crate::domain::models::mail::MailData;
use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};
use tracing::{debug, error, warn};

/// Producer side of the outbound mail channel. Sending never blocks a request:
/// when the worker falls behind and the buffer is full the message is dropped.
#[derive(Clone)]
pub struct MailQueue {
    tx: Sender<MailData>,
}

impl MailQueue {
    pub fn bounded(capacity: usize) -> (Self, Receiver<MailData>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Returns whether the message was accepted by the queue.
    pub fn enqueue(&self, mail: MailData) -> bool {
        match self.tx.try_send(mail) {
            Ok(()) => {
                debug!("Mail queued");
                true
            }
            Err(TrySendError::Full(mail)) => {
                warn!(to = %mail.to, subject = %mail.subject, "Mail queue full, dropping message");
                false
            }
            Err(TrySendError::Closed(mail)) => {
                error!(to = %mail.to, subject = %mail.subject, "Mail worker stopped, dropping message");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail(to: &str) -> MailData {
        MailData { to: to.into(), from: "me@here.com".into(), subject: "s".into(), content: "c".into() }
    }

    #[tokio::test]
    async fn drops_when_full_instead_of_blocking() {
        let (queue, mut rx) = MailQueue::bounded(1);
        assert!(queue.enqueue(mail("a@x.com")));
        assert!(!queue.enqueue(mail("b@x.com")));
        assert_eq!(rx.recv().await.unwrap().to, "a@x.com");
        assert!(queue.enqueue(mail("c@x.com")));
    }

    #[tokio::test]
    async fn drops_when_worker_is_gone() {
        let (queue, rx) = MailQueue::bounded(4);
        drop(rx);
        assert!(!queue.enqueue(mail("a@x.com")));
    }
}
