use crate::application::ports::MutationNotifier;
use crate::domain::entities::Notification;
use tokio::sync::broadcast;
use tracing::trace;

/// UI などの購読者へ通知を配信する
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: broadcast::Sender<Notification>,
}

impl ChannelNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl MutationNotifier for ChannelNotifier {
    fn notify(&self, notification: &Notification) {
        // 購読者がいなければ捨てる
        if self.sender.send(notification.clone()).is_err() {
            trace!(message = %notification.message, "Notification dropped: no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{MutationKind, ResourceKind};

    #[tokio::test]
    async fn subscribers_receive_notifications() {
        let notifier = ChannelNotifier::new(8);
        let mut rx = notifier.subscribe();

        notifier.notify(&Notification::success(ResourceKind::Story, MutationKind::Update));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.message, "Story updated");
    }

    #[test]
    fn notify_without_subscribers_does_not_panic() {
        let notifier = ChannelNotifier::new(1);
        notifier.notify(&Notification::failure(
            ResourceKind::Board,
            MutationKind::Create,
            "boom",
        ));
        assert_eq!(notifier.receiver_count(), 0);
    }
}
