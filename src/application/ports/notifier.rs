use crate::domain::entities::Notification;

/// 変更結果の通知先（トースト UI、ログ、購読チャネルなど）
pub trait MutationNotifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}
