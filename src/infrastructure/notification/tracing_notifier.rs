use crate::application::ports::MutationNotifier;
use crate::domain::entities::{Notification, NotificationLevel};
use tracing::{info, warn};

/// 通知をログに出すだけの実装（CLI 用）
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl MutationNotifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Success => info!(
                resource = %notification.resource,
                mutation = %notification.mutation,
                "{}",
                notification.message
            ),
            NotificationLevel::Error => warn!(
                resource = %notification.resource,
                mutation = %notification.mutation,
                follow_up = ?notification.follow_up,
                "{}",
                notification.message
            ),
        }
    }
}
