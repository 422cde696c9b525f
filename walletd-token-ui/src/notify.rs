//! Toast notifications.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// How loud a notification is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Info,
    Success,
}

impl Severity {
    /// Title shown above the message
    pub fn title(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Info => "Info",
            Severity::Success => "Message",
        }
    }

    /// How long a toast of this severity stays visible
    pub fn lifetime(&self) -> Duration {
        match self {
            Severity::Error => Duration::from_millis(5000),
            Severity::Info | Severity::Success => Duration::from_millis(3000),
        }
    }
}

/// One toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub duration: Duration,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: severity.title().to_string(),
            message: message.into(),
            duration: severity.lifetime(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }
}

/// Where the session sends user-facing messages. Fire and forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn error(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notification::error(message));
    }

    fn info(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notification::info(message));
    }

    fn success(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notification::success(message));
    }
}

/// Shared board of timed toasts. Clones see the same toasts.
#[derive(Debug, Clone, Default)]
pub struct ToastBoard {
    toasts: Arc<Mutex<Vec<(Instant, Notification)>>>,
}

impl ToastBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts `notification` as if it had been raised at `at`
    pub fn post_at(&self, notification: Notification, at: Instant) {
        self.toasts.lock().push((at, notification));
    }

    /// Toasts still visible at `now`, oldest first. Expired ones are dropped.
    pub fn active(&self, now: Instant) -> Vec<Notification> {
        let mut toasts = self.toasts.lock();
        toasts.retain(|(posted, n)| now.saturating_duration_since(*posted) < n.duration);
        toasts.iter().map(|(_, n)| n.clone()).collect()
    }
}

impl Notifier for ToastBoard {
    fn notify(&self, notification: Notification) {
        self.post_at(notification, Instant::now());
    }
}

/// Logs toasts through `tracing` and keeps them on a [`ToastBoard`] for the view.
#[derive(Debug, Clone)]
pub struct ConsoleNotifier {
    board: ToastBoard,
}

impl ConsoleNotifier {
    pub fn new(board: ToastBoard) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &ToastBoard {
        &self.board
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Error => tracing::error!(title = %notification.title, "{}", notification.message),
            Severity::Info | Severity::Success => {
                tracing::info!(title = %notification.title, "{}", notification.message)
            }
        }
        self.board.notify(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_titles_and_lifetimes() {
        let error = Notification::error("boom");
        assert_eq!(error.title, "Error");
        assert_eq!(error.duration, Duration::from_millis(5000));

        let info = Notification::info("sent");
        assert_eq!(info.title, "Info");
        assert_eq!(info.duration, Duration::from_millis(3000));

        let success = Notification::success("done");
        assert_eq!(success.title, "Message");
        assert_eq!(success.duration, Duration::from_millis(3000));
    }

    #[test]
    fn test_toasts_expire_by_severity() {
        let board = ToastBoard::new();
        let start = Instant::now();
        board.post_at(Notification::error("long"), start);
        board.post_at(Notification::info("short"), start);

        assert_eq!(board.active(start).len(), 2);

        let later = start + Duration::from_millis(4000);
        let active = board.active(later);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "long");

        assert!(board.active(start + Duration::from_millis(5000)).is_empty());
    }

    #[test]
    fn test_clones_share_toasts() {
        let board = ToastBoard::new();
        let notifier = ConsoleNotifier::new(board.clone());
        notifier.error("Wallet provider not installed");
        notifier.info("Transaction sent successfully");

        let active = board.active(Instant::now());
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].severity, Severity::Error);
        assert_eq!(notifier.board().active(Instant::now()).len(), 2);
    }

    #[test]
    fn test_console_notifier_delivers_once() {
        let board = ToastBoard::new();
        let notifier = ConsoleNotifier::new(board.clone());
        notifier.success("Minted");

        let active = board.active(Instant::now());
        assert_eq!(active, vec![Notification::success("Minted")]);
    }

    #[test]
    fn test_no_dedup() {
        let board = ToastBoard::new();
        board.error("same");
        board.error("same");
        assert_eq!(board.active(Instant::now()).len(), 2);
    }
}
