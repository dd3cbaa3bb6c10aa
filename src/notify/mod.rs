pub mod emailjs;

use derive_more::Display;
use futures::future::BoxFuture;
use serde::Serialize;

use crate::model::leave_request::LeaveType;

/// Template parameters sent to the manager for a confirmed leave request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaveNotification {
    pub to_email: String,
    pub employee_name: String,
    pub leave_type: LeaveType,
    /// Already formatted for display
    pub start_date: String,
    pub end_date: String,
    pub total_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum NotifyError {
    /// The request never got a response.
    #[display(fmt = "{}", _0)]
    Transport(String),

    /// The service answered with a non-success status.
    #[display(fmt = "{} ({})", message, status)]
    Rejected { status: u16, message: String },
}

/// Outbound mail boundary. One attempt per call, no retries.
pub trait Notifier: Send + Sync {
    fn send<'a>(
        &'a self,
        notification: &'a LeaveNotification,
    ) -> BoxFuture<'a, Result<(), NotifyError>>;
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use futures::FutureExt;
    use std::sync::Mutex;

    /// Accepts everything and keeps a copy of what was sent.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub sent: Mutex<Vec<LeaveNotification>>,
    }

    impl RecordingNotifier {
        pub fn sent(&self) -> Vec<LeaveNotification> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn send<'a>(
            &'a self,
            notification: &'a LeaveNotification,
        ) -> BoxFuture<'a, Result<(), NotifyError>> {
            self.sent.lock().unwrap().push(notification.clone());
            futures::future::ready(Ok(())).boxed()
        }
    }

    /// Always fails with the given reason.
    pub struct FailingNotifier(pub NotifyError);

    impl Notifier for FailingNotifier {
        fn send<'a>(
            &'a self,
            _notification: &'a LeaveNotification,
        ) -> BoxFuture<'a, Result<(), NotifyError>> {
            futures::future::ready(Err(self.0.clone())).boxed()
        }
    }
}
