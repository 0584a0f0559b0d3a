use tokenburn_traits::{Notifier, ToastSeverity};

/// [`Notifier`] that turns toasts into log events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show_toast(&self, message: &str, severity: ToastSeverity) {
        match severity {
            ToastSeverity::Info | ToastSeverity::Success => tracing::info!(toast = %message),
            ToastSeverity::Warning => tracing::warn!(toast = %message),
            ToastSeverity::Error => tracing::error!(toast = %message),
        }
    }
}
