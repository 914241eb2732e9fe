//! User-facing failure notifications.
//!
//! The cart store never notifies on its own. Callers that want the classic
//! "show a toast and carry on" behavior chain [`ReportExt::report`] onto an
//! operation result.

use crate::error::CartError;
use crate::store::Mutation;

/// Fire-and-forget sink for user-facing error messages.
pub trait Notifier {
    fn error(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn error(&self, message: &str) {
        (**self).error(message);
    }
}

/// Notifier that emits messages as `tracing` error events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::error!(target: "rocketshoes_cart::notify", "{message}");
    }
}

/// Turn a cart operation result into a notification.
pub trait ReportExt {
    /// Send the failure's user message to `notifier` and swallow the error.
    ///
    /// Returns the mutation on success, `None` on failure.
    fn report<N: Notifier + ?Sized>(self, notifier: &N) -> Option<Mutation>;
}

impl ReportExt for Result<Mutation, CartError> {
    fn report<N: Notifier + ?Sized>(self, notifier: &N) -> Option<Mutation> {
        match self {
            Ok(mutation) => Some(mutation),
            Err(e) => {
                tracing::debug!(error = %e, "Cart operation failed");
                notifier.error(e.user_message());
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use rocketshoes_core::ProductId;

    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl Notifier for Recorder {
        fn error(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn test_report_success_is_silent() {
        let recorder = Recorder::default();
        let result: Result<Mutation, CartError> = Ok(Mutation::Removed);
        assert_eq!(result.report(&recorder), Some(Mutation::Removed));
        assert!(recorder.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_report_failure_notifies_once() {
        let recorder = Recorder::default();
        let result: Result<Mutation, CartError> = Err(CartError::OutOfStock {
            product_id: ProductId::new(5),
            requested: 1,
            available: 0,
        });
        assert_eq!(result.report(&recorder), None);
        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec!["Requested quantity is out of stock".to_string()]
        );
    }

    #[test]
    fn test_report_through_trait_object() {
        let recorder = Recorder::default();
        let notifier: &dyn Notifier = &recorder;
        let result: Result<Mutation, CartError> = Err(CartError::NotFound(ProductId::new(1)));
        assert_eq!(result.report(notifier), None);
        assert_eq!(recorder.0.lock().unwrap().len(), 1);
    }
}
