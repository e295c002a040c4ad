use std::fmt::Display;

/// Channel through which fatal setup failures reach the user.
///
/// The default sink writes the message to the error log; tests inject
/// their own sinks to observe exactly when and how often it fires.
pub trait AlertSink {
    fn alert(&mut self, message: &str);
}

/// Default sink backed by `tracing`.
pub struct TracingAlert;

impl AlertSink for TracingAlert {
    fn alert(&mut self, message: &str) {
        tracing::error!("{message}");
    }
}

/// Surfaces a failed result through the sink exactly once, then hands the
/// error back unchanged.
pub(crate) fn fail_loud<T, E: Display>(sink: &mut dyn AlertSink, result: Result<T, E>) -> Result<T, E> {
    if let Err(err) = &result {
        sink.alert(&err.to_string());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSink {
        messages: Vec<String>,
    }

    impl AlertSink for CountingSink {
        fn alert(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
    }

    #[test]
    fn failure_alerts_exactly_once() {
        let mut sink = CountingSink::default();
        let result: Result<(), &str> = fail_loud(&mut sink, Err("no usable graphics context"));
        assert!(result.is_err());
        assert_eq!(sink.messages.len(), 1);
        assert!(sink.messages[0].contains("graphics context"));
    }

    #[test]
    fn success_stays_quiet() {
        let mut sink = CountingSink::default();
        let result: Result<u32, &str> = fail_loud(&mut sink, Ok(7));
        assert_eq!(result.unwrap(), 7);
        assert!(sink.messages.is_empty());
    }
}
