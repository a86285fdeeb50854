//! Progress-sink abstraction.

/// Receives human-readable progress lines during publishing.
///
/// Purely cosmetic: correctness never depends on a reporter being attached.
/// The CLI supplies a console-backed implementation; embedded callers can
/// leave the default [`NullReporter`] in place.
pub trait Reporter: Send + Sync {
    /// Report one progress line.
    fn report(&self, line: &str);
}

/// Reporter that discards all lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _line: &str) {}
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct Recording(Mutex<Vec<String>>);

    impl Reporter for Recording {
        fn report(&self, line: &str) {
            self.0.lock().unwrap().push(line.to_owned());
        }
    }

    #[test]
    fn test_null_reporter_discards() {
        NullReporter.report("anything");
    }

    #[test]
    fn test_custom_reporter_receives_lines() {
        let reporter = Recording(Mutex::new(Vec::new()));

        reporter.report("Published version 1.0 of Alpha.");

        assert_eq!(
            *reporter.0.lock().unwrap(),
            vec!["Published version 1.0 of Alpha."]
        );
    }
}
