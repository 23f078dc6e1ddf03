//! Clipboard access as an injected capability.
//!
//! The GUI implements [`ClipboardSink`] on top of the egui context; tests
//! substitute a recording (or failing) sink.

use crate::util::error::Result;

/// Destination for copied text.
pub trait ClipboardSink {
    /// Place `text` on the clipboard.
    ///
    /// # Errors
    /// Returns [`crate::util::error::LogSleuthError::Clipboard`] if the
    /// platform rejects the write.
    fn write_text(&mut self, text: String) -> Result<()>;
}

impl ClipboardSink for egui::Context {
    fn write_text(&mut self, text: String) -> Result<()> {
        self.copy_text(text);
        Ok(())
    }
}

/// Copy `text` through `sink`, logging the outcome.
///
/// Failures are logged and returned for the diagnostics list; they are
/// never retried.
pub fn copy_text(sink: &mut dyn ClipboardSink, text: String) -> Result<()> {
    let len = text.len();
    match sink.write_text(text) {
        Ok(()) => {
            tracing::debug!("Copied {} bytes to clipboard", len);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Could not copy text: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::LogSleuthError;

    #[derive(Default)]
    struct Recording(Vec<String>);

    impl ClipboardSink for Recording {
        fn write_text(&mut self, text: String) -> Result<()> {
            self.0.push(text);
            Ok(())
        }
    }

    struct Failing;

    impl ClipboardSink for Failing {
        fn write_text(&mut self, _text: String) -> Result<()> {
            Err(LogSleuthError::Clipboard("denied".into()))
        }
    }

    #[test]
    fn test_copy_records_text() {
        let mut sink = Recording::default();
        copy_text(&mut sink, "hello".into()).unwrap();
        assert_eq!(sink.0, vec!["hello".to_string()]);
    }

    #[test]
    fn test_copy_failure_is_returned() {
        let err = copy_text(&mut Failing, "hello".into()).unwrap_err();
        assert!(err.to_string().contains("denied"));
    }
}
