use crate::utils::trace_log;
use crate::ValidationError;

/// Sees every error before the [`crate::Validator`] records it.
///
/// Return the error to keep it, a different error to replace it, or `None` to drop it. The
/// validator may be shared between threads, hence the `Send + Sync` bound.
///
/// Closures of the form `Fn(ValidationError) -> Option<ValidationError>` implement this trait.
pub trait ValidationCallback: Send + Sync {
    /// Decide what happens to `error`.
    fn handle_error(&self, error: ValidationError) -> Option<ValidationError>;
}

impl<F> ValidationCallback for F
where
    F: Fn(ValidationError) -> Option<ValidationError> + Send + Sync,
{
    fn handle_error(&self, error: ValidationError) -> Option<ValidationError> {
        self(error)
    }
}

/// Collects the errors of one validation run, passing each through the callback once.
pub(crate) struct ErrorReporter<'v> {
    callback: Option<&'v dyn ValidationCallback>,
    errors: Vec<ValidationError>,
}

impl<'v> ErrorReporter<'v> {
    pub(crate) fn new(callback: Option<&'v dyn ValidationCallback>) -> Self {
        ErrorReporter {
            callback,
            errors: Vec::new(),
        }
    }

    pub(crate) fn report(&mut self, error: ValidationError) {
        trace_log!("report: {}", error);
        let error = match self.callback {
            Some(callback) => callback.handle_error(error),
            None => Some(error),
        };
        match error {
            Some(error) => self.errors.push(error),
            None => trace_log!("report: dropped by callback"),
        }
    }

    pub(crate) fn finish(self) -> Vec<ValidationError> {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorReason;

    #[test]
    fn without_callback_errors_are_kept() {
        let mut reporter = ErrorReporter::new(None);
        reporter.report(ValidationError::new(ErrorReason::UnknownTag, "x", 1));
        assert_eq!(reporter.finish().len(), 1);
    }

    #[test]
    fn callback_can_replace_and_drop() {
        let callback = |error: ValidationError| match error.reason {
            ErrorReason::UnknownTag => None,
            _ => Some(ValidationError {
                tag_name: error.tag_name.to_uppercase(),
                ..error
            }),
        };
        let mut reporter = ErrorReporter::new(Some(&callback));
        reporter.report(ValidationError::new(ErrorReason::UnknownTag, "x", 1));
        reporter.report(ValidationError::new(ErrorReason::UnclosedTag, "b", 4));

        let errors = reporter.finish();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].tag_name, "B");
        assert_eq!(errors[0].offset, 4);
    }
}
