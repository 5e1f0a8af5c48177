use std::borrow::Cow;

/// Change watcher error type.
#[densite_derive::densite_error]
pub enum WatcherError {
    /// `start()` was called while the polling task is already live.
    #[error("Already running{}: {message}", format_context(.context))]
    AlreadyRunning { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
