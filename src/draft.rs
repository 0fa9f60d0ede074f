//! Pre-commit edit buffer and the speech-capture capability it consumes.
//!
//! A [`Draft`] is scratch state: typing and dictation only change the
//! buffer, and nothing reaches the store until [`Draft::commit`].

use log::{debug, warn};
use std::fmt;

use crate::domain::{Note, NoteId};
use crate::store::{NoteStore, StoreResult};

/// Which draft field dictated text goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureTarget {
    Title,
    Content,
}

impl fmt::Display for CaptureTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Content => write!(f, "content"),
        }
    }
}

/// Why a capture session ended early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureErrorKind {
    NotSupported,
    PermissionDenied,
    NoSpeech,
    Other(String),
}

impl fmt::Display for CaptureErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSupported => write!(f, "speech capture is not supported"),
            Self::PermissionDenied => write!(f, "microphone permission denied"),
            Self::NoSpeech => write!(f, "no speech detected"),
            Self::Other(reason) => write!(f, "{}", reason),
        }
    }
}

/// Something a speech-capture service reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Recognized text for the field being captured.
    Result(String),
    Error(CaptureErrorKind),
}

/// A speech-to-text service. Results arrive later through
/// [`Draft::on_capture`].
pub trait SpeechCapture {
    fn start(&mut self, target: CaptureTarget) -> Result<(), CaptureErrorKind>;
    fn stop(&mut self);
}

/// The edit buffer behind a note form.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    editing: Option<NoteId>,
    title: String,
    category: String,
    content: String,
    default_category: String,
    listening: Option<CaptureTarget>,
    last_capture_error: Option<CaptureErrorKind>,
}

impl Draft {
    /// An empty buffer for a new note, filed under `default_category`.
    pub fn new(default_category: impl Into<String>) -> Self {
        let default_category = default_category.into();
        Self {
            editing: None,
            title: String::new(),
            category: default_category.clone(),
            content: String::new(),
            default_category,
            listening: None,
            last_capture_error: None,
        }
    }

    /// A buffer preloaded from an existing note.
    pub fn editing(note: &Note, default_category: impl Into<String>) -> Self {
        Self {
            editing: Some(note.id().clone()),
            title: note.title().to_string(),
            category: note.category().to_string(),
            content: note.content().to_string(),
            ..Self::new(default_category)
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn editing_id(&self) -> Option<&NoteId> {
        self.editing.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// The field currently receiving dictation, if any.
    pub fn listening(&self) -> Option<CaptureTarget> {
        self.listening
    }

    pub fn last_capture_error(&self) -> Option<&CaptureErrorKind> {
        self.last_capture_error.as_ref()
    }

    /// Starts dictation into `target`, stopping any capture in progress.
    pub fn start_capture<S: SpeechCapture + ?Sized>(
        &mut self,
        service: &mut S,
        target: CaptureTarget,
    ) -> Result<(), CaptureErrorKind> {
        if self.listening.is_some() {
            service.stop();
        }
        self.listening = None;
        self.last_capture_error = None;

        match service.start(target) {
            Ok(()) => {
                debug!("event=capture_start target={}", target);
                self.listening = Some(target);
                Ok(())
            }
            Err(kind) => {
                warn!("event=capture_start target={} status=error error={}", target, kind);
                self.last_capture_error = Some(kind.clone());
                Err(kind)
            }
        }
    }

    pub fn stop_capture<S: SpeechCapture + ?Sized>(&mut self, service: &mut S) {
        if self.listening.take().is_some() {
            service.stop();
        }
    }

    /// Applies a capture event. Recognized text is appended to the listening
    /// field, space-separated; errors end the capture. Events that arrive
    /// while nothing is listening are dropped.
    pub fn on_capture(&mut self, event: CaptureEvent) {
        let Some(target) = self.listening else {
            debug!("event=capture_result status=ignored");
            return;
        };

        match event {
            CaptureEvent::Result(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return;
                }
                let field = match target {
                    CaptureTarget::Title => &mut self.title,
                    CaptureTarget::Content => &mut self.content,
                };
                if !field.is_empty() && !field.ends_with(char::is_whitespace) {
                    field.push(' ');
                }
                field.push_str(text);
            }
            CaptureEvent::Error(kind) => {
                warn!("event=capture_error target={} error={}", target, kind);
                self.listening = None;
                self.last_capture_error = Some(kind);
            }
        }
    }

    /// Writes the buffer to the store: `update` when editing an existing
    /// note, `create` otherwise.
    ///
    /// On success the buffer resets to an empty new-note state. On failure
    /// the buffer is left as it was so the user can fix it.
    pub fn commit(&mut self, store: &mut NoteStore) -> StoreResult<Note> {
        let note = match &self.editing {
            Some(id) => store.update(id, &self.title, &self.category, &self.content)?,
            None => store.create(&self.title, &self.category, &self.content)?,
        };
        self.reset();
        Ok(note)
    }

    /// Discards the buffer and starts a new note.
    pub fn reset(&mut self) {
        *self = Self::new(std::mem::take(&mut self.default_category));
    }
}
