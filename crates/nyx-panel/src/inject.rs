//! Text injection into the host conversation.

/// Accepts text to be merged into the host conversation.
///
/// The panel does not know how the text is delivered.
pub trait InjectionSink {
    /// Hand over one piece of text.
    fn inject(&mut self, text: &str);
}

/// A sink that keeps everything it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    injected: Vec<String>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything injected so far, oldest first.
    pub fn injected(&self) -> &[String] {
        &self.injected
    }
}

impl InjectionSink for RecordingSink {
    fn inject(&mut self, text: &str) {
        self.injected.push(text.to_string());
    }
}

impl<T: InjectionSink + ?Sized> InjectionSink for &mut T {
    fn inject(&mut self, text: &str) {
        (**self).inject(text);
    }
}
