//! Speech capabilities injected into the HTTP layer.
//!
//! The answer engine only ever sees text; audio is turned into a transcript
//! before it reaches the engine and answers are voiced afterwards.

/// Speech-to-text. Returns an empty string when nothing could be understood.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio: &[u8]) -> String;
}

/// Text-to-speech. Returns encoded audio, or no bytes on failure.
pub trait Synthesizer: Send + Sync {
    fn synthesize(&self, text: &str) -> Vec<u8>;
}

/// Backend used when no speech provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeech;

impl Transcriber for NoSpeech {
    fn transcribe(&self, audio: &[u8]) -> String {
        tracing::debug!(bytes = audio.len(), "no speech-to-text backend configured");
        String::new()
    }
}

impl Synthesizer for NoSpeech {
    fn synthesize(&self, _text: &str) -> Vec<u8> {
        Vec::new()
    }
}
