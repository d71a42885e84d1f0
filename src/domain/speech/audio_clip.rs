//! Audio clip value object

/// Encodings the banking service accepts for speech uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioMimeType {
    M4a,
    Wav,
}

impl AudioMimeType {
    /// MIME string declared on the multipart upload
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::M4a => "audio/m4a",
            Self::Wav => "audio/wav",
        }
    }

    /// File name the upload part carries
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::M4a => "speech.m4a",
            Self::Wav => "speech.wav",
        }
    }
}

/// One captured utterance, encoded and ready for transcription.
#[derive(Debug, Clone)]
pub struct AudioClip {
    data: Vec<u8>,
    mime_type: AudioMimeType,
}

impl AudioClip {
    /// Wrap a 16-bit PCM WAV recording
    pub fn wav(data: Vec<u8>) -> Self {
        Self {
            data,
            mime_type: AudioMimeType::Wav,
        }
    }

    /// Wrap an AAC recording in an MPEG-4 container
    pub fn m4a(data: Vec<u8>) -> Self {
        Self {
            data,
            mime_type: AudioMimeType::M4a,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn mime_type(&self) -> AudioMimeType {
        self.mime_type
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// True when the capture produced no audio at all
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
