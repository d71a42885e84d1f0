//! Speech domain module

mod audio_clip;
mod utterance;

pub use audio_clip::{AudioClip, AudioMimeType};
pub use utterance::{
    normalize, parse_number_words, spell_digit_words, spell_email_words, Utterance,
};
