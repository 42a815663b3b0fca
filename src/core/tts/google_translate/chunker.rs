//! Text splitting for the Google Translate TTS endpoint.
//!
//! The endpoint only accepts short inputs, so text is packed into chunks of at
//! most [`MAX_CHUNK_CHARS`] characters, breaking on whitespace. Words longer
//! than a chunk are split on character boundaries.

/// Longest input accepted per `translate_tts` request
pub const MAX_CHUNK_CHARS: usize = 100;

pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        for piece in split_long_word(word, max_chars) {
            let piece_len = piece.chars().count();
            let needed = if current.is_empty() {
                piece_len
            } else {
                current_len + 1 + piece_len
            };

            if needed > max_chars && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(piece);
            current_len += piece_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn split_long_word(word: &str, max_chars: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in word.char_indices() {
        if count == max_chars {
            pieces.push(&word[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < word.len() {
        pieces.push(&word[start..]);
    }
    pieces
}
