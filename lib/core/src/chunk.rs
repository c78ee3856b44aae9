/// Default chunk width in characters
pub const DEFAULT_CHUNK_CHARS: usize = 800;

/// Split `text` into consecutive chunks of at most `max_chars` characters.
///
/// Splits on char boundaries, never inside a UTF-8 sequence. Empty input
/// yields no chunks; `max_chars == 0` is treated as 1.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let width = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut len = 0;

    for ch in text.chars() {
        current.push(ch);
        len += 1;
        if len == width {
            chunks.push(std::mem::take(&mut current));
            len = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
