// file: src/parser/chunker.rs
// description: sentence-aware splitting of page text into overlapping chunks
// reference: chunk boundaries prefer sentence, then paragraph, then word breaks

/// Splits text into chunks of at most `chunk_size` characters where each
/// chunk after the first re-reads up to `chunk_overlap` characters of the
/// previous one.
#[derive(Debug, Clone)]
pub struct SentenceChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl SentenceChunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut chunks = Vec::new();

        if chars.is_empty() {
            return chunks;
        }

        let mut start = 0;
        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());

            let chunk_end = if end < chars.len() {
                find_break_point(&chars, start, end)
            } else {
                end
            };

            let chunk: String = chars[start..chunk_end].iter().collect();
            let chunk = chunk.trim();
            if !chunk.is_empty() {
                chunks.push(chunk.to_string());
            }

            if chunk_end >= chars.len() {
                break;
            }

            // must advance even when the break point sits inside the overlap
            start = chunk_end.saturating_sub(self.chunk_overlap).max(start + 1);
        }

        chunks
    }
}

fn find_break_point(chars: &[char], start: usize, max_end: usize) -> usize {
    // Don't accept breaks so early that the chunk is mostly overlap.
    let floor = start + (max_end - start) / 2;

    for i in (floor..max_end).rev() {
        if i + 1 < chars.len() && matches!(chars[i], '.' | '!' | '?') && chars[i + 1].is_whitespace()
        {
            return i + 1;
        }
    }

    for i in (floor..max_end).rev() {
        if chars[i] == '\n' && i + 1 < chars.len() && chars[i + 1] == '\n' {
            return i + 1;
        }
    }

    for i in (floor..max_end).rev() {
        if chars[i].is_whitespace() {
            return i + 1;
        }
    }

    max_end
}
