//! Size-bounded text splitting with overlap
//!
//! Splitting order: paragraphs -> sentences -> words. A single word longer
//! than the chunk size becomes its own chunk.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::ingestion::chunker::helpers::{char_len, tail_chars};
use crate::domain::ingestion::ChunkingConfig;

/// Marker placed before overlap text carried over from the previous chunk
pub const OVERLAP_MARKER: &str = "...";

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\n+").unwrap());
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

const PARAGRAPH_JOINER: &str = "\n\n";
const SENTENCE_JOINER: &str = " ";
const WORD_JOINER: &str = " ";

/// Greedy accumulator shared by the three passes
struct Accumulator {
    limit: usize,
    joiner: &'static str,
    current: String,
    current_len: usize,
    done: Vec<String>,
}

impl Accumulator {
    fn new(limit: usize, joiner: &'static str) -> Self {
        Self {
            limit,
            joiner,
            current: String::new(),
            current_len: 0,
            done: Vec::new(),
        }
    }

    /// Whether appending a piece of `len` characters would pass the limit
    fn overflows(&self, len: usize) -> bool {
        self.current_len + len + char_len(self.joiner) > self.limit
    }

    fn append(&mut self, piece: &str) {
        if self.current.is_empty() {
            self.start(piece.to_string());
        } else {
            self.current.push_str(self.joiner);
            self.current.push_str(piece);
            self.current_len += char_len(self.joiner) + char_len(piece);
        }
    }

    fn start(&mut self, piece: String) {
        self.current_len = char_len(&piece);
        self.current = piece;
    }

    fn flush(&mut self) {
        let trimmed = self.current.trim();

        if !trimmed.is_empty() {
            self.done.push(trimmed.to_string());
        }

        self.current.clear();
        self.current_len = 0;
    }

    /// Take a finer pass's output: all but the last piece are finished, the
    /// last one keeps accumulating
    fn absorb(&mut self, mut pieces: Vec<String>) {
        let last = pieces.pop();
        self.done.extend(pieces);

        if let Some(last) = last {
            self.start(last);
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.done
    }
}

/// Splits section text into chunks no longer than the configured size
#[derive(Debug, Clone, Copy)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    pub fn new(config: ChunkingConfig) -> Self {
        Self {
            chunk_size: config.chunk_size(),
            chunk_overlap: config.chunk_overlap(),
        }
    }

    /// Split text into chunks, then inject overlap when there are two or more
    pub fn split(&self, text: &str) -> Vec<String> {
        let chunks = self.split_paragraphs(text);

        if self.chunk_overlap > 0 && chunks.len() > 1 {
            self.add_overlap(&chunks)
        } else {
            chunks
        }
    }

    fn split_paragraphs(&self, text: &str) -> Vec<String> {
        let mut acc = Accumulator::new(self.chunk_size, PARAGRAPH_JOINER);

        for para in PARAGRAPH_BREAK.split(text) {
            let para = para.trim();

            if para.is_empty() {
                continue;
            }

            let len = char_len(para);

            if acc.overflows(len) {
                acc.flush();

                if len > self.chunk_size {
                    acc.absorb(self.split_sentences(para));
                } else {
                    acc.start(para.to_string());
                }
            } else {
                acc.append(para);
            }
        }

        acc.finish()
    }

    fn split_sentences(&self, paragraph: &str) -> Vec<String> {
        let mut acc = Accumulator::new(self.chunk_size, SENTENCE_JOINER);

        for sentence in sentences(paragraph) {
            let len = char_len(sentence);

            if acc.overflows(len) {
                acc.flush();

                if len > self.chunk_size {
                    acc.absorb(self.split_words(sentence));
                } else {
                    acc.start(sentence.to_string());
                }
            } else {
                acc.append(sentence);
            }
        }

        acc.finish()
    }

    fn split_words(&self, text: &str) -> Vec<String> {
        let mut acc = Accumulator::new(self.chunk_size, WORD_JOINER);

        for word in text.split_whitespace() {
            if acc.overflows(char_len(word)) {
                acc.flush();
                acc.start(word.to_string());
            } else {
                acc.append(word);
            }
        }

        acc.finish()
    }

    fn add_overlap(&self, chunks: &[String]) -> Vec<String> {
        chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| match i {
                0 => chunk.clone(),
                _ => {
                    let snippet = overlap_snippet(&chunks[i - 1], self.chunk_overlap);
                    format!("{}{} {}", OVERLAP_MARKER, snippet, chunk)
                }
            })
            .collect()
    }
}

/// Tail of `previous` used as overlap, starting at a word boundary
///
/// A tail without whitespace is kept whole.
pub fn overlap_snippet(previous: &str, overlap: usize) -> &str {
    let tail = tail_chars(previous, overlap);

    match tail.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((0, _)) => tail.trim_start(),
        Some((idx, c)) => tail[idx + c.len_utf8()..].trim_start(),
        None => tail,
    }
}

/// Split on whitespace that follows `.`, `!` or `?`
fn sentences(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END.find_iter(text) {
        // Terminators are ASCII, so the sentence ends one byte into the match
        result.push(&text[start..m.start() + 1]);
        start = m.end();
    }

    if start < text.len() {
        result.push(&text[start..]);
    }

    result
}
