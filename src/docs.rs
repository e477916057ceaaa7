//! Synthetic benchmark documents.

use esbench_client::Document;
use rand::Rng;
use serde_json::{Map, Value};
use std::ops::RangeInclusive;

pub const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipisicing elit, sed do eiusmod \
    tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim \
    veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea \
    commodo consequat. Duis aute irure dolor in reprehenderit in voluptate \
    velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint \
    occaecat cupidatat non proident, sunt in culpa qui officia deserunt \
    mollit anim id est laborum.";

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Fixed pool of random hex words that document fields are drawn from.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    pub fn generate<R: Rng + ?Sized>(count: usize, word_len: usize, rng: &mut R) -> Self {
        let words: Vec<String> = (0..count.max(1))
            .map(|_| {
                (0..word_len)
                    .map(|_| HEX[rng.gen_range(0..HEX.len())] as char)
                    .collect::<String>()
            })
            .collect();
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.words[rng.gen_range(0..self.words.len())]
    }
}

/// One document with string fields `a` through `z`.
pub fn lettered_one<R: Rng + ?Sized>(id: u64, vocabulary: &Vocabulary, rng: &mut R) -> Document {
    let source: Map<String, Value> = (b'a'..=b'z')
        .map(|field| {
            (
                (field as char).to_string(),
                Value::from(vocabulary.pick(rng)),
            )
        })
        .collect();
    Document::new(id, source)
}

pub fn lettered<R: Rng + ?Sized>(
    ids: RangeInclusive<u64>,
    vocabulary: &Vocabulary,
    rng: &mut R,
) -> Vec<Document> {
    ids.map(|id| lettered_one(id, vocabulary, rng)).collect()
}

/// Documents `{"title": "Document N", "content": content}`.
pub fn titled(ids: RangeInclusive<u64>, content: &str) -> Vec<Document> {
    ids.map(|id| {
        let mut source = Map::new();
        source.insert("title".to_string(), Value::from(format!("Document {}", id)));
        source.insert("content".to_string(), Value::from(content));
        Document::new(id, source)
    })
    .collect()
}
