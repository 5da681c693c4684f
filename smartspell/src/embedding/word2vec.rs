//! Reader for word2vec tables in the binary and text formats.
use std::io::{BufRead, Cursor};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use hashbrown::HashMap;
use log::debug;
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::error::EmbeddingError;
use super::Embeddings;
use crate::constants::MAX_WORD_BYTES;

/// On-disk layout of a word2vec table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorFormat {
    /// `.bin` files are binary, everything else is text
    Auto,
    /// `<word> ` followed by little-endian `f32`s
    Binary,
    /// `<word> <f32> ... <f32>` lines
    Text,
}

impl VectorFormat {
    /// Picks the concrete format for `path`.
    pub fn resolve(self, path: &Path) -> VectorFormat {
        match self {
            VectorFormat::Auto => match path.extension() {
                Some(ext) if ext == "bin" => VectorFormat::Binary,
                _ => VectorFormat::Text,
            },
            other => other,
        }
    }
}

impl Default for VectorFormat {
    fn default() -> Self {
        VectorFormat::Auto
    }
}

/// An in-memory word2vec table.
///
/// Vectors are stored contiguously; the first occurrence of a word wins if
/// the table lists it more than once.
#[derive(Debug, Clone)]
pub struct Word2Vec {
    dims: usize,
    index: HashMap<SmolStr, usize>,
    vectors: Vec<f32>,
}

impl Word2Vec {
    /// Opens and fully reads the table at `path`, keeping at most `limit`
    /// entries.
    pub fn open<P: AsRef<Path>>(
        path: P,
        format: VectorFormat,
        limit: Option<usize>,
    ) -> Result<Word2Vec, EmbeddingError> {
        let path = path.as_ref();
        let file =
            std::fs::File::open(path).map_err(|e| EmbeddingError::File(path.to_path_buf(), e))?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(EmbeddingError::Memmap)?;

        debug!("Loading embedding table from {}", path.display());

        let table = match format.resolve(path) {
            VectorFormat::Binary => Word2Vec::from_binary(&mmap, limit)?,
            _ => Word2Vec::from_text(&mmap, limit)?,
        };

        debug!(
            "Loaded {} vectors of {} dimensions",
            table.len(),
            table.dimensions()
        );

        Ok(table)
    }

    /// Builds a table from `(word, vector)` pairs.
    pub fn from_vectors<I, S>(dims: usize, entries: I) -> Result<Word2Vec, EmbeddingError>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<SmolStr>,
    {
        let mut table = Word2Vec::with_capacity(dims, 0);

        for (entry, (word, vector)) in entries.into_iter().enumerate() {
            if vector.len() != dims {
                return Err(EmbeddingError::DimensionMismatch {
                    entry,
                    expected: dims,
                    found: vector.len(),
                });
            }
            table.push(word.into(), &vector);
        }

        Ok(table)
    }

    /// Parses the binary format.
    pub fn from_binary(buf: &[u8], limit: Option<usize>) -> Result<Word2Vec, EmbeddingError> {
        let mut rdr = Cursor::new(buf);
        let (count, dims) = read_header(&mut rdr)?;
        let count = limit.map_or(count, |limit| limit.min(count));
        let capacity = entry_capacity(&rdr, count, dims, BINARY_BYTES_PER_DIM)?;

        if count == 0 {
            return Ok(Word2Vec::with_capacity(dims, 0));
        }

        let mut table = Word2Vec::with_capacity(dims, capacity);
        let mut vector = vec![0f32; dims];

        for entry in 0..count {
            let word = read_binary_word(&mut rdr, entry)?;

            rdr.read_f32_into::<LittleEndian>(&mut vector)
                .map_err(|source| EmbeddingError::Truncated { entry, source })?;

            table.push(word, &vector);
        }

        Ok(table)
    }

    /// Parses the text format.
    pub fn from_text(buf: &[u8], limit: Option<usize>) -> Result<Word2Vec, EmbeddingError> {
        let mut rdr = Cursor::new(buf);
        let (count, dims) = read_header(&mut rdr)?;
        let count = limit.map_or(count, |limit| limit.min(count));
        let capacity = entry_capacity(&rdr, count, dims, TEXT_BYTES_PER_DIM)?;

        if count == 0 {
            return Ok(Word2Vec::with_capacity(dims, 0));
        }

        let mut table = Word2Vec::with_capacity(dims, capacity);
        let mut vector = Vec::with_capacity(dims);
        let mut lines = rdr.split(b'\n');

        for entry in 0..count {
            let line = match lines.next() {
                Some(Ok(line)) => line,
                Some(Err(source)) => return Err(EmbeddingError::Truncated { entry, source }),
                None => {
                    return Err(EmbeddingError::Truncated {
                        entry,
                        source: std::io::ErrorKind::UnexpectedEof.into(),
                    })
                }
            };
            let line =
                std::str::from_utf8(&line).map_err(|e| EmbeddingError::InvalidWord(entry, e))?;

            let mut parts = line.trim_end().split(' ');
            let word = match parts.next() {
                Some(word) if !word.is_empty() => word,
                _ => {
                    return Err(EmbeddingError::MalformedEntry {
                        entry,
                        reason: "missing word".into(),
                    })
                }
            };

            vector.clear();
            for part in parts {
                let value = part
                    .parse::<f32>()
                    .map_err(|e| EmbeddingError::MalformedEntry {
                        entry,
                        reason: format!("{:?}: {}", part, e),
                    })?;
                vector.push(value);
            }

            if vector.len() != dims {
                return Err(EmbeddingError::DimensionMismatch {
                    entry,
                    expected: dims,
                    found: vector.len(),
                });
            }

            table.push(word.into(), &vector);
        }

        Ok(table)
    }

    fn with_capacity(dims: usize, count: usize) -> Word2Vec {
        Word2Vec {
            dims,
            index: HashMap::with_capacity(count),
            vectors: Vec::with_capacity(count * dims),
        }
    }

    fn push(&mut self, word: SmolStr, vector: &[f32]) {
        if self.index.contains_key(&word) {
            return;
        }

        let slot = self.index.len();
        self.index.insert(word, slot);
        self.vectors.extend_from_slice(vector);
    }

    /// Iterates over the words in the table, in no particular order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(|k| k.as_str())
    }
}

impl Embeddings for Word2Vec {
    fn dimensions(&self) -> usize {
        self.dims
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn vector(&self, word: &str) -> Option<&[f32]> {
        let slot = *self.index.get(word)?;
        let start = slot * self.dims;
        self.vectors.get(start..start + self.dims)
    }
}

fn read_header(rdr: &mut Cursor<&[u8]>) -> Result<(usize, usize), EmbeddingError> {
    let mut line = Vec::new();
    rdr.read_until(b'\n', &mut line)
        .map_err(|e| EmbeddingError::MalformedHeader(e.to_string()))?;

    let line = std::str::from_utf8(&line)
        .map_err(|e| EmbeddingError::MalformedHeader(e.to_string()))?;
    let mut parts = line.split_whitespace().map(str::parse::<usize>);

    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(count)), Some(Ok(dims)), None) if dims > 0 => Ok((count, dims)),
        _ => Err(EmbeddingError::MalformedHeader(format!(
            "expected '<count> <dimensions>', got {:?}",
            line.trim_end()
        ))),
    }
}

/// Smallest encoded size of one dimension: four bytes of `f32`, or one
/// digit plus its separating space.
const BINARY_BYTES_PER_DIM: usize = 4;
const TEXT_BYTES_PER_DIM: usize = 2;

/// How many of the `count` entries announced by the header the rest of the
/// input can hold, so that a bogus header cannot force a huge allocation.
///
/// Fails if not even one entry fits while the header promises some.
fn entry_capacity(
    rdr: &Cursor<&[u8]>,
    count: usize,
    dims: usize,
    bytes_per_dim: usize,
) -> Result<usize, EmbeddingError> {
    // one byte of word and one separator
    let min_entry = dims
        .checked_mul(bytes_per_dim)
        .and_then(|n| n.checked_add(2))
        .ok_or_else(|| EmbeddingError::MalformedHeader(format!("{} dimensions", dims)))?;

    let remaining = rdr.get_ref().len().saturating_sub(rdr.position() as usize);
    let capacity = count.min(remaining / min_entry);

    if count > 0 && capacity == 0 {
        return Err(EmbeddingError::Truncated {
            entry: 0,
            source: std::io::ErrorKind::UnexpectedEof.into(),
        });
    }

    Ok(capacity)
}

fn read_binary_word(rdr: &mut Cursor<&[u8]>, entry: usize) -> Result<SmolStr, EmbeddingError> {
    let buf = *rdr.get_ref();
    let mut pos = rdr.position() as usize;

    // Entries may be separated by a newline after the vector.
    while buf.get(pos) == Some(&b'\n') {
        pos += 1;
    }

    let rest = buf.get(pos..).unwrap_or(&[]);
    let len = match rest.iter().take(MAX_WORD_BYTES + 1).position(|b| *b == b' ') {
        Some(len) => len,
        None if rest.len() <= MAX_WORD_BYTES => {
            return Err(EmbeddingError::Truncated {
                entry,
                source: std::io::ErrorKind::UnexpectedEof.into(),
            })
        }
        None => {
            return Err(EmbeddingError::MalformedEntry {
                entry,
                reason: format!("word longer than {} bytes", MAX_WORD_BYTES),
            })
        }
    };

    let word =
        std::str::from_utf8(&rest[..len]).map_err(|e| EmbeddingError::InvalidWord(entry, e))?;
    rdr.set_position((pos + len + 1) as u64);

    Ok(SmolStr::new(word))
}
