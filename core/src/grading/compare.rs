use std::{
    io::{self, BufRead, BufReader, Read, Seek},
    path::Path,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Open(#[from] fsutil::Error),

    #[error("Failed to read outputs while comparing: {0}")]
    Read(#[from] io::Error),
}

/// Relationship between a produced output and the reference output, ordered by strictness.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
    serde::Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Similarity {
    Different,
    /// Equal once blanks are skipped and ASCII letters are case-folded.
    Similar,
    /// Byte-identical.
    Equal,
}

impl Similarity {
    /// Exit status used by the `compare` command: 1 = equal, 2 = different, 3 = similar.
    pub fn status_code(self) -> i32 {
        use Similarity::*;
        match self {
            Equal => 1,
            Different => 2,
            Similar => 3,
        }
    }

    pub fn from_status_code(code: i32) -> Option<Self> {
        use Similarity::*;
        match code {
            1 => Some(Equal),
            2 => Some(Different),
            3 => Some(Similar),
            _ => None,
        }
    }
}

/// Only space and newline count as blanks. Tabs and carriage returns are significant.
fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\n'
}

struct ByteStream<R> {
    inner: BufReader<R>,
}

impl<R: Read + Seek> ByteStream<R> {
    fn new(inner: R) -> Self {
        Self {
            inner: BufReader::new(inner),
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let Some(&b) = self.inner.fill_buf()?.first() else {
            return Ok(None)
        };
        self.inner.consume(1);
        Ok(Some(b))
    }

    fn next_non_blank(&mut self) -> io::Result<Option<u8>> {
        while let Some(b) = self.next_byte()? {
            if !is_blank(b) {
                return Ok(Some(b));
            }
        }
        Ok(None)
    }

    fn rewind(&mut self) -> io::Result<()> {
        self.inner.rewind()
    }
}

fn is_equal<A, B>(a: &mut ByteStream<A>, b: &mut ByteStream<B>) -> io::Result<bool>
where
    A: Read + Seek,
    B: Read + Seek,
{
    loop {
        match (a.next_byte()?, b.next_byte()?) {
            (None, None) => return Ok(true),
            (Some(x), Some(y)) if x == y => continue,
            _ => return Ok(false),
        }
    }
}

fn is_similar<A, B>(a: &mut ByteStream<A>, b: &mut ByteStream<B>) -> io::Result<bool>
where
    A: Read + Seek,
    B: Read + Seek,
{
    loop {
        // Each side skips its own blanks; once one side ends, the other may only have blanks left.
        match (a.next_non_blank()?, b.next_non_blank()?) {
            (None, None) => return Ok(true),
            (Some(x), Some(y)) if x.eq_ignore_ascii_case(&y) => continue,
            _ => return Ok(false),
        }
    }
}

/// Classifies `produced` against `reference` with at most two forward scans of each stream.
pub fn classify<A, B>(produced: A, reference: B) -> io::Result<Similarity>
where
    A: Read + Seek,
    B: Read + Seek,
{
    let mut a = ByteStream::new(produced);
    let mut b = ByteStream::new(reference);

    if is_equal(&mut a, &mut b)? {
        return Ok(Similarity::Equal);
    }

    a.rewind()?;
    b.rewind()?;

    if is_similar(&mut a, &mut b)? {
        Ok(Similarity::Similar)
    } else {
        Ok(Similarity::Different)
    }
}

pub fn classify_files(
    produced_path: impl AsRef<Path>,
    reference_path: impl AsRef<Path>,
) -> Result<Similarity> {
    let produced = fsutil::open_read(produced_path)?;
    let reference = fsutil::open_read(reference_path)?;
    Ok(self::classify(produced, reference)?)
}
