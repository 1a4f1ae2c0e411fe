use std::fs::File;
use std::io::{self, prelude::*};
use std::path::Path;

/// Read a file line by line into a reusable buffer, keeping count of the
/// line number for error messages.
pub struct BufReader<R: BufRead = io::BufReader<File>> {
    reader: R,
    line: usize,
}

impl BufReader {
    /// Opens the file from the path into a reader
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        let reader = io::BufReader::new(file);

        Ok(Self::new(reader))
    }
}

impl<R: BufRead> BufReader<R> {
    /// Wraps anything that is already buffered
    pub fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }

    /// The number of the last line read, starting from 1.
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Reads a line from the buffer reader to mutable string, returning the
    /// line and the number of bytes read
    pub fn read_line<'buf>(&mut self,
                           buffer: &'buf mut String)
                           -> Option<io::Result<(&'buf mut String, usize)>>
    {
        buffer.clear();

        let line = &mut self.line;
        self.reader
            .read_line(buffer)
            .map(|u| {
                if u == 0 {
                    None
                } else {
                    *line += 1;
                    Some((buffer, u))
                }
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reader_counts_lines() {
        let mut reader = BufReader::new(Cursor::new("first\nsecond\n"));
        let mut buffer = String::new();
        let mut bytes = 0;
        while let Some(line) = reader.read_line(&mut buffer) {
            let (_, size) = line.unwrap();
            bytes += size;
        }
        assert_eq!(reader.line_number(), 2);
        assert_eq!(bytes, 13)
    }

    #[test]
    fn reader_missing_file() {
        assert!(BufReader::open("does/not/exist.pdb").is_err())
    }
}
