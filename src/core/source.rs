//! Document source
//!
//! Supplies the on-disk content of a document as a stream of lines.
//! Non-UTF-8 bytes are converted lossily; line terminators (`\n`, `\r\n`)
//! are stripped.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Line iterator over any buffered reader
pub struct Lines<R> {
    reader: R,
    buf: Vec<u8>,
    lossy_lines: usize,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            lossy_lines: 0,
        }
    }

    /// Number of lines that contained invalid UTF-8 so far
    pub fn lossy_lines(&self) -> usize {
        self.lossy_lines
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                let line = match std::str::from_utf8(&self.buf) {
                    Ok(s) => s.to_string(),
                    Err(_) => {
                        self.lossy_lines += 1;
                        String::from_utf8_lossy(&self.buf).into_owned()
                    }
                };
                Some(Ok(line))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Open a document on disk for line-by-line reading
pub fn open_lines(path: &Path) -> io::Result<Lines<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(Lines::new(BufReader::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(input: &[u8]) -> Vec<String> {
        Lines::new(Cursor::new(input.to_vec()))
            .map(|l| l.unwrap())
            .collect()
    }

    #[test]
    fn test_lines_strip_terminators() {
        assert_eq!(collect(b"a\nb\r\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_lines_kept() {
        assert_eq!(collect(b"a\n\nb\n"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(collect(b"").is_empty());
    }

    #[test]
    fn test_lossy_conversion() {
        let mut lines = Lines::new(Cursor::new(b"ok\n\xff[[x]]\n".to_vec()));
        assert_eq!(lines.next().unwrap().unwrap(), "ok");
        let second = lines.next().unwrap().unwrap();
        assert!(second.ends_with("[[x]]"));
        assert_eq!(lines.lossy_lines(), 1);
    }

    #[test]
    fn test_open_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        assert!(open_lines(&temp.path().join("missing.adoc")).is_err());
    }

    #[test]
    fn test_open_reads_disk_content() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("doc.adoc");
        std::fs::write(&path, "= Title\n[[a]]\n").unwrap();

        let lines: Vec<String> = open_lines(&path).unwrap().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["= Title", "[[a]]"]);
    }
}
