use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::Path;

use tracing::{debug, instrument, trace};

use crate::codec::{encode_to_writer, DecodeError, Decoder, EncodeError};

use super::HandHistory;

/// Append a hand to `path` as a single JSON line.
///
/// Parent directories and the file are created as needed. Each call writes
/// one complete object followed by `\n`, so the file stays valid JSON Lines
/// and can be appended to across runs.
#[instrument(level = "trace", skip(hand), fields(game_number = %hand.game_number))]
pub fn append_hand(path: &Path, hand: &HandHistory) -> Result<(), EncodeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!(?parent, "Creating output directory");
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    encode_to_writer(hand, &mut writer)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    debug!(?path, "Appended hand history");
    Ok(())
}

/// Reads hands from JSON Lines input, one decode result per non-blank line.
///
/// Errors are wrapped in [`DecodeError::Line`] carrying the 1-based line
/// number. A bad line does not stop iteration.
#[derive(Debug)]
pub struct HandHistoryReader<R> {
    lines: Lines<R>,
    decoder: Decoder,
    line: usize,
}

impl<R: BufRead> HandHistoryReader<R> {
    pub fn new(reader: R, decoder: Decoder) -> Self {
        Self {
            lines: reader.lines(),
            decoder,
            line: 0,
        }
    }
}

impl HandHistoryReader<BufReader<File>> {
    pub fn open(path: &Path, decoder: Decoder) -> Result<Self, DecodeError> {
        debug!(?path, "Opening hand history file");
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), decoder))
    }
}

impl<R: BufRead> Iterator for HandHistoryReader<R> {
    type Item = Result<HandHistory, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = self.lines.next()?;
            self.line += 1;
            let line = self.line;
            let wrap = |source: DecodeError| DecodeError::Line {
                line,
                source: Box::new(source),
            };

            let text = match text {
                Ok(text) => text,
                Err(e) => return Some(Err(wrap(e.into()))),
            };
            if text.trim().is_empty() {
                continue;
            }
            trace!(line, "Decoding hand history line");
            return Some(self.decoder.decode_str(&text).map_err(wrap));
        }
    }
}

/// Read every hand in a JSON Lines file, stopping at the first bad line.
pub fn read_hands(path: &Path, decoder: Decoder) -> Result<Vec<HandHistory>, DecodeError> {
    HandHistoryReader::open(path, decoder)?.collect()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::TempDir;

    use super::*;
    use crate::hand_history::{sample_cash_hand, sample_tournament_hand};

    #[test_log::test]
    fn test_append_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("hands.jsonl");

        append_hand(&path, &sample_cash_hand()).unwrap();
        append_hand(&path, &sample_tournament_hand()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.ends_with('\n'));

        let hands = read_hands(&path, Decoder::strict()).unwrap();
        assert_eq!(hands, vec![sample_cash_hand(), sample_tournament_hand()]);
    }

    #[test]
    fn test_reader_skips_blank_lines_and_reports_line_numbers() {
        let good = crate::codec::encode_to_string(&sample_cash_hand()).unwrap();
        let input = format!("{good}\n\n{{\"spec_version\": 1}}\n{good}\n");

        let results: Vec<_> =
            HandHistoryReader::new(Cursor::new(input), Decoder::lenient()).collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        match &results[1] {
            Err(DecodeError::Line { line, source }) => {
                assert_eq!(*line, 3);
                assert!(matches!(**source, DecodeError::Structure { .. }));
            }
            other => panic!("expected a line error, got {other:?}"),
        }
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = read_hands(&dir.path().join("absent.jsonl"), Decoder::strict()).unwrap_err();
        assert!(matches!(err, DecodeError::Io(_)));
    }
}
