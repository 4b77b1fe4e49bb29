//! Output text encodings
//!
//! CSV text is produced as UTF-8. `ShiftJisWriter` transcodes it on the way
//! to disk and rejects characters Shift_JIS cannot represent.

use std::io::{self, Write};

use encoding_rs::{Encoder, EncoderResult, SHIFT_JIS};

/// Text encoding of the CSV file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputEncoding {
    #[default]
    Utf8,
    ShiftJis,
}

impl OutputEncoding {
    /// Wrap `inner` so that bytes written to it end up in this encoding
    pub fn wrap<W: Write + 'static>(self, inner: W) -> Box<dyn Write> {
        match self {
            OutputEncoding::Utf8 => Box::new(inner),
            OutputEncoding::ShiftJis => Box::new(ShiftJisWriter::new(inner)),
        }
    }
}

/// UTF-8 to Shift_JIS transcoding writer
pub struct ShiftJisWriter<W: Write> {
    inner: W,
    encoder: Encoder,
    // trailing bytes of a UTF-8 sequence split across writes
    pending: Vec<u8>,
}

impl<W: Write> ShiftJisWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            encoder: SHIFT_JIS.new_encoder(),
            pending: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ShiftJisWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);

        let complete = match std::str::from_utf8(&self.pending) {
            Ok(text) => text.len(),
            Err(err) if err.error_len().is_none() => err.valid_up_to(),
            Err(err) => {
                self.pending.clear();
                return Err(io::Error::new(io::ErrorKind::InvalidData, err));
            }
        };

        let text = std::str::from_utf8(&self.pending[..complete])
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        let encoded = encode_strict(&mut self.encoder, text);
        self.pending.drain(..complete);

        self.inner.write_all(&encoded?)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Encode `text`, failing on the first unmappable character
fn encode_strict(encoder: &mut Encoder, text: &str) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());
    let mut buffer = [0u8; 1024];
    let mut src = text;

    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(src, &mut buffer, false);
        out.extend_from_slice(&buffer[..written]);
        src = &src[read..];

        match result {
            EncoderResult::InputEmpty => return Ok(out),
            EncoderResult::OutputFull => continue,
            EncoderResult::Unmappable(c) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("character '{}' (U+{:04X}) cannot be encoded in Shift_JIS", c, c as u32),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() -> io::Result<()> {
        let mut writer = ShiftJisWriter::new(Vec::new());
        writer.write_all(b"basepath,path\n")?;
        assert_eq!(writer.into_inner(), b"basepath,path\n");
        Ok(())
    }

    #[test]
    fn test_japanese_is_transcoded() -> io::Result<()> {
        let mut writer = ShiftJisWriter::new(Vec::new());
        writer.write_all("テスト".as_bytes())?;
        assert_eq!(writer.into_inner(), vec![0x83, 0x65, 0x83, 0x58, 0x83, 0x67]);
        Ok(())
    }

    #[test]
    fn test_split_utf8_sequence() -> io::Result<()> {
        let bytes = "テ".as_bytes();
        let mut writer = ShiftJisWriter::new(Vec::new());
        writer.write_all(&bytes[..1])?;
        writer.write_all(&bytes[1..])?;
        assert_eq!(writer.into_inner(), vec![0x83, 0x65]);
        Ok(())
    }

    #[test]
    fn test_unmappable_character_fails() {
        let mut writer = ShiftJisWriter::new(Vec::new());
        let err = writer.write_all("smile 😀".as_bytes()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("U+1F600"));
    }

    #[test]
    fn test_utf8_wrap_is_identity() -> io::Result<()> {
        let path = tempfile::NamedTempFile::new()?;
        {
            let mut writer = OutputEncoding::Utf8.wrap(path.reopen()?);
            writer.write_all("テスト".as_bytes())?;
            writer.flush()?;
        }
        assert_eq!(std::fs::read(path.path())?, "テスト".as_bytes());
        Ok(())
    }
}
