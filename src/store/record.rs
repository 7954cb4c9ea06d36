//! Memo record format
//!
//! The memo log is a sequence of binary records:
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, total including this field)
//! +------------------+
//! | Memo Text        | (length-prefixed string)
//! +------------------+
//! | Image Flag       | (u8: 0 = no image, 1 = image present)
//! +------------------+
//! | Memo Image       | (length-prefixed bytes, only when flag = 1)
//! +------------------+
//! | Checksum         | (u32 LE, CRC32)
//! +------------------+
//! ```
//!
//! Checksum covers all bytes except the checksum itself.

use std::io::{self, Read};

use super::checksum::compute_checksum;

/// Smallest possible record: length + empty text prefix + flag + checksum
pub(crate) const MIN_RECORD_SIZE: usize = 4 + 4 + 1 + 4;

/// A persisted memo: a free-text label plus an optional image payload.
///
/// Records are append-only. They are never updated in place and never
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoRecord {
    /// Free-text label
    pub memo_text: String,
    /// Encoded image bytes, if any
    pub memo_image: Option<Vec<u8>>,
}

impl MemoRecord {
    /// Create a new memo record
    pub fn new(memo_text: impl Into<String>, memo_image: Option<Vec<u8>>) -> Self {
        Self {
            memo_text: memo_text.into(),
            memo_image,
        }
    }

    /// Serialize the record body (everything except length prefix and
    /// checksum). This is part of the data the checksum covers.
    fn serialize_body(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        buf.extend_from_slice(&(self.memo_text.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.memo_text.as_bytes());

        match &self.memo_image {
            Some(image) => {
                buf.push(1);
                buf.extend_from_slice(&(image.len() as u32).to_le_bytes());
                buf.extend_from_slice(image);
            }
            None => buf.push(0),
        }

        buf
    }

    /// Serialize the complete record to bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let body = self.serialize_body();
        let record_length = (4 + body.len() + 4) as u32;

        // Checksum covers: length + body
        let mut checksum_data = Vec::with_capacity(4 + body.len());
        checksum_data.extend_from_slice(&record_length.to_le_bytes());
        checksum_data.extend_from_slice(&body);
        let checksum = compute_checksum(&checksum_data);

        let mut record = Vec::with_capacity(record_length as usize);
        record.extend_from_slice(&record_length.to_le_bytes());
        record.extend_from_slice(&body);
        record.extend_from_slice(&checksum.to_le_bytes());

        record
    }

    /// Deserialize a record from bytes, verifying checksum.
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Record too short",
            ));
        }

        let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if record_length < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid record length: {}", record_length),
            ));
        }

        if data.len() < record_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Record truncated: expected {} bytes, got {}",
                    record_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_length - 4;
        let stored_checksum = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);

        let computed_checksum = compute_checksum(&data[0..checksum_offset]);
        if computed_checksum != stored_checksum {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Checksum mismatch: computed {:08x}, stored {:08x}",
                    computed_checksum, stored_checksum
                ),
            ));
        }

        let mut cursor = io::Cursor::new(&data[4..checksum_offset]);

        fn read_len<R: Read>(reader: &mut R) -> io::Result<usize> {
            let mut len_buf = [0u8; 4];
            reader.read_exact(&mut len_buf)?;
            Ok(u32::from_le_bytes(len_buf) as usize)
        }

        let text_len = read_len(&mut cursor)?;
        let mut text_buf = vec![0u8; text_len];
        cursor.read_exact(&mut text_buf)?;
        let memo_text = String::from_utf8(text_buf).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {}", e))
        })?;

        let mut flag_buf = [0u8; 1];
        cursor.read_exact(&mut flag_buf)?;

        let memo_image = if flag_buf[0] != 0 {
            let image_len = read_len(&mut cursor)?;
            let mut image_buf = vec![0u8; image_len];
            cursor.read_exact(&mut image_buf)?;
            Some(image_buf)
        } else {
            None
        };

        Ok((
            Self {
                memo_text,
                memo_image,
            },
            record_length,
        ))
    }
}
