//! Owned byte buffers for windowed reads and chunked transfers.

use std::io::{self, Read, Seek, SeekFrom};

/// Allocate a zeroed buffer, reporting allocation failure as an I/O error.
pub(crate) fn alloc_buffer(len: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Read until `buf` is full or the reader is exhausted.
pub(crate) fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Fixed-capacity window buffer.
///
/// Every operation clamps its byte counts to the capacity, so shifting
/// and filling never index out of bounds.
#[derive(Debug)]
pub(crate) struct WindowBuffer {
    data: Box<[u8]>,
}

impl WindowBuffer {
    pub(crate) fn new(capacity: usize) -> io::Result<Self> {
        Ok(Self {
            data: alloc_buffer(capacity)?.into_boxed_slice(),
        })
    }

    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Move the last `count` bytes to the front.
    pub(crate) fn move_tail_to_head(&mut self, count: usize) {
        let len = self.data.len();
        let count = count.min(len);
        self.data.copy_within(len - count.., 0);
    }

    /// Move the first `count` bytes to the back.
    pub(crate) fn move_head_to_tail(&mut self, count: usize) {
        let len = self.data.len();
        let count = count.min(len);
        self.data.copy_within(..count, len - count);
    }

    /// Zero everything from `start` to the end.
    pub(crate) fn zero_from(&mut self, start: usize) {
        let start = start.min(self.data.len());
        self.data[start..].fill(0);
    }

    /// Fill `start..end` from `reader` at `position`, zeroing whatever the
    /// reader cannot supply. Returns the number of bytes actually read.
    pub(crate) fn fill_from<R: Read + Seek + ?Sized>(
        &mut self,
        reader: &mut R,
        position: u64,
        start: usize,
        end: usize,
    ) -> io::Result<usize> {
        let end = end.min(self.data.len());
        let start = start.min(end);
        if start == end {
            return Ok(0);
        }

        reader.seek(SeekFrom::Start(position))?;
        let read = read_full(reader, &mut self.data[start..end])?;
        self.data[start + read..end].fill(0);
        Ok(read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn window_with(bytes: &[u8]) -> WindowBuffer {
        let mut window = WindowBuffer::new(bytes.len()).unwrap();
        window.data.copy_from_slice(bytes);
        window
    }

    #[test]
    fn test_alloc_buffer_zeroed() {
        let buf = alloc_buffer(16).unwrap();
        assert_eq!(buf, vec![0u8; 16]);
        assert!(alloc_buffer(0).unwrap().is_empty());
    }

    #[test]
    fn test_move_tail_to_head() {
        let mut window = window_with(&[1, 2, 3, 4, 5]);
        window.move_tail_to_head(2);
        assert_eq!(&window.as_slice()[..2], &[4, 5]);

        let mut window = window_with(&[1, 2, 3]);
        window.move_tail_to_head(10);
        assert_eq!(window.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_move_head_to_tail() {
        let mut window = window_with(&[1, 2, 3, 4, 5]);
        window.move_head_to_tail(2);
        assert_eq!(&window.as_slice()[3..], &[1, 2]);
    }

    #[test]
    fn test_fill_from_pads_with_zero() {
        let mut reader = Cursor::new(vec![9u8, 8, 7]);
        let mut window = window_with(&[1, 1, 1, 1, 1]);

        let read = window.fill_from(&mut reader, 1, 1, 5).unwrap();
        assert_eq!(read, 2);
        assert_eq!(window.as_slice(), &[1, 8, 7, 0, 0]);

        window.zero_from(0);
        assert_eq!(window.as_slice(), &[0; 5]);
        assert_eq!(window.capacity(), 5);
    }

    #[test]
    fn test_read_full_short_reader() {
        let mut reader = Cursor::new(vec![1u8, 2]);
        let mut buf = [0u8; 4];
        assert_eq!(read_full(&mut reader, &mut buf).unwrap(), 2);
        assert_eq!(buf, [1, 2, 0, 0]);
    }
}
