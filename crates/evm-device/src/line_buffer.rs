use log::warn;
use std::collections::VecDeque;

/// Accumulates raw serial bytes and splits them into trimmed text lines
#[derive(Debug, Default)]
pub struct LineBuffer {
    bytes: VecDeque<u8>,
}

impl LineBuffer {
    /// Unterminated input longer than this is garbage, not a device code
    pub const MAX_PARTIAL: usize = 256;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, data: &[u8]) {
        self.bytes.extend(data);
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn has_line(&self) -> bool {
        self.bytes.contains(&b'\n')
    }

    /// Take the oldest complete line, decoded lossily and trimmed.
    ///
    /// Returns `None` if no line is complete, or if the line taken was blank.
    /// Once no complete line is left, an unterminated tail longer than
    /// [`Self::MAX_PARTIAL`] is discarded.
    pub fn next_line(&mut self) -> Option<String> {
        let line = self
            .bytes
            .iter()
            .position(|&b| b == b'\n')
            .and_then(|end| {
                let raw: Vec<u8> = self.bytes.drain(..=end).collect();
                let line = String::from_utf8_lossy(&raw).trim().to_string();
                (!line.is_empty()).then_some(line)
            });

        if !self.has_line() && self.bytes.len() > Self::MAX_PARTIAL {
            warn!("Discarding {} bytes of unterminated device input", self.bytes.len());
            self.bytes.clear();
        }
        line
    }
}
