/// ASCII text with a fixed byte capacity, edited one character per frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    capacity: usize,
}

/// What one edit step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    None,
    Inserted,
    Deleted,
    /// Enter or Escape: the field should lose focus.
    Commit,
    /// A printable character arrived while the buffer was full.
    Rejected,
}

pub const BACKSPACE: u8 = 0x08;
pub const ENTER: u8 = 0x0d;
pub const ESCAPE: u8 = 0x1b;

impl TextBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            capacity,
        }
    }

    /// Keeps the ASCII characters of `text` that fit.
    pub fn with_text(capacity: usize, text: &str) -> Self {
        let mut buf = Self::new(capacity);
        for b in text.bytes().filter(u8::is_ascii) {
            if buf.text.len() >= capacity {
                break;
            }
            buf.text.push(b as char);
        }
        buf
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Applies one 7-bit character code; 0 means no key this frame.
    pub fn apply(&mut self, ch: u8) -> Edit {
        match ch {
            0 => Edit::None,
            BACKSPACE => {
                if self.text.pop().is_some() {
                    Edit::Deleted
                } else {
                    Edit::None
                }
            }
            ENTER | ESCAPE => Edit::Commit,
            c if c.is_ascii() => {
                if self.text.len() < self.capacity {
                    self.text.push(c as char);
                    Edit::Inserted
                } else {
                    Edit::Rejected
                }
            }
            _ => Edit::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_sequence() {
        let mut buf = TextBuffer::new(8);
        assert_eq!(buf.apply(b'a'), Edit::Inserted);
        assert_eq!(buf.apply(b'b'), Edit::Inserted);
        assert_eq!(buf.apply(BACKSPACE), Edit::Deleted);
        assert_eq!(buf.apply(b'c'), Edit::Inserted);
        assert_eq!(buf.as_str(), "ac");
        assert_eq!(buf.apply(ENTER), Edit::Commit);
        assert_eq!(buf.apply(0), Edit::None);
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut buf = TextBuffer::new(4);
        assert_eq!(buf.apply(BACKSPACE), Edit::None);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_full_buffer_rejects() {
        let mut buf = TextBuffer::with_text(3, "abcdef");
        assert_eq!(buf.as_str(), "abc");
        assert_eq!(buf.apply(b'x'), Edit::Rejected);
        assert_eq!(buf.len(), 3);
    }
}
