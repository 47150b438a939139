use super::{InputEvent, SegmentedInput};

/// One-time code entry: `length` single-digit boxes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OtpInput {
    segments: SegmentedInput,
}

impl OtpInput {
    pub fn new(length: usize) -> Self {
        Self {
            segments: SegmentedInput::new(vec![1; length]),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &SegmentedInput {
        &self.segments
    }

    pub fn digit(&self, index: usize) -> &str {
        self.segments.value(index)
    }

    /// Code typed so far
    pub fn code(&self) -> String {
        self.segments.joined()
    }

    /// Text entered into box `index`; a pasted code fills every box
    pub fn set_digit(&mut self, index: usize, text: &str) -> Option<String> {
        // A box that already holds a digit receives the old digit plus the new one
        let text = match self.segments.value(index) {
            current if !current.is_empty() && text.len() == 2 && text.starts_with(current) => {
                &text[current.len()..]
            }
            _ => text,
        };
        match self.segments.set_segment(index, text) {
            InputEvent::Completed(code) => Some(code),
            InputEvent::Updated => None,
        }
    }

    pub fn backspace_at(&mut self, index: usize) {
        self.segments.backspace_at(index);
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_auto_submits_once() {
        let mut otp = OtpInput::new(4);
        assert_eq!(otp.set_digit(0, "1"), None);
        assert_eq!(otp.segments().focus(), 1);
        otp.set_digit(1, "2");
        otp.set_digit(2, "3");
        assert_eq!(otp.set_digit(3, "4"), Some("1234".to_string()));
        assert_eq!(otp.set_digit(3, "4"), None);
    }

    #[test]
    fn test_paste_fills_all_boxes() {
        let mut otp = OtpInput::new(6);
        assert_eq!(otp.set_digit(0, "123456"), Some("123456".to_string()));
        assert_eq!(otp.digit(5), "6");
    }

    #[test]
    fn test_typing_over_a_filled_box_replaces_it() {
        let mut otp = OtpInput::new(3);
        otp.set_digit(0, "1");
        otp.set_digit(0, "17");
        assert_eq!(otp.digit(0), "7");
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut otp = OtpInput::new(3);
        otp.set_digit(0, "12");
        otp.backspace_at(2);
        assert_eq!(otp.code(), "1");
        assert_eq!(otp.segments().focus(), 1);

        otp.clear();
        assert_eq!(otp.code(), "");
        assert_eq!(otp.len(), 3);
    }
}
