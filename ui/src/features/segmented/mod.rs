//! Segmented digit entry shared by the date-of-birth and one-time-code steps.
//!
//! One input is split over several boxes. Typing fills the focused box and
//! moves focus on when it is full, pasted text flows into the following
//! boxes, backspace on an empty box steps back and deletes there, and the
//! input reports completion once per fill.

pub mod date_of_birth;
pub mod otp;

pub use date_of_birth::{DateEvent, DateFieldOrder, DateOfBirthInput};
pub use otp::OtpInput;

/// What a keystroke did to the input as a whole
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Updated,
    /// Every segment is full; carries the concatenated digits
    Completed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentedInput {
    widths: Vec<usize>,
    values: Vec<String>,
    focus: usize,
    completion_reported: bool,
}

impl SegmentedInput {
    pub fn new(widths: Vec<usize>) -> Self {
        let values = vec![String::new(); widths.len()];
        Self {
            widths,
            values,
            focus: 0,
            completion_reported: false,
        }
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn width(&self, index: usize) -> usize {
        self.widths.get(index).copied().unwrap_or(0)
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focus_segment(&mut self, index: usize) {
        if index < self.widths.len() {
            self.focus = index;
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn value(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn is_complete(&self) -> bool {
        !self.widths.is_empty()
            && self
                .values
                .iter()
                .zip(&self.widths)
                .all(|(value, width)| value.len() == *width)
    }

    /// All segments joined in display order
    pub fn joined(&self) -> String {
        self.values.concat()
    }

    /// Replace the contents of segment `index` with whatever the box now holds.
    ///
    /// Non-digits are dropped and anything beyond the segment width spills into
    /// the following segments.
    pub fn set_segment(&mut self, index: usize, text: &str) -> InputEvent {
        if index >= self.widths.len() {
            return InputEvent::Updated;
        }
        let mut digits = text.chars().filter(char::is_ascii_digit);
        let mut current = index;

        loop {
            let width = self.widths[current];
            let chunk: String = digits.by_ref().take(width).collect();
            let full = chunk.len() == width;
            self.values[current] = chunk;
            self.focus = current;

            if !full {
                break;
            }
            if current + 1 == self.widths.len() {
                break;
            }
            current += 1;
            self.focus = current;

            let mut rest = digits.clone().peekable();
            if rest.peek().is_none() {
                break;
            }
        }
        self.completion_event()
    }

    /// Type `text` at the focused segment
    pub fn input(&mut self, text: &str) -> InputEvent {
        let index = self.focus;
        let combined = format!("{}{}", self.value(index), text);
        self.set_segment(index, &combined)
    }

    /// Backspace pressed while segment `index` has focus
    pub fn backspace_at(&mut self, index: usize) -> InputEvent {
        if index >= self.widths.len() {
            return InputEvent::Updated;
        }
        if self.values[index].is_empty() {
            if index == 0 {
                self.focus = 0;
                return InputEvent::Updated;
            }
            self.focus = index - 1;
            self.values[index - 1].pop();
        } else {
            self.focus = index;
            self.values[index].pop();
        }
        self.completion_event()
    }

    pub fn backspace(&mut self) -> InputEvent {
        self.backspace_at(self.focus)
    }

    pub fn clear(&mut self) {
        self.values.iter_mut().for_each(String::clear);
        self.focus = 0;
        self.completion_reported = false;
    }

    fn completion_event(&mut self) -> InputEvent {
        if !self.is_complete() {
            self.completion_reported = false;
            return InputEvent::Updated;
        }
        if self.completion_reported {
            return InputEvent::Updated;
        }
        self.completion_reported = true;
        InputEvent::Completed(self.joined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_moves_focus_forward() {
        let mut input = SegmentedInput::new(vec![2, 2, 4]);
        assert_eq!(input.input("1"), InputEvent::Updated);
        assert_eq!(input.focus(), 0);
        input.input("2");
        assert_eq!(input.value(0), "12");
        assert_eq!(input.focus(), 1);
    }

    #[test]
    fn test_paste_overflows_into_following_segments() {
        let mut input = SegmentedInput::new(vec![2, 2, 4]);
        let event = input.set_segment(0, "12/31/1999");
        assert_eq!(input.values(), ["12", "31", "1999"]);
        assert_eq!(event, InputEvent::Completed("12311999".to_string()));
        assert_eq!(input.focus(), 2);
    }

    #[test]
    fn test_non_digits_are_ignored() {
        let mut input = SegmentedInput::new(vec![1, 1]);
        input.set_segment(0, "a");
        assert_eq!(input.value(0), "");
        assert_eq!(input.focus(), 0);
    }

    #[test]
    fn test_backspace_on_empty_segment_moves_back() {
        let mut input = SegmentedInput::new(vec![1, 1, 1]);
        input.set_segment(0, "12");
        assert_eq!(input.focus(), 2);

        input.backspace_at(2);
        assert_eq!(input.focus(), 1);
        assert_eq!(input.values(), ["1", "", ""]);

        input.backspace_at(1);
        input.backspace_at(0);
        assert_eq!(input.focus(), 0);
        assert_eq!(input.joined(), "");
    }

    #[test]
    fn test_completion_reported_once_per_fill() {
        let mut input = SegmentedInput::new(vec![1, 1]);
        input.set_segment(0, "4");
        assert_eq!(input.set_segment(1, "2"), InputEvent::Completed("42".to_string()));
        assert_eq!(input.set_segment(1, "2"), InputEvent::Updated);

        input.backspace_at(1);
        assert!(!input.is_complete());
        assert_eq!(input.set_segment(1, "3"), InputEvent::Completed("43".to_string()));
    }

    #[test]
    fn test_clear_resets_values_and_focus() {
        let mut input = SegmentedInput::new(vec![2, 2]);
        input.set_segment(0, "1234");
        input.clear();
        assert_eq!(input.joined(), "");
        assert_eq!(input.focus(), 0);
        assert_eq!(input.set_segment(0, "1234"), InputEvent::Completed("1234".to_string()));
    }
}
