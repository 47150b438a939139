use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{InputEvent, SegmentedInput};

/// Order of the month, day and year boxes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DateFieldOrder {
    #[default]
    #[serde(rename = "mdy")]
    MonthDayYear,
    #[serde(rename = "dmy")]
    DayMonthYear,
    #[serde(rename = "ymd")]
    YearMonthDay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Part {
    Month,
    Day,
    Year,
}

impl Part {
    fn width(&self) -> usize {
        match self {
            Part::Year => 4,
            Part::Month | Part::Day => 2,
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            Part::Month => "MM",
            Part::Day => "DD",
            Part::Year => "YYYY",
        }
    }
}

impl DateFieldOrder {
    fn parts(&self) -> [Part; 3] {
        match self {
            DateFieldOrder::MonthDayYear => [Part::Month, Part::Day, Part::Year],
            DateFieldOrder::DayMonthYear => [Part::Day, Part::Month, Part::Year],
            DateFieldOrder::YearMonthDay => [Part::Year, Part::Month, Part::Day],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateEvent {
    Pending,
    Completed(NaiveDate),
    /// All boxes are full but they do not name a calendar date
    Invalid,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DateOfBirthInput {
    order: DateFieldOrder,
    segments: SegmentedInput,
}

impl DateOfBirthInput {
    pub fn new(order: DateFieldOrder) -> Self {
        let widths = order.parts().iter().map(Part::width).collect();
        Self {
            order,
            segments: SegmentedInput::new(widths),
        }
    }

    /// Pre-fill from a previously entered date
    pub fn with_date(order: DateFieldOrder, date: NaiveDate) -> Self {
        let mut input = Self::new(order);
        let text: String = order
            .parts()
            .iter()
            .map(|part| match part {
                Part::Month => date.format("%m").to_string(),
                Part::Day => date.format("%d").to_string(),
                Part::Year => date.format("%Y").to_string(),
            })
            .collect();
        input.segments.set_segment(0, &text);
        input
    }

    pub fn order(&self) -> DateFieldOrder {
        self.order
    }

    pub fn segments(&self) -> &SegmentedInput {
        &self.segments
    }

    pub fn placeholders(&self) -> [&'static str; 3] {
        self.order.parts().map(|part| part.placeholder())
    }

    pub fn set_segment(&mut self, index: usize, text: &str) -> DateEvent {
        let event = self.segments.set_segment(index, text);
        self.date_event(event)
    }

    pub fn backspace_at(&mut self, index: usize) {
        self.segments.backspace_at(index);
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// The entered date, once every box is full and the date exists
    pub fn date(&self) -> Option<NaiveDate> {
        if !self.segments.is_complete() {
            return None;
        }
        let (mut year, mut month, mut day) = (0, 0, 0);
        for (index, part) in self.order.parts().iter().enumerate() {
            let value: u32 = self.segments.value(index).parse().ok()?;
            match part {
                Part::Year => year = value as i32,
                Part::Month => month = value,
                Part::Day => day = value,
            }
        }
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn date_event(&self, event: InputEvent) -> DateEvent {
        match event {
            InputEvent::Updated => DateEvent::Pending,
            InputEvent::Completed(_) => match self.date() {
                Some(date) => DateEvent::Completed(date),
                None => DateEvent::Invalid,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_day_year_entry() {
        let mut input = DateOfBirthInput::new(DateFieldOrder::MonthDayYear);
        assert_eq!(input.placeholders(), ["MM", "DD", "YYYY"]);

        assert_eq!(input.set_segment(0, "07"), DateEvent::Pending);
        assert_eq!(input.segments().focus(), 1);
        input.set_segment(1, "04");
        assert_eq!(
            input.set_segment(2, "1990"),
            DateEvent::Completed(NaiveDate::from_ymd_opt(1990, 7, 4).unwrap())
        );
    }

    #[test]
    fn test_order_is_configurable() {
        let mut input = DateOfBirthInput::new(DateFieldOrder::YearMonthDay);
        assert_eq!(input.segments().width(0), 4);
        assert_eq!(
            input.set_segment(0, "19900704"),
            DateEvent::Completed(NaiveDate::from_ymd_opt(1990, 7, 4).unwrap())
        );

        let mut input = DateOfBirthInput::new(DateFieldOrder::DayMonthYear);
        input.set_segment(0, "04071990");
        assert_eq!(input.date(), NaiveDate::from_ymd_opt(1990, 7, 4));
    }

    #[test]
    fn test_impossible_date_is_invalid() {
        let mut input = DateOfBirthInput::new(DateFieldOrder::MonthDayYear);
        assert_eq!(input.set_segment(0, "02302001"), DateEvent::Invalid);
        assert_eq!(input.date(), None);
    }

    #[test]
    fn test_prefill_and_clear() {
        let date = NaiveDate::from_ymd_opt(2001, 12, 9).unwrap();
        let mut input = DateOfBirthInput::with_date(DateFieldOrder::DayMonthYear, date);
        assert_eq!(input.segments().values(), ["09", "12", "2001"]);
        assert_eq!(input.date(), Some(date));

        input.clear();
        assert_eq!(input.date(), None);
        assert_eq!(input.segments().focus(), 0);
    }
}
