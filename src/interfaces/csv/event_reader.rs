use crate::domain::ports::TouchAction;
use crate::error::{CoreError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum HostEventKind {
    Init,
    Resume,
    Pause,
    Teardown,
    Exit,
    Touch,
    Key,
    Pay,
}

/// One scripted host event. Only the columns relevant to the event kind
/// are populated; the rest stay empty in the CSV.
#[derive(Debug, Deserialize, PartialEq)]
pub struct HostEvent {
    pub event: HostEventKind,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub action: Option<TouchAction>,
    pub code: Option<i32>,
    pub amount: Option<Decimal>,
}

/// Reads host events from a CSV source.
///
/// Wraps `csv::Reader` and provides an iterator over `Result<HostEvent>`,
/// trimming whitespace and tolerating flexible record lengths.
pub struct EventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EventReader<R> {
    /// Creates a new `EventReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes host events.
    pub fn events(self) -> impl Iterator<Item = Result<HostEvent>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CoreError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "event, x, y, action, code, amount\n\
                    init, , , , , \n\
                    touch, 120.0, 80.0, down, , \n\
                    key, , , , 23, \n\
                    pay, , , , , 5.00";
        let reader = EventReader::new(data.as_bytes());
        let results: Vec<Result<HostEvent>> = reader.events().collect();

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().event, HostEventKind::Init);

        let touch = results[1].as_ref().unwrap();
        assert_eq!(touch.event, HostEventKind::Touch);
        assert_eq!(touch.x, Some(120.0));
        assert_eq!(touch.y, Some(80.0));
        assert_eq!(touch.action, Some(TouchAction::Down));

        assert_eq!(results[2].as_ref().unwrap().code, Some(23));
        assert_eq!(results[3].as_ref().unwrap().amount, Some(dec!(5.00)));
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "event, x, y, action, code, amount\nwarp, , , , , ";
        let reader = EventReader::new(data.as_bytes());
        let results: Vec<Result<HostEvent>> = reader.events().collect();

        assert!(results[0].is_err());
    }
}
