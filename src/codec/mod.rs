#![doc = r#"
The wire codec: a byte-oriented decoder and its mirrored encoder.

Entry points live on [`MidiFile`](crate::MidiFile); this module holds
the state machines behind them.
"#]

mod decoder;
mod encoder;

pub(crate) use decoder::decode_file;
pub(crate) use encoder::{encode_file, encoded_events_len};
