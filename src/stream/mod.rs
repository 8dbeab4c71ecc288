//! JSON-lines message stream.
//!
//! One [`Message`] per input line in, the same message with its docs attached
//! out. Blank lines are skipped.

mod error;


pub use error::{StreamError, StreamResult};

use std::io::{BufRead, Write};

use tracing::debug;

use crate::adapter::ModelAdapter;
use crate::message::Message;

/// Runs every message of `reader` through `adapter`, writing one line each.
///
/// Returns the number of messages written. Stops at the first bad line.
pub fn process_lines<R: BufRead, W: Write>(
    adapter: &ModelAdapter,
    reader: R,
    mut writer: W,
) -> StreamResult<usize> {
    let mut processed = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut message: Message =
            serde_json::from_str(&line).map_err(|source| StreamError::InvalidMessage {
                line: line_no,
                source,
            })?;
        adapter
            .process(&mut message)
            .map_err(|source| StreamError::Model {
                line: line_no,
                source,
            })?;

        serde_json::to_writer(&mut writer, &message).map_err(|source| StreamError::Encode {
            line: line_no,
            source,
        })?;
        writer.write_all(b"\n")?;
        processed += 1;
    }

    writer.flush()?;
    debug!(processed, "Message stream drained");
    Ok(processed)
}
