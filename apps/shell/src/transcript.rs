//! Renders scenario output on a writer, one line per entry.

use parking_lot::Mutex;
use persona::domain::config::TranscriptFormat;
use persona::domain::events::PersonEvent;
use serde_json::json;
use std::io::{self, Write};
use tracing::warn;

/// Line sink shared by the scenarios and the event subscribers.
#[derive(Debug)]
pub struct Transcript<W> {
    format: TranscriptFormat,
    out: Mutex<W>,
}

impl<W: Write> Transcript<W> {
    pub const fn new(format: TranscriptFormat, out: W) -> Self {
        Self { format, out: Mutex::new(out) }
    }

    /// Writes a narrative line that is not a person event.
    ///
    /// # Errors
    /// Returns any error from the underlying writer.
    pub fn line(&self, message: &str) -> io::Result<()> {
        let mut out = self.out.lock();
        match self.format {
            TranscriptFormat::Text => writeln!(out, "{message}"),
            TranscriptFormat::Json => {
                writeln!(out, "{}", json!({ "event": "note", "message": message }))
            },
        }
    }

    /// Writes a person event.
    ///
    /// # Errors
    /// Returns any error from the underlying writer or from JSON encoding.
    pub fn event(&self, event: &PersonEvent) -> io::Result<()> {
        let mut out = self.out.lock();
        match self.format {
            TranscriptFormat::Text => writeln!(out, "{event}"),
            TranscriptFormat::Json => {
                let mut value = serde_json::to_value(event)?;
                value["message"] = json!(event.to_string());
                writeln!(out, "{value}")
            },
        }
    }

    /// Event callbacks cannot return errors, so write failures are logged instead.
    pub fn event_or_warn(&self, event: &PersonEvent) {
        if let Err(e) = self.event(event) {
            warn!(error = %e, kind = event.name(), "Failed to write transcript entry");
        }
    }

    /// Same as [`Self::line`], for callers that cannot propagate errors (drops).
    pub fn line_or_warn(&self, message: &str) {
        if let Err(e) = self.line(message) {
            warn!(error = %e, line = message, "Failed to write transcript entry");
        }
    }

    pub fn flush(&self) -> io::Result<()> {
        self.out.lock().flush()
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona::domain::person::{PersonName, PersonSnapshot};

    fn render(format: TranscriptFormat, write: impl FnOnce(&Transcript<Vec<u8>>)) -> String {
        let transcript = Transcript::new(format, Vec::new());
        write(&transcript);
        String::from_utf8(transcript.into_inner()).unwrap()
    }

    #[test]
    fn text_lines_are_plain() {
        let out = render(TranscriptFormat::Text, |t| {
            t.line("Main starts").unwrap();
            t.event(&PersonEvent::Instantiated).unwrap();
        });
        assert_eq!(out, "Main starts\nPerson object instantiated without names or birth year\n");
    }

    #[test]
    fn json_events_carry_kind_and_message() {
        let snapshot = PersonSnapshot::new(PersonName::new("Scooby", "Doo"), 1969);
        let out = render(TranscriptFormat::Json, |t| {
            t.event(&PersonEvent::OutOfScope { snapshot }).unwrap();
            t.line("Main ends").unwrap();
        });

        let rows: Vec<serde_json::Value> =
            out.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(rows[0]["event"], "out_of_scope");
        assert_eq!(rows[0]["snapshot"]["year_of_birth"], 1969);
        assert_eq!(rows[0]["message"], "Person Scooby Doo born in 1969 goes out of scope");
        assert_eq!(rows[1], json!({ "event": "note", "message": "Main ends" }));
    }
}
