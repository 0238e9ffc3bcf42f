//! The three demonstrations: records in nested scopes, a process-wide sentinel and a
//! function-local sentinel.

use crate::cli::Scenario;
use crate::transcript::Transcript;
use anyhow::{Result, anyhow};
use persona::domain::config::TranscriptSettings;
use persona::domain::events::PersonEvent;
use persona::events::EventBus;
use persona::person::{PersonObserver, PersonRecord, TracingObserver};
use persona::runtime::ProcessScope;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{debug, info};

/// Year the record scenario tries, and fails, to set.
pub const REJECTED_YEAR: u32 = 1800;
const SENTINEL: &str = "sentinel";

/// Wires records to the transcript: records publish on the bus, the bus feeds the
/// transcript and the lifecycle log.
pub struct Session<W> {
    bus: EventBus,
    observer: Arc<dyn PersonObserver>,
    transcript: Arc<Transcript<W>>,
}

impl<W> std::fmt::Debug for Session<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("bus", &self.bus).finish_non_exhaustive()
    }
}

impl<W: Write + Send + 'static> Session<W> {
    /// # Errors
    /// Returns an error if the transcript subscribers cannot be registered.
    pub fn new(settings: &TranscriptSettings, out: W) -> Result<Self> {
        let transcript = Arc::new(Transcript::new(settings.format, out));
        let bus = EventBus::new();

        let sink = Arc::clone(&transcript);
        bus.subscribe(move |event: &PersonEvent| sink.event_or_warn(event))?;
        bus.subscribe(|event: &PersonEvent| TracingObserver.notify(event))?;

        let observer = persona::lifecycle_observer(&bus, settings.events);
        debug!(events = ?settings.events.names(), format = ?settings.format, "Session ready");
        Ok(Self { bus, observer, transcript })
    }

    /// # Errors
    /// Returns an error if the transcript cannot be written or the process scope fails.
    pub fn run(&self, scenario: Scenario) -> Result<()> {
        info!(?scenario, "Running scenario");
        match scenario {
            Scenario::Scope => self.records(),
            Scenario::Global => self.global(),
            Scenario::Local => self.local().map_err(Into::into),
        }
    }

    /// Closes the bus and hands back the writer.
    ///
    /// # Errors
    /// Returns an error if the transcript is still shared or cannot be flushed.
    pub fn finish(self) -> Result<W> {
        let Self { bus, observer, transcript } = self;
        drop(observer);
        let closed = bus.shutdown();
        debug!(closed, "Event bus closed");

        transcript.flush()?;
        Arc::try_unwrap(transcript)
            .map(Transcript::into_inner)
            .map_err(|_| anyhow!("Transcript is still in use"))
    }

    fn records(&self) -> Result<()> {
        let mut one = PersonRecord::new(Arc::clone(&self.observer));
        let _two = PersonRecord::with_details("Sponge", "Bob", 1999, Arc::clone(&self.observer));

        one.set_name("Mickey", "Mouse");
        one.set_year_of_birth(1928)?;

        self.nested_record();

        if let Err(e) = one.set_year_of_birth(REJECTED_YEAR) {
            debug!(error = %e, "Year of birth rejected");
            self.transcript.line(&format!("Could not set the birth year to {REJECTED_YEAR}"))?;
        }

        Ok(())
    }

    fn nested_record(&self) {
        let _x = PersonRecord::with_details("Scooby", "Doo", 1969, Arc::clone(&self.observer));
    }

    fn global(&self) -> Result<()> {
        let transcript = Arc::clone(&self.transcript);
        ProcessScope::builder()
            .install(SENTINEL, move || Sentinel::new(transcript).map_err(Into::into))
            .start()?
            .run(|_| self.transcript.line("Main ends"))?;
        Ok(())
    }

    fn local(&self) -> io::Result<()> {
        self.transcript.line("Main starts")?;
        self.local_func()?;
        self.transcript.line("Main ends")
    }

    fn local_func(&self) -> io::Result<()> {
        self.transcript.line("Func starts")?;
        let _t = Sentinel::new(Arc::clone(&self.transcript))?;
        self.transcript.line("Func ends")
    }
}

/// Announces its construction and destruction, nothing else.
struct Sentinel<W: Write> {
    transcript: Arc<Transcript<W>>,
}

impl<W: Write> Sentinel<W> {
    fn new(transcript: Arc<Transcript<W>>) -> io::Result<Self> {
        transcript.line("Test object instantiated")?;
        Ok(Self { transcript })
    }
}

impl<W: Write> Drop for Sentinel<W> {
    fn drop(&mut self) {
        self.transcript.line_or_warn("Test object destroyed");
    }
}
