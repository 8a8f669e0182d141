//! Tracing setup, including the owo log format.

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::owo::Owoifier;

/// Initialize tracing with the standard env-filter setup. When `owo`
/// is set, the event formatter runs each log message through the
/// transform, the same treatment the bot gives all text it touches.
/// Structured fields stay untransformed so diagnostics keep their
/// exact values.
pub fn init(owo: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if owo {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .event_format(OwoFormat::new())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

/// Event formatter that owo-ifies the log message line.
pub struct OwoFormat {
    owo: Owoifier,
}

impl OwoFormat {
    pub fn new() -> Self {
        Self {
            owo: Owoifier::new(),
        }
    }
}

impl Default for OwoFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, N> FormatEvent<S, N> for OwoFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = FieldSplitter::default();
        event.record(&mut visitor);

        let message = self
            .owo
            .owoify(&visitor.message.unwrap_or_default(), &mut rand::thread_rng());

        write!(writer, "{:>5} {message}", event.metadata().level())?;
        for (name, value) in &visitor.fields {
            write!(writer, " {name}={value}")?;
        }
        writeln!(writer)
    }
}

/// Splits the `message` field off from an event's other fields.
#[derive(Default)]
struct FieldSplitter {
    message: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl Visit for FieldSplitter {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push((field.name(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.fields.push((field.name(), format!("{value:?}")));
        }
    }
}
