use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::{FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::registry::LookupSpan;

/// Prints `[+] message`, and with `-vv` also the crate that emitted it.
pub struct SweepFormatter {
    show_origin: bool,
}

impl SweepFormatter {
    pub fn new(show_origin: bool) -> Self {
        Self { show_origin }
    }
}

fn marker(level: &Level) -> ColoredString {
    match *level {
        Level::ERROR => "[-]".red().bold(),
        Level::WARN => "[*]".yellow().bold(),
        Level::INFO => "[+]".green().bold(),
        Level::DEBUG => "[?]".blue(),
        Level::TRACE => "[ ]".dimmed(),
    }
}

/// `snmpsweep_core::query` becomes `core`.
fn origin(target: &str) -> &str {
    let krate: &str = target.split("::").next().unwrap_or(target);
    krate.strip_prefix("snmpsweep_").unwrap_or(krate)
}

impl<S, N> FormatEvent<S, N> for SweepFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        write!(writer, "{} ", marker(meta.level()))?;

        if self.show_origin {
            let tag: String = format!("{}:", origin(meta.target()));
            write!(writer, "{} ", tag.as_str().dimmed())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Diagnostics go to stderr; stdout is reserved for scan results.
///
/// `RUST_LOG` wins over the verbosity flag when set.
pub fn init(verbose: bool) {
    let default_level: &str = if verbose { "debug" } else { "info" };
    let filter: EnvFilter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(SweepFormatter::new(verbose))
        .init();
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
