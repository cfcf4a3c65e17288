//! Colorful console output for solver events.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//! Everything goes to stderr; stdout is left to the caller's results.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve start/end, normalization, termination)
//! - **DEBUG**: Progress updates (1/sec with speed and best score)

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter applied when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVE: &str = "dishes_solver=info";

/// Initializes the solver console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing. `RUST_LOG` overrides the default
/// `dishes_solver=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut builder = EnvFilter::builder();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse::<Directive>() {
            builder = builder.with_default_directive(directive);
        }
        let filter = builder.from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let line = format!("dishes v{} - exhaustive fair distribution", VERSION);

    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{}", line.bright_cyan().bold());
    let _ = stderr.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();

        if !target.starts_with("dishes_solver") && !target.starts_with("dishes::") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    score: Option<String>,
    reason: Option<String>,
    steps: Option<u64>,
    speed: Option<u64>,
    duration_ms: Option<u64>,
    people_count: Option<u64>,
    dish_count: Option<u64>,
    search_space: Option<u64>,
    worker_count: Option<u64>,
    top_k: Option<u64>,
}

impl EventVisitor {
    fn record_string(&mut self, field: &Field, value: String) {
        match field.name() {
            "event" => self.event = Some(value),
            "score" => self.score = Some(value),
            "reason" => self.reason = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_string(field, s.trim_matches('"').to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "steps" => self.steps = Some(value),
            "speed" => self.speed = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "people_count" => self.people_count = Some(value),
            "dish_count" => self.dish_count = Some(value),
            "search_space" => self.search_space = Some(value),
            "worker_count" => self.worker_count = Some(value),
            "top_k" => self.top_k = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_string(field, value.to_string());
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "solve_skipped" => format_solve_skipped(),
        "solve_terminated" => format_solve_terminated(v),
        "normalize" => format_normalize(v),
        "progress" => format_progress(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let people = v.people_count.unwrap_or(0);
    let dishes = v.dish_count.unwrap_or(0);
    let space = v.search_space.unwrap_or(0);
    let workers = v.worker_count.unwrap_or(0);

    let mut output = format!(
        "{} {} Solving │ {} people │ {} dishes │ {} distributions",
        format_elapsed(),
        "▶".bright_green().bold(),
        format_count(people).bright_yellow(),
        format_count(dishes).bright_yellow(),
        format_count(space).bright_magenta()
    );

    if workers == 0 {
        output.push_str(" │ sequential");
    } else {
        output.push_str(&format!(
            " │ {} workers",
            format_count(workers).bright_yellow()
        ));
    }

    if let Some(top_k) = v.top_k {
        output.push_str(&format!(" │ top {}", format_count(top_k).bright_yellow()));
    }

    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let steps = v.steps.unwrap_or(0);
    let speed = v.speed.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} Solving complete │ {} │ {} scored │ {}/s │ best {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(duration).yellow(),
        format_count(steps).white(),
        format_count(speed).bright_magenta().bold(),
        format_score(score)
    )
}

fn format_solve_skipped() -> String {
    format!(
        "{} {} Nothing to solve │ top 0",
        format_elapsed(),
        "○".bright_black()
    )
}

fn format_solve_terminated(v: &EventVisitor) -> String {
    let reason = v.reason.as_deref().unwrap_or("unknown");
    let steps = v.steps.unwrap_or(0);

    format!(
        "{} {} Solving aborted │ {} │ {} scored",
        format_elapsed(),
        "✗".bright_red().bold(),
        reason.bright_red(),
        format_count(steps).white()
    )
}

fn format_normalize(v: &EventVisitor) -> String {
    let people = v.people_count.unwrap_or(0);

    format!(
        "{} {} Normalizing ratings │ {} people",
        format_elapsed(),
        "~".bright_blue(),
        format_count(people).bright_yellow()
    )
}

fn format_progress(v: &EventVisitor) -> String {
    let steps = v.steps.unwrap_or(0);
    let speed = v.speed.unwrap_or(0);
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} {:>14} scored │ {:>12}/s │ best {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        format_count(steps).white(),
        format_count(speed).bright_magenta().bold(),
        format_score(score)
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_score(score: &str) -> String {
    match score.parse::<f64>() {
        Ok(n) if n < 0.0 => score.bright_red().to_string(),
        Ok(n) if n > 0.0 => score.bright_green().to_string(),
        _ => score.white().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let v = EventVisitor {
            event: Some("worker_done".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&v).is_empty());
    }

    #[test]
    fn test_solve_start_mentions_scale() {
        let v = EventVisitor {
            event: Some("solve_start".to_string()),
            people_count: Some(3),
            dish_count: Some(12),
            search_space: Some(531_441),
            worker_count: Some(0),
            ..EventVisitor::default()
        };
        let output = format_event(&v);
        assert!(output.contains("531,441"));
        assert!(output.contains("sequential"));
    }

    #[test]
    fn test_terminated_shows_reason() {
        let v = EventVisitor {
            event: Some("solve_terminated".to_string()),
            reason: Some("time limit 2s".to_string()),
            steps: Some(10),
            ..EventVisitor::default()
        };
        assert!(format_event(&v).contains("time limit 2s"));
    }
}
