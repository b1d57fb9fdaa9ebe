// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use std::time::Instant;

use crate::site::SiteDescriptor;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a non-fatal warning. Shown in every mode.
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {message}"),
            OutputMode::Json => emit_json(&JsonEvent {
                event: "warning",
                message,
                duration_secs: None,
            }),
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                // Print only the essential result
                println!("{message}");
            }
            OutputMode::Json => emit_json(&JsonEvent {
                event: "success",
                message,
                duration_secs: self.duration(),
            }),
        }
    }

    /// Print the app state returned by a publish.
    pub fn site(&self, site: &SiteDescriptor) {
        match self.mode {
            OutputMode::Normal => {
                println!("App: {}", site.app);
                if let Some(ref slot) = site.slot {
                    println!("Slot: {slot}");
                }
                if let Some(ref group) = site.resource_group {
                    println!("Resource group: {group}");
                }
                println!("SCM: {}", site.scm_uri);
                match site.latest_deployment {
                    Some(ref deployment) => {
                        println!(
                            "Latest deployment: {} (complete: {}, active: {})",
                            deployment.id.as_deref().unwrap_or("unknown"),
                            deployment.complete,
                            deployment.active
                        );
                        if let Some(state) = deployment.state() {
                            println!("State: {state}");
                        }
                        if let Some(ref message) = deployment.message {
                            println!("Message: {message}");
                        }
                    }
                    None => println!("Latest deployment: none reported"),
                }
            }
            OutputMode::Quiet => {}
            OutputMode::Json => emit_json(&SiteEvent {
                event: "site",
                site,
            }),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                if let Ok(json) = serde_json::to_string(&JsonEvent {
                    event: "error",
                    message,
                    duration_secs: self.duration(),
                }) {
                    eprintln!("{json}");
                }
            }
        }
    }
}

fn emit_json<T: Serialize>(event: &T) {
    if let Ok(json) = serde_json::to_string(event) {
        println!("{json}");
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

#[derive(Serialize)]
struct SiteEvent<'a> {
    event: &'a str,
    site: &'a SiteDescriptor,
}
