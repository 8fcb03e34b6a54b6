use std::sync::OnceLock;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use crate::terminal::logging::FrontrFormatter;

const TIP_DURATION: Duration = Duration::from_secs(6);
const MESSAGE_READ_TIME: Duration = Duration::from_secs(1);
const MIN_TIP_VISIBILITY: Duration = Duration::from_millis(750);
const TIPS: &[&str] = &[
    "Probing stops early once ten fast endpoints are found",
    "Use --ranges to bring your own CIDR list",
    "A latency is the mean of three connect attempts",
];

/// Installs the tracing subscriber that renders through the spinner.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(FrontrFormatter)
        .with_writer(|| SpinnerWriter)
        .init();
}

pub struct SpinnerHandle {
    pub spinner: ProgressBar,
    tx: Sender<String>,
}

impl SpinnerHandle {
    pub fn queue_message(&self, message: String) {
        let _ = self.tx.send(message);
    }

    pub fn println(&self, msg: &str) {
        self.spinner.println(msg);
    }

    pub fn finish_and_clear(&self) {
        self.spinner.finish_and_clear();
    }
}

pub(crate) static SPINNER: OnceLock<SpinnerHandle> = OnceLock::new();

pub fn get_spinner() -> &'static SpinnerHandle {
    SPINNER.get_or_init(init_spinner)
}

fn init_spinner() -> SpinnerHandle {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));

    let (tx, rx) = mpsc::channel::<String>();
    let pb_clone = pb.clone();

    // Progress messages win over tips; a tip only appears when the queue
    // has been quiet for a while, and stays readable for a minimum time.
    thread::spawn(move || {
        let mut tip_index: usize = 0;
        let mut showing_tip_since: Option<Instant> = None;
        let mut next_action_time = Instant::now() + TIP_DURATION;

        loop {
            if pb_clone.is_finished() {
                break;
            }

            let wait_time = next_action_time.saturating_duration_since(Instant::now());

            match rx.recv_timeout(wait_time) {
                Ok(mut msg) => {
                    if let Some(since) = showing_tip_since.take() {
                        let shown = since.elapsed();
                        if shown < MIN_TIP_VISIBILITY {
                            thread::sleep(MIN_TIP_VISIBILITY - shown);
                        }
                    }
                    while let Ok(newer_msg) = rx.try_recv() {
                        msg = newer_msg;
                    }
                    pb_clone.set_message(msg);
                    next_action_time = Instant::now() + MESSAGE_READ_TIME;
                }
                Err(RecvTimeoutError::Timeout) => {
                    let tip = TIPS[tip_index % TIPS.len()];
                    pb_clone.set_message(format!("{}", tip.italic().white()));

                    tip_index += 1;
                    showing_tip_since = Some(Instant::now());
                    next_action_time = Instant::now() + TIP_DURATION;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    break;
                }
            }
        }
    });

    SpinnerHandle { spinner: pb, tx }
}

/// Per-batch progress hook for the prober.
pub fn report_probe_progress(done: usize, total: usize) {
    get_spinner().queue_message(format!(
        "Probed {} of {total} addresses...",
        done.to_string().green().bold()
    ));
}

/// Routes subscriber output through the spinner so log lines land above
/// the tick line instead of through it.
pub struct SpinnerWriter;

impl std::io::Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        get_spinner().println(msg.trim_end());
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
