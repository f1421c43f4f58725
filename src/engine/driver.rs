//! Async settling on the tokio timer
//!
//! [`settle_async`] sleeps until each pending deadline and ticks the session,
//! handing newly appended transcript lines to a callback. A [`Cancellation`]
//! raised from another thread (a Ctrl-C handler) shuts the session down.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tracing::info;

use super::clock::{Clock, SharedClock};
use super::session::Session;
use crate::session::TerminalLine;

/// Clock reading tokio's time, so paused test runtimes control it
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    epoch: tokio::time::Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            epoch: tokio::time::Instant::now(),
        }
    }

    pub fn shared() -> SharedClock {
        Arc::new(Self::new())
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        tokio::time::Instant::now().saturating_duration_since(self.epoch)
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Shared cancellation flag with wake-up
#[derive(Debug, Default)]
pub struct Cancellation {
    flag: AtomicBool,
    notify: Notify,
}

impl Cancellation {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    pub async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        self.notify.notified().await;
    }
}

/// Apply everything that falls due without sleeping
pub fn tick_and_report<F>(session: &mut Session, on_lines: &mut F) -> usize
where
    F: FnMut(&[TerminalLine]),
{
    let seen = session.state().transcript().len();
    let applied = session.tick();
    let fresh = session.state().transcript().since(seen);
    if !fresh.is_empty() {
        on_lines(fresh);
    }
    applied
}

/// Wait for all pending completions, reporting new lines as they land.
///
/// Returns the number of resolutions applied. If `cancel` is raised first,
/// the session is shut down and the remaining completions never apply.
pub async fn settle_async<F>(session: &mut Session, cancel: &Cancellation, mut on_lines: F) -> usize
where
    F: FnMut(&[TerminalLine]),
{
    let mut applied = 0;

    while let Some(due) = session.next_due() {
        if cancel.is_cancelled() {
            session.shutdown();
            break;
        }

        let now = session.now();
        if due > now {
            tokio::select! {
                _ = tokio::time::sleep(due - now) => {}
                _ = cancel.cancelled() => {
                    info!("settling interrupted");
                    session.shutdown();
                    break;
                }
            }
        }

        applied += tick_and_report(session, &mut on_lines);
    }

    applied
}

/// Let `duration` pass on the tokio timer, then apply whatever fell due.
///
/// Returns the number of resolutions applied. If `cancel` is raised during
/// the wait, the session is shut down and nothing is applied.
pub async fn sleep_async<F>(
    session: &mut Session,
    cancel: &Cancellation,
    duration: Duration,
    mut on_lines: F,
) -> usize
where
    F: FnMut(&[TerminalLine]),
{
    if cancel.is_cancelled() {
        session.shutdown();
        return 0;
    }

    tokio::select! {
        _ = tokio::time::sleep(duration) => {}
        _ = cancel.cancelled() => {
            info!("sleep interrupted");
            session.shutdown();
            return 0;
        }
    }

    tick_and_report(session, &mut on_lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::session::SeedProfile;

    fn empty_session() -> Session {
        let config = SessionConfig {
            seed: SeedProfile::Empty,
            ..SessionConfig::default()
        };
        Session::new(config, TokioClock::shared()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_async_reports_lines_in_order() {
        let mut session = empty_session();
        let start = tokio::time::Instant::now();
        session.submit_command("docker ps");
        session.submit_command("echo hi");

        let cancel = Cancellation::new();
        let mut seen = Vec::new();
        let applied = settle_async(&mut session, &cancel, |lines| {
            seen.extend(lines.iter().map(|l| l.text.clone()));
        })
        .await;

        assert_eq!(applied, 2);
        assert_eq!(
            seen,
            vec![
                "Docker command executed",
                "✓ Containers updated",
                "$",
                "✓ Command executed successfully",
                "$"
            ]
        );
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_async_waits_for_test_run() {
        let mut session = empty_session();
        let start = tokio::time::Instant::now();
        session.run_test_suite();

        let cancel = Cancellation::new();
        settle_async(&mut session, &cancel, |_| {}).await;

        assert_eq!(session.status().passed_tests, 4);
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_async_applies_due_work() {
        let mut session = empty_session();
        session.submit_command("echo hi");

        let cancel = Cancellation::new();
        let mut seen = Vec::new();
        let applied = sleep_async(&mut session, &cancel, Duration::from_millis(1500), |lines| {
            seen.extend(lines.iter().map(|l| l.text.clone()));
        })
        .await;

        assert_eq!(applied, 1);
        assert_eq!(seen, vec!["✓ Command executed successfully", "$"]);
        assert!(!session.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_sleep_shuts_down() {
        let mut session = empty_session();
        session.submit_command("echo hi");

        let cancel = Cancellation::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            trigger.cancel();
        });

        let start = tokio::time::Instant::now();
        let applied = sleep_async(&mut session, &cancel, Duration::from_millis(5000), |_| {}).await;

        assert_eq!(applied, 0);
        assert!(session.is_closed());
        assert!(start.elapsed() < Duration::from_millis(5000));
        assert_eq!(session.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_settle_shuts_down() {
        let mut session = empty_session();
        session.submit_command("echo hi");

        let cancel = Cancellation::new();
        cancel.cancel();
        let applied = settle_async(&mut session, &cancel, |_| {}).await;

        assert_eq!(applied, 0);
        assert!(session.is_closed());
        assert_eq!(session.pending(), 0);
        assert_eq!(session.state().transcript().len(), 2);
    }
}
