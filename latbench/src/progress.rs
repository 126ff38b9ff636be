use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use indicatif::{ProgressBar, ProgressStyle};

use crate::target::Target;

/// Receives one unit of work per finished attempt.
///
/// A sink is optional: the executor behaves the same without one, it just prints
/// failure notices directly to stdout instead of handing them to [`notice`].
///
/// [`notice`]: ProgressSink::notice
pub trait ProgressSink: Send + Sync {
    /// A target is about to get `attempts` attempts.
    fn begin(&self, _target: &Target, _attempts: u64) {}

    /// One attempt finished, successfully or not.
    fn advance(&self);

    /// All attempts for the current target are done.
    fn finish(&self) {}

    /// Print a line without garbling whatever the sink draws.
    fn notice(&self, line: &str) {
        println!("{line}");
    }
}

impl<S: ProgressSink + ?Sized> ProgressSink for Arc<S> {
    fn begin(&self, target: &Target, attempts: u64) {
        (**self).begin(target, attempts)
    }

    fn advance(&self) {
        (**self).advance()
    }

    fn finish(&self) {
        (**self).finish()
    }

    fn notice(&self, line: &str) {
        (**self).notice(line)
    }
}

const BAR_TEMPLATE: &str = "{msg} {percent:>3}%|{wide_bar}| {pos}/{len} [{elapsed_precise}<{eta_precise}]";

/// Terminal progress bar, one per target.
///
/// The bar draws on stderr and disappears when stderr is not a terminal. Notices
/// never go through the bar: they are written to `out` (stdout by default) while the
/// bar is suspended, so they show up whether or not the bar is visible.
pub struct BarProgress {
    bar: Mutex<Option<ProgressBar>>,
    out: Mutex<Box<dyn Write + Send>>,
    label_width: usize,
}

impl BarProgress {
    pub fn new(label_width: usize) -> Self {
        Self::with_writer(label_width, io::stdout())
    }

    /// Like [`BarProgress::new`], with notices going to `out` instead of stdout.
    pub fn with_writer(label_width: usize, out: impl Write + Send + 'static) -> Self {
        Self {
            bar: Mutex::new(None),
            out: Mutex::new(Box::new(out)),
            label_width,
        }
    }

    fn write_notice(&self, line: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            tracing::warn!("Failed to write notice: {e}");
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        let guard = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(bar) = guard.as_ref() {
            f(bar);
        }
    }
}

impl ProgressSink for BarProgress {
    fn begin(&self, target: &Target, attempts: u64) {
        let bar = ProgressBar::new(attempts);
        match ProgressStyle::with_template(BAR_TEMPLATE) {
            Ok(style) => bar.set_style(style),
            Err(e) => tracing::debug!("Falling back to default progress style: {e}"),
        }
        bar.set_message(target.label(self.label_width));

        let mut guard = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(bar);
    }

    fn advance(&self) {
        self.with_bar(|bar| bar.inc(1));
    }

    fn finish(&self) {
        let mut guard = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(bar) = guard.take() {
            bar.finish();
        }
    }

    fn notice(&self, line: &str) {
        let guard = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(bar) => bar.suspend(|| self.write_notice(line)),
            None => self.write_notice(line),
        }
    }
}

/// Cloneable in-memory writer, for capturing notices in tests.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuf(Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuf {
    pub(crate) fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_tracks_attempts() {
        let progress = BarProgress::new(15);
        let target = Target::parse("http://127.0.0.1:9000/tracking").unwrap();

        progress.begin(&target, 3);
        progress.advance();
        progress.advance();
        progress.with_bar(|bar| {
            assert_eq!(bar.position(), 2);
            assert_eq!(bar.length(), Some(3));
            assert_eq!(bar.message(), "http://127.0.0.");
        });
        progress.finish();

        assert!(progress.bar.lock().unwrap().is_none());
    }

    #[test]
    fn notices_reach_writer_while_bar_is_active() {
        let buf = SharedBuf::default();
        let progress = BarProgress::with_writer(15, buf.clone());
        let target = Target::parse("http://127.0.0.1:1/").unwrap();

        progress.notice("before any bar");
        progress.begin(&target, 2);
        progress.notice("Couldn't connect: http://127.0.0.1:1/");
        progress.advance();
        progress.finish();

        assert_eq!(
            buf.lines(),
            vec!["before any bar", "Couldn't connect: http://127.0.0.1:1/"]
        );
    }

    #[test]
    fn advance_without_target_is_a_no_op() {
        let progress = BarProgress::new(15);
        progress.advance();
        progress.finish();
    }
}
