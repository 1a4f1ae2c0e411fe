use atomic_counter::{AtomicCounter, RelaxedCounter};
use indicatif::{ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How often, in milliseconds, a visible bar is redrawn.
const REFRESH_RATE: u64 = 100;

/// Something that can be ticked from many threads at once.
pub trait ProgressBar: Sync {
    /// Advance the bar by one.
    fn tick(&self) {
        self.tick_by(1)
    }
    /// Advance the bar by an amount.
    fn tick_by(&self, amount: usize);
}

/// A progress bar that is never drawn.
pub struct HiddenBar {}

impl ProgressBar for HiddenBar {
    fn tick_by(&self, _amount: usize) {}
}

/// Contains the indicatif progress bar and an atomic_counter RelaxedCounter.
/// The counter is cheap to bump from worker threads and a refresher thread
/// moves the bar to the counter's value.
pub struct Bar {
    counter: Arc<RelaxedCounter>,
    /// An Arc wrapped ProgressBar from indicatif.
    pub pbar: Arc<indicatif::ProgressBar>,
}

impl Bar {
    /// Creates a visible Bar with a length and a prefix.
    pub fn new(length: usize, prefix: String) -> Self {
        let progress_bar = indicatif::ProgressBar::hidden();
        progress_bar.set_length(length as u64);
        progress_bar.set_prefix(prefix);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{prefix}[{bar:40}] [{elapsed_precise}] {percent:>3}%",
                )
                .progress_chars("=>-"),
        );
        progress_bar.set_draw_target(ProgressDrawTarget::stderr());
        let pb = Arc::new(progress_bar);
        let pb2 = pb.clone();
        let counter = Arc::new(RelaxedCounter::new(0));
        let counter2 = counter.clone();
        thread::spawn(move || {
            while Arc::strong_count(&counter2) > 1 && !pb2.is_finished() {
                pb2.set_position(counter2.get() as u64);
                thread::sleep(Duration::from_millis(REFRESH_RATE));
            }
        });
        Self { counter, pbar: pb }
    }

    /// The current value of the counter.
    pub fn position(&self) -> usize {
        self.counter.get()
    }
}

impl ProgressBar for Bar {
    fn tick_by(&self, amount: usize) {
        self.counter.add(amount);
    }
}

impl Drop for Bar {
    /// make sure we clear bars when the object is dropped
    fn drop(&mut self) {
        if !self.pbar.is_finished() {
            let value = self.counter.get() as u64;
            self.pbar.set_position(value);
            self.pbar.finish_and_clear();
        }
    }
}

/// Returns a visible [`Bar`] or a [`HiddenBar`].
pub fn new_bar(visible: bool,
               length: usize,
               prefix: String)
               -> Box<dyn ProgressBar> {
    if visible {
        Box::new(Bar::new(length, prefix))
    } else {
        Box::new(HiddenBar {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_new() {
        let bar = Bar::new(10, String::new());
        assert_eq!(bar.position(), 0);
    }

    #[test]
    fn progress_tick() {
        let bar = Bar::new(10, String::new());
        bar.tick();
        bar.tick_by(3);
        assert_eq!(bar.position(), 4)
    }

    #[test]
    fn progress_hidden_tick() {
        let bar = new_bar(false, 10, String::new());
        bar.tick();
    }
}
