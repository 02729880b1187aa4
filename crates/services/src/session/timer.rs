use std::ops::ControlFlow;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// A repeating tick source owned by the session controller.
///
/// At most one tick task exists per timer: `arm` disarms any previous task
/// before spawning a new one. Disarming aborts the task, so no further ticks
/// are delivered; it is idempotent and also runs on drop.
#[derive(Debug, Default)]
pub struct CountdownTimer {
    task: Option<JoinHandle<()>>,
}

impl CountdownTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking every `period`. The first tick fires one full period from
    /// now. `on_tick` returning `Break` ends the task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn arm<F>(&mut self, period: Duration, mut on_tick: F)
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        self.disarm();
        let first = Instant::now() + period;
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(first, period);
            loop {
                interval.tick().await;
                if on_tick().is_break() {
                    break;
                }
            }
        });
        self.task = Some(task);
    }

    pub fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting(count: &Arc<AtomicU32>, stop_at: u32) -> impl FnMut() -> ControlFlow<()> + Send + 'static {
        let count = Arc::clone(count);
        move || {
            if count.fetch_add(1, Ordering::SeqCst) + 1 >= stop_at {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period_until_break() {
        let count = Arc::new(AtomicU32::new(0));
        let mut timer = CountdownTimer::new();
        timer.arm(Duration::from_secs(1), counting(&count, 3));
        assert!(timer.is_armed());

        time::sleep(Duration::from_millis(999)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn disarm_cancels_pending_ticks() {
        let count = Arc::new(AtomicU32::new(0));
        let mut timer = CountdownTimer::new();
        timer.arm(Duration::from_secs(1), counting(&count, u32::MAX));

        time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        timer.disarm();
        timer.disarm();
        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_replaces_the_previous_task() {
        let first = Arc::new(AtomicU32::new(0));
        let second = Arc::new(AtomicU32::new(0));
        let mut timer = CountdownTimer::new();

        timer.arm(Duration::from_secs(1), counting(&first, u32::MAX));
        time::sleep(Duration::from_millis(1500)).await;
        timer.arm(Duration::from_secs(1), counting(&second, u32::MAX));
        time::sleep(Duration::from_millis(3200)).await;

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_ticking() {
        let count = Arc::new(AtomicU32::new(0));
        {
            let mut timer = CountdownTimer::new();
            timer.arm(Duration::from_secs(1), counting(&count, u32::MAX));
            time::sleep(Duration::from_millis(1500)).await;
        }
        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
