use super::*;

/// Runs a task once no newer task has been scheduled for `delay`.
///
/// Scheduling or cancelling only aborts a task that is still waiting out
/// its quiet period. Once a task has started it runs to completion.
pub(crate) struct Debouncer {
  delay: Duration,
  handle: Handle,
  waiting: Option<JoinHandle<()>>,
}

impl Debouncer {
  pub(crate) fn cancel(&mut self) {
    if let Some(waiting) = self.waiting.take() {
      waiting.abort();
    }
  }

  pub(crate) fn new(handle: Handle, delay: Duration) -> Self {
    Self {
      delay,
      handle,
      waiting: None,
    }
  }

  pub(crate) fn schedule<F>(&mut self, task: F)
  where
    F: Future<Output = ()> + Send + 'static,
  {
    self.cancel();

    let (delay, handle) = (self.delay, self.handle.clone());

    self.waiting = Some(self.handle.spawn(async move {
      time::sleep(delay).await;
      handle.spawn(task);
    }));
  }
}

impl Drop for Debouncer {
  fn drop(&mut self) {
    self.cancel();
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    std::sync::{
      Arc,
      atomic::{AtomicUsize, Ordering},
    },
  };

  fn counting_task(counter: Arc<AtomicUsize>) -> impl Future<Output = ()> {
    async move {
      counter.fetch_add(1, Ordering::SeqCst);
    }
  }

  fn debouncer() -> Debouncer {
    Debouncer::new(Handle::current(), SEARCH_DEBOUNCE)
  }

  async fn settle(duration: Duration) {
    time::sleep(duration).await;

    for _ in 0..8 {
      tokio::task::yield_now().await;
    }
  }

  #[tokio::test(start_paused = true)]
  async fn task_runs_after_quiet_period() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut debouncer = debouncer();

    debouncer.schedule(counting_task(Arc::clone(&counter)));

    settle(Duration::from_millis(499)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 0);

    settle(Duration::from_millis(2)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn rescheduling_restarts_the_quiet_period() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut debouncer = debouncer();

    debouncer.schedule(counting_task(Arc::clone(&counter)));
    settle(Duration::from_millis(300)).await;

    debouncer.schedule(counting_task(Arc::clone(&counter)));
    settle(Duration::from_millis(300)).await;

    assert_eq!(counter.load(Ordering::SeqCst), 0);

    settle(Duration::from_millis(250)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn cancel_within_quiet_period_skips_the_task() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut debouncer = debouncer();

    debouncer.schedule(counting_task(Arc::clone(&counter)));
    settle(Duration::from_millis(100)).await;

    debouncer.cancel();
    settle(Duration::from_secs(2)).await;

    assert_eq!(counter.load(Ordering::SeqCst), 0);
  }

  #[tokio::test(start_paused = true)]
  async fn started_task_survives_cancel() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut debouncer = debouncer();

    let slow = {
      let counter = Arc::clone(&counter);

      async move {
        time::sleep(Duration::from_secs(1)).await;
        counter.fetch_add(1, Ordering::SeqCst);
      }
    };

    debouncer.schedule(slow);
    settle(Duration::from_millis(600)).await;

    debouncer.cancel();
    settle(Duration::from_secs(2)).await;

    assert_eq!(counter.load(Ordering::SeqCst), 1);
  }
}
