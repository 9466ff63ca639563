//! Non-blocking filter recomputation
//!
//! Every call to [`LiveFilter::schedule`] starts a new recomputation and
//! aborts the one in flight. Readers always see the most recently completed
//! result through [`LiveFilter::current`]; while a newer one is running the
//! view carries `pending = true`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::config::FilterConfig;
use super::engine::Predicate;
use crate::model::Artist;

/// Records evaluated between yields to the scheduler
pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// A completed filter result
#[derive(Debug, Clone)]
pub struct FilterView {
    /// Generation of the schedule call that produced this result
    pub generation: u64,
    pub config: FilterConfig,
    pub artists: Arc<[Artist]>,
    /// A newer recomputation is in flight
    pub pending: bool,
}

impl FilterView {
    fn initial() -> Self {
        Self {
            generation: 0,
            config: FilterConfig::default(),
            artists: Arc::from(Vec::new()),
            pending: false,
        }
    }
}

/// Background filter recomputation with supersede-and-abort semantics
pub struct LiveFilter {
    tx: Arc<watch::Sender<FilterView>>,
    latest: Arc<AtomicU64>,
    task: Mutex<Option<JoinHandle<()>>>,
    chunk_size: usize,
}

impl LiveFilter {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FilterView::initial());
        Self {
            tx: Arc::new(tx),
            latest: Arc::new(AtomicU64::new(0)),
            task: Mutex::new(None),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Start recomputing for `config` over `records`, superseding any
    /// recomputation still running. Returns the new generation.
    ///
    /// Outside a Tokio runtime the work is done inline.
    pub fn schedule(&self, records: Arc<[Artist]>, config: FilterConfig) -> u64 {
        // Held from the generation bump until the handle is stored, so a
        // handle is only ever replaced by one of a later generation
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);

        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx.send_modify(|view| view.pending = true);

        let job = Recompute {
            generation,
            records,
            config,
            chunk_size: self.chunk_size,
            tx: Arc::clone(&self.tx),
            latest: Arc::clone(&self.latest),
        };

        let handle = match Handle::try_current() {
            Ok(runtime) => runtime.spawn(job.run()),
            Err(_) => {
                job.run_blocking();
                return generation;
            }
        };

        if let Some(previous) = task.replace(handle) {
            previous.abort();
        }

        tracing::debug!(generation, "Scheduled filter recomputation");
        generation
    }

    /// Most recently completed result; never waits
    pub fn current(&self) -> FilterView {
        self.tx.borrow().clone()
    }

    /// True while a scheduled recomputation has not completed
    pub fn is_pending(&self) -> bool {
        self.tx.borrow().pending
    }

    /// Watch completed results as they are published
    pub fn subscribe(&self) -> watch::Receiver<FilterView> {
        self.tx.subscribe()
    }

    /// Wait until the latest scheduled configuration has been applied
    pub async fn settled(&self) -> FilterView {
        let mut rx = self.tx.subscribe();
        loop {
            {
                let view = rx.borrow_and_update();
                if !view.pending && view.generation == self.latest.load(Ordering::SeqCst) {
                    return view.clone();
                }
            }
            if rx.changed().await.is_err() {
                return self.current();
            }
        }
    }
}

impl Default for LiveFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LiveFilter {
    fn drop(&mut self) {
        let task = self
            .task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            task.abort();
        }
    }
}

/// One recomputation job
struct Recompute {
    generation: u64,
    records: Arc<[Artist]>,
    config: FilterConfig,
    chunk_size: usize,
    tx: Arc<watch::Sender<FilterView>>,
    latest: Arc<AtomicU64>,
}

impl Recompute {
    async fn run(self) {
        let predicate = Predicate::compile(&self.config);
        let mut kept = Vec::new();

        for chunk in self.records.chunks(self.chunk_size) {
            if self.is_superseded() {
                return;
            }
            kept.extend(chunk.iter().filter(|a| predicate.test(a)).cloned());
            tokio::task::yield_now().await;
        }

        self.publish(kept);
    }

    fn run_blocking(self) {
        let predicate = Predicate::compile(&self.config);
        let kept = self
            .records
            .iter()
            .filter(|a| predicate.test(a))
            .cloned()
            .collect();
        self.publish(kept);
    }

    fn is_superseded(&self) -> bool {
        self.latest.load(Ordering::SeqCst) != self.generation
    }

    fn publish(self, kept: Vec<Artist>) {
        let Recompute {
            generation,
            config,
            tx,
            latest,
            ..
        } = self;

        let published = tx.send_if_modified(|view| {
            // Checked under the channel lock so a superseded job can never
            // overwrite a newer result.
            if latest.load(Ordering::SeqCst) != generation {
                return false;
            }
            *view = FilterView {
                generation,
                config,
                artists: kept.into(),
                pending: false,
            };
            true
        });

        if published {
            tracing::debug!(generation, "Published filter result");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::apply;
    use crate::model::{fixtures, Category};

    fn roster() -> Arc<[Artist]> {
        fixtures::artists().into()
    }

    #[tokio::test]
    async fn test_settles_on_scheduled_config() {
        let live = LiveFilter::new();
        let config = FilterConfig::new().with_category(Category::Singer);

        let generation = live.schedule(roster(), config.clone());
        let view = live.settled().await;

        assert_eq!(view.generation, generation);
        assert!(!view.pending);
        assert_eq!(view.artists.to_vec(), apply(&fixtures::artists(), &config));
    }

    #[tokio::test]
    async fn test_pending_until_completed() {
        let live = LiveFilter::new().with_chunk_size(1);
        live.schedule(roster(), FilterConfig::default());

        // The job has not run yet on this single-threaded runtime
        assert!(live.is_pending());
        assert_eq!(live.current().generation, 0);

        live.settled().await;
        assert!(!live.is_pending());
    }

    #[tokio::test]
    async fn test_latest_schedule_wins() {
        let live = LiveFilter::new().with_chunk_size(1);

        live.schedule(roster(), FilterConfig::new().with_location("n"));
        live.schedule(roster(), FilterConfig::new().with_location("ne"));
        let last = FilterConfig::new().with_location("new york");
        let generation = live.schedule(roster(), last.clone());

        let view = live.settled().await;
        assert_eq!(view.generation, generation);
        assert_eq!(view.config, last);
        assert!(view.artists.iter().all(|a| a.location == "New York"));
    }

    #[tokio::test]
    async fn test_superseded_results_are_never_published() {
        let live = LiveFilter::new().with_chunk_size(1);
        let mut rx = live.subscribe();

        let first = live.schedule(roster(), FilterConfig::new().with_category(Category::Dj));
        let last = live.schedule(roster(), FilterConfig::new().with_category(Category::Band));

        let collector = tokio::spawn(async move {
            let mut seen = Vec::new();
            while rx.changed().await.is_ok() {
                let view = rx.borrow_and_update().clone();
                seen.push(view.generation);
                if !view.pending && view.generation == last {
                    break;
                }
            }
            seen
        });

        let seen = collector.await.unwrap();
        assert!(!seen.contains(&first));
        assert_eq!(seen.last(), Some(&last));
    }

    #[test]
    fn test_concurrent_schedules_always_settle() {
        let live = Arc::new(LiveFilter::new().with_chunk_size(2));
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .enable_all()
            .build()
            .unwrap();

        for round in 0..200 {
            let callers: Vec<_> = (0..4)
                .map(|i| {
                    let live = Arc::clone(&live);
                    let handle = runtime.handle().clone();
                    std::thread::spawn(move || {
                        let _guard = handle.enter();
                        let config = FilterConfig::new().with_price(0, 1000 * (i + 1));
                        live.schedule(roster(), config);
                    })
                })
                .collect();
            for caller in callers {
                caller.join().unwrap();
            }

            let settled = runtime.block_on(async {
                tokio::time::timeout(std::time::Duration::from_secs(5), live.settled()).await
            });
            let view = settled.unwrap_or_else(|_| panic!("round {} never settled", round));
            assert!(!view.pending);
            assert_eq!(view.generation, live.latest.load(Ordering::SeqCst));
        }
    }

    #[test]
    fn test_runs_inline_without_runtime() {
        let live = LiveFilter::new();
        let generation = live.schedule(roster(), FilterConfig::new().with_location("boston"));

        let view = live.current();
        assert_eq!(view.generation, generation);
        assert!(!view.pending);
        assert_eq!(view.artists.len(), 1);
    }
}
