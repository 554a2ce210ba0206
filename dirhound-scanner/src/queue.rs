use std::collections::VecDeque;
use std::sync::Mutex;

/// Shared pull-queue of candidate paths.
///
/// Loaded once before the workers start; never refilled. Once drained it
/// stays empty, which is the worker termination signal.
pub struct WorkQueue {
    items: Mutex<VecDeque<String>>,
}

impl WorkQueue {
    pub fn new(paths: impl IntoIterator<Item = String>) -> Self {
        Self {
            items: Mutex::new(paths.into_iter().collect()),
        }
    }

    /// Take the next pending path, or `None` when the queue is drained.
    /// Never blocks beyond the lock itself.
    pub fn try_pull(&self) -> Option<String> {
        self.items.lock().unwrap().pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn pulls_in_load_order_until_empty() {
        let queue = WorkQueue::new(["a", "b", "c"].map(String::from));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.try_pull().as_deref(), Some("a"));
        assert_eq!(queue.try_pull().as_deref(), Some("b"));
        assert_eq!(queue.try_pull().as_deref(), Some("c"));
        assert_eq!(queue.try_pull(), None);
        // Empty is terminal.
        assert_eq!(queue.try_pull(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn concurrent_pulls_are_disjoint_and_exhaustive() {
        let total = 10_000;
        let queue = Arc::new(WorkQueue::new((0..total).map(|i| format!("path-{i}"))));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let queue = queue.clone();
            handles.push(std::thread::spawn(move || {
                let mut pulled = Vec::new();
                while let Some(item) = queue.try_pull() {
                    pulled.push(item);
                }
                pulled
            }));
        }

        let mut seen = HashSet::new();
        let mut count = 0;
        for handle in handles {
            for item in handle.join().unwrap() {
                assert!(seen.insert(item), "item pulled by more than one thread");
                count += 1;
            }
        }
        assert_eq!(count, total);
        assert!(queue.is_empty());
    }
}
