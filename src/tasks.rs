//! Task Scope
//!
//! Requests and timers started by a component are registered here so they can
//! be aborted when the component goes away, instead of completing into
//! disposed signals.

use std::collections::HashMap;
use std::future::Future;

use futures_util::future::{AbortHandle, Abortable};
use leptos::prelude::*;
use leptos::task::spawn_local;

pub type TaskId = u64;

/// Abort handles of in-flight tasks. Dropping the set aborts them all.
#[derive(Default)]
pub struct TaskSet {
    next_id: TaskId,
    handles: HashMap<TaskId, AbortHandle>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `fut` so it can be aborted through this set
    pub fn register<F: Future>(&mut self, fut: F) -> (TaskId, Abortable<F>) {
        let (handle, registration) = AbortHandle::new_pair();
        self.next_id += 1;
        self.handles.insert(self.next_id, handle);
        (self.next_id, Abortable::new(fut, registration))
    }

    /// Forget a finished task
    pub fn release(&mut self, id: TaskId) -> bool {
        self.handles.remove(&id).is_some()
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.handles.remove(&id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) -> usize {
        let count = self.handles.len();
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
        count
    }
}

impl Drop for TaskSet {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Reactive handle over a `TaskSet`
#[derive(Clone, Copy)]
pub struct TaskScope {
    tasks: StoredValue<TaskSet>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self {
            tasks: StoredValue::new(TaskSet::new()),
        }
    }

    /// Scope that is cancelled when the current component is cleaned up
    pub fn for_component() -> Self {
        let scope = Self::new();
        on_cleanup(move || {
            let cancelled = scope.cancel_all();
            if cancelled > 0 {
                log::debug!("cancelled {} pending task(s) on teardown", cancelled);
            }
        });
        scope
    }

    /// Register `fut` in this scope. The returned future yields `None` when
    /// the task was aborted and deregisters itself when it completes.
    pub fn track<F>(&self, fut: F) -> Option<(TaskId, impl Future<Output = Option<F::Output>>)>
    where
        F: Future + 'static,
    {
        let Some((id, task)) = self.tasks.try_update_value(|tasks| tasks.register(fut)) else {
            log::debug!("task scope already disposed, dropping task");
            return None;
        };
        let tasks = self.tasks;
        let tracked = async move {
            match task.await {
                Ok(output) => {
                    tasks.try_update_value(|t| t.release(id));
                    Some(output)
                }
                Err(_) => {
                    log::debug!("task {} aborted", id);
                    None
                }
            }
        };
        Some((id, tracked))
    }

    /// Run `fut` on the local executor unless the scope is cancelled first
    pub fn spawn<F>(&self, fut: F) -> Option<TaskId>
    where
        F: Future<Output = ()> + 'static,
    {
        let (id, tracked) = self.track(fut)?;
        spawn_local(async move {
            tracked.await;
        });
        Some(id)
    }

    pub fn cancel(&self, id: TaskId) -> bool {
        self.tasks.try_update_value(|t| t.cancel(id)).unwrap_or(false)
    }

    pub fn cancel_all(&self) -> usize {
        self.tasks.try_update_value(|t| t.cancel_all()).unwrap_or(0)
    }
}

impl Default for TaskScope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::Aborted;
    use std::cell::Cell;
    use std::rc::Rc;

    #[tokio::test]
    async fn test_registered_task_completes() {
        let mut set = TaskSet::new();
        let (id, task) = set.register(async { 42 });

        assert_eq!(task.await, Ok(42));
        assert!(set.release(id));
        assert!(!set.release(id));
        assert!(!set.cancel(id));
    }

    #[tokio::test]
    async fn test_cancel_all_aborts_pending() {
        let mut set = TaskSet::new();
        let (_, first) = set.register(async { "first" });
        let (_, second) = set.register(async { "second" });

        assert_eq!(set.cancel_all(), 2);
        assert_eq!(first.await, Err(Aborted));
        assert_eq!(second.await, Err(Aborted));
    }

    #[tokio::test]
    async fn test_cancel_single_task() {
        let mut set = TaskSet::new();
        let (a, task_a) = set.register(async { 1 });
        let (_, task_b) = set.register(async { 2 });

        assert!(set.cancel(a));
        assert!(!set.cancel(a));
        assert_eq!(task_a.await, Err(Aborted));
        assert_eq!(task_b.await, Ok(2));
    }

    #[tokio::test]
    async fn test_drop_aborts() {
        let task = {
            let mut set = TaskSet::new();
            set.register(async {}).1
        };
        assert_eq!(task.await, Err(Aborted));
    }

    #[tokio::test]
    async fn test_scope_releases_finished_task() {
        let owner = Owner::new();
        let scope = owner.with(TaskScope::new);

        let (id, task) = scope.track(async { 5 }).unwrap();

        assert_eq!(task.await, Some(5));
        assert!(!scope.cancel(id));
        assert_eq!(scope.cancel_all(), 0);
    }

    #[tokio::test]
    async fn test_component_cleanup_skips_continuation() {
        let owner = Owner::new();
        let scope = owner.with(TaskScope::for_component);
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();

        let (_, task) = scope.track(async move { flag.set(true) }).unwrap();
        owner.cleanup();

        assert_eq!(task.await, None);
        assert!(!ran.get());
    }

    #[tokio::test]
    async fn test_cancel_by_id_through_scope() {
        let owner = Owner::new();
        let scope = owner.with(TaskScope::new);
        let (first, a) = scope.track(async { "a" }).unwrap();
        let (_, b) = scope.track(async { "b" }).unwrap();

        assert!(scope.cancel(first));

        assert_eq!(a.await, None);
        assert_eq!(b.await, Some("b"));
    }
}
