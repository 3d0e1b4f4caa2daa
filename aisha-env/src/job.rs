//! Job table (spec.md §3 "Job table", §4.6 "Job control").

use nix::unistd::Pid;
use slab::Slab;

/// A job's run state, as tracked per spec.md §3: only the shell-visible
/// last-stage process is tracked, not a whole process group.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JobStatus {
    Running,
    Stopped,
    Done(i32),
}

/// One background or stopped job.
#[derive(Clone, Debug)]
pub struct Job {
    pub id: JobId,
    pub pid: Pid,
    pub command: String,
    pub status: JobStatus,
}

/// A job's identity, distinct from its slot in the underlying [`Slab`]:
/// spec.md requires job numbers be "monotonically assigned and never
/// reused" within a session, while `slab`'s keys are reused as soon as an
/// entry is removed. `JobId` is the number the user sees (`jobs`, `%1`,
/// `fg %1`); the slab key is purely an internal lookup detail.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct JobId(pub u32);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "%{}", self.0)
    }
}

impl JobId {
    /// Renders as `[N]`, the form spec.md §4.5/§8 uses for user-facing job
    /// announcements (background start, `jobs`, state-change notices), as
    /// opposed to [`Display`](std::fmt::Display)'s `%N`, which is the
    /// operand syntax `fg`/`bg`/`kill` parse back.
    #[must_use]
    pub fn bracketed(&self) -> String {
        format!("[{}]", self.0)
    }
}

struct Entry {
    id: JobId,
    job: Job,
}

/// The indexed job store: a `slab::Slab` for O(1) removal keyed by an
/// internal slot, paired with `order` to recover true insertion order
/// (spec.md §9's design note: replace the incidental linked-list with an
/// indexed store, while still presenting jobs in the order they were
/// started) and `next_id` to hand out ever-increasing [`JobId`]s.
#[derive(Default)]
pub struct JobTable {
    slots: Slab<Entry>,
    order: Vec<usize>,
    next_id: u32,
}

impl JobTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a newly started background or stopped job and returns its
    /// assigned [`JobId`].
    pub fn insert(&mut self, pid: Pid, command: impl Into<String>, status: JobStatus) -> JobId {
        self.next_id += 1;
        let id = JobId(self.next_id);
        let key = self.slots.insert(Entry {
            id,
            job: Job {
                id,
                pid,
                command: command.into(),
                status,
            },
        });
        self.order.push(key);
        id
    }

    #[must_use]
    pub fn get(&self, id: JobId) -> Option<&Job> {
        self.order
            .iter()
            .find_map(|&key| self.slots.get(key).filter(|e| e.id == id))
            .map(|e| &e.job)
    }

    pub fn get_mut(&mut self, id: JobId) -> Option<&mut Job> {
        let key = self
            .order
            .iter()
            .find(|&&key| self.slots.get(key).is_some_and(|e| e.id == id))
            .copied()?;
        self.slots.get_mut(key).map(|e| &mut e.job)
    }

    #[must_use]
    pub fn find_by_pid(&self, pid: Pid) -> Option<&Job> {
        self.order
            .iter()
            .find_map(|&key| self.slots.get(key).filter(|e| e.job.pid == pid))
            .map(|e| &e.job)
    }

    pub fn find_by_pid_mut(&mut self, pid: Pid) -> Option<&mut Job> {
        let key = self
            .order
            .iter()
            .find(|&&key| self.slots.get(key).is_some_and(|e| e.job.pid == pid))
            .copied()?;
        self.slots.get_mut(key).map(|e| &mut e.job)
    }

    /// Removes a job (spec.md: once reaped and reported, a `Done` job is
    /// dropped from the table). The slot is freed for reuse by `slab`; this
    /// is safe because `JobId` equality, not slot identity, is the table's
    /// external contract.
    pub fn remove(&mut self, id: JobId) -> Option<Job> {
        let pos = self
            .order
            .iter()
            .position(|&key| self.slots.get(key).is_some_and(|e| e.id == id))?;
        let key = self.order.remove(pos);
        self.slots.try_remove(key).map(|e| e.job)
    }

    /// Iterates jobs in the order they were started.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.order.iter().filter_map(|&key| self.slots.get(key)).map(|e| &e.job)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn most_recent(&self) -> Option<&Job> {
        self.order.iter().rev().find_map(|&key| self.slots.get(key)).map(|e| &e.job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_ids_are_monotonic_and_never_reused() {
        let mut table = JobTable::new();
        let a = table.insert(Pid::from_raw(100), "sleep 1", JobStatus::Running);
        let b = table.insert(Pid::from_raw(101), "sleep 2", JobStatus::Running);
        assert_eq!(a, JobId(1));
        assert_eq!(b, JobId(2));
        table.remove(a);
        let c = table.insert(Pid::from_raw(102), "sleep 3", JobStatus::Running);
        assert_eq!(c, JobId(3));
        assert!(table.get(a).is_none());
    }

    #[test]
    fn iterates_in_insertion_order_after_removal() {
        let mut table = JobTable::new();
        let a = table.insert(Pid::from_raw(1), "one", JobStatus::Running);
        let _b = table.insert(Pid::from_raw(2), "two", JobStatus::Running);
        let c = table.insert(Pid::from_raw(3), "three", JobStatus::Running);
        table.remove(a);
        let ids: Vec<JobId> = table.iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![JobId(2), c]);
    }

    #[test]
    fn find_by_pid() {
        let mut table = JobTable::new();
        table.insert(Pid::from_raw(55), "cmd", JobStatus::Running);
        assert!(table.find_by_pid(Pid::from_raw(55)).is_some());
        assert!(table.find_by_pid(Pid::from_raw(56)).is_none());
    }
}
