//! Bounded log of recent job runs.

use std::collections::VecDeque;

use uuid::Uuid;

use crate::types::{JobRun, JobStatus};

/// Maximum number of job runs to keep in memory.
pub(crate) const MAX_JOB_RUNS: usize = 1000;

/// Runs in start order, oldest at the front. Once full, recording a new run
/// evicts the oldest one.
#[derive(Debug, Default)]
pub(crate) struct RunHistory {
    runs: VecDeque<JobRun>,
}

impl RunHistory {
    pub(crate) fn record(&mut self, run: JobRun) {
        if self.runs.len() == MAX_JOB_RUNS {
            self.runs.pop_front();
        }
        self.runs.push_back(run);
    }

    /// Apply `f` to the run with `id`, if it is still retained.
    ///
    /// Searches from the newest end, where an executing run always sits.
    pub(crate) fn update(&mut self, id: Uuid, f: impl FnOnce(&mut JobRun)) {
        if let Some(run) = self.runs.iter_mut().rev().find(|run| run.id == id) {
            f(run);
        }
    }

    /// Fail every run still marked running. Returns how many were affected.
    pub(crate) fn fail_running(&mut self, message: &str) -> usize {
        let mut affected = 0;
        for run in self
            .runs
            .iter_mut()
            .filter(|run| run.status == JobStatus::Running)
        {
            run.fail(message);
            affected += 1;
        }
        affected
    }

    pub(crate) fn find(&self, id: Uuid) -> Option<&JobRun> {
        self.runs.iter().rev().find(|run| run.id == id)
    }

    /// Up to `limit` runs, newest first.
    pub(crate) fn recent(&self, limit: usize) -> Vec<JobRun> {
        self.runs.iter().rev().take(limit).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_run_when_full() {
        let mut history = RunHistory::default();
        let first = Uuid::new_v4();
        history.record(JobRun::started(first, "episode.add", "first"));
        for i in 0..MAX_JOB_RUNS {
            history.record(JobRun::started(Uuid::new_v4(), "episode.add", i.to_string()));
        }

        assert!(history.find(first).is_none());
        let recent = history.recent(MAX_JOB_RUNS + 10);
        assert_eq!(recent.len(), MAX_JOB_RUNS);
        assert_eq!(recent[0].job_key, (MAX_JOB_RUNS - 1).to_string());
        assert_eq!(recent[MAX_JOB_RUNS - 1].job_key, "0");
    }

    #[test]
    fn update_changes_run_in_place() {
        let mut history = RunHistory::default();
        let id = Uuid::new_v4();
        history.record(JobRun::started(id, "episode.add", "m-1"));
        history.update(id, |run| run.fail("boom"));
        history.update(Uuid::new_v4(), |run| run.complete());

        let run = history.find(id).expect("run");
        assert!(run.status.is_terminal());
        assert_eq!(run.error_message.as_deref(), Some("boom"));
        assert_eq!(history.recent(10).len(), 1);
    }

    #[test]
    fn fail_running_leaves_finished_runs_alone() {
        let mut history = RunHistory::default();
        let done = Uuid::new_v4();
        let busy = Uuid::new_v4();
        history.record(JobRun::started(done, "episode.add", "done"));
        history.update(done, JobRun::complete);
        history.record(JobRun::started(busy, "episode.add", "busy"));

        assert_eq!(history.fail_running("interrupted"), 1);
        assert_eq!(history.find(done).map(|r| r.status), Some(JobStatus::Completed));
        let busy = history.find(busy).expect("busy run");
        assert_eq!(busy.status, JobStatus::Failed);
        assert_eq!(busy.error_message.as_deref(), Some("interrupted"));
    }
}
