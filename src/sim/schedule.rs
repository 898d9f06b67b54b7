//! Cooperative frame scheduler
//!
//! Every animation is a task that runs once per frame and decides whether
//! to run again. Tasks queued during a frame run on the next one. Tasks
//! carry the epoch they were queued in; a restart bumps the epoch so any
//! animation still in flight from the previous game is dropped unrun.

use serde::{Deserialize, Serialize};

use super::landing::FallMode;

/// Per-frame unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// Squat while the input is held
    Charge,
    /// Fly until touching down
    Launch,
    /// Topple/drop after a bad landing
    Fall(FallMode),
    /// Glide the camera look-at; runs for the life of the game
    CameraFollow,
}

impl Task {
    /// Background tasks survive restarts
    pub fn is_background(&self) -> bool {
        matches!(self, Task::CameraFollow)
    }
}

/// Outcome of running a task for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// State changed; run again next frame
    Continue,
    /// State changed; hand over to another task next frame
    Then(Task),
    /// State changed for the last time
    Done,
    /// Guard failed before touching anything
    Idle,
}

impl Step {
    /// Whether this step mutated state and needs a draw
    pub fn mutated(&self) -> bool {
        !matches!(self, Step::Idle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scheduled {
    task: Task,
    epoch: u64,
}

#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    queue: Vec<Scheduled>,
    epoch: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task for the next frame
    pub fn schedule(&mut self, task: Task) {
        self.queue.push(Scheduled {
            task,
            epoch: self.epoch,
        });
    }

    /// Start a new generation; foreground tasks queued before now are stale
    pub fn advance_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Take everything due this frame, dropping stale foreground tasks
    pub fn take_frame(&mut self) -> Vec<Task> {
        let epoch = self.epoch;
        std::mem::take(&mut self.queue)
            .into_iter()
            .filter(|s| {
                let live = s.task.is_background() || s.epoch == epoch;
                if !live {
                    log::debug!("dropping stale {:?} from epoch {}", s.task, s.epoch);
                }
                live
            })
            .map(|s| s.task)
            .collect()
    }

    pub fn is_scheduled(&self, task: Task) -> bool {
        self.queue.iter().any(|s| s.task == task)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_takes_in_order() {
        let mut scheduler = FrameScheduler::new();
        scheduler.schedule(Task::CameraFollow);
        scheduler.schedule(Task::Charge);
        assert_eq!(scheduler.take_frame(), vec![Task::CameraFollow, Task::Charge]);
        assert!(scheduler.is_empty());
        assert!(scheduler.take_frame().is_empty());
    }

    #[test]
    fn test_stale_tasks_dropped_after_epoch_bump() {
        let mut scheduler = FrameScheduler::new();
        scheduler.schedule(Task::CameraFollow);
        scheduler.schedule(Task::Launch);
        scheduler.schedule(Task::Fall(FallMode::None));
        assert_eq!(scheduler.advance_epoch(), 1);
        scheduler.schedule(Task::Charge);
        assert_eq!(scheduler.take_frame(), vec![Task::CameraFollow, Task::Charge]);
    }

    #[test]
    fn test_is_scheduled() {
        let mut scheduler = FrameScheduler::new();
        assert!(!scheduler.is_scheduled(Task::CameraFollow));
        scheduler.schedule(Task::CameraFollow);
        assert!(scheduler.is_scheduled(Task::CameraFollow));
        assert_eq!(scheduler.len(), 1);
    }
}
