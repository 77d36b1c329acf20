use std::{
  collections::VecDeque,
  fmt,
};

/// Work scheduled for a later UI turn. Receives the context that owns the
/// queue.
pub type Job<Ctx> = Box<dyn FnOnce(&mut Ctx)>;

/// Queue of jobs deferred to the next turn of the UI event loop.
///
/// The queue usually lives inside the context it runs against, so running it
/// is split in two steps: [`TurnQueue::take_turn`] detaches the jobs that are
/// due, then [`Turn::run`] executes them with the context borrowed mutably.
/// Jobs deferred while a turn runs land in the following turn.
pub struct TurnQueue<Ctx> {
  pending: VecDeque<Job<Ctx>>,
}

impl<Ctx> Default for TurnQueue<Ctx> {
  fn default() -> Self {
    Self::new()
  }
}

impl<Ctx> fmt::Debug for TurnQueue<Ctx> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TurnQueue")
      .field("pending", &self.pending.len())
      .finish()
  }
}

impl<Ctx> TurnQueue<Ctx> {
  pub fn new() -> Self {
    Self {
      pending: VecDeque::new(),
    }
  }

  pub fn defer(&mut self, job: impl FnOnce(&mut Ctx) + 'static) {
    self.pending.push_back(Box::new(job));
  }

  pub fn len(&self) -> usize {
    self.pending.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pending.is_empty()
  }

  /// Drop every pending job without running it.
  pub fn clear(&mut self) -> usize {
    let dropped = self.pending.len();
    self.pending.clear();
    dropped
  }

  pub fn take_turn(&mut self) -> Turn<Ctx> {
    Turn {
      jobs: std::mem::take(&mut self.pending),
    }
  }
}

/// Jobs detached from a [`TurnQueue`] for one UI turn.
#[must_use = "a turn does nothing until it is run"]
pub struct Turn<Ctx> {
  jobs: VecDeque<Job<Ctx>>,
}

impl<Ctx> Turn<Ctx> {
  pub fn len(&self) -> usize {
    self.jobs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.jobs.is_empty()
  }

  /// Run the jobs in the order they were deferred. Returns how many ran.
  pub fn run(self, ctx: &mut Ctx) -> usize {
    let count = self.jobs.len();
    for job in self.jobs {
      job(ctx);
    }
    count
  }
}
