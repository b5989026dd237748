//! Timer-driven highlight/selection state machine.

use super::tree::{CommitPolicy, OptionTree};

/// Scan stage. `Scanning(depth)` auto-advances the path component at `depth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Scanning(usize),
}

/// Highlight position plus timer flags. `path.len()` is always `depth + 1` while
/// scanning and 0 while idle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanState {
    pub stage: Stage,
    pub path: Vec<usize>,
    pub timer_armed: bool,
    pub timer_running: bool,
}

impl ScanState {
    fn idle() -> Self {
        Self {
            stage: Stage::Idle,
            path: Vec::new(),
            timer_armed: false,
            timer_running: false,
        }
    }
}

/// Item chosen at the deepest level of its branch.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit<A> {
    pub path: Vec<usize>,
    pub label: String,
    pub action: Option<A>,
}

/// Result of feeding one event to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition<A> {
    /// Nothing changed (stale tick, empty tree, idle timer).
    None,
    /// Stage or highlight moved; redraw.
    Highlight,
    /// An item committed; the engine already reset or resumed per the item's policy.
    Committed(Commit<A>),
}

impl<A> Transition<A> {
    pub fn is_none(&self) -> bool {
        matches!(self, Transition::None)
    }
}

/// Generic scan engine. Screens own one each and swap trees in with [`ScanEngine::set_tree`].
#[derive(Debug, Clone)]
pub struct ScanEngine<A> {
    tree: OptionTree<A>,
    state: ScanState,
    session: u64,
}

impl<A: Clone> ScanEngine<A> {
    pub fn new(tree: OptionTree<A>) -> Self {
        Self {
            tree,
            state: ScanState::idle(),
            session: 0,
        }
    }

    pub fn tree(&self) -> &OptionTree<A> {
        &self.tree
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    pub fn path(&self) -> &[usize] {
        &self.state.path
    }

    pub fn timer_running(&self) -> bool {
        self.state.timer_running
    }

    /// Changes whenever the timer is armed or the engine is reset. Tick sources tag
    /// their ticks with it so a tick from a previous session is dropped.
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Single switch press.
    pub fn activate(&mut self) -> Transition<A> {
        match self.state.stage {
            Stage::Idle => self.arm(),
            Stage::Scanning(_) => {
                self.clamp_path();
                let Some(item) = self.tree.item_at(&self.state.path) else {
                    return self.fall_back_to_root();
                };
                let (is_leaf, is_placeholder, policy) =
                    (item.is_leaf(), item.is_placeholder(), item.policy);
                let commit = Commit {
                    path: self.state.path.clone(),
                    label: item.label.clone(),
                    action: item.action.clone(),
                };
                if !is_leaf {
                    self.state.path.push(0);
                    self.state.stage = Stage::Scanning(self.state.path.len() - 1);
                    return Transition::Highlight;
                }
                if is_placeholder {
                    tracing::debug!(path = ?commit.path, "activation on placeholder ignored");
                    self.state.path = vec![0];
                    self.state.stage = Stage::Scanning(0);
                    return Transition::Highlight;
                }
                match policy {
                    CommitPolicy::Stop => self.reset(),
                    CommitPolicy::Resume => {
                        self.state.path = vec![0];
                        self.state.stage = Stage::Scanning(0);
                    }
                }
                tracing::debug!(path = ?commit.path, label = %commit.label, "item committed");
                Transition::Committed(commit)
            }
        }
    }

    /// Timer tick for the current session.
    pub fn tick(&mut self) -> Transition<A> {
        if !self.state.timer_running {
            return Transition::None;
        }
        let Stage::Scanning(_) = self.state.stage else {
            return Transition::None;
        };
        self.clamp_path();
        let Some((last, prefix)) = self.state.path.split_last() else {
            return Transition::None;
        };
        let count = self.tree.sibling_count(prefix);
        if count == 0 {
            return Transition::None;
        }
        let next = (*last + 1) % count;
        if let Some(slot) = self.state.path.last_mut() {
            *slot = next;
        }
        Transition::Highlight
    }

    /// Tick tagged with the session that scheduled it.
    pub fn tick_for_session(&mut self, session: u64) -> Transition<A> {
        if session != self.session {
            return Transition::None;
        }
        self.tick()
    }

    /// Force the engine back to idle: timer off, path cleared, pending ticks invalidated.
    pub fn reset(&mut self) {
        self.state = ScanState::idle();
        self.session = self.session.wrapping_add(1);
    }

    /// Swap in a new tree, keeping the stage and clamping the highlight to the new shape.
    pub fn set_tree(&mut self, tree: OptionTree<A>) -> Transition<A> {
        self.tree = tree;
        if matches!(self.state.stage, Stage::Idle) {
            return Transition::None;
        }
        if self.tree.is_empty() {
            self.reset();
            return Transition::Highlight;
        }
        let before = self.state.path.clone();
        self.clamp_path();
        if before == self.state.path {
            Transition::None
        } else {
            Transition::Highlight
        }
    }

    fn arm(&mut self) -> Transition<A> {
        if self.tree.is_empty() {
            tracing::debug!("activation ignored: empty option tree");
            return Transition::None;
        }
        self.session = self.session.wrapping_add(1);
        self.state = ScanState {
            stage: Stage::Scanning(0),
            path: vec![0],
            timer_armed: true,
            timer_running: true,
        };
        Transition::Highlight
    }

    fn fall_back_to_root(&mut self) -> Transition<A> {
        if self.tree.is_empty() {
            self.reset();
        } else {
            self.state.path = vec![0];
            self.state.stage = Stage::Scanning(0);
        }
        Transition::Highlight
    }

    /// Pull every component back inside the tree. A level that vanished entirely sends
    /// the highlight back to the first root item.
    fn clamp_path(&mut self) {
        if self.state.path.is_empty() {
            return;
        }
        for depth in 0..self.state.path.len() {
            let count = self.tree.sibling_count(&self.state.path[..depth]);
            if count == 0 {
                if self.tree.is_empty() {
                    self.reset();
                } else {
                    self.state.path = vec![0];
                    self.state.stage = Stage::Scanning(0);
                }
                return;
            }
            let slot = &mut self.state.path[depth];
            *slot = (*slot).min(count - 1);
        }
        self.state.stage = Stage::Scanning(self.state.path.len() - 1);
    }
}
