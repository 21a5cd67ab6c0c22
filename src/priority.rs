//! Where [`Treap`][crate::Treap] priorities come from.
//!
//! Any [`rand::RngCore`] is a priority source, so a treap can be driven by a
//! seeded generator for reproducible shapes. [`ScriptedPriorities`] hands out
//! a fixed sequence instead, which makes individual rotations testable.

use rand::RngCore;

/// A source of node priorities. One priority is drawn per inserted key.
pub trait PrioritySource {
    /// Returns the priority for the next node.
    fn next_priority(&mut self) -> u32;
}

impl<R: RngCore> PrioritySource for R {
    fn next_priority(&mut self) -> u32 {
        self.next_u32()
    }
}

/// Replays a fixed list of priorities, starting over once it runs out. An
/// empty script gives every node priority `0`.
///
/// # Examples
///
/// ```
/// use balanced_map::{PrioritySource, ScriptedPriorities};
///
/// let mut priorities = ScriptedPriorities::new(vec![10, 20]);
/// assert_eq!(priorities.next_priority(), 10);
/// assert_eq!(priorities.next_priority(), 20);
/// assert_eq!(priorities.next_priority(), 10);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedPriorities {
    script: Vec<u32>,
    cursor: usize,
}

impl ScriptedPriorities {
    /// Creates a source that replays `script`.
    pub fn new(script: Vec<u32>) -> Self {
        Self { script, cursor: 0 }
    }
}

impl PrioritySource for ScriptedPriorities {
    fn next_priority(&mut self) -> u32 {
        if self.script.is_empty() {
            return 0;
        }
        let priority = self.script[self.cursor];
        self.cursor = (self.cursor + 1) % self.script.len();
        priority
    }
}
