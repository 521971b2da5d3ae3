use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A value tagged with a priority, as stored in a [`PriorityQueue`].
#[derive(Clone, Debug)]
pub struct PriorityEntry<T> {
    priority: f64,
    seq: u64,
    value: T,
}

impl<T> PriorityEntry<T> {
    /// Priority this entry was queued with.
    pub fn priority(&self) -> f64 {
        self.priority
    }

    /// Borrow the queued value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Take ownership of the queued value.
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> PartialEq for PriorityEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for PriorityEntry<T> {}

impl<T> PartialOrd for PriorityEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for PriorityEntry<T> {
    // Reversed so the max-heap pops the smallest priority first, then the oldest insertion.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority queue with first-in-first-out order among equal priorities.
///
/// Used for timer events keyed by due time.
#[derive(Clone, Debug)]
pub struct PriorityQueue<T> {
    heap: BinaryHeap<PriorityEntry<T>>,
    next_seq: u64,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T> PriorityQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `value` with `priority`.
    pub fn push(&mut self, priority: f64, value: T) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(PriorityEntry {
            priority,
            seq,
            value,
        });
    }

    /// Peek at the entry with the smallest priority.
    pub fn peek(&self) -> Option<&PriorityEntry<T>> {
        self.heap.peek()
    }

    /// Remove the entry with the smallest priority.
    pub fn pop(&mut self) -> Option<PriorityEntry<T>> {
        self.heap.pop()
    }

    /// Remove the head entry only when its priority is `<= limit`.
    pub fn pop_due(&mut self, limit: f64) -> Option<PriorityEntry<T>> {
        if self.heap.peek()?.priority <= limit {
            self.heap.pop()
        } else {
            None
        }
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Return `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every queued entry.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/queue.rs"]
mod tests;
