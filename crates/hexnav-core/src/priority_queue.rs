//! Binary min-heap keyed by a numeric priority.
//!
//! There is no decrease-key. Searches push a fresh entry when a priority
//! improves and skip stale entries with a visited set when they pop.
//! Order among equal priorities is unspecified.
//!
//! A queue is plain mutable state for one search; it is never shared.

/// An entry in the heap.
#[derive(Clone, Debug)]
struct QueueNode<T, P> {
    item: T,
    priority: P,
}

/// Array-backed binary min-heap.
///
/// # Example
/// ```
/// use hexnav_core::priority_queue::PriorityQueue;
///
/// let mut queue = PriorityQueue::new();
/// queue.push("far", 10.0);
/// queue.push("near", 1.0);
/// assert_eq!(queue.pop(), Some("near"));
/// assert_eq!(queue.pop(), Some("far"));
/// assert_eq!(queue.pop(), None);
/// ```
#[derive(Clone, Debug)]
pub struct PriorityQueue<T, P = f64> {
    heap: Vec<QueueNode<T, P>>,
}

impl<T, P> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        Self { heap: Vec::new() }
    }
}

impl<T, P: PartialOrd> PriorityQueue<T, P> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    /// Number of entries, stale ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Insert an item in O(log n).
    pub fn push(&mut self, item: T, priority: P) {
        self.heap.push(QueueNode { item, priority });
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the item with the smallest priority, or `None`
    /// when the queue is empty.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.heap.pop()?;
        if self.heap.is_empty() {
            return Some(last.item);
        }

        let top = std::mem::replace(&mut self.heap[0], last);
        self.sift_down(0);
        Some(top.item)
    }

    /// The item with the smallest priority, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.heap.first().map(|node| &node.item)
    }

    /// Drop every entry along with the backing storage.
    pub fn clear(&mut self) {
        self.heap = Vec::new();
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !(self.heap[index].priority < self.heap[parent].priority) {
                break;
            }
            self.heap.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();

        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.heap[left].priority < self.heap[smallest].priority {
                smallest = left;
            }
            if right < len && self.heap[right].priority < self.heap[smallest].priority {
                smallest = right;
            }
            if smallest == index {
                break;
            }

            self.heap.swap(index, smallest);
            index = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_heap_order() {
        let mut queue = PriorityQueue::new();
        queue.push("high", 10.0);
        queue.push("low", 1.0);
        queue.push("medium", 5.0);

        assert_eq!(queue.pop(), Some("low"));
        assert_eq!(queue.pop(), Some("medium"));
        assert_eq!(queue.pop(), Some("high"));
    }

    #[test]
    fn test_equal_priorities() {
        let mut queue = PriorityQueue::new();
        queue.push("first", 5);
        queue.push("second", 5);
        queue.push("third", 3);

        assert_eq!(queue.pop(), Some("third"));
        let next = queue.pop();
        assert!(next == Some("first") || next == Some("second"));
        assert!(queue.pop().is_some());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_empty_signals() {
        let mut queue: PriorityQueue<u32> = PriorityQueue::new();
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.peek(), None);
    }

    #[test]
    fn test_size_tracking() {
        let mut queue = PriorityQueue::new();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());

        queue.push('a', 1.0);
        assert_eq!(queue.len(), 1);
        assert!(!queue.is_empty());

        queue.pop();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut queue = PriorityQueue::new();
        queue.push(7u32, 2.5);
        queue.push(3u32, 0.5);

        assert_eq!(queue.peek(), Some(&3));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut queue = PriorityQueue::with_capacity(16);
        for i in 0..10 {
            queue.push(i, f64::from(i));
        }
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);

        queue.push(42, 0.0);
        assert_eq!(queue.pop(), Some(42));
    }

    #[test]
    fn test_interleaved_push_pop() {
        let mut queue = PriorityQueue::new();
        queue.push(5, 5u32);
        queue.push(2, 2);
        assert_eq!(queue.pop(), Some(2));
        queue.push(1, 1);
        queue.push(9, 9);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(5));
        assert_eq!(queue.pop(), Some(9));
    }
}
