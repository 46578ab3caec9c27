/// Fixed-capacity FIFO that keeps only the most recently pushed items.
///
/// Storage is allocated once; after `capacity` pushes every push overwrites
/// the oldest slot.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    capacity: usize,
    /// Slot the next push writes to once the buffer is full.
    head: usize,
    entries: Vec<T>,
}

impl<T> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            head: 0,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }

        if self.entries.len() < self.capacity {
            self.entries.push(item);
            return;
        }

        self.entries[self.head] = item;
        self.head = (self.head + 1) % self.capacity;
    }

    /// Consumes the buffer, returning the held items oldest first.
    pub fn drain(mut self) -> Vec<T> {
        self.entries.rotate_left(self.head);
        self.entries
    }
}
