use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;

use crate::errors::QueueError;

struct Slot<T> {
    sequence: AtomicUsize,
    value: UnsafeCell<MaybeUninit<T>>,
}

/// Bounded, lock-free, multi-producer single-consumer ring buffer.
///
/// Each slot carries its own sequence number (Vyukov's scheme): a producer
/// claims a slot by comparing the slot's sequence against the ticket it
/// drew from `enqueue_pos`, writes, then bumps the sequence to publish. The
/// single consumer does the mirror image against `dequeue_pos`. Both
/// `try_push` and `try_pop` are a single attempt each — on contention or an
/// empty/full queue they fail rather than spin, so callers own the retry
/// policy.
///
/// `capacity` must be a power of two so the index mask (`capacity - 1`) can
/// replace the modulo in the hot path.
pub struct BoundedQueue<T> {
    buffer: Box<[Slot<T>]>,
    mask: usize,
    capacity: usize,
    enqueue_pos: CachePadded<AtomicUsize>,
    dequeue_pos: CachePadded<AtomicUsize>,
}

unsafe impl<T: Send> Send for BoundedQueue<T> {}
unsafe impl<T: Send> Sync for BoundedQueue<T> {}

impl<T> BoundedQueue<T> {
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        if capacity < 2 || !capacity.is_power_of_two() {
            return Err(QueueError::InvalidCapacity(capacity));
        }

        let buffer = (0..capacity)
            .map(|i| Slot {
                sequence: AtomicUsize::new(i),
                value: UnsafeCell::new(MaybeUninit::uninit()),
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Ok(Self {
            buffer,
            mask: capacity - 1,
            capacity,
            enqueue_pos: CachePadded::new(AtomicUsize::new(0)),
            dequeue_pos: CachePadded::new(AtomicUsize::new(0)),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Claims the next slot and writes `value` into it. Fails (returning
    /// `value` back) if that slot hasn't yet been vacated by the consumer,
    /// i.e. the queue is full. Safe to call concurrently from any number of
    /// producer threads.
    pub fn try_push(&self, value: T) -> Result<(), T> {
        let pos = self.enqueue_pos.fetch_add(1, Ordering::Relaxed);
        let slot = &self.buffer[pos & self.mask];
        let seq = slot.sequence.load(Ordering::Acquire);

        if seq == pos {
            unsafe {
                (*slot.value.get()).write(value);
            }
            slot.sequence.store(pos + 1, Ordering::Release);
            Ok(())
        } else {
            Err(value)
        }
    }

    /// Claims the next slot and reads it out, if a producer has published
    /// there. `None` means the queue was empty at the moment of the
    /// attempt. Must be called from a single consumer at a time — concurrent
    /// calls would each draw a distinct ticket and race on the same slots
    /// otherwise, which this type does not guard against.
    pub fn try_pop(&self) -> Option<T> {
        let pos = self.dequeue_pos.fetch_add(1, Ordering::Relaxed);
        let slot = &self.buffer[pos & self.mask];
        let seq = slot.sequence.load(Ordering::Acquire);

        if seq == pos + 1 {
            let value = unsafe { (*slot.value.get()).assume_init_read() };
            slot.sequence.store(pos + self.capacity, Ordering::Release);
            Some(value)
        } else {
            None
        }
    }
}

impl<T> Drop for BoundedQueue<T> {
    fn drop(&mut self) {
        let dequeue = *self.dequeue_pos.get_mut();
        let enqueue = *self.enqueue_pos.get_mut();
        for pos in dequeue..enqueue {
            let slot = &mut self.buffer[pos & self.mask];
            if *slot.sequence.get_mut() == pos + 1 {
                unsafe {
                    (*slot.value.get()).assume_init_drop();
                }
            }
        }
    }
}
