//! Cross-Thread Parameter Updates
//!
//! A UI or automation thread owns a [`ParameterSender`]; the audio thread's
//! [`EffectInstance`](crate::engine::EffectInstance) owns the matching
//! [`ParameterReceiver`]. Whole `ParameterSet` snapshots travel through a
//! wait-free SPSC ring buffer and are applied at the start of the next block,
//! so a block never sees half of an update.
//!
//! ```ignore
//! let mut chorus = EffectInstance::new(48_000);
//! let mut remote = chorus.remote(DEFAULT_QUEUE_CAPACITY);
//!
//! // UI thread
//! remote.update(|p| p.set_rate(3.0)).ok();
//!
//! // Audio thread: picks up the newest snapshot before processing
//! chorus.process_block_in_place(&mut left, &mut right)?;
//! ```

use crate::params::ParameterSet;

/// Snapshots that can be queued before the audio thread drains them
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

/// Create a connected sender/receiver pair seeded with `initial`
pub fn parameter_channel(
    initial: ParameterSet,
    capacity: usize,
) -> (ParameterSender, ParameterReceiver) {
    let (producer, consumer) = rtrb::RingBuffer::new(capacity.max(1));
    (
        ParameterSender {
            producer,
            current: initial,
        },
        ParameterReceiver { consumer },
    )
}

/// Sending side, owned by the control thread
pub struct ParameterSender {
    producer: rtrb::Producer<ParameterSet>,
    current: ParameterSet,
}

impl ParameterSender {
    /// The last snapshot accepted by the queue
    pub fn params(&self) -> &ParameterSet {
        &self.current
    }

    /// Queue a full snapshot.
    ///
    /// Returns the snapshot back if the queue is full.
    pub fn send(&mut self, params: ParameterSet) -> Result<(), ParameterSet> {
        match self.producer.push(params) {
            Ok(()) => {
                self.current = params;
                Ok(())
            }
            Err(rtrb::PushError::Full(rejected)) => {
                log::warn!("Parameter queue full, snapshot dropped");
                Err(rejected)
            }
        }
    }

    /// Edit a copy of the last accepted snapshot and queue it
    pub fn update<F>(&mut self, edit: F) -> Result<(), ParameterSet>
    where
        F: FnOnce(&mut ParameterSet),
    {
        let mut next = self.current;
        edit(&mut next);
        self.send(next)
    }

    /// Check if there's space in the queue
    pub fn has_space(&self) -> bool {
        self.producer.slots() > 0
    }

    /// Whether the receiving instance has been dropped or re-attached
    pub fn is_abandoned(&self) -> bool {
        self.producer.is_abandoned()
    }
}

/// Receiving side, owned by the audio thread
pub struct ParameterReceiver {
    consumer: rtrb::Consumer<ParameterSet>,
}

impl ParameterReceiver {
    /// Drain every pending snapshot and return only the newest
    #[inline]
    pub fn latest(&mut self) -> Option<ParameterSet> {
        let mut latest = None;
        while let Ok(params) = self.consumer.pop() {
            latest = Some(params);
        }
        latest
    }

    pub fn pending(&self) -> usize {
        self.consumer.slots()
    }
}
