use crate::common::get_current_time_or_zero;
use log::{info, warn};
use rand::rngs::OsRng;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

const NODE_ID_BITS: u64 = 10;
const SEQUENCE_BITS: u64 = 12;
const TIMESTAMP_LEFT_SHIFT: u64 = NODE_ID_BITS + SEQUENCE_BITS;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;
const MAX_NODE_ID: u64 = (1 << NODE_ID_BITS) - 1;
// Twitter epoch; with it, composed ids land in [10^18, 10^19)
const EPOCH: u64 = 1288834974657;

pub struct SnowflakeIdGenerator {
    node_id: u64,
    sequence: AtomicU64,
    last_timestamp: AtomicU64,
    mutex: Mutex<()>,
}

impl SnowflakeIdGenerator {
    pub fn new() -> Self {
        let mut generator = SnowflakeIdGenerator {
            node_id: 0,
            sequence: AtomicU64::new(0),
            last_timestamp: AtomicU64::new(0),
            mutex: Mutex::new(()),
        };

        generator.node_id = generator.get_node_id();
        if generator.node_id > MAX_NODE_ID {
            warn!("Node id can't be greater than {}", MAX_NODE_ID);
            generator.node_id = OsRng.gen_range(1..=MAX_NODE_ID);
        }
        info!("Initialized with node id: {}", generator.node_id);

        generator
    }

    pub fn get_id(&self) -> u64 {
        // Acquire the lock with poison recovery
        let _lock = match self.mutex.lock() {
            Ok(lock) => lock,
            Err(poisoned) => {
                warn!("Snowflake lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };

        let current_time = get_current_time_or_zero();
        let mut timestamp = current_time;
        let last_timestamp = self.last_timestamp.load(Ordering::Relaxed);
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) & SEQUENCE_MASK;

        // Clock moved backwards: stick to the last seen timestamp
        if timestamp <= last_timestamp {
            timestamp = last_timestamp;
            let sleep_duration = timestamp.saturating_sub(current_time);
            if sleep_duration > 0 {
                std::thread::sleep(std::time::Duration::from_millis(sleep_duration));
            }
        }

        self.last_timestamp.store(timestamp, Ordering::Relaxed);
        drop(_lock);

        ((timestamp - EPOCH) << TIMESTAMP_LEFT_SHIFT) | (self.node_id << SEQUENCE_BITS) | sequence
    }

    fn get_node_id(&self) -> u64 {
        let uuid = uuid::Uuid::new_v4();
        let uid = uuid.as_bytes();
        let rnd_byte = OsRng.gen::<u64>() & 0x000000FF;

        ((0x000000FF & uid[uid.len() - 1] as u64) | (0x0000FF00 & (rnd_byte << 8))) >> 6
    }
}

impl Default for SnowflakeIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
