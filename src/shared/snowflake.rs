//! Snowflake ID Generator
//!
//! Time-ordered 64-bit ids: 41 bits of milliseconds since a custom epoch,
//! 10 bits of machine id and a 12 bit per-millisecond sequence.

use chrono::Utc;
use parking_lot::Mutex;

/// 2024-01-01T00:00:00.000Z
pub const DEFAULT_EPOCH: u64 = 1_704_067_200_000;

pub const MAX_MACHINE_ID: u16 = (1 << MACHINE_BITS) - 1;

const MACHINE_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;
const TIMESTAMP_SHIFT: u32 = MACHINE_BITS + SEQUENCE_BITS;

#[derive(Debug, Default)]
struct GeneratorState {
    last_timestamp: u64,
    sequence: u64,
}

/// Snowflake ID generator
#[derive(Debug)]
pub struct SnowflakeGenerator {
    epoch: u64,
    machine_id: u64,
    state: Mutex<GeneratorState>,
}

impl SnowflakeGenerator {
    /// Create a generator; `machine_id` is truncated to 10 bits.
    pub fn new(machine_id: u16, epoch: u64) -> Self {
        Self {
            epoch,
            machine_id: u64::from(machine_id & MAX_MACHINE_ID),
            state: Mutex::new(GeneratorState::default()),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> i64 {
        let mut state = self.state.lock();

        // Never move backwards, even if the wall clock does.
        let mut timestamp = current_millis().max(state.last_timestamp);

        if timestamp == state.last_timestamp {
            state.sequence = (state.sequence + 1) & SEQUENCE_MASK;
            if state.sequence == 0 {
                // Sequence exhausted for this millisecond.
                while timestamp <= state.last_timestamp {
                    std::hint::spin_loop();
                    timestamp = current_millis();
                }
            }
        } else {
            state.sequence = 0;
        }
        state.last_timestamp = timestamp;

        let id = (timestamp.saturating_sub(self.epoch) << TIMESTAMP_SHIFT)
            | (self.machine_id << SEQUENCE_BITS)
            | state.sequence;

        id as i64
    }
}

fn current_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// Parse a snowflake from its decimal string form (as used in paths and JSON).
pub fn parse(s: &str) -> Option<i64> {
    s.parse::<i64>().ok().filter(|id| *id > 0)
}
