//! Tally ledger orchestrator. The ledger records each fulfilled unit as one
//! occurrence of its item id, in fulfillment order; every derived view
//! (partition, progress, fingerprint) is recomputed from it on demand rather
//! than cached.

mod core;

pub use core::{Partition, Progress, TallyLedger, count_fingerprint, partition, progress};
