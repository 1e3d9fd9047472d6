// Pack rolls
pub const RARE_PACK_CHANCE: f64 = 0.0005; // 1 in 2000
pub const REGULAR_SLOT_COUNT: usize = 5;
pub const RARE_SLOT_COUNT: usize = 3;

// Currency
pub const POINTS_PER_PACK: u64 = 5;

// Batches and reports
pub const DEFAULT_NUM_RUNS: u32 = 500;
pub const DEFAULT_BIN_WIDTH: u64 = 200;
