/// # Constants with reserved meanings in Robata

/// In a given tensor shape, Robata reserves the `0th` dimension for batching
pub const BATCH_DIM: usize = 0;
