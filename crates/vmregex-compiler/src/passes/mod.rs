//! Post-build passes over the tuple arena, run in this order:
//!
//! 1. `break_loops` - cut epsilon cycles that consume nothing
//! 2. `branch_collapse` - skip single-successor epsilon states
//! 3. `consolidate` - fold literal runs into pooled strings

mod branch_collapse;
mod break_loops;
mod consolidate;


pub use branch_collapse::remove_branch_to_branch;
pub use break_loops::break_loops;
pub use consolidate::consolidate_strings;
