//! Property-based tests for the admin console
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Test Modules
//!
//! - `table_view_props`: search, filter and sort over subscription and payment tables
//!   - Filtered rows are exactly the records matching the query and filters
//!   - Sorting already-sorted rows keeps their order, with tied keys
//!   - Re-requesting a sort twice restores the first order
//!   - "Uploads left" ranks by `total - used`
//!
//! - `stats_props`: dashboard aggregation
//!   - Active users never exceed total users
//!   - Plan counts sum to total users
//!   - Revenue equals the payment sum
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable.

mod stats_props;
mod table_view_props;
