//! Constant lookup tables
//!
//! These are the only endpoints that answer inline instead of with a
//! presigned link.

section! {
    /// Small, rarely changing lookup tables.
    ConstantsService => "constants" {
        /// License categories (oval, road, dirt oval, ...).
        categories: Direct {},
        /// Division numbers and names.
        divisions: Direct {},
        /// Event types (practice, qualify, time trial, race).
        event_types: Direct {},
    }
}
