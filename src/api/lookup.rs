//! Lookup endpoints

section! {
    /// Reference data lookups.
    LookupService => "lookup" {
        countries: Linked {},
        /// Find drivers by name or customer id.
        drivers: Linked {
            "search_term": String required,
            "league_id": Number optional,
        },
        /// Profile flairs.
        flairs: Linked {},
        /// Club and other weekly-updated lookups.
        get: Linked {},
        licenses: Linked {},
    }
}
