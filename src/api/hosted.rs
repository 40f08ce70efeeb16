//! Hosted session endpoints

section! {
    /// Hosted sessions currently listed.
    HostedService => "hosted" {
        /// Sessions that can be joined as a driver or spectator, including non-league pending sessions.
        combined_sessions: Linked {
            "package_id": Number optional,
        },
        /// Sessions that can be joined as a driver, without spectator or non-league pending sessions.
        sessions: Linked {},
    }
}
