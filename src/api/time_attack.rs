//! Time attack endpoints

section! {
    /// Time attack competition results.
    TimeAttackService => "time_attack" {
        /// Results of the authenticated member in a time attack competition season.
        member_season_results: Linked {
            "ta_comp_season_id": Number required,
        },
    }
}
