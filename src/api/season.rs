//! Season endpoints

section! {
    /// Official seasons and the race schedule.
    SeasonService => "season" {
        list: Linked {
            "season_year": Number required,
            "season_quarter": Number required,
        },
        /// Sessions starting soon across all series.
        race_guide: Linked {
            "from": String optional,
            "include_end_after_from": Boolean optional,
        },
        spectator_subsessionids: Linked {
            "event_types": NumberArray optional,
        },
        spectator_subsessionids_detail: Linked {
            "event_types": NumberArray optional,
            "season_ids": NumberArray optional,
        },
    }
}
