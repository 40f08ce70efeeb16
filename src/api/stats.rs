//! Stats endpoints

section! {
    /// Member statistics and season standings.
    StatsService => "stats" {
        member_bests: Linked {
            "cust_id": Number optional,
            "car_id": Number optional,
        },
        member_career: Linked {
            "cust_id": Number optional,
        },
        /// Division of the authenticated member; only available for the current season.
        member_division: Linked {
            "season_id": Number required,
            "event_type": Number required,
        },
        /// Recap for a year, or for one season of that year.
        member_recap: Linked {
            "cust_id": Number optional,
            "year": Number optional,
            "season": Number optional,
        },
        member_recent_races: Linked {
            "cust_id": Number optional,
        },
        member_summary: Linked {
            "cust_id": Number optional,
        },
        member_yearly: Linked {
            "cust_id": Number optional,
        },
        season_driver_standings: Linked {
            "season_id": Number required,
            "car_class_id": Number required,
            "division": Number optional,
            "race_week_num": Number optional,
        },
        season_supersession_standings: Linked {
            "season_id": Number required,
            "car_class_id": Number required,
            "division": Number optional,
            "race_week_num": Number optional,
        },
        season_team_standings: Linked {
            "season_id": Number required,
            "car_class_id": Number required,
            "race_week_num": Number optional,
        },
        season_tt_standings: Linked {
            "season_id": Number required,
            "car_class_id": Number required,
            "division": Number optional,
            "race_week_num": Number optional,
        },
        season_tt_results: Linked {
            "season_id": Number required,
            "car_class_id": Number required,
            "race_week_num": Number required,
            "division": Number optional,
        },
        season_qualify_results: Linked {
            "season_id": Number required,
            "car_class_id": Number required,
            "race_week_num": Number required,
            "division": Number optional,
        },
        world_records: Linked {
            "car_id": Number required,
            "track_id": Number required,
            "season_year": Number optional,
            "season_quarter": Number optional,
        },
    }
}
