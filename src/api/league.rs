//! League endpoints

section! {
    /// Leagues, their seasons and members.
    LeagueService => "league" {
        /// League sessions visible to the authenticated member.
        cust_league_sessions: Linked {
            "mine": Boolean optional,
            "package_id": Number optional,
        },
        /// Searchable league directory.
        directory: Linked {
            "search": String optional,
            "tag": String optional,
            "restrict_to_member": Boolean optional,
            "restrict_to_recruiting": Boolean optional,
            "restrict_to_friends": Boolean optional,
            "restrict_to_watched": Boolean optional,
            "minimum_roster_count": Number optional,
            "maximum_roster_count": Number optional,
            "lowerbound": Number optional,
            "upperbound": Number optional,
            "sort": String optional,
            "order": String optional,
        },
        get: Linked {
            "league_id": Number required,
            "include_licenses": Boolean optional,
        },
        get_points_systems: Linked {
            "league_id": Number required,
            "season_id": Number optional,
        },
        membership: Linked {
            "cust_id": Number optional,
            "include_league": Boolean optional,
        },
        roster: Linked {
            "league_id": Number required,
            "include_licenses": Boolean optional,
        },
        seasons: Linked {
            "league_id": Number required,
            "retired": Boolean optional,
        },
        season_standings: Linked {
            "league_id": Number required,
            "season_id": Number required,
            "car_class_id": Number optional,
            "car_id": Number optional,
        },
        season_sessions: Linked {
            "league_id": Number required,
            "season_id": Number required,
            "results_only": Boolean optional,
        },
    }
}
