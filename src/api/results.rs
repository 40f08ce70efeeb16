//! Results endpoints

section! {
    /// Subsession results, lap data and searches.
    ResultsService => "results" {
        /// Full results of one subsession.
        get: Linked {
            "subsession_id": Number required,
            "include_licenses": Boolean optional,
        },
        event_log: Linked {
            "subsession_id": Number required,
            "simsession_number": Number required,
        },
        lap_chart_data: Linked {
            "subsession_id": Number required,
            "simsession_number": Number required,
        },
        /// Laps of one driver or team in a simsession.
        lap_data: Linked {
            "subsession_id": Number required,
            "simsession_number": Number required,
            "cust_id": Number optional,
            "team_id": Number optional,
        },
        /// Hosted and league session results.
        ///
        /// Either `start_range_begin` or `finish_range_begin`, plus one of
        /// `cust_id`, `team_id`, `host_cust_id` or `session_name`, is expected
        /// by the service.
        search_hosted: Linked {
            "start_range_begin": String optional,
            "start_range_end": String optional,
            "finish_range_begin": String optional,
            "finish_range_end": String optional,
            "cust_id": Number optional,
            "team_id": Number optional,
            "host_cust_id": Number optional,
            "session_name": String optional,
            "league_id": Number optional,
            "league_season_id": Number optional,
            "car_id": Number optional,
            "track_id": Number optional,
            "category_ids": NumberArray optional,
        },
        /// Official series results.
        search_series: Linked {
            "season_year": Number optional,
            "season_quarter": Number optional,
            "start_range_begin": String optional,
            "start_range_end": String optional,
            "finish_range_begin": String optional,
            "finish_range_end": String optional,
            "cust_id": Number optional,
            "team_id": Number optional,
            "series_id": Number optional,
            "race_week_num": Number optional,
            "official_only": Boolean optional,
            "event_types": NumberArray optional,
            "category_ids": NumberArray optional,
        },
        season_results: Linked {
            "season_id": Number required,
            "event_type": Number optional,
            "race_week_num": Number optional,
        },
    }
}
