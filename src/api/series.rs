//! Series endpoints

section! {
    /// Official series.
    SeriesService => "series" {
        assets: Linked {},
        get: Linked {},
        past_seasons: Linked {
            "series_id": Number required,
        },
        /// Current seasons, or those of a given year and quarter.
        seasons: Linked {
            "include_series": Boolean optional,
            "season_year": Number optional,
            "season_quarter": Number optional,
        },
        stats_series: Linked {},
    }
}
