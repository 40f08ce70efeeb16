//! Track endpoints

section! {
    /// Tracks and track configurations.
    TrackService => "track" {
        /// Image paths and descriptive assets for every track.
        assets: Linked {},
        get: Linked {},
    }
}
