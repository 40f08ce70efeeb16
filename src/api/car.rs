//! Car endpoints

section! {
    /// Cars available on the service.
    CarService => "car" {
        /// Image paths and descriptive assets for every car.
        assets: Linked {},
        /// Every car with its specifications.
        get: Linked {},
    }
}
