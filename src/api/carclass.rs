//! Car class endpoints

section! {
    /// Car classes and their member cars.
    CarClassService => "carclass" {
        get: Linked {},
    }
}
