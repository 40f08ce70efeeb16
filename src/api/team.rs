//! Team endpoints

section! {
    TeamService => "team" {
        get: Linked {
            "team_id": Number required,
            "include_licenses": Boolean optional,
        },
    }
}
