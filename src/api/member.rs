//! Member endpoints

section! {
    /// Member profiles, awards and charts.
    MemberService => "member" {
        award_instances: Linked {
            "cust_id": Number optional,
            "award_id": Number required,
        },
        awards: Linked {
            "cust_id": Number optional,
        },
        /// iRating, TT rating or license/SR history for one category.
        chart_data: Linked {
            "cust_id": Number optional,
            "category_id": Number required,
            "chart_type": Number required,
        },
        /// Public data for up to 50 members at once.
        get: Linked {
            "cust_ids": NumberArray required,
            "include_licenses": Boolean optional,
        },
        /// Account data of the authenticated member.
        info: Linked {},
        participation_credits: Linked {},
        profile: Linked {
            "cust_id": Number optional,
        },
    }
}
