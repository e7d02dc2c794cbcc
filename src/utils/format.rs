use crate::rotation::Summary;

/// Render a summary as "You have made up: 1 days, 2 prayers."
///
/// Zero-valued clauses are left out, so an empty log renders the bare header.
pub fn made_up_sentence(summary: Summary) -> String {
    let mut clauses = Vec::new();
    if summary.days > 0 {
        clauses.push(format!("{} days", summary.days));
    }
    if summary.remaining > 0 {
        clauses.push(format!("{} prayers", summary.remaining));
    }
    if clauses.is_empty() {
        return "You have made up:".to_string();
    }
    format!("You have made up: {}.", clauses.join(", "))
}

/// Join display names into "a, b, c".
pub fn name_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names.into_iter().collect::<Vec<_>>().join(", ")
}
