//! Free-text tournament filter behind the home page search box.

use crate::tournament::Tournament;

/// Tournaments whose name, location or format contains `term`, ignoring
/// case. A blank term matches everything.
pub fn search<'a>(tournaments: &'a [Tournament], term: &str) -> Vec<&'a Tournament> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return tournaments.iter().collect();
    }

    tournaments
        .iter()
        .filter(|tournament| {
            [&tournament.name, &tournament.location, &tournament.format]
                .into_iter()
                .flatten()
                .any(|text| text.to_lowercase().contains(&needle))
        })
        .collect()
}
