//! Thresholds and selection helpers shared by the three query modules.
//!
//! Every backend answers the same questions with its own query language, but
//! the limits and cut-offs are fixed here so the answers stay comparable.
//! Where a backend cannot express part of a question natively, the adapter
//! finishes the job in memory with the helpers below.

// ---------------------------------------------------------------------------
// Result sizes
// ---------------------------------------------------------------------------

/// Number of recently nominated movies shown.
pub const NOMINATED_MOVIES_LIMIT: usize = 3;

/// Number of movies in the "most awarded" ranking.
pub const MOST_AWARDED_MOVIES_LIMIT: usize = 3;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Minimum (inclusive) awards for "nominated and awarded" movies.
pub const AWARDED_MOVIES_MIN_AWARDS: i64 = 3;

/// Nomination count a movie must exceed for "nominated and awarded".
pub const AWARDED_MOVIES_NOMINATIONS_ABOVE: i64 = 4;

/// Nomination count a professional must exceed for "nominated, never won".
pub const NEVER_WON_NOMINATIONS_ABOVE: i64 = 3;

/// `true` when a movie passes both cut-offs of the "nominated and awarded" question.
pub fn qualifies_as_awarded_movie(awards_won: i64, nominations: i64) -> bool {
    awards_won >= AWARDED_MOVIES_MIN_AWARDS && nominations > AWARDED_MOVIES_NOMINATIONS_ABOVE
}

/// `true` when a professional was nominated often enough and never won.
pub fn qualifies_as_never_won(awards_won: i64, nominations: i64) -> bool {
    awards_won == 0 && nominations > NEVER_WON_NOMINATIONS_ABOVE
}

// ---------------------------------------------------------------------------
// In-memory selection
// ---------------------------------------------------------------------------

/// Keep items with at least one nomination, most recent year first, and
/// bound the result to [`NOMINATED_MOVIES_LIMIT`].
///
/// Ties on year are broken by title so the answer does not depend on the
/// order a store happens to scan its partitions in.
pub fn most_recent_nominated<T>(
    items: Vec<T>,
    year: impl Fn(&T) -> i32,
    title: impl Fn(&T) -> &str,
    nominations: impl Fn(&T) -> usize,
) -> Vec<T> {
    let mut kept: Vec<T> = items.into_iter().filter(|i| nominations(i) > 0).collect();
    kept.sort_by(|a, b| year(b).cmp(&year(a)).then_with(|| title(a).cmp(title(b))));
    kept.truncate(NOMINATED_MOVIES_LIMIT);
    kept
}

/// Pick the most and the least voted item from a vote tally.
///
/// The most voted item is the *first* one holding the maximum, the least
/// voted the *last* one holding the minimum, so on input already sorted by
/// votes descending this is simply "first and last". Returns `None` on an
/// empty tally.
pub fn vote_extremes<T: Clone>(items: &[T], votes: impl Fn(&T) -> i64) -> Option<(T, T)> {
    let mut most: Option<&T> = None;
    let mut least: Option<&T> = None;
    for item in items {
        if most.map_or(true, |m| votes(item) > votes(m)) {
            most = Some(item);
        }
        if least.map_or(true, |l| votes(item) <= votes(l)) {
            least = Some(item);
        }
    }
    Some((most?.clone(), least?.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Film {
        title: &'static str,
        year: i32,
        nominations: usize,
    }

    fn film(title: &'static str, year: i32, nominations: usize) -> Film {
        Film {
            title,
            year,
            nominations,
        }
    }

    #[test]
    fn awarded_movie_needs_both_cutoffs() {
        assert!(qualifies_as_awarded_movie(3, 5));
        assert!(!qualifies_as_awarded_movie(3, 4));
        assert!(!qualifies_as_awarded_movie(2, 10));
    }

    #[test]
    fn never_won_requires_zero_awards_and_more_than_three_nominations() {
        assert!(qualifies_as_never_won(0, 4));
        assert!(!qualifies_as_never_won(0, 3));
        assert!(!qualifies_as_never_won(1, 9));
    }

    #[test]
    fn recent_nominated_drops_empty_and_bounds_result() {
        let films = vec![
            film("Old", 1990, 2),
            film("Unnominated", 2024, 0),
            film("Newest", 2023, 1),
            film("Middle", 2010, 4),
            film("Also 2023", 2023, 3),
        ];
        let picked = most_recent_nominated(films, |f| f.year, |f| f.title, |f| f.nominations);
        let titles: Vec<_> = picked.iter().map(|f| f.title).collect();
        assert_eq!(titles, vec!["Also 2023", "Newest", "Middle"]);
    }

    #[test]
    fn vote_extremes_prefers_first_max_and_last_min() {
        let tallies = vec![("A", 10), ("B", 10), ("C", 1), ("D", 1)];
        let (most, least) = vote_extremes(&tallies, |t| t.1).unwrap();
        assert_eq!(most.0, "A");
        assert_eq!(least.0, "D");
    }

    #[test]
    fn vote_extremes_of_single_item_is_that_item_twice() {
        let tallies = vec![("Only", 7)];
        let (most, least) = vote_extremes(&tallies, |t| t.1).unwrap();
        assert_eq!(most, least);
    }

    #[test]
    fn vote_extremes_of_empty_tally_is_none() {
        let tallies: Vec<(&str, i64)> = Vec::new();
        assert!(vote_extremes(&tallies, |t| t.1).is_none());
    }
}
