//! Access-pattern rows carry only the columns their query needs; the rest of
//! the card is defaulted.

use oscars_core::catalog::join_name;
use oscars_core::nomination::NominationResult;
use oscars_core::search::split_full_name;
use oscars_core::views::{
    winning_categories, DirectorCard, MovieCard, Normalize, NormalizeContext, NominationView,
    ProfessionalCard, VotedMovie,
};
use oscars_core::wide_column::MovieKey;

use crate::models::cassandra::{
    ActorAwards, AwardsByActor, AwardsByMovie, MovieByCategory, MovieByNominationsCount,
    MovieByVotes, NominationEntry, NominationsByDirector,
};

fn entry_views(entries: &Option<Vec<NominationEntry>>) -> Vec<NominationView> {
    entries
        .iter()
        .flatten()
        .map(|e| NominationView {
            category: e.category.clone().unwrap_or_default(),
            year: e.year,
            result: NominationResult::from_stored(e.result.as_deref()),
            movie: e.movie.clone().unwrap_or_default(),
        })
        .collect()
}

fn category_views(
    categories: &Option<Vec<String>>,
    result: NominationResult,
    movie: &str,
) -> Vec<NominationView> {
    categories
        .iter()
        .flatten()
        .map(|c| NominationView {
            category: c.clone(),
            year: None,
            result,
            movie: movie.to_string(),
        })
        .collect()
}

impl Normalize for MovieByCategory {
    type View = MovieCard;

    /// The category list records nominations, not outcomes.
    fn normalize(&self, _ctx: &NormalizeContext) -> MovieCard {
        let nominations = category_views(&self.nominations, NominationResult::Nominated, &self.movie);
        MovieCard {
            id: MovieKey::new(self.movie.clone(), self.year).to_string(),
            title: self.movie.clone(),
            year: Some(self.year),
            genre: self.genre.clone().unwrap_or_default(),
            synopsis: self.synopsis.clone().unwrap_or_default(),
            awards_won: None,
            nominations_count: Some(nominations.len() as i64),
            winning_categories: Vec::new(),
            nominations,
        }
    }
}

impl Normalize for MovieByNominationsCount {
    type View = MovieCard;

    fn normalize(&self, _ctx: &NormalizeContext) -> MovieCard {
        MovieCard {
            year: Some(self.year),
            genre: self.genre.clone().unwrap_or_default(),
            synopsis: self.synopsis.clone().unwrap_or_default(),
            awards_won: self.awards_won.map(i64::from),
            nominations_count: Some(i64::from(self.nominations_count)),
            ..MovieCard::titled(
                MovieKey::new(self.movie_name.clone(), self.year).to_string(),
                self.movie_name.clone(),
            )
        }
    }
}

impl Normalize for AwardsByMovie {
    type View = MovieCard;

    /// `category` holds the categories the movie won.
    fn normalize(&self, _ctx: &NormalizeContext) -> MovieCard {
        let nominations = category_views(&self.category, NominationResult::Winner, &self.movie);
        MovieCard {
            year: Some(self.year),
            synopsis: self.synopsis.clone().unwrap_or_default(),
            awards_won: Some(i64::from(self.awards_won)),
            winning_categories: winning_categories(&nominations),
            nominations,
            ..MovieCard::titled(
                MovieKey::new(self.movie.clone(), self.year).to_string(),
                self.movie.clone(),
            )
        }
    }
}

impl Normalize for ActorAwards {
    type View = ProfessionalCard;

    /// The table only records whether the actor has won, so `awards_won` is
    /// 0 or 1.
    fn normalize(&self, _ctx: &NormalizeContext) -> ProfessionalCard {
        let full_name = join_name(&self.first_name, &self.last_name);
        ProfessionalCard {
            id: full_name.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            full_name,
            nationality: self.nationality.clone().unwrap_or_default(),
            date_of_birth: None,
            awards_won: i64::from(self.has_won_award),
            nominations_count: i64::from(self.nominations),
            nominations: category_views(
                &self.nominations_categories,
                NominationResult::Nominated,
                "",
            ),
        }
    }
}

impl Normalize for AwardsByActor {
    type View = ProfessionalCard;

    fn normalize(&self, _ctx: &NormalizeContext) -> ProfessionalCard {
        let (first, last) = split_full_name(&self.actor_name);
        let nominations = entry_views(&self.nominations);
        ProfessionalCard {
            id: self.actor_name.clone(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            full_name: self.actor_name.clone(),
            nationality: self.nationality.clone().unwrap_or_default(),
            date_of_birth: self.birthdate,
            awards_won: i64::from(self.awards_won),
            nominations_count: nominations.len() as i64,
            nominations,
        }
    }
}

impl Normalize for NominationsByDirector {
    type View = DirectorCard;

    fn normalize(&self, _ctx: &NormalizeContext) -> DirectorCard {
        let nominations = entry_views(&self.nominations);
        DirectorCard {
            id: self.director_name.clone(),
            director: self.director_name.clone(),
            nominations_count: self
                .nominations_count
                .map_or(nominations.len() as i64, i64::from),
            nominations,
        }
    }
}

impl Normalize for MovieByVotes {
    type View = VotedMovie;

    fn normalize(&self, ctx: &NormalizeContext) -> VotedMovie {
        VotedMovie {
            title: self.movie_name.clone(),
            votes: i64::from(self.votes.unwrap_or(0)),
            category: self.category.clone(),
            synopsis: self.synopsis.clone().unwrap_or_default(),
            vote_date: ctx.as_of,
        }
    }
}
