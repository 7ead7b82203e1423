use oscars_core::catalog::join_name;
use oscars_core::nomination::NominationResult;
use oscars_core::views::{
    winning_categories, DirectorCard, MovieCard, Normalize, NormalizeContext, NominationView,
    ProfessionalCard, VotedMovie,
};

use crate::models::sql::{
    SqlDirectorNominations, SqlMovieSummary, SqlNomination, SqlProfessionalSummary, SqlVoteTally,
};

fn views(nominations: &[SqlNomination]) -> Vec<NominationView> {
    nominations
        .iter()
        .map(|n| NominationView {
            category: n.category.clone().unwrap_or_default(),
            year: n.year,
            result: NominationResult::from_stored(n.result.as_deref()),
            movie: n.movie.clone().unwrap_or_default(),
        })
        .collect()
}

impl Normalize for SqlMovieSummary {
    type View = MovieCard;

    fn normalize(&self, _ctx: &NormalizeContext) -> MovieCard {
        let nominations = views(&self.nominations.0);
        MovieCard {
            id: self.id.to_string(),
            title: self.title.clone(),
            year: Some(self.year),
            genre: self.genre.clone(),
            synopsis: self.synopsis.clone(),
            awards_won: Some(self.awards_won),
            nominations_count: Some(self.nominations_count),
            winning_categories: winning_categories(&nominations),
            nominations,
        }
    }
}

impl Normalize for SqlProfessionalSummary {
    type View = ProfessionalCard;

    fn normalize(&self, _ctx: &NormalizeContext) -> ProfessionalCard {
        ProfessionalCard {
            id: self.id.to_string(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            full_name: join_name(&self.first_name, &self.last_name),
            nationality: self.nationality.clone(),
            date_of_birth: self.birth_date,
            awards_won: self.awards_won,
            nominations_count: self.nominations_count,
            nominations: views(&self.nominations.0),
        }
    }
}

impl Normalize for SqlDirectorNominations {
    type View = DirectorCard;

    fn normalize(&self, _ctx: &NormalizeContext) -> DirectorCard {
        DirectorCard {
            id: self.id.to_string(),
            director: self.director.clone(),
            nominations_count: self.nominations_count,
            nominations: views(&self.nominations.0),
        }
    }
}

impl Normalize for SqlVoteTally {
    type View = VotedMovie;

    fn normalize(&self, ctx: &NormalizeContext) -> VotedMovie {
        VotedMovie {
            title: self.title.clone(),
            votes: self.votes,
            category: self.category.clone().unwrap_or_default(),
            synopsis: self.synopsis.clone(),
            vote_date: ctx.as_of,
        }
    }
}
