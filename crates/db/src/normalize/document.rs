use oscars_core::catalog::join_name;
use oscars_core::nomination::NominationResult;
use oscars_core::views::{
    winning_categories, DirectorCard, MovieCard, Normalize, NormalizeContext, NominationView,
    ProfessionalCard, VotedMovie,
};

use crate::models::mongo::{MovieDocument, ProfessionalDocument, ProfessionalNomination, VoteTally};

fn professional_nominations(nominations: &[ProfessionalNomination]) -> Vec<NominationView> {
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

impl Normalize for MovieDocument {
    type View = MovieCard;

    fn normalize(&self, _ctx: &NormalizeContext) -> MovieCard {
        let nominations: Vec<NominationView> = self
            .nominations
            .iter()
            .map(|n| NominationView {
                category: n.category_id.clone(),
                year: n.year,
                result: NominationResult::from_stored(n.result.as_deref()),
                movie: self.title.clone(),
            })
            .collect();
        MovieCard {
            id: self.id.to_hex(),
            title: self.title.clone(),
            year: self.year,
            genre: self.genre.clone().unwrap_or_default(),
            synopsis: self.synopsis.clone().unwrap_or_default(),
            awards_won: Some(self.awards_won),
            nominations_count: Some(self.nominations.len() as i64),
            winning_categories: winning_categories(&nominations),
            nominations,
        }
    }
}

impl Normalize for ProfessionalDocument {
    type View = ProfessionalCard;

    fn normalize(&self, _ctx: &NormalizeContext) -> ProfessionalCard {
        ProfessionalCard {
            id: self.id.to_hex(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            full_name: join_name(&self.first_name, &self.last_name),
            nationality: self.nationality.clone().unwrap_or_default(),
            date_of_birth: self.date_of_birth.map(|d| d.to_chrono().date_naive()),
            awards_won: self.awards_won,
            nominations_count: self.nominations.len() as i64,
            nominations: professional_nominations(&self.nominations),
        }
    }
}

pub(super) fn director_card(doc: &ProfessionalDocument) -> DirectorCard {
    DirectorCard {
        id: doc.id.to_hex(),
        director: join_name(&doc.first_name, &doc.last_name),
        nominations_count: doc.nominations.len() as i64,
        nominations: professional_nominations(&doc.nominations),
    }
}

impl Normalize for VoteTally {
    type View = VotedMovie;

    fn normalize(&self, ctx: &NormalizeContext) -> VotedMovie {
        VotedMovie {
            title: self.movie.clone(),
            votes: self.votes,
            category: self.category.clone().unwrap_or_default(),
            synopsis: String::new(),
            vote_date: ctx.as_of,
        }
    }
}
