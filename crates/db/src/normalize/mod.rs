//! Mapping of backend-tagged rows into the canonical display shapes.

mod document;
mod relational;
mod wide_column;

use oscars_core::views::{
    DirectorCard, MovieCard, Normalize, NormalizeContext, ProfessionalCard, VoteExtremes,
};

use crate::models::{
    AwardedMovieRow, DirectorRow, MostAwardedActorRow, MostAwardedMovieRow, NeverWonRow,
    NominatedMovieRow, VoteExtremesRow,
};

/// Forward to the leaf row's own `Normalize` impl.
macro_rules! normalize_variants {
    ($($row:ty => $view:ty),* $(,)?) => {
        $(
            impl Normalize for $row {
                type View = $view;

                fn normalize(&self, ctx: &NormalizeContext) -> $view {
                    match self {
                        Self::Mongo(r) => r.normalize(ctx),
                        Self::Cassandra(r) => r.normalize(ctx),
                        Self::Sql(r) => r.normalize(ctx),
                    }
                }
            }
        )*
    };
}

normalize_variants!(
    NominatedMovieRow => MovieCard,
    AwardedMovieRow => MovieCard,
    MostAwardedMovieRow => MovieCard,
    NeverWonRow => ProfessionalCard,
    MostAwardedActorRow => ProfessionalCard,
);

impl Normalize for DirectorRow {
    type View = DirectorCard;

    fn normalize(&self, ctx: &NormalizeContext) -> DirectorCard {
        match self {
            Self::Mongo(doc) => document::director_card(doc),
            Self::Cassandra(r) => r.normalize(ctx),
            Self::Sql(r) => r.normalize(ctx),
        }
    }
}

impl Normalize for VoteExtremesRow {
    type View = VoteExtremes;

    fn normalize(&self, ctx: &NormalizeContext) -> VoteExtremes {
        let (most_voted, least_voted) = match self {
            Self::Mongo(e) => (e.most_voted.normalize(ctx), e.least_voted.normalize(ctx)),
            Self::Cassandra(e) => (e.most_voted.normalize(ctx), e.least_voted.normalize(ctx)),
            Self::Sql(e) => (e.most_voted.normalize(ctx), e.least_voted.normalize(ctx)),
        };
        VoteExtremes {
            most_voted,
            least_voted,
        }
    }
}
