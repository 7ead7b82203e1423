//! Statement planning for movie, nomination and professional mutations.
//!
//! For every table a mutation touches the planner asks one question: did a
//! primary-key column change? If so the old row is deleted and a new row is
//! inserted with every column carried over from the snapshot. If only
//! regular columns changed they are updated in place, and if nothing changed
//! no statement is emitted. Secondary rows missing from the snapshot are left
//! alone.

use crate::catalog::{join_name, MovieChanges, MovieInput, ProfessionalChanges, ProfessionalInput};
use crate::error::CoreError;
use crate::nomination::NominationResult;
use crate::search::split_full_name;

use super::key::{MovieKey, NominationKey};
use super::snapshot::{
    ActorStandingRow, AwardsRow, CategoryRow, MovieNominationRow, MovieSnapshot,
    NominationsCountRow, ProfessionalSnapshot, VotesRow,
};
use super::statement::{Assignment, CellValue, Statement};
use super::{Table, UseCase, ACTORS_BUCKET, AWARDS_BUCKET, MOST_VOTES, NOMINATIONS_BUCKET};

type Key = Vec<(&'static str, CellValue)>;

// ---------------------------------------------------------------------------
// Row keys
// ---------------------------------------------------------------------------

fn category_key(title: &str, year: i32) -> Key {
    vec![("movie", CellValue::text(title)), ("year", CellValue::Int(year))]
}

fn awards_key(row: &AwardsRow) -> Key {
    vec![
        ("partition_key", CellValue::text(AWARDS_BUCKET)),
        ("awards_won", CellValue::Int(row.awards_won)),
        ("movie", CellValue::text(&row.movie)),
        ("year", CellValue::Int(row.year)),
    ]
}

fn count_key(row: &NominationsCountRow) -> Key {
    vec![
        ("partition_key", CellValue::text(NOMINATIONS_BUCKET)),
        ("nominations_count", CellValue::Int(row.nominations_count)),
        ("movie_name", CellValue::text(&row.movie_name)),
        ("year", CellValue::Int(row.year)),
    ]
}

fn votes_key(row: &VotesRow) -> Key {
    vec![
        ("category", CellValue::text(&row.category)),
        ("movie_name", CellValue::text(&row.movie_name)),
    ]
}

fn entries_partition(movie: &MovieKey) -> Key {
    vec![
        ("movie_name", CellValue::text(&movie.title)),
        ("year", CellValue::Int(movie.year)),
    ]
}

fn entry_key(movie: &MovieKey, category: &str) -> Key {
    let mut key = entries_partition(movie);
    key.push(("category", CellValue::text(category)));
    key
}

fn actor_key(awards_won: i32, actor_name: &str) -> Key {
    vec![
        ("partition_key", CellValue::text(ACTORS_BUCKET)),
        ("awards_won", CellValue::Int(awards_won)),
        ("actor_name", CellValue::text(actor_name)),
    ]
}

fn standing_key(row: &ActorStandingRow) -> Key {
    vec![
        ("has_won_award", CellValue::Bool(row.has_won_award)),
        ("nominations", CellValue::Int(row.nominations)),
        ("last_name", CellValue::text(&row.last_name)),
        ("first_name", CellValue::text(&row.first_name)),
    ]
}

// ---------------------------------------------------------------------------
// Full-row statements
// ---------------------------------------------------------------------------

fn delete(table: Table, key: Key) -> Statement {
    Statement::Delete { table, key }
}

fn update(table: Table, assignments: Vec<Assignment>, key: Key) -> Statement {
    Statement::Update {
        table,
        assignments,
        key,
    }
}

fn insert(table: Table, mut key: Key, rest: Key) -> Statement {
    key.extend(rest);
    Statement::Insert {
        table,
        columns: key,
    }
}

fn insert_category(row: &CategoryRow) -> Statement {
    insert(
        Table::MoviesByCategory,
        category_key(&row.movie, row.year),
        vec![
            ("genre", CellValue::opt_text(row.genre.as_deref())),
            ("synopsis", CellValue::opt_text(row.synopsis.as_deref())),
            ("nominations", CellValue::TextList(row.nominations.clone())),
        ],
    )
}

fn insert_awards(row: &AwardsRow) -> Statement {
    insert(
        Table::AwardsByMovie,
        awards_key(row),
        vec![
            ("synopsis", CellValue::opt_text(row.synopsis.as_deref())),
            ("category", CellValue::TextList(row.categories.clone())),
        ],
    )
}

fn insert_count(row: &NominationsCountRow) -> Statement {
    insert(
        Table::MoviesByNominationsCount,
        count_key(row),
        vec![
            ("genre", CellValue::opt_text(row.genre.as_deref())),
            ("synopsis", CellValue::opt_text(row.synopsis.as_deref())),
            ("awards_won", CellValue::Int(row.awards_won)),
        ],
    )
}

fn insert_votes(row: &VotesRow) -> Statement {
    insert(
        Table::MoviesByVotesCategory,
        votes_key(row),
        vec![
            ("votes", CellValue::Int(row.votes)),
            ("synopsis", CellValue::opt_text(row.synopsis.as_deref())),
        ],
    )
}

fn insert_entry(movie: &MovieKey, row: &MovieNominationRow) -> Statement {
    insert(
        Table::NominationsByMovie,
        entry_key(movie, &row.category),
        vec![("result", CellValue::text(row.result.as_str()))],
    )
}

fn insert_actor(snapshot: &ProfessionalSnapshot) -> Statement {
    insert(
        Table::AwardsByActor,
        actor_key(snapshot.awards_won, &snapshot.actor_name),
        vec![
            ("birthdate", CellValue::opt_date(snapshot.birthdate)),
            ("nationality", CellValue::opt_text(snapshot.nationality.as_deref())),
            ("nominations", CellValue::Entries(snapshot.nominations.clone())),
        ],
    )
}

fn insert_standing(row: &ActorStandingRow) -> Statement {
    insert(
        Table::ActorsAwards,
        standing_key(row),
        vec![
            ("nationality", CellValue::opt_text(row.nationality.as_deref())),
            ("nominations_categories", CellValue::TextList(row.categories.clone())),
        ],
    )
}

/// The new value if it differs from the stored one.
fn changed<'a>(new: &'a Option<String>, old: &Option<String>) -> Option<&'a str> {
    new.as_deref().filter(|n| old.as_deref() != Some(*n))
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

/// Insert a new movie into `movies_by_category` and the table selected by
/// `use_case`, with zeroed counters.
pub fn plan_movie_insert(input: &MovieInput, use_case: UseCase) -> Vec<Statement> {
    let synopsis = Some(input.synopsis.clone());
    let mut out = vec![insert_category(&CategoryRow {
        movie: input.title.clone(),
        year: input.year,
        genre: Some(input.genre.clone()),
        synopsis: synopsis.clone(),
        nominations: Vec::new(),
    })];

    match use_case {
        UseCase::Category => {}
        UseCase::Awards => out.push(insert_awards(&AwardsRow {
            awards_won: 0,
            movie: input.title.clone(),
            year: input.year,
            synopsis,
            categories: Vec::new(),
        })),
        UseCase::Nominations => out.push(insert_count(&NominationsCountRow {
            nominations_count: 0,
            movie_name: input.title.clone(),
            year: input.year,
            genre: Some(input.genre.clone()),
            synopsis,
            awards_won: 0,
        })),
        UseCase::Votes => out.push(insert_votes(&VotesRow {
            category: MOST_VOTES.to_string(),
            movie_name: input.title.clone(),
            votes: 0,
            synopsis,
        })),
    }
    out
}

/// Apply `changes` to the movie captured in `snapshot`.
pub fn plan_movie_update(
    snapshot: &MovieSnapshot,
    changes: &MovieChanges,
    use_case: UseCase,
) -> Vec<Statement> {
    let old = &snapshot.category;
    let new_key = MovieKey::new(
        changes.title.clone().unwrap_or_else(|| old.movie.clone()),
        changes.year.unwrap_or(old.year),
    );
    let title_changed = new_key.title != old.movie;
    let key_changed = title_changed || new_key.year != old.year;
    let genre = changes.genre.clone().or_else(|| old.genre.clone());
    let synopsis = changes.synopsis.clone().or_else(|| old.synopsis.clone());

    let mut out = Vec::new();

    if key_changed {
        out.push(delete(Table::MoviesByCategory, category_key(&old.movie, old.year)));
        out.push(insert_category(&CategoryRow {
            movie: new_key.title.clone(),
            year: new_key.year,
            genre: genre.clone(),
            synopsis: synopsis.clone(),
            nominations: old.nominations.clone(),
        }));
        if !snapshot.entries.is_empty() {
            out.push(delete(Table::NominationsByMovie, entries_partition(&snapshot.key())));
            out.extend(snapshot.entries.iter().map(|e| insert_entry(&new_key, e)));
        }
    } else {
        let mut sets = Vec::new();
        if let Some(g) = changed(&changes.genre, &old.genre) {
            sets.push(Assignment::Set("genre", CellValue::text(g)));
        }
        if let Some(s) = changed(&changes.synopsis, &old.synopsis) {
            sets.push(Assignment::Set("synopsis", CellValue::text(s)));
        }
        if !sets.is_empty() {
            out.push(update(Table::MoviesByCategory, sets, category_key(&old.movie, old.year)));
        }
    }

    match use_case {
        UseCase::Category => {}
        UseCase::Awards => {
            if let Some(row) = &snapshot.awards {
                if key_changed {
                    out.push(delete(Table::AwardsByMovie, awards_key(row)));
                    out.push(insert_awards(&AwardsRow {
                        movie: new_key.title.clone(),
                        year: new_key.year,
                        synopsis: synopsis.clone(),
                        ..row.clone()
                    }));
                } else if let Some(s) = changed(&changes.synopsis, &row.synopsis) {
                    out.push(update(
                        Table::AwardsByMovie,
                        vec![Assignment::Set("synopsis", CellValue::text(s))],
                        awards_key(row),
                    ));
                }
            }
        }
        UseCase::Nominations => {
            if let Some(row) = &snapshot.nominations {
                if key_changed {
                    out.push(delete(Table::MoviesByNominationsCount, count_key(row)));
                    out.push(insert_count(&NominationsCountRow {
                        movie_name: new_key.title.clone(),
                        year: new_key.year,
                        genre: changes.genre.clone().or_else(|| row.genre.clone()),
                        synopsis: synopsis.clone(),
                        ..row.clone()
                    }));
                } else {
                    let mut sets = Vec::new();
                    if let Some(g) = changed(&changes.genre, &row.genre) {
                        sets.push(Assignment::Set("genre", CellValue::text(g)));
                    }
                    if let Some(s) = changed(&changes.synopsis, &row.synopsis) {
                        sets.push(Assignment::Set("synopsis", CellValue::text(s)));
                    }
                    if !sets.is_empty() {
                        out.push(update(Table::MoviesByNominationsCount, sets, count_key(row)));
                    }
                }
            }
        }
        UseCase::Votes => {
            // Vote rows are keyed on the title only.
            for row in &snapshot.votes {
                if title_changed {
                    out.push(delete(Table::MoviesByVotesCategory, votes_key(row)));
                    out.push(insert_votes(&VotesRow {
                        movie_name: new_key.title.clone(),
                        synopsis: synopsis.clone(),
                        ..row.clone()
                    }));
                } else if let Some(s) = changed(&changes.synopsis, &row.synopsis) {
                    out.push(update(
                        Table::MoviesByVotesCategory,
                        vec![Assignment::Set("synopsis", CellValue::text(s))],
                        votes_key(row),
                    ));
                }
            }
        }
    }
    out
}

/// Remove the movie from `movies_by_category`, its nomination partition and
/// the table selected by `use_case`.
pub fn plan_movie_delete(snapshot: &MovieSnapshot, use_case: UseCase) -> Vec<Statement> {
    let old = &snapshot.category;
    let mut out = vec![delete(Table::MoviesByCategory, category_key(&old.movie, old.year))];
    if !snapshot.entries.is_empty() {
        out.push(delete(Table::NominationsByMovie, entries_partition(&snapshot.key())));
    }
    match use_case {
        UseCase::Category => {}
        UseCase::Awards => {
            if let Some(row) = &snapshot.awards {
                out.push(delete(Table::AwardsByMovie, awards_key(row)));
            }
        }
        UseCase::Nominations => {
            if let Some(row) = &snapshot.nominations {
                out.push(delete(Table::MoviesByNominationsCount, count_key(row)));
            }
        }
        UseCase::Votes => {
            out.extend(
                snapshot
                    .votes
                    .iter()
                    .map(|row| delete(Table::MoviesByVotesCategory, votes_key(row))),
            );
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Nominations
// ---------------------------------------------------------------------------

/// Re-key the count row with new counters.
fn rekey_count(out: &mut Vec<Statement>, row: &NominationsCountRow, nominations: i32, awards: i32) {
    out.push(delete(Table::MoviesByNominationsCount, count_key(row)));
    out.push(insert_count(&NominationsCountRow {
        nominations_count: nominations.max(0),
        awards_won: awards.max(0),
        ..row.clone()
    }));
}

/// Re-key the awards row with a new count and category list.
fn rekey_awards(out: &mut Vec<Statement>, row: &AwardsRow, awards: i32, categories: Vec<String>) {
    out.push(delete(Table::AwardsByMovie, awards_key(row)));
    out.push(insert_awards(&AwardsRow {
        awards_won: awards.max(0),
        categories,
        ..row.clone()
    }));
}

fn without_first(list: &[String], item: &str) -> Vec<String> {
    let mut out = list.to_vec();
    if let Some(pos) = out.iter().position(|c| c == item) {
        out.remove(pos);
    }
    out
}

fn missing_nomination(snapshot: &MovieSnapshot, category: &str) -> CoreError {
    CoreError::not_found(
        "Nomination",
        NominationKey {
            movie: snapshot.key(),
            category: category.to_string(),
        },
    )
}

/// Record a nomination of the movie in `category`.
pub fn plan_nomination_insert(
    snapshot: &MovieSnapshot,
    category: &str,
    result: NominationResult,
) -> Result<Vec<Statement>, CoreError> {
    let movie = snapshot.key();
    if snapshot.entry(category).is_some() {
        return Err(CoreError::Conflict(format!(
            "'{}' is already nominated for '{category}'",
            movie.title
        )));
    }
    let win = i32::from(result.is_winner());

    let mut out = vec![
        insert_entry(
            &movie,
            &MovieNominationRow {
                category: category.to_string(),
                result,
            },
        ),
        update(
            Table::MoviesByCategory,
            vec![Assignment::Append("nominations", CellValue::list_of(category))],
            category_key(&movie.title, movie.year),
        ),
    ];
    if let Some(row) = &snapshot.nominations {
        rekey_count(&mut out, row, row.nominations_count + 1, row.awards_won + win);
    }
    if result.is_winner() {
        if let Some(row) = &snapshot.awards {
            let mut categories = row.categories.clone();
            categories.push(category.to_string());
            rekey_awards(&mut out, row, row.awards_won + 1, categories);
        }
    }
    Ok(out)
}

/// Change the outcome of an existing nomination.
pub fn plan_nomination_result_change(
    snapshot: &MovieSnapshot,
    category: &str,
    result: NominationResult,
) -> Result<Vec<Statement>, CoreError> {
    let current = snapshot
        .entry(category)
        .ok_or_else(|| missing_nomination(snapshot, category))?;
    if current.result == result {
        return Ok(Vec::new());
    }
    let movie = snapshot.key();
    let delta = if result.is_winner() { 1 } else { -1 };

    let mut out = vec![update(
        Table::NominationsByMovie,
        vec![Assignment::Set("result", CellValue::text(result.as_str()))],
        entry_key(&movie, category),
    )];
    if let Some(row) = &snapshot.nominations {
        out.push(update(
            Table::MoviesByNominationsCount,
            vec![Assignment::Set(
                "awards_won",
                CellValue::Int((row.awards_won + delta).max(0)),
            )],
            count_key(row),
        ));
    }
    if let Some(row) = &snapshot.awards {
        let categories = if result.is_winner() {
            let mut c = row.categories.clone();
            c.push(category.to_string());
            c
        } else {
            without_first(&row.categories, category)
        };
        rekey_awards(&mut out, row, row.awards_won + delta, categories);
    }
    Ok(out)
}

/// Remove a nomination and roll back the counters it contributed to.
pub fn plan_nomination_delete(
    snapshot: &MovieSnapshot,
    category: &str,
) -> Result<Vec<Statement>, CoreError> {
    let current = snapshot
        .entry(category)
        .ok_or_else(|| missing_nomination(snapshot, category))?;
    let movie = snapshot.key();
    let win = i32::from(current.result.is_winner());

    let mut out = vec![
        delete(Table::NominationsByMovie, entry_key(&movie, category)),
        update(
            Table::MoviesByCategory,
            vec![Assignment::Remove("nominations", CellValue::list_of(category))],
            category_key(&movie.title, movie.year),
        ),
    ];
    if let Some(row) = &snapshot.nominations {
        rekey_count(&mut out, row, row.nominations_count - 1, row.awards_won - win);
    }
    if current.result.is_winner() {
        if let Some(row) = &snapshot.awards {
            rekey_awards(
                &mut out,
                row,
                row.awards_won - 1,
                without_first(&row.categories, category),
            );
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Professionals
// ---------------------------------------------------------------------------

/// What an update does to the `awards_by_actor` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfessionalPlan {
    /// The actor name, a key column, changes.
    Rekey { first_name: String, last_name: String },
    /// Only regular columns change.
    UpdateInPlace,
    Unchanged,
}

pub fn classify_professional_update(
    snapshot: &ProfessionalSnapshot,
    changes: &ProfessionalChanges,
) -> ProfessionalPlan {
    let (first, last) = split_full_name(&snapshot.actor_name);
    let first_name = changes.first_name.as_deref().unwrap_or(first).trim().to_string();
    let last_name = changes.last_name.as_deref().unwrap_or(last).trim().to_string();
    if join_name(&first_name, &last_name) != snapshot.actor_name {
        return ProfessionalPlan::Rekey {
            first_name,
            last_name,
        };
    }
    let nationality_changed = changed(&changes.nationality, &snapshot.nationality).is_some();
    let birthdate_changed = changes
        .date_of_birth
        .is_some_and(|d| snapshot.birthdate != Some(d));
    if nationality_changed || birthdate_changed {
        ProfessionalPlan::UpdateInPlace
    } else {
        ProfessionalPlan::Unchanged
    }
}

/// Insert a professional with no awards or nominations.
pub fn plan_professional_insert(input: &ProfessionalInput) -> Vec<Statement> {
    let nationality = Some(input.nationality.clone());
    vec![
        insert_actor(&ProfessionalSnapshot {
            actor_name: input.full_name(),
            awards_won: 0,
            birthdate: input.date_of_birth,
            nationality: nationality.clone(),
            nominations: Vec::new(),
            standing: None,
        }),
        insert_standing(&ActorStandingRow {
            has_won_award: false,
            nominations: 0,
            last_name: input.last_name.trim().to_string(),
            first_name: input.first_name.trim().to_string(),
            nationality,
            categories: Vec::new(),
        }),
    ]
}

pub fn plan_professional_update(
    snapshot: &ProfessionalSnapshot,
    changes: &ProfessionalChanges,
) -> Vec<Statement> {
    let nationality = changes
        .nationality
        .clone()
        .or_else(|| snapshot.nationality.clone());
    let birthdate = changes.date_of_birth.or(snapshot.birthdate);

    match classify_professional_update(snapshot, changes) {
        ProfessionalPlan::Unchanged => Vec::new(),
        ProfessionalPlan::UpdateInPlace => {
            let mut sets = Vec::new();
            if let Some(d) = changes.date_of_birth.filter(|d| snapshot.birthdate != Some(*d)) {
                sets.push(Assignment::Set("birthdate", CellValue::Date(d)));
            }
            let nationality_changed = changed(&changes.nationality, &snapshot.nationality);
            if let Some(n) = nationality_changed {
                sets.push(Assignment::Set("nationality", CellValue::text(n)));
            }
            let mut out = vec![update(
                Table::AwardsByActor,
                sets,
                actor_key(snapshot.awards_won, &snapshot.actor_name),
            )];
            if let (Some(n), Some(standing)) = (nationality_changed, &snapshot.standing) {
                out.push(update(
                    Table::ActorsAwards,
                    vec![Assignment::Set("nationality", CellValue::text(n))],
                    standing_key(standing),
                ));
            }
            out
        }
        ProfessionalPlan::Rekey {
            first_name,
            last_name,
        } => {
            let mut out = vec![
                delete(
                    Table::AwardsByActor,
                    actor_key(snapshot.awards_won, &snapshot.actor_name),
                ),
                insert_actor(&ProfessionalSnapshot {
                    actor_name: join_name(&first_name, &last_name),
                    birthdate,
                    nationality: nationality.clone(),
                    ..snapshot.clone()
                }),
            ];
            if let Some(standing) = &snapshot.standing {
                out.push(delete(Table::ActorsAwards, standing_key(standing)));
                out.push(insert_standing(&ActorStandingRow {
                    first_name,
                    last_name,
                    nationality,
                    ..standing.clone()
                }));
            }
            out
        }
    }
}

pub fn plan_professional_delete(snapshot: &ProfessionalSnapshot) -> Vec<Statement> {
    let mut out = vec![delete(
        Table::AwardsByActor,
        actor_key(snapshot.awards_won, &snapshot.actor_name),
    )];
    if let Some(standing) = &snapshot.standing {
        out.push(delete(Table::ActorsAwards, standing_key(standing)));
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    use super::super::snapshot::NominationEntryCell;
    use super::super::LEAST_VOTES;
    use super::*;

    type Row = BTreeMap<&'static str, CellValue>;

    /// Applies planned statements to rows held in memory, with CQL upsert
    /// semantics for `INSERT` and `UPDATE`.
    #[derive(Default)]
    struct MemTables {
        rows: Vec<(Table, Row)>,
    }

    fn matches(row: &Row, key: &[(&'static str, CellValue)]) -> bool {
        key.iter().all(|(c, v)| row.get(c) == Some(v))
    }

    impl MemTables {
        fn apply(&mut self, stmt: &Statement) {
            match stmt {
                Statement::Insert { table, columns } => {
                    let key: Key = table
                        .key_columns()
                        .iter()
                        .map(|c| {
                            let v = columns.iter().find(|(n, _)| n == c).map(|(_, v)| v.clone());
                            (*c, v.unwrap_or(CellValue::Null))
                        })
                        .collect();
                    self.rows.retain(|(t, r)| !(t == table && matches(r, &key)));
                    self.rows.push((*table, columns.iter().cloned().collect()));
                }
                Statement::Update {
                    table,
                    assignments,
                    key,
                } => {
                    let idx = match self.rows.iter().position(|(t, r)| t == table && matches(r, key)) {
                        Some(i) => i,
                        None => {
                            self.rows.push((*table, key.iter().cloned().collect()));
                            self.rows.len() - 1
                        }
                    };
                    let row = &mut self.rows[idx].1;
                    for a in assignments {
                        match a {
                            Assignment::Set(c, v) => {
                                row.insert(*c, v.clone());
                            }
                            Assignment::Append(c, CellValue::TextList(items)) => {
                                let entry = row.entry(*c).or_insert(CellValue::TextList(Vec::new()));
                                if let CellValue::TextList(list) = entry {
                                    list.extend(items.iter().cloned());
                                }
                            }
                            Assignment::Remove(c, CellValue::TextList(items)) => {
                                if let Some(CellValue::TextList(list)) = row.get_mut(c) {
                                    list.retain(|x| !items.contains(x));
                                }
                            }
                            other => panic!("unsupported assignment {other:?}"),
                        }
                    }
                }
                Statement::Delete { table, key } => {
                    self.rows.retain(|(t, r)| !(t == table && matches(r, key)));
                }
            }
        }

        fn apply_all(&mut self, stmts: &[Statement]) {
            for s in stmts {
                self.apply(s);
            }
        }

        fn find(&self, table: Table, key: &[(&'static str, CellValue)]) -> Option<&Row> {
            self.rows
                .iter()
                .find(|(t, r)| *t == table && matches(r, key))
                .map(|(_, r)| r)
        }

        fn count(&self, table: Table) -> usize {
            self.rows.iter().filter(|(t, _)| *t == table).count()
        }

        fn seed(&mut self, snapshot: &MovieSnapshot) {
            self.apply(&insert_category(&snapshot.category));
            if let Some(row) = &snapshot.awards {
                self.apply(&insert_awards(row));
            }
            if let Some(row) = &snapshot.nominations {
                self.apply(&insert_count(row));
            }
            for row in &snapshot.votes {
                self.apply(&insert_votes(row));
            }
            for e in &snapshot.entries {
                self.apply(&insert_entry(&snapshot.key(), e));
            }
        }
    }

    fn text(v: &str) -> CellValue {
        CellValue::text(v)
    }

    fn jaws() -> MovieSnapshot {
        MovieSnapshot {
            category: CategoryRow {
                movie: "Jaws".to_string(),
                year: 1975,
                genre: Some("Thriller".to_string()),
                synopsis: Some("Shark".to_string()),
                nominations: vec!["Best Picture".to_string(), "Best Score".to_string()],
            },
            awards: Some(AwardsRow {
                awards_won: 1,
                movie: "Jaws".to_string(),
                year: 1975,
                synopsis: Some("Shark".to_string()),
                categories: vec!["Best Score".to_string()],
            }),
            nominations: Some(NominationsCountRow {
                nominations_count: 2,
                movie_name: "Jaws".to_string(),
                year: 1975,
                genre: Some("Thriller".to_string()),
                synopsis: Some("Shark".to_string()),
                awards_won: 1,
            }),
            votes: vec![VotesRow {
                category: LEAST_VOTES.to_string(),
                movie_name: "Jaws".to_string(),
                votes: 12,
                synopsis: Some("Shark".to_string()),
            }],
            entries: vec![
                MovieNominationRow {
                    category: "Best Picture".to_string(),
                    result: NominationResult::Nominated,
                },
                MovieNominationRow {
                    category: "Best Score".to_string(),
                    result: NominationResult::Winner,
                },
            ],
        }
    }

    fn awards_row_key(awards: i32, title: &str, year: i32) -> Key {
        vec![
            ("partition_key", text(AWARDS_BUCKET)),
            ("awards_won", CellValue::Int(awards)),
            ("movie", text(title)),
            ("year", CellValue::Int(year)),
        ]
    }

    // -- movies ---------------------------------------------------------------

    #[test]
    fn insert_under_awards_writes_category_and_awards_rows() {
        let input = MovieInput {
            title: "Dune".to_string(),
            year: 2021,
            genre: "Sci-Fi".to_string(),
            synopsis: "Spice".to_string(),
        };
        let mut db = MemTables::default();
        db.apply_all(&plan_movie_insert(&input, UseCase::Awards));

        assert!(db.find(Table::MoviesByCategory, &category_key("Dune", 2021)).is_some());
        let awards = db
            .find(Table::AwardsByMovie, &awards_row_key(0, "Dune", 2021))
            .unwrap();
        assert_eq!(awards.get("category"), Some(&CellValue::TextList(Vec::new())));
        assert_eq!(db.count(Table::MoviesByNominationsCount), 0);
    }

    #[test]
    fn insert_under_category_touches_one_table() {
        let input = MovieInput {
            title: "Dune".to_string(),
            year: 2021,
            genre: String::new(),
            synopsis: String::new(),
        };
        let plan = plan_movie_insert(&input, UseCase::Category);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].table(), Table::MoviesByCategory);
    }

    #[test]
    fn delete_under_awards_removes_both_rows() {
        let snapshot = jaws();
        let mut db = MemTables::default();
        db.seed(&snapshot);

        db.apply_all(&plan_movie_delete(&snapshot, UseCase::Awards));

        assert_eq!(db.count(Table::MoviesByCategory), 0);
        assert_eq!(db.count(Table::AwardsByMovie), 0);
        assert_eq!(db.count(Table::NominationsByMovie), 0);
        // Tables outside the use case are left as they were.
        assert_eq!(db.count(Table::MoviesByNominationsCount), 1);
    }

    #[test]
    fn applying_only_first_delete_leaves_awards_row_behind() {
        let snapshot = jaws();
        let mut db = MemTables::default();
        db.seed(&snapshot);

        let plan = plan_movie_delete(&snapshot, UseCase::Awards);
        db.apply(&plan[0]);

        assert!(db.find(Table::MoviesByCategory, &category_key("Jaws", 1975)).is_none());
        assert!(db
            .find(Table::AwardsByMovie, &awards_row_key(1, "Jaws", 1975))
            .is_some());
    }

    #[test]
    fn title_change_deletes_old_key_and_inserts_new() {
        let snapshot = jaws();
        let mut db = MemTables::default();
        db.seed(&snapshot);
        let changes = MovieChanges {
            title: Some("Jaws 2".to_string()),
            synopsis: Some("Another shark".to_string()),
            ..Default::default()
        };

        let plan = plan_movie_update(&snapshot, &changes, UseCase::Category);
        assert_matches!(plan[0], Statement::Delete { table: Table::MoviesByCategory, .. });
        assert_matches!(plan[1], Statement::Insert { table: Table::MoviesByCategory, .. });
        db.apply_all(&plan);

        assert!(db.find(Table::MoviesByCategory, &category_key("Jaws", 1975)).is_none());
        let row = db.find(Table::MoviesByCategory, &category_key("Jaws 2", 1975)).unwrap();
        assert_eq!(row.get("synopsis"), Some(&text("Another shark")));
        assert_eq!(row.get("genre"), Some(&text("Thriller")));
        assert_eq!(
            row.get("nominations"),
            Some(&CellValue::TextList(vec![
                "Best Picture".to_string(),
                "Best Score".to_string()
            ]))
        );
        // Nomination rows follow the movie to its new key.
        let moved = vec![
            ("movie_name", text("Jaws 2")),
            ("year", CellValue::Int(1975)),
            ("category", text("Best Score")),
        ];
        assert_eq!(db.find(Table::NominationsByMovie, &moved).unwrap().get("result"), Some(&text("Winner")));
        assert_eq!(db.count(Table::NominationsByMovie), 2);
    }

    #[test]
    fn year_change_under_awards_carries_award_count() {
        let snapshot = jaws();
        let mut db = MemTables::default();
        db.seed(&snapshot);
        let changes = MovieChanges {
            year: Some(1976),
            ..Default::default()
        };

        db.apply_all(&plan_movie_update(&snapshot, &changes, UseCase::Awards));

        assert!(db.find(Table::AwardsByMovie, &awards_row_key(1, "Jaws", 1975)).is_none());
        let row = db
            .find(Table::AwardsByMovie, &awards_row_key(1, "Jaws", 1976))
            .unwrap();
        assert_eq!(
            row.get("category"),
            Some(&CellValue::TextList(vec!["Best Score".to_string()]))
        );
    }

    #[test]
    fn synopsis_only_change_updates_in_place() {
        let snapshot = jaws();
        let changes = MovieChanges {
            synopsis: Some("A bigger boat".to_string()),
            ..Default::default()
        };
        let plan = plan_movie_update(&snapshot, &changes, UseCase::Awards);
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|s| matches!(s, Statement::Update { .. })));
    }

    #[test]
    fn unchanged_values_plan_nothing() {
        let snapshot = jaws();
        let changes = MovieChanges {
            title: Some("Jaws".to_string()),
            year: Some(1975),
            genre: Some("Thriller".to_string()),
            synopsis: Some("Shark".to_string()),
        };
        for use_case in UseCase::ALL {
            assert!(plan_movie_update(&snapshot, &changes, use_case).is_empty());
        }
    }

    #[test]
    fn year_change_keeps_vote_rows() {
        let snapshot = jaws();
        let changes = MovieChanges {
            year: Some(1976),
            ..Default::default()
        };
        let plan = plan_movie_update(&snapshot, &changes, UseCase::Votes);
        assert!(plan.iter().all(|s| s.table() != Table::MoviesByVotesCategory));
    }

    #[test]
    fn title_change_moves_vote_rows_with_their_count() {
        let snapshot = jaws();
        let mut db = MemTables::default();
        db.seed(&snapshot);
        let changes = MovieChanges {
            title: Some("Jaws 2".to_string()),
            ..Default::default()
        };
        db.apply_all(&plan_movie_update(&snapshot, &changes, UseCase::Votes));

        let key = vec![("category", text(LEAST_VOTES)), ("movie_name", text("Jaws 2"))];
        assert_eq!(db.find(Table::MoviesByVotesCategory, &key).unwrap().get("votes"), Some(&CellValue::Int(12)));
        assert_eq!(db.count(Table::MoviesByVotesCategory), 1);
    }

    #[test]
    fn missing_secondary_row_is_left_alone() {
        let snapshot = MovieSnapshot::bare(jaws().category);
        let changes = MovieChanges {
            title: Some("Jaws 2".to_string()),
            ..Default::default()
        };
        let plan = plan_movie_update(&snapshot, &changes, UseCase::Awards);
        assert!(plan.iter().all(|s| s.table() == Table::MoviesByCategory));
        let plan = plan_movie_delete(&snapshot, UseCase::Nominations);
        assert_eq!(plan.len(), 1);
    }

    // -- nominations ----------------------------------------------------------

    #[test]
    fn winning_nomination_rekeys_counter_rows() {
        let snapshot = jaws();
        let mut db = MemTables::default();
        db.seed(&snapshot);

        let plan = plan_nomination_insert(&snapshot, "Best Editing", NominationResult::Winner).unwrap();
        db.apply_all(&plan);

        let count_key = vec![
            ("partition_key", text(NOMINATIONS_BUCKET)),
            ("nominations_count", CellValue::Int(3)),
            ("movie_name", text("Jaws")),
            ("year", CellValue::Int(1975)),
        ];
        let count_row = db.find(Table::MoviesByNominationsCount, &count_key).unwrap();
        assert_eq!(count_row.get("awards_won"), Some(&CellValue::Int(2)));
        assert_eq!(db.count(Table::MoviesByNominationsCount), 1);

        let awards = db
            .find(Table::AwardsByMovie, &awards_row_key(2, "Jaws", 1975))
            .unwrap();
        assert_eq!(
            awards.get("category"),
            Some(&CellValue::TextList(vec![
                "Best Score".to_string(),
                "Best Editing".to_string()
            ]))
        );
        assert_eq!(db.count(Table::AwardsByMovie), 1);

        let category = db.find(Table::MoviesByCategory, &category_key("Jaws", 1975)).unwrap();
        assert_matches!(category.get("nominations"), Some(CellValue::TextList(l)) if l.len() == 3);
    }

    #[test]
    fn plain_nomination_leaves_awards_row() {
        let snapshot = jaws();
        let plan = plan_nomination_insert(&snapshot, "Best Sound", NominationResult::Nominated).unwrap();
        assert!(plan.iter().all(|s| s.table() != Table::AwardsByMovie));
    }

    #[test]
    fn duplicate_nomination_is_a_conflict() {
        assert_matches!(
            plan_nomination_insert(&jaws(), "Best Score", NominationResult::Nominated),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn result_change_to_winner_increments_awards() {
        let snapshot = jaws();
        let mut db = MemTables::default();
        db.seed(&snapshot);

        let plan =
            plan_nomination_result_change(&snapshot, "Best Picture", NominationResult::Winner).unwrap();
        db.apply_all(&plan);

        assert!(db.find(Table::AwardsByMovie, &awards_row_key(2, "Jaws", 1975)).is_some());
        let entry = vec![
            ("movie_name", text("Jaws")),
            ("year", CellValue::Int(1975)),
            ("category", text("Best Picture")),
        ];
        assert_eq!(db.find(Table::NominationsByMovie, &entry).unwrap().get("result"), Some(&text("Winner")));
    }

    #[test]
    fn result_change_to_same_value_plans_nothing() {
        let plan =
            plan_nomination_result_change(&jaws(), "Best Score", NominationResult::Winner).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn unknown_nomination_is_not_found() {
        assert_matches!(
            plan_nomination_result_change(&jaws(), "Best Actor", NominationResult::Winner),
            Err(CoreError::NotFound { .. })
        );
        assert_matches!(
            plan_nomination_delete(&jaws(), "Best Actor"),
            Err(CoreError::NotFound { .. })
        );
    }

    #[test]
    fn deleting_a_win_rolls_back_counters() {
        let snapshot = jaws();
        let mut db = MemTables::default();
        db.seed(&snapshot);

        db.apply_all(&plan_nomination_delete(&snapshot, "Best Score").unwrap());

        let awards = db
            .find(Table::AwardsByMovie, &awards_row_key(0, "Jaws", 1975))
            .unwrap();
        assert_eq!(awards.get("category"), Some(&CellValue::TextList(Vec::new())));
        let category = db.find(Table::MoviesByCategory, &category_key("Jaws", 1975)).unwrap();
        assert_eq!(
            category.get("nominations"),
            Some(&CellValue::TextList(vec!["Best Picture".to_string()]))
        );
        assert_eq!(db.count(Table::NominationsByMovie), 1);
    }

    // -- professionals --------------------------------------------------------

    fn hanks() -> ProfessionalSnapshot {
        ProfessionalSnapshot {
            actor_name: "Tom Hanks".to_string(),
            awards_won: 2,
            birthdate: NaiveDate::from_ymd_opt(1956, 7, 9),
            nationality: Some("American".to_string()),
            nominations: vec![NominationEntryCell {
                category: Some("Best Actor".to_string()),
                year: Some(1994),
                result: Some("Winner".to_string()),
                movie: Some("Forrest Gump".to_string()),
            }],
            standing: Some(ActorStandingRow {
                has_won_award: true,
                nominations: 6,
                last_name: "Hanks".to_string(),
                first_name: "Tom".to_string(),
                nationality: Some("American".to_string()),
                categories: vec!["Best Actor".to_string()],
            }),
        }
    }

    #[test]
    fn classify_distinguishes_rename_from_in_place() {
        let snapshot = hanks();
        let rename = ProfessionalChanges {
            first_name: Some("Thomas".to_string()),
            ..Default::default()
        };
        assert_eq!(
            classify_professional_update(&snapshot, &rename),
            ProfessionalPlan::Rekey {
                first_name: "Thomas".to_string(),
                last_name: "Hanks".to_string()
            }
        );
        let nationality = ProfessionalChanges {
            nationality: Some("Greek-American".to_string()),
            ..Default::default()
        };
        assert_eq!(
            classify_professional_update(&snapshot, &nationality),
            ProfessionalPlan::UpdateInPlace
        );
        let same = ProfessionalChanges {
            first_name: Some("Tom".to_string()),
            nationality: Some("American".to_string()),
            ..Default::default()
        };
        assert_eq!(classify_professional_update(&snapshot, &same), ProfessionalPlan::Unchanged);
        assert!(plan_professional_update(&snapshot, &same).is_empty());
    }

    #[test]
    fn rename_carries_awards_and_nominations() {
        let snapshot = hanks();
        let mut db = MemTables::default();
        db.apply(&insert_actor(&snapshot));
        if let Some(standing) = &snapshot.standing {
            db.apply(&insert_standing(standing));
        }
        let changes = ProfessionalChanges {
            first_name: Some("Thomas".to_string()),
            ..Default::default()
        };

        db.apply_all(&plan_professional_update(&snapshot, &changes));

        assert!(db.find(Table::AwardsByActor, &actor_key(2, "Tom Hanks")).is_none());
        let row = db.find(Table::AwardsByActor, &actor_key(2, "Thomas Hanks")).unwrap();
        assert_matches!(row.get("nominations"), Some(CellValue::Entries(e)) if e.len() == 1);
        assert_eq!(db.count(Table::ActorsAwards), 1);
        let standing = &db.rows.iter().find(|(t, _)| *t == Table::ActorsAwards).unwrap().1;
        assert_eq!(standing.get("first_name"), Some(&text("Thomas")));
        assert_eq!(standing.get("nominations"), Some(&CellValue::Int(6)));
    }

    #[test]
    fn professional_insert_then_delete_leaves_nothing() {
        let input = ProfessionalInput {
            first_name: "Greta".to_string(),
            last_name: "Gerwig".to_string(),
            nationality: "American".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1983, 8, 4),
        };
        let mut db = MemTables::default();
        db.apply_all(&plan_professional_insert(&input));
        assert_eq!(db.count(Table::AwardsByActor), 1);
        assert_eq!(db.count(Table::ActorsAwards), 1);

        let snapshot = ProfessionalSnapshot {
            actor_name: "Greta Gerwig".to_string(),
            awards_won: 0,
            birthdate: input.date_of_birth,
            nationality: Some("American".to_string()),
            nominations: Vec::new(),
            standing: Some(ActorStandingRow {
                has_won_award: false,
                nominations: 0,
                last_name: "Gerwig".to_string(),
                first_name: "Greta".to_string(),
                nationality: Some("American".to_string()),
                categories: Vec::new(),
            }),
        };
        db.apply_all(&plan_professional_delete(&snapshot));
        assert_eq!(db.count(Table::AwardsByActor), 0);
        assert_eq!(db.count(Table::ActorsAwards), 0);
    }
}
