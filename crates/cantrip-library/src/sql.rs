//! Rendering of query plans to SQL.
//!
//! Each [`Plan`] becomes one `SELECT` over `tracks`. Patterns are bound as `LIKE`
//! parameters, rank keys become `CASE` expressions, and an intersected plan becomes a
//! `tracks.id IN (...)` subquery.

use cantrip_ql::{Column, Join, Order, OrderKey, Plan};

/// A SQL statement with its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// SQL text using `?` placeholders.
    pub sql: String,
    /// Parameter values in placeholder order.
    pub params: Vec<String>,
}

/// Returns the qualified SQL column for a plan column.
fn column_sql(column: Column) -> &'static str {
    match column {
        Column::TrackTitle => "tracks.title",
        Column::AlbumTitle => "albums.title",
        Column::TrackNumber => "album_contents.track_number",
        Column::ArtistName => "artists.name",
    }
}

/// Returns the join clause for a plan join.
fn join_sql(join: Join) -> &'static str {
    match join {
        Join::Albums => {
            " JOIN album_contents ON album_contents.track_id = tracks.id \
             JOIN albums ON albums.id = album_contents.album_id"
        }
        Join::Artists => {
            " JOIN track_artists ON track_artists.track_id = tracks.id \
             JOIN artists ON artists.id = track_artists.artist_id"
        }
    }
}

/// Builds SQL text and parameters together so placeholders stay in order.
#[derive(Default)]
struct Renderer {
    /// SQL text so far.
    sql: String,
    /// Bound parameters so far.
    params: Vec<String>,
}

impl Renderer {
    /// Appends `column LIKE ? ESCAPE '\'`, binding `value`.
    fn like(&mut self, column: Column, value: String) {
        self.sql.push_str(column_sql(column));
        self.sql.push_str(" LIKE ? ESCAPE '\\'");
        self.params.push(value);
    }

    /// Appends a `SELECT` of `output` for the plan.
    ///
    /// Ordering is only rendered for the outermost statement.
    fn select(&mut self, plan: &Plan, output: &str, outermost: bool) {
        self.sql.push_str("SELECT ");
        self.sql.push_str(output);
        self.sql.push_str(" FROM tracks");
        for &join in &plan.joins {
            self.sql.push_str(join_sql(join));
        }

        let mut first = true;
        for filter in &plan.filters {
            self.sql.push_str(if first { " WHERE (" } else { " AND (" });
            first = false;
            for (idx, pattern) in filter.patterns.iter().enumerate() {
                if idx > 0 {
                    self.sql.push_str(" OR ");
                }
                self.like(filter.column, pattern.like());
            }
            self.sql.push(')');
        }
        if let Some(other) = &plan.intersect {
            self.sql
                .push_str(if first { " WHERE tracks.id IN (" } else { " AND tracks.id IN (" });
            self.select(other, "tracks.id", false);
            self.sql.push(')');
        }

        if !outermost {
            return;
        }
        // Joins yield one row per album or artist; collapse them to one per track.
        let grouped = !plan.joins.is_empty();
        if grouped {
            self.sql.push_str(" GROUP BY tracks.id");
        }
        self.order(&plan.order, grouped);
    }

    /// Appends the `ORDER BY` clause, if any.
    ///
    /// In a grouped statement every key takes the minimum over the track's rows, so
    /// a track ranks by its best matching album or artist.
    fn order(&mut self, order: &Order, grouped: bool) {
        let keys = match order {
            Order::Random => {
                self.sql.push_str(" ORDER BY random()");
                return;
            }
            Order::Keys(keys) if keys.is_empty() => return,
            Order::Keys(keys) => keys,
        };
        self.sql.push_str(" ORDER BY ");
        for (idx, key) in keys.iter().enumerate() {
            if idx > 0 {
                self.sql.push_str(", ");
            }
            if grouped {
                self.sql.push_str("MIN(");
            }
            match key {
                OrderKey::Column(column) => self.sql.push_str(column_sql(*column)),
                OrderKey::Rank { column, patterns } => {
                    self.sql.push_str("CASE");
                    for (rank, pattern) in patterns.iter().enumerate() {
                        self.sql.push_str(" WHEN ");
                        self.like(*column, pattern.like());
                        self.sql.push_str(&format!(" THEN {rank}"));
                    }
                    self.sql.push_str(&format!(" ELSE {} END", patterns.len()));
                }
            }
            if grouped {
                self.sql.push(')');
            }
        }
    }
}

/// Renders a plan as a statement selecting `tracks.path`.
pub fn render(plan: &Plan) -> Statement {
    let mut renderer = Renderer::default();
    renderer.select(plan, "tracks.path", true);
    Statement {
        sql: renderer.sql,
        params: renderer.params,
    }
}
