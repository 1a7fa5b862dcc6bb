//! Query compilation.
//!
//! Compiles a [`Query`] into an ordered list of [`Plan`]s. Plans are storage neutral:
//! they name the joins, filters and sort keys a backend needs, and the backend turns
//! each plan into one statement. The result of a query is the concatenation of the
//! results of its plans, in order.

use std::fmt;

use log::debug;

use crate::{
    ast::{MATCH_ALL, Query},
    error::ParseError,
    parser::parse,
    pattern::Pattern,
};

/// A column a plan can filter or sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// The track title.
    TrackTitle,
    /// The title of the album containing the track.
    AlbumTitle,
    /// The track number within the album.
    TrackNumber,
    /// The name of an artist of the track.
    ArtistName,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TrackTitle => "track title",
            Self::AlbumTitle => "album title",
            Self::TrackNumber => "track number",
            Self::ArtistName => "artist name",
        };
        write!(f, "{name}")
    }
}

/// A table joined onto tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Join {
    /// Albums, through album contents.
    Albums,
    /// Artists, through track artists.
    Artists,
}

/// Keeps rows whose column matches any of the patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// The filtered column.
    pub column: Column,
    /// Alternative patterns.
    pub patterns: Vec<Pattern>,
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderKey {
    /// Sorts by the index of the first pattern the column matches.
    Rank {
        /// The ranked column.
        column: Column,
        /// Patterns in rank order.
        patterns: Vec<Pattern>,
    },
    /// Sorts by the column value.
    Column(Column),
}

/// Result ordering of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Order {
    /// Sort by the keys, in priority order.
    Keys(Vec<OrderKey>),
    /// Random order.
    Random,
}

impl Default for Order {
    fn default() -> Self {
        Self::Keys(Vec::new())
    }
}

/// A single storage query over tracks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plan {
    /// Tables to join.
    pub joins: Vec<Join>,
    /// Filters, all of which must hold.
    pub filters: Vec<Filter>,
    /// Result ordering.
    pub order: Order,
    /// Only keep tracks also selected by this plan.
    pub intersect: Option<Box<Plan>>,
}

impl Plan {
    /// Returns true if the plan joins `join`.
    pub fn joins(&self, join: Join) -> bool {
        self.joins.contains(&join)
    }

    /// Returns the filter on `column`, if any.
    pub fn filter(&self, column: Column) -> Option<&Filter> {
        self.filters.iter().find(|f| f.column == column)
    }

    /// Writes the plan tree at the given depth.
    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        writeln!(f, "{pad}tracks")?;
        for join in &self.joins {
            let table = match join {
                Join::Albums => "albums",
                Join::Artists => "artists",
            };
            writeln!(f, "{pad}  join {table}")?;
        }
        for filter in &self.filters {
            writeln!(f, "{pad}  where {} ~ {}", filter.column, pattern_list(&filter.patterns))?;
        }
        if let Some(other) = &self.intersect {
            writeln!(f, "{pad}  intersect")?;
            other.write_tree(f, depth + 2)?;
        }
        match &self.order {
            Order::Random => writeln!(f, "{pad}  order randomly"),
            Order::Keys(keys) if keys.is_empty() => Ok(()),
            Order::Keys(keys) => {
                let keys: Vec<String> = keys
                    .iter()
                    .map(|key| match key {
                        OrderKey::Rank { column, patterns } => {
                            format!("rank({column} ~ {})", pattern_list(patterns))
                        }
                        OrderKey::Column(column) => column.to_string(),
                    })
                    .collect();
                writeln!(f, "{pad}  order by {}", keys.join(", "))
            }
        }
    }
}

/// Formats patterns as `[a, b]`.
fn pattern_list(patterns: &[Pattern]) -> String {
    let items: Vec<String> = patterns.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

/// Returns the patterns of a constraining name list, or `None` if the list is
/// absent or contains the match-all pattern.
fn constraint(names: Option<&Vec<String>>) -> Option<Vec<Pattern>> {
    let names = names?;
    if names.iter().any(|n| n == MATCH_ALL) {
        return None;
    }
    Some(names.iter().map(|n| Pattern::new(n)).collect())
}

/// Compiles one node and its `or` chain into `plans`.
fn compile_into(query: &Query, plans: &mut Vec<Plan>) {
    let mut plan = Plan::default();
    let mut album_keys = Vec::new();
    let mut artist_keys = Vec::new();

    if let Some(patterns) = constraint(query.on.as_ref()) {
        plan.joins.push(Join::Albums);
        plan.filters.push(Filter {
            column: Column::AlbumTitle,
            patterns: patterns.clone(),
        });
        album_keys.push(OrderKey::Rank {
            column: Column::AlbumTitle,
            patterns,
        });
        album_keys.push(OrderKey::Column(Column::AlbumTitle));
        if query.ordered {
            album_keys.push(OrderKey::Column(Column::TrackNumber));
        }
    }

    if let Some(patterns) = constraint(query.by.as_ref()) {
        plan.joins.push(Join::Artists);
        plan.filters.push(Filter {
            column: Column::ArtistName,
            patterns: patterns.clone(),
        });
        artist_keys.push(OrderKey::Rank {
            column: Column::ArtistName,
            patterns,
        });
        artist_keys.push(OrderKey::Column(Column::ArtistName));
    }

    let title_patterns: Vec<Pattern> = query.titles.iter().map(|t| Pattern::new(t)).collect();
    let filtered: Vec<Pattern> = query
        .titles
        .iter()
        .filter(|t| t.as_str() != MATCH_ALL)
        .map(|t| Pattern::new(t))
        .collect();
    if !filtered.is_empty() {
        plan.filters.push(Filter {
            column: Column::TrackTitle,
            patterns: filtered,
        });
    }

    plan.order = if query.shuffle {
        Order::Random
    } else {
        let mut keys = album_keys;
        keys.extend(artist_keys);
        keys.push(OrderKey::Rank {
            column: Column::TrackTitle,
            patterns: title_patterns,
        });
        keys.push(OrderKey::Column(Column::TrackTitle));
        Order::Keys(keys)
    };

    if let Some(nested) = query.and_()
        && let Some(mut first) = compile(nested).into_iter().next()
    {
        first.order = Order::default();
        plan.intersect = Some(Box::new(first));
    }

    plans.push(plan);
    if let Some(other) = query.or_() {
        compile_into(other, plans);
    }
}

/// Compiles a query into plans whose results, concatenated in order, are the query
/// result.
pub fn compile(query: &Query) -> Vec<Plan> {
    let mut plans = Vec::new();
    compile_into(query, &mut plans);
    debug!("compiled {query} into {} plan(s)", plans.len());
    plans
}

/// Parses and compiles query text.
///
/// # Errors
///
/// Returns the [`ParseError`] if the text does not parse.
pub fn compile_str(source: &str) -> Result<Vec<Plan>, ParseError> {
    Ok(compile(&parse(source)?))
}
