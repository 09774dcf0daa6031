use rust_decimal::Decimal;
use serde::Serialize;

use super::errors::GradeError;
use super::types::Handicap;

/// One label per bucket, so `n` boundaries need `n + 1` letters.
pub const MAX_BOUNDARIES: usize = 25;

/// Anything that can be placed into a grade.
pub trait Gradeable {
    fn handicap(&self) -> Handicap;
    fn first_name(&self) -> &str;
    fn last_name(&self) -> &str;
}

/// Strictly ascending inclusive upper bounds for each grade but the last.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GradeBoundaries(Vec<Decimal>);

impl GradeBoundaries {
    pub fn new(bounds: Vec<Decimal>) -> Result<Self, GradeError> {
        if bounds.len() > MAX_BOUNDARIES {
            return Err(GradeError::TooMany {
                count: bounds.len(),
                max: MAX_BOUNDARIES,
            });
        }

        if let Some(idx) = bounds.windows(2).position(|w| w[0] >= w[1]) {
            return Err(GradeError::NotAscending { position: idx + 2 });
        }

        Ok(Self(bounds))
    }

    pub fn as_slice(&self) -> &[Decimal] {
        &self.0
    }

    pub fn grade_count(&self) -> usize {
        self.0.len() + 1
    }

    fn grade_index(&self, handicap: Handicap) -> usize {
        self.0
            .iter()
            .position(|bound| handicap <= *bound)
            .unwrap_or(self.0.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeBucket<P> {
    pub label: String,
    /// Exclusive; `None` for the first grade.
    pub lower: Option<Decimal>,
    /// Inclusive; `None` for the last grade.
    pub upper: Option<Decimal>,
    pub players: Vec<P>,
}

pub fn grade_label(index: usize) -> String {
    char::from(b'A' + index as u8).to_string()
}

/// Splits players into grades, best (lowest handicap) grade first.
///
/// Every grade is returned even when empty. Within a grade players are in
/// surname then first-name order; ties keep their input order.
pub fn grade_players<P>(players: &[P], boundaries: &GradeBoundaries) -> Vec<GradeBucket<P>>
where
    P: Gradeable + Clone,
{
    let bounds = boundaries.as_slice();
    let mut buckets: Vec<GradeBucket<P>> = (0..boundaries.grade_count())
        .map(|idx| GradeBucket {
            label: grade_label(idx),
            lower: idx.checked_sub(1).map(|prev| bounds[prev]),
            upper: bounds.get(idx).copied(),
            players: Vec::new(),
        })
        .collect();

    let mut sorted = players.to_vec();
    sorted.sort_by(|a, b| {
        a.last_name()
            .cmp(b.last_name())
            .then_with(|| a.first_name().cmp(b.first_name()))
    });

    for player in sorted {
        let idx = boundaries.grade_index(player.handicap());
        buckets[idx].players.push(player);
    }

    buckets
}
