//! Cross-symbol ranking and selection.

use signal_core::{Horizon, Idea};
use strategy_engine::Candidate;

/// Idea caps per horizon.
pub const MAX_SHORT_IDEAS: usize = 12;
pub const MAX_LONG_IDEAS: usize = 8;

/// Ideas per horizon, already in final order. The first entry of each list
/// is that horizon's top pick.
#[derive(Debug, Default)]
pub struct RankedIdeas {
    pub short: Vec<Idea>,
    pub long: Vec<Idea>,
}

impl RankedIdeas {
    pub fn top_pick(&self, horizon: Horizon) -> Option<&Idea> {
        match horizon {
            Horizon::Short => self.short.first(),
            Horizon::Long => self.long.first(),
        }
    }

    /// Short ideas followed by long ideas, per-horizon order preserved.
    pub fn into_combined(self) -> Vec<Idea> {
        let mut ideas = self.short;
        ideas.extend(self.long);
        ideas
    }
}

/// Group candidates by horizon and order each group by quality-boosted
/// score descending, then risk/reward descending, then symbol ascending,
/// then strategy name ascending. The chain is total, so the output is
/// independent of arrival order. No cross-strategy dedup: two strategies
/// firing on one symbol stay as two ideas.
pub fn rank(candidates: Vec<(String, Candidate)>) -> RankedIdeas {
    let mut short: Vec<(String, Candidate)> = Vec::new();
    let mut long: Vec<(String, Candidate)> = Vec::new();

    for entry in candidates {
        match entry.1.plan.horizon {
            Horizon::Short => short.push(entry),
            Horizon::Long => long.push(entry),
        }
    }

    let order = |a: &(String, Candidate), b: &(String, Candidate)| {
        b.1.score
            .total_cmp(&a.1.score)
            .then(b.1.plan.rr.total_cmp(&a.1.plan.rr))
            .then_with(|| a.0.cmp(&b.0))
            .then_with(|| a.1.plan.strategy.cmp(&b.1.plan.strategy))
    };
    short.sort_by(order);
    long.sort_by(order);
    short.truncate(MAX_SHORT_IDEAS);
    long.truncate(MAX_LONG_IDEAS);

    let to_ideas = |group: Vec<(String, Candidate)>| {
        group
            .into_iter()
            .map(|(symbol, candidate)| Idea {
                symbol,
                plan: candidate.plan,
            })
            .collect()
    };

    RankedIdeas {
        short: to_ideas(short),
        long: to_ideas(long),
    }
}
