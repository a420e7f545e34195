//! Cooldown stretch recommendation.

use crate::store::CatalogStore;
use crate::{MuscleGroup, Position, Result, Stretch};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// How many of the most comprehensive stretches per position are eligible
const TOP_PER_POSITION: usize = 3;

/// Stretch tags that cool down each muscle group
pub fn muscle_tags(muscle_group: MuscleGroup) -> &'static [&'static str] {
    match muscle_group {
        MuscleGroup::Quads => &["Quadriceps", "Hip Flexors", "Hips"],
        MuscleGroup::TricepsPectorals => &["Triceps", "Chest", "Shoulders"],
        MuscleGroup::AbdominalsObliques => &["Hip Flexors", "Back", "Spine"],
        MuscleGroup::HamstringsCalves => &["Hamstrings", "Calves", "Ankles"],
        MuscleGroup::BicepsScapula => &["Biceps", "Shoulders", "Back", "Lats"],
        MuscleGroup::GlutesLumbar => &["Glutes", "Back", "Hips"],
    }
}

/// Recommend at most one stretch per position for the given muscle groups
///
/// Within a position, stretches covering more muscle tags rank first and one
/// of the top three is picked at random. Results follow [`Position::ALL`].
pub fn recommend_stretches<S, R>(
    store: &S,
    muscle_groups: &[MuscleGroup],
    rng: &mut R,
) -> Result<Vec<Stretch>>
where
    S: CatalogStore + ?Sized,
    R: Rng + ?Sized,
{
    let targets: HashSet<&str> = muscle_groups
        .iter()
        .flat_map(|mg| muscle_tags(*mg).iter().copied())
        .collect();

    let matching: Vec<Stretch> = store
        .active_stretches()?
        .into_iter()
        .filter(|s| s.muscle_tags.iter().any(|t| targets.contains(t.as_str())))
        .collect();

    let mut selected = Vec::new();
    for position in Position::ALL {
        let mut candidates: Vec<&Stretch> =
            matching.iter().filter(|s| s.position == position).collect();
        if candidates.is_empty() {
            continue;
        }

        // Stable sort keeps catalog order among equally broad stretches
        candidates.sort_by(|a, b| b.muscle_tags.len().cmp(&a.muscle_tags.len()));
        candidates.truncate(TOP_PER_POSITION);

        if let Some(stretch) = candidates.choose(rng) {
            selected.push((*stretch).clone());
        }
    }

    tracing::debug!(
        "Recommended {} stretches for {:?}",
        selected.len(),
        muscle_groups
    );

    Ok(selected)
}
