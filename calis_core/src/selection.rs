//! Exercise class selection.
//!
//! Classes alternate between the two weekly workouts of a body region: a
//! class stamped as last used in the paired workout is avoided unless every
//! class has been used there.

use crate::store::{CatalogStore, ProgressStore};
use crate::{Error, MuscleGroup, Result, WorkoutType};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Distinct exercise classes among the active exercises, in catalog order
pub fn active_classes<S>(store: &S, muscle_group: MuscleGroup) -> Result<Vec<String>>
where
    S: CatalogStore + ?Sized,
{
    let mut seen = HashSet::new();
    let classes = store
        .active_exercises(muscle_group)?
        .into_iter()
        .filter(|e| seen.insert(e.exercise_class.clone()))
        .map(|e| e.exercise_class)
        .collect();
    Ok(classes)
}

/// Choose the exercise class to train `muscle_group` with in `workout_type`
pub fn select_exercise_class<S, R>(
    store: &S,
    muscle_group: MuscleGroup,
    workout_type: WorkoutType,
    rng: &mut R,
) -> Result<String>
where
    S: CatalogStore + ProgressStore + ?Sized,
    R: Rng + ?Sized,
{
    let mut classes = active_classes(store, muscle_group)?;

    match classes.len() {
        0 => {
            return Err(Error::NoActiveExercises {
                muscle_group,
                exercise_class: None,
            })
        }
        1 => return Ok(classes.remove(0)),
        _ => {}
    }

    let paired = workout_type.paired();
    let used_in_paired: HashSet<String> = store
        .progress_for(muscle_group)?
        .into_iter()
        .map(|p| p.last_exercise_class_used.get(paired).to_string())
        .filter(|c| !c.is_empty())
        .collect();

    let mut candidates: Vec<&String> = classes
        .iter()
        .filter(|c| !used_in_paired.contains(*c))
        .collect();

    if candidates.is_empty() {
        tracing::debug!(
            "Every {} class was used in {}, choosing from all {}",
            muscle_group,
            paired,
            classes.len()
        );
        candidates = classes.iter().collect();
    }

    let chosen = candidates
        .choose(rng)
        .map(|c| (*c).clone())
        .ok_or_else(|| Error::NoActiveExercises {
            muscle_group,
            exercise_class: None,
        })?;

    tracing::debug!(
        "Selected {} for {} in {} (avoiding {:?})",
        chosen,
        muscle_group,
        workout_type,
        used_in_paired
    );

    Ok(chosen)
}
