//! Workout generator and set logging.
//!
//! Generation runs in two phases:
//! 1. **Plan**: select a class, read its difficulty and build the drop set for
//!    every muscle group. Only reads happen here, so any failure leaves the
//!    store untouched.
//! 2. **Commit**: stamp the chosen classes into their progress rows and
//!    create the session.

use crate::drop_set::{build_drop_set, DROP_SET_LEN};
use crate::selection::select_exercise_class;
use crate::store::{CatalogStore, ProgressStore, SessionStore};
use crate::{
    Difficulty, Error, MuscleGroup, ProgressId, ProgressPatch, RepRange, Result, SessionId,
    SessionPatch, SetLog, WorkoutSession, WorkoutType,
};
use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

/// The decisions made for one muscle group, before anything is written
#[derive(Clone, Debug)]
struct MuscleGroupPlan {
    muscle_group: MuscleGroup,
    exercise_class: String,
    progress_id: Option<ProgressId>,
    sets: Vec<SetLog>,
}

/// Generate and persist a workout session for `workout_type`
///
/// Muscle groups are trained in the fixed order of the body region. The
/// returned session equals what was stored.
pub fn generate_workout<S, R>(
    store: &mut S,
    workout_type: WorkoutType,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<WorkoutSession>
where
    S: CatalogStore + ProgressStore + SessionStore + ?Sized,
    R: Rng + ?Sized,
{
    let muscle_groups = workout_type.muscle_chains();

    let plans = muscle_groups
        .iter()
        .map(|muscle_group| plan_muscle_group(&*store, *muscle_group, workout_type, &mut *rng))
        .collect::<Result<Vec<_>>>()?;

    for plan in &plans {
        match plan.progress_id {
            Some(id) => store.update_progress(
                id,
                ProgressPatch::stamp(workout_type, plan.exercise_class.as_str()),
            )?,
            None => tracing::debug!(
                "No progress row for {} / {}, nothing to stamp",
                plan.muscle_group,
                plan.exercise_class
            ),
        }
    }

    let session = WorkoutSession {
        id: Uuid::new_v4(),
        date: now,
        workout_type,
        muscle_groups: muscle_groups.to_vec(),
        sets: plans.into_iter().flat_map(|plan| plan.sets).collect(),
        completed: false,
        effort_rating: None,
        stretches_completed: Vec::new(),
    };

    store.create_session(session.clone())?;

    tracing::info!(
        "Generated {} session {} with {} sets",
        workout_type,
        session.id,
        session.sets.len()
    );

    Ok(session)
}

fn plan_muscle_group<S, R>(
    store: &S,
    muscle_group: MuscleGroup,
    workout_type: WorkoutType,
    rng: &mut R,
) -> Result<MuscleGroupPlan>
where
    S: CatalogStore + ProgressStore + ?Sized,
    R: Rng + ?Sized,
{
    let exercise_class = select_exercise_class(store, muscle_group, workout_type, rng)?;

    let progress = store.progress(muscle_group, &exercise_class)?;
    let current_difficulty = progress
        .as_ref()
        .map(|p| p.current_difficulty)
        .unwrap_or(Difficulty::Intermediate);

    let exercises = store.exercises(muscle_group, &exercise_class)?;
    let drop_set = build_drop_set(&exercises, current_difficulty);

    if drop_set.is_empty() {
        return Err(Error::NoActiveExercises {
            muscle_group,
            exercise_class: Some(exercise_class),
        });
    }
    if drop_set.len() < DROP_SET_LEN {
        tracing::warn!(
            "{} / {} only has {} active exercises, drop set is short",
            muscle_group,
            exercise_class,
            drop_set.len()
        );
    }

    let sets = drop_set
        .iter()
        .zip(RepRange::SEQUENCE)
        .map(|(exercise, rep_range)| SetLog {
            set_number: rep_range.set_number(),
            target_rep_range: rep_range,
            exercise_id: exercise.id,
            exercise_name: exercise.name.clone(),
            actual_reps: None,
            weight: None,
            completed_at: None,
        })
        .collect();

    Ok(MuscleGroupPlan {
        muscle_group,
        exercise_class,
        progress_id: progress.map(|p| p.id),
        sets,
    })
}

/// Record the outcome of one set (zero-based `set_index`) of a session
pub fn record_set<S>(
    store: &mut S,
    session_id: SessionId,
    set_index: usize,
    actual_reps: Option<u32>,
    weight: Option<f64>,
    now: DateTime<Utc>,
) -> Result<SetLog>
where
    S: SessionStore + ?Sized,
{
    let session = store
        .session(session_id)?
        .ok_or_else(|| Error::not_found("Session", session_id))?;

    let mut sets = session.sets;
    let set_count = sets.len();
    let set = sets.get_mut(set_index).ok_or_else(|| {
        Error::Validation(format!(
            "Set {} is out of range (session has {} sets)",
            set_index.saturating_add(1),
            set_count
        ))
    })?;

    if let Some(w) = weight {
        if !w.is_finite() || w < 0.0 {
            return Err(Error::Validation(format!("Invalid weight: {}", w)));
        }
    }

    set.actual_reps = actual_reps;
    set.weight = weight;
    set.completed_at = Some(now);
    let logged = set.clone();

    store.update_session(
        session_id,
        SessionPatch {
            sets: Some(sets),
            ..SessionPatch::default()
        },
    )?;

    tracing::debug!(
        "Logged set {} of session {}: {:?} reps @ {:?}",
        set_index + 1,
        session_id,
        actual_reps,
        weight
    );

    Ok(logged)
}
