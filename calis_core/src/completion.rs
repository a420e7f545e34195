//! Workout completion: record the outcome and advance the rotation.
//!
//! The effort rating is stored for history only. It does not change any
//! difficulty tier.

use crate::store::{SessionStore, SettingsStore};
use crate::{
    EffortRating, Error, Result, SessionId, SessionPatch, SettingsPatch, StretchId, WorkoutType,
};

/// Mark a session completed and schedule the next workout type
///
/// Returns the newly scheduled workout type. A session can only be
/// completed once.
pub fn complete_workout<S>(
    store: &mut S,
    session_id: SessionId,
    effort_rating: EffortRating,
    stretches_completed: Vec<StretchId>,
) -> Result<WorkoutType>
where
    S: SessionStore + SettingsStore + ?Sized,
{
    let session = store
        .session(session_id)?
        .ok_or_else(|| Error::not_found("Session", session_id))?;
    // Completing twice would advance the rotation twice
    if session.completed {
        return Err(Error::Validation(format!(
            "Session {} already completed",
            session_id
        )));
    }

    store.update_session(
        session_id,
        SessionPatch {
            completed: Some(true),
            effort_rating: Some(effort_rating),
            stretches_completed: Some(stretches_completed),
            ..SessionPatch::default()
        },
    )?;

    let settings = store.settings()?;
    let next = settings.current_workout_type.next();
    store.update_settings(SettingsPatch {
        current_workout_type: Some(next),
        ..SettingsPatch::default()
    })?;

    tracing::info!(
        "Completed session {} ({}), next workout: {}",
        session_id,
        effort_rating.label(),
        next
    );

    Ok(next)
}

/// Like [`complete_workout`], but validates a raw 1-3 rating first
pub fn complete_workout_with_rating<S>(
    store: &mut S,
    session_id: SessionId,
    effort_rating: u8,
    stretches_completed: Vec<StretchId>,
) -> Result<WorkoutType>
where
    S: SessionStore + SettingsStore + ?Sized,
{
    let rating = EffortRating::try_from(effort_rating)?;
    complete_workout(store, session_id, rating, stretches_completed)
}
