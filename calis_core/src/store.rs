//! Store traits the engine reads from and writes to.
//!
//! The engine never touches persistence directly. [`crate::Database`]
//! implements every trait in memory; tests can substitute their own fakes.

use crate::{
    AppSettings, Exercise, MuscleGroup, MuscleGroupProgress, ProgressId, ProgressPatch, Result,
    SessionId, SessionPatch, SettingsPatch, Stretch, WorkoutSession,
};

/// Exercise and stretch definitions
pub trait CatalogStore {
    /// Active exercises for a muscle group, in catalog order
    fn active_exercises(&self, muscle_group: MuscleGroup) -> Result<Vec<Exercise>>;

    /// All exercises (active or not) of one class within a muscle group
    fn exercises(&self, muscle_group: MuscleGroup, exercise_class: &str) -> Result<Vec<Exercise>>;

    fn active_stretches(&self) -> Result<Vec<Stretch>>;
}

/// Per (muscle group, exercise class) progression rows
pub trait ProgressStore {
    fn progress_for(&self, muscle_group: MuscleGroup) -> Result<Vec<MuscleGroupProgress>>;

    fn progress(
        &self,
        muscle_group: MuscleGroup,
        exercise_class: &str,
    ) -> Result<Option<MuscleGroupProgress>>;

    fn update_progress(&mut self, id: ProgressId, patch: ProgressPatch) -> Result<()>;
}

/// The settings singleton
pub trait SettingsStore {
    fn settings(&self) -> Result<AppSettings>;

    fn update_settings(&mut self, patch: SettingsPatch) -> Result<()>;
}

/// Workout sessions
pub trait SessionStore {
    fn create_session(&mut self, session: WorkoutSession) -> Result<SessionId>;

    fn session(&self, id: SessionId) -> Result<Option<WorkoutSession>>;

    fn update_session(&mut self, id: SessionId, patch: SessionPatch) -> Result<()>;

    /// Every stored session, in insertion order
    fn sessions(&self) -> Result<Vec<WorkoutSession>>;
}

/// Everything the workout lifecycle needs
pub trait WorkoutStore: CatalogStore + ProgressStore + SettingsStore + SessionStore {}

impl<T> WorkoutStore for T where T: CatalogStore + ProgressStore + SettingsStore + SessionStore {}
