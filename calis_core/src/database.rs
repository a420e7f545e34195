//! In-memory database implementing every store trait.
//!
//! The whole database is one serde value, so the file-backed snapshot in
//! `snapshot.rs` can persist it with a single atomic write.

use crate::catalog::Catalog;
use crate::store::{CatalogStore, ProgressStore, SessionStore, SettingsStore};
use crate::{
    AppSettings, Difficulty, Error, Exercise, ExerciseId, ExercisePatch, LastUsedClasses, MuscleGroup,
    MuscleGroupProgress, ProgressId, ProgressPatch, Result, SessionId, SessionPatch,
    SettingsPatch, Stretch, StretchId, StretchPatch, WorkoutSession, WorkoutType,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Database {
    pub exercises: Vec<Exercise>,
    pub stretches: Vec<Stretch>,
    pub progress: Vec<MuscleGroupProgress>,
    pub sessions: Vec<WorkoutSession>,
    pub settings: AppSettings,
}

impl Database {
    /// Fresh database from a catalog
    ///
    /// Creates one progress row at Intermediate for every (muscle group,
    /// exercise class) pair that has an active exercise.
    pub fn seeded(catalog: &Catalog, rest_timer_seconds: u32) -> Self {
        let mut progress = Vec::new();
        let mut seen = HashSet::new();

        for muscle_group in MuscleGroup::ALL {
            for exercise in catalog
                .exercises
                .iter()
                .filter(|e| e.muscle_group == muscle_group && e.active)
            {
                if seen.insert((muscle_group, exercise.exercise_class.clone())) {
                    progress.push(MuscleGroupProgress {
                        id: progress.len() as ProgressId + 1,
                        muscle_group,
                        exercise_class: exercise.exercise_class.clone(),
                        current_difficulty: Difficulty::Intermediate,
                        last_workout_date: None,
                        last_exercise_class_used: LastUsedClasses::default(),
                    });
                }
            }
        }

        tracing::info!(
            "Seeded database: {} exercises, {} stretches, {} progress rows",
            catalog.exercises.len(),
            catalog.stretches.len(),
            progress.len()
        );

        Self {
            exercises: catalog.exercises.clone(),
            stretches: catalog.stretches.clone(),
            progress,
            sessions: Vec::new(),
            settings: AppSettings {
                rest_timer_seconds,
                ..AppSettings::default()
            },
        }
    }

    /// Drop all history and progress and reseed from `catalog`
    pub fn reset(&mut self, catalog: &Catalog) {
        let rest_timer_seconds = self.settings.rest_timer_seconds;
        tracing::warn!(
            "Resetting database ({} sessions discarded)",
            self.sessions.len()
        );
        *self = Self::seeded(catalog, rest_timer_seconds);
    }

    /// Sessions sorted by date, newest first
    pub fn sessions_newest_first(&self) -> Vec<&WorkoutSession> {
        let mut sessions: Vec<_> = self.sessions.iter().collect();
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
        sessions
    }

    /// Most recently generated session, if any
    pub fn latest_session(&self) -> Option<&WorkoutSession> {
        self.sessions.iter().max_by_key(|s| s.date)
    }

    /// Edit an exercise's metadata or flags
    ///
    /// Changing the difficulty moves the exercise to another rung of its
    /// class ladder, which changes what future drop sets pick.
    pub fn update_exercise(&mut self, id: ExerciseId, patch: ExercisePatch) -> Result<()> {
        patch.validate()?;
        let exercise = self
            .exercises
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::not_found("Exercise", id))?;
        patch.apply(exercise);
        tracing::info!("Updated exercise {}: {:?}", id, exercise);
        Ok(())
    }

    /// Edit a stretch's name, position, tags or active flag
    pub fn update_stretch(&mut self, id: StretchId, patch: StretchPatch) -> Result<()> {
        patch.validate()?;
        let stretch = self
            .stretches
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::not_found("Stretch", id))?;
        patch.apply(stretch);
        tracing::info!("Updated stretch {}: {:?}", id, stretch);
        Ok(())
    }

    pub fn set_exercise_active(&mut self, id: ExerciseId, active: bool) -> Result<()> {
        self.update_exercise(
            id,
            ExercisePatch {
                active: Some(active),
                ..ExercisePatch::default()
            },
        )
    }

    pub fn set_exercise_requires_weight(&mut self, id: ExerciseId, requires: bool) -> Result<()> {
        self.update_exercise(
            id,
            ExercisePatch {
                requires_weight: Some(requires),
                ..ExercisePatch::default()
            },
        )
    }

    pub fn set_stretch_active(&mut self, id: StretchId, active: bool) -> Result<()> {
        self.update_stretch(
            id,
            StretchPatch {
                active: Some(active),
                ..StretchPatch::default()
            },
        )
    }

    /// Manually override which workout comes next
    pub fn set_current_workout_type(&mut self, workout_type: WorkoutType) -> Result<()> {
        self.update_settings(SettingsPatch {
            current_workout_type: Some(workout_type),
            ..SettingsPatch::default()
        })
    }
}

impl CatalogStore for Database {
    fn active_exercises(&self, muscle_group: MuscleGroup) -> Result<Vec<Exercise>> {
        Ok(self
            .exercises
            .iter()
            .filter(|e| e.muscle_group == muscle_group && e.active)
            .cloned()
            .collect())
    }

    fn exercises(&self, muscle_group: MuscleGroup, exercise_class: &str) -> Result<Vec<Exercise>> {
        Ok(self
            .exercises
            .iter()
            .filter(|e| e.muscle_group == muscle_group && e.exercise_class == exercise_class)
            .cloned()
            .collect())
    }

    fn active_stretches(&self) -> Result<Vec<Stretch>> {
        Ok(self.stretches.iter().filter(|s| s.active).cloned().collect())
    }
}

impl ProgressStore for Database {
    fn progress_for(&self, muscle_group: MuscleGroup) -> Result<Vec<MuscleGroupProgress>> {
        Ok(self
            .progress
            .iter()
            .filter(|p| p.muscle_group == muscle_group)
            .cloned()
            .collect())
    }

    fn progress(
        &self,
        muscle_group: MuscleGroup,
        exercise_class: &str,
    ) -> Result<Option<MuscleGroupProgress>> {
        Ok(self
            .progress
            .iter()
            .find(|p| p.muscle_group == muscle_group && p.exercise_class == exercise_class)
            .cloned())
    }

    fn update_progress(&mut self, id: ProgressId, patch: ProgressPatch) -> Result<()> {
        let row = self
            .progress
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found("Progress", id))?;
        patch.apply(row);
        Ok(())
    }
}

impl SettingsStore for Database {
    fn settings(&self) -> Result<AppSettings> {
        Ok(self.settings.clone())
    }

    fn update_settings(&mut self, patch: SettingsPatch) -> Result<()> {
        patch.apply(&mut self.settings);
        tracing::debug!("Settings now {:?}", self.settings);
        Ok(())
    }
}

impl SessionStore for Database {
    fn create_session(&mut self, session: WorkoutSession) -> Result<SessionId> {
        if self.sessions.iter().any(|s| s.id == session.id) {
            return Err(Error::Validation(format!(
                "Session {} already exists",
                session.id
            )));
        }
        let id = session.id;
        self.sessions.push(session);
        Ok(id)
    }

    fn session(&self, id: SessionId) -> Result<Option<WorkoutSession>> {
        Ok(self.sessions.iter().find(|s| s.id == id).cloned())
    }

    fn update_session(&mut self, id: SessionId, patch: SessionPatch) -> Result<()> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::not_found("Session", id))?;
        patch.apply(session);
        Ok(())
    }

    fn sessions(&self) -> Result<Vec<WorkoutSession>> {
        Ok(self.sessions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seeded_db;
    use crate::{get_default_catalog, SettingsStore};

    #[test]
    fn test_seeding_creates_progress_per_active_class() {
        let db = seeded_db();
        assert_eq!(db.progress.len(), 12);
        assert!(db
            .progress
            .iter()
            .all(|p| p.current_difficulty == Difficulty::Intermediate
                && p.last_exercise_class_used == LastUsedClasses::default()));

        let ids: HashSet<_> = db.progress.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), db.progress.len());
        assert_eq!(db.settings, AppSettings::default());
    }

    #[test]
    fn test_seeding_skips_inactive_classes() {
        let mut catalog = get_default_catalog().clone();
        for exercise in catalog.exercises.iter_mut().filter(|e| e.exercise_class == "Dip") {
            exercise.active = false;
        }

        let db = Database::seeded(&catalog, 60);
        assert_eq!(db.progress.len(), 11);
        assert!(db.progress.iter().all(|p| p.exercise_class != "Dip"));
        assert_eq!(db.settings.rest_timer_seconds, 60);
    }

    #[test]
    fn test_progress_lookup_and_update() {
        let mut db = seeded_db();
        let row = db
            .progress(MuscleGroup::Quads, "Squat")
            .unwrap()
            .unwrap();

        db.update_progress(row.id, ProgressPatch::stamp(WorkoutType::Lower1, "Squat"))
            .unwrap();

        let row = db
            .progress(MuscleGroup::Quads, "Squat")
            .unwrap()
            .unwrap();
        assert_eq!(row.last_exercise_class_used.get(WorkoutType::Lower1), "Squat");
        assert!(db.progress(MuscleGroup::Quads, "Plank").unwrap().is_none());
    }

    #[test]
    fn test_update_unknown_records() {
        let mut db = seeded_db();
        assert!(matches!(
            db.update_progress(999, ProgressPatch::default()),
            Err(Error::RecordNotFound { kind: "Progress", .. })
        ));
        assert!(matches!(
            db.update_session(uuid::Uuid::new_v4(), SessionPatch::default()),
            Err(Error::RecordNotFound { kind: "Session", .. })
        ));
        assert!(matches!(
            db.set_exercise_active(999, false),
            Err(Error::RecordNotFound { kind: "Exercise", .. })
        ));
        assert!(matches!(
            db.set_stretch_active(999, false),
            Err(Error::RecordNotFound { kind: "Stretch", .. })
        ));
    }

    #[test]
    fn test_management_toggles() {
        let mut db = seeded_db();
        db.set_exercise_active(1, false).unwrap();
        db.set_exercise_requires_weight(1, true).unwrap();
        db.set_stretch_active(1, false).unwrap();

        assert!(!db.exercises[0].active);
        assert!(db.exercises[0].requires_weight);
        assert!(db.active_stretches().unwrap().iter().all(|s| s.id != 1));
        assert!(db
            .active_exercises(db.exercises[0].muscle_group)
            .unwrap()
            .iter()
            .all(|e| e.id != 1));
    }

    #[test]
    fn test_edit_exercise_metadata() {
        let mut db = seeded_db();
        db.update_exercise(
            4,
            ExercisePatch {
                name: Some("Close-Grip Push-up".into()),
                difficulty: Some(Difficulty::Beginner),
                target_reps: Some(8),
                target_weight: Some(5.0),
                ..ExercisePatch::default()
            },
        )
        .unwrap();

        let exercise = &db.exercises[3];
        assert_eq!(exercise.name, "Close-Grip Push-up");
        assert_eq!(exercise.difficulty, Difficulty::Beginner);
        assert_eq!(exercise.target_reps, Some(8));
        assert_eq!(exercise.target_weight, Some(5.0));
        assert!(exercise.active);
    }

    #[test]
    fn test_invalid_edits_change_nothing() {
        let mut db = seeded_db();
        let before = db.clone();

        let blank_name = ExercisePatch {
            name: Some("   ".into()),
            difficulty: Some(Difficulty::Master),
            ..ExercisePatch::default()
        };
        assert!(matches!(
            db.update_exercise(1, blank_name),
            Err(Error::Validation(_))
        ));

        let negative = ExercisePatch {
            target_weight: Some(-2.5),
            ..ExercisePatch::default()
        };
        assert!(matches!(
            db.update_exercise(1, negative),
            Err(Error::Validation(_))
        ));

        let no_tags = StretchPatch {
            muscle_tags: Some(vec![]),
            ..StretchPatch::default()
        };
        assert!(matches!(
            db.update_stretch(1, no_tags),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            db.update_stretch(999, StretchPatch::default()),
            Err(Error::RecordNotFound { kind: "Stretch", .. })
        ));

        assert_eq!(db, before);
    }

    #[test]
    fn test_edit_stretch() {
        let mut db = seeded_db();
        db.update_stretch(
            16,
            StretchPatch {
                name: Some("Neck Side Bend".into()),
                position: Some(crate::Position::Standing),
                muscle_tags: Some(vec!["Neck".into(), "Shoulders".into()]),
                ..StretchPatch::default()
            },
        )
        .unwrap();

        let stretch = db.stretches.iter().find(|s| s.id == 16).unwrap();
        assert_eq!(stretch.name, "Neck Side Bend");
        assert_eq!(stretch.position, crate::Position::Standing);
        assert_eq!(stretch.muscle_tags, vec!["Neck", "Shoulders"]);
    }

    #[test]
    fn test_manual_schedule_override() {
        let mut db = seeded_db();
        db.set_current_workout_type(WorkoutType::Lower2).unwrap();
        assert_eq!(
            db.settings().unwrap().current_workout_type,
            WorkoutType::Lower2
        );
    }

    #[test]
    fn test_reset_discards_history_and_keeps_timer() {
        let mut db = Database::seeded(get_default_catalog(), 120);
        db.set_exercise_active(3, false).unwrap();
        db.set_current_workout_type(WorkoutType::Upper2).unwrap();

        db.reset(get_default_catalog());

        assert!(db.exercises.iter().all(|e| e.active));
        assert_eq!(db.settings.current_workout_type, WorkoutType::Upper1);
        assert_eq!(db.settings.rest_timer_seconds, 120);
        assert!(db.sessions.is_empty());
    }
}
