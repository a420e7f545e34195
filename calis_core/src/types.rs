//! Core domain types for the Calis workout system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Closed enumerations (muscle groups, difficulty tiers, workout types, positions)
//! - Catalog records (exercises and stretches)
//! - Progress, session and settings records
//! - Patches applied through the store traits

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub type ExerciseId = u32;
pub type StretchId = u32;
pub type ProgressId = u32;
pub type SessionId = Uuid;

// ============================================================================
// Enumerations
// ============================================================================

/// One of the six anatomical groupings exercises are tagged with
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MuscleGroup {
    #[serde(rename = "Quads")]
    Quads,
    #[serde(rename = "Triceps & Pectorals")]
    TricepsPectorals,
    #[serde(rename = "Abdominals & Obliques")]
    AbdominalsObliques,
    #[serde(rename = "Hamstrings & Calves")]
    HamstringsCalves,
    #[serde(rename = "Biceps & Scapula")]
    BicepsScapula,
    #[serde(rename = "Glutes & Lumbar")]
    GlutesLumbar,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 6] = [
        MuscleGroup::Quads,
        MuscleGroup::TricepsPectorals,
        MuscleGroup::AbdominalsObliques,
        MuscleGroup::HamstringsCalves,
        MuscleGroup::BicepsScapula,
        MuscleGroup::GlutesLumbar,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MuscleGroup::Quads => "Quads",
            MuscleGroup::TricepsPectorals => "Triceps & Pectorals",
            MuscleGroup::AbdominalsObliques => "Abdominals & Obliques",
            MuscleGroup::HamstringsCalves => "Hamstrings & Calves",
            MuscleGroup::BicepsScapula => "Biceps & Scapula",
            MuscleGroup::GlutesLumbar => "Glutes & Lumbar",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Six-level ordered difficulty tier
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub enum Difficulty {
    Novice,
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
    Master,
}

impl Difficulty {
    /// All tiers, easiest first
    pub const ORDER: [Difficulty; 6] = [
        Difficulty::Novice,
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Expert,
        Difficulty::Master,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Difficulty> {
        Self::ORDER.get(index).copied()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = normalized(s);
        Self::ORDER
            .into_iter()
            .find(|d| d.to_string().to_lowercase() == name)
            .ok_or_else(|| Error::Validation(format!("Unknown difficulty: {}", s)))
    }
}

/// Lowercase ASCII alphanumerics only, for forgiving name parsing
fn normalized(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// The four scheduled workouts, in rotation order
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WorkoutType {
    Upper1,
    Lower1,
    Upper2,
    Lower2,
}

impl WorkoutType {
    pub const ROTATION: [WorkoutType; 4] = [
        WorkoutType::Upper1,
        WorkoutType::Lower1,
        WorkoutType::Upper2,
        WorkoutType::Lower2,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Upper1 => "Upper #1",
            WorkoutType::Lower1 => "Lower #1",
            WorkoutType::Upper2 => "Upper #2",
            WorkoutType::Lower2 => "Lower #2",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for WorkoutType {
    type Err = Error;

    /// Accepts `upper1`, `Upper1`, `upper-1` and `Upper #1` style names
    fn from_str(s: &str) -> Result<Self> {
        match normalized(s).as_str() {
            "upper1" => Ok(WorkoutType::Upper1),
            "lower1" => Ok(WorkoutType::Lower1),
            "upper2" => Ok(WorkoutType::Upper2),
            "lower2" => Ok(WorkoutType::Lower2),
            _ => Err(Error::Validation(format!("Unknown workout type: {}", s))),
        }
    }
}

/// Body region shared by a pair of workout types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyRegion {
    Upper,
    Lower,
}

/// Stretch body position, in recommendation order
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Position {
    #[serde(rename = "Standing")]
    Standing,
    #[serde(rename = "Kneeling")]
    Kneeling,
    #[serde(rename = "Lying Back")]
    LyingBack,
    #[serde(rename = "Lying Front")]
    LyingFront,
    #[serde(rename = "Seated")]
    Seated,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::Standing,
        Position::Kneeling,
        Position::LyingBack,
        Position::LyingFront,
        Position::Seated,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Position::Standing => "Standing",
            Position::Kneeling => "Kneeling",
            Position::LyingBack => "Lying Back",
            Position::LyingFront => "Lying Front",
            Position::Seated => "Seated",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Accepts `lying-back`, `Lying Back` or `lyingback`
    fn from_str(s: &str) -> Result<Self> {
        let name = normalized(s);
        Self::ALL
            .into_iter()
            .find(|p| normalized(p.label()) == name)
            .ok_or_else(|| Error::Validation(format!("Unknown position: {}", s)))
    }
}

/// Target rep range, fixed by set position within a drop set
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RepRange {
    #[serde(rename = "5-7")]
    Strength,
    #[serde(rename = "10-13")]
    Growth,
    #[serde(rename = "15-20")]
    Pump,
    #[serde(rename = "20-25")]
    Finisher,
}

impl RepRange {
    /// Positional sequence: set 1 is Strength, set 4 is Finisher
    pub const SEQUENCE: [RepRange; 4] = [
        RepRange::Strength,
        RepRange::Growth,
        RepRange::Pump,
        RepRange::Finisher,
    ];

    pub fn set_number(&self) -> u8 {
        match self {
            RepRange::Strength => 1,
            RepRange::Growth => 2,
            RepRange::Pump => 3,
            RepRange::Finisher => 4,
        }
    }

    pub fn range(&self) -> &'static str {
        match self {
            RepRange::Strength => "5-7",
            RepRange::Growth => "10-13",
            RepRange::Pump => "15-20",
            RepRange::Finisher => "20-25",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RepRange::Strength => "Strength",
            RepRange::Growth => "Growth",
            RepRange::Pump => "Pump",
            RepRange::Finisher => "Finisher",
        }
    }
}

/// Post-workout effort rating (1 = too easy, 2 = tough, 3 = too hard)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum EffortRating {
    TooEasy = 1,
    Tough = 2,
    TooHard = 3,
}

impl EffortRating {
    pub fn label(&self) -> &'static str {
        match self {
            EffortRating::TooEasy => "Too Easy",
            EffortRating::Tough => "Tough",
            EffortRating::TooHard => "Too Hard",
        }
    }
}

impl TryFrom<u8> for EffortRating {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(EffortRating::TooEasy),
            2 => Ok(EffortRating::Tough),
            3 => Ok(EffortRating::TooHard),
            other => Err(Error::Validation(format!(
                "Effort rating must be 1, 2 or 3 (got {})",
                other
            ))),
        }
    }
}

impl From<EffortRating> for u8 {
    fn from(rating: EffortRating) -> u8 {
        rating as u8
    }
}

// ============================================================================
// Catalog Records
// ============================================================================

/// A single exercise variant within an exercise class
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub exercise_class: String,
    pub difficulty: Difficulty,
    pub target_reps: Option<u32>,
    pub target_weight: Option<f64>,
    pub requires_weight: bool,
    pub active: bool,
}

/// A cooldown stretch
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Stretch {
    pub id: StretchId,
    pub name: String,
    pub position: Position,
    pub muscle_tags: Vec<String>,
    pub active: bool,
}

// ============================================================================
// Progress, Session and Settings Records
// ============================================================================

/// Last exercise class used in each workout-type slot (empty = never)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LastUsedClasses {
    #[serde(rename = "Upper1")]
    pub upper1: String,
    #[serde(rename = "Lower1")]
    pub lower1: String,
    #[serde(rename = "Upper2")]
    pub upper2: String,
    #[serde(rename = "Lower2")]
    pub lower2: String,
}

impl LastUsedClasses {
    pub fn get(&self, workout_type: WorkoutType) -> &str {
        match workout_type {
            WorkoutType::Upper1 => &self.upper1,
            WorkoutType::Lower1 => &self.lower1,
            WorkoutType::Upper2 => &self.upper2,
            WorkoutType::Lower2 => &self.lower2,
        }
    }

    pub fn set(&mut self, workout_type: WorkoutType, exercise_class: impl Into<String>) {
        let slot = match workout_type {
            WorkoutType::Upper1 => &mut self.upper1,
            WorkoutType::Lower1 => &mut self.lower1,
            WorkoutType::Upper2 => &mut self.upper2,
            WorkoutType::Lower2 => &mut self.lower2,
        };
        *slot = exercise_class.into();
    }
}

/// Progression record for one (muscle group, exercise class) pair
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MuscleGroupProgress {
    pub id: ProgressId,
    pub muscle_group: MuscleGroup,
    pub exercise_class: String,
    pub current_difficulty: Difficulty,
    pub last_workout_date: Option<DateTime<Utc>>,
    pub last_exercise_class_used: LastUsedClasses,
}

/// One set of a drop set
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetLog {
    pub set_number: u8,
    pub target_rep_range: RepRange,
    pub exercise_id: ExerciseId,
    pub exercise_name: String,
    pub actual_reps: Option<u32>,
    pub weight: Option<f64>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// A generated (and possibly completed) workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSession {
    pub id: SessionId,
    pub date: DateTime<Utc>,
    pub workout_type: WorkoutType,
    pub muscle_groups: Vec<MuscleGroup>,
    pub sets: Vec<SetLog>,
    pub completed: bool,
    pub effort_rating: Option<EffortRating>,
    pub stretches_completed: Vec<StretchId>,
}

/// Singleton application settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppSettings {
    pub current_workout_type: WorkoutType,
    pub rest_timer_seconds: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            current_workout_type: WorkoutType::Upper1,
            rest_timer_seconds: 90,
        }
    }
}

// ============================================================================
// Patches
// ============================================================================

/// Partial update of an exercise's metadata
#[derive(Clone, Debug, Default)]
pub struct ExercisePatch {
    pub name: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub target_reps: Option<u32>,
    pub target_weight: Option<f64>,
    pub requires_weight: Option<bool>,
    pub active: Option<bool>,
}

impl ExercisePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.difficulty.is_none()
            && self.target_reps.is_none()
            && self.target_weight.is_none()
            && self.requires_weight.is_none()
            && self.active.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(Error::Validation("Exercise name cannot be empty".into()));
            }
        }
        if let Some(weight) = self.target_weight {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::Validation(format!("Invalid target weight: {}", weight)));
            }
        }
        Ok(())
    }

    pub fn apply(self, exercise: &mut Exercise) {
        if let Some(name) = self.name {
            exercise.name = name.trim().to_string();
        }
        if let Some(difficulty) = self.difficulty {
            exercise.difficulty = difficulty;
        }
        if let Some(reps) = self.target_reps {
            exercise.target_reps = Some(reps);
        }
        if let Some(weight) = self.target_weight {
            exercise.target_weight = Some(weight);
        }
        if let Some(requires) = self.requires_weight {
            exercise.requires_weight = requires;
        }
        if let Some(active) = self.active {
            exercise.active = active;
        }
    }
}

/// Partial update of a stretch
#[derive(Clone, Debug, Default)]
pub struct StretchPatch {
    pub name: Option<String>,
    pub position: Option<Position>,
    pub muscle_tags: Option<Vec<String>>,
    pub active: Option<bool>,
}

impl StretchPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.position.is_none()
            && self.muscle_tags.is_none()
            && self.active.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(Error::Validation("Stretch name cannot be empty".into()));
            }
        }
        if let Some(tags) = &self.muscle_tags {
            if tags.iter().all(|t| t.trim().is_empty()) {
                return Err(Error::Validation(
                    "A stretch needs at least one muscle tag".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn apply(self, stretch: &mut Stretch) {
        if let Some(name) = self.name {
            stretch.name = name.trim().to_string();
        }
        if let Some(position) = self.position {
            stretch.position = position;
        }
        if let Some(tags) = self.muscle_tags {
            stretch.muscle_tags = tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
        }
        if let Some(active) = self.active {
            stretch.active = active;
        }
    }
}

/// Partial update of a progress row
#[derive(Clone, Debug, Default)]
pub struct ProgressPatch {
    pub current_difficulty: Option<Difficulty>,
    pub last_workout_date: Option<DateTime<Utc>>,
    pub last_used: Option<(WorkoutType, String)>,
}

impl ProgressPatch {
    /// Stamp `exercise_class` as last used for `workout_type`
    pub fn stamp(workout_type: WorkoutType, exercise_class: impl Into<String>) -> Self {
        Self {
            last_used: Some((workout_type, exercise_class.into())),
            ..Self::default()
        }
    }

    pub fn apply(self, progress: &mut MuscleGroupProgress) {
        if let Some(difficulty) = self.current_difficulty {
            progress.current_difficulty = difficulty;
        }
        if let Some(date) = self.last_workout_date {
            progress.last_workout_date = Some(date);
        }
        if let Some((workout_type, exercise_class)) = self.last_used {
            progress
                .last_exercise_class_used
                .set(workout_type, exercise_class);
        }
    }
}

/// Partial update of the settings singleton
#[derive(Clone, Debug, Default)]
pub struct SettingsPatch {
    pub current_workout_type: Option<WorkoutType>,
    pub rest_timer_seconds: Option<u32>,
}

impl SettingsPatch {
    pub fn apply(self, settings: &mut AppSettings) {
        if let Some(workout_type) = self.current_workout_type {
            settings.current_workout_type = workout_type;
        }
        if let Some(seconds) = self.rest_timer_seconds {
            settings.rest_timer_seconds = seconds;
        }
    }
}

/// Partial update of a session
#[derive(Clone, Debug, Default)]
pub struct SessionPatch {
    pub sets: Option<Vec<SetLog>>,
    pub completed: Option<bool>,
    pub effort_rating: Option<EffortRating>,
    pub stretches_completed: Option<Vec<StretchId>>,
}

impl SessionPatch {
    pub fn apply(self, session: &mut WorkoutSession) {
        if let Some(sets) = self.sets {
            session.sets = sets;
        }
        if let Some(completed) = self.completed {
            session.completed = completed;
        }
        if let Some(rating) = self.effort_rating {
            session.effort_rating = Some(rating);
        }
        if let Some(stretches) = self.stretches_completed {
            session.stretches_completed = stretches;
        }
    }
}
