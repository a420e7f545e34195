//! Default catalog of exercises and stretches.
//!
//! Each muscle group carries two exercise classes, and each class is a ladder
//! of six variants, one per difficulty tier.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Exercise and stretch definitions used to seed a database
#[derive(Clone, Debug)]
pub struct Catalog {
    pub exercises: Vec<Exercise>,
    pub stretches: Vec<Stretch>,
}

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// (muscle group, exercise class, variants from Novice to Master)
type Ladder = (MuscleGroup, &'static str, [&'static str; 6]);

const EXERCISE_LADDERS: &[Ladder] = &[
    (
        MuscleGroup::TricepsPectorals,
        "Push-up",
        [
            "Wall Push-up",
            "Incline Push-up",
            "Push-up",
            "Diamond Push-up",
            "Archer Push-up",
            "One-Arm Push-up",
        ],
    ),
    (
        MuscleGroup::TricepsPectorals,
        "Dip",
        [
            "Bent-Knee Bench Dip",
            "Straight-Leg Bench Dip",
            "Negative Bar Dip",
            "Parallel Bar Dip",
            "Ring Dip",
            "Weighted Ring Dip",
        ],
    ),
    (
        MuscleGroup::AbdominalsObliques,
        "Leg Raise",
        [
            "Lying Knee Tuck",
            "Lying Leg Raise",
            "Hanging Knee Raise",
            "Hanging Leg Raise",
            "Toes-to-Bar",
            "Dragon Flag",
        ],
    ),
    (
        MuscleGroup::AbdominalsObliques,
        "Plank",
        [
            "Knee Plank",
            "Plank",
            "Side Plank",
            "Long-Lever Plank",
            "Ab Wheel Rollout",
            "Standing Ab Wheel Rollout",
        ],
    ),
    (
        MuscleGroup::BicepsScapula,
        "Row",
        [
            "Wall Row",
            "Table Row",
            "Incline Ring Row",
            "Horizontal Row",
            "Archer Row",
            "One-Arm Row",
        ],
    ),
    (
        MuscleGroup::BicepsScapula,
        "Pull-up",
        [
            "Scapular Pull",
            "Band-Assisted Chin-up",
            "Chin-up",
            "Pull-up",
            "Archer Pull-up",
            "Weighted Pull-up",
        ],
    ),
    (
        MuscleGroup::Quads,
        "Squat",
        [
            "Box Squat",
            "Air Squat",
            "Split Squat",
            "Bulgarian Split Squat",
            "Shrimp Squat",
            "Pistol Squat",
        ],
    ),
    (
        MuscleGroup::Quads,
        "Lunge",
        [
            "Static Lunge",
            "Reverse Lunge",
            "Walking Lunge",
            "Deficit Reverse Lunge",
            "Jumping Lunge",
            "Weighted Walking Lunge",
        ],
    ),
    (
        MuscleGroup::HamstringsCalves,
        "Leg Curl",
        [
            "Glute-Ham Walkout",
            "Sliding Leg Curl",
            "Single-Leg Sliding Curl",
            "Nordic Negative",
            "Band-Assisted Nordic Curl",
            "Nordic Curl",
        ],
    ),
    (
        MuscleGroup::HamstringsCalves,
        "Calf Raise",
        [
            "Double Calf Raise",
            "Step Calf Raise",
            "Single-Leg Calf Raise",
            "Single-Leg Step Calf Raise",
            "Jumping Calf Raise",
            "Weighted Single-Leg Calf Raise",
        ],
    ),
    (
        MuscleGroup::GlutesLumbar,
        "Bridge",
        [
            "Glute Bridge",
            "Single-Leg Glute Bridge",
            "Hip Thrust",
            "Single-Leg Hip Thrust",
            "Elevated Single-Leg Hip Thrust",
            "Weighted Hip Thrust",
        ],
    ),
    (
        MuscleGroup::GlutesLumbar,
        "Back Extension",
        [
            "Bird Dog",
            "Superman",
            "Prone Y-Raise",
            "Floor Back Extension",
            "Reverse Hyperextension",
            "Weighted Back Extension",
        ],
    ),
];

const STRETCHES: &[(&str, Position, &[&str])] = &[
    ("Standing Quad Stretch", Position::Standing, &["Quadriceps", "Hip Flexors"]),
    ("Doorway Chest Stretch", Position::Standing, &["Chest", "Shoulders", "Biceps"]),
    ("Overhead Triceps Stretch", Position::Standing, &["Triceps", "Shoulders", "Lats"]),
    ("Wall Calf Stretch", Position::Standing, &["Calves", "Ankles"]),
    ("Kneeling Hip Flexor Stretch", Position::Kneeling, &["Hip Flexors", "Quadriceps", "Hips"]),
    ("Child's Pose", Position::Kneeling, &["Back", "Lats", "Shoulders", "Hips"]),
    ("Kneeling Hamstring Stretch", Position::Kneeling, &["Hamstrings", "Calves"]),
    ("Thread the Needle", Position::Kneeling, &["Shoulders", "Spine"]),
    ("Supine Spinal Twist", Position::LyingBack, &["Back", "Spine", "Glutes"]),
    ("Figure-Four Stretch", Position::LyingBack, &["Glutes", "Hips"]),
    ("Lying Hamstring Stretch", Position::LyingBack, &["Hamstrings", "Calves"]),
    ("Cobra Stretch", Position::LyingFront, &["Spine", "Hip Flexors", "Abdominals"]),
    ("Prone Quad Stretch", Position::LyingFront, &["Quadriceps", "Hip Flexors"]),
    ("Seated Forward Fold", Position::Seated, &["Hamstrings", "Back", "Calves"]),
    ("Butterfly Stretch", Position::Seated, &["Hips", "Adductors"]),
    ("Seated Neck Release", Position::Seated, &["Neck"]),
];

/// Builds the default catalog with built-in exercises and stretches
///
/// **Note**: prefer `get_default_catalog()`, which returns a cached reference.
pub fn build_default_catalog() -> Catalog {
    let mut exercises = Vec::with_capacity(EXERCISE_LADDERS.len() * Difficulty::ORDER.len());
    let mut next_id: ExerciseId = 1;

    for (muscle_group, exercise_class, names) in EXERCISE_LADDERS {
        for (difficulty, name) in Difficulty::ORDER.iter().zip(names.iter()) {
            exercises.push(Exercise {
                id: next_id,
                name: (*name).to_string(),
                muscle_group: *muscle_group,
                exercise_class: (*exercise_class).to_string(),
                difficulty: *difficulty,
                target_reps: None,
                target_weight: None,
                requires_weight: name.starts_with("Weighted"),
                active: true,
            });
            next_id += 1;
        }
    }

    let stretches = STRETCHES
        .iter()
        .zip(1..)
        .map(|((name, position, tags), id)| Stretch {
            id,
            name: (*name).to_string(),
            position: *position,
            muscle_tags: tags.iter().map(|t| (*t).to_string()).collect(),
            active: true,
        })
        .collect();

    Catalog {
        exercises,
        stretches,
    }
}

impl Catalog {
    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let mut exercise_ids = HashSet::new();
        for exercise in &self.exercises {
            if !exercise_ids.insert(exercise.id) {
                errors.push(format!("Duplicate exercise id {}", exercise.id));
            }
            if exercise.name.trim().is_empty() {
                errors.push(format!("Exercise {} has empty name", exercise.id));
            }
            if exercise.exercise_class.trim().is_empty() {
                errors.push(format!(
                    "Exercise '{}' has empty exercise class",
                    exercise.name
                ));
            }
        }

        let mut stretch_ids = HashSet::new();
        for stretch in &self.stretches {
            if !stretch_ids.insert(stretch.id) {
                errors.push(format!("Duplicate stretch id {}", stretch.id));
            }
            if stretch.name.trim().is_empty() {
                errors.push(format!("Stretch {} has empty name", stretch.id));
            }
            if stretch.muscle_tags.is_empty() {
                errors.push(format!("Stretch '{}' has no muscle tags", stretch.name));
            }
        }

        // Every muscle group needs something to generate from
        for muscle_group in MuscleGroup::ALL {
            let has_active = self
                .exercises
                .iter()
                .any(|e| e.muscle_group == muscle_group && e.active);
            if !has_active {
                errors.push(format!("Catalog has no active exercises for {}", muscle_group));
            }
        }

        errors
    }
}
