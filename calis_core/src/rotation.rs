//! Weekly rotation: workout order, pairing and muscle-group tables.
//!
//! The rotation is `Upper1 → Lower1 → Upper2 → Lower2 → Upper1`. Each body
//! region has two weekly slots that are "paired" so exercise classes can
//! alternate between them.

use crate::{BodyRegion, MuscleGroup, WorkoutType};

const UPPER_MUSCLE_CHAINS: [MuscleGroup; 3] = [
    MuscleGroup::TricepsPectorals,
    MuscleGroup::AbdominalsObliques,
    MuscleGroup::BicepsScapula,
];

const LOWER_MUSCLE_CHAINS: [MuscleGroup; 3] = [
    MuscleGroup::Quads,
    MuscleGroup::HamstringsCalves,
    MuscleGroup::GlutesLumbar,
];

impl BodyRegion {
    /// Fixed muscle groups trained in this region, in workout order
    pub fn muscle_groups(&self) -> &'static [MuscleGroup; 3] {
        match self {
            BodyRegion::Upper => &UPPER_MUSCLE_CHAINS,
            BodyRegion::Lower => &LOWER_MUSCLE_CHAINS,
        }
    }
}

impl WorkoutType {
    pub fn region(&self) -> BodyRegion {
        match self {
            WorkoutType::Upper1 | WorkoutType::Upper2 => BodyRegion::Upper,
            WorkoutType::Lower1 | WorkoutType::Lower2 => BodyRegion::Lower,
        }
    }

    pub fn muscle_chains(&self) -> &'static [MuscleGroup; 3] {
        self.region().muscle_groups()
    }

    /// Next workout in the weekly rotation
    pub fn next(&self) -> WorkoutType {
        match self {
            WorkoutType::Upper1 => WorkoutType::Lower1,
            WorkoutType::Lower1 => WorkoutType::Upper2,
            WorkoutType::Upper2 => WorkoutType::Lower2,
            WorkoutType::Lower2 => WorkoutType::Upper1,
        }
    }

    /// The other weekly slot of the same body region
    pub fn paired(&self) -> WorkoutType {
        match self {
            WorkoutType::Upper1 => WorkoutType::Upper2,
            WorkoutType::Upper2 => WorkoutType::Upper1,
            WorkoutType::Lower1 => WorkoutType::Lower2,
            WorkoutType::Lower2 => WorkoutType::Lower1,
        }
    }
}

pub fn muscle_chains(workout_type: WorkoutType) -> Vec<MuscleGroup> {
    workout_type.muscle_chains().to_vec()
}

pub fn next_workout_type(current: WorkoutType) -> WorkoutType {
    current.next()
}

pub fn paired_workout_type(workout_type: WorkoutType) -> WorkoutType {
    workout_type.paired()
}
