//! Drop-set construction.
//!
//! A drop set starts at the user's current tier and steps down one tier per
//! set, so later high-rep sets use easier variants of the same movement.

use crate::{Difficulty, Exercise};

/// Sets per drop set
pub const DROP_SET_LEN: usize = 4;

/// Pick up to four exercises from one class, hardest first.
///
/// Walks down from `current_difficulty` taking the first active exercise at
/// each tier. Gaps are then filled with the easiest unused active exercises.
/// Never repeats an exercise, so sparse classes yield a shorter list.
pub fn build_drop_set(exercises: &[Exercise], current_difficulty: Difficulty) -> Vec<Exercise> {
    let mut picked: Vec<usize> = Vec::with_capacity(DROP_SET_LEN);
    let start = current_difficulty.index();

    for step in 0..DROP_SET_LEN {
        let Some(target) = start.checked_sub(step).and_then(Difficulty::from_index) else {
            break;
        };

        if let Some(idx) = exercises
            .iter()
            .position(|e| e.active && e.difficulty == target)
        {
            if !picked.contains(&idx) {
                picked.push(idx);
            }
        }
    }

    if picked.len() < DROP_SET_LEN {
        // min_by_key keeps the first minimum, so catalog order breaks ties
        let mut remaining: Vec<usize> = (0..exercises.len())
            .filter(|idx| exercises[*idx].active && !picked.contains(idx))
            .collect();

        while picked.len() < DROP_SET_LEN {
            let Some(pos) = remaining
                .iter()
                .enumerate()
                .min_by_key(|(_, idx)| exercises[**idx].difficulty)
                .map(|(pos, _)| pos)
            else {
                break;
            };
            picked.push(remaining.remove(pos));
        }
    }

    tracing::debug!(
        "Drop set from {}: {:?}",
        current_difficulty,
        picked
            .iter()
            .map(|idx| exercises[*idx].name.as_str())
            .collect::<Vec<_>>()
    );

    picked.into_iter().map(|idx| exercises[idx].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MuscleGroup;

    fn exercise(id: u32, difficulty: Difficulty, active: bool) -> Exercise {
        Exercise {
            id,
            name: format!("Variant {}", id),
            muscle_group: MuscleGroup::Quads,
            exercise_class: "Squat".into(),
            difficulty,
            target_reps: None,
            target_weight: None,
            requires_weight: false,
            active,
        }
    }

    fn ladder() -> Vec<Exercise> {
        Difficulty::ORDER
            .iter()
            .enumerate()
            .map(|(i, d)| exercise(i as u32 + 1, *d, true))
            .collect()
    }

    fn ids(exercises: &[Exercise]) -> Vec<u32> {
        exercises.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_full_ladder_descends_from_current() {
        let set = build_drop_set(&ladder(), Difficulty::Expert);
        assert_eq!(ids(&set), vec![5, 4, 3, 2]);

        let difficulties: Vec<_> = set.iter().map(|e| e.difficulty).collect();
        assert!(difficulties.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_low_start_fills_from_easiest_remaining() {
        // Beginner, Novice, then the easiest unused: Intermediate, Advanced
        let set = build_drop_set(&ladder(), Difficulty::Beginner);
        assert_eq!(ids(&set), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_skips_inactive_and_missing_tiers() {
        let mut exercises = ladder();
        exercises[2].active = false; // Intermediate

        let set = build_drop_set(&exercises, Difficulty::Advanced);
        // Advanced, (no Intermediate), Beginner, Novice, then easiest left: Expert
        assert_eq!(ids(&set), vec![4, 2, 1, 5]);
        assert!(set.iter().all(|e| e.active));
    }

    #[test]
    fn test_single_exercise_yields_single_set() {
        let exercises = vec![exercise(9, Difficulty::Master, true)];
        let set = build_drop_set(&exercises, Difficulty::Intermediate);
        assert_eq!(ids(&set), vec![9]);
    }

    #[test]
    fn test_no_duplicates_with_shared_tier() {
        let exercises = vec![
            exercise(1, Difficulty::Intermediate, true),
            exercise(2, Difficulty::Intermediate, true),
            exercise(3, Difficulty::Novice, true),
        ];

        let set = build_drop_set(&exercises, Difficulty::Intermediate);
        assert_eq!(ids(&set), vec![1, 3, 2]);
    }

    #[test]
    fn test_empty_and_all_inactive() {
        assert!(build_drop_set(&[], Difficulty::Master).is_empty());

        let exercises = vec![exercise(1, Difficulty::Novice, false)];
        assert!(build_drop_set(&exercises, Difficulty::Novice).is_empty());
    }

    #[test]
    fn test_never_more_than_four() {
        let mut exercises = ladder();
        exercises.extend(ladder().into_iter().map(|mut e| {
            e.id += 10;
            e
        }));

        let set = build_drop_set(&exercises, Difficulty::Master);
        assert_eq!(set.len(), DROP_SET_LEN);
        assert_eq!(ids(&set), vec![6, 5, 4, 3]);
    }
}
