//! Regression coverage for Pokémon value objects and partial updates.

use super::*;
use rstest::{fixture, rstest};

fn move_ids(raw: &[i64]) -> Vec<MoveId> {
    raw.iter()
        .map(|value| MoveId::new(*value).expect("valid move id"))
        .collect()
}

#[fixture]
fn stored() -> Pokemon {
    Pokemon {
        id: PokemonId::new(1).expect("id"),
        user_id: UserId::new(1).expect("user"),
        box_id: BoxId::new(1).expect("box"),
        traits: PokemonTraits {
            species_id: SpeciesId::new(25).expect("species"),
            level: Level::new(2).expect("level"),
            nature: Nature::new("nature").expect("nature"),
            ability: Ability::new("ability").expect("ability"),
            moves: MoveSet::new(move_ids(&[1, 2, 3, 4])).expect("moves"),
        },
    }
}

#[rstest]
#[case(0)]
#[case(101)]
#[case(-1)]
fn level_rejects_out_of_range(#[case] raw: i64) {
    assert_eq!(
        Level::new(raw).expect_err("out of range"),
        PokemonValidationError::LevelOutOfRange {
            min: LEVEL_MIN,
            max: LEVEL_MAX,
            value: raw,
        }
    );
}

#[rstest]
#[case(1)]
#[case(50)]
#[case(100)]
fn level_accepts_bounds(#[case] raw: i64) {
    assert_eq!(i64::from(Level::new(raw).expect("in range").get()), raw);
}

#[rstest]
fn labels_are_trimmed_and_bounded() {
    assert_eq!(Nature::new("  Adamant ").expect("valid").as_ref(), "Adamant");
    assert_eq!(
        Ability::new(" ").expect_err("blank"),
        PokemonValidationError::EmptyLabel { field: "ability" }
    );
    assert_eq!(
        Nature::new("n".repeat(LABEL_MAX + 1)).expect_err("long"),
        PokemonValidationError::LabelTooLong {
            field: "nature",
            max: LABEL_MAX,
        }
    );
}

#[rstest]
fn move_set_rejects_fifth_slot() {
    assert_eq!(
        MoveSet::new(move_ids(&[1, 2, 3, 4, 5])).expect_err("too many"),
        PokemonValidationError::TooManyMoves {
            max: MOVE_SLOTS,
            count: 5,
        }
    );
}

#[rstest]
fn move_set_rejects_duplicates() {
    let err = MoveSet::new(move_ids(&[7, 8, 7])).expect_err("duplicate");
    assert_eq!(
        err,
        PokemonValidationError::DuplicateMove {
            id: MoveId::new(7).expect("id"),
        }
    );
}

#[rstest]
fn first_slots_keeps_order_and_skips_repeats() {
    let moves = MoveSet::first_slots(move_ids(&[3, 3, 1, 9, 4, 5]));
    assert_eq!(moves.ids(), move_ids(&[3, 1, 9, 4]).as_slice());
}

#[rstest]
fn patch_with_level_only_keeps_other_fields(stored: Pokemon) {
    let patch = PokemonPatch {
        level: Some(Level::new(3).expect("level")),
        ..PokemonPatch::default()
    };
    let updated = patch.apply(stored.clone());

    assert_eq!(updated.traits.level.get(), 3);
    assert_eq!(updated.traits.nature, stored.traits.nature);
    assert_eq!(updated.traits.ability, stored.traits.ability);
    assert_eq!(updated.traits.moves, stored.traits.moves);
    assert_eq!(updated.id, stored.id);
}

#[rstest]
fn empty_patch_is_a_no_op(stored: Pokemon) {
    let patch = PokemonPatch::default();
    assert!(patch.is_empty());
    assert_eq!(patch.apply(stored.clone()), stored);
}
