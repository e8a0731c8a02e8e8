//! In-process relational store backing the user, box and Pokémon ports.
//!
//! One mutex guards all three tables so multi-row writes (a user plus their
//! default box) are observed atomically, mirroring a database transaction.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::ports::{
    BoxRepository, BoxRepositoryError, PokemonRepository, PokemonRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    BoxId, BoxName, Email, IdValidationError, NewPokemon, NewUser, PcBox, Pokemon, PokemonId,
    StoredUser, User, UserId,
};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Default)]
struct State {
    last_user_id: i64,
    last_box_id: i64,
    last_pokemon_id: i64,
    users: BTreeMap<UserId, StoredUser>,
    boxes: BTreeMap<BoxId, PcBox>,
    pokemon: BTreeMap<PokemonId, Pokemon>,
}

fn next_id<T>(
    counter: &mut i64,
    build: impl FnOnce(i64) -> Result<T, IdValidationError>,
) -> Result<T, String> {
    let candidate = *counter + 1;
    let id = build(candidate).map_err(|err| err.to_string())?;
    *counter = candidate;
    Ok(id)
}

impl State {
    fn owns_box(&self, owner: &UserId, box_id: BoxId) -> bool {
        self.boxes
            .get(&box_id)
            .is_some_and(|found| found.user_id == *owner)
    }

    fn insert_box(&mut self, owner: UserId, name: &BoxName) -> Result<PcBox, String> {
        let id = next_id(&mut self.last_box_id, BoxId::new)?;
        let created = PcBox {
            id,
            user_id: owner,
            name: name.clone(),
        };
        self.boxes.insert(id, created.clone());
        Ok(created)
    }

    fn owned_pokemon(
        &self,
        owner: &UserId,
        box_id: BoxId,
        pokemon_id: PokemonId,
    ) -> Option<&Pokemon> {
        self.pokemon
            .get(&pokemon_id)
            .filter(|found| found.user_id == *owner && found.box_id == box_id)
    }
}

/// Shared in-memory tables. Clones share the same state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T, E>(
        &self,
        on_error: impl Fn(String) -> E,
        operation: impl FnOnce(&mut State) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut guard = self.state.lock().map_err(|_| on_error(POISONED.to_owned()))?;
        operation(&mut guard)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_with_default_box(
        &self,
        user: &NewUser,
        box_name: &BoxName,
    ) -> Result<User, UserPersistenceError> {
        self.with_state(UserPersistenceError::query, |state| {
            if state
                .users
                .values()
                .any(|existing| existing.user.email() == &user.email)
            {
                return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
            }

            // Allocate both ids before writing so a failure leaves no partial rows.
            let user_id = next_id(&mut state.last_user_id, UserId::new)
                .map_err(UserPersistenceError::query)?;
            let created = User::new(user_id, user.email.clone());
            state
                .insert_box(user_id, box_name)
                .map_err(UserPersistenceError::query)?;
            state.users.insert(
                user_id,
                StoredUser {
                    user: created.clone(),
                    password_hash: user.password_hash.clone(),
                },
            );
            Ok(created)
        })
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        self.with_state(UserPersistenceError::query, |state| {
            Ok(state
                .users
                .values()
                .find(|stored| stored.user.email() == email)
                .cloned())
        })
    }
}

#[async_trait]
impl BoxRepository for InMemoryStore {
    async fn create(&self, owner: &UserId, name: &BoxName) -> Result<PcBox, BoxRepositoryError> {
        self.with_state(BoxRepositoryError::query, |state| {
            state
                .insert_box(*owner, name)
                .map_err(BoxRepositoryError::query)
        })
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        box_id: BoxId,
    ) -> Result<Option<PcBox>, BoxRepositoryError> {
        self.with_state(BoxRepositoryError::query, |state| {
            Ok(state
                .boxes
                .get(&box_id)
                .filter(|found| found.user_id == *owner)
                .cloned())
        })
    }

    async fn list_for_user(&self, owner: &UserId) -> Result<Vec<PcBox>, BoxRepositoryError> {
        self.with_state(BoxRepositoryError::query, |state| {
            Ok(state
                .boxes
                .values()
                .filter(|found| found.user_id == *owner)
                .cloned()
                .collect())
        })
    }
}

#[async_trait]
impl PokemonRepository for InMemoryStore {
    async fn insert(&self, pokemon: &NewPokemon) -> Result<Pokemon, PokemonRepositoryError> {
        self.with_state(PokemonRepositoryError::query, |state| {
            if !state.owns_box(&pokemon.user_id, pokemon.box_id) {
                return Err(PokemonRepositoryError::query(
                    "box does not belong to the pokemon owner",
                ));
            }
            let id = next_id(&mut state.last_pokemon_id, PokemonId::new)
                .map_err(PokemonRepositoryError::query)?;
            let created = Pokemon::from_new(id, pokemon.clone());
            state.pokemon.insert(id, created.clone());
            Ok(created)
        })
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        box_id: BoxId,
        pokemon_id: PokemonId,
    ) -> Result<Option<Pokemon>, PokemonRepositoryError> {
        self.with_state(PokemonRepositoryError::query, |state| {
            Ok(state.owned_pokemon(owner, box_id, pokemon_id).cloned())
        })
    }

    async fn update(&self, pokemon: &Pokemon) -> Result<Option<Pokemon>, PokemonRepositoryError> {
        self.with_state(PokemonRepositoryError::query, |state| {
            if state
                .owned_pokemon(&pokemon.user_id, pokemon.box_id, pokemon.id)
                .is_none()
            {
                return Ok(None);
            }
            state.pokemon.insert(pokemon.id, pokemon.clone());
            Ok(Some(pokemon.clone()))
        })
    }

    async fn delete_owned(
        &self,
        owner: &UserId,
        box_id: BoxId,
        pokemon_id: PokemonId,
    ) -> Result<bool, PokemonRepositoryError> {
        self.with_state(PokemonRepositoryError::query, |state| {
            if state.owned_pokemon(owner, box_id, pokemon_id).is_none() {
                return Ok(false);
            }
            Ok(state.pokemon.remove(&pokemon_id).is_some())
        })
    }

    async fn list_in_box(
        &self,
        owner: &UserId,
        box_id: BoxId,
    ) -> Result<Vec<Pokemon>, PokemonRepositoryError> {
        self.with_state(PokemonRepositoryError::query, |state| {
            Ok(state
                .pokemon
                .values()
                .filter(|found| found.user_id == *owner && found.box_id == box_id)
                .cloned()
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the in-memory tables.
    use super::*;
    use crate::domain::{
        Ability, Level, MoveSet, Nature, PasswordHash, PokemonTraits, SpeciesId,
    };
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: Email::new(email).expect("email"),
            password_hash: PasswordHash::new("$2b$04$hash"),
        }
    }

    fn new_pokemon(user_id: UserId, box_id: BoxId) -> NewPokemon {
        NewPokemon {
            user_id,
            box_id,
            traits: PokemonTraits {
                species_id: SpeciesId::new(1).expect("species"),
                level: Level::new(5).expect("level"),
                nature: Nature::new("Bold").expect("nature"),
                ability: Ability::new("Overgrow").expect("ability"),
                moves: MoveSet::default(),
            },
        }
    }

    async fn register(store: &InMemoryStore, email: &str) -> (UserId, BoxId) {
        let user = store
            .create_with_default_box(&new_user(email), &BoxName::default_box())
            .await
            .expect("user created");
        let boxes = store.list_for_user(&user.id()).await.expect("boxes");
        let first = boxes.first().expect("default box").id;
        (user.id(), first)
    }

    #[rstest]
    #[tokio::test]
    async fn first_user_and_box_start_at_one(store: InMemoryStore) {
        let (user_id, box_id) = register(&store, "user@email.com").await;
        assert_eq!(user_id.get(), 1);
        assert_eq!(box_id.get(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_creates_nothing(store: InMemoryStore) {
        register(&store, "user@email.com").await;
        let err = store
            .create_with_default_box(&new_user("USER@email.com"), &BoxName::default_box())
            .await
            .expect_err("duplicate");
        assert!(matches!(err, UserPersistenceError::DuplicateEmail { .. }));

        let (second_user, second_box) = register(&store, "other@email.com").await;
        assert_eq!(second_user.get(), 2);
        assert_eq!(second_box.get(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn pokemon_are_invisible_to_other_owners(store: InMemoryStore) {
        let (owner, owner_box) = register(&store, "ash@pallet.town").await;
        let (rival, rival_box) = register(&store, "gary@pallet.town").await;
        let created = store
            .insert(&new_pokemon(owner, owner_box))
            .await
            .expect("inserted");

        assert!(
            PokemonRepository::find_owned(&store, &rival, owner_box, created.id)
                .await
                .expect("query")
                .is_none()
        );
        assert!(
            PokemonRepository::find_owned(&store, &owner, rival_box, created.id)
                .await
                .expect("query")
                .is_none()
        );
        assert!(
            !store
                .delete_owned(&rival, owner_box, created.id)
                .await
                .expect("delete")
        );
        assert!(
            store
                .delete_owned(&owner, owner_box, created.id)
                .await
                .expect("delete")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn insert_into_foreign_box_is_rejected(store: InMemoryStore) {
        let (_, owner_box) = register(&store, "ash@pallet.town").await;
        let (rival, _) = register(&store, "gary@pallet.town").await;
        let err = store
            .insert(&new_pokemon(rival, owner_box))
            .await
            .expect_err("foreign box");
        assert!(matches!(err, PokemonRepositoryError::Query { .. }));
    }
}
