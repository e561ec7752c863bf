//! Reducer logic for todo lists.
//!
//! Commands are validated against the current state. An accepted command is
//! turned into an event, the event is applied, and the event is returned to
//! the caller. A rejected command returns a [`ListError`] and leaves the state
//! untouched.

use crate::error::{ListError, NameField};
use crate::types::{ListAction, ListId, ListsState, Todo, TodoId, TodoList};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::str::FromStr;
use todo_lists_core::reducer::Reducer;

/// Accepted length of a trimmed name, in characters
pub const NAME_LENGTH: RangeInclusive<usize> = 1..=100;

/// How new list and todo ids are chosen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// One more than the largest id currently present (1 when empty)
    ///
    /// Deleting the newest entry frees its id for the next one.
    #[default]
    MaxPlusOne,
    /// One more than the largest id ever issued in the container
    Monotonic,
}

impl IdPolicy {
    /// Next id given the largest id present and the largest ever issued
    #[must_use]
    pub fn next_id(self, current_max: Option<u64>, last_issued: u64) -> u64 {
        let base = match self {
            Self::MaxPlusOne => current_max.unwrap_or(0),
            Self::Monotonic => current_max.unwrap_or(0).max(last_issued),
        };
        base.saturating_add(1)
    }
}

impl FromStr for IdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max_plus_one" => Ok(Self::MaxPlusOne),
            "monotonic" => Ok(Self::Monotonic),
            other => Err(format!("unknown id policy: {other}")),
        }
    }
}

/// Environment for the list reducer
///
/// Holds behavior switches rather than services; the reducer performs no I/O.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListEnvironment {
    /// How ids are assigned
    pub id_policy: IdPolicy,
    /// Whether renaming a list to its current name is accepted
    pub allow_rename_to_self: bool,
}

impl ListEnvironment {
    /// Creates a `ListEnvironment`
    #[must_use]
    pub const fn new(id_policy: IdPolicy, allow_rename_to_self: bool) -> Self {
        Self {
            id_policy,
            allow_rename_to_self,
        }
    }
}

/// Trim `raw` and check its length
///
/// # Errors
///
/// Returns [`ListError::InvalidLength`] when the trimmed name is empty or
/// longer than 100 characters.
pub fn validate_name(raw: &str, field: NameField) -> Result<String, ListError> {
    let trimmed = raw.trim();
    if NAME_LENGTH.contains(&trimmed.chars().count()) {
        Ok(trimmed.to_string())
    } else {
        Err(ListError::InvalidLength(field))
    }
}

/// Reducer for the lists of one session
#[derive(Clone, Copy, Debug, Default)]
pub struct ListReducer;

impl ListReducer {
    /// Creates a new `ListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn existing_list(state: &ListsState, list_id: ListId) -> Result<&TodoList, ListError> {
        state.list(list_id).ok_or(ListError::ListNotFound(list_id))
    }

    /// Turn a command into the event it produces, or reject it
    fn decide(
        state: &ListsState,
        command: ListAction,
        env: &ListEnvironment,
    ) -> Result<ListAction, ListError> {
        match command {
            ListAction::CreateList { name } => {
                let name = validate_name(&name, NameField::List)?;
                if state.name_taken(&name, None) {
                    return Err(ListError::DuplicateName);
                }
                let id = env
                    .id_policy
                    .next_id(state.max_list_id(), state.last_list_id);
                Ok(ListAction::ListCreated {
                    list_id: ListId::new(id),
                    name,
                })
            }

            ListAction::RenameList { list_id, name } => {
                Self::existing_list(state, list_id)?;
                let name = validate_name(&name, NameField::List)?;
                let except = env.allow_rename_to_self.then_some(list_id);
                if state.name_taken(&name, except) {
                    return Err(ListError::DuplicateName);
                }
                Ok(ListAction::ListRenamed { list_id, name })
            }

            ListAction::DeleteList { list_id } => Ok(ListAction::ListDeleted { list_id }),

            ListAction::AddTodo { list_id, name } => {
                let list = Self::existing_list(state, list_id)?;
                let name = validate_name(&name, NameField::Todo)?;
                let id = env.id_policy.next_id(list.max_todo_id(), list.last_todo_id);
                Ok(ListAction::TodoAdded {
                    list_id,
                    todo_id: TodoId::new(id),
                    name,
                })
            }

            ListAction::DeleteTodo { list_id, todo_id } => {
                Self::existing_list(state, list_id)?;
                Ok(ListAction::TodoDeleted { list_id, todo_id })
            }

            ListAction::SetTodoCompleted {
                list_id,
                todo_id,
                completed,
            } => {
                let list = Self::existing_list(state, list_id)?;
                if list.todo(todo_id).is_none() {
                    return Err(ListError::TodoNotFound { list_id, todo_id });
                }
                Ok(ListAction::TodoCompletionChanged {
                    list_id,
                    todo_id,
                    completed,
                })
            }

            ListAction::CompleteAll { list_id } => {
                Self::existing_list(state, list_id)?;
                Ok(ListAction::AllTodosCompleted { list_id })
            }

            event => Ok(event),
        }
    }

    /// Applies an event to state
    fn apply_event(state: &mut ListsState, event: &ListAction) {
        match event {
            ListAction::ListCreated { list_id, name } => {
                state.lists.push(TodoList::new(*list_id, name.clone()));
                state.last_list_id = state.last_list_id.max(list_id.get());
            }
            ListAction::ListRenamed { list_id, name } => {
                if let Some(list) = state.list_mut(*list_id) {
                    list.name.clone_from(name);
                }
            }
            ListAction::ListDeleted { list_id } => {
                state.lists.retain(|l| l.id != *list_id);
            }
            ListAction::TodoAdded {
                list_id,
                todo_id,
                name,
            } => {
                if let Some(list) = state.list_mut(*list_id) {
                    list.todos.push(Todo::new(*todo_id, name.clone()));
                    list.last_todo_id = list.last_todo_id.max(todo_id.get());
                }
            }
            ListAction::TodoDeleted { list_id, todo_id } => {
                if let Some(list) = state.list_mut(*list_id) {
                    list.todos.retain(|t| t.id != *todo_id);
                }
            }
            ListAction::TodoCompletionChanged {
                list_id,
                todo_id,
                completed,
            } => {
                if let Some(todo) = state
                    .list_mut(*list_id)
                    .and_then(|list| list.todo_mut(*todo_id))
                {
                    todo.completed = *completed;
                }
            }
            ListAction::AllTodosCompleted { list_id } => {
                if let Some(list) = state.list_mut(*list_id) {
                    for todo in &mut list.todos {
                        todo.completed = true;
                    }
                }
            }
            // Commands are not applied to state
            ListAction::CreateList { .. }
            | ListAction::RenameList { .. }
            | ListAction::DeleteList { .. }
            | ListAction::AddTodo { .. }
            | ListAction::DeleteTodo { .. }
            | ListAction::SetTodoCompleted { .. }
            | ListAction::CompleteAll { .. } => {}
        }
    }
}

impl Reducer for ListReducer {
    type State = ListsState;
    type Action = ListAction;
    type Environment = ListEnvironment;
    type Error = ListError;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Result<Self::Action, Self::Error> {
        // Events are replayed as they are; commands are decided first
        let event = if action.is_event() {
            action
        } else {
            Self::decide(state, action, env)?
        };
        Self::apply_event(state, &event);
        Ok(event)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use todo_lists_testing::ReducerTest;

    fn groceries() -> ListsState {
        let mut state = ListsState::new();
        ListReducer::new()
            .reduce(
                &mut state,
                ListAction::CreateList {
                    name: "Groceries".to_string(),
                },
                &ListEnvironment::default(),
            )
            .unwrap();
        state
    }

    fn with_todos(names: &[&str]) -> ListsState {
        let mut state = groceries();
        for name in names {
            ListReducer::new()
                .reduce(
                    &mut state,
                    ListAction::AddTodo {
                        list_id: ListId::new(1),
                        name: (*name).to_string(),
                    },
                    &ListEnvironment::default(),
                )
                .unwrap();
        }
        state
    }

    fn monotonic() -> ListEnvironment {
        ListEnvironment::new(IdPolicy::Monotonic, false)
    }

    #[test]
    fn test_create_list_trims_and_assigns_first_id() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(ListsState::new())
            .when_action(ListAction::CreateList {
                name: "  Groceries ".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.count(), 1);
                assert_eq!(state.lists[0].name, "Groceries");
                assert_eq!(state.lists[0].id, ListId::new(1));
                assert!(state.lists[0].todos.is_empty());
            })
            .then_event(|event| {
                assert_eq!(
                    event,
                    &ListAction::ListCreated {
                        list_id: ListId::new(1),
                        name: "Groceries".to_string(),
                    }
                );
            })
            .run();
    }

    #[test]
    fn test_create_list_blank_name() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(ListsState::new())
            .when_action(ListAction::CreateList {
                name: "   ".to_string(),
            })
            .then_error(|error| {
                assert_eq!(error, &ListError::InvalidLength(NameField::List));
            })
            .run();
    }

    #[test]
    fn test_create_list_length_boundaries() {
        let exactly_100 = "a".repeat(100);
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(ListsState::new())
            .when_action(ListAction::CreateList {
                name: exactly_100.clone(),
            })
            .then_state(move |state| assert_eq!(state.lists[0].name, exactly_100))
            .run();

        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(ListsState::new())
            .when_action(ListAction::CreateList {
                name: "a".repeat(101),
            })
            .then_error(|error| {
                assert_eq!(
                    error.to_string(),
                    "The list name must be between 1 and 100 characters."
                );
            })
            .run();
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(validate_name(&"é".repeat(100), NameField::List).is_ok());
    }

    #[test]
    fn test_create_list_duplicate_name() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(groceries())
            .when_action(ListAction::CreateList {
                name: " Groceries".to_string(),
            })
            .then_error(|error| assert_eq!(error, &ListError::DuplicateName))
            .run();
    }

    #[test]
    fn test_names_are_case_sensitive() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(groceries())
            .when_action(ListAction::CreateList {
                name: "groceries".to_string(),
            })
            .then_state(|state| assert_eq!(state.count(), 2))
            .run();
    }

    #[test]
    fn test_rename_list() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(groceries())
            .when_action(ListAction::RenameList {
                list_id: ListId::new(1),
                name: "Food".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.lists[0].name, "Food");
                assert_eq!(state.lists[0].id, ListId::new(1));
            })
            .run();
    }

    #[test]
    fn test_rename_to_own_name_is_rejected_by_default() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(groceries())
            .when_action(ListAction::RenameList {
                list_id: ListId::new(1),
                name: "Groceries".to_string(),
            })
            .then_error(|error| assert_eq!(error, &ListError::DuplicateName))
            .run();
    }

    #[test]
    fn test_rename_to_own_name_when_allowed() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::new(IdPolicy::MaxPlusOne, true))
            .given_state(groceries())
            .when_action(ListAction::RenameList {
                list_id: ListId::new(1),
                name: "Groceries".to_string(),
            })
            .then_event(|event| assert!(matches!(event, ListAction::ListRenamed { .. })))
            .run();
    }

    #[test]
    fn test_rename_missing_list_reports_not_found_first() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(ListsState::new())
            .when_action(ListAction::RenameList {
                list_id: ListId::new(7),
                name: String::new(),
            })
            .then_error(|error| assert_eq!(error, &ListError::ListNotFound(ListId::new(7))))
            .run();
    }

    #[test]
    fn test_delete_list_and_missing_list_is_noop() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(groceries())
            .when_action(ListAction::DeleteList {
                list_id: ListId::new(1),
            })
            .then_state(|state| assert_eq!(state.count(), 0))
            .run();

        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(groceries())
            .when_action(ListAction::DeleteList {
                list_id: ListId::new(42),
            })
            .then_state(|state| assert_eq!(state, &groceries()))
            .then_event(|event| {
                assert_eq!(
                    event,
                    &ListAction::ListDeleted {
                        list_id: ListId::new(42)
                    }
                );
            })
            .run();
    }

    #[test]
    fn test_add_todo() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(with_todos(&["Milk"]))
            .when_action(ListAction::AddTodo {
                list_id: ListId::new(1),
                name: " Eggs ".to_string(),
            })
            .then_state(|state| {
                let todos = &state.lists[0].todos;
                assert_eq!(todos.len(), 2);
                assert_eq!(todos[1].id, TodoId::new(2));
                assert_eq!(todos[1].name, "Eggs");
                assert!(!todos[1].completed);
            })
            .run();
    }

    #[test]
    fn test_add_todo_invalid_name() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(groceries())
            .when_action(ListAction::AddTodo {
                list_id: ListId::new(1),
                name: String::new(),
            })
            .then_error(|error| {
                assert_eq!(
                    error.to_string(),
                    "The todo name must be between 1 and 100 characters."
                );
            })
            .run();
    }

    #[test]
    fn test_add_todo_to_missing_list() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(ListsState::new())
            .when_action(ListAction::AddTodo {
                list_id: ListId::new(1),
                name: "Milk".to_string(),
            })
            .then_error(|error| assert_eq!(error, &ListError::ListNotFound(ListId::new(1))))
            .run();
    }

    #[test]
    fn test_delete_todo() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(with_todos(&["Milk", "Eggs"]))
            .when_action(ListAction::DeleteTodo {
                list_id: ListId::new(1),
                todo_id: TodoId::new(1),
            })
            .then_state(|state| {
                let todos = &state.lists[0].todos;
                assert_eq!(todos.len(), 1);
                assert_eq!(todos[0].name, "Eggs");
            })
            .run();
    }

    #[test]
    fn test_delete_missing_todo_is_noop() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(with_todos(&["Milk"]))
            .when_action(ListAction::DeleteTodo {
                list_id: ListId::new(1),
                todo_id: TodoId::new(9),
            })
            .then_state(|state| assert_eq!(state, &with_todos(&["Milk"])))
            .run();
    }

    #[test]
    fn test_set_todo_completed_roundtrip() {
        let mut state = with_todos(&["Milk"]);
        let env = ListEnvironment::default();
        let reducer = ListReducer::new();

        for completed in [true, false] {
            reducer
                .reduce(
                    &mut state,
                    ListAction::SetTodoCompleted {
                        list_id: ListId::new(1),
                        todo_id: TodoId::new(1),
                        completed,
                    },
                    &env,
                )
                .unwrap();
            assert_eq!(state.lists[0].todos[0].completed, completed);
        }
    }

    #[test]
    fn test_set_missing_todo_completed() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(with_todos(&["Milk"]))
            .when_action(ListAction::SetTodoCompleted {
                list_id: ListId::new(1),
                todo_id: TodoId::new(5),
                completed: true,
            })
            .then_error(|error| {
                assert_eq!(
                    error,
                    &ListError::TodoNotFound {
                        list_id: ListId::new(1),
                        todo_id: TodoId::new(5),
                    }
                );
            })
            .run();
    }

    #[test]
    fn test_complete_all() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(with_todos(&["Milk", "Eggs", "Bread"]))
            .when_action(ListAction::CompleteAll {
                list_id: ListId::new(1),
            })
            .then_state(|state| {
                assert!(state.lists[0].todos.iter().all(|t| t.completed));
            })
            .run();
    }

    #[test]
    fn test_complete_all_on_empty_list_keeps_it_empty() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(groceries())
            .when_action(ListAction::CompleteAll {
                list_id: ListId::new(1),
            })
            .then_state(|state| assert!(state.lists[0].todos.is_empty()))
            .run();
    }

    #[test]
    fn test_max_plus_one_reuses_freed_top_id() {
        let mut state = with_todos(&["Milk", "Eggs"]);
        let env = ListEnvironment::default();
        let reducer = ListReducer::new();
        let list_id = ListId::new(1);

        let delete = ListAction::DeleteTodo {
            list_id,
            todo_id: TodoId::new(2),
        };
        reducer.reduce(&mut state, delete, &env).unwrap();
        let add = ListAction::AddTodo {
            list_id,
            name: "Bread".to_string(),
        };
        let event = reducer.reduce(&mut state, add, &env).unwrap();

        assert_eq!(
            event,
            ListAction::TodoAdded {
                list_id,
                todo_id: TodoId::new(2),
                name: "Bread".to_string(),
            }
        );
    }

    #[test]
    fn test_monotonic_never_reuses_ids() {
        let mut state = ListsState::new();
        let env = monotonic();
        let reducer = ListReducer::new();

        let create = |name: &str| ListAction::CreateList {
            name: name.to_string(),
        };

        for name in ["A", "B"] {
            reducer.reduce(&mut state, create(name), &env).unwrap();
        }
        let delete = ListAction::DeleteList {
            list_id: ListId::new(2),
        };
        reducer.reduce(&mut state, delete, &env).unwrap();
        reducer.reduce(&mut state, create("C"), &env).unwrap();

        let ids: Vec<_> = state.lists.iter().map(|l| l.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_id_policy_parsing() {
        assert_eq!("monotonic".parse::<IdPolicy>(), Ok(IdPolicy::Monotonic));
        assert_eq!(" MAX_PLUS_ONE ".parse::<IdPolicy>(), Ok(IdPolicy::MaxPlusOne));
        assert!("random".parse::<IdPolicy>().is_err());
    }

    #[test]
    fn test_events_are_applied_directly() {
        ReducerTest::new(ListReducer::new())
            .with_env(ListEnvironment::default())
            .given_state(ListsState::new())
            .when_action(ListAction::ListCreated {
                list_id: ListId::new(5),
                name: "Replayed".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.lists[0].id, ListId::new(5));
                assert_eq!(state.last_list_id, 5);
            })
            .run();
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use todo_lists_testing::properties::{blank_name, overlong_name, padded_valid_name};

        #[derive(Debug, Clone)]
        enum Op {
            Create(u8),
            Delete(u8),
            AddTodo(u8),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0u8..6).prop_map(Op::Create),
                (0u8..8).prop_map(Op::Delete),
                (0u8..8).prop_map(Op::AddTodo),
            ]
        }

        fn policy() -> impl Strategy<Value = IdPolicy> {
            prop_oneof![Just(IdPolicy::MaxPlusOne), Just(IdPolicy::Monotonic)]
        }

        proptest! {
            #[test]
            fn padded_names_are_stored_trimmed((padded, trimmed) in padded_valid_name()) {
                let mut state = ListsState::new();
                let reducer = ListReducer::new();
                let env = ListEnvironment::default();

                let create = ListAction::CreateList { name: padded.clone() };
                reducer.reduce(&mut state, create, &env).unwrap();
                let add = ListAction::AddTodo { list_id: ListId::new(1), name: padded };
                reducer.reduce(&mut state, add, &env).unwrap();

                prop_assert_eq!(&state.lists[0].name, &trimmed);
                prop_assert_eq!(&state.lists[0].todos[0].name, &trimmed);
            }

            #[test]
            fn invalid_names_never_change_state(name in prop_oneof![blank_name(), overlong_name()]) {
                let mut state = groceries();
                let before = state.clone();
                let reducer = ListReducer::new();
                let env = ListEnvironment::default();

                let list_id = ListId::new(1);
                let create = ListAction::CreateList { name: name.clone() };
                let rename = ListAction::RenameList { list_id, name: name.clone() };
                let add = ListAction::AddTodo { list_id, name };

                let create = reducer.reduce(&mut state, create, &env);
                let rename = reducer.reduce(&mut state, rename, &env);
                let add = reducer.reduce(&mut state, add, &env);

                prop_assert_eq!(create, Err(ListError::InvalidLength(NameField::List)));
                prop_assert_eq!(rename, Err(ListError::InvalidLength(NameField::List)));
                prop_assert_eq!(add, Err(ListError::InvalidLength(NameField::Todo)));
                prop_assert_eq!(state, before);
            }

            #[test]
            fn names_and_ids_stay_unique(
                ops in prop::collection::vec(op(), 1..40),
                id_policy in policy(),
            ) {
                let mut state = ListsState::new();
                let reducer = ListReducer::new();
                let env = ListEnvironment::new(id_policy, false);

                for op in ops {
                    let action = match op {
                        Op::Create(n) => ListAction::CreateList { name: format!("List {n}") },
                        Op::Delete(id) => ListAction::DeleteList {
                            list_id: ListId::new(u64::from(id)),
                        },
                        Op::AddTodo(id) => ListAction::AddTodo {
                            list_id: ListId::new(u64::from(id)),
                            name: "Todo".to_string(),
                        },
                    };
                    let _ = reducer.reduce(&mut state, action, &env);

                    let mut names: Vec<_> =
                        state.lists.iter().map(|l| l.name.as_str()).collect();
                    names.sort_unstable();
                    names.dedup();
                    prop_assert_eq!(names.len(), state.count());

                    let mut ids: Vec<_> = state.lists.iter().map(|l| l.id).collect();
                    ids.sort_unstable();
                    ids.dedup();
                    prop_assert_eq!(ids.len(), state.count());

                    for list in &state.lists {
                        let mut todo_ids: Vec<_> = list.todos.iter().map(|t| t.id).collect();
                        todo_ids.sort_unstable();
                        todo_ids.dedup();
                        prop_assert_eq!(todo_ids.len(), list.todos.len());
                    }
                }
            }
        }
    }
}
