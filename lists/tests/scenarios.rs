//! End-to-end scenarios through a session store.
//!
//! Run with: `cargo test --test scenarios`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use todo_lists::{
    Completable, Completion, IdPolicy, ListAction, ListEnvironment, ListError, ListId, ListStore,
    ListsState, NameField, ListReducer, TodoId,
};
use todo_lists_runtime::Store;

fn store() -> ListStore {
    Store::new(ListsState::new(), ListReducer::new(), ListEnvironment::default())
}

async fn create(store: &ListStore, name: &str) -> Result<ListId, ListError> {
    let event = store
        .send(ListAction::CreateList {
            name: name.to_string(),
        })
        .await?;
    Ok(event.list_id().expect("ListCreated names its list"))
}

async fn add(store: &ListStore, list_id: ListId, name: &str) -> TodoId {
    match store
        .send(ListAction::AddTodo {
            list_id,
            name: name.to_string(),
        })
        .await
        .unwrap()
    {
        ListAction::TodoAdded { todo_id, .. } => todo_id,
        other => panic!("Expected TodoAdded, got {other:?}"),
    }
}

#[tokio::test]
async fn groceries_with_one_todo_done() {
    let store = store();

    let list_id = create(&store, "Groceries").await.unwrap();
    let milk = add(&store, list_id, "Milk").await;
    add(&store, list_id, "Eggs").await;
    store
        .send(ListAction::SetTodoCompleted {
            list_id,
            todo_id: milk,
            completed: true,
        })
        .await
        .unwrap();

    let (completion, complete) = store
        .state(|s| {
            let list = s.list(list_id).unwrap();
            (list.completion(), list.is_complete())
        })
        .await;

    assert_eq!(completion, Completion { remaining: 1, total: 2 });
    assert_eq!(completion.to_string(), "1/2");
    assert!(!complete);
}

#[tokio::test]
async fn empty_name_leaves_session_empty() {
    let store = store();

    let result = create(&store, "").await;

    assert_eq!(result, Err(ListError::InvalidLength(NameField::List)));
    assert_eq!(store.state(ListsState::count).await, 0);
}

#[tokio::test]
async fn duplicate_name_keeps_single_list() {
    let store = store();

    create(&store, "A").await.unwrap();
    let second = create(&store, "A").await;

    assert_eq!(second, Err(ListError::DuplicateName));
    let named_a = store
        .state(|s| s.lists.iter().filter(|l| l.name == "A").count())
        .await;
    assert_eq!(named_a, 1);
}

#[tokio::test]
async fn complete_all_is_idempotent() {
    let store = store();
    let list_id = create(&store, "Chores").await.unwrap();
    add(&store, list_id, "Dishes").await;
    add(&store, list_id, "Laundry").await;

    store.send(ListAction::CompleteAll { list_id }).await.unwrap();
    let once = store.state(Clone::clone).await;
    store.send(ListAction::CompleteAll { list_id }).await.unwrap();
    let twice = store.state(Clone::clone).await;

    assert_eq!(once, twice);
    assert!(once.list(list_id).unwrap().is_complete());
}

#[tokio::test]
async fn new_list_ids_follow_the_largest_existing_id() {
    let store = store();

    for expected in 1..=3 {
        let id = create(&store, &format!("List {expected}")).await.unwrap();
        assert_eq!(id, ListId::new(expected));
    }
    store
        .send(ListAction::DeleteList {
            list_id: ListId::new(3),
        })
        .await
        .unwrap();

    assert_eq!(create(&store, "Again").await.unwrap(), ListId::new(3));
}

#[tokio::test]
async fn monotonic_policy_skips_deleted_ids() {
    let store: ListStore = Store::new(
        ListsState::new(),
        ListReducer::new(),
        ListEnvironment::new(IdPolicy::Monotonic, false),
    );
    let list_id = create(&store, "Groceries").await.unwrap();
    add(&store, list_id, "Milk").await;
    let eggs = add(&store, list_id, "Eggs").await;
    store
        .send(ListAction::DeleteTodo {
            list_id,
            todo_id: eggs,
        })
        .await
        .unwrap();

    assert_eq!(add(&store, list_id, "Bread").await, TodoId::new(3));
}

#[tokio::test]
async fn deleting_unknown_todo_changes_nothing() {
    let store = store();
    let list_id = create(&store, "Groceries").await.unwrap();
    add(&store, list_id, "Milk").await;
    let before = store.state(Clone::clone).await;

    store
        .send(ListAction::DeleteTodo {
            list_id,
            todo_id: TodoId::new(99),
        })
        .await
        .unwrap();

    assert_eq!(store.state(Clone::clone).await, before);
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let store = store();

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move { create(&store, &format!("List {i}")).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let mut ids = store
        .state(|s| s.lists.iter().map(|l| l.id).collect::<Vec<_>>())
        .await;
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}
