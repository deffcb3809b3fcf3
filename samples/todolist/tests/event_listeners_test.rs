//! Todo list behaviors reacting to published events.

#![allow(clippy::unwrap_used)] // Integration tests can use unwrap

use behavior_core::{Behavior, Repository};
use behavior_testing::InMemoryRepository;
use behavior_web::EventListeners;
use std::sync::Arc;
use todolist::behavior::{
    AddTaskRequest, FindOrCreateListRequest, TodoListBehavior, TodoListBehaviorModel,
    TodoListResponse,
};
use todolist::domain::{TodoList, TodoListAccess, TodoListId, TodoLists};

type Lists = InMemoryRepository<TodoList, TodoListAccess>;

fn repository() -> Arc<Lists> {
    Arc::new(Lists::new(TodoListAccess))
}

fn model(lists: &Arc<Lists>) -> TodoListBehaviorModel {
    let shared: Arc<dyn TodoLists> = lists.clone();
    TodoListBehaviorModel::new(shared)
}

fn create_list(lists: &Arc<Lists>) -> TodoListId {
    let behavior = TodoListBehavior::of(&model(lists)).unwrap();
    match behavior.react_to(FindOrCreateListRequest {}).unwrap() {
        Some(TodoListResponse::FindOrCreateList(response)) => response.todo_list_uuid,
        other => unreachable!("unexpected response {other:?}"),
    }
}

fn task_count(lists: &Lists, list: TodoListId) -> usize {
    lists.find_by_id(&list).unwrap().unwrap().size()
}

#[tokio::test]
async fn test_event_reaches_every_subscribed_behavior() {
    let lists = repository();
    let list = create_list(&lists);

    let listeners = EventListeners::new()
        .with_model("first", &model(&lists))
        .unwrap()
        .with_model("second", &model(&lists))
        .unwrap();

    let delivery = listeners.on(AddTaskRequest::new(list, "Buy milk")).await;

    assert_eq!(delivery.delivered, 2);
    assert!(delivery.is_complete());
    assert_eq!(task_count(&lists, list), 2);
}

#[tokio::test]
async fn test_failing_list_does_not_stop_the_next_one() {
    let unrelated = repository();
    let lists = repository();
    let list = create_list(&lists);

    let listeners = EventListeners::new()
        .with_model("unrelated", &model(&unrelated))
        .unwrap()
        .with_model("todolist", &model(&lists))
        .unwrap();

    let delivery = listeners.on(AddTaskRequest::new(list, "Buy milk")).await;

    assert_eq!(delivery.delivered, 1);
    assert_eq!(delivery.failed.len(), 1);
    assert_eq!(delivery.failed[0].listener, "unrelated");
    assert_eq!(
        delivery.failed[0].reason,
        format!("Repository doesn't contain a TodoList of id {list}")
    );
    assert_eq!(task_count(&lists, list), 1);
}
