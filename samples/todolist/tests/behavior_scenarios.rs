//! End-to-end scenarios through the todo list behavior.

#![allow(clippy::unwrap_used)] // Integration tests can use unwrap

use behavior_core::{Behavior, Repository};
use behavior_testing::{BehaviorTest, InMemoryRepository, assertions};
use std::sync::Arc;
use todolist::behavior::{
    AddTaskRequest, DeleteTaskRequest, FilterTasksRequest, FindOrCreateListRequest,
    ListTasksRequest, TaskSummary, TodoListBehavior, TodoListBehaviorModel, TodoListResponse,
    ToggleTaskCompletionRequest,
};
use todolist::domain::{TaskId, TodoList, TodoListAccess, TodoListError, TodoListId, TodoLists};

type Lists = InMemoryRepository<TodoList, TodoListAccess>;

fn setup() -> (Arc<Lists>, TodoListBehavior) {
    let lists = Arc::new(Lists::new(TodoListAccess));
    let shared: Arc<dyn TodoLists> = lists.clone();
    let behavior = TodoListBehavior::of(&TodoListBehaviorModel::new(shared)).unwrap();
    (lists, behavior)
}

fn find_or_create(behavior: &TodoListBehavior) -> TodoListId {
    match behavior.react_to(FindOrCreateListRequest {}).unwrap() {
        Some(TodoListResponse::FindOrCreateList(response)) => response.todo_list_uuid,
        other => unreachable!("unexpected response {other:?}"),
    }
}

fn add(behavior: &TodoListBehavior, list: TodoListId, name: &str) -> TaskId {
    match behavior.react_to(AddTaskRequest::new(list, name)).unwrap() {
        Some(TodoListResponse::AddTask(response)) => response.task_uuid,
        other => unreachable!("unexpected response {other:?}"),
    }
}

fn tasks(behavior: &TodoListBehavior, list: TodoListId) -> Vec<TaskSummary> {
    match behavior
        .react_to(ListTasksRequest {
            todo_list_uuid: list,
        })
        .unwrap()
    {
        Some(TodoListResponse::ListTasks(response)) => response.tasks,
        other => unreachable!("unexpected response {other:?}"),
    }
}

#[test]
fn test_add_three_tasks_and_toggle_first() {
    let (_, behavior) = setup();
    let list = find_or_create(&behavior);

    let t1 = add(&behavior, list, "t1");
    let t2 = add(&behavior, list, "t2");
    let t3 = add(&behavior, list, "t3");
    behavior
        .react_to(ToggleTaskCompletionRequest {
            todo_list_uuid: list,
            task_uuid: t1,
        })
        .unwrap();

    let summary = |uuid, name: &str, completed| TaskSummary {
        uuid,
        name: name.to_string(),
        completed,
    };
    assert_eq!(
        tasks(&behavior, list),
        vec![
            summary(t1, "t1", true),
            summary(t2, "t2", false),
            summary(t3, "t3", false),
        ]
    );
}

#[test]
fn test_add_then_delete_leaves_list_empty() {
    let (_, behavior) = setup();
    let list = find_or_create(&behavior);

    let t1 = add(&behavior, list, "t1");
    behavior
        .react_to(DeleteTaskRequest {
            todo_list_uuid: list,
            task_uuid: t1,
        })
        .unwrap();

    assert!(tasks(&behavior, list).is_empty());
}

#[test]
fn test_add_task_to_unknown_list_is_not_found() {
    let (_, behavior) = setup();
    let unknown = TodoListId::new();

    BehaviorTest::new(behavior)
        .when_message(AddTaskRequest::new(unknown, "x"))
        .then_error(move |error| {
            assert_eq!(error, &TodoListError::NotFound(unknown));
            assert_eq!(error.kind(), "AggregateNotFoundError");
        })
        .run();
}

#[test]
fn test_blank_task_name_is_invalid() {
    let (lists, behavior) = setup();
    let list = find_or_create(&behavior);

    BehaviorTest::new(behavior)
        .when_message(AddTaskRequest::new(list, "   "))
        .then_error(|error| assert_eq!(error, &TodoListError::InvalidName))
        .run();

    assert_eq!(lists.find_by_id(&list).unwrap().unwrap().size(), 0);
}

#[test]
fn test_commands_without_response() {
    let (lists, behavior) = setup();
    let list = lists.save(&TodoList::new()).unwrap().id();

    BehaviorTest::new(behavior)
        .when_message(ToggleTaskCompletionRequest {
            todo_list_uuid: list,
            task_uuid: TaskId::new(),
        })
        .then_response(assertions::assert_no_response)
        .run();
}

#[test]
fn test_filter_after_toggle() {
    let (_, behavior) = setup();
    let list = find_or_create(&behavior);
    let t1 = add(&behavior, list, "t1");

    BehaviorTest::new(behavior)
        .given_message(ToggleTaskCompletionRequest {
            todo_list_uuid: list,
            task_uuid: t1,
        })
        .when_message(FilterTasksRequest {
            todo_list_uuid: list,
            completed: true,
        })
        .then_response(move |response| match response {
            Some(TodoListResponse::FilterTasks(filtered)) => {
                assert_eq!(filtered.tasks.len(), 1);
                assert_eq!(filtered.tasks[0].uuid, t1);
            }
            other => unreachable!("unexpected response {other:?}"),
        })
        .run();
}

#[test]
fn test_find_or_create_reuses_list() {
    let (lists, behavior) = setup();

    let first = find_or_create(&behavior);
    let second = find_or_create(&behavior);

    assert_eq!(first, second);
    assert_eq!(lists.count().unwrap(), 1);
}

#[test]
fn test_state_survives_reload() {
    let (lists, behavior) = setup();
    let list = find_or_create(&behavior);
    add(&behavior, list, "t1");

    let mut reloaded = lists.find_by_id(&list).unwrap().unwrap();
    reloaded.add_task("local only").unwrap();

    assert_eq!(lists.find_by_id(&list).unwrap().unwrap().size(), 1);
    assert_eq!(tasks(&behavior, list).len(), 1);
}

#[test]
fn test_unknown_message_has_no_response() {
    struct Unknown;

    let (_, behavior) = setup();
    BehaviorTest::new(behavior)
        .when_message(Unknown)
        .then_response(assertions::assert_no_response)
        .run();
}
