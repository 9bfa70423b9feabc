#[cfg(test)]
mod tests {
    use crate::enums::{Priority, Status, TaskType};
    use crate::errors::{ErrorCategory, Result};
    use crate::goals::{Goal, GoalFilter, GoalRepositoryTrait};
    use crate::tasks::{NewTask, Task, TaskFilter, TaskRepositoryTrait, TaskService, TaskServiceTrait};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::sync::{Arc, Mutex};

    // --- Mock TaskRepository ---
    #[derive(Clone, Default)]
    struct MockTaskRepository {
        tasks: Arc<Mutex<Vec<(Task, bool)>>>,
    }

    impl MockTaskRepository {
        fn active(&self, filter: &TaskFilter) -> Vec<Task> {
            self.tasks
                .lock()
                .unwrap()
                .iter()
                .filter(|(t, active)| *active && filter.matches(t))
                .map(|(t, _)| t.clone())
                .collect()
        }
    }

    #[async_trait]
    impl TaskRepositoryTrait for MockTaskRepository {
        fn find_task(&self, task_id: &str, user_id: &str) -> Result<Option<Task>> {
            Ok(self
                .active(&TaskFilter::for_user(user_id))
                .into_iter()
                .find(|t| t.id == task_id))
        }

        fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
            Ok(self.active(filter))
        }

        fn count_tasks(&self, filter: &TaskFilter) -> Result<i64> {
            Ok(self.active(filter).len() as i64)
        }

        fn count_tasks_by_status(&self, _filter: &TaskFilter) -> Result<Vec<(Status, i64)>> {
            unimplemented!()
        }

        fn count_tasks_by_priority(&self, _filter: &TaskFilter) -> Result<Vec<(Priority, i64)>> {
            unimplemented!()
        }

        async fn create_tasks(&self, tasks: Vec<Task>) -> Result<usize> {
            let count = tasks.len();
            let mut stored = self.tasks.lock().unwrap();
            stored.extend(tasks.into_iter().map(|t| (t, true)));
            Ok(count)
        }

        async fn update_task(&self, task: Task) -> Result<Task> {
            let mut stored = self.tasks.lock().unwrap();
            if let Some(entry) = stored.iter_mut().find(|(t, _)| t.id == task.id) {
                entry.0 = task.clone();
            }
            Ok(task)
        }

        async fn deactivate_task(&self, task_id: &str, _actor_id: &str) -> Result<usize> {
            let mut stored = self.tasks.lock().unwrap();
            let mut count = 0;
            for entry in stored.iter_mut().filter(|(t, a)| *a && t.id == task_id) {
                entry.1 = false;
                count += 1;
            }
            Ok(count)
        }
    }

    // --- Mock GoalRepository (lookups only) ---
    #[derive(Clone, Default)]
    struct MockGoalRepository {
        goals: Arc<Mutex<Vec<Goal>>>,
    }

    impl MockGoalRepository {
        fn add_goal(&self, id: &str, user_id: &str) {
            self.goals.lock().unwrap().push(Goal {
                id: id.to_string(),
                user_id: user_id.to_string(),
                title: "Learn Rust".to_string(),
                description: None,
                start_date: None,
                end_date: None,
                status: Status::Open,
                priority: Priority::Medium,
                progress: Decimal::ZERO,
                task_list: Vec::new(),
            });
        }
    }

    #[async_trait]
    impl GoalRepositoryTrait for MockGoalRepository {
        fn find_goal(&self, goal_id: &str, user_id: &str) -> Result<Option<Goal>> {
            Ok(self
                .goals
                .lock()
                .unwrap()
                .iter()
                .find(|g| g.id == goal_id && g.user_id == user_id)
                .cloned())
        }

        fn list_goals(&self, _user_id: &str) -> Result<Vec<Goal>> {
            unimplemented!()
        }

        fn count_goals(&self, _filter: &GoalFilter) -> Result<i64> {
            unimplemented!()
        }

        fn count_goals_by_status(&self, _filter: &GoalFilter) -> Result<Vec<(Status, i64)>> {
            unimplemented!()
        }

        fn count_goals_by_priority(&self, _filter: &GoalFilter) -> Result<Vec<(Priority, i64)>> {
            unimplemented!()
        }

        async fn create_goal_with_tasks(&self, _goal: Goal, _tasks: Vec<Task>) -> Result<Goal> {
            unimplemented!()
        }

        async fn update_goal(&self, _goal: Goal) -> Result<Goal> {
            unimplemented!()
        }

        async fn deactivate_goal(&self, _goal_id: &str, _actor_id: &str) -> Result<usize> {
            unimplemented!()
        }
    }

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn setup() -> (MockTaskRepository, MockGoalRepository, TaskService) {
        let task_repo = MockTaskRepository::default();
        let goal_repo = MockGoalRepository::default();
        let service = TaskService::new(Arc::new(task_repo.clone()), Arc::new(goal_repo.clone()));
        (task_repo, goal_repo, service)
    }

    #[tokio::test]
    async fn test_individual_tasks_exclude_goal_tasks_and_other_users() {
        let (_, goal_repo, service) = setup();
        goal_repo.add_goal("g1", "alice");

        let linked = NewTask {
            goal_id: Some("g1".to_string()),
            ..new_task("Read the book")
        };
        service
            .create_tasks(vec![new_task("Buy milk"), linked], "alice")
            .await
            .unwrap();
        service
            .create_tasks(vec![new_task("Walk the dog")], "bob")
            .await
            .unwrap();

        let tasks = service.get_individual_tasks("alice").unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[0].task_type, TaskType::Independent);
        assert_eq!(tasks[0].user_id, "alice");
    }

    #[tokio::test]
    async fn test_create_task_with_goal_is_goal_related() {
        let (task_repo, goal_repo, service) = setup();
        goal_repo.add_goal("g1", "alice");

        let linked = NewTask {
            goal_id: Some("g1".to_string()),
            ..new_task("Chapter 1")
        };
        let created = service.create_tasks(vec![linked], "alice").await.unwrap();
        assert_eq!(created, 1);

        let tasks = task_repo.list_tasks(&TaskFilter::for_user("alice")).unwrap();
        assert_eq!(tasks[0].task_type, TaskType::GoalRelated);
        assert_eq!(tasks[0].goal_id.as_deref(), Some("g1"));
    }

    #[tokio::test]
    async fn test_create_task_rejects_foreign_goal() {
        let (task_repo, goal_repo, service) = setup();
        goal_repo.add_goal("g1", "bob");

        let linked = NewTask {
            goal_id: Some("g1".to_string()),
            ..new_task("Sneaky")
        };
        let err = service.create_tasks(vec![linked], "alice").await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(task_repo.count_tasks(&TaskFilter::default()).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_task_keeps_goal_link() {
        let (task_repo, goal_repo, service) = setup();
        goal_repo.add_goal("g1", "alice");
        let linked = NewTask {
            goal_id: Some("g1".to_string()),
            ..new_task("Draft")
        };
        service.create_tasks(vec![linked], "alice").await.unwrap();
        let id = task_repo.list_tasks(&TaskFilter::default()).unwrap()[0].id.clone();

        let edit = NewTask {
            status: Status::Completed,
            priority: Priority::High,
            ..new_task("Final")
        };
        let updated = service.update_task(&id, edit, "alice").await.unwrap();
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.status, Status::Completed);
        assert_eq!(updated.goal_id.as_deref(), Some("g1"));
        assert_eq!(updated.task_type, TaskType::GoalRelated);
    }

    #[tokio::test]
    async fn test_other_user_cannot_update_or_delete() {
        let (task_repo, _, service) = setup();
        service
            .create_tasks(vec![new_task("Private")], "alice")
            .await
            .unwrap();
        let id = task_repo.list_tasks(&TaskFilter::default()).unwrap()[0].id.clone();

        let err = service
            .update_task(&id, new_task("Hijacked"), "bob")
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);

        let err = service.delete_task(&id, "bob").await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(service.get_individual_tasks("alice").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_deleted_task_disappears_from_reads() {
        let (task_repo, _, service) = setup();
        service
            .create_tasks(vec![new_task("Temporary")], "alice")
            .await
            .unwrap();
        let id = task_repo.list_tasks(&TaskFilter::default()).unwrap()[0].id.clone();

        service.delete_task(&id, "alice").await.unwrap();
        assert!(service.get_individual_tasks("alice").unwrap().is_empty());

        let err = service.delete_task(&id, "alice").await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let (_, _, service) = setup();
        let err = service
            .create_tasks(vec![new_task("")], "alice")
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::BadRequest);
    }
}
