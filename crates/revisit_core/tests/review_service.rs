use revisit_core::{
    CompletionOutcome, DayKey, DayKeyError, InMemoryRepository, JsonFileRepository,
    ReviewService, ServiceError, StoreRepository, TaskStore,
};
use tempfile::TempDir;

fn key(value: &str) -> DayKey {
    DayKey::parse(value).unwrap()
}

fn empty_service(repo: &InMemoryRepository) -> ReviewService<&InMemoryRepository> {
    repo.create_empty().unwrap();
    ReviewService::open(repo).unwrap()
}

const REVIEW_DAYS_FROM_NEW_YEAR: [&str; 7] = [
    "2024-01-02",
    "2024-01-04",
    "2024-01-08",
    "2024-01-15",
    "2024-01-31",
    "2024-03-31",
    "2024-06-29",
];

#[test]
fn add_today_task_logs_work_and_schedules_seven_reviews() {
    let repo = InMemoryRepository::new();
    let mut service = empty_service(&repo);

    let logged = service
        .add_today_task(key("2024-01-01"), "Review chapter 1")
        .unwrap();
    assert_eq!(logged.date, key("2024-01-01"));
    assert_eq!(logged.reviews.len(), 7);

    let store = service.store();
    assert_eq!(
        store.day(key("2024-01-01")).unwrap().work_done,
        vec!["Review chapter 1".to_string()]
    );
    assert!(store.day(key("2024-01-01")).unwrap().review_tasks.is_empty());
    assert_eq!(store.len(), 8);

    for date in REVIEW_DAYS_FROM_NEW_YEAR {
        let record = store.day(key(date)).unwrap();
        assert!(record.work_done.is_empty(), "date {date}");
        assert_eq!(record.review_tasks.len(), 1, "date {date}");
        assert_eq!(record.review_tasks[0].content, "Review chapter 1");
        assert!(!record.review_tasks[0].completed);
    }
}

#[test]
fn every_mutation_is_persisted() {
    let repo = InMemoryRepository::new();
    let mut service = empty_service(&repo);

    service.add_today_task(key("2024-01-01"), "persisted").unwrap();
    assert_eq!(&repo.load().unwrap(), service.store());

    service.mark_complete(key("2024-01-02"), "persisted").unwrap();
    let reloaded = repo.load().unwrap();
    assert!(reloaded.day(key("2024-01-02")).unwrap().review_tasks[0].completed);
}

#[test]
fn add_past_task_creates_missing_day_and_reviews() {
    let repo = InMemoryRepository::new();
    let mut service = empty_service(&repo);

    let logged = service.add_past_task("2023-12-25", "X").unwrap();
    assert_eq!(logged.date, key("2023-12-25"));

    let store = service.store();
    assert_eq!(
        store.day(key("2023-12-25")).unwrap().work_done,
        vec!["X".to_string()]
    );
    for date in [
        "2023-12-26",
        "2023-12-28",
        "2024-01-01",
        "2024-01-08",
        "2024-01-24",
        "2024-03-24",
        "2024-06-22",
    ] {
        let record = store.day(key(date)).unwrap();
        assert_eq!(record.review_tasks.len(), 1, "date {date}");
        assert_eq!(record.review_tasks[0].content, "X");
    }
}

#[test]
fn add_past_task_appends_to_existing_days() {
    let repo = InMemoryRepository::new();
    let mut service = empty_service(&repo);

    service.add_past_task("2024-01-01", "first").unwrap();
    service.add_past_task("2024-01-01", "second").unwrap();

    let store = service.store();
    assert_eq!(
        store.day(key("2024-01-01")).unwrap().work_done,
        vec!["first".to_string(), "second".to_string()]
    );
    let contents: Vec<&str> = store
        .day(key("2024-01-02"))
        .unwrap()
        .review_tasks
        .iter()
        .map(|task| task.content.as_str())
        .collect();
    assert_eq!(contents, vec!["first", "second"]);
}

#[test]
fn add_past_task_rejects_bad_dates_without_mutation() {
    let repo = InMemoryRepository::new();
    let mut service = empty_service(&repo);
    let before = repo.document();

    let err = service.add_past_task("12/25/2023", "X").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InvalidDate(DayKeyError::Format(_))
    ));
    let err = service.add_past_task("2023-02-30", "X").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InvalidDate(DayKeyError::Calendar(_))
    ));

    assert!(service.store().is_empty());
    assert_eq!(repo.document(), before);
}

#[test]
fn blank_content_is_rejected() {
    let repo = InMemoryRepository::new();
    let mut service = empty_service(&repo);

    let err = service.add_today_task(key("2024-01-01"), "   ").unwrap_err();
    assert!(matches!(err, ServiceError::EmptyContent));
    assert!(service.store().is_empty());
}

#[test]
fn content_is_trimmed() {
    let repo = InMemoryRepository::new();
    let mut service = empty_service(&repo);

    let logged = service
        .add_today_task(key("2024-01-01"), "  spaced  ")
        .unwrap();
    assert_eq!(logged.content, "spaced");
    assert_eq!(
        service.day(key("2024-01-02")).unwrap().review_tasks[0].content,
        "spaced"
    );
}

#[test]
fn mark_complete_flips_exactly_one_entry_and_is_idempotent() {
    let repo = InMemoryRepository::new();
    let mut service = empty_service(&repo);
    service.add_past_task("2024-01-01", "dup").unwrap();
    service.add_past_task("2024-01-01", "dup").unwrap();
    let review_day = key("2024-01-02");

    let outcome = service.mark_complete(review_day, "dup").unwrap();
    assert_eq!(outcome, CompletionOutcome::Completed);
    let tasks = &service.day(review_day).unwrap().review_tasks;
    assert!(tasks[0].completed);
    assert!(!tasks[1].completed);

    // First match wins even when it is already completed.
    let outcome = service.mark_complete(review_day, "dup").unwrap();
    assert_eq!(outcome, CompletionOutcome::AlreadyCompleted);
    assert!(outcome.is_completed());
    assert!(!service.day(review_day).unwrap().review_tasks[1].completed);
}

#[test]
fn mark_complete_by_id_distinguishes_duplicates() {
    let repo = InMemoryRepository::new();
    let mut service = empty_service(&repo);
    service.add_past_task("2024-01-01", "dup").unwrap();
    service.add_past_task("2024-01-01", "dup").unwrap();
    let review_day = key("2024-01-02");
    let second_id = service.day(review_day).unwrap().review_tasks[1].id;

    let outcome = service.mark_complete_by_id(review_day, second_id).unwrap();
    assert_eq!(outcome, CompletionOutcome::Completed);
    let tasks = &service.day(review_day).unwrap().review_tasks;
    assert!(!tasks[0].completed);
    assert!(tasks[1].completed);
}

#[test]
fn mark_complete_without_match_leaves_store_unchanged() {
    let repo = InMemoryRepository::new();
    let mut service = empty_service(&repo);
    service.add_past_task("2024-01-01", "present").unwrap();
    let before: TaskStore = service.store().clone();
    let document_before = repo.document();

    let outcome = service.mark_complete(key("2024-01-02"), "absent").unwrap();
    assert_eq!(outcome, CompletionOutcome::NotFound);
    let outcome = service
        .mark_complete(key("2030-01-01"), "present")
        .unwrap();
    assert_eq!(outcome, CompletionOutcome::NotFound);

    assert_eq!(service.store(), &before);
    assert_eq!(repo.document(), document_before);
}

#[test]
fn open_fails_on_missing_store_file() {
    let dir = TempDir::new().unwrap();
    let repo = JsonFileRepository::new(dir.path().join("missing.json"));

    let err = ReviewService::open(repo).err().unwrap();
    assert!(matches!(
        err,
        ServiceError::Repo(revisit_core::RepoError::NotFound(_))
    ));
}

#[test]
fn file_backed_service_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("task_data.json");
    let repo = JsonFileRepository::new(&path);
    repo.create_empty().unwrap();

    let mut service = ReviewService::open(repo.clone()).unwrap();
    service
        .add_today_task(key("2024-01-01"), "Review chapter 1")
        .unwrap();
    let id = service.day(key("2024-01-04")).unwrap().review_tasks[0].id;
    service.mark_complete_by_id(key("2024-01-04"), id).unwrap();

    let reopened = ReviewService::open(JsonFileRepository::new(&path)).unwrap();
    assert_eq!(reopened.store(), service.store());
    let task = &reopened.day(key("2024-01-04")).unwrap().review_tasks[0];
    assert_eq!(task.id, id);
    assert!(task.completed);
}
