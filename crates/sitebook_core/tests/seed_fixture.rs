use sitebook_core::{
    load_seed, open_seeded_store, ProjectRepository, ProjectStatus, RecordKind, RepoError,
    SeedData, SeedError, SqliteProjectRepository, TaskPriority, TaskStatus,
};

#[test]
fn builtin_fixture_has_three_projects_with_tasks_and_comments() {
    let seed = SeedData::builtin().unwrap();

    assert_eq!(seed.projects.len(), 3);
    assert_eq!(seed.tasks.len(), 9);
    assert_eq!(seed.comments.len(), 3);
    assert!(seed.comments.iter().all(|c| c.attachments.len() == 1));
}

#[test]
fn seeded_store_serves_fixture_records() {
    let conn = open_seeded_store(&SeedData::builtin().unwrap()).unwrap();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();

    let projects = repo.list_projects().unwrap();
    let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "City Center Complex",
            "Green Valley Residences",
            "Tech Hub Innovation Center"
        ]
    );
    assert_eq!(projects[0].status, ProjectStatus::InProgress);
    assert_eq!(projects[0].budget, 15_000_000.0);
    assert_eq!(projects[0].progress, 35);

    let tasks = repo.get_tasks_for_project("1").unwrap();
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Foundation Work", "Structural Framework", "Electrical Installation"]
    );
    assert_eq!(tasks[0].status, TaskStatus::Completed);
    assert_eq!(tasks[2].priority, TaskPriority::Medium);

    let comments = repo.get_comments_for_project("1").unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author, "Project Manager");
    assert_eq!(comments[0].attachments[0].name, "foundation-report.pdf");
    assert_eq!(comments[0].attachments[0].mime_type, "application/pdf");
}

#[test]
fn seeded_stores_are_independent() {
    let seed = SeedData::builtin().unwrap();
    let first = open_seeded_store(&seed).unwrap();
    let second = open_seeded_store(&seed).unwrap();

    let first_repo = SqliteProjectRepository::try_new(&first).unwrap();
    let mut extra = seed.projects[0].clone();
    extra.id = "4".to_string();
    first_repo.add_project(&extra).unwrap();

    let second_repo = SqliteProjectRepository::try_new(&second).unwrap();
    assert_eq!(first_repo.list_projects().unwrap().len(), 4);
    assert_eq!(second_repo.list_projects().unwrap().len(), 3);
}

#[test]
fn invalid_progress_is_rejected_at_parse_time() {
    let json = r#"{
        "projects": [{
            "id": "p", "name": "Overrun", "description": "",
            "startDate": "2024-01-01", "endDate": "2024-02-01",
            "status": "planning", "budget": 0, "progress": 150
        }]
    }"#;

    assert!(matches!(SeedData::from_json(json), Err(SeedError::Parse(_))));
}

#[test]
fn unknown_fields_are_rejected() {
    let json = r#"{ "projects": [], "milestones": [] }"#;

    assert!(matches!(SeedData::from_json(json), Err(SeedError::Parse(_))));
}

#[test]
fn missing_sections_default_to_empty() {
    let seed = SeedData::from_json("{}").unwrap();

    assert_eq!(seed, SeedData::default());
    let conn = open_seeded_store(&seed).unwrap();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();
    assert!(repo.list_projects().unwrap().is_empty());
}

#[test]
fn orphan_task_fails_the_load() {
    let json = r#"{
        "tasks": [{
            "id": "t", "projectId": "ghost", "title": "Orphan",
            "status": "todo", "dueDate": "2024-01-01", "priority": "low"
        }]
    }"#;
    let seed = SeedData::from_json(json).unwrap();

    let err = open_seeded_store(&seed).unwrap_err();
    assert!(matches!(err, SeedError::Repo(RepoError::UnknownProject(ref id)) if id == "ghost"));
}

#[test]
fn duplicate_seed_ids_fail_the_load() {
    let seed = SeedData::builtin().unwrap();
    let conn = sitebook_core::db::open_db_in_memory().unwrap();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();

    load_seed(&repo, &seed).unwrap();
    let err = load_seed(&repo, &seed).unwrap_err();
    assert!(matches!(
        err,
        SeedError::Repo(RepoError::DuplicateId {
            kind: RecordKind::Project,
            ..
        })
    ));
}
