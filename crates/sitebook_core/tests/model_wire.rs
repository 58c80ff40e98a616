use chrono::{NaiveDate, TimeZone, Utc};
use sitebook_core::{
    Attachment, Comment, CommentValidationError, DisplayCategory, Project, ProjectStatus,
    ProjectValidationError, Task, TaskPriority, TaskStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn project_new_sets_defaults() {
    let project = Project::new("Depot", date(2024, 1, 1), date(2024, 6, 1));

    assert!(!project.id.is_empty());
    assert_eq!(project.name, "Depot");
    assert_eq!(project.description, "");
    assert_eq!(project.status, ProjectStatus::Planning);
    assert_eq!(project.budget, 0.0);
    assert_eq!(project.progress, 0);
    assert!(project.validate().is_ok());
}

#[test]
fn generated_ids_are_unique() {
    let a = Task::new("p", "Survey", date(2024, 1, 1));
    let b = Task::new("p", "Survey", date(2024, 1, 1));
    assert_ne!(a.id, b.id);
    assert_eq!(a.status, TaskStatus::Todo);
    assert_eq!(a.priority, TaskPriority::Medium);
}

#[test]
fn validate_rejects_reversed_schedule() {
    let project = Project::with_id("p", "Depot", date(2024, 6, 1), date(2024, 1, 1));
    assert_eq!(
        project.validate().unwrap_err(),
        ProjectValidationError::InvalidDateRange {
            start: date(2024, 6, 1),
            end: date(2024, 1, 1),
        }
    );
}

#[test]
fn validate_rejects_progress_above_hundred() {
    let mut project = Project::with_id("p", "Depot", date(2024, 1, 1), date(2024, 1, 2));
    project.progress = 101;
    assert_eq!(
        project.validate().unwrap_err(),
        ProjectValidationError::ProgressOutOfRange(101)
    );

    project.progress = 100;
    assert!(project.validate().is_ok());
}

#[test]
fn validate_rejects_negative_budget_and_empty_id() {
    let mut project = Project::with_id("p", "Depot", date(2024, 1, 1), date(2024, 1, 2));
    project.budget = -1.0;
    assert_eq!(
        project.validate().unwrap_err(),
        ProjectValidationError::InvalidBudget(-1.0)
    );

    let blank = Project::with_id("  ", "Depot", date(2024, 1, 1), date(2024, 1, 2));
    assert_eq!(blank.validate().unwrap_err(), ProjectValidationError::EmptyId);
}

#[test]
fn project_serialization_uses_expected_wire_fields() {
    let mut project = Project::with_id("1", "City Center Complex", date(2024, 3, 1), date(2025, 6, 30));
    project.status = ProjectStatus::InProgress;
    project.budget = 15_000_000.0;
    project.progress = 35;

    let json = serde_json::to_value(&project).unwrap();
    assert_eq!(json["id"], "1");
    assert_eq!(json["startDate"], "2024-03-01");
    assert_eq!(json["endDate"], "2025-06-30");
    assert_eq!(json["status"], "in-progress");
    assert_eq!(json["budget"], 15_000_000.0);
    assert_eq!(json["progress"], 35);

    let decoded: Project = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, project);
}

#[test]
fn deserialize_rejects_invalid_schedule() {
    let value = serde_json::json!({
        "id": "p",
        "name": "Depot",
        "description": "",
        "startDate": "2024-06-01",
        "endDate": "2024-01-01",
        "status": "planning",
        "budget": 10,
        "progress": 0
    });

    let err = serde_json::from_value::<Project>(value).unwrap_err();
    assert!(
        err.to_string()
            .contains("end date (2024-01-01) must be >= start date (2024-06-01)"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_rejects_unknown_status_literal() {
    let value = serde_json::json!({
        "id": "p",
        "name": "Depot",
        "startDate": "2024-01-01",
        "endDate": "2024-02-01",
        "status": "cancelled",
        "budget": 10,
        "progress": 0
    });
    assert!(serde_json::from_value::<Project>(value).is_err());
}

#[test]
fn comment_wire_shape_matches_external_schema() {
    let timestamp = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
    let comment = Comment::with_id("c1", "1", "Project Manager", "Poured.", timestamp).attach(
        Attachment {
            id: "a1".to_string(),
            name: "foundation-report.pdf".to_string(),
            url: "#".to_string(),
            mime_type: "application/pdf".to_string(),
        },
    );

    let json = serde_json::to_value(&comment).unwrap();
    assert_eq!(json["projectId"], "1");
    assert_eq!(json["timestamp"], "2024-03-15T10:30:00Z");
    assert_eq!(json["attachments"][0]["type"], "application/pdf");
    assert_eq!(json["attachments"][0]["name"], "foundation-report.pdf");

    let decoded: Comment = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, comment);
}

#[test]
fn comment_validate_rejects_duplicate_attachment_ids() {
    let timestamp = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
    let mut first = Attachment::new("a.pdf", "#", "application/pdf");
    first.id = "same".to_string();
    let mut second = Attachment::new("b.pdf", "#", "application/pdf");
    second.id = "same".to_string();

    let comment = Comment::new("1", "PM", "two files", timestamp)
        .attach(first)
        .attach(second);
    assert_eq!(
        comment.validate().unwrap_err(),
        CommentValidationError::DuplicateAttachmentId("same".to_string())
    );
}

#[test]
fn task_enums_serialize_as_kebab_literals() {
    for status in TaskStatus::ALL {
        let json = serde_json::to_value(status).unwrap();
        assert_eq!(json, status.as_str());
    }
    for priority in TaskPriority::ALL {
        let json = serde_json::to_value(priority).unwrap();
        assert_eq!(json, priority.as_str());
    }
}

#[test]
fn status_categories_follow_card_colours() {
    assert_eq!(ProjectStatus::Planning.category(), DisplayCategory::Info);
    assert_eq!(ProjectStatus::InProgress.category(), DisplayCategory::Warning);
    assert_eq!(ProjectStatus::Completed.category(), DisplayCategory::Success);
    assert_eq!(ProjectStatus::OnHold.category(), DisplayCategory::Danger);
    assert_eq!(TaskStatus::Todo.category(), DisplayCategory::Neutral);
    assert_eq!(TaskPriority::High.category(), DisplayCategory::Danger);
}
