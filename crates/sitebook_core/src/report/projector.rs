//! Report sections: header block, tasks table, comments list.

use crate::model::comment::Comment;
use crate::model::project::Project;
use crate::model::task::Task;
use crate::report::format::{
    attachments_line, format_budget, format_date, format_date_range, format_progress,
    format_timestamp,
};
use crate::report::layout::{Color, Page, PageCursor, TextStyle, ROW_PADDING_Y};
use crate::report::metrics::Font;
use crate::report::pdf::write_document;
use crate::report::RenderError;

/// Resource guard against runaway layouts.
pub const MAX_REPORT_PAGES: usize = 500;

const SECTION_GAP: f32 = 20.0;
const TASK_COLUMNS: [&str; 5] = ["Title", "Status", "Priority", "Assignee", "Due Date"];
const TASK_COLUMN_WEIGHTS: [f32; 5] = [2.0, 1.0, 1.0, 1.0, 1.0];

const TITLE: TextStyle = TextStyle {
    font: Font::Bold,
    size: 24.0,
    color: Color::BLACK,
    margin_bottom: 10.0,
};
const SUBTITLE: TextStyle = TextStyle {
    font: Font::Bold,
    size: 18.0,
    color: Color::BLACK,
    margin_bottom: 10.0,
};
const BODY: TextStyle = TextStyle {
    font: Font::Regular,
    size: 12.0,
    color: Color::BLACK,
    margin_bottom: 5.0,
};
const BODY_BOLD: TextStyle = TextStyle {
    font: Font::Bold,
    ..BODY
};
const CAPTION: TextStyle = TextStyle {
    font: Font::Regular,
    size: 10.0,
    color: Color::MUTED,
    margin_bottom: 5.0,
};
const TABLE_CELL: TextStyle = TextStyle {
    margin_bottom: 0.0,
    ..BODY
};
const TABLE_HEADER: TextStyle = TextStyle {
    font: Font::Bold,
    ..TABLE_CELL
};

/// Renders a project report to PDF bytes.
///
/// `tasks` and `comments` must already belong to `project`; they are drawn
/// as given, without filtering or reordering.
///
/// # Errors
/// - `RenderError::InvalidProject` when `project.validate()` fails.
/// - `RenderError::PageLimitExceeded` when layout needs more than
///   `MAX_REPORT_PAGES` pages.
pub fn render_project_report(
    project: &Project,
    tasks: &[Task],
    comments: &[Comment],
) -> Result<Vec<u8>, RenderError> {
    let pages = lay_out_report(project, tasks, comments)?;
    let bytes = write_document(&pages)?;
    Ok(bytes)
}

/// Lays out the report without serializing it.
pub fn lay_out_report(
    project: &Project,
    tasks: &[Task],
    comments: &[Comment],
) -> Result<Vec<Page>, RenderError> {
    project.validate()?;

    let mut cursor = PageCursor::new(MAX_REPORT_PAGES);
    header_block(&mut cursor, project)?;
    tasks_section(&mut cursor, tasks)?;
    comments_section(&mut cursor, comments)?;
    Ok(cursor.finish())
}

fn header_block(cursor: &mut PageCursor, project: &Project) -> Result<(), RenderError> {
    cursor.paragraph(&project.name, TITLE)?;
    cursor.paragraph(&project.description, BODY)?;
    cursor.paragraph(&format!("Status: {}", project.status), BODY)?;
    cursor.paragraph(
        &format!(
            "Timeline: {}",
            format_date_range(project.start_date, project.end_date)
        ),
        BODY,
    )?;
    cursor.paragraph(&format!("Budget: {}", format_budget(project.budget)), BODY)?;
    cursor.paragraph(
        &format!("Progress: {}", format_progress(project.progress)),
        BODY,
    )?;
    cursor.skip(SECTION_GAP);
    Ok(())
}

fn tasks_section(cursor: &mut PageCursor, tasks: &[Task]) -> Result<(), RenderError> {
    cursor.paragraph("Tasks", SUBTITLE)?;
    cursor.table_row(
        &TASK_COLUMNS,
        &TASK_COLUMN_WEIGHTS,
        TABLE_HEADER,
        Some(Color::HEADER_FILL),
    )?;

    for task in tasks {
        let due_date = format_date(task.due_date);
        let cells = [
            task.title.as_str(),
            task.status.as_str(),
            task.priority.as_str(),
            task.assignee.as_str(),
            due_date.as_str(),
        ];
        cursor.table_row(&cells, &TASK_COLUMN_WEIGHTS, TABLE_CELL, None)?;
    }

    cursor.skip(SECTION_GAP);
    Ok(())
}

fn comments_section(cursor: &mut PageCursor, comments: &[Comment]) -> Result<(), RenderError> {
    cursor.paragraph("Comments", SUBTITLE)?;
    let indent = PageCursor::cell_indent();

    for comment in comments {
        // Keep the author line together with the first line of content.
        cursor.ensure_space(BODY_BOLD.line_height() + BODY.line_height() + ROW_PADDING_Y)?;
        cursor.row_padding();
        cursor.paragraph_indented(&comment.author, BODY_BOLD, indent)?;
        cursor.paragraph_indented(&comment.content, BODY, indent)?;
        cursor.paragraph_indented(&format_timestamp(comment.timestamp), CAPTION, indent)?;
        if let Some(line) = attachments_line(comment) {
            cursor.paragraph_indented(&line, CAPTION, indent)?;
        }
        cursor.row_padding();
        cursor.rule();
    }

    Ok(())
}
