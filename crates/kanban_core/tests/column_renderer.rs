use kanban_core::{render, Task, TaskStatus};

fn task(id: &str, title: &str, status: TaskStatus, board: &str) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        status,
        board: board.to_string(),
    }
}

fn item_ids(view: &kanban_core::BoardView, status: TaskStatus) -> Vec<&str> {
    view.column(status)
        .items
        .iter()
        .map(|card| card.id.as_str())
        .collect()
}

#[test]
fn render_filters_by_active_board() {
    let tasks = vec![
        task("1", "mine", TaskStatus::Todo, "Sprint1"),
        task("2", "other", TaskStatus::Todo, "Sprint2"),
    ];

    let view = render(&tasks, "Sprint1");

    assert_eq!(item_ids(&view, TaskStatus::Todo), vec!["1"]);
    assert!(view.column(TaskStatus::Doing).items.is_empty());
    assert!(view.column(TaskStatus::Done).items.is_empty());
}

#[test]
fn columns_follow_fixed_order_and_collection_order() {
    let tasks = vec![
        task("d1", "d1", TaskStatus::Done, "B"),
        task("t1", "t1", TaskStatus::Todo, "B"),
        task("g1", "g1", TaskStatus::Doing, "B"),
        task("t2", "t2", TaskStatus::Todo, "B"),
    ];

    let view = render(&tasks, "B");

    let statuses: Vec<_> = view.columns.iter().map(|column| column.status).collect();
    assert_eq!(statuses, TaskStatus::ALL.to_vec());
    let headers: Vec<_> = view
        .columns
        .iter()
        .map(|column| column.header.as_str())
        .collect();
    assert_eq!(headers, vec!["TODO", "DOING", "DONE"]);
    assert_eq!(item_ids(&view, TaskStatus::Todo), vec!["t1", "t2"]);
    assert_eq!(item_ids(&view, TaskStatus::Doing), vec!["g1"]);
    assert_eq!(item_ids(&view, TaskStatus::Done), vec!["d1"]);
}

#[test]
fn board_without_tasks_renders_headers_only() {
    let tasks = vec![task("1", "x", TaskStatus::Todo, "A")];

    let view = render(&tasks, "Empty");

    assert_eq!(view.task_count(), 0);
    let html = view.to_html();
    assert!(html.contains("<h4 class=\"columnHeader\">TODO</h4>"));
    assert!(html.contains("<h4 class=\"columnHeader\">DONE</h4>"));
    assert!(!html.contains("task-div"));
}

#[test]
fn rerender_with_same_input_is_identical() {
    let tasks = vec![
        task("1", "a", TaskStatus::Todo, "B"),
        task("2", "b", TaskStatus::Done, "B"),
    ];

    let first = render(&tasks, "B");
    let second = render(&tasks, "B");

    assert_eq!(first, second);
    assert_eq!(first.to_html(), second.to_html());
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn html_items_carry_task_id_and_escape_text() {
    let tasks = vec![task("id-1", "<script>&", TaskStatus::Doing, "B")];

    let html = render(&tasks, "B").to_html();

    assert!(html.contains(
        "<div class=\"task-div\" data-task-id=\"id-1\">&lt;script&gt;&amp;</div>"
    ));
    assert!(html.contains("<div class=\"column-div\" data-status=\"doing\">"));
}

#[test]
fn find_task_maps_item_back_to_column() {
    let tasks = vec![
        task("1", "a", TaskStatus::Todo, "B"),
        task("2", "b", TaskStatus::Done, "B"),
    ];
    let view = render(&tasks, "B");

    let (status, card) = view.find_task("2").unwrap();
    assert_eq!(status, TaskStatus::Done);
    assert_eq!(card.title, "b");
    assert!(view.find_task("3").is_none());
}

#[test]
fn text_projection_lists_columns_with_counts() {
    let tasks = vec![task("1", "a", TaskStatus::Todo, "B")];

    let text = render(&tasks, "B").to_string();

    assert!(text.starts_with("[B]\n"));
    assert!(text.contains("TODO (1)\n  - a  1\n"));
    assert!(text.contains("DOING (0)\n"));
}

#[test]
fn column_lookup_agrees_with_fixed_order() {
    let view = render(&[], "B");

    for (index, status) in TaskStatus::ALL.into_iter().enumerate() {
        assert_eq!(view.column(status).status, status);
        assert_eq!(view.column(status), &view.columns[index]);
    }
}

#[test]
fn html_markup_for_one_item_is_exact() {
    let tasks = vec![task("7", "Ship", TaskStatus::Done, "B")];

    let html = render(&tasks, "B").to_html();

    let lines: Vec<&str> = html.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[2],
        "<div class=\"column-div\" data-status=\"done\">\
         <div class=\"column-head-div\">\
         <span class=\"dot\" id=\"done-dot\"></span>\
         <h4 class=\"columnHeader\">DONE</h4>\
         </div>\
         <div class=\"tasks-container\">\
         <div class=\"task-div\" data-task-id=\"7\">Ship</div>\
         </div></div>"
    );
    assert!(html.ends_with("</div></div>\n"));
}
