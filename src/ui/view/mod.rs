//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::state::{App, AppMode};
use crate::models::Todo;
use components::render_input_widget;

const EMPTY_HINT: &str = "暂无待办，按 'a' 添加第一条";

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(10),   // 列表
            Constraint::Length(3), // 输入栏
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_input_bar(frame, app, chunks[2]);
    render_help(frame, app, chunks[3]);
}

/// 标题栏文本，有在途请求时带同步标记
fn title_text(in_flight: usize) -> String {
    if in_flight > 0 {
        "🌱 Taproot 待办清单 · 同步中…".to_string()
    } else {
        "🌱 Taproot 待办清单".to_string()
    }
}

/// 列表行文本，正在编辑的待办带 ✎ 标记
fn todo_row_text(todo: &Todo, editing: bool) -> String {
    if editing {
        format!("✎ {}", todo.title)
    } else {
        format!("• {}", todo.title)
    }
}

/// 输入栏标题跟随提交语义：编辑走更新，其余走添加
fn input_title(mode: &AppMode) -> &'static str {
    match mode {
        AppMode::EditingTodo(_) => "更新待办",
        _ => "添加待办",
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(title_text(app.in_flight))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.todos.is_empty() {
        let hint = Paragraph::new(EMPTY_HINT)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().title("待办列表").borders(Borders::ALL));
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = app
        .todos
        .iter()
        .enumerate()
        .map(|(i, todo)| {
            let editing = matches!(&app.mode, AppMode::EditingTodo(id) if id == &todo.id);
            let content = todo_row_text(todo, editing);

            let style = if i == app.selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else if editing {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![Span::styled(content, style)]))
        })
        .collect();

    let list_widget = List::new(items)
        .block(Block::default().title("待办列表").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(list_widget, area, &mut state);
}

fn render_input_bar(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.mode != AppMode::Normal;
    render_input_widget(
        frame,
        area,
        input_title(&app.mode),
        &app.input_buffer,
        is_focused,
        Color::Yellow,
    );
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.mode {
        AppMode::Normal => "[a] 添加  [e] 编辑  [d] 删除  [r] 刷新  [j/k] 导航  [q] 退出",
        AppMode::AddingTodo => "输入标题后按 [Enter] 添加  [Esc] 取消",
        AppMode::EditingTodo(_) => "输入新标题后按 [Enter] 保存  [Esc] 取消",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}
