//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种业务处理方法。
//! dispatch 本身不做任何 IO：网络请求以 Effect 描述返回，
//! 请求完成后再以 Action 回流进来。

use super::actions::{Action, Effect};
use super::state::{App, AppMode};
use crate::models::Todo;

impl App {
    /// 核心逻辑分发
    pub fn dispatch(&mut self, action: Action) -> Effect {
        match action {
            Action::Quit => return Effect::Quit,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::StartAddTodo => self.start_add_todo(),
            Action::StartEditTodo => self.start_edit_todo(),
            Action::StartDeleteTodo => return self.start_delete_todo(),
            Action::Reload => return self.start_reload(),

            Action::Cancel => self.cancel(),
            Action::Submit => return self.submit(),

            Action::Input(c) => {
                if matches!(self.mode, AppMode::AddingTodo | AppMode::EditingTodo(_)) {
                    self.input_buffer.push(c);
                }
            }
            Action::DeleteChar => {
                if matches!(self.mode, AppMode::AddingTodo | AppMode::EditingTodo(_)) {
                    self.input_buffer.pop();
                }
            }

            Action::TodosLoaded { generation, result } => {
                self.on_todos_loaded(generation, result)
            }
            Action::TodoCreated { result } => self.on_todo_created(result),
            Action::TodoUpdated { id, result } => self.on_todo_updated(id, result),
            Action::TodoDeleted { id, result } => self.on_todo_deleted(id, result),
        }
        Effect::None
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.todos.len() {
            self.selected_index += 1;
        }
    }

    // ============ 表单入口 ============

    /// 开始添加待办
    pub fn start_add_todo(&mut self) {
        self.mode = AppMode::AddingTodo;
        self.input_buffer.clear();
    }

    /// 开始编辑选中的待办，草稿预填当前标题
    pub fn start_edit_todo(&mut self) {
        if let Some(todo) = self.selected_todo() {
            let id = todo.id.clone();
            let title = todo.title.clone();
            self.mode = AppMode::EditingTodo(id);
            self.input_buffer = title;
        }
    }

    /// 提交当前表单
    ///
    /// 空草稿直接忽略。请求发出后草稿和模式保持原样，
    /// 由成功的完成事件负责清理；失败则一切如旧，便于重试。
    pub fn submit(&mut self) -> Effect {
        if self.input_buffer.is_empty() {
            return Effect::None;
        }
        match &self.mode {
            AppMode::Normal => Effect::None,
            AppMode::AddingTodo => {
                self.in_flight += 1;
                Effect::CreateTodo {
                    title: self.input_buffer.clone(),
                }
            }
            AppMode::EditingTodo(id) => {
                self.in_flight += 1;
                Effect::UpdateTodo {
                    id: id.clone(),
                    title: self.input_buffer.clone(),
                }
            }
        }
    }

    /// 取消当前操作
    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
        self.input_buffer.clear();
        self.message = None;
    }

    // ============ 删除/加载 ============

    /// 删除当前选中的待办（直接发请求，不做本地预删）
    pub fn start_delete_todo(&mut self) -> Effect {
        match self.selected_todo_id() {
            Some(id) => {
                self.in_flight += 1;
                Effect::DeleteTodo { id }
            }
            None => Effect::None,
        }
    }

    /// 重新加载列表，代号递增一次
    pub fn start_reload(&mut self) -> Effect {
        self.load_generation += 1;
        self.in_flight += 1;
        Effect::LoadTodos {
            generation: self.load_generation,
        }
    }

    // ============ 后台完成事件 ============

    /// 列表加载完成
    pub fn on_todos_loaded(&mut self, generation: u64, result: Result<Vec<Todo>, String>) {
        self.finish_request();
        // 只认最新一次加载，迟到的结果直接丢弃
        if generation != self.load_generation {
            return;
        }
        match result {
            Ok(todos) => {
                self.message = Some(format!("已加载 {} 个待办", todos.len()));
                self.todos = todos;
                self.clamp_selection();
            }
            Err(err) => self.message = Some(format!("加载失败: {}", err)),
        }
    }

    /// 创建完成
    ///
    /// 成功后把后端回的待办（带分配的 id）追加到末尾并清空草稿，
    /// 模式保持不变，可以连续添加。
    pub fn on_todo_created(&mut self, result: Result<Todo, String>) {
        self.finish_request();
        match result {
            Ok(todo) => {
                self.todos.push(todo);
                self.input_buffer.clear();
                self.message = Some("待办已添加".to_string());
            }
            Err(err) => self.message = Some(format!("添加失败: {}", err)),
        }
    }

    /// 更新完成
    ///
    /// 成功后无条件退出编辑并清空草稿，哪怕期间用户已转去编辑
    /// 别的待办。默认不回写本地标题，等下一次重新加载对齐；
    /// reconcile_updates 打开时才用后端回显覆盖。
    pub fn on_todo_updated(&mut self, id: String, result: Result<Todo, String>) {
        self.finish_request();
        match result {
            Ok(updated) => {
                if self.reconcile_updates {
                    if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
                        todo.title = updated.title;
                    }
                }
                if matches!(self.mode, AppMode::EditingTodo(_)) {
                    self.mode = AppMode::AddingTodo;
                }
                self.input_buffer.clear();
                self.message = Some("待办已更新".to_string());
            }
            Err(err) => self.message = Some(format!("更新失败: {}", err)),
        }
    }

    /// 删除完成
    ///
    /// 只移除 id 匹配的那一条。不清理编辑目标：对已删除待办
    /// 再提交更新会收到后端的错误，由失败分支提示。
    pub fn on_todo_deleted(&mut self, id: String, result: Result<(), String>) {
        self.finish_request();
        match result {
            Ok(()) => {
                self.todos.retain(|todo| todo.id != id);
                self.clamp_selection();
                self.message = Some("待办已删除".to_string());
            }
            Err(err) => self.message = Some(format!("删除失败: {}", err)),
        }
    }

    fn finish_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}
