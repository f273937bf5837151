//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use crate::config::Config;
use crate::models::Todo;

/// 应用状态
pub struct App {
    pub todos: Vec<Todo>,
    pub selected_index: usize,
    pub mode: AppMode,
    pub input_buffer: String,
    pub message: Option<String>,
    /// 在途的后端请求数，大于零时标题栏显示同步标记
    pub in_flight: usize,
    /// 列表加载的代号，迟到的加载结果按代号丢弃
    pub load_generation: u64,
    /// 更新成功后是否用后端回显覆盖本地标题
    pub reconcile_updates: bool,
}

/// 应用模式
///
/// 提交语义只有两条路径：AddingTodo 走创建，EditingTodo 走更新，
/// 不存在"有编辑目标却走创建"的状态。
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    AddingTodo,
    EditingTodo(String), // String 是正在编辑的待办 id
}

impl App {
    /// 创建新的应用实例
    pub fn new(config: &Config) -> Self {
        Self {
            todos: Vec::new(),
            selected_index: 0,
            mode: AppMode::Normal,
            input_buffer: String::new(),
            message: None,
            in_flight: 0,
            load_generation: 0,
            reconcile_updates: config.reconcile_updates,
        }
    }

    /// 确保选中索引落在列表范围内
    pub fn clamp_selection(&mut self) {
        if self.todos.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.todos.len() {
            self.selected_index = self.todos.len() - 1;
        }
    }

    /// 获取当前选中的待办
    pub fn selected_todo(&self) -> Option<&Todo> {
        self.todos.get(self.selected_index)
    }

    /// 获取当前选中的待办 id
    pub fn selected_todo_id(&self) -> Option<String> {
        self.selected_todo().map(|todo| todo.id.clone())
    }
}
