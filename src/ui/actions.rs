//! Action 与 Effect 定义 (Intent)
//!
//! 用户交互和后台请求的完成统一转化为语义化 Action。
//! dispatch 只改状态，需要发起的网络请求用 Effect 描述，
//! 由事件循环负责真正执行。

use crate::models::Todo;

/// 用户操作与后台完成事件
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,

    // 触发特定功能
    StartAddTodo,
    StartEditTodo,
    StartDeleteTodo,
    Reload,

    // 表单/通用交互
    Cancel,      // Esc
    Submit,      // Enter
    Input(char), // 输入字符
    DeleteChar,  // Backspace

    // 后台请求完成，由事件循环从通道里收回来
    TodosLoaded {
        generation: u64,
        result: Result<Vec<Todo>, String>,
    },
    TodoCreated {
        result: Result<Todo, String>,
    },
    TodoUpdated {
        id: String,
        result: Result<Todo, String>,
    },
    TodoDeleted {
        id: String,
        result: Result<(), String>,
    },
}

/// dispatch 返回的副作用描述
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    LoadTodos { generation: u64 },
    CreateTodo { title: String },
    UpdateTodo { id: String, title: String },
    DeleteTodo { id: String },
}
