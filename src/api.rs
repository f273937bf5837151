use anyhow::Context;

use crate::models::{TitlePayload, Todo};

/// 后端 REST 客户端
///
/// 四个方法对应后端的四个接口。请求不设超时、不做重试，
/// 失败时把错误原样交给调用方。
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn todos_url(&self) -> String {
        format!("{}/api/todos", self.base_url)
    }

    fn todo_url(&self, id: &str) -> String {
        format!("{}/api/todos/{}", self.base_url, id)
    }

    /// GET /api/todos，取全量待办列表
    pub async fn list_todos(&self) -> anyhow::Result<Vec<Todo>> {
        tracing::debug!("GET {}", self.todos_url());
        let todos = self
            .http
            .get(self.todos_url())
            .send()
            .await
            .context("请求待办列表失败")?
            .error_for_status()
            .context("后端返回错误状态")?
            .json()
            .await
            .context("解析待办列表失败")?;
        Ok(todos)
    }

    /// POST /api/todos，返回带后端分配 id 的新待办
    pub async fn create_todo(&self, title: &str) -> anyhow::Result<Todo> {
        tracing::debug!("POST {}", self.todos_url());
        let todo = self
            .http
            .post(self.todos_url())
            .json(&TitlePayload::new(title))
            .send()
            .await
            .context("创建待办失败")?
            .error_for_status()
            .context("后端返回错误状态")?
            .json()
            .await
            .context("解析创建结果失败")?;
        Ok(todo)
    }

    /// PATCH /api/todos/{id}，返回更新后的待办
    pub async fn update_todo(&self, id: &str, title: &str) -> anyhow::Result<Todo> {
        tracing::debug!("PATCH {}", self.todo_url(id));
        let todo = self
            .http
            .patch(self.todo_url(id))
            .json(&TitlePayload::new(title))
            .send()
            .await
            .context("更新待办失败")?
            .error_for_status()
            .context("后端返回错误状态")?
            .json()
            .await
            .context("解析更新结果失败")?;
        Ok(todo)
    }

    /// DELETE /api/todos/{id}
    pub async fn delete_todo(&self, id: &str) -> anyhow::Result<()> {
        tracing::debug!("DELETE {}", self.todo_url(id));
        self.http
            .delete(self.todo_url(id))
            .send()
            .await
            .context("删除待办失败")?
            .error_for_status()
            .context("后端返回错误状态")?;
        Ok(())
    }
}
