use serde::{Deserialize, Serialize};

/// 待办事项
///
/// id 由后端在创建时分配，客户端只把它当作不透明字符串，
/// 不生成也不校验。部分后端返回 Mongo 风格的 `_id` 字段，
/// 反序列化时两种写法都接受。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
}

/// 创建/更新共用的请求体 `{ title }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitlePayload {
    pub title: String,
}

impl TitlePayload {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}
