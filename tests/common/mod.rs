//! 测试用的内存后端
//!
//! 在随机端口上起一个极简 HTTP/1.1 服务，实现 /api/todos 的
//! 四个接口，数据存在内存里，同时记录收到的每个请求。

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{Value, json};

pub struct MockBackend {
    addr: String,
    todos: Arc<Mutex<Vec<Value>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("绑定测试端口失败");
        let addr = listener.local_addr().expect("读取测试端口失败").to_string();

        let todos = Arc::new(Mutex::new(Vec::new()));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let next_id = Arc::new(AtomicU64::new(1));

        {
            let todos = Arc::clone(&todos);
            let requests = Arc::clone(&requests);
            let next_id = Arc::clone(&next_id);
            thread::spawn(move || {
                for stream in listener.incoming() {
                    let Ok(stream) = stream else { continue };
                    let todos = Arc::clone(&todos);
                    let requests = Arc::clone(&requests);
                    let next_id = Arc::clone(&next_id);
                    thread::spawn(move || {
                        let _ = handle_connection(stream, &todos, &requests, &next_id);
                    });
                }
            });
        }

        Self {
            addr,
            todos,
            requests,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// 预置一条待办
    pub fn seed(&self, id: &str, title: &str) {
        self.seed_value(json!({ "id": id, "title": title }));
    }

    /// 预置一条任意形状的待办（比如 Mongo 风格的 `_id`）
    pub fn seed_value(&self, value: Value) {
        self.todos.lock().unwrap().push(value);
    }

    /// 当前内存里的待办标题，按存放顺序
    pub fn titles(&self) -> Vec<String> {
        self.todos
            .lock()
            .unwrap()
            .iter()
            .filter_map(|t| t.get("title").and_then(Value::as_str).map(str::to_string))
            .collect()
    }

    /// 收到过的请求，格式 "METHOD /path [body]"
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn value_id(value: &Value) -> Option<&str> {
    value
        .get("id")
        .or_else(|| value.get("_id"))
        .and_then(Value::as_str)
}

fn handle_connection(
    stream: TcpStream,
    todos: &Mutex<Vec<Value>>,
    requests: &Mutex<Vec<String>>,
    next_id: &AtomicU64,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        reader.read_line(&mut header)?;
        let header = header.trim();
        if header.is_empty() {
            break;
        }
        let lower = header.to_ascii_lowercase();
        if let Some(value) = lower.strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;
    let body = String::from_utf8_lossy(&body).to_string();

    requests.lock().unwrap().push(if body.is_empty() {
        format!("{} {}", method, path)
    } else {
        format!("{} {} {}", method, path, body)
    });

    let (status, response_body) = route(&method, &path, &body, todos, next_id);

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        response_body.len(),
        response_body
    )?;
    stream.flush()?;
    Ok(())
}

fn route(
    method: &str,
    path: &str,
    body: &str,
    todos: &Mutex<Vec<Value>>,
    next_id: &AtomicU64,
) -> (&'static str, String) {
    let mut todos = todos.lock().unwrap();

    match (method, path) {
        ("GET", "/api/todos") => ("200 OK", Value::Array(todos.clone()).to_string()),
        ("POST", "/api/todos") => {
            let Ok(payload) = serde_json::from_str::<Value>(body) else {
                return ("400 Bad Request", String::new());
            };
            let title = payload.get("title").and_then(Value::as_str).unwrap_or("");
            let id = format!("id-{}", next_id.fetch_add(1, Ordering::SeqCst));
            let todo = json!({ "id": id, "title": title });
            todos.push(todo.clone());
            ("201 Created", todo.to_string())
        }
        _ => match path.strip_prefix("/api/todos/") {
            Some(id) => match method {
                "PATCH" => {
                    let Ok(payload) = serde_json::from_str::<Value>(body) else {
                        return ("400 Bad Request", String::new());
                    };
                    let title = payload
                        .get("title")
                        .and_then(Value::as_str)
                        .unwrap_or("")
                        .to_string();
                    match todos.iter_mut().find(|t| value_id(t) == Some(id)) {
                        Some(todo) => {
                            todo["title"] = json!(title);
                            ("200 OK", todo.to_string())
                        }
                        None => ("404 Not Found", String::new()),
                    }
                }
                "DELETE" => {
                    let before = todos.len();
                    todos.retain(|t| value_id(t) != Some(id));
                    if todos.len() < before {
                        ("204 No Content", String::new())
                    } else {
                        ("404 Not Found", String::new())
                    }
                }
                _ => ("404 Not Found", String::new()),
            },
            None => ("404 Not Found", String::new()),
        },
    }
}
