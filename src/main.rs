use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::runtime::Runtime;

use taproot::api::ApiClient;
use taproot::config::Config;
use taproot::ui::{self, Action, App, Effect, render};

/// 获取数据目录路径 (~/.local/share/taproot/)
fn get_data_dir() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .context("无法获取用户数据目录")?
        .join("taproot");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 日志写到数据目录下的文件，不污染终端界面
fn init_logging() -> anyhow::Result<()> {
    let log_path = get_data_dir()?.join("taproot.log");
    let file = fs::File::create(&log_path)
        .with_context(|| format!("创建日志文件失败: {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    init_logging()?;
    tracing::info!("后端地址: {}", config.backend_url);

    let runtime = Runtime::new().context("创建异步运行时失败")?;
    let api = ApiClient::new(&config.backend_url);

    // 创建应用状态
    let mut app = App::new(&config);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app, &runtime, &api);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    runtime: &Runtime,
    api: &ApiClient,
) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel::<Action>();

    // 启动时先拉一次列表
    let effect = app.dispatch(Action::Reload);
    run_effect(effect, api, runtime, &tx);

    loop {
        terminal.draw(|f| render(f, app))?;

        // 先收后台完成事件
        while let Ok(action) = rx.try_recv() {
            tracing::debug!("收到后台动作: {:?}", action);
            let effect = app.dispatch(action);
            if run_effect(effect, api, runtime, &tx) {
                return Ok(());
            }
        }

        // 再处理按键，带超时轮询，保证同步标记和完成消息及时刷新
        if crossterm::event::poll(Duration::from_millis(100))? {
            if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
                if key.kind == crossterm::event::KeyEventKind::Press {
                    let effect = ui::handle_key_event(app, key.code);
                    if run_effect(effect, api, runtime, &tx) {
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// 执行 dispatch 产生的副作用，每个网络请求各起一个后台任务，
/// 完成后以 Action 送回主循环。返回 true 表示退出。
fn run_effect(
    effect: Effect,
    api: &ApiClient,
    runtime: &Runtime,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::LoadTodos { generation } => {
            let api = api.clone();
            let tx = tx.clone();
            runtime.spawn(async move {
                let result = api.list_todos().await.map_err(|e| format!("{e:#}"));
                if tx.send(Action::TodosLoaded { generation, result }).is_err() {
                    tracing::warn!("主循环已退出，丢弃加载结果");
                }
            });
        }
        Effect::CreateTodo { title } => {
            let api = api.clone();
            let tx = tx.clone();
            runtime.spawn(async move {
                let result = api.create_todo(&title).await.map_err(|e| format!("{e:#}"));
                if tx.send(Action::TodoCreated { result }).is_err() {
                    tracing::warn!("主循环已退出，丢弃创建结果");
                }
            });
        }
        Effect::UpdateTodo { id, title } => {
            let api = api.clone();
            let tx = tx.clone();
            runtime.spawn(async move {
                let result = api
                    .update_todo(&id, &title)
                    .await
                    .map_err(|e| format!("{e:#}"));
                if tx.send(Action::TodoUpdated { id, result }).is_err() {
                    tracing::warn!("主循环已退出，丢弃更新结果");
                }
            });
        }
        Effect::DeleteTodo { id } => {
            let api = api.clone();
            let tx = tx.clone();
            runtime.spawn(async move {
                let result = api.delete_todo(&id).await.map_err(|e| format!("{e:#}"));
                if tx.send(Action::TodoDeleted { id, result }).is_err() {
                    tracing::warn!("主循环已退出，丢弃删除结果");
                }
            });
        }
    }
    false
}
