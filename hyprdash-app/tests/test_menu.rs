use std::collections::{HashSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use hyprdash_app::menu::{Menu, MenuItem};
use hyprdash_core::{Candidate, CommandTable, EnvContext};
use hyprdash_executor::{Dispatcher, ExecutableProbe, Launcher, ProcessSpawner};
use hyprdash_interfaces::Interface;
use parking_lot::Mutex;

/// Feeds canned input lines and records everything written.
struct ScriptedInterface {
    input: Mutex<VecDeque<String>>,
    output: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl ScriptedInterface {
    fn new(lines: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            input: Mutex::new(lines.iter().map(|s| s.to_string()).collect()),
            output: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
        })
    }

    fn output(&self) -> Vec<String> {
        self.output.lock().clone()
    }

    fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }
}

#[async_trait]
impl Interface for ScriptedInterface {
    async fn receive_input(&self) -> Option<String> {
        self.input.lock().pop_front()
    }

    async fn send_output(&self, message: &str) {
        self.output.lock().push(message.to_string());
    }

    async fn prompt(&self, _message: &str) {}

    async fn request_approval(&self, _action: &str) -> bool {
        self.receive_input()
            .await
            .map(|answer| answer == "y")
            .unwrap_or(false)
    }

    async fn show_status(&self, status: &str) {
        self.output.lock().push(status.to_string());
    }

    async fn show_error(&self, error: &str) {
        self.errors.lock().push(error.to_string());
    }
}

struct InstalledProbe(HashSet<String>);

impl ExecutableProbe for InstalledProbe {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.0
            .contains(program)
            .then(|| PathBuf::from("/usr/bin").join(program))
    }
}

#[derive(Default)]
struct RecordingSpawner {
    spawned: Mutex<Vec<String>>,
}

impl ProcessSpawner for RecordingSpawner {
    fn spawn_detached(&self, _executable: &Path, candidate: &Candidate) -> io::Result<Option<u32>> {
        self.spawned.lock().push(candidate.to_string());
        Ok(Some(4242))
    }
}

fn setup(installed: &[&str], env: EnvContext) -> (Arc<Dispatcher>, Arc<RecordingSpawner>) {
    let probe = Arc::new(InstalledProbe(
        installed.iter().map(|s| s.to_string()).collect(),
    ));
    let spawner = Arc::new(RecordingSpawner::default());
    let dispatcher = Dispatcher::new(
        Arc::new(CommandTable::builtin()),
        Arc::new(Launcher::new(probe, spawner.clone())),
        env,
    );
    (Arc::new(dispatcher), spawner)
}

fn position(menu: &Menu, wanted: impl Fn(&MenuItem) -> bool) -> String {
    let index = menu.items().iter().position(|&item| wanted(item)).unwrap();
    (index + 1).to_string()
}

fn action(id: &'static str) -> impl Fn(&MenuItem) -> bool {
    move |item: &MenuItem| matches!(item, MenuItem::Action { id: item_id, .. } if item_id.as_str() == id)
}

#[tokio::test]
async fn test_menu_lists_actions_and_exit_last() {
    let (dispatcher, _) = setup(&[], EnvContext::new("/home/alice"));
    let ui = ScriptedInterface::new(&[]);
    let menu = Menu::new(ui.clone(), dispatcher);

    let items = menu.items();
    assert_eq!(items.last(), Some(&&MenuItem::Exit));
    assert!(items.contains(&&MenuItem::Pictures));
    assert!(items.contains(&&MenuItem::Summary));
    // view_image needs a file name, so it is reached through Pictures only.
    let is_view_image = action("view_image");
    assert!(!items.iter().any(|&item| is_view_image(item)));

    menu.run().await;
    let output = ui.output();
    assert_eq!(output[0], "Menu:");
    assert!(output.iter().any(|line| line.ends_with(") Exit")));
}

#[tokio::test]
async fn test_menu_dispatches_choice_then_exits() {
    let (dispatcher, spawner) = setup(&["firefox"], EnvContext::new("/home/alice"));
    let probe_menu = Menu::new(ScriptedInterface::new(&[]), dispatcher.clone());
    let browser = position(&probe_menu, action("launch_browser"));
    let exit = position(&probe_menu, |item| *item == MenuItem::Exit);

    let ui = ScriptedInterface::new(&[&browser, &exit, "1"]);
    Menu::new(ui.clone(), dispatcher).run().await;

    assert_eq!(*spawner.spawned.lock(), vec!["firefox".to_string()]);
    assert!(ui.output().contains(&"Started firefox (pid 4242)".to_string()));
}

#[tokio::test]
async fn test_menu_reports_failure_and_keeps_running() {
    let (dispatcher, spawner) = setup(&["kitty"], EnvContext::new("/home/alice"));
    let probe_menu = Menu::new(ScriptedInterface::new(&[]), dispatcher.clone());
    let browser = position(&probe_menu, action("launch_browser"));
    let terminal = position(&probe_menu, action("launch_terminal"));

    let ui = ScriptedInterface::new(&["abc", "999", &browser, &terminal, "q"]);
    Menu::new(ui.clone(), dispatcher).run().await;

    let invalid = ui
        .output()
        .iter()
        .filter(|line| *line == "Invalid option. Please try again.")
        .count();
    assert_eq!(invalid, 2);
    assert_eq!(ui.errors().len(), 1);
    assert!(ui.errors()[0].contains("launch_browser"));
    assert_eq!(*spawner.spawned.lock(), vec!["kitty".to_string()]);
}

#[tokio::test]
async fn test_confirmed_action_can_be_cancelled() {
    let (dispatcher, spawner) = setup(&["systemctl"], EnvContext::new("/home/alice"));
    let probe_menu = Menu::new(ScriptedInterface::new(&[]), dispatcher.clone());
    let reboot = position(&probe_menu, action("reboot"));

    let ui = ScriptedInterface::new(&[&reboot, "n"]);
    Menu::new(ui.clone(), dispatcher.clone()).run().await;
    assert!(spawner.spawned.lock().is_empty());
    assert!(ui.output().contains(&"Cancelled.".to_string()));

    let ui = ScriptedInterface::new(&[&reboot, "y"]);
    Menu::new(ui, dispatcher).run().await;
    assert_eq!(*spawner.spawned.lock(), vec!["systemctl reboot".to_string()]);
}

#[tokio::test]
async fn test_pictures_flow_opens_chosen_image() {
    let pictures = tempfile::tempdir().unwrap();
    for name in ["b.png", "a.jpg", "readme.txt"] {
        std::fs::write(pictures.path().join(name), b"x").unwrap();
    }
    let env = EnvContext::new("/home/alice").with_image_dir(pictures.path());
    let (dispatcher, spawner) = setup(&["feh"], env);
    let probe_menu = Menu::new(ScriptedInterface::new(&[]), dispatcher.clone());
    let choice = position(&probe_menu, |item| *item == MenuItem::Pictures);

    let ui = ScriptedInterface::new(&[&choice, "2"]);
    Menu::new(ui.clone(), dispatcher).run().await;

    let output = ui.output();
    assert!(output.contains(&"1) a.jpg".to_string()));
    assert!(output.contains(&"2) b.png".to_string()));
    assert_eq!(
        *spawner.spawned.lock(),
        vec![format!("feh {}", pictures.path().join("b.png").display())]
    );
}

#[tokio::test]
async fn test_pictures_flow_empty_and_missing_dirs() {
    let empty = tempfile::tempdir().unwrap();
    let env = EnvContext::new("/home/alice").with_image_dir(empty.path());
    let (dispatcher, spawner) = setup(&["feh"], env);
    let probe_menu = Menu::new(ScriptedInterface::new(&[]), dispatcher.clone());
    let choice = position(&probe_menu, |item| *item == MenuItem::Pictures);

    let ui = ScriptedInterface::new(&[&choice]);
    Menu::new(ui.clone(), dispatcher).run().await;
    assert!(ui
        .output()
        .iter()
        .any(|line| line.starts_with("No images found in")));

    let env = EnvContext::new("/home/alice").with_image_dir(empty.path().join("missing"));
    let (dispatcher, _) = setup(&["feh"], env);
    let ui = ScriptedInterface::new(&[&choice]);
    Menu::new(ui.clone(), dispatcher).run().await;
    assert!(ui.errors()[0].starts_with("Could not open"));
    assert!(spawner.spawned.lock().is_empty());
}

#[tokio::test]
async fn test_system_info_falls_back_to_summary() {
    let (dispatcher, _) = setup(&[], EnvContext::new("/home/alice"));
    let probe_menu = Menu::new(ScriptedInterface::new(&[]), dispatcher.clone());
    let info = position(&probe_menu, action("system_info"));

    let ui = ScriptedInterface::new(&[&info]);
    Menu::new(ui.clone(), dispatcher).run().await;

    assert_eq!(ui.errors().len(), 1);
    assert!(ui.output().iter().any(|line| line.starts_with("Host:")));
}
